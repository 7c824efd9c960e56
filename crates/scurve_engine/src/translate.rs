use std::sync::Arc;

use serde_json::{json, Value};
use url::Url;

use crate::{FailureKind, FetchError, JsonFetcher, TranslationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub target_language: String,
}

impl TranslationSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            target_language: "en".to_string(),
        }
    }
}

/// Maps free text into the language the patent index is searched in.
#[async_trait::async_trait]
pub trait QueryTranslator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// Translator speaking the `{ q, target }` -> `data.translations[0].translatedText` protocol.
pub struct HttpTranslator {
    fetcher: Arc<dyn JsonFetcher>,
    url: Url,
    target_language: String,
}

impl HttpTranslator {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        settings: &TranslationSettings,
    ) -> Result<Self, FetchError> {
        let mut url = Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if let Some(key) = settings.api_key.as_deref() {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(Self {
            fetcher,
            url,
            target_language: settings.target_language.clone(),
        })
    }
}

#[async_trait::async_trait]
impl QueryTranslator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let body = json!({ "q": text, "target": self.target_language });
        let response = self.fetcher.post_json(&self.url, &body).await?;
        translated_text(&response).ok_or(TranslationError::MissingText)
    }
}

fn translated_text(response: &Value) -> Option<String> {
    response
        .pointer("/data/translations/0/translatedText")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
