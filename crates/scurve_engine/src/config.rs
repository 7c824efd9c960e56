use crate::{FetchSettings, TranslationSettings};

/// Everything needed to build a [`crate::SearchOrchestrator`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub fetch: FetchSettings,
    /// How many of the top codes get titles and curves; `None` expands all of them.
    pub expand_limit: Option<usize>,
    /// Prediction horizon passed to the backend; `None` keeps the backend default.
    pub future_years: Option<u32>,
    pub translation: Option<TranslationSettings>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            fetch: FetchSettings::default(),
            expand_limit: None,
            future_years: None,
            translation: None,
        }
    }
}

impl EngineConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
