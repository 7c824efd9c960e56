use url::Url;

use crate::{FailureKind, FetchError};

/// URL builder for the patent backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        // Keep any path prefix, e.g. `http://host/api/`, and make joins append to it.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// `GET /search?search_query=...`
    pub fn search(&self, query: &str) -> Url {
        self.with_query(&["search"], &[("search_query", query)])
    }

    /// `GET /top-cpc-codes?search_query=...`
    pub fn top_codes(&self, query: &str) -> Url {
        self.with_query(&["top-cpc-codes"], &[("search_query", query)])
    }

    /// `GET /cpc-title/{code}`; the code is one path segment, so `/` inside it is percent-encoded.
    pub fn cpc_title(&self, code: &str) -> Url {
        self.with_query(&["cpc-title", code], &[])
    }

    /// `GET /predict-s-curve?search_query=...&cpc_code=...[&future_years=...]`
    pub fn predict_curve(&self, query: &str, code: &str, future_years: Option<u32>) -> Url {
        let future_years = future_years.map(|years| years.to_string());
        let mut params = vec![("search_query", query), ("cpc_code", code)];
        if let Some(years) = future_years.as_deref() {
            params.push(("future_years", years));
        }
        self.with_query(&["predict-s-curve"], &params)
    }

    fn with_query(&self, segments: &[&str], params: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }
}
