use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::{join, join_all};
use scurve_core::{CpcCode, FetchPart, MaturityCurve, PartialFailure};
use scurve_logging::{scurve_debug, scurve_warn};

use crate::{decode_curve, decode_title, Endpoints, FetchError, JsonFetcher};

/// Titles and curves for the expanded codes. A code missing from both maps
/// either failed (see `failures`) or was beyond the expansion limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    pub titles: BTreeMap<String, String>,
    pub curves: BTreeMap<String, MaturityCurve>,
    pub failures: Vec<PartialFailure>,
}

impl Expansion {
    fn record_failure(&mut self, code: &str, part: FetchPart, err: FetchError) {
        scurve_warn!("{} lookup failed for {}: {}", part, code, err);
        self.failures.push(PartialFailure {
            code: code.to_owned(),
            part,
            message: err.to_string(),
        });
    }
}

/// Expands CPC codes into titles and maturity curves, two concurrent fetches per code.
pub struct MaturityAggregator {
    fetcher: Arc<dyn JsonFetcher>,
    endpoints: Endpoints,
    limit: Option<usize>,
    future_years: Option<u32>,
}

impl MaturityAggregator {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            endpoints,
            limit: None,
            future_years: None,
        }
    }

    /// Only the first `limit` codes are expanded; `None` expands all.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_future_years(mut self, future_years: Option<u32>) -> Self {
        self.future_years = future_years;
        self
    }

    /// Resolves once every issued fetch has settled. Never fails as a whole.
    pub async fn expand(&self, query: &str, codes: &[CpcCode]) -> Expansion {
        let selected = match self.limit {
            Some(limit) => &codes[..limit.min(codes.len())],
            None => codes,
        };
        scurve_debug!(
            "Expanding {} of {} codes for query {:?}",
            selected.len(),
            codes.len(),
            query
        );

        let lookups = selected.iter().map(|code| {
            let code = code.code.as_str();
            async move {
                let (title, curve) =
                    join(self.fetch_title(code), self.fetch_curve(query, code)).await;
                (code, title, curve)
            }
        });
        let settled = join_all(lookups).await;

        let mut expansion = Expansion::default();
        for (code, title, curve) in settled {
            match title {
                Ok(Some(title)) => {
                    expansion.titles.insert(code.to_owned(), title);
                }
                Ok(None) => scurve_debug!("Blank title for {}", code),
                Err(err) => expansion.record_failure(code, FetchPart::Title, err),
            }
            match curve {
                Ok(curve) => {
                    expansion.curves.insert(code.to_owned(), curve);
                }
                Err(err) => expansion.record_failure(code, FetchPart::Curve, err),
            }
        }
        expansion
    }

    async fn fetch_title(&self, code: &str) -> Result<Option<String>, FetchError> {
        let url = self.endpoints.cpc_title(code);
        decode_title(self.fetcher.get_json(&url).await?)
    }

    async fn fetch_curve(&self, query: &str, code: &str) -> Result<MaturityCurve, FetchError> {
        let url = self
            .endpoints
            .predict_curve(query, code, self.future_years);
        decode_curve(self.fetcher.get_json(&url).await?)
    }
}
