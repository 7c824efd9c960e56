use std::sync::Arc;

use futures_util::future::join;
use scurve_core::{Query, SearchResultBundle};
use scurve_logging::{scurve_info, scurve_warn};

use crate::{
    decode_hits, decode_top_codes, Endpoints, JsonFetcher, MaturityAggregator, QueryTranslator,
    SearchFailure,
};

/// The network side of one search: translate, search and top codes, then expand.
pub struct SearchPipeline {
    fetcher: Arc<dyn JsonFetcher>,
    endpoints: Endpoints,
    translator: Option<Arc<dyn QueryTranslator>>,
    aggregator: MaturityAggregator,
}

impl SearchPipeline {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        endpoints: Endpoints,
        aggregator: MaturityAggregator,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            translator: None,
            aggregator,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn QueryTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub async fn execute(&self, query: &Query) -> Result<SearchResultBundle, SearchFailure> {
        let search_query = self.translated(query).await;

        let search_url = self.endpoints.search(&search_query);
        let codes_url = self.endpoints.top_codes(&search_query);
        // Both requests settle before either result is looked at.
        let (hits, codes) = join(
            self.fetcher.get_json(&search_url),
            self.fetcher.get_json(&codes_url),
        )
        .await;
        let hits = hits
            .and_then(decode_hits)
            .map_err(SearchFailure::Search)?;
        let codes = codes
            .and_then(decode_top_codes)
            .map_err(SearchFailure::TopCodes)?;

        let expansion = self.aggregator.expand(&search_query, &codes).await;
        if !codes.is_empty() && expansion.titles.is_empty() && expansion.curves.is_empty() {
            scurve_warn!(
                "No titles or curves for any of {} codes of {:?}",
                codes.len(),
                search_query
            );
        }
        scurve_info!(
            "Search {:?}: {} hits, {} codes, {} curves, {} partial failures",
            search_query,
            hits.len(),
            codes.len(),
            expansion.curves.len(),
            expansion.failures.len()
        );

        Ok(SearchResultBundle {
            search_query,
            hits,
            codes,
            titles: expansion.titles,
            curves: expansion.curves,
            failures: expansion.failures,
        }
        .restrict_to_codes())
    }

    async fn translated(&self, query: &Query) -> String {
        let Some(translator) = &self.translator else {
            return query.as_str().to_owned();
        };
        match translator.translate(query.as_str()).await {
            Ok(text) => {
                scurve_info!("Translated {:?} to {:?}", query.as_str(), text);
                text
            }
            Err(err) => {
                scurve_warn!("Using untranslated query {:?}: {}", query.as_str(), err);
                query.as_str().to_owned()
            }
        }
    }
}
