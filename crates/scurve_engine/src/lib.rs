//! Dashboard engine: HTTP access, query translation and the search-and-prediction pipeline.
mod aggregate;
mod config;
mod decode;
mod endpoints;
mod fetch;
mod orchestrator;
mod pipeline;
mod translate;
mod types;

pub use aggregate::{Expansion, MaturityAggregator};
pub use config::EngineConfig;
pub use decode::{decode_curve, decode_hits, decode_title, decode_top_codes};
pub use endpoints::Endpoints;
pub use fetch::{FetchSettings, JsonFetcher, ReqwestJsonFetcher};
pub use orchestrator::SearchOrchestrator;
pub use pipeline::SearchPipeline;
pub use translate::{HttpTranslator, QueryTranslator, TranslationSettings};
pub use types::{FailureKind, FetchError, SearchFailure, TranslationError};
