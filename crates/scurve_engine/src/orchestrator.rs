use std::sync::{Arc, Mutex, PoisonError};

use scurve_core::{
    update, AppState, DashboardState, DashboardView, Effect, Msg, RunId, SearchResultBundle,
    ValidationError,
};
use scurve_logging::{scurve_debug, scurve_error, scurve_info, scurve_warn};
use tokio::sync::watch;

use crate::{
    EngineConfig, Endpoints, FetchError, HttpTranslator, JsonFetcher, MaturityAggregator,
    ReqwestJsonFetcher, SearchFailure, SearchPipeline,
};

/// Owns the dashboard state and runs searches against it.
///
/// Runs may overlap; the state lock is never held across an await, and a run
/// whose id is no longer current cannot change what the dashboard shows.
pub struct SearchOrchestrator {
    pipeline: SearchPipeline,
    state: Mutex<AppState>,
    published: watch::Sender<DashboardState>,
}

impl SearchOrchestrator {
    pub fn new(pipeline: SearchPipeline) -> Self {
        let (published, _) = watch::channel(DashboardState::Idle);
        Self {
            pipeline,
            state: Mutex::new(AppState::new()),
            published,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, FetchError> {
        let fetcher: Arc<dyn JsonFetcher> =
            Arc::new(ReqwestJsonFetcher::new(config.fetch.clone())?);
        Self::with_fetcher(config, fetcher)
    }

    /// Like [`Self::from_config`] but with a caller-supplied transport.
    pub fn with_fetcher(
        config: &EngineConfig,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Result<Self, FetchError> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let aggregator = MaturityAggregator::new(fetcher.clone(), endpoints.clone())
            .with_limit(config.expand_limit)
            .with_future_years(config.future_years);
        let mut pipeline = SearchPipeline::new(fetcher.clone(), endpoints, aggregator);
        if let Some(settings) = &config.translation {
            pipeline = pipeline.with_translator(Arc::new(HttpTranslator::new(fetcher, settings)?));
        }
        Ok(Self::new(pipeline))
    }

    /// Receives every published dashboard change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.published.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.lock().dashboard().clone()
    }

    pub fn view(&self) -> DashboardView {
        self.lock().view()
    }

    /// Runs one search to completion.
    ///
    /// Returns [`SearchFailure::Superseded`] when a newer `run` or [`Self::clear`]
    /// started before this one settled; its result is then discarded.
    pub async fn run(&self, raw_query: &str) -> Result<Arc<SearchResultBundle>, SearchFailure> {
        let effects = self.dispatch(Msg::SearchSubmitted(raw_query.to_owned()));
        let Some((run_id, query)) = effects
            .into_iter()
            .map(|effect| match effect {
                Effect::RunSearch { run_id, query } => (run_id, query),
            })
            .next()
        else {
            // The reducer only refuses blank input.
            scurve_warn!("Rejected query {:?}", raw_query);
            return Err(ValidationError::EmptyQuery.into());
        };

        scurve_info!("Run {} started for {:?}", run_id, query.as_str());
        match self.pipeline.execute(&query).await {
            Ok(bundle) => match self.settle(run_id, Msg::SearchSucceeded { run_id, bundle }) {
                Some(DashboardState::Success { bundle }) => {
                    scurve_info!("Run {} published", run_id);
                    Ok(bundle)
                }
                _ => Err(SearchFailure::Superseded { run_id }),
            },
            Err(failure) => {
                scurve_error!("Run {} failed: {}", run_id, failure);
                let message = failure.to_string();
                match self.settle(run_id, Msg::SearchFailed { run_id, message }) {
                    Some(_) => Err(failure),
                    None => Err(SearchFailure::Superseded { run_id }),
                }
            }
        }
    }

    /// Returns to idle; any run in flight is superseded.
    pub fn clear(&self) {
        self.dispatch(Msg::Cleared);
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        self.apply(&mut guard, msg)
    }

    /// Applies a run's result; `None` when the run is stale and the result was dropped.
    fn settle(&self, run_id: RunId, msg: Msg) -> Option<DashboardState> {
        let mut guard = self.lock();
        if guard.current_run() != run_id || !guard.is_loading() {
            scurve_debug!(
                "Dropping result of run {} (current run {})",
                run_id,
                guard.current_run()
            );
            return None;
        }
        self.apply(&mut guard, msg);
        Some(guard.dashboard().clone())
    }

    fn apply(&self, guard: &mut AppState, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(guard);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.published.send_replace(state.dashboard().clone());
        }
        *guard = state;
        effects
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
