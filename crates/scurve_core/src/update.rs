use std::sync::Arc;

use crate::{AppState, DashboardState, Effect, Msg, Query};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every submission supersedes the run in flight; results carrying an older
/// run id, or arriving when nothing is loading, are dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(raw) => {
            let run_id = state.next_run();
            match Query::parse(&raw) {
                Ok(query) => {
                    state.set_dashboard(DashboardState::Loading {
                        query: query.as_str().to_owned(),
                    });
                    vec![Effect::RunSearch { run_id, query }]
                }
                Err(err) => {
                    state.set_dashboard(DashboardState::Failed {
                        query: raw.trim().to_owned(),
                        error_message: err.to_string(),
                    });
                    Vec::new()
                }
            }
        }
        Msg::SearchSucceeded { run_id, bundle } => {
            if state.awaits(run_id) {
                state.set_dashboard(DashboardState::Success {
                    bundle: Arc::new(bundle),
                });
            }
            Vec::new()
        }
        Msg::SearchFailed { run_id, message } => {
            if state.awaits(run_id) {
                let query = state.loading_query().unwrap_or_default().to_owned();
                state.set_dashboard(DashboardState::Failed {
                    query,
                    error_message: message,
                });
            }
            Vec::new()
        }
        Msg::Cleared => {
            state.next_run();
            state.set_dashboard(DashboardState::Idle);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
