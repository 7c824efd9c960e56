use crate::{RunId, SearchResultBundle};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted raw query text.
    SearchSubmitted(String),
    /// Pipeline finished for a run.
    SearchSucceeded {
        run_id: RunId,
        bundle: SearchResultBundle,
    },
    /// Pipeline hit a fatal failure for a run.
    SearchFailed { run_id: RunId, message: String },
    /// Dashboard was closed; drop any result and go back to idle.
    Cleared,
    /// Fallback for placeholder wiring.
    NoOp,
}
