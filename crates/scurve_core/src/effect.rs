use crate::{Query, RunId};

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the network pipeline for `query`; its result must be reported back tagged with `run_id`.
    RunSearch { run_id: RunId, query: Query },
}
