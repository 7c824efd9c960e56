//! Dashboard core: pure search state machine, data model and view-model helpers.
mod effect;
mod model;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{
    CpcCode, CurvePoint, FetchPart, LogisticParameters, MaturityCurve, PartialFailure, SearchHit,
    SearchResultBundle,
};
pub use msg::Msg;
pub use query::{Query, ValidationError};
pub use state::{AppState, DashboardState, RunId};
pub use update::update;
pub use view_model::{ChartSeries, CodeRowView, DashboardView, StatusView};
