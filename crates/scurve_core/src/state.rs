use std::sync::Arc;

use crate::view_model::{ChartSeries, CodeRowView, DashboardView, StatusView};
use crate::SearchResultBundle;

/// Monotonically increasing tag for every submitted search.
pub type RunId = u64;

/// What the dashboard is showing. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Success {
        bundle: Arc<SearchResultBundle>,
    },
    Failed {
        query: String,
        error_message: String,
    },
}

impl DashboardState {
    pub fn view(&self) -> DashboardView {
        match self {
            DashboardState::Idle => DashboardView::default(),
            DashboardState::Loading { query } => DashboardView {
                status: StatusView::Loading {
                    query: query.clone(),
                },
                ..DashboardView::default()
            },
            DashboardState::Failed {
                query,
                error_message,
            } => DashboardView {
                status: StatusView::Failed {
                    query: query.clone(),
                    message: error_message.clone(),
                },
                ..DashboardView::default()
            },
            DashboardState::Success { bundle } => success_view(bundle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    dashboard: DashboardState,
    current_run: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    /// Id of the most recent run; results tagged with any other id are stale.
    pub fn current_run(&self) -> RunId {
        self.current_run
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.dashboard, DashboardState::Loading { .. })
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> DashboardView {
        self.dashboard.view()
    }

    /// Supersedes whatever run is in flight and returns the new run id.
    pub(crate) fn next_run(&mut self) -> RunId {
        self.current_run += 1;
        self.current_run
    }

    pub(crate) fn awaits(&self, run_id: RunId) -> bool {
        run_id == self.current_run && self.is_loading()
    }

    pub(crate) fn loading_query(&self) -> Option<&str> {
        match &self.dashboard {
            DashboardState::Loading { query } => Some(query),
            _ => None,
        }
    }

    pub(crate) fn set_dashboard(&mut self, dashboard: DashboardState) {
        if self.dashboard != dashboard {
            self.dashboard = dashboard;
            self.dirty = true;
        }
    }
}

fn success_view(bundle: &SearchResultBundle) -> DashboardView {
    let rows = bundle
        .codes
        .iter()
        .map(|code| CodeRowView {
            code: code.code.clone(),
            count: code.count,
            title: bundle.title_for(&code.code).map(ToOwned::to_owned),
            chart: bundle.curve_for(&code.code).map(ChartSeries::from_curve),
        })
        .collect();

    DashboardView {
        status: StatusView::Ready,
        search_query: Some(bundle.search_query.clone()),
        hit_count: bundle.hits.len(),
        hits: bundle.hits.clone(),
        rows,
        failures: bundle.failures.clone(),
    }
}
