use serde::Serialize;

use crate::{CurvePoint, LogisticParameters, MaturityCurve, PartialFailure, SearchHit};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusView {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Ready,
    Failed {
        query: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub status: StatusView,
    pub search_query: Option<String>,
    pub hit_count: usize,
    pub hits: Vec<SearchHit>,
    pub rows: Vec<CodeRowView>,
    pub failures: Vec<PartialFailure>,
}

/// One CPC code row. `title` and `chart` are `None` when the lookup failed or was not issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeRowView {
    pub code: String,
    pub count: u64,
    pub title: Option<String>,
    pub chart: Option<ChartSeries>,
}

/// Line-chart input: one series plus horizontal and vertical guide markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<CurvePoint>,
    /// Index in `points` where predictions start.
    pub first_future_index: usize,
    pub saturation_level: f64,
    pub saturation_year: i32,
    /// Year of the last historical point; `None` when the backend sent no history.
    pub last_observed_year: Option<i32>,
    /// Fitted curve parameters, when the backend reports them.
    pub logistic: Option<LogisticParameters>,
}

impl ChartSeries {
    pub fn from_curve(curve: &MaturityCurve) -> Self {
        Self {
            points: curve.chart_points(),
            first_future_index: curve.historical_points.len(),
            saturation_level: curve.saturation_level,
            saturation_year: curve.saturation_year,
            last_observed_year: curve.last_observed_year(),
            logistic: curve.logistic,
        }
    }

    /// Fitted annual growth rate, shown as the rate of change.
    pub fn growth_rate(&self) -> Option<f64> {
        self.logistic.map(|params| params.growth_rate)
    }

    pub fn historical(&self) -> &[CurvePoint] {
        &self.points[..self.first_future_index]
    }

    pub fn predicted(&self) -> &[CurvePoint] {
        &self.points[self.first_future_index..]
    }
}
