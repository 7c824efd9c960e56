use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One record from the search endpoint, passed through untouched for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchHit(pub Value);

impl SearchHit {
    /// Looks up a nested field with a JSON pointer such as `/_source/date_published`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }
}

/// A CPC classification code with its usage count among the search hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpcCode {
    pub code: String,
    pub count: u64,
}

impl CpcCode {
    pub fn new(code: impl Into<String>, count: u64) -> Self {
        Self {
            code: code.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub year: i32,
    pub value: f64,
}

impl CurvePoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Fitted logistic growth parameters, `value(t) = capacity / (1 + e^(-growth_rate * (t - midpoint_year)))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogisticParameters {
    pub capacity: f64,
    pub midpoint_year: f64,
    pub growth_rate: f64,
}

/// Predicted maturity (S-) curve for one CPC code.
///
/// Points are kept in server order; historical and future points are not
/// checked for overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityCurve {
    pub historical_points: Vec<CurvePoint>,
    pub future_points: Vec<CurvePoint>,
    pub saturation_level: f64,
    pub saturation_year: i32,
    pub logistic: Option<LogisticParameters>,
}

impl MaturityCurve {
    /// Historical points followed by future points, as consumed by a chart.
    pub fn chart_points(&self) -> Vec<CurvePoint> {
        self.historical_points
            .iter()
            .chain(self.future_points.iter())
            .copied()
            .collect()
    }

    pub fn last_observed_year(&self) -> Option<i32> {
        self.historical_points.last().map(|point| point.year)
    }
}

/// Which per-code lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchPart {
    Title,
    Curve,
}

impl fmt::Display for FetchPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPart::Title => write!(f, "title"),
            FetchPart::Curve => write!(f, "curve"),
        }
    }
}

/// A per-code fetch that failed without failing the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialFailure {
    pub code: String,
    pub part: FetchPart,
    pub message: String,
}

/// Everything one search produced. Immutable once published.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResultBundle {
    /// Text actually sent to the backend (translated when a translator is configured).
    pub search_query: String,
    pub hits: Vec<SearchHit>,
    /// Server order is preserved.
    pub codes: Vec<CpcCode>,
    pub titles: BTreeMap<String, String>,
    pub curves: BTreeMap<String, MaturityCurve>,
    pub failures: Vec<PartialFailure>,
}

impl SearchResultBundle {
    /// Drops titles, curves and failures for codes that are not in `codes`.
    pub fn restrict_to_codes(mut self) -> Self {
        let known = |key: &String| self.codes.iter().any(|code| &code.code == key);
        let titles = std::mem::take(&mut self.titles)
            .into_iter()
            .filter(|(key, _)| known(key))
            .collect();
        let curves = std::mem::take(&mut self.curves)
            .into_iter()
            .filter(|(key, _)| known(key))
            .collect();
        let failures = std::mem::take(&mut self.failures)
            .into_iter()
            .filter(|failure| known(&failure.code))
            .collect();
        self.titles = titles;
        self.curves = curves;
        self.failures = failures;
        self
    }

    pub fn keys_within_codes(&self) -> bool {
        let known = |key: &String| self.codes.iter().any(|code| &code.code == key);
        self.titles.keys().all(known) && self.curves.keys().all(known)
    }

    pub fn title_for(&self, code: &str) -> Option<&str> {
        self.titles.get(code).map(String::as_str)
    }

    pub fn curve_for(&self, code: &str) -> Option<&MaturityCurve> {
        self.curves.get(code)
    }
}
