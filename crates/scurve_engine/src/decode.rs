//! Wire formats of the patent backend, decoded into core types.

use scurve_core::{CpcCode, CurvePoint, LogisticParameters, MaturityCurve, SearchHit};
use serde::Deserialize;
use serde_json::Value;

use crate::FetchError;

#[derive(Deserialize)]
#[serde(untagged)]
enum HitsResponse {
    Wrapped { filtered_hits: Vec<Value> },
    // The reference backend returns the filtered hit list directly.
    Bare(Vec<Value>),
}

#[derive(Deserialize)]
struct TitleResponse {
    title: String,
}

#[derive(Deserialize)]
struct LogisticResponse {
    #[serde(rename = "K")]
    capacity: f64,
    t_m: f64,
    r: f64,
}

#[derive(Deserialize)]
struct CurveResponse {
    historical_data: Vec<(i32, f64)>,
    future_predictions: Vec<(i32, f64)>,
    #[serde(rename = "99_saturation_level")]
    saturation_level: f64,
    estimated_saturation_year: i32,
    #[serde(default)]
    logistic_parameters: Option<LogisticResponse>,
}

/// Decodes `/search`.
pub fn decode_hits(value: Value) -> Result<Vec<SearchHit>, FetchError> {
    let hits = match from_value::<HitsResponse>(value, "search hits")? {
        HitsResponse::Wrapped { filtered_hits } => filtered_hits,
        HitsResponse::Bare(hits) => hits,
    };
    Ok(hits.into_iter().map(SearchHit).collect())
}

/// Decodes `/top-cpc-codes`, keeping server order.
pub fn decode_top_codes(value: Value) -> Result<Vec<CpcCode>, FetchError> {
    let pairs: Vec<(String, u64)> = from_value(value, "top codes")?;
    Ok(pairs
        .into_iter()
        .map(|(code, count)| CpcCode::new(code, count))
        .collect())
}

/// Placeholder titles the backend sends with a 200 status instead of an error.
const MISSING_TITLES: [&str; 2] = ["Title not found", "CPC not found"];
const TITLE_ERROR_PREFIX: &str = "Error fetching title";

/// Decodes `/cpc-title/{code}`. A blank title is `None`; a placeholder title is a parse error.
pub fn decode_title(value: Value) -> Result<Option<String>, FetchError> {
    let response: TitleResponse = from_value(value, "cpc title")?;
    let title = response.title.trim();
    if MISSING_TITLES.contains(&title) || title.starts_with(TITLE_ERROR_PREFIX) {
        return Err(FetchError::parse(format!("cpc title: backend answered {title:?}")));
    }
    Ok((!title.is_empty()).then(|| title.to_owned()))
}

/// Decodes `/predict-s-curve`.
pub fn decode_curve(value: Value) -> Result<MaturityCurve, FetchError> {
    let response: CurveResponse = from_value(value, "s-curve prediction")?;
    let points = |pairs: Vec<(i32, f64)>| {
        pairs
            .into_iter()
            .map(|(year, value)| CurvePoint::new(year, value))
            .collect::<Vec<_>>()
    };
    Ok(MaturityCurve {
        historical_points: points(response.historical_data),
        future_points: points(response.future_predictions),
        saturation_level: response.saturation_level,
        saturation_year: response.estimated_saturation_year,
        logistic: response.logistic_parameters.map(|params| LogisticParameters {
            capacity: params.capacity,
            midpoint_year: params.t_m,
            growth_rate: params.r,
        }),
    })
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|err| FetchError::parse(format!("{what}: {err}")))
}
