//! Plain-text rendering of the dashboard view.

use scurve_core::{ChartSeries, CodeRowView, DashboardView, SearchHit, StatusView};
use serde_json::Value;

const LISTED_HITS: usize = 5;

/// Renders `view` as terminal lines; `current_year` anchors "years to saturation".
pub fn render(view: &DashboardView, current_year: i32) -> Vec<String> {
    match &view.status {
        StatusView::Idle => vec!["No search yet.".to_string()],
        StatusView::Loading { query } => vec![format!("Searching for {query:?}...")],
        StatusView::Failed { query, message } => {
            vec![format!("Search for {query:?} failed: {message}")]
        }
        StatusView::Ready => render_ready(view, current_year),
    }
}

fn render_ready(view: &DashboardView, current_year: i32) -> Vec<String> {
    let query = view.search_query.as_deref().unwrap_or_default();
    let mut lines = vec![format!(
        "Results for {query:?}: {} hits, {} CPC codes",
        view.hit_count,
        view.rows.len()
    )];
    for (rank, hit) in view.hits.iter().take(LISTED_HITS).enumerate() {
        lines.push(hit_line(rank + 1, hit));
    }
    if view.hits.len() > LISTED_HITS {
        lines.push(format!("  ... {} more hits", view.hits.len() - LISTED_HITS));
    }
    for row in &view.rows {
        lines.push(code_line(row));
        if let Some(chart) = &row.chart {
            lines.push(chart_line(chart, current_year));
        }
    }
    if !view.failures.is_empty() {
        lines.push("Unavailable:".to_string());
        for failure in &view.failures {
            lines.push(format!(
                "  {} {}: {}",
                failure.code, failure.part, failure.message
            ));
        }
    }
    lines
}

fn hit_line(rank: usize, hit: &SearchHit) -> String {
    let id = hit.pointer("/_id").map_or_else(|| "?".to_string(), scalar);
    let mut line = format!("  #{rank:<3} {id}");
    if let Some(score) = hit.pointer("/_score").and_then(Value::as_f64) {
        line.push_str(&format!("  score {score:.2}"));
    }
    if let Some(published) = hit.pointer("/_source/date_published") {
        line.push_str(&format!("  published {}", scalar(published)));
    }
    line
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn code_line(row: &CodeRowView) -> String {
    let title = row.title.as_deref().unwrap_or("(title unavailable)");
    format!("  {:<14} {:>6}  {}", row.code, row.count, title)
}

fn chart_line(chart: &ChartSeries, current_year: i32) -> String {
    let remaining = chart.saturation_year.saturating_sub(current_year);
    let horizon = if remaining > 0 {
        format!("in {remaining} years")
    } else {
        "reached".to_string()
    };
    let span = match (chart.points.first(), chart.points.last()) {
        (Some(first), Some(last)) => format!(
            ", {}: {:.1} -> {}: {:.1}",
            first.year, first.value, last.year, last.value
        ),
        _ => String::new(),
    };
    let observed = chart
        .last_observed_year
        .map(|year| format!(", observed to {year}"))
        .unwrap_or_default();
    let rate = chart
        .growth_rate()
        .map(|rate| format!(", growth rate {rate:.2}/yr"))
        .unwrap_or_default();
    format!(
        "  {:<14} saturation {:.1} by {} ({horizon}){span}{observed}{rate}",
        "", chart.saturation_level, chart.saturation_year
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scurve_core::{CurvePoint, FetchPart, LogisticParameters, PartialFailure};
    use serde_json::json;

    fn ready_view() -> DashboardView {
        DashboardView {
            status: StatusView::Ready,
            search_query: Some("drone".to_string()),
            hit_count: 12,
            hits: vec![
                SearchHit(json!({
                    "_id": "US2019001",
                    "_score": 0.913,
                    "_source": {"date_published": "2019-03-07"}
                })),
                SearchHit(json!({"_id": 42})),
            ],
            rows: vec![
                CodeRowView {
                    code: "B64C39/02".to_string(),
                    count: 5,
                    title: Some("AIRCRAFT".to_string()),
                    chart: Some(ChartSeries {
                        points: vec![CurvePoint::new(2015, 1.0), CurvePoint::new(2040, 9.5)],
                        first_future_index: 1,
                        saturation_level: 9.9,
                        saturation_year: 2031,
                        last_observed_year: Some(2015),
                        logistic: Some(LogisticParameters {
                            capacity: 10.0,
                            midpoint_year: 2022.5,
                            growth_rate: 0.375,
                        }),
                    }),
                },
                CodeRowView {
                    code: "G06K9/00".to_string(),
                    count: 3,
                    title: None,
                    chart: None,
                },
            ],
            failures: vec![PartialFailure {
                code: "G06K9/00".to_string(),
                part: FetchPart::Title,
                message: "http status 500: Internal Server Error".to_string(),
            }],
        }
    }

    #[test]
    fn ready_view_lists_codes_in_order() {
        let lines = render(&ready_view(), 2026);

        assert_eq!(lines[0], "Results for \"drone\": 12 hits, 2 CPC codes");
        assert!(lines[3].contains("B64C39/02") && lines[3].ends_with("AIRCRAFT"));
        assert!(lines[4].contains("saturation 9.9 by 2031 (in 5 years)"));
        assert!(lines[4].contains("2015: 1.0 -> 2040: 9.5"));
        assert!(lines[5].ends_with("(title unavailable)"));
        assert_eq!(lines[6], "Unavailable:");
        assert_eq!(
            lines[7],
            "  G06K9/00 title: http status 500: Internal Server Error"
        );
    }

    #[test]
    fn hits_are_listed_with_score_and_date() {
        let lines = render(&ready_view(), 2026);
        assert_eq!(
            lines[1],
            "  #1   US2019001  score 0.91  published 2019-03-07"
        );
        assert_eq!(lines[2], "  #2   42");
    }

    #[test]
    fn long_hit_lists_are_cut() {
        let mut view = ready_view();
        view.hits = (0..8).map(|id| SearchHit(json!({ "_id": id }))).collect();
        let lines = render(&view, 2026);
        assert_eq!(lines[5], "  #5   4");
        assert_eq!(lines[6], "  ... 3 more hits");
        assert!(lines[7].contains("B64C39/02"));
    }

    #[test]
    fn chart_line_shows_observed_year_and_growth_rate() {
        let lines = render(&ready_view(), 2026);
        assert!(lines[4].ends_with(", observed to 2015, growth rate 0.38/yr"));

        let mut view = ready_view();
        if let Some(chart) = view.rows[0].chart.as_mut() {
            chart.last_observed_year = None;
            chart.logistic = None;
        }
        let lines = render(&view, 2026);
        assert!(lines[4].ends_with("2015: 1.0 -> 2040: 9.5"));
    }

    #[test]
    fn past_saturation_is_reached() {
        let lines = render(&ready_view(), 2035);
        assert!(lines[4].contains("(reached)"));
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let mut view = ready_view();
        if let Some(chart) = view.rows[0].chart.as_mut() {
            chart.saturation_year = i32::MIN;
        }
        let lines = render(&view, 2026);
        assert!(lines[4].contains("(reached)"));

        if let Some(chart) = view.rows[0].chart.as_mut() {
            chart.saturation_year = i32::MAX;
        }
        let lines = render(&view, -5);
        assert!(lines[4].contains(&format!("(in {} years)", i32::MAX)));
    }

    #[test]
    fn failed_and_idle_views_are_one_line() {
        let failed = DashboardView {
            status: StatusView::Failed {
                query: String::new(),
                message: "empty query".to_string(),
            },
            ..DashboardView::default()
        };
        assert_eq!(
            render(&failed, 2026),
            vec!["Search for \"\" failed: empty query".to_string()]
        );
        assert_eq!(
            render(&DashboardView::default(), 2026),
            vec!["No search yet.".to_string()]
        );
    }
}
