//! SVG charts for the dashboard. Geometry is computed by plain functions so it can
//! be tested without rendering.

use api::models::SeriesPoint;
use dioxus::prelude::*;

const CHART_WIDTH: f64 = 480.0;
const CHART_HEIGHT: f64 = 180.0;
const BAR_GAP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

fn max_value(points: &[SeriesPoint]) -> f64 {
    points.iter().map(|p| p.value).fold(0.0, f64::max)
}

/// Bars scaled so the tallest fills `height`. Negative values draw as zero.
pub fn bar_layout(points: &[SeriesPoint], width: f64, height: f64) -> Vec<Bar> {
    if points.is_empty() {
        return Vec::new();
    }
    let max = max_value(points);
    let slot = width / points.len() as f64;
    let bar_width = (slot - BAR_GAP).max(1.0);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let h = if max > 0.0 {
                p.value.max(0.0) / max * height
            } else {
                0.0
            };
            Bar {
                x: i as f64 * slot + BAR_GAP / 2.0,
                y: height - h,
                width: bar_width,
                height: h,
                label: p.label.clone(),
                value: p.value,
            }
        })
        .collect()
}

/// SVG path through the points, left to right.
pub fn line_path(points: &[SeriesPoint], width: f64, height: f64) -> String {
    let max = max_value(points);
    let step = if points.len() > 1 {
        width / (points.len() - 1) as f64
    } else {
        0.0
    };
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let y = if max > 0.0 {
                height - p.value.max(0.0) / max * height
            } else {
                height
            };
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd}{:.1},{:.1}", i as f64 * step, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Share of each point in the total, in percent.
pub fn percentages(points: &[SeriesPoint]) -> Vec<(String, f64)> {
    let total: f64 = points.iter().map(|p| p.value.max(0.0)).sum();
    points
        .iter()
        .map(|p| {
            let pct = if total > 0.0 {
                p.value.max(0.0) / total * 100.0
            } else {
                0.0
            };
            (p.label.clone(), pct)
        })
        .collect()
}

#[component]
pub fn BarChart(title: String, points: Vec<SeriesPoint>) -> Element {
    let bars = bar_layout(&points, CHART_WIDTH, CHART_HEIGHT);
    let view_box = format!("0 0 {CHART_WIDTH} {}", CHART_HEIGHT + 20.0);
    let label_y = (CHART_HEIGHT + 14.0).to_string();

    rsx! {
        div {
            class: "card chart-card",
            h3 { class: "card-title", "{title}" }
            if bars.is_empty() {
                p { class: "muted", "No data yet" }
            } else {
                svg {
                    class: "chart",
                    view_box: "{view_box}",
                    for bar in bars {
                        g {
                            key: "{bar.label}",
                            rect {
                                class: "chart-bar",
                                x: "{bar.x}",
                                y: "{bar.y}",
                                width: "{bar.width}",
                                height: "{bar.height}",
                                rx: "3",
                                title { "{bar.label}: {bar.value}" }
                            }
                            text {
                                class: "chart-label",
                                x: bar.center().to_string(),
                                y: "{label_y}",
                                text_anchor: "middle",
                                "{bar.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LineChart(title: String, points: Vec<SeriesPoint>) -> Element {
    let path = line_path(&points, CHART_WIDTH, CHART_HEIGHT);
    let view_box = format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}");

    rsx! {
        div {
            class: "card chart-card",
            h3 { class: "card-title", "{title}" }
            if points.is_empty() {
                p { class: "muted", "No data yet" }
            } else {
                svg {
                    class: "chart",
                    view_box: "{view_box}",
                    path { class: "chart-line", d: "{path}", fill: "none" }
                }
                div {
                    class: "chart-axis",
                    for p in points.iter() {
                        span { key: "{p.label}", "{p.label}" }
                    }
                }
            }
        }
    }
}

/// Horizontal percentage bars, e.g. posts by status.
#[component]
pub fn Breakdown(title: String, points: Vec<SeriesPoint>) -> Element {
    let rows: Vec<(String, String, String)> = percentages(&points)
        .into_iter()
        .map(|(label, pct)| (label, format!("width: {pct:.1}%"), format!("{pct:.0}%")))
        .collect();

    rsx! {
        div {
            class: "card",
            h3 { class: "card-title", "{title}" }
            if rows.is_empty() {
                p { class: "muted", "No data yet" }
            }
            for (label, width, pct) in rows {
                div {
                    key: "{label}",
                    class: "breakdown-row",
                    span { class: "breakdown-label", "{label}" }
                    div {
                        class: "breakdown-track",
                        div { class: "breakdown-fill", style: "{width}" }
                    }
                    span { class: "breakdown-value", "{pct}" }
                }
            }
        }
    }
}
