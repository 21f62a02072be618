//! QuickChart line-chart URL builder
//!
//! Turns a forecast series into a fully-specified QuickChart URL. The chart
//! spec is serialized from structs, so the JSON key order is fixed by field
//! order and identical inputs always produce byte-identical URLs.

use serde::Serialize;

use crate::weather::ForecastPoint;

const QUICKCHART_BASE_URL: &str = "https://quickchart.io/chart";

#[derive(Serialize)]
struct ChartSpec<'a> {
    #[serde(rename = "type")]
    chart_type: &'static str,
    data: ChartData<'a>,
    options: ChartOptions,
}

#[derive(Serialize)]
struct ChartData<'a> {
    labels: Vec<&'a str>,
    datasets: Vec<Dataset>,
}

#[derive(Serialize)]
struct Dataset {
    label: String,
    data: Vec<f64>,
    fill: bool,
    #[serde(rename = "borderColor")]
    border_color: &'static str,
}

#[derive(Serialize)]
struct ChartOptions {
    title: ChartTitle,
}

#[derive(Serialize)]
struct ChartTitle {
    display: bool,
    text: String,
}

/// Build the chart URL for a forecast series.
///
/// Labels are the ordered timestamps, data the ordered temperatures at the
/// same indices; the series label embeds the day count and the title the
/// country name. Pure and deterministic.
#[must_use]
pub fn forecast_chart_url(country_name: &str, days: u8, points: &[ForecastPoint]) -> String {
    let spec = ChartSpec {
        chart_type: "line",
        data: ChartData {
            labels: points.iter().map(|p| p.time.as_str()).collect(),
            datasets: vec![Dataset {
                label: format!("Temperature over {days} day(s)"),
                data: points.iter().map(|p| p.temperature).collect(),
                fill: false,
                border_color: "blue",
            }],
        },
        options: ChartOptions {
            title: ChartTitle {
                display: true,
                text: format!("Forecast for {country_name}"),
            },
        },
    };

    // Serializing these structs cannot fail: no maps, no non-string keys.
    let config = serde_json::to_string(&spec).expect("chart spec serializes");
    format!("{QUICKCHART_BASE_URL}?c={}", urlencoding::encode(&config))
}
