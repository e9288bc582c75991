//! Chart geometry for the BMI time-series plot.
//!
//! Produces normalized coordinates in a fixed logical canvas so the
//! renderer only has to scale, never to compute. X maps entry dates
//! linearly between the first and last timestamp, Y maps BMI linearly
//! between the smallest and largest observed value (inverted, since canvas
//! Y grows downward).

use chrono::{Datelike, NaiveDate};
use log::debug;

use shared::{BmiChart, BmiEntry, ChartMargins, ChartPoint, ChartTick};

use super::bmi_service::compute_bmi;
use super::dates;

/// Logical canvas dimensions and margins. The defaults match the 100x60
/// viewBox the chart has always rendered into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margins: ChartMargins,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 60.0,
            margins: ChartMargins {
                left: 10.0,
                right: 6.0,
                top: 8.0,
                bottom: 12.0,
            },
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build plot geometry for `entries`.
///
/// Zero entries produce empty geometry. A single entry has no horizontal
/// span, so it renders as a horizontal line across the full inner width at
/// that entry's Y. Each axis gets exactly three ticks (min, midpoint, max);
/// BMI labels carry one decimal, date labels are `MM/DD`.
pub fn build_chart(entries: &[BmiEntry], config: &ChartConfig) -> BmiChart {
    let margins = config.margins;
    let inner_width = config.width - margins.left - margins.right;
    let inner_height = config.height - margins.top - margins.bottom;

    let mut plotted: Vec<(NaiveDate, f64, &BmiEntry)> = entries
        .iter()
        .filter_map(|entry| match dates::parse_iso(&entry.date_iso) {
            Some(date) => Some((date, compute_bmi(entry.height_cm, entry.weight_kg), entry)),
            None => {
                debug!("skipping unplottable BMI entry '{}'", entry.date_iso);
                None
            }
        })
        .collect();
    if plotted.is_empty() {
        return BmiChart::empty(margins, inner_width, inner_height);
    }
    plotted.sort_by_key(|(date, _, _)| *date);

    let min_day = plotted.first().map(|(d, _, _)| d.num_days_from_ce()).unwrap_or(0) as f64;
    let max_day = plotted.last().map(|(d, _, _)| d.num_days_from_ce()).unwrap_or(0) as f64;
    let min_bmi = plotted.iter().map(|(_, b, _)| *b).fold(f64::INFINITY, f64::min);
    let max_bmi = plotted.iter().map(|(_, b, _)| *b).fold(f64::NEG_INFINITY, f64::max);

    // Degenerate spans collapse to a unit so the mapping stays finite
    let span = (max_day - min_day).max(1.0);
    let range = (max_bmi - min_bmi).max(1.0);

    let to_x = |day: f64| margins.left + (day - min_day) / span * inner_width;
    let to_y = |bmi: f64| margins.top + (1.0 - (bmi - min_bmi) / range) * inner_height;

    let points: Vec<ChartPoint> = plotted
        .iter()
        .map(|(date, bmi, entry)| ChartPoint {
            x: round2(to_x(date.num_days_from_ce() as f64)),
            y: round2(to_y(*bmi)),
            date_iso: entry.date_iso.clone(),
            bmi: *bmi,
        })
        .collect();

    let polyline: Vec<[f64; 2]> = if points.len() == 1 {
        // No span to plot: a flat line across the inner area at the one value
        let y = points[0].y;
        vec![
            [round2(margins.left), y],
            [round2(margins.left + inner_width), y],
        ]
    } else {
        points.iter().map(|p| [p.x, p.y]).collect()
    };

    let mid_day = min_day + span / 2.0;
    let day_label = |day: f64| {
        NaiveDate::from_num_days_from_ce_opt(day.floor() as i32)
            .map(dates::format_month_day)
            .unwrap_or_default()
    };
    let x_ticks = vec![
        ChartTick {
            pos: round2(to_x(min_day)),
            label: day_label(min_day),
        },
        ChartTick {
            pos: round2(to_x(mid_day)),
            label: day_label(mid_day),
        },
        ChartTick {
            pos: round2(to_x(max_day)),
            label: day_label(max_day),
        },
    ];

    let mid_bmi = min_bmi + range / 2.0;
    let y_ticks = vec![
        ChartTick {
            pos: round2(to_y(min_bmi)),
            label: format!("{:.1}", min_bmi),
        },
        ChartTick {
            pos: round2(to_y(mid_bmi)),
            label: format!("{:.1}", mid_bmi),
        },
        ChartTick {
            pos: round2(to_y(max_bmi)),
            label: format!("{:.1}", max_bmi),
        },
    ];

    BmiChart {
        margins,
        inner_width,
        inner_height,
        polyline,
        points,
        x_ticks,
        y_ticks,
    }
}
