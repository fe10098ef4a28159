use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{
    metric_color, PrecipitationScale, BAR_COLOR, HISTOGRAM_COLOR, MISSING_COLOR, TREND_COLOR,
};
use crate::query::{
    DistributionChart, DistributionView, Orientation, ScatterView, TimeSeries, Trend,
    NO_DATA_MESSAGE,
};

const CHART_HEIGHT: f32 = 380.0;

/// Number of colour steps on the precipitation scale.
const PRECIPITATION_STEPS: usize = 6;

fn no_data(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading(NO_DATA_MESSAGE);
        ui.add_space(40.0);
    });
}

/// Label integer positions with category names, blank elsewhere.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

fn date_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let v = mark.value;
    if (v - v.round()).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Single-variable chart (Overview tab)
// ---------------------------------------------------------------------------

/// Bar chart or histogram, drawn in the requested orientation.
pub fn distribution_chart(ui: &mut Ui, view: &DistributionView) {
    if let Some(title) = view.title() {
        ui.heading(title);
    }
    let (x_label, y_label) = view.axis_labels();
    let horizontal = view.orientation == Orientation::Horizontal;

    let mut plot = Plot::new("single_variable_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_drag(true)
        .allow_zoom(true);

    let chart = match &view.chart {
        // The description under the chart already says there is no data.
        DistributionChart::NoData => return,
        DistributionChart::Bar { categories, .. } => {
            let labels: Vec<String> = categories.iter().map(|c| c.label.clone()).collect();
            plot = if horizontal {
                plot.y_axis_formatter(category_formatter(labels))
            } else {
                plot.x_axis_formatter(category_formatter(labels))
            };
            let bars: Vec<Bar> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| Bar::new(i as f64, c.count as f64).name(&c.label).width(0.8))
                .collect();
            BarChart::new(bars).color(BAR_COLOR)
        }
        DistributionChart::Histogram { bins, .. } => {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|b| {
                    Bar::new(b.center(), b.count as f64)
                        .width(b.width())
                        .name(format!("{:.2} – {:.2}", b.lower, b.upper))
                })
                .collect();
            BarChart::new(bars).color(HISTOGRAM_COLOR)
        }
    };
    let chart = if horizontal { chart.horizontal() } else { chart };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
    });
}

// ---------------------------------------------------------------------------
// Scatter plot (Relationship tab)
// ---------------------------------------------------------------------------

/// Points coloured by precipitation with the least-squares line on top.
pub fn scatter_plot(ui: &mut Ui, view: &ScatterView) {
    let series = match view {
        ScatterView::NoData => {
            no_data(ui);
            return;
        }
        ScatterView::Scatter(series) => series,
    };

    ui.heading(series.title());
    match &series.trend {
        Trend::Line { fit, .. } => ui.label(format!(
            "Trend: y = {:.4}·x + {:.4}   (R² = {:.3})",
            fit.slope, fit.intercept, fit.r_squared
        )),
        Trend::Undefined => ui.label(RichText::new("Trend: not enough distinct x values").italics()),
    };

    let scale = PrecipitationScale::new(series.precipitation_range(), PRECIPITATION_STEPS);
    let mut by_step: Vec<Vec<[f64; 2]>> = vec![Vec::new(); scale.steps()];
    let mut missing: Vec<[f64; 2]> = Vec::new();
    for p in &series.points {
        match scale.step_for(p.precipitation) {
            Some(step) => by_step[step].push([p.x, p.y]),
            None => missing.push([p.x, p.y]),
        }
    }
    let legend = scale.legend_entries();

    Plot::new("scatter_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(series.x_variable.name())
        .y_axis_label(series.y_variable.name())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((label, color), points) in legend.into_iter().zip(by_step) {
                if points.is_empty() {
                    continue;
                }
                let points: PlotPoints = points.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(2.5)
                        .color(color.gamma_multiply(0.7))
                        .name(format!("PRCP {label}")),
                );
            }
            if !missing.is_empty() {
                let points: PlotPoints = missing.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(2.5)
                        .color(MISSING_COLOR)
                        .name("PRCP missing"),
                );
            }
            if let Trend::Line { predicted, .. } = &series.trend {
                let line: PlotPoints = predicted.iter().copied().collect();
                plot_ui.line(Line::new(line).color(TREND_COLOR).width(2.0).name("OLS trend"));
            }
        });
}

// ---------------------------------------------------------------------------
// Daily line chart (Time Series tab)
// ---------------------------------------------------------------------------

pub fn time_series_chart(ui: &mut Ui, series: &TimeSeries) {
    if series.is_empty() {
        no_data(ui);
        return;
    }
    ui.heading(series.title());

    let color = metric_color(series.metric);
    let coords: Vec<[f64; 2]> = series
        .points
        .iter()
        .map(|(date, v)| [date.num_days_from_ce() as f64, *v])
        .collect();

    Plot::new("timeseries_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label(series.metric.axis_title())
        .x_axis_formatter(date_formatter)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let line: PlotPoints = coords.iter().copied().collect();
            plot_ui.line(Line::new(line).color(color).width(2.0));
            let markers: PlotPoints = coords.iter().copied().collect();
            plot_ui.points(Points::new(markers).radius(3.5).color(color));
        });
}
