use crate::data::filter::{filtered_view, HourRange};
use crate::data::model::Dataset;
use crate::data::variable::{NumericalVariable, Variable};
use crate::error::QueryError;

use super::params::AxisAssignment;
use super::stats::{ordinary_least_squares, LinearFit};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One trip on the scatter plot, colour-encoded by precipitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub precipitation: Option<f64>,
}

/// Least-squares overlay for the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub enum Trend {
    /// Fewer than two points, or every x is the same.
    Undefined,
    Line {
        fit: LinearFit,
        /// Predicted `[x, y]` at every point's x, ascending by x.
        predicted: Vec<[f64; 2]>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub x_variable: NumericalVariable,
    pub y_variable: NumericalVariable,
    pub points: Vec<ScatterPoint>,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterView {
    NoData,
    Scatter(ScatterSeries),
}

impl ScatterSeries {
    pub fn title(&self) -> String {
        format!(
            "Relationship between {} and {}",
            self.x_variable, self.y_variable
        )
    }

    /// Smallest and largest precipitation among the points.
    pub fn precipitation_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.precipitation)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl ScatterView {
    pub fn is_empty(&self) -> bool {
        matches!(self, ScatterView::NoData)
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

fn parse_numerical(name: Option<&str>) -> Result<Option<NumericalVariable>, QueryError> {
    name.map(|n| match n.parse::<Variable>() {
        Ok(Variable::Numerical(v)) => Ok(v),
        _ => Err(QueryError::invalid("numerical variable", n)),
    })
    .transpose()
}

/// Pair two numerical variables for every trip picked up within
/// `hour_range` and fit a least-squares trend through them.
///
/// With [`AxisAssignment::X`] variable A is on the x axis and B on y;
/// otherwise they swap. Trips missing either value are left out.
pub fn scatter_data(
    dataset: &Dataset,
    hour_range: &HourRange,
    variable_a: Option<&str>,
    variable_b: Option<&str>,
    axis_assignment: AxisAssignment,
) -> Result<ScatterView, QueryError> {
    let var_a = parse_numerical(variable_a)?;
    let var_b = parse_numerical(variable_b)?;
    let (Some(var_a), Some(var_b)) = (var_a, var_b) else {
        return Ok(ScatterView::NoData);
    };

    let view = filtered_view(dataset, hour_range);
    if view.is_empty() {
        return Ok(ScatterView::NoData);
    }

    let (x_variable, y_variable) = match axis_assignment {
        AxisAssignment::X => (var_a, var_b),
        AxisAssignment::Y => (var_b, var_a),
    };

    let points: Vec<ScatterPoint> = view
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                x: r.measure(x_variable)?,
                y: r.measure(y_variable)?,
                precipitation: r.measure(NumericalVariable::Precipitation),
            })
        })
        .collect();

    let trend = trend_line(&points);
    log::debug!(
        "scatter {x_variable} vs {y_variable} over {hour_range}: {} points, trend {}",
        points.len(),
        if matches!(trend, Trend::Undefined) { "undefined" } else { "fitted" }
    );

    Ok(ScatterView::Scatter(ScatterSeries {
        x_variable,
        y_variable,
        points,
        trend,
    }))
}

fn trend_line(points: &[ScatterPoint]) -> Trend {
    let pairs: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let Some(fit) = ordinary_least_squares(&pairs) else {
        return Trend::Undefined;
    };

    let mut predicted: Vec<[f64; 2]> = pairs.iter().map(|&(x, _)| [x, fit.predict(x)]).collect();
    predicted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Trend::Line { fit, predicted }
}
