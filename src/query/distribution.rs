use std::collections::HashMap;

use crate::data::filter::{filtered_view, HourRange};
use crate::data::model::{Dataset, TripRecord};
use crate::data::variable::{CategoricalVariable, NumericalVariable, Variable};
use crate::error::QueryError;

use super::params::Orientation;
use super::stats::{equal_width_histogram, HistogramBin, HISTOGRAM_BINS};
use super::NO_DATA_MESSAGE;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Frequency of one category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DistributionChart {
    NoData,
    /// Category frequencies, most frequent first.
    Bar {
        variable: CategoricalVariable,
        categories: Vec<CategoryCount>,
    },
    Histogram {
        variable: NumericalVariable,
        bins: Vec<HistogramBin>,
    },
}

/// Chart data plus the one-line description shown under it.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionView {
    pub chart: DistributionChart,
    pub orientation: Orientation,
    pub description: String,
}

impl DistributionView {
    fn no_data(orientation: Orientation) -> Self {
        DistributionView {
            chart: DistributionChart::NoData,
            orientation,
            description: NO_DATA_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.chart, DistributionChart::NoData)
    }

    pub fn title(&self) -> Option<String> {
        let name = match &self.chart {
            DistributionChart::NoData => return None,
            DistributionChart::Bar { variable, .. } => variable.name(),
            DistributionChart::Histogram { variable, .. } => variable.name(),
        };
        Some(format!("Distribution of {name}"))
    }

    /// Bar tops as `[x, y]` plot coordinates. Categories sit at positions
    /// `0, 1, 2, ...`; histogram bins at their centers.
    pub fn points(&self) -> Vec<[f64; 2]> {
        match &self.chart {
            DistributionChart::NoData => Vec::new(),
            DistributionChart::Bar { categories, .. } => categories
                .iter()
                .enumerate()
                .map(|(i, c)| self.orientation.place(i as f64, c.count as f64))
                .collect(),
            DistributionChart::Histogram { bins, .. } => bins
                .iter()
                .map(|b| self.orientation.place(b.center(), b.count as f64))
                .collect(),
        }
    }

    /// `(x axis label, y axis label)`.
    pub fn axis_labels(&self) -> (String, String) {
        let name = match &self.chart {
            DistributionChart::NoData => return (String::new(), String::new()),
            DistributionChart::Bar { variable, .. } => variable.name(),
            DistributionChart::Histogram { variable, .. } => variable.name(),
        };
        match self.orientation {
            Orientation::Vertical => (name.to_string(), "count".to_string()),
            Orientation::Horizontal => ("count".to_string(), name.to_string()),
        }
    }

    /// Sum of all bar heights.
    pub fn total(&self) -> usize {
        match &self.chart {
            DistributionChart::NoData => 0,
            DistributionChart::Bar { categories, .. } => categories.iter().map(|c| c.count).sum(),
            DistributionChart::Histogram { bins, .. } => bins.iter().map(|b| b.count).sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Bar chart of category frequencies or a 30-bin histogram for the selected
/// variable over trips picked up within `hour_range`.
///
/// An unknown variable name is rejected before anything else; a missing
/// variable or an empty selection yields the no-data view.
pub fn single_variable_distribution(
    dataset: &Dataset,
    hour_range: &HourRange,
    variable: Option<&str>,
    orientation: Orientation,
) -> Result<DistributionView, QueryError> {
    let variable = variable.map(str::parse::<Variable>).transpose()?;

    let view = filtered_view(dataset, hour_range);
    let Some(variable) = variable else {
        return Ok(DistributionView::no_data(orientation));
    };
    if view.is_empty() {
        return Ok(DistributionView::no_data(orientation));
    }

    let view = match variable {
        Variable::Categorical(var) => {
            let categories = value_counts(&view, var);
            if categories.is_empty() {
                return Ok(DistributionView::no_data(orientation));
            }
            DistributionView {
                chart: DistributionChart::Bar {
                    variable: var,
                    categories,
                },
                orientation,
                description: format!(
                    "This bar chart shows the frequency distribution of '{}'.",
                    var.name()
                ),
            }
        }
        Variable::Numerical(var) => {
            let values: Vec<f64> = view.iter().filter_map(|r| r.measure(var)).collect();
            if values.is_empty() {
                return Ok(DistributionView::no_data(orientation));
            }
            DistributionView {
                chart: DistributionChart::Histogram {
                    variable: var,
                    bins: equal_width_histogram(&values, HISTOGRAM_BINS),
                },
                orientation,
                description: format!(
                    "This histogram displays the distribution of '{}' over {HISTOGRAM_BINS} equi-width bins.",
                    var.name()
                ),
            }
        }
    };

    log::debug!(
        "distribution of {variable} over {hour_range}: {} trips",
        view.total()
    );
    Ok(view)
}

/// Frequency per label, most frequent first; ties keep first-seen order.
fn value_counts(view: &[&TripRecord], variable: CategoricalVariable) -> Vec<CategoryCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for label in view.iter().filter_map(|r| r.category(variable)) {
        let next = counts.len();
        let i = *position.entry(label).or_insert(next);
        if i == next {
            counts.push(CategoryCount {
                label: label.to_string(),
                count: 0,
            });
        }
        counts[i].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;
    use crate::data::test_support::{five_row_dataset, HEADER};

    fn labels(view: &DistributionView) -> Vec<(String, usize)> {
        match &view.chart {
            DistributionChart::Bar { categories, .. } => categories
                .iter()
                .map(|c| (c.label.clone(), c.count))
                .collect(),
            other => panic!("Expected bar chart, got {other:?}"),
        }
    }

    #[test]
    fn test_categorical_counts_descending() {
        let ds = five_row_dataset();
        let view = single_variable_distribution(
            &ds,
            &HourRange::ALL_DAY,
            Some("vendor_id"),
            Orientation::Vertical,
        )
        .unwrap();

        assert_eq!(labels(&view), vec![("2".into(), 3), ("1".into(), 2)]);
        assert_eq!(view.total(), 5);
        assert_eq!(view.title().as_deref(), Some("Distribution of vendor_id"));
        assert_eq!(
            view.description,
            "This bar chart shows the frequency distribution of 'vendor_id'."
        );
        assert_eq!(view.points(), vec![[0.0, 3.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_categorical_ties_keep_first_seen_order() {
        let ds = five_row_dataset();
        // Hours 8..=9: payment types 1, 1, 2 → "1" first.
        // Hours 9..=23: payment types 2, 1, 2 → "2" first.
        let late = single_variable_distribution(
            &ds,
            &HourRange::new(9, 23).unwrap(),
            Some("payment_type"),
            Orientation::Vertical,
        )
        .unwrap();
        assert_eq!(labels(&late), vec![("2".into(), 2), ("1".into(), 1)]);

        // Hours 9 and 17 only: rate codes 1 and 2 tie at one each.
        let tie = single_variable_distribution(
            &ds,
            &HourRange::new(9, 17).unwrap(),
            Some("RatecodeID"),
            Orientation::Vertical,
        )
        .unwrap();
        assert_eq!(labels(&tie), vec![("1".into(), 1), ("2".into(), 1)]);
    }

    #[test]
    fn test_frequencies_non_increasing_and_sum_to_count() {
        let ds = five_row_dataset();
        for var in CategoricalVariable::ALL {
            let view = single_variable_distribution(
                &ds,
                &HourRange::new(8, 23).unwrap(),
                Some(var.name()),
                Orientation::Horizontal,
            )
            .unwrap();
            let counts: Vec<usize> = labels(&view).into_iter().map(|(_, c)| c).collect();
            assert!(counts.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(counts.iter().sum::<usize>(), 5);
        }
    }

    #[test]
    fn test_numerical_histogram() {
        let ds = five_row_dataset();
        let view = single_variable_distribution(
            &ds,
            &HourRange::ALL_DAY,
            Some("fare_amount"),
            Orientation::Vertical,
        )
        .unwrap();

        let DistributionChart::Histogram { variable, bins } = &view.chart else {
            panic!("Expected histogram");
        };
        assert_eq!(*variable, NumericalVariable::FareAmount);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins[0].lower, 10.0);
        assert_eq!(bins[29].upper, 50.0);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[29].count, 1);
        assert_eq!(view.total(), 5);
        assert_eq!(
            view.description,
            "This histogram displays the distribution of 'fare_amount' over 30 equi-width bins."
        );
        assert_eq!(view.axis_labels(), ("fare_amount".into(), "count".into()));
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let ds = five_row_dataset();
        let query = |o| {
            single_variable_distribution(&ds, &HourRange::ALL_DAY, Some("trip_distance"), o).unwrap()
        };
        let v = query(Orientation::Vertical);
        let h = query(Orientation::Horizontal);
        let swapped: Vec<[f64; 2]> = v.points().iter().map(|p| [p[1], p[0]]).collect();
        assert_eq!(h.points(), swapped);
        assert_eq!(h.axis_labels(), ("count".into(), "trip_distance".into()));
    }

    #[test]
    fn test_no_data_cases() {
        let ds = five_row_dataset();
        let empty = single_variable_distribution(
            &ds,
            &HourRange::new(0, 3).unwrap(),
            Some("fare_amount"),
            Orientation::Vertical,
        )
        .unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.description, NO_DATA_MESSAGE);
        assert!(empty.title().is_none());

        let unspecified =
            single_variable_distribution(&ds, &HourRange::ALL_DAY, None, Orientation::Vertical)
                .unwrap();
        assert!(unspecified.is_empty());
    }

    #[test]
    fn test_all_missing_values_give_no_data() {
        // Two trips with every categorical code and the fare left blank.
        let csv_text = format!(
            "{HEADER}\n\
             ,,NA,1,1.0,,0,0.5,0,0,6.5,0,2023-01-01 08:00:00,2023-01-01 08:10:00\n\
             ,,NA,1,2.0,,0,0.5,0,0,7.5,0,2023-01-01 09:00:00,2023-01-01 09:10:00\n"
        );
        let ds = load_csv(csv_text.as_bytes()).unwrap();
        for name in ["vendor_id", "RatecodeID", "payment_type", "fare_amount"] {
            let view =
                single_variable_distribution(&ds, &HourRange::ALL_DAY, Some(name), Orientation::Vertical)
                    .unwrap();
            assert!(view.is_empty(), "{name} should have no data");
            assert_eq!(view.description, NO_DATA_MESSAGE);
        }
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let ds = five_row_dataset();
        let err = single_variable_distribution(
            &ds,
            &HourRange::new(0, 3).unwrap(),
            Some("pickup_hour"),
            Orientation::Vertical,
        )
        .unwrap_err();
        assert_eq!(err, QueryError::invalid("variable", "pickup_hour"));
    }
}
