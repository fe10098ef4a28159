use crate::data::filter::{filtered_view, HourRange};
use crate::data::model::Dataset;
use crate::data::variable::NumericalVariable;

use super::stats::mean_or_zero;

/// Headline numbers for the Overview metric cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub avg_fare: f64,
    pub avg_distance: f64,
}

impl Summary {
    /// Average fare as shown on its card, e.g. `$14.25`.
    pub fn fare_label(&self) -> String {
        format!("${:.2}", self.avg_fare)
    }

    /// Average distance as shown on its card, e.g. `3.10 mi`.
    pub fn distance_label(&self) -> String {
        format!("{:.2} mi", self.avg_distance)
    }
}

/// Trip count and mean fare/distance for trips picked up within `hour_range`.
/// An empty selection reports zero averages.
pub fn summary_metrics(dataset: &Dataset, hour_range: &HourRange) -> Summary {
    let view = filtered_view(dataset, hour_range);
    let avg = |var: NumericalVariable| mean_or_zero(view.iter().filter_map(|r| r.measure(var)));

    Summary {
        count: view.len(),
        avg_fare: avg(NumericalVariable::FareAmount),
        avg_distance: avg(NumericalVariable::TripDistance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::five_row_dataset;

    #[test]
    fn test_summary_all_day() {
        let s = summary_metrics(&five_row_dataset(), &HourRange::ALL_DAY);
        assert_eq!(s.count, 5);
        assert_eq!(s.avg_fare, 30.0);
        assert_eq!(s.avg_distance, 3.0);
        assert_eq!(s.fare_label(), "$30.00");
        assert_eq!(s.distance_label(), "3.00 mi");
    }

    #[test]
    fn test_summary_morning() {
        let s = summary_metrics(&five_row_dataset(), &HourRange::new(8, 8).unwrap());
        assert_eq!(s.count, 2);
        assert_eq!(s.avg_fare, 15.0);
        assert_eq!(s.avg_distance, 1.5);
    }

    #[test]
    fn test_summary_empty_range_reports_zero() {
        let s = summary_metrics(&five_row_dataset(), &HourRange::new(0, 7).unwrap());
        assert_eq!(s.count, 0);
        assert_eq!(s.avg_fare, 0.0);
        assert_eq!(s.avg_distance, 0.0);
        assert_eq!(s.fare_label(), "$0.00");
        assert_eq!(s.distance_label(), "0.00 mi");
    }
}
