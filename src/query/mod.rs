/// Query layer: pure views over a loaded [`Dataset`](crate::data::model::Dataset).
///
/// Each function takes the dataset by reference plus a handful of
/// parameters and returns presentation-ready data. Nothing is cached;
/// every call refilters the table.
///
/// ```text
///   Dataset ──┬── summary       (hour range)               → Summary
///             ├── distribution  (hour range, variable)     → DistributionView
///             ├── scatter       (hour range, A, B, axis)   → ScatterView
///             └── timeseries    (metric)                   → TimeSeries
/// ```

pub mod distribution;
pub mod params;
pub mod scatter;
pub mod stats;
pub mod summary;
pub mod timeseries;

pub use distribution::{single_variable_distribution, DistributionChart, DistributionView};
pub use params::{AxisAssignment, Metric, Orientation};
pub use scatter::{scatter_data, ScatterSeries, ScatterView, Trend};
pub use summary::{summary_metrics, Summary};
pub use timeseries::{daily_aggregates, daily_time_series, DailyAggregate, TimeSeries};

/// Shown in place of any chart whose selection matches no trips.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected range.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::HourRange;
    use crate::data::test_support::five_row_dataset;
    use crate::error::QueryError;

    #[test]
    fn test_five_row_round_trip() {
        let ds = five_row_dataset();
        let evening = HourRange::new(17, 23).unwrap();

        assert_eq!(
            summary_metrics(&ds, &evening),
            Summary {
                count: 2,
                avg_fare: 45.0,
                avg_distance: 4.5,
            }
        );

        let dist =
            single_variable_distribution(&ds, &evening, Some("VendorID"), Orientation::Vertical)
                .unwrap();
        let DistributionChart::Bar { categories, .. } = &dist.chart else {
            panic!("Expected bar chart");
        };
        let pairs: Vec<(&str, usize)> = categories
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("2", 1), ("1", 1)]);

        let daily = daily_time_series(&ds, Metric::AvgDistance);
        let values: Vec<f64> = daily.points.iter().map(|p| p.1).collect();
        assert_eq!(values, vec![2.0, 4.5]);
    }

    #[test]
    fn test_invalid_variable_rejected_by_every_query() {
        let ds = five_row_dataset();
        let range = HourRange::ALL_DAY;

        assert!(matches!(
            single_variable_distribution(&ds, &range, Some("surge"), Orientation::Vertical),
            Err(QueryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            scatter_data(&ds, &range, Some("surge"), Some("fare_amount"), AxisAssignment::X),
            Err(QueryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            scatter_data(&ds, &range, Some("fare_amount"), Some("surge"), AxisAssignment::X),
            Err(QueryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            "surge".parse::<Metric>(),
            Err(QueryError::InvalidParameter { .. })
        ));
    }
}
