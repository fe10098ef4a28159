use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data::model::Dataset;
use crate::data::variable::NumericalVariable;

use super::params::Metric;
use super::stats::mean_or_zero;

/// All three daily metrics for one pickup date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub trip_count: usize,
    pub avg_fare: f64,
    pub avg_distance: f64,
}

impl DailyAggregate {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TripCount => self.trip_count as f64,
            Metric::AvgFare => self.avg_fare,
            Metric::AvgDistance => self.avg_distance,
        }
    }
}

/// One metric over time, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub metric: Metric,
    pub points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    pub fn title(&self) -> String {
        format!("{} Over Time", self.metric.axis_title())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Group every trip (ignoring any hour filter) by pickup date.
pub fn daily_aggregates(dataset: &Dataset) -> Vec<DailyAggregate> {
    #[derive(Default)]
    struct Acc {
        trips: usize,
        fares: Vec<f64>,
        distances: Vec<f64>,
    }

    let mut groups: BTreeMap<NaiveDate, Acc> = BTreeMap::new();
    for r in dataset.records() {
        let acc = groups.entry(r.pickup_date()).or_default();
        acc.trips += 1;
        acc.fares.extend(r.measure(NumericalVariable::FareAmount));
        acc.distances.extend(r.measure(NumericalVariable::TripDistance));
    }

    groups
        .into_iter()
        .map(|(date, acc)| DailyAggregate {
            date,
            trip_count: acc.trips,
            avg_fare: mean_or_zero(acc.fares),
            avg_distance: mean_or_zero(acc.distances),
        })
        .collect()
}

/// The requested daily metric, one point per pickup date.
pub fn daily_time_series(dataset: &Dataset, metric: Metric) -> TimeSeries {
    let points = daily_aggregates(dataset)
        .iter()
        .map(|d| (d.date, d.value(metric)))
        .collect();
    TimeSeries { metric, points }
}
