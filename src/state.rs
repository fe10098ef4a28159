use std::path::{Path, PathBuf};

use crate::data::filter::HourRange;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::variable::{NumericalVariable, Variable};
use crate::error::QueryError;
use crate::query::{
    daily_aggregates, daily_time_series, scatter_data, single_variable_distribution,
    summary_metrics, AxisAssignment, DailyAggregate, DistributionView, Metric, Orientation,
    ScatterView, Summary, TimeSeries,
};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Dashboard parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Relationship,
    TimeSeries,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Relationship, Tab::TimeSeries];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Relationship => "Relationship Analysis",
            Tab::TimeSeries => "Time Series Analysis",
        }
    }
}

/// Every user-controlled input of the query layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub hour_lower: u8,
    pub hour_upper: u8,
    pub selected_variable: Option<Variable>,
    pub orientation: Orientation,
    pub variable_a: Option<NumericalVariable>,
    pub variable_b: Option<NumericalVariable>,
    pub axis_assignment: AxisAssignment,
    pub metric: Metric,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            hour_lower: HourRange::ALL_DAY.lower(),
            hour_upper: HourRange::ALL_DAY.upper(),
            selected_variable: Some(Variable::Numerical(NumericalVariable::FareAmount)),
            orientation: Orientation::Vertical,
            variable_a: Some(NumericalVariable::TripDistance),
            variable_b: Some(NumericalVariable::FareAmount),
            axis_assignment: AxisAssignment::X,
            metric: Metric::TripCount,
        }
    }
}

impl Params {
    fn hours_changed(&self, other: &Params) -> bool {
        self.hour_lower != other.hour_lower || self.hour_upper != other.hour_upper
    }
}

/// Which views the last [`AppState::refresh`] recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refreshed {
    pub summary: bool,
    pub distribution: bool,
    pub scatter: bool,
    pub time_series: bool,
}

impl Refreshed {
    const ALL: Refreshed = Refreshed {
        summary: true,
        distribution: true,
        scatter: true,
        time_series: true,
    };

    pub fn any(&self) -> bool {
        self.summary || self.distribution || self.scatter || self.time_series
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    pub params: Params,
    pub theme: Theme,
    pub tab: Tab,

    // Latest query results.
    pub summary: Summary,
    pub distribution: Option<DistributionView>,
    pub scatter: Option<ScatterView>,
    pub time_series: Option<TimeSeries>,
    pub daily: Vec<DailyAggregate>,

    /// Parameters the current results were computed from.
    computed: Option<Params>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            dataset: None,
            source: None,
            params: Params::default(),
            theme,
            tab: Tab::default(),
            summary: Summary {
                count: 0,
                avg_fare: 0.0,
                avg_distance: 0.0,
            },
            distribution: None,
            scatter: None,
            time_series: None,
            daily: Vec::new(),
            computed: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset; every view is recomputed on the next refresh.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) {
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.computed = None;
        self.status_message = None;
    }

    /// Load a file chosen at runtime. On failure the current dataset stays.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn hour_range(&self) -> Result<HourRange, QueryError> {
        HourRange::new(self.params.hour_lower, self.params.hour_upper)
    }

    /// Recompute the views whose inputs changed since the last call.
    pub fn refresh(&mut self) -> Refreshed {
        let Some(dataset) = &self.dataset else {
            return Refreshed::default();
        };

        let current = &self.params;
        let todo = match &self.computed {
            None => Refreshed::ALL,
            Some(prev) => {
                let hours = current.hours_changed(prev);
                Refreshed {
                    summary: hours,
                    distribution: hours
                        || current.selected_variable != prev.selected_variable
                        || current.orientation != prev.orientation,
                    scatter: hours
                        || current.variable_a != prev.variable_a
                        || current.variable_b != prev.variable_b
                        || current.axis_assignment != prev.axis_assignment,
                    time_series: current.metric != prev.metric,
                }
            }
        };
        if !todo.any() {
            return todo;
        }

        let range = match HourRange::new(current.hour_lower, current.hour_upper) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("Rejected hour range: {e}");
                self.status_message = Some(e.to_string());
                return Refreshed::default();
            }
        };

        let mut errors: Vec<QueryError> = Vec::new();

        if todo.summary {
            self.summary = summary_metrics(dataset, &range);
        }
        if todo.distribution {
            let name = current.selected_variable.map(Variable::name);
            match single_variable_distribution(dataset, &range, name, current.orientation) {
                Ok(view) => self.distribution = Some(view),
                Err(e) => errors.push(e),
            }
        }
        if todo.scatter {
            let a = current.variable_a.map(NumericalVariable::name);
            let b = current.variable_b.map(NumericalVariable::name);
            match scatter_data(dataset, &range, a, b, current.axis_assignment) {
                Ok(view) => self.scatter = Some(view),
                Err(e) => errors.push(e),
            }
        }
        if todo.time_series {
            self.time_series = Some(daily_time_series(dataset, current.metric));
            if self.computed.is_none() {
                self.daily = daily_aggregates(dataset);
            }
        }

        log::debug!("Refreshed views {todo:?} for hours {range}");
        for e in &errors {
            log::warn!("Query rejected: {e}");
        }
        self.status_message = errors.first().map(ToString::to_string);
        self.computed = Some(current.clone());
        todo
    }
}
