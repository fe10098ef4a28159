use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Chart orientation
// ---------------------------------------------------------------------------

/// Which way bars/bins extend. Horizontal swaps the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Put a `(position, height)` pair on the plot's `[x, y]` axes.
    pub fn place(self, position: f64, height: f64) -> [f64; 2] {
        match self {
            Orientation::Vertical => [position, height],
            Orientation::Horizontal => [height, position],
        }
    }
}

impl FromStr for Orientation {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            other => Err(QueryError::invalid("orientation", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter axis assignment
// ---------------------------------------------------------------------------

/// Which axis variable A goes on. Variable B takes the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisAssignment {
    #[default]
    X,
    Y,
}

impl FromStr for AxisAssignment {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(AxisAssignment::X),
            "y" => Ok(AxisAssignment::Y),
            other => Err(QueryError::invalid("axis assignment", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Time-series metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    TripCount,
    AvgFare,
    AvgDistance,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::TripCount, Metric::AvgFare, Metric::AvgDistance];

    pub fn name(self) -> &'static str {
        match self {
            Metric::TripCount => "trip_count",
            Metric::AvgFare => "avg_fare",
            Metric::AvgDistance => "avg_distance",
        }
    }

    /// Label shown in the metric dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Metric::TripCount => "Total Trips",
            Metric::AvgFare => "Average Fare",
            Metric::AvgDistance => "Average Trip Distance",
        }
    }

    pub fn axis_title(self) -> &'static str {
        match self {
            Metric::TripCount => "Total Trips",
            Metric::AvgFare => "Average Fare ($)",
            Metric::AvgDistance => "Average Trip Distance (mi)",
        }
    }
}

impl FromStr for Metric {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trip_count" | "trips" => Ok(Metric::TripCount),
            "avg_fare" | "fare" => Ok(Metric::AvgFare),
            "avg_distance" | "distance" => Ok(Metric::AvgDistance),
            other => Err(QueryError::invalid("metric", other)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("h".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!("vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!("y".parse::<AxisAssignment>(), Ok(AxisAssignment::Y));
        assert_eq!("fare".parse::<Metric>(), Ok(Metric::AvgFare));
        assert_eq!("avg_distance".parse::<Metric>(), Ok(Metric::AvgDistance));
        assert_eq!(
            "median".parse::<Metric>(),
            Err(QueryError::invalid("metric", "median"))
        );
    }

    #[test]
    fn test_orientation_place_swaps_axes() {
        assert_eq!(Orientation::Vertical.place(1.0, 7.0), [1.0, 7.0]);
        assert_eq!(Orientation::Horizontal.place(1.0, 7.0), [7.0, 1.0]);
    }
}
