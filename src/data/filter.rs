use std::fmt;

use super::model::{Dataset, TripRecord};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Hour-of-day filter
// ---------------------------------------------------------------------------

/// Inclusive pickup-hour bounds, `0 <= lower <= upper <= 23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourRange {
    lower: u8,
    upper: u8,
}

impl HourRange {
    pub const MAX_HOUR: u8 = 23;

    /// The whole day, the dashboard's initial slider position.
    pub const ALL_DAY: HourRange = HourRange {
        lower: 0,
        upper: Self::MAX_HOUR,
    };

    pub fn new(lower: u8, upper: u8) -> Result<Self, QueryError> {
        if lower > upper || upper > Self::MAX_HOUR {
            return Err(QueryError::invalid("hour range", format!("{lower}..={upper}")));
        }
        Ok(HourRange { lower, upper })
    }

    pub fn lower(&self) -> u8 {
        self.lower
    }

    pub fn upper(&self) -> u8 {
        self.upper
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.lower && hour <= self.upper
    }

    /// Overlap of two ranges, if any.
    pub fn intersect(&self, other: &HourRange) -> Option<HourRange> {
        HourRange::new(self.lower.max(other.lower), self.upper.min(other.upper)).ok()
    }
}

impl Default for HourRange {
    fn default() -> Self {
        HourRange::ALL_DAY
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00–{:02}:59", self.lower, self.upper)
    }
}

/// Trips whose pickup hour falls within `range`, in source order.
///
/// Recomputed on every call; nothing is cached between queries.
pub fn filtered_view<'a>(dataset: &'a Dataset, range: &HourRange) -> Vec<&'a TripRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.pickup_hour()))
        .collect()
}
