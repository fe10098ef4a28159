use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Closed variable enumerations
// ---------------------------------------------------------------------------

/// Columns whose values are treated as discrete labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoricalVariable {
    VendorId,
    RateCodeId,
    PaymentType,
}

/// Columns whose values are treated as magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericalVariable {
    PassengerCount,
    TripDistance,
    FareAmount,
    Extra,
    MtaTax,
    TipAmount,
    TollsAmount,
    TotalAmount,
    Precipitation,
}

/// Any variable the single-variable view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Categorical(CategoricalVariable),
    Numerical(NumericalVariable),
}

impl CategoricalVariable {
    pub const ALL: [CategoricalVariable; 3] = [
        CategoricalVariable::VendorId,
        CategoricalVariable::RateCodeId,
        CategoricalVariable::PaymentType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalVariable::VendorId => "vendor_id",
            CategoricalVariable::RateCodeId => "rate_code_id",
            CategoricalVariable::PaymentType => "payment_type",
        }
    }

    /// Header of this column in the source table.
    pub fn source_column(self) -> &'static str {
        match self {
            CategoricalVariable::VendorId => "VendorID",
            CategoricalVariable::RateCodeId => "RatecodeID",
            CategoricalVariable::PaymentType => "payment_type",
        }
    }
}

impl NumericalVariable {
    pub const ALL: [NumericalVariable; 9] = [
        NumericalVariable::PassengerCount,
        NumericalVariable::TripDistance,
        NumericalVariable::FareAmount,
        NumericalVariable::Extra,
        NumericalVariable::MtaTax,
        NumericalVariable::TipAmount,
        NumericalVariable::TollsAmount,
        NumericalVariable::TotalAmount,
        NumericalVariable::Precipitation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumericalVariable::PassengerCount => "passenger_count",
            NumericalVariable::TripDistance => "trip_distance",
            NumericalVariable::FareAmount => "fare_amount",
            NumericalVariable::Extra => "extra",
            NumericalVariable::MtaTax => "mta_tax",
            NumericalVariable::TipAmount => "tip_amount",
            NumericalVariable::TollsAmount => "tolls_amount",
            NumericalVariable::TotalAmount => "total_amount",
            NumericalVariable::Precipitation => "precipitation",
        }
    }

    /// Header of this column in the source table.
    pub fn source_column(self) -> &'static str {
        match self {
            NumericalVariable::Precipitation => "PRCP",
            other => other.name(),
        }
    }
}

impl Variable {
    /// Categorical variables first, then numerical, in dropdown order.
    pub fn all() -> impl Iterator<Item = Variable> {
        CategoricalVariable::ALL
            .into_iter()
            .map(Variable::Categorical)
            .chain(NumericalVariable::ALL.into_iter().map(Variable::Numerical))
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::Categorical(c) => c.name(),
            Variable::Numerical(n) => n.name(),
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, Variable::Categorical(_))
    }
}

// -- Parsing: canonical names plus the source headers as aliases --

impl FromStr for CategoricalVariable {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalVariable::ALL
            .into_iter()
            .find(|v| v.name() == s || v.source_column() == s)
            .ok_or_else(|| QueryError::invalid("categorical variable", s))
    }
}

impl FromStr for NumericalVariable {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericalVariable::ALL
            .into_iter()
            .find(|v| v.name() == s || v.source_column() == s)
            .ok_or_else(|| QueryError::invalid("numerical variable", s))
    }
}

impl FromStr for Variable {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(c) = s.parse::<CategoricalVariable>() {
            return Ok(Variable::Categorical(c));
        }
        s.parse::<NumericalVariable>()
            .map(Variable::Numerical)
            .map_err(|_| QueryError::invalid("variable", s))
    }
}

impl fmt::Display for CategoricalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for NumericalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_source_names() {
        assert_eq!(
            "vendor_id".parse::<Variable>(),
            Ok(Variable::Categorical(CategoricalVariable::VendorId))
        );
        assert_eq!(
            "RatecodeID".parse::<Variable>(),
            Ok(Variable::Categorical(CategoricalVariable::RateCodeId))
        );
        assert_eq!(
            "PRCP".parse::<NumericalVariable>(),
            Ok(NumericalVariable::Precipitation)
        );
        assert_eq!(
            "tip_amount".parse::<Variable>(),
            Ok(Variable::Numerical(NumericalVariable::TipAmount))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "pickup_hour".parse::<Variable>().unwrap_err();
        assert_eq!(err, QueryError::invalid("variable", "pickup_hour"));
        assert!("payment_type".parse::<NumericalVariable>().is_err());
    }

    #[test]
    fn test_all_lists_twelve_variables() {
        let all: Vec<Variable> = Variable::all().collect();
        assert_eq!(all.len(), 12);
        assert!(all[0].is_categorical());
        assert!(!all[3].is_categorical());
    }
}
