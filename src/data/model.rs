use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use super::variable::{CategoricalVariable, NumericalVariable};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// RawValue – a single cell as read from the source
// ---------------------------------------------------------------------------

/// A dynamically-typed source cell, before it is checked against the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

/// Timestamp layouts tried in order. Fractional seconds are optional.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
];

impl RawValue {
    /// Interpret as an opaque category label. Empty text and NA markers are
    /// missing; numeric text is normalised so `1`, `1.0` and the number `1`
    /// all share a label.
    pub fn into_label(self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if is_missing_token(trimmed) {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(format_number_label(v)),
                    _ => Some(trimmed.to_string()),
                }
            }
            RawValue::Number(v) if !v.is_finite() => None,
            RawValue::Number(v) => Some(format_number_label(v)),
            RawValue::Null => None,
        }
    }

    /// Interpret as a numeric measure. Empty text, NA markers, nulls and
    /// non-finite values are missing; any other non-number fails the load.
    pub fn to_f64(&self, row: usize, column: &'static str) -> Result<Option<f64>, LoadError> {
        match self {
            RawValue::Number(v) => Ok(Some(*v).filter(|v| v.is_finite())),
            RawValue::Null => Ok(None),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if is_missing_token(trimmed) {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .map(|v| Some(v).filter(|v| v.is_finite()))
                    .map_err(|_| LoadError::InvalidNumber {
                        row,
                        column,
                        value: s.clone(),
                    })
            }
        }
    }

    /// Interpret as a required date-time.
    pub fn to_timestamp(&self, row: usize, column: &'static str) -> Result<NaiveDateTime, LoadError> {
        let invalid = || LoadError::InvalidTimestamp {
            row,
            column,
            value: self.to_string(),
        };
        match self {
            RawValue::Text(s) => parse_timestamp(s.trim()).ok_or_else(invalid),
            // Epoch milliseconds, as `DataFrame.to_json` writes date-times.
            RawValue::Number(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64)
                .map(|dt| dt.naive_utc())
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Number(v) => write!(f, "{v}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

/// Cell texts read as missing, as pandas' `read_csv` does by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_token(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

/// Whole numbers print without a trailing `.0` so `1` and `1.0` share a label.
fn format_number_label(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

// ---------------------------------------------------------------------------
// TripRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Categorical codes of one trip, in [`CategoricalVariable::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripCategories {
    pub vendor_id: Option<String>,
    pub rate_code_id: Option<String>,
    pub payment_type: Option<String>,
}

impl TripCategories {
    pub fn slot_mut(&mut self, variable: CategoricalVariable) -> &mut Option<String> {
        match variable {
            CategoricalVariable::VendorId => &mut self.vendor_id,
            CategoricalVariable::RateCodeId => &mut self.rate_code_id,
            CategoricalVariable::PaymentType => &mut self.payment_type,
        }
    }
}

/// Numeric measures of one trip. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripMeasures {
    pub passenger_count: Option<f64>,
    pub trip_distance: Option<f64>,
    pub fare_amount: Option<f64>,
    pub extra: Option<f64>,
    pub mta_tax: Option<f64>,
    pub tip_amount: Option<f64>,
    pub tolls_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub precipitation: Option<f64>,
}

impl TripMeasures {
    pub fn slot_mut(&mut self, variable: NumericalVariable) -> &mut Option<f64> {
        match variable {
            NumericalVariable::PassengerCount => &mut self.passenger_count,
            NumericalVariable::TripDistance => &mut self.trip_distance,
            NumericalVariable::FareAmount => &mut self.fare_amount,
            NumericalVariable::Extra => &mut self.extra,
            NumericalVariable::MtaTax => &mut self.mta_tax,
            NumericalVariable::TipAmount => &mut self.tip_amount,
            NumericalVariable::TollsAmount => &mut self.tolls_amount,
            NumericalVariable::TotalAmount => &mut self.total_amount,
            NumericalVariable::Precipitation => &mut self.precipitation,
        }
    }
}

/// A single taxi trip with its derived pickup hour and date.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub categories: TripCategories,
    pub measures: TripMeasures,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pickup_hour: u8,
    pickup_date: NaiveDate,
}

impl TripRecord {
    /// Build a record, deriving hour-of-day and calendar date from `pickup`.
    pub fn new(
        categories: TripCategories,
        measures: TripMeasures,
        pickup: NaiveDateTime,
        dropoff: NaiveDateTime,
    ) -> Self {
        TripRecord {
            categories,
            measures,
            pickup,
            dropoff,
            pickup_hour: pickup.hour() as u8,
            pickup_date: pickup.date(),
        }
    }

    /// Hour of day of the pickup, 0..=23.
    pub fn pickup_hour(&self) -> u8 {
        self.pickup_hour
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_date
    }

    pub fn category(&self, variable: CategoricalVariable) -> Option<&str> {
        let c = &self.categories;
        match variable {
            CategoricalVariable::VendorId => c.vendor_id.as_deref(),
            CategoricalVariable::RateCodeId => c.rate_code_id.as_deref(),
            CategoricalVariable::PaymentType => c.payment_type.as_deref(),
        }
    }

    pub fn measure(&self, variable: NumericalVariable) -> Option<f64> {
        let m = &self.measures;
        match variable {
            NumericalVariable::PassengerCount => m.passenger_count,
            NumericalVariable::TripDistance => m.trip_distance,
            NumericalVariable::FareAmount => m.fare_amount,
            NumericalVariable::Extra => m.extra,
            NumericalVariable::MtaTax => m.mta_tax,
            NumericalVariable::TipAmount => m.tip_amount,
            NumericalVariable::TollsAmount => m.tolls_amount,
            NumericalVariable::TotalAmount => m.total_amount,
            NumericalVariable::Precipitation => m.precipitation,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All trips in source order. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest pickup date, if any trips are loaded.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(TripRecord::pickup_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(14, 32, 10)
            .unwrap();
        assert_eq!(ts("2023-01-05 14:32:10"), expected);
        assert_eq!(ts("2023-01-05T14:32:10"), expected);
        assert_eq!(ts("01/05/2023 02:32:10 PM"), expected);
        assert_eq!(ts("2023-01-05 14:32:10.000"), expected);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_derived_hour_and_date() {
        let rec = TripRecord::new(
            TripCategories::default(),
            TripMeasures::default(),
            ts("2023-01-05 23:59:59"),
            ts("2023-01-06 00:10:00"),
        );
        assert_eq!(rec.pickup_hour(), 23);
        assert_eq!(rec.pickup_date(), NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    }

    #[test]
    fn test_raw_value_conversions() {
        assert_eq!(RawValue::Text(" 2 ".into()).into_label(), Some("2".into()));
        assert_eq!(RawValue::Number(1.0).into_label(), Some("1".into()));
        assert_eq!(RawValue::Text(String::new()).into_label(), None);

        assert_eq!(RawValue::Text("3.5".into()).to_f64(0, "fare_amount").unwrap(), Some(3.5));
        assert_eq!(RawValue::Text("".into()).to_f64(0, "fare_amount").unwrap(), None);
        assert!(matches!(
            RawValue::Text("abc".into()).to_f64(7, "fare_amount"),
            Err(LoadError::InvalidNumber { row: 7, .. })
        ));
        assert!(RawValue::Null.to_timestamp(0, "tpep_pickup_datetime").is_err());
    }

    #[test]
    fn test_na_tokens_are_missing() {
        for token in NA_TOKENS {
            let raw = RawValue::Text(token.to_string());
            assert_eq!(raw.to_f64(0, "fare_amount").unwrap(), None, "token {token:?}");
            assert_eq!(raw.into_label(), None, "token {token:?}");
        }
        assert_eq!(RawValue::Number(f64::NAN).to_f64(0, "fare_amount").unwrap(), None);
        assert_eq!(RawValue::Text("inf".into()).to_f64(0, "fare_amount").unwrap(), None);
        assert_eq!(RawValue::Number(f64::INFINITY).into_label(), None);
    }

    #[test]
    fn test_numeric_labels_share_one_form() {
        assert_eq!(RawValue::Text("1.0".into()).into_label(), Some("1".into()));
        assert_eq!(RawValue::Text("1".into()).into_label(), Some("1".into()));
        assert_eq!(RawValue::Number(1.0).into_label(), Some("1".into()));
        assert_eq!(RawValue::Text("2.5".into()).into_label(), Some("2.5".into()));
        assert_eq!(RawValue::Text("Y".into()).into_label(), Some("Y".into()));
    }

    #[test]
    fn test_date_span() {
        let mk = |s: &str| {
            TripRecord::new(TripCategories::default(), TripMeasures::default(), ts(s), ts(s))
        };
        let ds = Dataset::from_records(vec![
            mk("2023-01-03 10:00:00"),
            mk("2023-01-01 10:00:00"),
            mk("2023-01-02 10:00:00"),
        ]);
        let (lo, hi) = ds.date_span().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert!(Dataset::default().date_span().is_none());
    }
}
