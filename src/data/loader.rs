use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, RawValue, TripCategories, TripMeasures, TripRecord};
use super::variable::{CategoricalVariable, NumericalVariable};
use crate::error::LoadError;

pub const PICKUP_COLUMN: &str = "tpep_pickup_datetime";
pub const DROPOFF_COLUMN: &str = "tpep_dropoff_datetime";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the trip table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – `[{ "VendorID": 1, "tpep_pickup_datetime": "...", ... }, ...]`
/// * `.parquet` – one column per source field, any numeric/string/timestamp type
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => load_csv(open()?)?,
        "json" => {
            let mut text = String::new();
            open()?
                .read_to_string(&mut text)
                .map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            load_json(&text)?
        }
        "parquet" | "pq" => load_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} trips from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Every column the loader requires, by its source header.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    CategoricalVariable::ALL
        .into_iter()
        .map(CategoricalVariable::source_column)
        .chain(NumericalVariable::ALL.into_iter().map(NumericalVariable::source_column))
        .chain([PICKUP_COLUMN, DROPOFF_COLUMN])
}

/// Assemble one record from a cell lookup keyed by source header.
fn build_record<F>(row: usize, mut cell: F) -> Result<TripRecord, LoadError>
where
    F: FnMut(&'static str) -> Result<RawValue, LoadError>,
{
    let mut categories = TripCategories::default();
    for var in CategoricalVariable::ALL {
        *categories.slot_mut(var) = cell(var.source_column())?.into_label();
    }

    let mut measures = TripMeasures::default();
    for var in NumericalVariable::ALL {
        let column = var.source_column();
        *measures.slot_mut(var) = cell(column)?.to_f64(row, column)?;
    }

    let pickup = cell(PICKUP_COLUMN)?.to_timestamp(row, PICKUP_COLUMN)?;
    let dropoff = cell(DROPOFF_COLUMN)?.to_timestamp(row, DROPOFF_COLUMN)?;

    Ok(TripRecord::new(categories, measures, pickup, dropoff))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the source column names, one trip per row.
/// Extra columns are ignored; missing required columns fail the load.
pub fn load_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut index: HashMap<&'static str, usize> = HashMap::new();
    for column in required_columns() {
        let pos = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == column)
            .ok_or(LoadError::MissingColumn(column))?;
        index.insert(column, pos);
    }

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let trip = build_record(row, |column| {
            let text = index
                .get(column)
                .and_then(|&i| record.get(i))
                .unwrap_or("");
            Ok(RawValue::Text(text.to_string()))
        })?;
        records.push(trip);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "VendorID": 1,
///     "tpep_pickup_datetime": "2023-01-01 00:32:10",
///     "fare_amount": 9.3,
///     "PRCP": 0.0,
///     ...
///   },
///   ...
/// ]
/// ```
///
/// Date-times may also be epoch milliseconds, which is what pandas writes.
pub fn load_json(text: &str) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {row} is not a JSON object")))?;

        let trip = build_record(row, |column| {
            obj.get(column)
                .map(json_to_raw)
                .ok_or(LoadError::MissingColumn(column))
        })?;
        records.push(trip);
    }

    Ok(Dataset::from_records(records))
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::Text(n.to_string())),
        JsonValue::Null => RawValue::Null,
        other => RawValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// A required column of one record batch, cast to the type the loader reads.
enum BatchColumn {
    Text(StringArray),
    Number(Float64Array),
}

impl BatchColumn {
    fn raw(&self, row: usize) -> RawValue {
        match self {
            BatchColumn::Text(arr) if arr.is_null(row) => RawValue::Null,
            BatchColumn::Text(arr) => RawValue::Text(arr.value(row).to_string()),
            BatchColumn::Number(arr) if arr.is_null(row) => RawValue::Null,
            BatchColumn::Number(arr) => RawValue::Number(arr.value(row)),
        }
    }
}

/// Load a Parquet file containing trip records.
///
/// Numeric fields may be stored as any integer or float type; categorical
/// codes as integers or strings; date-times as strings or Arrow timestamps.
/// Works with files written by both **Pandas** and **Polars**.
pub fn load_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    // Checked up front so a file without row groups still reports the gap.
    for column in required_columns() {
        builder
            .schema()
            .index_of(column)
            .map_err(|_| LoadError::MissingColumn(column))?;
    }
    let reader = builder.build()?;

    let numeric: Vec<&'static str> = NumericalVariable::ALL
        .into_iter()
        .map(NumericalVariable::source_column)
        .collect();

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let mut columns: HashMap<&'static str, BatchColumn> = HashMap::new();
        for column in required_columns() {
            let idx = schema
                .index_of(column)
                .map_err(|_| LoadError::MissingColumn(column))?;
            let array = batch.column(idx);
            let typed = if numeric.contains(&column) {
                BatchColumn::Number(downcast::<Float64Array>(
                    &cast(array, &DataType::Float64)?,
                    column,
                )?)
            } else {
                BatchColumn::Text(downcast::<StringArray>(
                    &cast(array, &DataType::Utf8)?,
                    column,
                )?)
            };
            columns.insert(column, typed);
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let trip = build_record(offset + row, |column| {
                columns
                    .get(column)
                    .map(|c| c.raw(row))
                    .ok_or(LoadError::MissingColumn(column))
            })?;
            records.push(trip);
        }
    }

    Ok(Dataset::from_records(records))
}

fn downcast<T: Array + Clone + 'static>(array: &ArrayRef, column: &str) -> Result<T, LoadError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| {
            LoadError::Malformed(format!(
                "column '{column}' has unexpected type {:?}",
                array.data_type()
            ))
        })
}
