use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DAYS: i64 = 7;
const TRIPS_PER_DAY: usize = 400;

/// One output row, with the column names the dashboard loader expects.
#[derive(Debug, Serialize)]
struct SampleTrip {
    #[serde(rename = "VendorID")]
    vendor_id: i64,
    tpep_pickup_datetime: String,
    tpep_dropoff_datetime: String,
    passenger_count: i64,
    trip_distance: f64,
    #[serde(rename = "RatecodeID")]
    rate_code_id: i64,
    payment_type: i64,
    fare_amount: f64,
    extra: f64,
    mta_tax: f64,
    tip_amount: f64,
    tolls_amount: f64,
    total_amount: f64,
    #[serde(rename = "PRCP")]
    precipitation: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index into `weights`, drawn proportionally.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                return i;
            }
            target -= w;
        }
        weights.len() - 1
    }
}

/// Relative pickup volume per hour of day, peaking in the early evening.
const HOURLY_WEIGHTS: [f64; 24] = [
    3.0, 2.0, 1.5, 1.0, 1.0, 1.5, 3.0, 5.0, 6.0, 6.0, 5.5, 5.5, //
    6.0, 6.0, 6.5, 7.0, 7.5, 8.5, 9.0, 8.5, 7.5, 6.5, 5.5, 4.5,
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng, start: NaiveDateTime) -> Vec<SampleTrip> {
    let mut trips = Vec::with_capacity(DAYS as usize * TRIPS_PER_DAY);
    for day in 0..DAYS {
        // One daily rainfall figure, dry on most days.
        let precipitation = if rng.next_f64() < 0.4 {
            round2(rng.next_f64() * 1.5)
        } else {
            0.0
        };

        for _ in 0..TRIPS_PER_DAY {
            let hour = rng.weighted(&HOURLY_WEIGHTS) as i64;
            let minute = (rng.next_f64() * 60.0) as i64;
            let second = (rng.next_f64() * 60.0) as i64;
            let pickup = start
                + Duration::days(day)
                + Duration::hours(hour)
                + Duration::minutes(minute)
                + Duration::seconds(second);

            let trip_distance = round2(rng.gauss(2.8, 2.0).abs().max(0.1) * (1.0 + precipitation * 0.2));
            let rate_code_id = 1 + rng.weighted(&[0.92, 0.04, 0.01, 0.01, 0.02]) as i64;
            let fare_amount = round2(if rate_code_id == 2 {
                70.0
            } else {
                3.0 + trip_distance * 2.5 + rng.gauss(0.0, 1.5).abs()
            });
            let minutes = (trip_distance * 4.0 + rng.gauss(6.0, 3.0).abs()).round() as i64;
            let dropoff = pickup + Duration::minutes(minutes.max(1));

            let payment_type = 1 + rng.weighted(&[0.72, 0.26, 0.01, 0.01]) as i64;
            let tip_amount = if payment_type == 1 {
                round2(fare_amount * (0.1 + rng.next_f64() * 0.15))
            } else {
                0.0
            };
            let tolls_amount = if trip_distance > 9.0 && rng.next_f64() < 0.5 {
                6.55
            } else {
                0.0
            };
            let extra = if (16..20).contains(&hour) { 1.0 } else { 0.5 };
            let mta_tax = 0.5;
            let total_amount = round2(fare_amount + extra + mta_tax + tip_amount + tolls_amount + 0.3);

            trips.push(SampleTrip {
                vendor_id: 1 + rng.weighted(&[0.35, 0.65]) as i64,
                tpep_pickup_datetime: pickup.format(TIMESTAMP_FORMAT).to_string(),
                tpep_dropoff_datetime: dropoff.format(TIMESTAMP_FORMAT).to_string(),
                passenger_count: 1 + rng.weighted(&[0.7, 0.15, 0.05, 0.03, 0.04, 0.03]) as i64,
                trip_distance,
                rate_code_id,
                payment_type,
                fare_amount,
                extra,
                mta_tax,
                tip_amount,
                tolls_amount,
                total_amount,
                precipitation,
            });
        }
    }
    trips.sort_by(|a, b| a.tpep_pickup_datetime.cmp(&b.tpep_pickup_datetime));
    trips
}

fn write_csv(path: &str, trips: &[SampleTrip]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for trip in trips {
        writer.serialize(trip)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, trips: &[SampleTrip]) -> Result<()> {
    let int_column = |f: fn(&SampleTrip) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(trips.iter().map(f).collect::<Vec<_>>()))
    };
    let float_column = |f: fn(&SampleTrip) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(trips.iter().map(f).collect::<Vec<_>>()))
    };
    let text_column = |f: fn(&SampleTrip) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(trips.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("VendorID", DataType::Int64, int_column(|t| t.vendor_id)),
        ("tpep_pickup_datetime", DataType::Utf8, text_column(|t| t.tpep_pickup_datetime.as_str())),
        ("tpep_dropoff_datetime", DataType::Utf8, text_column(|t| t.tpep_dropoff_datetime.as_str())),
        ("passenger_count", DataType::Int64, int_column(|t| t.passenger_count)),
        ("trip_distance", DataType::Float64, float_column(|t| t.trip_distance)),
        ("RatecodeID", DataType::Int64, int_column(|t| t.rate_code_id)),
        ("payment_type", DataType::Int64, int_column(|t| t.payment_type)),
        ("fare_amount", DataType::Float64, float_column(|t| t.fare_amount)),
        ("extra", DataType::Float64, float_column(|t| t.extra)),
        ("mta_tax", DataType::Float64, float_column(|t| t.mta_tax)),
        ("tip_amount", DataType::Float64, float_column(|t| t.tip_amount)),
        ("tolls_amount", DataType::Float64, float_column(|t| t.tolls_amount)),
        ("total_amount", DataType::Float64, float_column(|t| t.total_amount)),
        ("PRCP", DataType::Float64, float_column(|t| t.precipitation)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, dtype, _)| Field::new(*name, dtype.clone(), false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, _, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;

    let trips = generate(&mut rng, start);

    write_csv("sample_trips.csv", &trips)?;
    write_parquet("sample_trips.parquet", &trips)?;

    println!(
        "Wrote {} trips over {DAYS} days to sample_trips.csv and sample_trips.parquet",
        trips.len()
    );
    Ok(())
}
