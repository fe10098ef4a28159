/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (+ pickup_hour, pickup_date)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<TripRecord>, immutable, source order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive pickup-hour range → filtered view
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod variable;

#[cfg(test)]
pub mod test_support {
    use super::loader::load_csv;
    use super::model::Dataset;

    pub const HEADER: &str = "VendorID,RatecodeID,payment_type,passenger_count,trip_distance,fare_amount,extra,mta_tax,tip_amount,tolls_amount,total_amount,PRCP,tpep_pickup_datetime,tpep_dropoff_datetime";

    /// Five trips over two days with hand-checkable values.
    ///
    /// | # | vendor | pay | dist | fare | prcp | pickup           |
    /// |---|--------|-----|------|------|------|------------------|
    /// | 0 | 1      | 1   | 1.0  | 10.0 | 0.0  | 2023-01-01 08:05 |
    /// | 1 | 2      | 1   | 2.0  | 20.0 | 0.0  | 2023-01-01 08:40 |
    /// | 2 | 2      | 2   | 3.0  | 30.0 | 0.5  | 2023-01-01 09:15 |
    /// | 3 | 2      | 1   | 4.0  | 40.0 | 0.5  | 2023-01-02 17:30 |
    /// | 4 | 1      | 2   | 5.0  | 50.0 | 1.0  | 2023-01-02 23:55 |
    pub const FIVE_ROW_CSV: &str = "\
VendorID,RatecodeID,payment_type,passenger_count,trip_distance,fare_amount,extra,mta_tax,tip_amount,tolls_amount,total_amount,PRCP,tpep_pickup_datetime,tpep_dropoff_datetime
1,1,1,1,1.0,10.0,0.5,0.5,2.0,0,13.0,0.0,2023-01-01 08:05:00,2023-01-01 08:15:00
2,1,1,2,2.0,20.0,0.5,0.5,4.0,0,25.0,0.0,2023-01-01 08:40:00,2023-01-01 09:00:00
2,1,2,1,3.0,30.0,0.0,0.5,0.0,0,30.5,0.5,2023-01-01 09:15:00,2023-01-01 09:45:00
2,2,1,3,4.0,40.0,1.0,0.5,8.0,6.55,56.05,0.5,2023-01-02 17:30:00,2023-01-02 18:10:00
1,1,2,1,5.0,50.0,1.0,0.5,0.0,0,51.5,1.0,2023-01-02 23:55:00,2023-01-03 00:30:00
";

    pub fn five_row_dataset() -> Dataset {
        load_csv(FIVE_ROW_CSV.as_bytes()).expect("fixture parses")
    }
}
