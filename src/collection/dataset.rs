//! The reference street table and a CSV loader for alternatives.
//!
//! # CSV format
//!
//! One row per street segment, in visiting order. `sorted` may be left empty.
//!
//! ```text
//! households,meters,name,sorted
//! 12,750,Dlouha,
//! 2,55,Horni,5
//! 0,190,Horni zpet,
//! ```

use super::StreetRecord;
use crate::{Error, Result};

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// `(households, meters, name, sorted containers)` in declaration order. Segments with no households are the way back
/// out of a street that has to be driven twice.
const REFERENCE_STREETS: &[(u32, u32, &str, u32)] = &[
    (12, 750, "Dlouha", 0),
    (2, 55, "Horni", 5),
    (5, 190, "Horni", 0),
    (0, 190, "Horni zpet", 0),
    (20, 400, "Horni", 0),
    (5, 71, "4473", 0),
    (0, 71, "4473 zpet", 0),
    (19, 290, "Horni", 0),
    (12, 180, "U Splavu", 5),
    (0, 180, "U Splavu zpet", 0),
    (6, 150, "Horni", 0),
    (6, 72, "Zahradni", 0),
    (0, 72, "Zahradni zpet", 0),
    (22, 550, "Horni", 0),
    (3, 74, "Dlouha", 0),
    (0, 74, "Dlouha zpet", 0),
    (11, 140, "Horni", 0),
    (10, 160, "44613", 0),
    (4, 28, "Oskava", 0),
    (10, 130, "Horni", 0),
    (3, 54, "Horni", 0),
    (7, 89, "Sokolska", 0),
    (0, 89, "Sokolska zpet", 0),
    (1, 60, "Horni", 5),
    (6, 140, "Oskava", 0),
    (0, 140, "Oskava zpet", 0),
    (9, 120, "Pravoslavna", 0),
    (0, 120, "Pravoslavna zpet", 0),
    (6, 300, "Dolni", 0),
    (2, 36, "Dolni", 0),
    (0, 36, "Dolni zpet", 0),
    (17, 290, "Dolni", 0),
    (4, 36, "Dolni", 0),
    (0, 36, "Dolni zpet", 0),
    (8, 68, "Dolni", 0),
    (21, 260, "Dolni", 8),
    (18, 300, "Polni", 0),
    (0, 250, "Dolni zpet", 0),
    (3, 77, "Dolni", 0),
    (3, 77, "Dolni", 0),
    (6, 79, "Dolni", 0),
    (0, 79, "Dolni zpet", 0),
    (3, 39, "Na Travniku", 0),
    (4, 54, "Na Travniku", 0),
    (0, 54, "Na Travniku zpet", 0),
    (2, 26, "Dolni", 0),
    (6, 110, "Delnicka", 0),
    (7, 280, "Delnicka", 0),
    (0, 110, "Delnicka zpet", 0),
    (4, 110, "Delnicka", 0),
    (11, 290, "Nadrazni", 7),
    (3, 81, "Tovarni", 0),
    (0, 81, "Tovarni zpet", 0),
    (4, 130, "Nadrazni", 0),
    (9, 150, "Tovarni", 0),
    (4, 110, "Nadrazni", 5),
    (0, 170, "Nadrazni zpet", 0),
    (5, 200, "Stepana Krejciho", 0),
    (0, 24, "Nadjezdova", 0),
    (8, 210, "Hybesova", 0),
    (2, 50, "Sidliste", 0),
    (11, 210, "Nadjezdova", 7),
    (0, 18, "Nadjezdova", 0),
    (6, 210, "Nadjezdova", 0),
    (24, 90, "Sidliste", 0),
    (24, 99, "Nadrazni", 0),
    (0, 99, "Nadrazni zpet", 0),
    (12, 150, "Sidliste", 8),
    (3, 57, "Brezecka", 7),
    (22, 210, "Brezecka", 0),
    (5, 75, "Nadjezdova", 0),
    (19, 88, "Nadjezdova", 0),
    (9, 140, "Nadjezdova", 0),
    (0, 88, "Nadjezdova", 0),
    (0, 83, "Pod nadjezdem", 0),
    (2, 47, "Pod nadjezdem", 0),
    (10, 130, "Nova", 0),
    (25, 350, "Nova", 0),
    (8, 100, "Brezecka", 0),
];

/// The reference round, in visiting order.
pub fn default_streets() -> Vec<StreetRecord> {
    REFERENCE_STREETS
        .iter()
        .map(|&(households, meters, name, sorted)| StreetRecord::new(households, meters, name).with_sorted(sorted))
        .collect()
}

/// Load street records from a CSV file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, [`Error::Dataset`] for any malformed row.
pub fn load_csv(path: &Path) -> Result<Vec<StreetRecord>> {
    let file = std::fs::File::open(path)?;
    from_reader(file)
}

/// Like [`load_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// [`Error::Dataset`] for any malformed row.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StreetRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<CsvStreet>()
        .map(|row| row.map(StreetRecord::from).map_err(|e| Error::Dataset(e.to_string())))
        .collect()
}

/// CSV row shape; an empty `sorted` column reads as zero.
#[derive(Deserialize)]
struct CsvStreet {
    households: u32,
    meters: u32,
    name: String,
    sorted: Option<u32>,
}

impl From<CsvStreet> for StreetRecord {
    fn from(row: CsvStreet) -> Self {
        StreetRecord::new(row.households, row.meters, row.name).with_sorted(row.sorted.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_totals() {
        let streets = default_streets();
        assert_eq!(79, streets.len());
        assert_eq!(StreetRecord::new(12, 750, "Dlouha"), streets[0]);
        assert_eq!(StreetRecord::new(2, 55, "Horni").with_sorted(5), streets[1]);
        let households: u32 = streets.iter().map(|s| s.households).sum();
        let meters: u32 = streets.iter().map(|s| s.meters).sum();
        assert_eq!(513, households);
        assert_eq!(11086, meters);
    }

    #[test]
    fn csv_rows_keep_their_order() {
        let data = "households,meters,name,sorted\n12,750,Dlouha,\n0,190,Horni zpet,\n5,190,Horni,2\n";
        let streets = from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            vec![
                StreetRecord::new(12, 750, "Dlouha"),
                StreetRecord::new(0, 190, "Horni zpet"),
                StreetRecord::new(5, 190, "Horni").with_sorted(2),
            ],
            streets
        );
    }

    #[test]
    fn malformed_row_is_a_dataset_error() {
        let data = "households,meters,name,sorted\n12,far,Dlouha,\n";
        assert!(matches!(from_reader(data.as_bytes()), Err(Error::Dataset(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_csv(Path::new("/nonexistent/streets.csv"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
