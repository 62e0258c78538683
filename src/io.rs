//! Loading the sample matrix from delimited text.
//!
//! One sample per line, comma-separated numeric fields; whitespace around
//! fields is ignored.

use std::io::Read;
use std::path::Path;

use tracing::debug;
use vinum_core::matrix::from_rows;
use vinum_core::{Float, Matrix, Result, VinumError};

/// Reads the CSV file at `path` into a [`Matrix`].
///
/// # Errors
///
/// - [`VinumError::Io`] if the file cannot be opened or read
/// - [`VinumError::Csv`] if a field is not a number
/// - [`VinumError::ShapeMismatch`] if records differ in field count
/// - [`VinumError::EmptyInput`] if there are no records
pub fn load_csv<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Matrix> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|err| VinumError::Io(format!("{}: {}", path.display(), err)))?;

    read_csv(file, has_headers)
}

/// Reads CSV records from any reader; see [`load_csv`].
pub fn read_csv<R: Read>(reader: R, has_headers: bool) -> Result<Matrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<Float>> = Vec::new();

    for (record_idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;

        let row = record
            .iter()
            .enumerate()
            .map(|(field_idx, field)| {
                field.parse::<Float>().map_err(|_| {
                    VinumError::Csv(format!(
                        "record {}, field {}: {:?} is not a number",
                        record_idx + 1,
                        field_idx + 1,
                        field
                    ))
                })
            })
            .collect::<Result<Vec<Float>>>()?;

        rows.push(row);
    }

    debug!(rows = rows.len(), "csv records parsed");
    from_rows(&rows)
}

fn csv_error(err: csv::Error) -> VinumError {
    match err.kind() {
        csv::ErrorKind::Io(io) => VinumError::Io(io.to_string()),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => VinumError::ShapeMismatch {
            expected: format!("Expected {} fields per record", expected_len),
            got: format!("Got {} fields", len),
        },
        _ => VinumError::Csv(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "14.23,1.71,2.43\n13.2, 1.78 ,2.14\n13.16,2.36,2.67\n";
        let x = read_csv(data.as_bytes(), false).unwrap();

        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), 3);
        assert_eq!(x[(1, 1)], 1.78);
        assert_eq!(x[(2, 2)], 2.67);
    }

    #[test]
    fn test_read_csv_with_headers() {
        let data = "alcohol,malic_acid\n14.23,1.71\n13.2,1.78\n";
        let x = read_csv(data.as_bytes(), true).unwrap();
        assert_eq!(x.nrows(), 2);
        assert_eq!(x[(0, 0)], 14.23);
    }

    #[test]
    fn test_read_csv_non_numeric() {
        let data = "1.0,2.0\n3.0,abc\n";
        let result = read_csv(data.as_bytes(), false);
        assert!(matches!(result, Err(VinumError::Csv(msg)) if msg.contains("record 2, field 2")));
    }

    #[test]
    fn test_read_csv_ragged() {
        let data = "1.0,2.0\n3.0\n";
        let result = read_csv(data.as_bytes(), false);
        assert!(matches!(result, Err(VinumError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_read_csv_empty() {
        let result = read_csv("".as_bytes(), false);
        assert!(matches!(result, Err(VinumError::EmptyInput)));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv("definitely/not/here.csv", false);
        assert!(matches!(result, Err(VinumError::Io(msg)) if msg.contains("here.csv")));
    }
}
