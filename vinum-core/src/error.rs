use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum VinumError {
    /// IO-related failures (file not found, unreadable, etc.)
    Io(String),

    /// CSV parsing issues (non-numeric field, broken record)
    Csv(String),

    /// Shape or dimensionality mismatch
    ShapeMismatch { expected: String, got: String },

    /// Model used before calling `fit`
    NotFitted,

    /// The input contains no values.
    EmptyInput,

    /// A column index past the last column.
    IndexOutOfRange { index: usize, len: usize },

    /// Requested cluster count outside `[2, n)`.
    InvalidK { k: usize, n: usize },

    /// A feature column has `max == min`, so it cannot be range-scaled.
    DegenerateColumn { column: usize },

    /// An update step left a cluster without any rows.
    EmptyCluster { cluster: usize },

    /// No fixed point reached within the iteration cap.
    NonConvergence { max_iter: usize },

    /// Invalid Hyperparameter Value
    InvalidHyperparameter { name: String, value: String },

    /// Invalid value
    InvalidValue { message: String },
}

impl fmt::Display for VinumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VinumError::Io(msg) => write!(f, "io error: {msg}"),
            VinumError::Csv(msg) => write!(f, "csv error: {msg}"),
            VinumError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: {expected}, {got}")
            }
            VinumError::NotFitted => write!(f, "model used before fit"),
            VinumError::EmptyInput => write!(f, "input is empty"),
            VinumError::IndexOutOfRange { index, len } => {
                write!(f, "column index {index} out of range for {len} columns")
            }
            VinumError::InvalidK { k, n } => {
                write!(f, "k = {k} is outside [2, {n}) for {n} rows")
            }
            VinumError::DegenerateColumn { column } => {
                write!(f, "column {column} has zero range (max == min)")
            }
            VinumError::EmptyCluster { cluster } => {
                write!(f, "cluster {cluster} has no assigned rows")
            }
            VinumError::NonConvergence { max_iter } => {
                write!(f, "no fixed point reached after {max_iter} iterations")
            }
            VinumError::InvalidHyperparameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
            VinumError::InvalidValue { message } => write!(f, "invalid value: {message}"),
        }
    }
}

impl std::error::Error for VinumError {}

impl From<std::io::Error> for VinumError {
    fn from(err: std::io::Error) -> Self {
        VinumError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VinumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_offending_values() {
        let err = VinumError::InvalidK { k: 7, n: 7 };
        assert_eq!(err.to_string(), "k = 7 is outside [2, 7) for 7 rows");

        let err = VinumError::DegenerateColumn { column: 3 };
        assert!(err.to_string().contains("column 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "data.csv");
        let err: VinumError = io.into();
        assert!(matches!(err, VinumError::Io(msg) if msg.contains("data.csv")));
    }
}
