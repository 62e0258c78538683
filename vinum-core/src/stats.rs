//! Column statistics.
//!
//! The slice functions work on any `&[Float]`; the `column_*` variants pull a
//! column out of a [`Matrix`] first. All of them reject empty input with
//! [`VinumError::EmptyInput`].

use crate::matrix::column;
use crate::{Float, Matrix, Result, VinumError};

/// Largest value in `values`.
pub fn max(values: &[Float]) -> Result<Float> {
    values
        .iter()
        .copied()
        .reduce(Float::max)
        .ok_or(VinumError::EmptyInput)
}

/// Smallest value in `values`.
pub fn min(values: &[Float]) -> Result<Float> {
    values
        .iter()
        .copied()
        .reduce(Float::min)
        .ok_or(VinumError::EmptyInput)
}

/// Arithmetic mean of `values`.
pub fn mean(values: &[Float]) -> Result<Float> {
    if values.is_empty() {
        return Err(VinumError::EmptyInput);
    }

    Ok(values.iter().sum::<Float>() / values.len() as Float)
}

/// Median of `values`.
///
/// For an odd count this is the middle value after sorting; for an even count
/// it is the average of the two middle values. The input is left untouched,
/// sorting happens on a copy.
pub fn median(values: &[Float]) -> Result<Float> {
    if values.is_empty() {
        return Err(VinumError::EmptyInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

pub fn column_max(x: &Matrix, index: usize) -> Result<Float> {
    max(column(x, index)?.as_slice())
}

pub fn column_min(x: &Matrix, index: usize) -> Result<Float> {
    min(column(x, index)?.as_slice())
}

pub fn column_mean(x: &Matrix, index: usize) -> Result<Float> {
    mean(column(x, index)?.as_slice())
}

pub fn column_median(x: &Matrix, index: usize) -> Result<Float> {
    median(column(x, index)?.as_slice())
}
