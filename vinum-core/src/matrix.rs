use crate::{Float, Matrix, Result, Vector, VinumError};

/// Builds a [`Matrix`] from row vectors, one per sample.
///
/// # Errors
///
/// - [`VinumError::EmptyInput`] if there are no rows or the first row has no values
/// - [`VinumError::ShapeMismatch`] if any row differs in length from the first
pub fn from_rows(rows: &[Vec<Float>]) -> Result<Matrix> {
    let first = rows.first().ok_or(VinumError::EmptyInput)?;
    let d = first.len();

    if d == 0 {
        return Err(VinumError::EmptyInput);
    }

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != d) {
        return Err(VinumError::ShapeMismatch {
            expected: format!("Expected {} values per row", d),
            got: format!("Got {} values in row {}", row.len(), i),
        });
    }

    Ok(Matrix::from_fn(rows.len(), d, |i, j| rows[i][j]))
}

/// Returns column `index` of `x`, preserving row order.
///
/// # Errors
///
/// - [`VinumError::IndexOutOfRange`] if `index >= x.ncols()`
pub fn column(x: &Matrix, index: usize) -> Result<Vector> {
    if index >= x.ncols() {
        return Err(VinumError::IndexOutOfRange {
            index,
            len: x.ncols(),
        });
    }

    Ok(x.column(index).into_owned())
}
