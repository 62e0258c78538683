use vinum_core::stats::{column_max, column_mean, column_min};
use vinum_core::{Matrix, Result, Vector, VinumError};

/// **Mean-range scaling** of feature columns.
///
/// Every value is centered on its column mean and divided by the column range:
///
/// ```text
/// x'_ij = (x_ij − mean_j) / (max_j − min_j)
/// ```
///
/// After scaling each column has mean zero and a range of exactly one, so most
/// values fall within `[-1, 1]` and no single feature dominates the Manhattan
/// distance.
///
/// # Errors
///
/// - [`VinumError::EmptyInput`] when fitting on a matrix without rows or columns
/// - [`VinumError::InvalidValue`] when the matrix holds a `NaN` or infinite value
/// - [`VinumError::DegenerateColumn`] when a column is constant; the scaler
///   refuses to fit rather than emit `NaN`/`inf` values
/// - [`VinumError::NotFitted`] / [`VinumError::ShapeMismatch`] from [`transform`](RangeScaler::transform)
#[derive(Debug, Clone, Default)]
pub struct RangeScaler {
    mean: Option<Vector>,
    range: Option<Vector>,
}

impl RangeScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes per-column mean and range (`max − min`) once.
    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(VinumError::EmptyInput);
        }

        // storage is column-major
        if let Some(pos) = x.iter().position(|v| !v.is_finite()) {
            let (row, column) = (pos % x.nrows(), pos / x.nrows());
            return Err(VinumError::InvalidValue {
                message: format!(
                    "non-finite value {} at row {}, column {}",
                    x[(row, column)],
                    row,
                    column
                ),
            });
        }

        let d = x.ncols();
        let mut means = Vector::zeros(d);
        let mut ranges = Vector::zeros(d);

        for j in 0..d {
            let range = column_max(x, j)? - column_min(x, j)?;
            if range == 0.0 {
                return Err(VinumError::DegenerateColumn { column: j });
            }

            means[j] = column_mean(x, j)?;
            ranges[j] = range;
        }

        self.mean = Some(means);
        self.range = Some(ranges);
        Ok(())
    }

    /// Returns a new, scaled copy of `x`.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let (means, ranges) = match (&self.mean, &self.range) {
            (Some(m), Some(r)) => (m, r),
            _ => return Err(VinumError::NotFitted),
        };

        if x.ncols() != means.len() {
            return Err(VinumError::ShapeMismatch {
                expected: format!("Expected {} features", means.len()),
                got: format!("Got {} features", x.ncols()),
            });
        }

        Ok(Matrix::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - means[j]) / ranges[j]
        }))
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Column means seen during `fit`.
    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    /// Column ranges seen during `fit`.
    pub fn range(&self) -> Option<&Vector> {
        self.range.as_ref()
    }
}

/// Fits a [`RangeScaler`] on `x` and returns the scaled matrix.
pub fn standardize(x: &Matrix) -> Result<Matrix> {
    RangeScaler::new().fit_transform(x)
}
