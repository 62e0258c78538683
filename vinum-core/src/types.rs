pub type Float = f64;
pub type Matrix = nalgebra::DMatrix<Float>;
pub type Vector = nalgebra::DVector<Float>;

/// Index of a cluster, in `0..k`.
pub type Label = usize;

/// One label per matrix row, aligned with row order.
pub type Assignments = Vec<Label>;
