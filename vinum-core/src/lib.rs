pub mod distance;
pub mod error;
pub mod matrix;
pub mod stats;
pub mod types;

pub use types::{Assignments, Float, Label, Matrix, Vector};

pub use error::{Result, VinumError};

pub use distance::manhattan;
