pub mod k_means;
pub mod k_medians;
pub mod range_scaler;

pub use k_means::KMeans;
pub use k_medians::{Convergence, EmptyClusterPolicy, KMedians, KMediansConfig};
pub use range_scaler::{standardize, RangeScaler};
