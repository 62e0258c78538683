pub mod io;
pub mod report;
pub mod sweep;

// Re-export public API
pub use vinum_core::*;
pub use vinum_models::*;

pub use io::{load_csv, read_csv};
pub use report::ClusterSummary;
pub use sweep::{run_sweep, SweepConfig, SweepEntry};
