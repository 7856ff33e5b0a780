pub mod dashboard;
pub mod error;

pub use dashboard::DashboardComputer;
pub use error::{ComputeError, Result};
