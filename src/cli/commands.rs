pub mod dashboard;
pub mod serve;

pub use dashboard::dashboard;
pub use serve::serve;
