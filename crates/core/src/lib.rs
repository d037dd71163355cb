pub mod error;
pub mod state;
pub mod store;

pub use error::{MonitorError, Result};
pub use state::{Sample, Snapshot};
pub use store::RollingTemperatureStore;
