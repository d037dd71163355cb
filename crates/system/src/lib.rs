//! Sample acquisition and the background sampling loop.

pub mod command;
pub mod component;
pub mod sampler;

pub use command::{parse_sample, CommandSource};
pub use component::ComponentSource;
pub use sampler::{spawn_sampler, Sampler};

use std::future::Future;
use tempmon_core::{MonitorError, Sample};
use thiserror::Error;

/// Why a single acquisition produced no sample.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("cannot run '{program}': {source}")]
    Spawn {
        program: String,
        source:  std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    ExitStatus { program: String, status: std::process::ExitStatus },

    #[error("empty output")]
    Empty,

    #[error("cannot parse {raw:?} as a temperature: {source}")]
    Parse {
        raw:    String,
        source: std::num::ParseIntError,
    },

    #[error("no reading within {0:?}")]
    Timeout(std::time::Duration),

    #[error("no sensor component labelled '{0}'")]
    NoComponent(String),

    #[error("component '{0}' reported no temperature")]
    NoReading(String),
}

impl From<SampleError> for MonitorError {
    fn from(e: SampleError) -> Self {
        MonitorError::Sample(e.to_string())
    }
}

/// Anything that can be asked for one fresh reading.
///
/// Implementations are called from a single task, once per tick. A failure is
/// transient: the sampler logs it and tries again later.
pub trait SampleSource: Send {
    /// Short human-readable name used in log lines.
    fn name(&self) -> &str;

    /// Take one reading.
    fn sample(&mut self) -> impl Future<Output = Result<Sample, SampleError>> + Send;
}
