use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure parsed from `tempmon.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// HTTP listener and static dashboard.
    pub server: ServerConfig,
    /// Rolling window settings.
    pub history: HistoryConfig,
    /// Sample acquisition and loop timing.
    pub sampler: SamplerConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `"0.0.0.0:8081"`.
    pub listen: String,
    /// Directory served for every path other than `/data`.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen:     "0.0.0.0:8081".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of samples retained (3600 = one hour at 1 Hz).
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 3600 }
    }
}

/// Where samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Run an external command and parse its output.
    #[default]
    Command,
    /// Read a hardware component through `sysinfo`.
    Component,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Delay after a successful sample (milliseconds).
    pub interval_ms: u64,
    /// Delay after a failed sample (milliseconds).
    pub backoff_ms: u64,
    /// Upper bound on a single acquisition (milliseconds).
    pub timeout_ms: u64,
    pub source: SourceKind,
    /// Program run when `source = "command"`.
    pub command: String,
    pub args: Vec<String>,
    /// Component label matched when `source = "component"`.
    pub component: String,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            backoff_ms:  5_000,
            timeout_ms:  3_000,
            source:      SourceKind::Command,
            command:     "nvidia-smi".to_string(),
            args: vec![
                "--query-gpu=temperature.gpu".to_string(),
                "--format=csv,noheader,nounits".to_string(),
            ],
            component:   "coretemp Package id 0".to_string(),
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
