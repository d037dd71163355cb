pub mod schema;

pub use schema::{HistoryConfig, MonitorConfig, SamplerConfig, ServerConfig, SourceKind};

use tempmon_core::{MonitorError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read `tempmon.toml` from `path`.
///
/// A missing file is not an error: the monitor starts on defaults.  An
/// unreadable or invalid file is.
pub fn load(path: impl AsRef<Path>) -> Result<MonitorConfig> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("No config at '{}'; using defaults", path.display());
            return Ok(MonitorConfig::default());
        }
        Err(e) => {
            return Err(MonitorError::Config(format!("cannot read '{}': {e}", path.display())))
        }
    };

    let config = parse(&raw)?;
    tracing::info!(
        "Loaded '{}': {:?} source, window of {}",
        path.display(),
        config.sampler.source,
        config.history.capacity
    );
    Ok(config)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<MonitorConfig> {
    let config: MonitorConfig =
        toml::from_str(raw).map_err(|e| MonitorError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject values the sampler or store cannot run with.
pub fn validate(config: &MonitorConfig) -> Result<()> {
    let s = &config.sampler;
    let invalid = |msg: &str| Err(MonitorError::Config(msg.to_string()));

    if config.history.capacity == 0 {
        return invalid("history.capacity must be at least 1");
    }
    if s.interval_ms == 0 {
        return invalid("sampler.interval_ms must be at least 1");
    }
    if s.backoff_ms == 0 {
        return invalid("sampler.backoff_ms must be at least 1");
    }
    if s.timeout_ms == 0 {
        return invalid("sampler.timeout_ms must be at least 1");
    }
    if s.source == SourceKind::Command && s.command.trim().is_empty() {
        return invalid("sampler.command must not be empty");
    }
    Ok(())
}

/// `$XDG_CONFIG_HOME/tempmon/tempmon.toml`, or `~/.config/tempmon/tempmon.toml`
/// when the variable is unset or empty.
pub fn default_path() -> PathBuf {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_home.join("tempmon").join("tempmon.toml")
}
