use crate::{SampleError, SampleSource};
use std::process::Stdio;
use tempmon_core::Sample;
use tokio::process::Command;

/// Runs an external diagnostic tool (e.g. `nvidia-smi`) and parses the single
/// number it prints.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args:    Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SampleSource for CommandSource {
    fn name(&self) -> &str {
        &self.program
    }

    async fn sample(&mut self) -> Result<Sample, SampleError> {
        // kill_on_drop: the sampler drops this future on timeout.
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SampleError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SampleError::ExitStatus {
                program: self.program.clone(),
                status:  output.status,
            });
        }

        parse_sample(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse one whitespace-trimmed integer, e.g. `"47\n"` → `47`.
pub fn parse_sample(raw: &str) -> Result<Sample, SampleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SampleError::Empty);
    }
    trimmed.parse::<Sample>().map_err(|source| SampleError::Parse {
        raw: trimmed.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integer() {
        assert_eq!(parse_sample("47\n").unwrap(), 47);
        assert_eq!(parse_sample("  -3 \r\n").unwrap(), -3);
    }

    #[test]
    fn empty_output_is_an_error() {
        assert!(matches!(parse_sample(""), Err(SampleError::Empty)));
        assert!(matches!(parse_sample(" \n\t"), Err(SampleError::Empty)));
    }

    #[test]
    fn non_numeric_output_is_an_error() {
        assert!(matches!(parse_sample("[N/A]"), Err(SampleError::Parse { .. })));
        assert!(matches!(parse_sample("47.5"), Err(SampleError::Parse { .. })));
        // Multi-GPU hosts print one line per device.
        assert!(matches!(parse_sample("47\n52\n"), Err(SampleError::Parse { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reads_command_stdout() {
        let mut source = CommandSource::new("sh", vec!["-c".into(), "echo 61".into()]);
        assert_eq!(source.sample().await.unwrap(), 61);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let mut source = CommandSource::new("sh", vec!["-c".into(), "echo 61; exit 3".into()]);
        assert!(matches!(
            source.sample().await,
            Err(SampleError::ExitStatus { .. })
        ));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let mut source = CommandSource::new("tempmon-no-such-tool", Vec::new());
        assert!(matches!(source.sample().await, Err(SampleError::Spawn { .. })));
    }
}
