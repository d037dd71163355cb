use crate::{SampleError, SampleSource};
use std::sync::Arc;
use std::time::Duration;
use tempmon_config::SamplerConfig;
use tempmon_core::RollingTemperatureStore;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

/// Drives one [`SampleSource`] into the store on a fixed cadence.
///
/// The sampler is the store's only writer.
pub struct Sampler<S> {
    store:    Arc<RollingTemperatureStore>,
    source:   S,
    interval: Duration,
    backoff:  Duration,
    timeout:  Duration,
}

impl<S: SampleSource> Sampler<S> {
    pub fn new(store: Arc<RollingTemperatureStore>, source: S, config: &SamplerConfig) -> Self {
        Self {
            store,
            source,
            interval: config.interval(),
            backoff:  config.backoff(),
            timeout:  config.timeout(),
        }
    }

    /// Take one sample and return how long to wait before the next tick.
    ///
    /// On success the sample is recorded and the regular interval returned.
    /// On failure nothing is recorded and the backoff is returned.
    pub async fn tick(&mut self) -> Duration {
        let result = match time::timeout(self.timeout, self.source.sample()).await {
            Ok(result) => result,
            Err(_) => Err(SampleError::Timeout(self.timeout)),
        };

        match result {
            Ok(sample) => {
                self.store.record(sample);
                debug!("{}: recorded {sample}", self.source.name());
                self.interval
            }
            Err(e) => {
                warn!(
                    "{}: sample failed: {e}; retrying in {:?}",
                    self.source.name(),
                    self.backoff
                );
                self.backoff
            }
        }
    }

    /// Sample forever.  Failures are logged and retried; this never returns.
    pub async fn run(mut self) {
        info!(
            "Sampling '{}' every {:?} (window of {})",
            self.source.name(),
            self.interval,
            self.store.capacity()
        );
        loop {
            let delay = self.tick().await;
            time::sleep(delay).await;
        }
    }
}

/// Spawn a background Tokio task that samples `source` into `store`.
pub fn spawn_sampler<S>(
    store: Arc<RollingTemperatureStore>,
    source: S,
    config: &SamplerConfig,
) -> JoinHandle<()>
where
    S: SampleSource + 'static,
{
    tokio::spawn(Sampler::new(store, source, config).run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tempmon_core::{Sample, Snapshot};

    /// Replays a fixed script, then fails forever.
    struct Scripted {
        steps: VecDeque<Result<Sample, SampleError>>,
    }

    impl Scripted {
        fn new(steps: impl IntoIterator<Item = Result<Sample, SampleError>>) -> Self {
            Self {
                steps: steps.into_iter().collect(),
            }
        }
    }

    impl SampleSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn sample(&mut self) -> Result<Sample, SampleError> {
            self.steps.pop_front().unwrap_or(Err(SampleError::Empty))
        }
    }

    /// Never answers.
    struct Stalled;

    impl SampleSource for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn sample(&mut self) -> Result<Sample, SampleError> {
            time::sleep(Duration::from_secs(3600)).await;
            Ok(0)
        }
    }

    fn config() -> SamplerConfig {
        SamplerConfig {
            interval_ms: 1_000,
            backoff_ms:  5_000,
            timeout_ms:  3_000,
            ..SamplerConfig::default()
        }
    }

    #[tokio::test]
    async fn failures_leave_store_untouched_until_success() {
        let store = Arc::new(RollingTemperatureStore::new(10));
        store.record(50);
        let before = store.snapshot();

        let source = Scripted::new([
            Err(SampleError::Empty),
            Err(SampleError::NoReading("gpu".into())),
            Err(SampleError::Empty),
            Ok(55),
        ]);
        let mut sampler = Sampler::new(Arc::clone(&store), source, &config());

        for _ in 0..3 {
            assert_eq!(sampler.tick().await, Duration::from_secs(5));
            assert_eq!(store.snapshot(), before);
        }

        assert_eq!(sampler.tick().await, Duration::from_secs(1));
        let after = store.snapshot();
        assert_eq!(after.current, 55);
        assert_eq!(after.history, vec![50, 55]);
    }

    #[tokio::test]
    async fn first_success_on_empty_store() {
        let store = Arc::new(RollingTemperatureStore::new(10));
        let mut sampler = Sampler::new(Arc::clone(&store), Scripted::new([Ok(42)]), &config());

        sampler.tick().await;
        assert_eq!(
            store.snapshot(),
            Snapshot {
                current: 42,
                minimum: 42,
                maximum: 42,
                history: vec![42],
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_source_times_out() {
        let store = Arc::new(RollingTemperatureStore::new(10));
        let mut sampler = Sampler::new(Arc::clone(&store), Stalled, &config());

        let started = time::Instant::now();
        assert_eq!(sampler.tick().await, Duration::from_secs(5));
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(3600));
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_loop_records_on_each_interval() {
        let store = Arc::new(RollingTemperatureStore::new(10));
        let handle = spawn_sampler(
            Arc::clone(&store),
            Scripted::new([Ok(40), Ok(41), Ok(43)]),
            &config(),
        );

        time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(store.snapshot().history, vec![40, 41]);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.snapshot().history, vec![40, 41, 43]);
        assert!(!handle.is_finished());

        handle.abort();
    }
}
