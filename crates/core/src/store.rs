use crate::state::{Sample, Snapshot};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fixed-capacity rolling window of samples with running min/max.
///
/// One writer (the sampler) calls [`record`](Self::record); any number of
/// readers call [`snapshot`](Self::snapshot). A single mutex guards the whole
/// state so a reader never sees half of an update.
///
/// Extrema are updated on insertion only. When the sample holding the
/// minimum or maximum falls out of the window the reported value stays
/// where it was until a new sample goes past it.
#[derive(Debug)]
pub struct RollingTemperatureStore {
    inner:    Mutex<Window>,
    capacity: usize,
}

#[derive(Debug)]
struct Window {
    current: Sample,
    minimum: Sample,
    maximum: Sample,
    samples: VecDeque<Sample>,
    seeded:  bool,
}

impl RollingTemperatureStore {
    /// Create an empty store holding at most `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Window {
                current: 0,
                minimum: 0,
                maximum: 0,
                samples: VecDeque::with_capacity(capacity),
                seeded:  false,
            }),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn record(&self, sample: Sample) {
        let mut w = self.lock();

        w.current = sample;
        if w.seeded {
            w.minimum = w.minimum.min(sample);
            w.maximum = w.maximum.max(sample);
        } else {
            w.minimum = sample;
            w.maximum = sample;
            w.seeded = true;
        }

        if w.samples.len() == self.capacity {
            w.samples.pop_front();
        }
        w.samples.push_back(sample);
    }

    /// Independent copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let w = self.lock();
        Snapshot {
            current: w.current,
            minimum: w.minimum,
            maximum: w.maximum,
            history: w.samples.iter().copied().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every critical section leaves the window consistent, so a panic in
    // another holder cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, Window> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
