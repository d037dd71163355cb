use crate::{SampleError, SampleSource};
use sysinfo::Components;
use tempmon_core::Sample;

/// Reads one hardware temperature sensor through `sysinfo`, for hosts
/// without a vendor tool.
pub struct ComponentSource {
    label:      String,
    components: Components,
}

impl ComponentSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label:      label.into(),
            components: Components::new_with_refreshed_list(),
        }
    }

    /// Labels of every sensor found on this machine.
    pub fn available_labels(&self) -> Vec<String> {
        self.components
            .list()
            .iter()
            .map(|c| c.label().to_string())
            .collect()
    }

    fn read(&mut self) -> Result<Sample, SampleError> {
        self.components.refresh(false); // false = keep existing component list

        let component = self
            .components
            .list()
            .iter()
            .find(|c| c.label() == self.label)
            .ok_or_else(|| SampleError::NoComponent(self.label.clone()))?;

        component
            .temperature()
            .filter(|t| t.is_finite())
            .map(|t| t.round() as Sample)
            .ok_or_else(|| SampleError::NoReading(self.label.clone()))
    }
}

impl SampleSource for ComponentSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn sample(&mut self) -> Result<Sample, SampleError> {
        self.read()
    }
}
