use tracing::info;

use crate::config::SensorConfig;
use crate::sensors::{SensorDataset, SensorGenerator};

/// Holds the sensor dataset shown by the dashboard.
///
/// The dataset is generated lazily on first access and only replaced when
/// [`DashboardState::regenerate`] is called, so repeated views of the same
/// session see the same readings.
pub struct DashboardState {
    generator: SensorGenerator,
    dataset: Option<SensorDataset>,
    generation: u32,
}

impl DashboardState {
    pub fn new(config: SensorConfig) -> Self {
        Self {
            generator: SensorGenerator::new(config),
            dataset: None,
            generation: 0,
        }
    }

    /// Starts from an existing dataset instead of generating one.
    pub fn with_dataset(config: SensorConfig, dataset: SensorDataset) -> Self {
        Self {
            generator: SensorGenerator::new(config),
            dataset: Some(dataset),
            generation: 1,
        }
    }

    pub fn sensor_data(&mut self) -> &SensorDataset {
        if self.dataset.is_none() {
            return self.regenerate();
        }
        self.dataset.get_or_insert_with(|| self.generator.generate())
    }

    pub fn regenerate(&mut self) -> &SensorDataset {
        self.generation += 1;
        info!("Generating sensor dataset #{}", self.generation);
        self.dataset.insert(self.generator.generate())
    }

    /// How many datasets this state has produced (or adopted).
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
