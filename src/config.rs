//! Static configuration of the coupled pair.

use crate::{
    error::{Error, Result},
    types::TempSensor,
};

/// Use [`CouplingConfigBuilder`] to create a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouplingConfig {
    /// Temperature sensors mounted on channel 0 and channel 1, in that order.
    pair_sensors: [TempSensor; 2],
    /// Switch off remote programming on capable channels when the mode changes.
    disable_remote_programming: bool,
    /// Switch off low-ripple mode on capable channels when the mode changes.
    disable_low_ripple: bool,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        CouplingConfig {
            pair_sensors: [TempSensor::Ch1, TempSensor::Ch2],
            disable_remote_programming: true,
            disable_low_ripple: true,
        }
    }
}

impl CouplingConfig {
    pub fn pair_sensors(&self) -> [TempSensor; 2] {
        self.pair_sensors
    }

    /// Whether `sensor` is one of the two sensors tied to the coupled pair.
    pub fn is_pair_sensor(&self, sensor: TempSensor) -> bool {
        self.pair_sensors.contains(&sensor)
    }

    /// The sensor mounted on a physical channel of the pair.
    pub fn sensor_for_channel(&self, channel: usize) -> Option<TempSensor> {
        self.pair_sensors.get(channel).copied()
    }

    pub fn disable_remote_programming(&self) -> bool {
        self.disable_remote_programming
    }

    pub fn disable_low_ripple(&self) -> bool {
        self.disable_low_ripple
    }
}

/// Use this type to create a [`CouplingConfig`].
#[derive(Debug, Default)]
pub struct CouplingConfigBuilder {
    config: CouplingConfig,
}

impl CouplingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let's build it!
    pub fn build(self) -> Result<CouplingConfig> {
        let [first, second] = self.config.pair_sensors;
        if first == second {
            return Err(Error::InvalidConfig);
        }
        Ok(self.config)
    }

    /// Set the sensors mounted on channel 0 and channel 1.
    pub fn with_pair_sensors(mut self, channel_0: TempSensor, channel_1: TempSensor) -> Self {
        self.config.pair_sensors = [channel_0, channel_1];
        self
    }

    /// Keep remote programming as it is across mode changes.
    pub fn keep_remote_programming(mut self) -> Self {
        self.config.disable_remote_programming = false;
        self
    }

    /// Keep low-ripple mode as it is across mode changes.
    pub fn keep_low_ripple(mut self) -> Self {
        self.config.disable_low_ripple = false;
        self
    }
}
