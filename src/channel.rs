//! Interfaces to the collaborators the coupling layer drives: the physical channel
//! driver, the temperature protection registry and whoever needs to hear about
//! topology changes.

use heapless::Deque;

use crate::{
    protection::{ChannelProtection, SensorProtection},
    types::{CouplingMode, Features, TempSensor},
};

/// Programmed and measured values of one electrical quantity on one channel.
///
/// Voltages are in millivolts and currents in milliamps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    /// Programmed set point.
    pub set: u32,
    /// Measured by the ADC.
    pub mon: u32,
    /// Measured back from the DAC output.
    pub mon_dac: u32,
    pub min: u32,
    pub max: u32,
    /// Value loaded on reset.
    pub def: u32,
    /// User limit, never above `max_limit`.
    pub limit: u32,
    pub max_limit: u32,
}

/// Power ceiling and OPP level range of one channel, all in milliwatts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PowerLevels {
    /// User power limit.
    pub limit: u32,
    /// Rated total power (PTOT).
    pub max: u32,
    pub opp_min: u32,
    pub opp_max: u32,
    pub opp_default: u32,
}

/// One physical output channel.
///
/// Implemented by the channel driver. The coupling layer only reads values and
/// writes set points and protection settings, it never talks to hardware itself.
pub trait Channel {
    /// Whether the channel passed its self test and is not in a fault state.
    fn is_operational(&self) -> bool;

    /// Optional hardware fitted to this channel.
    fn features(&self) -> Features;

    fn voltage(&self) -> Levels;

    fn current(&self) -> Levels;

    fn power(&self) -> PowerLevels;

    fn protection(&self) -> &ChannelProtection;

    fn protection_mut(&mut self) -> &mut ChannelProtection;

    fn set_voltage_mv(&mut self, voltage_mv: u32);

    fn set_voltage_limit_mv(&mut self, limit_mv: u32);

    fn set_current_ma(&mut self, current_ma: u32);

    fn set_current_limit_ma(&mut self, limit_ma: u32);

    fn set_power_limit_mw(&mut self, limit_mw: u32);

    fn output_enable(&mut self, enable: bool);

    fn remote_programming_enable(&mut self, enable: bool);

    /// Returns `false` if the channel refused, e.g. because the feature is missing
    /// or the present output current is too high for low-ripple operation.
    fn low_ripple_enable(&mut self, enable: bool) -> bool;

    fn low_ripple_auto_enable(&mut self, enable: bool);

    /// Clear any tripped protection.
    fn clear_protection(&mut self);

    /// Disarm every protection of the channel.
    fn disable_protection(&mut self);
}

/// Per-sensor over-temperature protection, owned by the temperature subsystem.
pub trait TemperatureSensors {
    fn sensor_protection(&self, sensor: TempSensor) -> SensorProtection;

    fn sensor_protection_mut(&mut self, sensor: TempSensor) -> &mut SensorProtection;

    /// Clear a tripped over-temperature protection.
    fn clear_sensor_protection(&mut self, sensor: TempSensor);
}

/// Told about every coupling change, once the new mode has been fully applied.
pub trait TopologyNotifier {
    fn coupling_changed(&mut self, mode: CouplingMode);
}

/// For setups where nobody needs to be told.
impl TopologyNotifier for () {
    fn coupling_changed(&mut self, _mode: CouplingMode) {}
}

/// Keeps the last `N` coupling changes so the display and bus tasks can poll them.
#[derive(Debug, Default)]
pub struct TopologyLog<const N: usize = 4> {
    events: Deque<CouplingMode, N>,
}

impl<const N: usize> TopologyLog<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Take the oldest unread change.
    pub fn pop(&mut self) -> Option<CouplingMode> {
        self.events.pop_front()
    }

    /// The most recent change, without consuming anything.
    pub fn latest(&self) -> Option<CouplingMode> {
        self.events.back().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<const N: usize> TopologyNotifier for TopologyLog<N> {
    fn coupling_changed(&mut self, mode: CouplingMode) {
        if self.events.is_full() {
            // Oldest entry is dropped, readers only care about recent history.
            self.events.pop_front();
        }
        // Cannot fail, room was made above.
        let _ = self.events.push_back(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_log_keeps_latest() {
        let mut log: TopologyLog<2> = TopologyLog::new();
        assert!(log.is_empty());

        log.coupling_changed(CouplingMode::Series);
        log.coupling_changed(CouplingMode::None);
        log.coupling_changed(CouplingMode::Parallel);

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest(), Some(CouplingMode::Parallel));
        assert_eq!(log.pop(), Some(CouplingMode::None));
        assert_eq!(log.pop(), Some(CouplingMode::Parallel));
        assert_eq!(log.pop(), None);
    }
}
