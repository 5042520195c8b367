//! We use this mocking module in unit tests to emulate the channel driver and
//! the temperature subsystem.

use strum::EnumCount;

use crate::{
    channel::{Channel, Levels, PowerLevels, TemperatureSensors},
    protection::{ChannelProtection, SensorProtection},
    types::{Features, TempSensor},
};

/// Everything the coupling layer asked a channel to do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCall {
    OutputEnable(bool),
    RemoteProgramming(bool),
    LowRipple(bool),
    LowRippleAuto(bool),
    SetVoltage(u32),
    SetVoltageLimit(u32),
    SetCurrent(u32),
    SetCurrentLimit(u32),
    SetPowerLimit(u32),
    ClearProtection,
    DisableProtection,
}

/// Our mock type used to emulate a physical channel.
pub struct MockChannel {
    pub operational: bool,
    pub features: Features,
    pub voltage: Levels,
    pub current: Levels,
    pub power: PowerLevels,
    pub protection: ChannelProtection,
    pub output_enabled: bool,
    pub remote_programming: bool,
    pub low_ripple: bool,
    pub low_ripple_auto: bool,
    /// Simulate a channel which refuses low-ripple even though it has the feature.
    pub refuse_low_ripple: bool,
    calls: heapless::Vec<ChannelCall, 32>,
}

impl MockChannel {
    /// A healthy 40V / 5A / 155W channel with every optional feature fitted.
    pub fn new() -> Self {
        Self {
            operational: true,
            features: Features::new()
                .with_remote_programming(true)
                .with_low_ripple(true),
            voltage: Levels {
                max: 40_000,
                limit: 40_000,
                max_limit: 40_000,
                ..Default::default()
            },
            current: Levels {
                max: 5_000,
                limit: 5_000,
                max_limit: 5_000,
                ..Default::default()
            },
            power: PowerLevels {
                limit: 155_000,
                max: 155_000,
                opp_min: 1_000,
                opp_max: 155_000,
                opp_default: 155_000,
            },
            protection: ChannelProtection::default(),
            output_enabled: false,
            remote_programming: false,
            low_ripple: false,
            low_ripple_auto: false,
            refuse_low_ripple: false,
            calls: heapless::Vec::new(),
        }
    }

    /// Same as [`Self::new`] but without the optional features.
    pub fn basic() -> Self {
        Self {
            features: Features::new(),
            ..Self::new()
        }
    }

    /// Get the calls made on this channel so far.
    pub fn calls(&self) -> &[ChannelCall] {
        &self.calls
    }

    /// Clear the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: ChannelCall) {
        self.calls.push(call).expect("call log full");
    }
}

impl Channel for MockChannel {
    fn is_operational(&self) -> bool {
        self.operational
    }

    fn features(&self) -> Features {
        self.features
    }

    fn voltage(&self) -> Levels {
        self.voltage
    }

    fn current(&self) -> Levels {
        self.current
    }

    fn power(&self) -> PowerLevels {
        self.power
    }

    fn protection(&self) -> &ChannelProtection {
        &self.protection
    }

    fn protection_mut(&mut self) -> &mut ChannelProtection {
        &mut self.protection
    }

    fn set_voltage_mv(&mut self, voltage_mv: u32) {
        self.record(ChannelCall::SetVoltage(voltage_mv));
        self.voltage.set = voltage_mv;
    }

    fn set_voltage_limit_mv(&mut self, limit_mv: u32) {
        self.record(ChannelCall::SetVoltageLimit(limit_mv));
        self.voltage.limit = limit_mv;
    }

    fn set_current_ma(&mut self, current_ma: u32) {
        self.record(ChannelCall::SetCurrent(current_ma));
        self.current.set = current_ma;
    }

    fn set_current_limit_ma(&mut self, limit_ma: u32) {
        self.record(ChannelCall::SetCurrentLimit(limit_ma));
        self.current.limit = limit_ma;
    }

    fn set_power_limit_mw(&mut self, limit_mw: u32) {
        self.record(ChannelCall::SetPowerLimit(limit_mw));
        self.power.limit = limit_mw;
    }

    fn output_enable(&mut self, enable: bool) {
        self.record(ChannelCall::OutputEnable(enable));
        self.output_enabled = enable;
    }

    fn remote_programming_enable(&mut self, enable: bool) {
        self.record(ChannelCall::RemoteProgramming(enable));
        self.remote_programming = enable;
    }

    fn low_ripple_enable(&mut self, enable: bool) -> bool {
        self.record(ChannelCall::LowRipple(enable));
        if !self.features.low_ripple() || self.refuse_low_ripple {
            return false;
        }
        self.low_ripple = enable;
        true
    }

    fn low_ripple_auto_enable(&mut self, enable: bool) {
        self.record(ChannelCall::LowRippleAuto(enable));
        self.low_ripple_auto = enable;
    }

    fn clear_protection(&mut self) {
        self.record(ChannelCall::ClearProtection);
    }

    fn disable_protection(&mut self) {
        self.record(ChannelCall::DisableProtection);
        self.protection.ovp.state = false.into();
        self.protection.ocp.state = false.into();
        self.protection.opp.state = false.into();
    }
}

/// Our mock type used to emulate the temperature protection registry.
pub struct MockSensors {
    pub protection: [SensorProtection; TempSensor::COUNT],
    pub cleared: [bool; TempSensor::COUNT],
}

impl MockSensors {
    pub fn new() -> Self {
        Self {
            protection: [SensorProtection::default(); TempSensor::COUNT],
            cleared: [false; TempSensor::COUNT],
        }
    }
}

impl TemperatureSensors for MockSensors {
    fn sensor_protection(&self, sensor: TempSensor) -> SensorProtection {
        self.protection[sensor.index()]
    }

    fn sensor_protection_mut(&mut self, sensor: TempSensor) -> &mut SensorProtection {
        &mut self.protection[sensor.index()]
    }

    fn clear_sensor_protection(&mut self, sensor: TempSensor) {
        self.cleared[sensor.index()] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mock_channel() {
        let mock = MockChannel::new();
        assert!(mock.calls().is_empty());
        assert!(mock.is_operational());
        assert!(mock.features().low_ripple());
        assert!(!mock.output_enabled);
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let mut mock = MockChannel::new();
        mock.output_enable(true);
        mock.set_voltage_mv(5_000);

        assert_eq!(
            mock.calls(),
            &[ChannelCall::OutputEnable(true), ChannelCall::SetVoltage(5_000)]
        );
        assert_eq!(mock.voltage().set, 5_000);

        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_low_ripple_without_feature() {
        let mut mock = MockChannel::basic();
        assert!(!mock.low_ripple_enable(true));
        assert!(!mock.low_ripple);
        // The attempt is still visible.
        assert_eq!(mock.calls(), &[ChannelCall::LowRipple(true)]);
    }

    #[test]
    fn test_sensor_clear() {
        let mut sensors = MockSensors::new();
        sensors.clear_sensor_protection(TempSensor::Ch2);
        assert_eq!(sensors.cleared, [false, false, true]);
    }
}
