//! Protection settings addressed to one channel or sensor, cascaded over the coupled pair.
//!
//! While coupled every write lands on both channels. OVP and OPP levels are halved
//! since each channel only carries half of the stacked quantity, states and delays are
//! copied as they are. Temperature is not additive, so OTP values are never halved.

use fugit::MillisDurationU32;
use log::debug;

use crate::{
    channel::{Channel, TemperatureSensors, TopologyNotifier},
    coupling::{ChannelCoupling, Share, Targets},
    error::{Error, Result},
    protection::{ChannelProtection, SensorProtection},
    types::{State, TempSensor, Temperature},
};

impl<C: Channel, S: TemperatureSensors, N: TopologyNotifier, const CH: usize>
    ChannelCoupling<C, S, N, CH>
{
    /// Apply `edit` to the protection settings of every channel `channel` lands on.
    fn cascade(
        &mut self,
        channel: usize,
        edit: impl Fn(&mut ChannelProtection, Share),
    ) -> Result<()> {
        let targets = self.targets(channel)?;
        let share = match targets {
            Targets::Pair(_) => {
                debug!("Cascading protection write on channel {}", channel);
                Share::Half
            }
            Targets::One(_) => Share::Whole,
        };
        for &target in targets.as_slice() {
            edit(self.channel_at_mut(target).protection_mut(), share);
        }
        Ok(())
    }

    /// Apply `edit` to the protection settings of every sensor `sensor` lands on.
    fn cascade_sensor(&mut self, sensor: TempSensor, edit: impl Fn(&mut SensorProtection)) {
        let targets = self.sensor_targets(sensor);
        for &target in targets.as_slice() {
            edit(self.sensors_mut().sensor_protection_mut(target));
        }
    }

    /// Set over-voltage protection. Level in millivolts.
    pub fn set_ovp_parameters(
        &mut self,
        channel: usize,
        state: impl Into<State>,
        level_mv: u32,
        delay: MillisDurationU32,
    ) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, share| {
            protection.ovp.state = state;
            protection.ovp.level = share.of(level_mv);
            protection.ovp.delay = delay;
        })
    }

    pub fn set_ovp_state(&mut self, channel: usize, state: impl Into<State>) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, _| protection.ovp.state = state)
    }

    pub fn set_ovp_level(&mut self, channel: usize, level_mv: u32) -> Result<()> {
        self.cascade(channel, |protection, share| {
            protection.ovp.level = share.of(level_mv)
        })
    }

    pub fn set_ovp_delay(&mut self, channel: usize, delay: MillisDurationU32) -> Result<()> {
        self.cascade(channel, |protection, _| protection.ovp.delay = delay)
    }

    /// Set over-current protection. It trips on the channel entering CC, so there is no level.
    pub fn set_ocp_parameters(
        &mut self,
        channel: usize,
        state: impl Into<State>,
        delay: MillisDurationU32,
    ) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, _| {
            protection.ocp.state = state;
            protection.ocp.delay = delay;
        })
    }

    pub fn set_ocp_state(&mut self, channel: usize, state: impl Into<State>) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, _| protection.ocp.state = state)
    }

    pub fn set_ocp_delay(&mut self, channel: usize, delay: MillisDurationU32) -> Result<()> {
        self.cascade(channel, |protection, _| protection.ocp.delay = delay)
    }

    /// Set over-power protection. Level in milliwatts.
    pub fn set_opp_parameters(
        &mut self,
        channel: usize,
        state: impl Into<State>,
        level_mw: u32,
        delay: MillisDurationU32,
    ) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, share| {
            protection.opp.state = state;
            protection.opp.level = share.of(level_mw);
            protection.opp.delay = delay;
        })
    }

    pub fn set_opp_state(&mut self, channel: usize, state: impl Into<State>) -> Result<()> {
        let state = state.into();
        self.cascade(channel, |protection, _| protection.opp.state = state)
    }

    pub fn set_opp_level(&mut self, channel: usize, level_mw: u32) -> Result<()> {
        self.cascade(channel, |protection, share| {
            protection.opp.level = share.of(level_mw)
        })
    }

    pub fn set_opp_delay(&mut self, channel: usize, delay: MillisDurationU32) -> Result<()> {
        self.cascade(channel, |protection, _| protection.opp.delay = delay)
    }

    /// Set over-temperature protection of a sensor.
    pub fn set_otp_parameters(
        &mut self,
        sensor: TempSensor,
        state: impl Into<State>,
        level: impl Into<Temperature>,
        delay: MillisDurationU32,
    ) {
        let state = state.into();
        let level = level.into();
        self.cascade_sensor(sensor, |protection| {
            protection.state = state;
            protection.level = level;
            protection.delay = delay;
        })
    }

    /// Set over-temperature protection of the sensor mounted on `channel`.
    pub fn set_otp_parameters_for_channel(
        &mut self,
        channel: usize,
        state: impl Into<State>,
        level: impl Into<Temperature>,
        delay: MillisDurationU32,
    ) -> Result<()> {
        self.channel(channel)?;
        let sensor = self
            .config()
            .sensor_for_channel(channel)
            .ok_or(Error::NoSensorForChannel(channel))?;
        self.set_otp_parameters(sensor, state, level, delay);
        Ok(())
    }

    pub fn set_otp_state(&mut self, sensor: TempSensor, state: impl Into<State>) {
        let state = state.into();
        self.cascade_sensor(sensor, |protection| protection.state = state)
    }

    pub fn set_otp_level(&mut self, sensor: TempSensor, level: impl Into<Temperature>) {
        let level = level.into();
        self.cascade_sensor(sensor, |protection| protection.level = level)
    }

    pub fn set_otp_delay(&mut self, sensor: TempSensor, delay: MillisDurationU32) {
        self.cascade_sensor(sensor, |protection| protection.delay = delay)
    }

    /// Clear a tripped over-temperature protection.
    pub fn clear_otp_protection(&mut self, sensor: TempSensor) {
        let targets = self.sensor_targets(sensor);
        for &target in targets.as_slice() {
            self.sensors_mut().clear_sensor_protection(target);
        }
    }

    /// Clear any tripped protection.
    pub fn clear_protection(&mut self, channel: usize) -> Result<()> {
        let targets = self.targets(channel)?;
        for &target in targets.as_slice() {
            self.channel_at_mut(target).clear_protection();
        }
        Ok(())
    }

    /// Disarm every protection.
    pub fn disable_protection(&mut self, channel: usize) -> Result<()> {
        let targets = self.targets(channel)?;
        for &target in targets.as_slice() {
            self.channel_at_mut(target).disable_protection();
        }
        Ok(())
    }
}
