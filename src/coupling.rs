use log::{info, warn};

use crate::{
    channel::{Channel, TemperatureSensors, TopologyNotifier},
    config::CouplingConfig,
    error::{Error, Result},
    protection::merge_pair,
    types::{CouplingMode, TempSensor},
};

/// Physical channels which can be coupled, primary first.
pub(crate) const PAIR: [usize; 2] = [0, 1];

/// The channels or sensors an addressed operation lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Targets<T = usize> {
    One([T; 1]),
    Pair([T; 2]),
}

impl<T> Targets<T> {
    pub(crate) fn as_slice(&self) -> &[T] {
        match self {
            Targets::One(channel) => channel,
            Targets::Pair(pair) => pair,
        }
    }
}

/// How much of a logical value each physical channel receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Share {
    Whole,
    Half,
}

impl Share {
    pub(crate) const fn of(self, value: u32) -> u32 {
        match self {
            Share::Whole => value,
            Share::Half => value / 2,
        }
    }
}

/// Owns the coupling mode together with the channels, sensors and notifier it governs.
///
/// Every operation takes a channel index as the "addressed" channel. While coupled,
/// channels 0 and 1 behave as one output and it does not matter which of the two is
/// addressed.
///
/// For its methods, "get" means reading back a logical value and "set" means writing
/// one, which may fan out to both physical channels.
pub struct ChannelCoupling<C, S, N, const CH: usize = 2> {
    mode: CouplingMode,
    channels: [C; CH],
    sensors: S,
    notifier: N,
    config: CouplingConfig,
}

impl<C: Channel, S: TemperatureSensors, N: TopologyNotifier, const CH: usize>
    ChannelCoupling<C, S, N, CH>
{
    /// Create an uncoupled instance. Nothing is written to the channels.
    pub fn new(channels: [C; CH], sensors: S, notifier: N, config: CouplingConfig) -> Self {
        Self {
            mode: CouplingMode::None,
            channels,
            sensors,
            notifier,
            config,
        }
    }

    /// Return the active coupling mode.
    pub fn get_type(&self) -> CouplingMode {
        self.mode
    }

    /// Couple or decouple channels 0 and 1.
    ///
    /// Both channels get their outputs switched off, remote programming and
    /// low-ripple disabled, set points reset to the coupled minimum and their
    /// protection settings (and those of their temperature sensors) merged, so the
    /// pair is never more permissive than either channel was on its own. The
    /// notifier is told once everything has been applied.
    ///
    /// Setting the active mode again does nothing.
    pub fn set_type(&mut self, mode: CouplingMode) -> Result<()> {
        if self.mode == mode {
            return Ok(());
        }

        if CH < 2 {
            warn!("Channel coupling {:?} refused, only {} channel(s)", mode, CH);
            return Err(Error::NotEnoughChannels);
        }

        for channel in PAIR {
            if !self.channels[channel].is_operational() {
                warn!(
                    "Channel coupling {:?} refused, channel {} not operational",
                    mode, channel
                );
                return Err(Error::ChannelNotOperational(channel));
            }
        }

        // Snapshot both sides before anything is written.
        let channel_protection = merge_pair(
            *self.channels[0].protection(),
            *self.channels[1].protection(),
        );
        let [sensor_0, sensor_1] = self.config.pair_sensors();
        let sensor_protection = merge_pair(
            self.sensors.sensor_protection(sensor_0),
            self.sensors.sensor_protection(sensor_1),
        );

        let previous = self.mode;
        self.mode = mode;

        for channel in PAIR {
            self.reset_channel(channel);
        }

        for channel in PAIR {
            self.reset_to_minimum(channel)?;
        }

        for (channel, protection) in PAIR.into_iter().zip(channel_protection) {
            *self.channels[channel].protection_mut() = protection;
        }
        for (sensor, protection) in [sensor_0, sensor_1].into_iter().zip(sensor_protection) {
            *self.sensors.sensor_protection_mut(sensor) = protection;
        }

        info!("Channel coupling changed from {:?} to {:?}", previous, mode);
        self.notifier.coupling_changed(mode);
        Ok(())
    }

    /// Switch off the output and everything which must not survive a mode change.
    fn reset_channel(&mut self, channel: usize) {
        let disable_remote_programming = self.config.disable_remote_programming();
        let disable_low_ripple = self.config.disable_low_ripple();
        let channel = &mut self.channels[channel];

        channel.output_enable(false);
        let features = channel.features();
        if disable_remote_programming && features.remote_programming() {
            channel.remote_programming_enable(false);
        }
        if disable_low_ripple && features.low_ripple() {
            channel.low_ripple_enable(false);
        }
    }

    /// Return the physical channels an operation addressed to `channel` lands on.
    pub(crate) fn targets(&self, channel: usize) -> Result<Targets> {
        self.channel(channel)?;
        Ok(match self.resolve_pair(channel) {
            Some(pair) => Targets::Pair(pair),
            None => Targets::One([channel]),
        })
    }

    /// The coupled pair `channel` belongs to, if any.
    ///
    /// Channels beyond the pair always stand on their own.
    pub(crate) fn resolve_pair(&self, channel: usize) -> Option<[usize; 2]> {
        (self.mode.is_coupled() && PAIR.contains(&channel)).then_some(PAIR)
    }

    /// The sensors an OTP operation addressed to `sensor` lands on.
    pub(crate) fn sensor_targets(&self, sensor: TempSensor) -> Targets<TempSensor> {
        if self.mode.is_coupled() && self.config.is_pair_sensor(sensor) {
            Targets::Pair(self.config.pair_sensors())
        } else {
            Targets::One([sensor])
        }
    }

    /// Get a physical channel.
    pub fn channel(&self, channel: usize) -> Result<&C> {
        self.channels
            .get(channel)
            .ok_or(Error::InvalidChannel(channel))
    }

    /// Get a physical channel for driver-level access, e.g. updating measurements.
    ///
    /// __Note:__ Writes made through this bypass coupling entirely.
    pub fn channel_mut(&mut self, channel: usize) -> Result<&mut C> {
        self.channels
            .get_mut(channel)
            .ok_or(Error::InvalidChannel(channel))
    }

    pub(crate) fn channel_at(&self, channel: usize) -> &C {
        &self.channels[channel]
    }

    pub(crate) fn channel_at_mut(&mut self, channel: usize) -> &mut C {
        &mut self.channels[channel]
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub(crate) fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    /// Split back into the owned collaborators.
    pub fn into_parts(self) -> ([C; CH], S, N) {
        (self.channels, self.sensors, self.notifier)
    }
}
