//! Output enable and low-ripple control of the coupled pair.

use log::debug;

use crate::{
    channel::{Channel, TemperatureSensors, TopologyNotifier},
    coupling::ChannelCoupling,
    error::Result,
};

impl<C: Channel, S: TemperatureSensors, N: TopologyNotifier, const CH: usize>
    ChannelCoupling<C, S, N, CH>
{
    /// Enable/disable the output.
    pub fn output_enable(&mut self, channel: usize, enable: bool) -> Result<()> {
        let targets = self.targets(channel)?;
        for &target in targets.as_slice() {
            self.channel_at_mut(target).output_enable(enable);
        }
        Ok(())
    }

    /// Whether low-ripple mode can be used. A coupled pair needs it on both channels.
    pub fn is_low_ripple_allowed(&self, channel: usize) -> Result<bool> {
        let targets = self.targets(channel)?;
        Ok(targets
            .as_slice()
            .iter()
            .all(|&target| self.channel_at(target).features().low_ripple()))
    }

    /// Enable/disable low-ripple mode.
    ///
    /// A coupled pair always has both channels attempted. Returns `true` only if every
    /// channel accepted.
    pub fn low_ripple_enable(&mut self, channel: usize, enable: bool) -> Result<bool> {
        let targets = self.targets(channel)?;
        let mut accepted = true;
        for &target in targets.as_slice() {
            // Every channel is attempted, even after a refusal.
            let ok = self.channel_at_mut(target).low_ripple_enable(enable);
            if !ok {
                debug!("Channel {} refused low-ripple {}", target, enable);
            }
            accepted &= ok;
        }
        Ok(accepted)
    }

    /// Let the channel switch low-ripple mode on and off by itself.
    ///
    /// __Note:__ An uncoupled channel gets its *output* enabled or disabled instead of
    /// the auto mode.
    pub fn low_ripple_auto_enable(&mut self, channel: usize, enable: bool) -> Result<()> {
        match self.resolve_pair(channel) {
            Some(pair) => {
                for target in pair {
                    self.channel_at_mut(target).low_ripple_auto_enable(enable);
                }
            }
            None => self.channel_mut(channel)?.output_enable(enable),
        }
        Ok(())
    }
}
