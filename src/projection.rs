//! Maps logical set points, readings and limits onto the physical channel pair.
//!
//! In series the voltages of both channels add up, in parallel the currents do. The
//! pair's ceiling is bounded by the weaker channel, doubled. A quantity the mode does
//! not stack is kept equal on both channels by its setter, so reading it back from
//! the addressed channel alone is enough.

use crate::{
    channel::{Channel, TemperatureSensors, TopologyNotifier},
    coupling::{ChannelCoupling, Share, Targets},
    error::Result,
    types::CouplingMode,
};

/// Which electrical quantity a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantity {
    Voltage,
    Current,
    Power,
}

impl Quantity {
    /// Whether `mode` stacks this quantity over both channels of the pair.
    const fn is_stacked(self, mode: CouplingMode) -> bool {
        match self {
            Quantity::Voltage => matches!(mode, CouplingMode::Series),
            Quantity::Current => matches!(mode, CouplingMode::Parallel),
            Quantity::Power => mode.is_coupled(),
        }
    }
}

/// How a stacked reading is derived from the two physical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    /// Set points, measurements, defaults and protection levels.
    Sum,
    /// Ceilings, the weaker channel decides.
    TwiceMin,
    /// Floors, the stronger channel decides.
    TwiceMax,
}

impl Combine {
    /// Saturates at `u32::MAX`.
    fn apply(self, first: u32, second: u32) -> u32 {
        match self {
            Combine::Sum => first.saturating_add(second),
            Combine::TwiceMin => first.min(second).saturating_mul(2),
            Combine::TwiceMax => first.max(second).saturating_mul(2),
        }
    }
}

impl<C: Channel, S: TemperatureSensors, N: TopologyNotifier, const CH: usize>
    ChannelCoupling<C, S, N, CH>
{
    fn project(
        &self,
        channel: usize,
        quantity: Quantity,
        combine: Combine,
        read: impl Fn(&C) -> u32,
    ) -> Result<u32> {
        let addressed = self.channel(channel)?;
        match self.resolve_pair(channel) {
            Some([first, second]) if quantity.is_stacked(self.get_type()) => Ok(combine.apply(
                read(self.channel_at(first)),
                read(self.channel_at(second)),
            )),
            _ => Ok(read(addressed)),
        }
    }

    fn distribute(
        &mut self,
        channel: usize,
        quantity: Quantity,
        value: u32,
        write: impl Fn(&mut C, u32),
    ) -> Result<()> {
        let targets = self.targets(channel)?;
        let share = match targets {
            Targets::Pair(_) if quantity.is_stacked(self.get_type()) => Share::Half,
            _ => Share::Whole,
        };
        for &target in targets.as_slice() {
            write(self.channel_at_mut(target), share.of(value));
        }
        Ok(())
    }

    /// Program `channel` alone with its part of the coupling-aware minimum.
    ///
    /// A stacked quantity gets half of the pair minimum, the other one the
    /// channel's own minimum.
    pub(crate) fn reset_to_minimum(&mut self, channel: usize) -> Result<()> {
        let paired = self.resolve_pair(channel).is_some();
        let mode = self.get_type();
        let share = |quantity: Quantity| match paired && quantity.is_stacked(mode) {
            true => Share::Half,
            false => Share::Whole,
        };
        let u_min = share(Quantity::Voltage).of(self.u_min_mv(channel)?);
        let i_min = share(Quantity::Current).of(self.i_min_ma(channel)?);

        let target = self.channel_mut(channel)?;
        target.set_voltage_mv(u_min);
        target.set_current_ma(i_min);
        Ok(())
    }

    /// Get the output voltage set point in millivolts.
    pub fn u_set_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::Sum, |c| c.voltage().set)
    }

    /// Return the measured output voltage in millivolts.
    pub fn u_mon_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::Sum, |c| c.voltage().mon)
    }

    /// Return the voltage measured back from the DAC in millivolts.
    pub fn u_mon_dac_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::Sum, |c| {
            c.voltage().mon_dac
        })
    }

    pub fn u_limit_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::TwiceMin, |c| {
            c.voltage().limit
        })
    }

    pub fn u_max_limit_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::TwiceMin, |c| {
            c.voltage().max_limit
        })
    }

    pub fn u_min_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::TwiceMax, |c| {
            c.voltage().min
        })
    }

    pub fn u_def_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::Sum, |c| c.voltage().def)
    }

    pub fn u_max_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::TwiceMin, |c| {
            c.voltage().max
        })
    }

    /// Get the OVP trip level in millivolts.
    pub fn u_protection_level_mv(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Voltage, Combine::Sum, |c| {
            c.protection().ovp.level
        })
    }

    /// Set the output voltage. Value supplied in millivolts.
    pub fn set_voltage_mv(&mut self, channel: usize, voltage_mv: u32) -> Result<()> {
        self.distribute(channel, Quantity::Voltage, voltage_mv, |c, v| {
            c.set_voltage_mv(v)
        })
    }

    /// Set the user voltage limit. Value supplied in millivolts.
    pub fn set_voltage_limit_mv(&mut self, channel: usize, limit_mv: u32) -> Result<()> {
        self.distribute(channel, Quantity::Voltage, limit_mv, |c, v| {
            c.set_voltage_limit_mv(v)
        })
    }

    /// Get the output current set point in milliamps.
    pub fn i_set_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::Sum, |c| c.current().set)
    }

    /// Return the measured output current in milliamps.
    pub fn i_mon_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::Sum, |c| c.current().mon)
    }

    pub fn i_mon_dac_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::Sum, |c| {
            c.current().mon_dac
        })
    }

    pub fn i_limit_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::TwiceMin, |c| {
            c.current().limit
        })
    }

    pub fn i_max_limit_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::TwiceMin, |c| {
            c.current().max_limit
        })
    }

    pub fn i_min_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::TwiceMax, |c| {
            c.current().min
        })
    }

    pub fn i_def_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::Sum, |c| c.current().def)
    }

    pub fn i_max_ma(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Current, Combine::TwiceMin, |c| {
            c.current().max
        })
    }

    /// Set the output current. Value supplied in milliamps.
    pub fn set_current_ma(&mut self, channel: usize, current_ma: u32) -> Result<()> {
        self.distribute(channel, Quantity::Current, current_ma, |c, i| {
            c.set_current_ma(i)
        })
    }

    /// Set the user current limit. Value supplied in milliamps.
    pub fn set_current_limit_ma(&mut self, channel: usize, limit_ma: u32) -> Result<()> {
        self.distribute(channel, Quantity::Current, limit_ma, |c, i| {
            c.set_current_limit_ma(i)
        })
    }

    /// Get the user power limit in milliwatts.
    pub fn power_limit_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::TwiceMin, |c| c.power().limit)
    }

    /// The power limit can always go down to zero.
    pub fn power_min_limit_mw(&self, channel: usize) -> Result<u32> {
        self.channel(channel)?;
        Ok(0)
    }

    /// Get the rated power (PTOT) in milliwatts.
    pub fn power_max_limit_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::TwiceMin, |c| c.power().max)
    }

    pub fn power_default_limit_mw(&self, channel: usize) -> Result<u32> {
        self.power_max_limit_mw(channel)
    }

    /// Get the OPP trip level in milliwatts.
    pub fn power_protection_level_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::Sum, |c| {
            c.protection().opp.level
        })
    }

    pub fn opp_min_level_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::TwiceMax, |c| {
            c.power().opp_min
        })
    }

    pub fn opp_max_level_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::TwiceMin, |c| {
            c.power().opp_max
        })
    }

    pub fn opp_default_level_mw(&self, channel: usize) -> Result<u32> {
        self.project(channel, Quantity::Power, Combine::Sum, |c| {
            c.power().opp_default
        })
    }

    /// Set the user power limit. Value supplied in milliwatts.
    pub fn set_power_limit_mw(&mut self, channel: usize, limit_mw: u32) -> Result<()> {
        self.distribute(channel, Quantity::Power, limit_mw, |c, p| {
            c.set_power_limit_mw(p)
        })
    }
}
