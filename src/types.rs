//! This module contains the value types shared by the coupling layer and its collaborators.

use core::ops::BitOr;

use modular_bitfield::prelude::*;
use strum_macros::{EnumCount, EnumIter};

/// How channels 0 and 1 are wired together.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum CouplingMode {
    /// Channels are independent.
    #[default]
    None,
    /// Currents add, voltages are tied equal.
    Parallel,
    /// Voltages add, currents are tied equal.
    Series,
}

impl CouplingMode {
    /// Whether channels 0 and 1 act as a single logical output.
    pub const fn is_coupled(&self) -> bool {
        !matches!(self, CouplingMode::None)
    }
}

/// Used to be less ambiguous about whether something is on or off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    /// Disabled.
    #[default]
    Off,
    /// Enabled.
    On,
}

impl From<State> for bool {
    fn from(value: State) -> Self {
        match value {
            State::Off => false,
            State::On => true,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::On,
            false => State::Off,
        }
    }
}

/// A protection that is armed on either side stays armed.
impl BitOr for State {
    type Output = State;

    fn bitor(self, rhs: Self) -> Self::Output {
        State::from(bool::from(self) || bool::from(rhs))
    }
}

/// Simple type to represent temperature depending on the unit used.
///
/// Levels in different units compare correctly, see [`Temperature::is_below`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperature {
    Fahrenheit(u16),
    Celsius(u16),
}

impl Temperature {
    /// Whether this temperature trips earlier than `other`, regardless of unit.
    pub fn is_below(&self, other: &Temperature) -> bool {
        self.as_celsius_tenths() < other.as_celsius_tenths()
    }

    /// Tenths of a degree celsius, used for comparisons across units.
    fn as_celsius_tenths(&self) -> i32 {
        match *self {
            Self::Celsius(inner) => inner as i32 * 10,
            Self::Fahrenheit(inner) => ((inner as i32 * 10 - 320) * 5) / 9,
        }
    }
}

/// Temperature sensors known to the protection registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount)]
#[repr(usize)]
pub enum TempSensor {
    /// Main heatsink sensor. Not tied to any output.
    Main = 0,
    /// Sensor on the first output, physical channel 0.
    Ch1 = 1,
    /// Sensor on the second output, physical channel 1.
    Ch2 = 2,
}

impl TempSensor {
    /// Position of this sensor in a registry table.
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Optional hardware a channel may have fitted.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Output can be programmed by an external voltage.
    pub remote_programming: bool,
    /// Low-ripple (linear post-regulation) mode.
    pub low_ripple: bool,
    #[skip]
    __: B6,
}

impl Default for Features {
    fn default() -> Self {
        Self::new()
    }
}
