//! Protection configuration held by each channel and temperature sensor, and the
//! conservative merge used when two of them are joined into one protected output.

use fugit::MillisDurationU32;

use crate::types::{State, Temperature};

/// A value that can be merged with its counterpart on the sibling channel.
///
/// The merged value is never more permissive than either input: a protection
/// armed on one side stays armed, and the lower level and shorter delay win.
pub trait Conservative: Copy {
    fn most_conservative(self, other: Self) -> Self;
}

impl Conservative for State {
    fn most_conservative(self, other: Self) -> Self {
        self | other
    }
}

impl Conservative for u32 {
    fn most_conservative(self, other: Self) -> Self {
        self.min(other)
    }
}

impl Conservative for MillisDurationU32 {
    fn most_conservative(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

impl Conservative for Temperature {
    fn most_conservative(self, other: Self) -> Self {
        if other.is_below(&self) { other } else { self }
    }
}

/// Merge two snapshots. Both sides receive the same result.
pub fn merge_pair<T: Conservative>(first: T, second: T) -> [T; 2] {
    let merged = first.most_conservative(second);
    [merged, merged]
}

/// Protection with a trip level, e.g. OVP, OPP or OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProtection<L> {
    pub state: State,
    pub level: L,
    pub delay: MillisDurationU32,
}

impl<L: Conservative> Conservative for LevelProtection<L> {
    fn most_conservative(self, other: Self) -> Self {
        LevelProtection {
            state: self.state.most_conservative(other.state),
            level: self.level.most_conservative(other.level),
            delay: self.delay.most_conservative(other.delay),
        }
    }
}

/// Protection which trips on the regulator entering a mode, e.g. OCP on CC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayProtection {
    pub state: State,
    pub delay: MillisDurationU32,
}

impl Conservative for DelayProtection {
    fn most_conservative(self, other: Self) -> Self {
        DelayProtection {
            state: self.state.most_conservative(other.state),
            delay: self.delay.most_conservative(other.delay),
        }
    }
}

/// Over-temperature protection of a single sensor.
pub type SensorProtection = LevelProtection<Temperature>;

/// All protection settings of one physical channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelProtection {
    /// Over-voltage protection, level in millivolts.
    pub ovp: LevelProtection<u32>,
    /// Over-current protection.
    pub ocp: DelayProtection,
    /// Over-power protection, level in milliwatts.
    pub opp: LevelProtection<u32>,
}

impl Conservative for ChannelProtection {
    fn most_conservative(self, other: Self) -> Self {
        ChannelProtection {
            ovp: self.ovp.most_conservative(other.ovp),
            ocp: self.ocp.most_conservative(other.ocp),
            opp: self.opp.most_conservative(other.opp),
        }
    }
}

/// Default protections are essentially disabled.
impl Default for ChannelProtection {
    fn default() -> Self {
        ChannelProtection {
            ovp: LevelProtection {
                state: State::Off,
                level: 40_000,
                delay: MillisDurationU32::millis(5),
            },
            ocp: DelayProtection {
                state: State::Off,
                delay: MillisDurationU32::millis(20),
            },
            opp: LevelProtection {
                state: State::Off,
                level: 155_000,
                delay: MillisDurationU32::secs(10),
            },
        }
    }
}

impl Default for SensorProtection {
    fn default() -> Self {
        LevelProtection {
            state: State::Off,
            level: Temperature::Celsius(70),
            delay: MillisDurationU32::secs(10),
        }
    }
}
