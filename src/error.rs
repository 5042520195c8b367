//! Our error types for channel coupling.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a coupling operation can be refused.
///
/// None of these are fatal. State is left exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Coupling needs at least two channels")]
    NotEnoughChannels,
    #[error("Channel {0} is not operational")]
    ChannelNotOperational(usize),
    #[error("Invalid channel index {0}")]
    InvalidChannel(usize),
    #[error("No temperature sensor is tied to channel {0}")]
    NoSensorForChannel(usize),
    #[error("Invalid coupling configuration")]
    InvalidConfig,
}
