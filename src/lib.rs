//! This crate couples two output channels of a multi-channel programmable power supply
//! into one logical output, and keeps every protection consistent across both.
//!
//! It supports `no-std` environments by use of the `no-std` feature flag.
//!
//! Supported coupling modes:
//! * None - every channel is independent.
//! * Series - voltages of channel 0 and 1 add up, currents are tied equal.
//! * Parallel - currents of channel 0 and 1 add up, voltages are tied equal.
//!
//! While coupled:
//! * Every read or write addressed to channel 0 or 1 acts on the pair, it does not matter which
//!   one was addressed.
//! * OVP, OCP, OPP and OTP settings are equal on both channels (and on both of their temperature
//!   sensors). Entering a mode merges them conservatively: a protection armed on either side stays
//!   armed, the lower level and the shorter delay win.
//!
//! The crate never talks to hardware. Implement [`channel::Channel`],
//! [`channel::TemperatureSensors`] and [`channel::TopologyNotifier`] for your drivers and hand
//! them to [`coupling::ChannelCoupling`].
//!
//! Units follow the rest of the firmware: millivolts, milliamps and milliwatts as `u32`,
//! protection delays as [`fugit::MillisDurationU32`].

#![cfg_attr(feature = "no-std", no_std)]

mod cascade;
pub mod channel;
pub mod config;
pub mod coupling;
pub mod error;
mod output;
mod projection;
pub mod protection;
pub mod shared;
pub mod types;

#[cfg(test)]
mod mock_channel;
