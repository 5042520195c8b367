//! Sharing one coupling instance between the command task, interrupt handlers and
//! the fan loop.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    channel::{Channel, TemperatureSensors, TopologyNotifier},
    coupling::ChannelCoupling,
    types::CouplingMode,
};

/// A [`ChannelCoupling`] behind a critical section.
///
/// Every access runs to completion with interrupts masked, so no reader can observe
/// a mode transition or a cascade write half applied. Can be placed in a `static`.
pub struct SharedCoupling<C, S, N, const CH: usize = 2> {
    inner: Mutex<RefCell<ChannelCoupling<C, S, N, CH>>>,
}

impl<C: Channel, S: TemperatureSensors, N: TopologyNotifier, const CH: usize>
    SharedCoupling<C, S, N, CH>
{
    pub const fn new(coupling: ChannelCoupling<C, S, N, CH>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(coupling)),
        }
    }

    /// Run `f` with exclusive access to the coupling.
    ///
    /// __Note:__ Do not call `lock` again from inside `f`, the inner borrow panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut ChannelCoupling<C, S, N, CH>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Return the active coupling mode.
    pub fn get_type(&self) -> CouplingMode {
        self.lock(|coupling| coupling.get_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        coupling::{PAIR, tests::uncoupled},
        error::Error,
    };

    #[test]
    fn transition_through_shared_handle() {
        let shared = SharedCoupling::new(uncoupled());

        shared
            .lock(|coupling| coupling.set_type(CouplingMode::Series))
            .unwrap();
        shared
            .lock(|coupling| coupling.set_voltage_mv(1, 20_000))
            .unwrap();

        assert_eq!(shared.get_type(), CouplingMode::Series);
        let per_channel = shared.lock(|coupling| {
            PAIR.map(|channel| coupling.channel(channel).map(|c| c.voltage.set))
        });
        assert_eq!(per_channel, [Ok(10_000), Ok(10_000)]);
    }

    #[test]
    fn refused_transition_through_shared_handle() {
        let shared = SharedCoupling::new(uncoupled());
        shared.lock(|coupling| coupling.channel_mut(1).unwrap().operational = false);

        let result = shared.lock(|coupling| coupling.set_type(CouplingMode::Parallel));

        assert_eq!(result, Err(Error::ChannelNotOperational(1)));
        assert_eq!(shared.get_type(), CouplingMode::None);
    }
}
