use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::strobe::{Indicator, OutputSink};

/// Two GPIO outputs driven as a strobe pair. Active means high.
pub struct PinPair<A, B> {
    first: A,
    second: B,
}

impl<A, B> PinPair<A, B>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
{
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> OutputSink for PinPair<A, B>
where
    A: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
{
    type Id = Indicator;

    fn set_active(&mut self, output: Indicator, active: bool) {
        let state = PinState::from(active);
        let result = match output {
            Indicator::First => self.first.set_state(state),
            Indicator::Second => self.second.set_state(state),
        };
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
