#![no_std]

#[cfg(feature = "rp2040")]
pub mod inputs_rp2040;
#[cfg(feature = "rp2040")]
pub use inputs_rp2040 as inputs;

#[cfg(feature = "rp2040")]
pub use defmt as log;

#[cfg(feature = "std")]
pub use log;

#[cfg(feature = "std")]
pub mod inputs_std;
#[cfg(feature = "std")]
pub use inputs_std as inputs;

#[cfg(feature = "rp2040")]
pub mod indicators_rp2040;
#[cfg(feature = "rp2040")]
pub use indicators_rp2040 as indicators;

#[cfg(feature = "std")]
pub mod indicators_std;
#[cfg(feature = "std")]
pub use indicators_std as indicators;

#[cfg(feature = "rp2040")]
pub mod resources_rp2040;
#[cfg(feature = "rp2040")]
pub use resources_rp2040 as resources;
#[cfg(feature = "rp2040")]
pub use resources_rp2040::*;

#[cfg(any(feature = "std", feature = "rp2040"))]
pub mod driver;

pub mod config;
pub mod notes;
pub mod pins;
pub mod selector;
pub mod strobe;

pub use config::TunerConfig;
pub use notes::{Note, STANDARD_TUNING};
pub use strobe::{Indicator, OutputSink, StrobeState, StrobeTuner, STROBE_DURATION};

pub static VERSION: &str = "v0.1";

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::watch::Watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TunerCommand {
    Select(Note),
    SetPeriod(u32), // microseconds, 0 = off
    Next,
    Previous,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TunerStatus {
    pub note: Option<Note>,
    pub period_us: u32,
}

pub static TUNER_COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, TunerCommand, 3> =
    Channel::new();
pub static CURRENT_TUNING: Watch<CriticalSectionRawMutex, TunerStatus, 2> = Watch::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_channel_is_fifo_and_bounded() {
        let sender = TUNER_COMMAND_CHANNEL.sender();
        let receiver = TUNER_COMMAND_CHANNEL.receiver();

        sender.try_send(TunerCommand::Next).unwrap();
        sender.try_send(TunerCommand::Select(Note::B3)).unwrap();
        sender.try_send(TunerCommand::Off).unwrap();
        assert!(sender.try_send(TunerCommand::Previous).is_err());

        assert_eq!(receiver.try_receive(), Ok(TunerCommand::Next));
        assert_eq!(receiver.try_receive(), Ok(TunerCommand::Select(Note::B3)));
        assert_eq!(receiver.try_receive(), Ok(TunerCommand::Off));
        assert!(receiver.try_receive().is_err());
    }
}
