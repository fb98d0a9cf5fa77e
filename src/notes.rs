//! Reference notes for a standard six-string tuning.
//!
//! Periods are `1 / frequency` in microseconds, the unit `StrobeTuner`
//! expects when polled with a microsecond clock.

use core::fmt;
use core::str::FromStr;

use fixed::types::{U16F16, U32F32};
use fixed_macro::fixed;
use serde::{Deserialize, Serialize};

pub type Hertz = U16F16;

pub const PERIOD_E2: u32 = 12135; // 1/82.407 Hz
pub const PERIOD_A2: u32 = 9091; // 1/110.00 Hz
pub const PERIOD_D3: u32 = 6811; // 1/146.83 Hz
pub const PERIOD_G3: u32 = 5102; // 1/196.00 Hz
pub const PERIOD_B3: u32 = 4050; // 1/246.94 Hz
pub const PERIOD_E4: u32 = 3034; // 1/329.63 Hz

const MICROS_PER_SECOND: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningError {
    ZeroFrequency,
    PeriodOverflow,
    UnknownNote,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::ZeroFrequency => write!(f, "Frequency must be above zero"),
            TuningError::PeriodOverflow => write!(f, "Period does not fit in 32 bits"),
            TuningError::UnknownNote => write!(f, "Unknown note name"),
        }
    }
}

impl core::error::Error for TuningError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    E2,
    A2,
    D3,
    G3,
    B3,
    E4,
}

/// Open strings, lowest first.
pub const STANDARD_TUNING: [Note; 6] = [Note::E2, Note::A2, Note::D3, Note::G3, Note::B3, Note::E4];

impl Note {
    pub const fn period(self) -> u32 {
        match self {
            Note::E2 => PERIOD_E2,
            Note::A2 => PERIOD_A2,
            Note::D3 => PERIOD_D3,
            Note::G3 => PERIOD_G3,
            Note::B3 => PERIOD_B3,
            Note::E4 => PERIOD_E4,
        }
    }

    pub const fn frequency(self) -> Hertz {
        match self {
            Note::E2 => fixed!(82.407: U16F16),
            Note::A2 => fixed!(110.0: U16F16),
            Note::D3 => fixed!(146.83: U16F16),
            Note::G3 => fixed!(196.0: U16F16),
            Note::B3 => fixed!(246.94: U16F16),
            Note::E4 => fixed!(329.63: U16F16),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Note::E2 => "E2",
            Note::A2 => "A2",
            Note::D3 => "D3",
            Note::G3 => "G3",
            Note::B3 => "B3",
            Note::E4 => "E4",
        }
    }

    /// Position in [`STANDARD_TUNING`].
    pub fn string_index(self) -> usize {
        match self {
            Note::E2 => 0,
            Note::A2 => 1,
            Note::D3 => 2,
            Note::G3 => 3,
            Note::B3 => 4,
            Note::E4 => 5,
        }
    }
}

impl FromStr for Note {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD_TUNING
            .iter()
            .copied()
            .find(|note| note.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(TuningError::UnknownNote)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Period in microseconds of a note at `frequency`, rounded to the nearest
/// microsecond.
pub fn period_from_frequency(frequency: Hertz) -> Result<u32, TuningError> {
    if frequency == Hertz::ZERO {
        return Err(TuningError::ZeroFrequency);
    }
    U32F32::from_num(MICROS_PER_SECOND)
        .checked_div(U32F32::from_num(frequency))
        .and_then(|period| period.checked_round())
        .and_then(|period| period.checked_to_num::<u32>())
        .ok_or(TuningError::PeriodOverflow)
}
