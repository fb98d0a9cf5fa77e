use crate::notes::{Note, STANDARD_TUNING};
use crate::{TunerCommand, TunerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Off,
    Note(Note),
    Custom(u32),
}

/// Turns note-selection commands into the period handed to the tuner.
pub struct NoteSelector {
    selection: Selection,
}

impl NoteSelector {
    pub fn new(initial: Option<Note>) -> Self {
        Self {
            selection: initial.map_or(Selection::Off, Selection::Note),
        }
    }

    /// Apply a command and return the period to configure, 0 for off.
    pub fn apply(&mut self, command: TunerCommand) -> u32 {
        self.selection = match (command, self.selection) {
            (TunerCommand::Off, _) | (TunerCommand::SetPeriod(0), _) => Selection::Off,
            (TunerCommand::Select(note), _) => Selection::Note(note),
            (TunerCommand::SetPeriod(period), _) => Selection::Custom(period),
            (TunerCommand::Next, Selection::Note(note)) => {
                Selection::Note(STANDARD_TUNING[(note.string_index() + 1) % STANDARD_TUNING.len()])
            }
            (TunerCommand::Next, _) => Selection::Note(STANDARD_TUNING[0]),
            (TunerCommand::Previous, Selection::Note(note)) => {
                let index = note
                    .string_index()
                    .checked_sub(1)
                    .unwrap_or(STANDARD_TUNING.len() - 1);
                Selection::Note(STANDARD_TUNING[index])
            }
            (TunerCommand::Previous, _) => Selection::Note(STANDARD_TUNING[STANDARD_TUNING.len() - 1]),
        };
        self.period()
    }

    pub fn period(&self) -> u32 {
        match self.selection {
            Selection::Off => 0,
            Selection::Note(note) => note.period(),
            Selection::Custom(period) => period,
        }
    }

    pub fn note(&self) -> Option<Note> {
        match self.selection {
            Selection::Note(note) => Some(note),
            Selection::Off | Selection::Custom(_) => None,
        }
    }

    pub fn status(&self) -> TunerStatus {
        TunerStatus {
            note: self.note(),
            period_us: self.period(),
        }
    }
}
