//! Non-blocking strobe scheduler for a two-LED visual tuner.
//!
//! - Caller supplies the current time (wrapping `u32` microseconds) to `poll`
//! - One cycle = idle gap + pulse on output 1 + pulse on output 2 = note period
//! - Pulse width is fixed per instance, independent of the note
//! - Note changes are staged and applied at the next state boundary
//! - At most one transition per `poll`; late polls delay, never skip
//!
//! Example
//! ```ignore
//! let mut tuner = StrobeTuner::new(PinPair::new(red, green), [Indicator::First, Indicator::Second]);
//! tuner.configure(Note::A2.period());
//! loop {
//!     tuner.poll(Instant::now().as_micros() as u32);
//! }
//! ```

/// Time each output stays lit per cycle, in microseconds.
pub const STROBE_DURATION: u32 = 250;

/// Capability to switch an output on or off by identifier.
pub trait OutputSink {
    type Id: Copy;

    fn set_active(&mut self, output: Self::Id, active: bool);
}

/// One of the two strobe outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    First,
    Second,
}

impl Indicator {
    const fn index(self) -> usize {
        match self {
            Indicator::First => 0,
            Indicator::Second => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrobeState {
    Off,
    IdleBefore1,
    Active1,
    Active2,
}

impl StrobeState {
    /// Next state in the cycle. `Off` is left only through `configure`.
    pub fn next(self) -> Self {
        match self {
            StrobeState::Off => StrobeState::Off,
            StrobeState::IdleBefore1 => StrobeState::Active1,
            StrobeState::Active1 => StrobeState::Active2,
            StrobeState::Active2 => StrobeState::IdleBefore1,
        }
    }

    /// The output lit while in this state, if any.
    pub fn indicator(self) -> Option<Indicator> {
        match self {
            StrobeState::Active1 => Some(Indicator::First),
            StrobeState::Active2 => Some(Indicator::Second),
            StrobeState::Off | StrobeState::IdleBefore1 => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            StrobeState::Off => 0,
            StrobeState::IdleBefore1 => 1,
            StrobeState::Active1 => 2,
            StrobeState::Active2 => 3,
        }
    }
}

/// How long each state lasts, indexed by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDurations([u32; 4]);

impl StateDurations {
    pub const OFF: Self = Self([0; 4]);

    /// Durations for one note period. The idle gap floors at zero when the
    /// period is shorter than both pulses together.
    pub fn for_period(period: u32, pulse_width: u32) -> Self {
        if period == 0 {
            return Self::OFF;
        }
        let gap = period.saturating_sub(pulse_width.saturating_mul(2));
        Self([0, gap, pulse_width, pulse_width])
    }

    pub fn get(&self, state: StrobeState) -> u32 {
        self.0[state.index()]
    }
}

/// Change waiting for the current state to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retune {
    Period(u32, StateDurations),
    Disable,
}

pub struct StrobeTuner<S: OutputSink> {
    sink: S,
    outputs: [S::Id; 2],
    pulse_width: u32,

    // State
    state: StrobeState,
    period: u32,
    durations: StateDurations,
    pending: Option<Retune>,
    last_transition: u32,
    // Set when leaving Off; the next poll starts the idle gap.
    restarting: bool,
}

impl<S: OutputSink> StrobeTuner<S> {
    /// Create a tuner using [`STROBE_DURATION`] pulses. Starts off.
    pub fn new(sink: S, outputs: [S::Id; 2]) -> Self {
        Self::with_pulse_width(sink, outputs, STROBE_DURATION)
    }

    pub fn with_pulse_width(sink: S, outputs: [S::Id; 2], pulse_width: u32) -> Self {
        Self {
            sink,
            outputs,
            pulse_width,
            state: StrobeState::Off,
            period: 0,
            durations: StateDurations::OFF,
            pending: None,
            last_transition: 0,
            restarting: false,
        }
    }

    /// Set the note period in poll-clock units, 0 to turn the tuner off.
    ///
    /// Outputs are left alone; the change lands when `poll` next finds the
    /// current state expired. From `Off` the cycle restarts with a full idle
    /// gap timed from the next `poll`.
    pub fn configure(&mut self, note_period: u32) {
        let durations = StateDurations::for_period(note_period, self.pulse_width);
        // Until the restart is anchored nothing is lit and no gap has run.
        let dark = self.state == StrobeState::Off || self.restarting;
        match (dark, note_period) {
            (true, 0) => {
                self.pending = None;
                self.restarting = false;
                self.period = 0;
                self.durations = StateDurations::OFF;
                self.state = StrobeState::Off;
            }
            (true, _) => {
                self.pending = None;
                self.restarting = true;
                self.period = note_period;
                self.durations = durations;
                self.state = StrobeState::IdleBefore1;
            }
            (false, 0) => self.pending = Some(Retune::Disable),
            (false, _) => self.pending = Some(Retune::Period(note_period, durations)),
        }
    }

    /// Run the state machine against the current counter reading.
    /// Must be called very frequently to be accurate.
    pub fn poll(&mut self, current_time: u32) {
        if self.state == StrobeState::Off {
            return;
        }
        if self.restarting {
            self.restarting = false;
            self.last_transition = current_time;
            return;
        }

        let elapsed = current_time.wrapping_sub(self.last_transition);
        // A state never begins and ends on the same reading.
        if elapsed == 0 || elapsed < self.durations.get(self.state) {
            return;
        }

        let outgoing = self.state;
        let incoming = match self.pending.take() {
            Some(Retune::Disable) => {
                self.period = 0;
                self.durations = StateDurations::OFF;
                StrobeState::Off
            }
            Some(Retune::Period(period, durations)) => {
                self.period = period;
                self.durations = durations;
                outgoing.next()
            }
            None => outgoing.next(),
        };

        // Outgoing first, so both outputs are never lit together.
        if let Some(indicator) = outgoing.indicator() {
            self.sink.set_active(self.outputs[indicator.index()], false);
        }
        if let Some(indicator) = incoming.indicator() {
            self.sink.set_active(self.outputs[indicator.index()], true);
        }

        self.state = incoming;
        self.last_transition = current_time;
    }

    pub fn state(&self) -> StrobeState {
        self.state
    }

    /// Period currently driving the cycle, 0 when off.
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn pulse_width(&self) -> u32 {
        self.pulse_width
    }

    pub fn durations(&self) -> StateDurations {
        self.durations
    }

    /// Whether a `configure` is still waiting for a state boundary.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_lit(&self, indicator: Indicator) -> bool {
        self.state.indicator() == Some(indicator)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the output sink. Whatever output is lit stays lit.
    pub fn release(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u8, bool), 64>,
        lit: [bool; 2],
    }

    impl OutputSink for Recorder {
        type Id = u8;

        fn set_active(&mut self, output: u8, active: bool) {
            self.calls.push((output, active)).unwrap();
            self.lit[(output - 1) as usize] = active;
        }
    }

    fn tuner() -> StrobeTuner<Recorder> {
        StrobeTuner::new(Recorder::default(), [1, 2])
    }

    #[test]
    fn starts_off_with_zero_durations() {
        let mut t = tuner();
        assert_eq!(t.state(), StrobeState::Off);
        assert_eq!(t.durations(), StateDurations::OFF);
        t.poll(0);
        t.poll(1_000_000);
        assert!(t.sink().calls.is_empty());
    }

    #[test]
    fn follows_ten_millisecond_schedule() {
        let mut t = tuner();
        t.configure(10_000);
        assert_eq!(t.durations().get(StrobeState::IdleBefore1), 9_500);

        t.poll(0);
        t.poll(3_770);
        assert_eq!(t.sink().lit, [false, false]);

        t.poll(9_500);
        assert_eq!(t.sink().lit, [true, false]);
        t.poll(9_750);
        assert_eq!(t.sink().lit, [false, true]);
        t.poll(10_000);
        assert_eq!(t.sink().lit, [false, false]);
        assert_eq!(t.state(), StrobeState::IdleBefore1);

        assert_eq!(
            t.sink().calls.as_slice(),
            &[(1, true), (1, false), (2, true), (2, false)]
        );
    }

    #[test]
    fn schedule_holds_at_any_start_time() {
        let base = 1_000_000;
        let mut t = tuner();
        t.configure(10_000);

        t.poll(base);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(base + 3_770);
        t.poll(base + 9_499);
        assert_eq!(t.sink().lit, [false, false]);

        t.poll(base + 9_500);
        assert_eq!(t.sink().lit, [true, false]);
        t.poll(base + 9_750);
        assert_eq!(t.sink().lit, [false, true]);
        t.poll(base + 10_000);
        assert_eq!(t.sink().lit, [false, false]);
    }

    #[test]
    fn reenable_waits_a_full_gap() {
        let mut t = tuner();
        t.configure(4_000);
        t.poll(0);
        t.poll(3_500);
        t.configure(0);
        t.poll(3_750);
        assert_eq!(t.state(), StrobeState::Off);

        t.configure(10_000);
        t.poll(5_000_000);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        assert_eq!(t.sink().lit, [false, false]);
        t.poll(5_009_499);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(5_009_500);
        assert_eq!(t.state(), StrobeState::Active1);
    }

    #[test]
    fn disable_before_restart_is_immediate() {
        let mut t = tuner();
        t.configure(10_000);
        t.configure(0);
        assert_eq!(t.state(), StrobeState::Off);
        assert!(!t.has_pending());
        t.poll(0);
        t.poll(20_000);
        assert!(t.sink().calls.is_empty());
    }

    fn into_gap(t: &mut StrobeTuner<Recorder>) {
        t.configure(10_000);
        t.poll(0);
        t.poll(9_500);
        t.poll(9_750);
        t.poll(10_000);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
    }

    #[test]
    fn disable_staged_during_gap_lands_when_gap_ends() {
        let mut t = tuner();
        into_gap(&mut t);
        let calls = t.sink().calls.len();

        t.configure(0);
        t.poll(15_000);
        t.poll(19_499);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        assert!(t.has_pending());

        t.poll(19_500);
        assert_eq!(t.state(), StrobeState::Off);
        assert_eq!(t.sink().lit, [false, false]);
        assert_eq!(t.sink().calls.len(), calls);
    }

    #[test]
    fn retune_staged_during_gap_keeps_old_gap() {
        let mut t = tuner();
        into_gap(&mut t);

        t.configure(3_000);
        assert_eq!(t.durations().get(StrobeState::IdleBefore1), 9_500);
        t.poll(12_500);
        t.poll(19_499);
        assert_eq!(t.sink().lit, [false, false]);

        // New table applies from the first pulse after the old gap.
        t.poll(19_500);
        assert_eq!(t.state(), StrobeState::Active1);
        assert_eq!(t.period(), 3_000);
        assert_eq!(t.durations().get(StrobeState::IdleBefore1), 2_500);
        t.poll(19_750);
        t.poll(20_000);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(22_499);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(22_500);
        assert_eq!(t.state(), StrobeState::Active1);
    }

    #[test]
    fn configure_does_not_touch_outputs() {
        let mut t = tuner();
        t.configure(4_000);
        t.poll(0);
        t.poll(3_500);
        assert!(t.is_lit(Indicator::First));
        let calls = t.sink().calls.len();

        t.configure(0);
        assert!(t.is_lit(Indicator::First));
        assert_eq!(t.sink().calls.len(), calls);
        assert!(t.has_pending());
    }

    #[test]
    fn disable_waits_for_current_pulse() {
        let mut t = tuner();
        t.configure(4_000);
        t.poll(0);
        t.poll(3_500);
        t.configure(0);

        t.poll(3_600);
        assert!(t.is_lit(Indicator::First));
        t.poll(3_750);
        assert_eq!(t.state(), StrobeState::Off);
        assert_eq!(t.sink().lit, [false, false]);
        assert_eq!(t.period(), 0);

        t.poll(100_000);
        assert_eq!(t.state(), StrobeState::Off);
    }

    #[test]
    fn retune_applies_at_next_boundary() {
        let mut t = tuner();
        t.configure(10_000);
        t.poll(0);
        t.poll(9_500);
        t.configure(3_000);
        assert_eq!(t.period(), 10_000);

        // Pulse keeps its length, new gap starts after pulse 2.
        t.poll(9_750);
        assert_eq!(t.period(), 3_000);
        t.poll(10_000);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        assert_eq!(t.durations().get(StrobeState::IdleBefore1), 2_500);
        t.poll(12_499);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(12_500);
        assert_eq!(t.state(), StrobeState::Active1);
    }

    #[test]
    fn later_configure_replaces_pending_disable() {
        let mut t = tuner();
        t.configure(5_000);
        t.poll(0);
        t.poll(4_500);
        t.configure(0);
        t.configure(6_000);
        t.poll(4_750);
        assert_eq!(t.state(), StrobeState::Active2);
        assert_eq!(t.period(), 6_000);
    }

    #[test]
    fn short_period_floors_gap_at_zero() {
        let d = StateDurations::for_period(300, STROBE_DURATION);
        assert_eq!(d.get(StrobeState::IdleBefore1), 0);
        assert_eq!(d.get(StrobeState::Active1), STROBE_DURATION);
        assert_eq!(d.get(StrobeState::Active2), STROBE_DURATION);

        let d = StateDurations::for_period(1, u32::MAX);
        assert_eq!(d.get(StrobeState::IdleBefore1), 0);
    }

    #[test]
    fn repeated_poll_at_same_time_is_idempotent() {
        let mut t = tuner();
        t.configure(100);
        t.poll(0);
        t.poll(1);
        assert_eq!(t.state(), StrobeState::Active1);
        t.poll(251);
        assert_eq!(t.state(), StrobeState::Active2);
        t.poll(501);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(501);
        t.poll(501);
        assert_eq!(t.state(), StrobeState::IdleBefore1);
        t.poll(502);
        assert_eq!(t.state(), StrobeState::Active1);
    }

    #[test]
    fn elapsed_time_survives_wraparound() {
        let mut t = tuner();
        t.configure(1_000);
        t.poll(u32::MAX - 600);
        t.poll(u32::MAX - 100);
        assert_eq!(t.state(), StrobeState::Active1);
        t.poll(100);
        assert_eq!(t.state(), StrobeState::Active1);
        t.poll(148);
        assert_eq!(t.state(), StrobeState::Active1);
        // 250us after the pulse began, across the wrap.
        t.poll(149);
        assert_eq!(t.state(), StrobeState::Active2);
        assert_eq!(t.sink().lit, [false, true]);
    }

    #[test]
    fn custom_pulse_width() {
        let mut t = StrobeTuner::with_pulse_width(Recorder::default(), [1, 2], 100);
        t.configure(1_000);
        assert_eq!(t.pulse_width(), 100);
        assert_eq!(t.durations().get(StrobeState::IdleBefore1), 800);
        assert_eq!(t.durations().get(StrobeState::Active2), 100);
    }
}
