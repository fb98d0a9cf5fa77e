use crate::log::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::Sender;
use embassy_time::{Instant, Timer};

use crate::config::TunerConfig;
use crate::selector::NoteSelector;
use crate::strobe::{OutputSink, StrobeTuner};
use crate::{TunerCommand, TunerStatus, CURRENT_TUNING, TUNER_COMMAND_CHANNEL};

type StatusSender = Sender<'static, CriticalSectionRawMutex, TunerStatus, 2>;

/// Wrapping microsecond counter, the clock `StrobeTuner::poll` expects.
pub fn now_micros() -> u32 {
    Instant::now().as_micros() as u32
}

/// Own the tuner forever: apply note commands as they arrive and poll the
/// state machine every `poll_interval_us`.
pub async fn run_strobe<S: OutputSink>(mut tuner: StrobeTuner<S>, config: TunerConfig) -> ! {
    let receiver = TUNER_COMMAND_CHANNEL.receiver();
    let status = CURRENT_TUNING.sender();

    let mut selector = NoteSelector::new(config.initial_note);
    tuner.configure(selector.period());
    status.send(selector.status());
    info!(
        "Strobe running: pulse {}us, poll every {}us",
        tuner.pulse_width(),
        config.poll_interval_us
    );

    loop {
        match select(
            receiver.receive(),
            Timer::after_micros(config.poll_interval_us.into()),
        )
        .await
        {
            Either::First(command) => apply(&mut tuner, &mut selector, &status, command),
            Either::Second(()) => {}
        }
        tuner.poll(now_micros());
    }
}

fn apply<S: OutputSink>(
    tuner: &mut StrobeTuner<S>,
    selector: &mut NoteSelector,
    status: &StatusSender,
    command: TunerCommand,
) {
    let period = selector.apply(command);
    tuner.configure(period);
    match selector.note() {
        Some(note) => info!("Tuning to {} ({}us)", note.name(), period),
        None if period == 0 => info!("Tuner off"),
        None => info!("Tuning to custom period {}us", period),
    }
    status.send(selector.status());
}
