use embassy_time::{Duration, Ticker};

use crate::log::*;
use crate::{TunerCommand, CURRENT_TUNING, TUNER_COMMAND_CHANNEL};

/// Stand-in for the selector buttons: steps to the next string every
/// `cycle_secs` seconds.
#[embassy_executor::task]
pub async fn interface_task(cycle_secs: u64) {
    let sender = TUNER_COMMAND_CHANNEL.sender();
    let mut ticker = Ticker::every(Duration::from_secs(cycle_secs));
    loop {
        ticker.next().await;
        debug!("Simulated button: next");
        sender.send(TunerCommand::Next).await;
    }
}

#[embassy_executor::task]
pub async fn status_task() {
    let Some(mut receiver) = CURRENT_TUNING.receiver() else {
        error!("No free tuning status receiver");
        return;
    };
    loop {
        let status = receiver.changed().await;
        match status.note {
            Some(note) => info!("Now tuning {} ({}us)", note, status.period_us),
            None if status.period_us == 0 => info!("Tuner is off"),
            None => info!("Now tuning custom period {}us", status.period_us),
        }
    }
}
