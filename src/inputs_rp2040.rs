use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::{
    gpio::{AnyPin, Input, Pull},
    Peri,
};
use embassy_time::Timer;

use crate::{InputResources, TunerCommand, TUNER_COMMAND_CHANNEL};

const DEBOUNCE_MILLIS: u64 = 100;

#[embassy_executor::task]
pub async fn interface_task(spawner: Spawner, r: InputResources) {
    spawner.spawn(unwrap!(button_task(r.next_button.into(), TunerCommand::Next)));
    spawner.spawn(unwrap!(button_task(
        r.previous_button.into(),
        TunerCommand::Previous
    )));
    spawner.spawn(unwrap!(button_task(r.off_button.into(), TunerCommand::Off)));
}

#[embassy_executor::task(pool_size = 3)]
async fn button_task(pin: Peri<'static, AnyPin>, command: TunerCommand) -> ! {
    let mut button = Input::new(pin, Pull::Up);
    let sender = TUNER_COMMAND_CHANNEL.sender();
    loop {
        button.wait_for_falling_edge().await;
        debug!("Button pressed: {}", command);
        sender.send(command).await;
        Timer::after_millis(DEBOUNCE_MILLIS).await; // Debounce delay
    }
}
