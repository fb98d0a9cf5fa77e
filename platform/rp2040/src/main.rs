#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use strobe_tuner::indicators::strobe_task;
use strobe_tuner::inputs::interface_task;
use strobe_tuner::{
    split_resources, AssignedResources, InputResources, Note, StrobeResources, TunerConfig,
    VERSION,
};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    let config = TunerConfig {
        initial_note: Some(Note::E2),
        ..TunerConfig::default()
    };
    defmt::assert!(config.validate().is_ok());
    info!("Strobe tuner {}", VERSION);

    spawner.spawn(unwrap!(strobe_task(r.strobe, config)));
    spawner.spawn(unwrap!(interface_task(spawner, r.inputs)));
}
