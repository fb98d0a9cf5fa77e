use crate::config::TunerConfig;
use crate::driver::run_strobe;
use crate::pins::PinPair;
use crate::strobe::{Indicator, StrobeTuner};
use crate::StrobeResources;
use defmt::*;
use embassy_rp::gpio::{Level, Output};

#[embassy_executor::task]
pub async fn strobe_task(r: StrobeResources, config: TunerConfig) {
    // Start dark; the tuner only ever lights one at a time.
    let led1 = Output::new(r.led1, Level::Low);
    let led2 = Output::new(r.led2, Level::Low);

    let tuner = StrobeTuner::with_pulse_width(
        PinPair::new(led1, led2),
        [Indicator::First, Indicator::Second],
        config.pulse_width_us,
    );
    info!("Strobe LEDs ready");
    run_strobe(tuner, config).await
}
