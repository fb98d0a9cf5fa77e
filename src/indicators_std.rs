use crate::config::TunerConfig;
use crate::driver::{now_micros, run_strobe};
use crate::log::*;
use crate::strobe::{Indicator, OutputSink, StrobeTuner};

/// Simulated LEDs: every switch is logged with the microsecond it happened.
#[derive(Default)]
pub struct LoggingSink;

impl OutputSink for LoggingSink {
    type Id = Indicator;

    fn set_active(&mut self, output: Indicator, active: bool) {
        let name = match output {
            Indicator::First => "LED1",
            Indicator::Second => "LED2",
        };
        let level = if active { "on" } else { "off" };
        trace!("{} {} at {}us", name, level, now_micros());
    }
}

#[embassy_executor::task]
pub async fn strobe_task(config: TunerConfig) {
    info!("Starting simulated strobe");
    let tuner = StrobeTuner::with_pulse_width(
        LoggingSink,
        [Indicator::First, Indicator::Second],
        config.pulse_width_us,
    );
    run_strobe(tuner, config).await
}
