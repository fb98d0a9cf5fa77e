use clap::Parser;
use embassy_executor::Spawner;
use log::*;
use strobe_tuner::indicators::strobe_task;
use strobe_tuner::inputs::{interface_task, status_task};
use strobe_tuner::{Note, TunerConfig, VERSION};

/// Simulated two-LED strobe tuner.
#[derive(Parser, Debug)]
#[clap(version)]
struct Opts {
    /// Note to start on (E2, A2, D3, G3, B3, E4). Overrides the config file.
    #[clap(short, long)]
    note: Option<String>,

    /// JSON tuner config.
    #[clap(short, long)]
    config: Option<std::path::PathBuf>,

    /// Seconds between simulated "next string" presses.
    #[clap(long, default_value_t = 5)]
    cycle_secs: u64,

    /// -v for debug, -vv to log every LED switch.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(opts: &Opts) -> Result<TunerConfig, String> {
    let mut config = match &opts.config {
        Some(path) => {
            let json = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
            TunerConfig::from_json(&json).map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => TunerConfig::default(),
    };
    if let Some(name) = &opts.note {
        config.initial_note = Some(name.parse::<Note>().map_err(|e| format!("{}: {}", name, e))?);
    }
    Ok(config)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let opts = Opts::parse();

    env_logger::builder()
        .filter_level(match opts.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp_nanos()
        .init();

    let config = match load_config(&opts) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Strobe tuner {}", VERSION);

    spawner.spawn(status_task().unwrap());
    spawner.spawn(strobe_task(config).unwrap());
    spawner.spawn(interface_task(opts.cycle_secs).unwrap());
}
