use clap::Parser;
use ddb_core::mk_static;
use ddb_core::utils::controllers::{PinDriver, PinId};
use ddb_core::utils::{Config, HBridge, MotionCommand};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts
{
    /// JSON file with pin assignments and timing calibration
    #[clap(long)]
    config: Option<PathBuf>,
    /// log motions without sleeping
    #[clap(long)]
    dry_run: bool,
    /// motion commands as JSON, e.g. '{"mc":"quarter","n":1}'
    commands: Vec<String>,
}

/// Pin driver that logs every pin operation to the console.
#[derive(Default)]
struct ConsolePins {
    levels: Vec<(PinId, PinState)>,
}

impl ConsolePins {
    fn level(&self, pin: PinId) -> Option<PinState> {
        self.levels.iter().find(|(p, _)| *p == pin).map(|(_, l)| *l)
    }
}

impl PinDriver for ConsolePins {
    type Error = Infallible;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        info!("PIN {pin}: output");
        self.levels.retain(|(p, _)| *p != pin);
        self.levels.push((pin, PinState::Low));
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: PinState) -> Result<(), Self::Error> {
        info!("PIN {pin}: {level:?}");
        match self.levels.iter_mut().find(|(p, _)| *p == pin) {
            Some(entry) => entry.1 = level,
            None => warn!("PIN {pin} written before configuration"),
        }
        Ok(())
    }
}

/// Blocking delay backed by the host clock, or skipped for dry runs.
struct HostDelay {
    dry_run: bool,
}

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        if !self.dry_run {
            std::thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        info!("DELAY {ms} ms");
        if !self.dry_run {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts: Opts = Opts::parse();
    let config: &'static Config = mk_static!(Config, load_config(opts.config.as_ref())?);
    info!(?config, "loaded configuration");

    let mut ctrl = HBridge::new(
        config,
        ConsolePins::default(),
        HostDelay {
            dry_run: opts.dry_run,
        },
    );
    ctrl.init()?;

    for raw in &opts.commands {
        let cmd = match MotionCommand::from_json(raw) {
            Ok(cmd) => cmd,
            Err(e) => {
                error!(%e, "invalid motion command {raw}");
                continue;
            }
        };
        info!("Received Motion Command: {:?}", cmd);
        if let Err(e) = ctrl.execute_command(cmd) {
            error!("Motion command failed: {e}");
        }
    }

    let pin_ids = ctrl.config().all_pins();
    let (pins, _) = ctrl.release();
    for pin in pin_ids {
        info!("PIN {pin} final: {:?}", pins.level(pin));
    }
    Ok(())
}
