//! ParkWarden — Main Entry Point
//!
//! Hexagonal architecture on a Raspberry Pi:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │                                                      │
//! │   RpiHardware              Ds3231Clock               │
//! │   (GpioPort + PwmPort)     (ClockPort)               │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ─────────────     │
//! │                                                      │
//! │  ┌────────────────────────────────────────────┐      │
//! │  │       GarageController (pure logic)        │      │
//! │  │  occupancy · barrier · indicator · fees    │      │
//! │  └────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The loop below keeps the capacity indicator consistent with occupancy.
//! Barrier commands and fee queries come from the operator tooling, which
//! drives the same controller API.

#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use parkwarden::adapters::rpi::{Ds3231Clock, RpiHardware};
use parkwarden::app::controller::GarageController;
use parkwarden::app::ports::ClockPort;
use parkwarden::config::GarageConfig;
use parkwarden::pins;

fn load_config() -> Result<GarageConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            GarageConfig::from_json(&raw).context("parsing config file")?
        }
        // Deployed without a config file: defaults, with real servo timing.
        None => GarageConfig {
            hardware_timing: true,
            ..GarageConfig::default()
        },
    };
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid config: {msg}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    info!("ParkWarden v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    let mut hw = RpiHardware::new()?;
    let mut clock = Ds3231Clock::new(pins::RTC_I2C_BUS)?;
    let mut garage = GarageController::init(config, &mut hw)?;

    info!("RTC reads {}", clock.now()?);
    info!(
        "hourly rate {}, weekend surcharge {}%",
        garage.config().hourly_rate,
        garage.config().weekend_surcharge_percent
    );

    let mut last_count: Option<u8> = None;
    loop {
        let count = garage.occupied_count(&mut hw)?;
        if last_count != Some(count) {
            info!("occupancy {count}/{} spots", pins::SENSOR_PINS.len());
            garage.update_indicator(&mut hw)?;
            last_count = Some(count);
        }
        thread::sleep(poll_interval);
    }
}
