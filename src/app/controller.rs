//! Garage controller — the hexagonal core.
//!
//! [`GarageController`] owns the recorded door/indicator state and the three
//! control policies: barrier position, capacity indicator, and parking fee.
//! All I/O flows through port traits injected at call sites, making the
//! entire controller testable with the simulation adapter.
//!
//! ```text
//!   GpioPort ──▶ ┌────────────────────────┐
//!                │    GarageController    │
//!    PwmPort ◀── │  occupancy · barrier   │
//!  ClockPort ──▶ │  indicator · fees      │
//!                └────────────────────────┘
//! ```
//!
//! The controller is deliberately pull-based: it never recomputes the
//! indicator on its own.  The caller invokes [`update_indicator`] after
//! every occupancy-relevant event.
//!
//! [`update_indicator`]: GarageController::update_indicator

use std::thread;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Weekday};
use log::{debug, info};

use crate::config::GarageConfig;
use crate::error::{Error, Result};
use crate::pins;

use super::ports::{ClockPort, GpioPort, PwmPort};

// ───────────────────────────────────────────────────────────────
// GarageController
// ───────────────────────────────────────────────────────────────

/// Control core for a three-spot garage with one gated entrance.
///
/// Recorded state (`door_open`, `indicator_on`) mirrors the last
/// *successful* hardware command: peripherals are always commanded first,
/// and the mirror is updated only after the command returns `Ok`.  A failed
/// actuation therefore leaves the recorded state unchanged.
pub struct GarageController {
    config: GarageConfig,
    door_open: bool,
    indicator_on: bool,
}

impl GarageController {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the five garage pins and home the barrier.
    ///
    /// Sensor pins become inputs, the indicator becomes an output driven
    /// LOW, and the barrier servo receives a homing pulse to its closed
    /// reference angle before the signal is released.
    pub fn init(config: GarageConfig, hw: &mut (impl GpioPort + PwmPort)) -> Result<Self> {
        for pin in pins::SENSOR_PINS {
            hw.configure_input(pin)?;
        }
        hw.configure_output(pins::INDICATOR_PIN)?;

        let controller = Self {
            config,
            door_open: false,
            indicator_on: false,
        };

        // Home the servo to its 0° reference, then release the signal so
        // it does not hold torque while idle.
        hw.start(
            pins::BARRIER_PWM_PIN,
            pins::SERVO_PWM_FREQ_HZ,
            pins::DUTY_HOME,
        )?;
        controller.settle();
        hw.set_duty_cycle(pins::BARRIER_PWM_PIN, pins::DUTY_RELEASED)?;

        hw.write(pins::INDICATOR_PIN, false)?;

        info!("garage controller ready, barrier homed closed");
        Ok(controller)
    }

    // ── Occupancy sensing ─────────────────────────────────────

    /// Instantaneous occupancy of the spot wired to `pin`.
    ///
    /// `pin` must be one of [`pins::SENSOR_PINS`]; anything else fails with
    /// [`Error::UnknownSensor`] before the peripheral is touched.
    pub fn is_occupied(&self, hw: &mut impl GpioPort, pin: u8) -> Result<bool> {
        if !pins::SENSOR_PINS.contains(&pin) {
            return Err(Error::UnknownSensor(pin));
        }
        Ok(hw.read(pin)?)
    }

    /// Number of occupied spots, in `0..=3`.
    ///
    /// Reads the three sensors in spot order; three peripheral reads per
    /// call, no caching.
    pub fn occupied_count(&self, hw: &mut impl GpioPort) -> Result<u8> {
        let mut count = 0;
        for pin in pins::SENSOR_PINS {
            if self.is_occupied(hw, pin)? {
                count += 1;
            }
        }
        Ok(count)
    }

    // ── Barrier actuation ─────────────────────────────────────

    /// Raise the entrance barrier.
    ///
    /// Unguarded: opening an already-open barrier re-runs the full
    /// actuation sequence.
    pub fn open_door(&mut self, hw: &mut impl PwmPort) -> Result<()> {
        self.set_barrier_position(hw, pins::DUTY_OPEN)?;
        self.door_open = true;
        info!("barrier opened");
        Ok(())
    }

    /// Lower the entrance barrier to its closed reference angle.
    pub fn close_door(&mut self, hw: &mut impl PwmPort) -> Result<()> {
        self.set_barrier_position(hw, pins::DUTY_CLOSED)?;
        self.door_open = false;
        info!("barrier closed");
        Ok(())
    }

    /// Sole actuation primitive: assert `duty_pct`, hold long enough for
    /// the servo to finish the swing, then release the signal.
    ///
    /// The hold only happens when `hardware_timing` is set — against the
    /// simulation adapter the wait is meaningless.
    fn set_barrier_position(&self, hw: &mut impl PwmPort, duty_pct: f64) -> Result<()> {
        hw.set_duty_cycle(pins::BARRIER_PWM_PIN, duty_pct)?;
        self.settle();
        hw.set_duty_cycle(pins::BARRIER_PWM_PIN, pins::DUTY_RELEASED)?;
        Ok(())
    }

    fn settle(&self) {
        if self.config.hardware_timing {
            thread::sleep(Duration::from_millis(self.config.servo_settle_ms));
        }
    }

    // ── Capacity indicator ────────────────────────────────────

    /// Light the "garage full" indicator unconditionally.
    pub fn turn_indicator_on(&mut self, hw: &mut impl GpioPort) -> Result<()> {
        hw.write(pins::INDICATOR_PIN, true)?;
        self.indicator_on = true;
        Ok(())
    }

    /// Extinguish the "garage full" indicator unconditionally.
    pub fn turn_indicator_off(&mut self, hw: &mut impl GpioPort) -> Result<()> {
        hw.write(pins::INDICATOR_PIN, false)?;
        self.indicator_on = false;
        Ok(())
    }

    /// Recompute the indicator from current occupancy: ON when every spot
    /// is taken, OFF otherwise.
    ///
    /// The comparison is an exact match against the spot count, not `>=`.
    /// Callers invoke this after each occupancy-relevant event; it keeps no
    /// memory of previous invocations.
    pub fn update_indicator(&mut self, hw: &mut impl GpioPort) -> Result<()> {
        let count = self.occupied_count(hw)?;
        debug!("occupancy {count}/{}", pins::SENSOR_PINS.len());
        if usize::from(count) == pins::SENSOR_PINS.len() {
            self.turn_indicator_on(hw)
        } else {
            self.turn_indicator_off(hw)
        }
    }

    // ── Fee calculation ───────────────────────────────────────

    /// Parking fee for a stay that began at `entry_time` and ends now.
    ///
    /// Every started hour bills at the full hourly rate.  Exits on a
    /// Saturday or Sunday carry the configured surcharge.  The result keeps
    /// full floating precision; rounding to cents is the billing system's
    /// concern.
    pub fn calculate_fee(
        &self,
        clock: &mut impl ClockPort,
        entry_time: NaiveDateTime,
    ) -> Result<f64> {
        let exit_time = clock.now()?;
        let hours = billable_hours(entry_time, exit_time);
        let mut cost = hours as f64 * self.config.hourly_rate;
        if is_weekend(exit_time.weekday()) {
            cost += cost * self.config.weekend_surcharge_percent / 100.0;
        }
        debug!("fee for {hours}h ending {exit_time}: {cost}");
        Ok(cost)
    }

    // ── Recorded state ────────────────────────────────────────

    /// True iff the barrier is in its raised position.
    pub fn door_open(&self) -> bool {
        self.door_open
    }

    /// Last commanded state of the capacity indicator.
    pub fn indicator_on(&self) -> bool {
        self.indicator_on
    }

    /// Active configuration.
    pub fn config(&self) -> &GarageConfig {
        &self.config
    }
}

// ───────────────────────────────────────────────────────────────
// Fee helpers
// ───────────────────────────────────────────────────────────────

/// Elapsed stay rounded up to whole hours.  Non-positive stays bill zero
/// hours rather than going negative on clock skew.
fn billable_hours(entry: NaiveDateTime, exit: NaiveDateTime) -> i64 {
    let secs = (exit - entry).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs as u64).div_ceil(3600) as i64
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
