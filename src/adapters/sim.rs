//! Simulation adapter — in-memory implementation of every port trait.
//!
//! Stands in for the Raspberry Pi peripherals during host-side runs and
//! tests.  Records the full command history (PWM starts, duty writes,
//! digital writes) so tests can assert on exactly what the controller
//! commanded, in order, without touching real GPIO.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::app::ports::{ClockError, ClockPort, GpioError, GpioPort, PwmError, PwmPort};

// ── Recorded commands ─────────────────────────────────────────

/// One PWM command as received by the simulated peripheral.
#[derive(Debug, Clone, PartialEq)]
pub enum PwmCall {
    Start {
        pin: u8,
        frequency_hz: f64,
        duty_pct: f64,
    },
    SetDuty {
        pin: u8,
        duty_pct: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinMode {
    Input,
    Output,
}

// ── SimHardware ───────────────────────────────────────────────

/// Simulated GPIO + PWM peripheral.
///
/// Input levels are set by the test through [`set_input`]; output and PWM
/// commands are recorded in [`pwm_calls`] / [`gpio_writes`].
///
/// [`set_input`]: SimHardware::set_input
/// [`pwm_calls`]: SimHardware::pwm_calls
/// [`gpio_writes`]: SimHardware::gpio_writes
#[derive(Default)]
pub struct SimHardware {
    modes: HashMap<u8, PinMode>,
    levels: HashMap<u8, bool>,
    pwm_freq: HashMap<u8, f64>,
    /// Every PWM command, in issue order.
    pub pwm_calls: Vec<PwmCall>,
    /// Every digital write, in issue order.
    pub gpio_writes: Vec<(u8, bool)>,
}

impl SimHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level a simulated input pin will read back.
    pub fn set_input(&mut self, pin: u8, level: bool) {
        self.levels.insert(pin, level);
    }

    /// Last level driven on an output pin, if it was ever written.
    pub fn output_level(&self, pin: u8) -> Option<bool> {
        match self.modes.get(&pin) {
            Some(PinMode::Output) => self.levels.get(&pin).copied(),
            _ => None,
        }
    }

    /// Every duty cycle asserted on `pin`, in order (the `start` duty
    /// included).
    pub fn duty_history(&self, pin: u8) -> Vec<f64> {
        self.pwm_calls
            .iter()
            .filter_map(|call| match call {
                PwmCall::Start { pin: p, duty_pct, .. } | PwmCall::SetDuty { pin: p, duty_pct }
                    if *p == pin =>
                {
                    Some(*duty_pct)
                }
                _ => None,
            })
            .collect()
    }
}

impl GpioPort for SimHardware {
    fn configure_input(&mut self, pin: u8) -> Result<(), GpioError> {
        self.modes.insert(pin, PinMode::Input);
        self.levels.entry(pin).or_insert(false);
        Ok(())
    }

    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError> {
        self.modes.insert(pin, PinMode::Output);
        self.levels.insert(pin, false);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<bool, GpioError> {
        match self.modes.get(&pin) {
            Some(PinMode::Input) => Ok(self.levels.get(&pin).copied().unwrap_or(false)),
            _ => Err(GpioError::NotConfigured(pin)),
        }
    }

    fn write(&mut self, pin: u8, level: bool) -> Result<(), GpioError> {
        match self.modes.get(&pin) {
            Some(PinMode::Output) => {
                self.gpio_writes.push((pin, level));
                self.levels.insert(pin, level);
                Ok(())
            }
            _ => Err(GpioError::NotConfigured(pin)),
        }
    }
}

impl PwmPort for SimHardware {
    fn start(&mut self, pin: u8, frequency_hz: f64, duty_pct: f64) -> Result<(), PwmError> {
        if !(0.0..=100.0).contains(&duty_pct) {
            return Err(PwmError::InvalidDuty);
        }
        self.pwm_freq.insert(pin, frequency_hz);
        self.pwm_calls.push(PwmCall::Start {
            pin,
            frequency_hz,
            duty_pct,
        });
        Ok(())
    }

    fn set_duty_cycle(&mut self, pin: u8, duty_pct: f64) -> Result<(), PwmError> {
        if !(0.0..=100.0).contains(&duty_pct) {
            return Err(PwmError::InvalidDuty);
        }
        if !self.pwm_freq.contains_key(&pin) {
            return Err(PwmError::NotStarted(pin));
        }
        self.pwm_calls.push(PwmCall::SetDuty { pin, duty_pct });
        Ok(())
    }
}

// ── SimClock ──────────────────────────────────────────────────

/// Simulated real-time clock returning a settable timestamp.
pub struct SimClock {
    now: NaiveDateTime,
}

impl SimClock {
    /// Clock frozen at `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Move the clock to a new timestamp.
    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }
}

impl ClockPort for SimClock {
    fn now(&mut self) -> Result<NaiveDateTime, ClockError> {
        Ok(self.now)
    }
}
