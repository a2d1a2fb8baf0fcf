//! Unified error types for the ParkWarden controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! caller's error handling uniform.  All variants are `Copy` so they can be
//! passed around without allocation.
//!
//! Peripheral faults are not retried anywhere: the controller aborts the
//! in-progress operation and leaves its recorded state untouched.

use core::fmt;

use crate::app::ports::{ClockError, GpioError, PwmError};

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An occupancy query named a pin outside the configured sensor set.
    /// Raised before any peripheral access — this is a programmer error,
    /// not a runtime condition.
    UnknownSensor(u8),
    /// A digital read or write failed.
    Gpio(GpioError),
    /// A PWM command to the barrier servo failed.
    Pwm(PwmError),
    /// The real-time clock could not produce a valid date-time.
    Clock(ClockError),
    /// Peripheral setup failed during controller construction.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSensor(pin) => write!(f, "pin {pin} is not an occupancy sensor"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Pwm(e) => write!(f, "pwm: {e}"),
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<PwmError> for Error {
    fn from(e: PwmError) -> Self {
        Self::Pwm(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
