//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GarageController (domain)
//! ```
//!
//! Driven adapters (real Raspberry Pi peripherals, or the in-memory
//! simulation) implement these traits.  The
//! [`GarageController`](super::controller::GarageController) consumes them
//! via generics, so the domain core never touches hardware directly.  Which
//! implementation runs is the caller's explicit choice at construction —
//! there is no ambient hardware detection.
//!
//! All port errors are typed — callers must handle every variant explicitly.

use core::fmt;

use chrono::NaiveDateTime;

// ───────────────────────────────────────────────────────────────
// Digital GPIO port (driven adapter: domain ↔ input/output pins)
// ───────────────────────────────────────────────────────────────

/// Digital pin access: sensor reads and indicator writes.
///
/// Pins must be configured for a direction before they are read or
/// written; adapters reject accesses to unconfigured pins.
pub trait GpioPort {
    /// Configure `pin` as a digital input.
    fn configure_input(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Configure `pin` as a digital output.
    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Read the instantaneous level of an input pin. No caching, no
    /// debouncing — every call hits the peripheral.
    fn read(&mut self, pin: u8) -> Result<bool, GpioError>;

    /// Drive an output pin HIGH (`true`) or LOW (`false`).
    fn write(&mut self, pin: u8, level: bool) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → barrier servo)
// ───────────────────────────────────────────────────────────────

/// PWM signal generation for the barrier servo.
///
/// Duty cycles are percentages (0.0–100.0) of the PWM frame.
pub trait PwmPort {
    /// Begin generating PWM on `pin` at `frequency_hz` with an initial
    /// duty cycle of `duty_pct`.
    fn start(&mut self, pin: u8, frequency_hz: f64, duty_pct: f64) -> Result<(), PwmError>;

    /// Change the duty cycle of a previously started PWM pin.
    fn set_duty_cycle(&mut self, pin: u8, duty_pct: f64) -> Result<(), PwmError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ← real-time clock)
// ───────────────────────────────────────────────────────────────

/// Calendar time source for fee calculation.
pub trait ClockPort {
    /// Read the current date-time from the clock peripheral.
    fn now(&mut self) -> Result<NaiveDateTime, ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`GpioPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The pin was never configured for the requested direction.
    NotConfigured(u8),
    /// Pin direction setup failed.
    ConfigureFailed(u8),
    /// The peripheral rejected the read.
    ReadFailed(u8),
    /// The peripheral rejected the write.
    WriteFailed(u8),
}

/// Errors from [`PwmPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// `set_duty_cycle` on a pin with no running PWM signal.
    NotStarted(u8),
    /// The peripheral rejected the PWM command.
    CommandFailed(u8),
    /// Duty cycle outside 0.0–100.0.
    InvalidDuty,
}

/// Errors from [`ClockPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The bus transaction with the RTC failed.
    BusFault,
    /// The RTC registers did not decode to a valid calendar date-time.
    InvalidReading,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured(pin) => write!(f, "pin {pin} not configured"),
            Self::ConfigureFailed(pin) => write!(f, "pin {pin} configuration failed"),
            Self::ReadFailed(pin) => write!(f, "pin {pin} read failed"),
            Self::WriteFailed(pin) => write!(f, "pin {pin} write failed"),
        }
    }
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted(pin) => write!(f, "no PWM running on pin {pin}"),
            Self::CommandFailed(pin) => write!(f, "PWM command on pin {pin} failed"),
            Self::InvalidDuty => write!(f, "duty cycle outside 0–100%"),
        }
    }
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFault => write!(f, "RTC bus fault"),
            Self::InvalidReading => write!(f, "RTC returned an invalid date-time"),
        }
    }
}

impl std::error::Error for GpioError {}
impl std::error::Error for PwmError {}
impl std::error::Error for ClockError {}
