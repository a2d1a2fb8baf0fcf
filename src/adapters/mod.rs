//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter | Implements           | Connects to                    |
//! |---------|----------------------|--------------------------------|
//! | `rpi`   | GpioPort, PwmPort    | Raspberry Pi GPIO (rppal)      |
//! |         | ClockPort            | DS3231 RTC over I²C            |
//! | `sim`   | GpioPort, PwmPort    | In-memory pin state            |
//! |         | ClockPort            | Settable timestamp             |
//!
//! The caller picks one explicitly at construction; nothing in the crate
//! sniffs the environment to choose for it.

#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;
