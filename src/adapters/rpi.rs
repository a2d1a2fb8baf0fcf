//! Raspberry Pi hardware adapter (feature `rpi`).
//!
//! [`RpiHardware`] drives the garage pins through `rppal`.  The barrier
//! servo runs on software PWM bound to its GPIO pin — the garage board does
//! not route the servo through a hardware PWM channel.  [`Ds3231Clock`]
//! reads the DS3231 RTC breakout over I²C.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rppal::gpio::{Gpio, InputPin, OutputPin};
use rppal::i2c::I2c;

use crate::app::ports::{ClockError, ClockPort, GpioError, GpioPort, PwmError, PwmPort};
use crate::error::Error;
use crate::pins;

// ── RpiHardware ───────────────────────────────────────────────

struct PwmOut {
    pin: OutputPin,
    frequency_hz: f64,
}

/// GPIO + PWM access on the Pi.  Pins are claimed lazily as the controller
/// configures them.
pub struct RpiHardware {
    gpio: Gpio,
    inputs: HashMap<u8, InputPin>,
    outputs: HashMap<u8, OutputPin>,
    pwm: HashMap<u8, PwmOut>,
}

impl RpiHardware {
    pub fn new() -> crate::error::Result<Self> {
        let gpio = Gpio::new().map_err(|_| Error::Init("GPIO controller unavailable"))?;
        Ok(Self {
            gpio,
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            pwm: HashMap::new(),
        })
    }
}

impl GpioPort for RpiHardware {
    fn configure_input(&mut self, pin: u8) -> Result<(), GpioError> {
        let input = self
            .gpio
            .get(pin)
            .map_err(|_| GpioError::ConfigureFailed(pin))?
            .into_input();
        self.inputs.insert(pin, input);
        Ok(())
    }

    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let output = self
            .gpio
            .get(pin)
            .map_err(|_| GpioError::ConfigureFailed(pin))?
            .into_output_low();
        self.outputs.insert(pin, output);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<bool, GpioError> {
        let input = self.inputs.get(&pin).ok_or(GpioError::NotConfigured(pin))?;
        Ok(input.is_high())
    }

    fn write(&mut self, pin: u8, level: bool) -> Result<(), GpioError> {
        let output = self
            .outputs
            .get_mut(&pin)
            .ok_or(GpioError::NotConfigured(pin))?;
        if level {
            output.set_high();
        } else {
            output.set_low();
        }
        Ok(())
    }
}

impl PwmPort for RpiHardware {
    fn start(&mut self, pin: u8, frequency_hz: f64, duty_pct: f64) -> Result<(), PwmError> {
        if !(0.0..=100.0).contains(&duty_pct) {
            return Err(PwmError::InvalidDuty);
        }
        let mut output = self
            .gpio
            .get(pin)
            .map_err(|_| PwmError::CommandFailed(pin))?
            .into_output_low();
        output
            .set_pwm_frequency(frequency_hz, duty_pct / 100.0)
            .map_err(|_| PwmError::CommandFailed(pin))?;
        self.pwm.insert(
            pin,
            PwmOut {
                pin: output,
                frequency_hz,
            },
        );
        Ok(())
    }

    fn set_duty_cycle(&mut self, pin: u8, duty_pct: f64) -> Result<(), PwmError> {
        if !(0.0..=100.0).contains(&duty_pct) {
            return Err(PwmError::InvalidDuty);
        }
        let out = self.pwm.get_mut(&pin).ok_or(PwmError::NotStarted(pin))?;
        out.pin
            .set_pwm_frequency(out.frequency_hz, duty_pct / 100.0)
            .map_err(|_| PwmError::CommandFailed(pin))?;
        Ok(())
    }
}

// ── Ds3231Clock ───────────────────────────────────────────────

/// DS3231 RTC on the I²C bus.  The clock is battery-backed and run in
/// 24-hour mode.
pub struct Ds3231Clock {
    i2c: I2c,
}

impl Ds3231Clock {
    /// Open the RTC on the given I²C bus.
    pub fn new(bus: u8) -> crate::error::Result<Self> {
        let mut i2c = I2c::with_bus(bus).map_err(|_| Error::Init("I2C bus unavailable"))?;
        i2c.set_slave_address(pins::RTC_I2C_ADDR)
            .map_err(|_| Error::Init("RTC did not accept its address"))?;
        Ok(Self { i2c })
    }
}

fn bcd(raw: u8) -> u32 {
    u32::from((raw >> 4) * 10 + (raw & 0x0F))
}

impl ClockPort for Ds3231Clock {
    fn now(&mut self) -> Result<NaiveDateTime, ClockError> {
        // Registers 0x00–0x06: sec, min, hour, weekday, day, month, year.
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(&[0x00], &mut regs)
            .map_err(|_| ClockError::BusFault)?;

        let sec = bcd(regs[0] & 0x7F);
        let min = bcd(regs[1] & 0x7F);
        let hour = bcd(regs[2] & 0x3F);
        let day = bcd(regs[4] & 0x3F);
        // Bit 7 of the month register is the century rollover flag.
        let month = bcd(regs[5] & 0x1F);
        let century = if regs[5] & 0x80 != 0 { 100 } else { 0 };
        let year = 2000 + century + bcd(regs[6]) as i32;

        // The weekday register (0x03) is ignored: chrono derives the
        // weekday from the date, which also guards against a miswritten
        // register skewing the weekend surcharge.
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, min, sec))
            .ok_or(ClockError::InvalidReading)
    }
}
