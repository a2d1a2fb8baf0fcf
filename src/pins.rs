//! GPIO / peripheral pin assignments for the ParkWarden garage board.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Pin numbers must match the deployed wiring harness; the values below are
//! the ones the production boards are loomed for.

// ---------------------------------------------------------------------------
// Occupancy sensors (infrared reflective, one per parking spot)
// ---------------------------------------------------------------------------

/// Infrared occupancy sensor, spot 1. HIGH = vehicle present.
pub const SENSOR_PIN_1: u8 = 11;
/// Infrared occupancy sensor, spot 2.
pub const SENSOR_PIN_2: u8 = 12;
/// Infrared occupancy sensor, spot 3.
pub const SENSOR_PIN_3: u8 = 13;

/// All occupancy sensor pins, in spot order. `occupied_count` reads them in
/// exactly this order.
pub const SENSOR_PINS: [u8; 3] = [SENSOR_PIN_1, SENSOR_PIN_2, SENSOR_PIN_3];

// ---------------------------------------------------------------------------
// Entrance barrier (SG90-class servo)
// ---------------------------------------------------------------------------

/// PWM output driving the barrier servo.
pub const BARRIER_PWM_PIN: u8 = 16;

/// Servo PWM base frequency (standard 50 Hz / 20 ms frame).
pub const SERVO_PWM_FREQ_HZ: f64 = 50.0;

/// Duty cycle (percent) for the raised/open barrier angle.
pub const DUTY_OPEN: f64 = 12.0;
/// Duty cycle (percent) for the lowered/closed reference angle.
pub const DUTY_CLOSED: f64 = 0.0;
/// Homing pulse asserted once at startup to drive the servo to its 0°
/// reference before the signal is released.
pub const DUTY_HOME: f64 = 2.0;
/// Duty cycle (percent) asserted after every move so the servo does not
/// hold torque between commands.
pub const DUTY_RELEASED: f64 = 0.0;

// ---------------------------------------------------------------------------
// Capacity indicator
// ---------------------------------------------------------------------------

/// Digital output for the "garage full" light. HIGH = lit.
pub const INDICATOR_PIN: u8 = 18;

// ---------------------------------------------------------------------------
// DS3231 real-time clock (I²C)
// ---------------------------------------------------------------------------

/// I²C bus the RTC breakout is attached to.
pub const RTC_I2C_BUS: u8 = 1;
/// Fixed I²C address of the DS3231.
pub const RTC_I2C_ADDR: u16 = 0x68;
