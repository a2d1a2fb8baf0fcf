//! Integration tests for occupancy sensing, barrier actuation, and the
//! capacity-indicator policy, driven through the simulation adapter.

use parkwarden::adapters::sim::{PwmCall, SimHardware};
use parkwarden::app::controller::GarageController;
use parkwarden::app::ports::{GpioError, PwmError, PwmPort};
use parkwarden::config::GarageConfig;
use parkwarden::error::Error;
use parkwarden::pins;

fn make_garage() -> (GarageController, SimHardware) {
    let mut hw = SimHardware::new();
    let garage = GarageController::init(GarageConfig::default(), &mut hw)
        .expect("init against sim adapter cannot fail");
    (garage, hw)
}

/// Number of duty-cycle commands issued to the barrier pin so far.
fn barrier_cmds(hw: &SimHardware) -> usize {
    hw.duty_history(pins::BARRIER_PWM_PIN).len()
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn init_homes_barrier_and_forces_indicator_off() {
    let (garage, hw) = make_garage();

    assert!(!garage.door_open());
    assert!(!garage.indicator_on());

    // Homing pulse at the 0° reference duty, then signal release.
    assert_eq!(
        hw.duty_history(pins::BARRIER_PWM_PIN),
        vec![pins::DUTY_HOME, pins::DUTY_RELEASED]
    );
    assert_eq!(
        hw.pwm_calls[0],
        PwmCall::Start {
            pin: pins::BARRIER_PWM_PIN,
            frequency_hz: pins::SERVO_PWM_FREQ_HZ,
            duty_pct: pins::DUTY_HOME,
        }
    );
    assert_eq!(hw.output_level(pins::INDICATOR_PIN), Some(false));
    assert_eq!(hw.gpio_writes, vec![(pins::INDICATOR_PIN, false)]);
}

// ── Occupancy sensing ─────────────────────────────────────────

#[test]
fn is_occupied_reflects_sensor_level() {
    let (garage, mut hw) = make_garage();

    hw.set_input(pins::SENSOR_PIN_1, true);
    assert!(garage.is_occupied(&mut hw, pins::SENSOR_PIN_1).unwrap());

    // No caching: a fresh read sees the new level.
    hw.set_input(pins::SENSOR_PIN_1, false);
    assert!(!garage.is_occupied(&mut hw, pins::SENSOR_PIN_1).unwrap());
}

#[test]
fn is_occupied_rejects_non_sensor_pins() {
    let (garage, mut hw) = make_garage();

    for pin in [0, 14, pins::BARRIER_PWM_PIN, pins::INDICATOR_PIN, 255] {
        assert_eq!(
            garage.is_occupied(&mut hw, pin),
            Err(Error::UnknownSensor(pin))
        );
    }
}

#[test]
fn sensor_validation_happens_before_any_peripheral_access() {
    let (garage, _) = make_garage();

    // A completely unconfigured peripheral: any read would come back as
    // NotConfigured.  Seeing UnknownSensor proves validation ran first.
    let mut untouched = SimHardware::new();
    assert_eq!(
        garage.is_occupied(&mut untouched, 99),
        Err(Error::UnknownSensor(99))
    );
}

#[test]
fn occupied_count_matches_every_sensor_combination() {
    let (garage, mut hw) = make_garage();

    for mask in 0u8..8 {
        for (i, pin) in pins::SENSOR_PINS.iter().enumerate() {
            hw.set_input(*pin, mask & (1 << i) != 0);
        }
        let expected = mask.count_ones() as u8;
        assert_eq!(
            garage.occupied_count(&mut hw).unwrap(),
            expected,
            "mask {mask:03b}"
        );
    }
}

#[test]
fn occupied_count_propagates_peripheral_faults() {
    let (garage, _) = make_garage();

    let mut untouched = SimHardware::new();
    assert_eq!(
        garage.occupied_count(&mut untouched),
        Err(Error::Gpio(GpioError::NotConfigured(pins::SENSOR_PIN_1)))
    );
}

// ── Barrier actuation ─────────────────────────────────────────

#[test]
fn open_door_drives_open_duty_then_releases() {
    let (mut garage, mut hw) = make_garage();

    garage.open_door(&mut hw).unwrap();

    assert!(garage.door_open());
    let history = hw.duty_history(pins::BARRIER_PWM_PIN);
    assert_eq!(
        &history[history.len() - 2..],
        &[pins::DUTY_OPEN, pins::DUTY_RELEASED]
    );
}

#[test]
fn close_door_drives_closed_duty_then_releases() {
    let (mut garage, mut hw) = make_garage();

    garage.open_door(&mut hw).unwrap();
    garage.close_door(&mut hw).unwrap();

    assert!(!garage.door_open());
    let history = hw.duty_history(pins::BARRIER_PWM_PIN);
    assert_eq!(
        &history[history.len() - 2..],
        &[pins::DUTY_CLOSED, pins::DUTY_RELEASED]
    );
}

#[test]
fn close_door_twice_reactuates_each_time() {
    let (mut garage, mut hw) = make_garage();

    let before = barrier_cmds(&hw);
    garage.close_door(&mut hw).unwrap();
    assert!(!garage.door_open());
    assert_eq!(barrier_cmds(&hw), before + 2);

    garage.close_door(&mut hw).unwrap();
    assert!(!garage.door_open());
    // Unguarded by design: the second close re-runs the full actuation.
    assert_eq!(barrier_cmds(&hw), before + 4);
}

#[test]
fn open_door_while_open_reactuates() {
    let (mut garage, mut hw) = make_garage();

    garage.open_door(&mut hw).unwrap();
    let before = barrier_cmds(&hw);
    garage.open_door(&mut hw).unwrap();

    assert!(garage.door_open());
    assert_eq!(barrier_cmds(&hw), before + 2);
}

#[test]
fn failed_actuation_leaves_recorded_state_unchanged() {
    struct DeadServo;

    impl PwmPort for DeadServo {
        fn start(&mut self, pin: u8, _: f64, _: f64) -> Result<(), PwmError> {
            Err(PwmError::CommandFailed(pin))
        }
        fn set_duty_cycle(&mut self, pin: u8, _: f64) -> Result<(), PwmError> {
            Err(PwmError::CommandFailed(pin))
        }
    }

    let (mut garage, _) = make_garage();

    let err = garage.open_door(&mut DeadServo).unwrap_err();
    assert_eq!(
        err,
        Error::Pwm(PwmError::CommandFailed(pins::BARRIER_PWM_PIN))
    );
    assert!(!garage.door_open(), "failed open must not record an open door");
}

// ── Capacity indicator ────────────────────────────────────────

#[test]
fn indicator_setters_are_unconditional() {
    let (mut garage, mut hw) = make_garage();

    garage.turn_indicator_on(&mut hw).unwrap();
    assert!(garage.indicator_on());
    assert_eq!(hw.output_level(pins::INDICATOR_PIN), Some(true));

    garage.turn_indicator_off(&mut hw).unwrap();
    assert!(!garage.indicator_on());
    assert_eq!(hw.output_level(pins::INDICATOR_PIN), Some(false));
}

#[test]
fn failed_indicator_write_leaves_recorded_state_unchanged() {
    let (mut garage, _) = make_garage();

    let mut untouched = SimHardware::new();
    assert!(garage.turn_indicator_on(&mut untouched).is_err());
    assert!(!garage.indicator_on());
}

#[test]
fn indicator_lights_only_at_full_capacity() {
    let (mut garage, mut hw) = make_garage();

    for occupied in 0..=2u8 {
        for (i, pin) in pins::SENSOR_PINS.iter().enumerate() {
            hw.set_input(*pin, (i as u8) < occupied);
        }
        garage.update_indicator(&mut hw).unwrap();
        assert!(!garage.indicator_on(), "{occupied}/3 must not light the sign");
        assert_eq!(hw.output_level(pins::INDICATOR_PIN), Some(false));
    }

    for pin in pins::SENSOR_PINS {
        hw.set_input(pin, true);
    }
    garage.update_indicator(&mut hw).unwrap();
    assert!(garage.indicator_on());
    assert_eq!(hw.output_level(pins::INDICATOR_PIN), Some(true));
}

#[test]
fn indicator_transitions_both_directions() {
    let (mut garage, mut hw) = make_garage();

    // off → on when the last spot fills.
    for pin in pins::SENSOR_PINS {
        hw.set_input(pin, true);
    }
    garage.update_indicator(&mut hw).unwrap();
    assert!(garage.indicator_on());

    // on → off as soon as one spot frees up.
    hw.set_input(pins::SENSOR_PIN_2, false);
    garage.update_indicator(&mut hw).unwrap();
    assert!(!garage.indicator_on());
}
