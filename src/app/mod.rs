//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the ParkWarden garage:
//! occupancy sensing, barrier actuation, the capacity-indicator policy, and
//! fee calculation.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod controller;
pub mod ports;
