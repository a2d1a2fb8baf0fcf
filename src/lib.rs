//! ParkWarden garage controller library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All Raspberry-Pi-specific code lives in
//! [`adapters::rpi`] behind the `rpi` feature; everything else builds and
//! tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pins;
