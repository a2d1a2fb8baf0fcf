//! System configuration parameters
//!
//! All tunable parameters for the ParkWarden garage.
//! Values can be overridden via a JSON config file passed to the binary.

use serde::{Deserialize, Serialize};

/// Core garage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarageConfig {
    // --- Deployment ---
    /// True when driving a real servo: barrier moves are held for
    /// `servo_settle_ms` before the signal is released.  False in
    /// simulation/test runs, where the wait is meaningless.
    pub hardware_timing: bool,
    /// How long the servo needs to complete a full swing (milliseconds).
    pub servo_settle_ms: u64,

    // --- Fees ---
    /// Price per started parking hour, in currency units.
    pub hourly_rate: f64,
    /// Surcharge applied when the exit falls on a weekend (percent).
    pub weekend_surcharge_percent: f64,

    // --- Timing ---
    /// Occupancy polling interval for the deployment loop (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            // Deployment
            hardware_timing: false,
            servo_settle_ms: 1000,

            // Fees
            hourly_rate: 2.50,
            weekend_surcharge_percent: 25.0,

            // Timing
            poll_interval_ms: 500, // 2 Hz
        }
    }
}

impl GarageConfig {
    /// Parse a configuration from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reject out-of-range values instead of silently clamping them.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.hourly_rate < 0.0 || !self.hourly_rate.is_finite() {
            return Err("hourly_rate must be finite and non-negative");
        }
        if self.weekend_surcharge_percent < 0.0 || !self.weekend_surcharge_percent.is_finite() {
            return Err("weekend_surcharge_percent must be finite and non-negative");
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be non-zero");
        }
        Ok(())
    }
}
