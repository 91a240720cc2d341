//! Parameters structure for VeloCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::tc::SpeedPreset;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Velocity control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- ACTUATION ----

    /// Average resistance the grid experiences at constant speed (rails,
    /// slopes). Shared evenly between the forward thrusters when holding the
    /// target speed.
    ///
    /// Units: Newtons
    pub resistance_n: u32,

    /// Friction added to every suspension on each braking step.
    ///
    /// Units: percent
    pub friction_step_pct: f64,

    /// Number of executive cycles between two ticks of the control law.
    pub tick_period_cycles: u32,

    // ---- LIMITS ----

    /// Highest speed the host allows any grid to reach. Targets at or above
    /// this always accelerate.
    ///
    /// Units: meters/second
    pub max_grid_velocity_ms: i32,

    // ---- PRESETS ----

    /// Target for `speed straight`.
    ///
    /// Units: meters/second
    pub straight_velocity_ms: i32,

    /// Target for `speed turn`.
    ///
    /// Units: meters/second
    pub turn_velocity_ms: i32,

    /// Target for `speed prestop`.
    ///
    /// Units: meters/second
    pub prestop_velocity_ms: i32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            resistance_n: 400,
            friction_step_pct: 2.0,
            tick_period_cycles: 10,
            max_grid_velocity_ms: 100,
            straight_velocity_ms: 100,
            turn_velocity_ms: 55,
            prestop_velocity_ms: 10,
        }
    }
}

impl Params {
    /// Target velocity of a preset.
    ///
    /// Units: meters/second
    pub fn preset_velocity_ms(&self, preset: SpeedPreset) -> i32 {
        match preset {
            SpeedPreset::Turn => self.turn_velocity_ms,
            SpeedPreset::Straight => self.straight_velocity_ms,
            SpeedPreset::PreStop => self.prestop_velocity_ms,
            SpeedPreset::Stop => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_presets() {
        let params = Params::default();

        assert_eq!(params.preset_velocity_ms(SpeedPreset::Turn), 55);
        assert_eq!(params.preset_velocity_ms(SpeedPreset::Straight), 100);
        assert_eq!(params.preset_velocity_ms(SpeedPreset::PreStop), 10);
        assert_eq!(params.preset_velocity_ms(SpeedPreset::Stop), 0);
    }

    #[test]
    fn test_partial_params_file() -> Result<(), util::params::LoadError> {
        let params: Params = util::params::from_str(
            "resistance_n = 600\nturn_velocity_ms = 40\n"
        )?;

        assert_eq!(params.resistance_n, 600);
        assert_eq!(params.turn_velocity_ms, 40);
        assert_eq!(params.friction_step_pct, 2.0);
        assert_eq!(params.max_grid_velocity_ms, 100);

        Ok(())
    }
}
