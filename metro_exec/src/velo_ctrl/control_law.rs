//! Velocity control law
//!
//! There are three entry points:
//!
//! - `change_velocity_to`, run when a new target is commanded. Picks full
//!   thrust or braking straight away and schedules the periodic tick.
//! - `update`, run on every tick. Corrects toward the target: brake above it,
//!   full thrust below it, resistance cancelling thrust on it.
//! - `finalize_velocity_change`, run on every tick after `update`. Detects
//!   that the target has been reached (or passed) in the commanded direction
//!   and unschedules the tick.
//!
//! While braking and short of the target both `update` and
//! `finalize_velocity_change` add a friction step, so friction ramps up by
//! two steps per tick.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};

// Internal imports
use super::*;
use comms_if::eqpt::{ShipController, Suspension, Thruster};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T, S, C> VeloCtrl<T, S, C>
where
    T: Thruster,
    S: Suspension,
    C: ShipController
{
    /// Change the target velocity.
    ///
    /// Supersedes any previous target.
    ///
    /// Units: meters/second
    pub fn change_velocity_to(&mut self, target_velocity_ms: i32) {
        self.target_velocity_ms = target_velocity_ms;

        let velocity_ms = self.measured_velocity_ms();

        if target_velocity_ms == velocity_ms {
            debug!("Already at {} m/s", velocity_ms);

            self.disable_thrusters_and_friction();
            self.ticker.disarm();
            return;
        }

        if target_velocity_ms >= self.params.max_grid_velocity_ms {
            info!("Increasing speed to max speed");
            self.is_change_positive = true;

            self.max_thruster_override();
            self.disable_friction();
        }
        else if target_velocity_ms > velocity_ms {
            info!("Increasing speed to {}", target_velocity_ms);
            self.is_change_positive = true;

            self.max_thruster_override();
            self.disable_friction();
        }
        else {
            info!("Decreasing speed to {}", target_velocity_ms);
            self.is_change_positive = false;

            self.disable_thrusters();
            self.increase_friction();
        }

        self.ticker.arm();
    }

    /// Correct the thrust and friction toward the target.
    pub fn update(&mut self) {
        let velocity_ms = self.measured_velocity_ms();

        trace!(
            "VeloCtrl update: {} m/s, target {} m/s",
            velocity_ms,
            self.target_velocity_ms
        );

        if velocity_ms > self.target_velocity_ms {
            self.disable_thrusters();
            self.increase_friction();
        }
        else if velocity_ms < self.target_velocity_ms {
            self.max_thruster_override();
            self.disable_friction();
        }
        else {
            self.thruster_override_to_ignore_resistance();
            self.disable_friction();
        }
    }

    /// Check whether the target has been reached in the commanded direction.
    ///
    /// On arrival the tick is disarmed and the grid is left holding speed.
    /// Returns `true` on arrival.
    pub fn finalize_velocity_change(&mut self) -> bool {
        let velocity_ms = self.measured_velocity_ms();

        let arrived = if self.is_change_positive {
            velocity_ms >= self.target_velocity_ms
        }
        else {
            velocity_ms <= self.target_velocity_ms
        };

        if arrived {
            info!(
                "Target velocity of {} reached. (Current velocity = {})",
                self.target_velocity_ms,
                velocity_ms
            );
            self.ticker.disarm();

            self.disable_friction();
            self.thruster_override_to_ignore_resistance();
        }
        else if !self.is_change_positive {
            self.increase_friction();
        }

        arrived
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
