//! # Equipment Interface
//!
//! This module defines the traits the host must implement for each kind of block the velocity
//! controller reads or commands. The host owns the blocks; the controller only ever holds the
//! handles it was given at construction.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Block orientation within the grid
pub mod orientation;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector3;

pub use orientation::{Base6Direction, BlockOrientation, OrientationMatrix};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A thrust actuator.
///
/// A thruster pushes the grid in the direction opposite to its own forward (exhaust) direction.
pub trait Thruster {
    /// Orientation of the block in grid-local coordinates.
    fn orientation(&self) -> BlockOrientation;

    /// Maximum thrust the block can produce.
    ///
    /// Units: Newtons
    fn max_thrust_n(&self) -> f64;

    /// Currently applied thrust override.
    ///
    /// Units: Newtons
    fn thrust_override_n(&self) -> f64;

    /// Set the thrust override.
    ///
    /// Units: Newtons
    fn set_thrust_override_n(&mut self, thrust_n: f64);
}

/// A wheel suspension whose friction can be commanded.
pub trait Suspension {
    /// Current friction.
    ///
    /// Units: percent
    fn friction_pct(&self) -> f64;

    /// Set the friction.
    ///
    /// Units: percent
    fn set_friction_pct(&mut self, friction_pct: f64);
}

/// A seat or cockpit, which doubles as the grid's speed sensor.
pub trait ShipController {
    /// Orientation of the block in grid-local coordinates.
    fn orientation(&self) -> BlockOrientation;

    /// Linear velocity of the grid.
    ///
    /// Units: meters/second
    fn linear_velocity_ms(&self) -> Vector3<f64>;

    /// True if this is the grid's main cockpit.
    fn is_main_cockpit(&self) -> bool;

    /// True if the block can control the grid (passenger seats can't).
    fn can_control_ship(&self) -> bool;

    /// True if the block is currently occupied and controlling the grid.
    fn is_under_control(&self) -> bool;
}
