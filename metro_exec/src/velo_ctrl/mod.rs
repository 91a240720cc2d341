//! Velocity control module
//!
//! Drives the forward thrusters and the suspension friction of the grid
//! toward a target speed. Acceleration is bang-bang (full thrust or none),
//! braking ramps the friction of every suspension in fixed steps, and a small
//! thrust is held at the target to cancel out the average resistance.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod actuation;
mod control_law;
mod discovery;
mod params;
mod state;
mod ticker;

#[cfg(test)]
pub(crate) mod mock;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use discovery::*;
pub use params::*;
pub use state::*;
pub use ticker::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Highest friction a suspension accepts.
///
/// Units: percent
pub const MAX_FRICTION_PCT: f64 = 100.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during VeloCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum VeloCtrlError {
    #[error("No controlling seat found")]
    NoControllerFound,

    #[error("Could not initialise the VeloCtrl archive: {0}")]
    ArchiveInit(#[from] util::archive::ArchiveError),
}
