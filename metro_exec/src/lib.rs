//! # Metro library.
//!
//! This library allows other crates in the workspace, and the benches, to access items defined
//! inside the metro crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Executable parameters
pub mod params;

/// Simulation client - a bench vehicle standing in for the host
pub mod sim_client;

/// Velocity control module - holds the grid at the commanded speed using thrusters and suspension
/// friction
pub mod velo_ctrl;
