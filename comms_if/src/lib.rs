//! # Communications interface crate.
//!
//! Provides the interfaces shared between the host and the velocity controller: the equipment
//! traits the host implements for its blocks, and the text commands the host dispatches.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Text commands issued to the controller
pub mod tc;

/// Equipment traits and orientation types for host blocks
pub mod eqpt;
