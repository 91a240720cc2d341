//! # Metro Executable Parameters
//!
//! This module provide parameters for the metro executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

use crate::sim_client::SimParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetroExecParams {

    /// Target period of one cycle, the host runs its fast update at 60 Hz.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Bench vehicle driven by the executable
    pub sim: SimParams,
}

impl Default for MetroExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 1.0 / 60.0,
            sim: SimParams::default(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
