//! # Data Store

use crate::{
    sim_client::{SimCockpit, SimSuspension, SimThruster},
    velo_ctrl,
};

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// Velocity controller driving the bench vehicle.
pub type MetroVeloCtrl = velo_ctrl::VeloCtrl<SimThruster, SimSuspension, SimCockpit>;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Simulation elapsed time
    pub sim_time_s: f64,

    // VeloCtrl
    pub velo_ctrl: MetroVeloCtrl,
    pub velo_ctrl_input: velo_ctrl::InputData,
    pub velo_ctrl_output: velo_ctrl::OutputData,
    pub velo_ctrl_status_rpt: velo_ctrl::StatusReport,

    // Monitoring Counters
    /// Number of commands which weren't recognised
    pub num_ignored_tcs: u64,

    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    pub fn new(velo_ctrl: MetroVeloCtrl) -> Self {
        Self {
            num_cycles: 0,
            sim_time_s: 0.0,
            velo_ctrl,
            velo_ctrl_input: velo_ctrl::InputData::default(),
            velo_ctrl_output: velo_ctrl::OutputData::default(),
            velo_ctrl_status_rpt: velo_ctrl::StatusReport::default(),
            num_ignored_tcs: 0,
            num_consec_cycle_overruns: 0,
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and advances the simulation
    /// time.
    pub fn cycle_start(&mut self, cycle_period_s: f64) {
        self.velo_ctrl_input = velo_ctrl::InputData::default();
        self.velo_ctrl_output = velo_ctrl::OutputData::default();
        self.velo_ctrl_status_rpt = velo_ctrl::StatusReport::default();

        self.sim_time_s = self.num_cycles as f64 * cycle_period_s;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim_client::{SimParams, SimVehicle};
    use crate::velo_ctrl::{Params, VeloCtrl};

    #[test]
    fn test_cycle_management() {
        let sim = SimVehicle::new(SimParams::default()).unwrap();
        let eqpt = sim.equipment();
        let velo_ctrl = VeloCtrl::new(
            Params::default(),
            eqpt.thrusters,
            eqpt.suspensions,
            eqpt.cockpits
        ).unwrap();

        let mut ds = DataStore::new(velo_ctrl);

        ds.velo_ctrl_input.target_velocity_ms = Some(55);
        ds.cycle_end();
        ds.cycle_end();
        ds.cycle_start(0.5);

        assert_eq!(ds.velo_ctrl_input.target_velocity_ms, None);
        assert_eq!(ds.num_cycles, 2);
        assert_eq!(ds.sim_time_s, 1.0);
    }
}
