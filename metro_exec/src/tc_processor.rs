//! # Telecommand processor module
//!
//! The telecommand processor handles the commands coming from any source, turning speed presets
//! into target velocities for VeloCtrl.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use comms_if::tc::Tc;
use metro_lib::data_store::DataStore;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub(crate) fn exec(ds: &mut DataStore, tc: &Tc) {

    match tc {
        Tc::Speed(preset) => {
            let target_velocity_ms = ds.velo_ctrl
                .params()
                .preset_velocity_ms(*preset);

            debug!("Received {} command ({} m/s)", tc, target_velocity_ms);

            ds.velo_ctrl_input.target_velocity_ms = Some(target_velocity_ms);
        }
    }

}

/// Execute a command string as dispatched by the host.
///
/// Anything which isn't a recognised command is ignored.
pub(crate) fn exec_str(ds: &mut DataStore, cmd: &str) {
    match Tc::parse(cmd) {
        Some(tc) => exec(ds, &tc),
        None => {
            debug!("Ignoring unrecognised command \"{}\"", cmd.trim());
            ds.num_ignored_tcs += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::SpeedPreset;
    use metro_lib::{
        sim_client::{SimParams, SimVehicle},
        velo_ctrl::{Params, VeloCtrl},
    };

    fn data_store(params: Params) -> DataStore {
        let sim = SimVehicle::new(SimParams::default()).unwrap();
        let eqpt = sim.equipment();

        DataStore::new(VeloCtrl::new(
            params,
            eqpt.thrusters,
            eqpt.suspensions,
            eqpt.cockpits
        ).unwrap())
    }

    #[test]
    fn test_presets() {
        let mut ds = data_store(Params::default());

        let expected = [
            (SpeedPreset::Straight, 100),
            (SpeedPreset::Turn, 55),
            (SpeedPreset::PreStop, 10),
            (SpeedPreset::Stop, 0),
        ];

        for (preset, v) in expected.iter() {
            exec(&mut ds, &Tc::Speed(*preset));
            assert_eq!(ds.velo_ctrl_input.target_velocity_ms, Some(*v));
        }
    }

    #[test]
    fn test_presets_follow_params() {
        let mut ds = data_store(Params { turn_velocity_ms: 40, ..Params::default() });

        exec_str(&mut ds, "speed turn");
        assert_eq!(ds.velo_ctrl_input.target_velocity_ms, Some(40));
    }

    #[test]
    fn test_unrecognised_ignored() {
        let mut ds = data_store(Params::default());

        for cmd in ["", "speed", "speed warp", "SPEED TURN", "stop"].iter() {
            exec_str(&mut ds, cmd);
            assert_eq!(ds.velo_ctrl_input.target_velocity_ms, None);
        }

        assert_eq!(ds.num_ignored_tcs, 5);
    }
}
