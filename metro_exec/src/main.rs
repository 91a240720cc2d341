//! Main metro executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling
//!         - Velocity control processing
//!         - Archiving
//!         - Bench vehicle step
//!
//! # Modules
//!
//! All modules (e.g. `velo_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use metro_lib::{
    data_store::DataStore,
    params::MetroExecParams,
    sim_client::SimVehicle,
    velo_ctrl::{self, VeloCtrl, VeloMode},
};

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::WrapErr};
use structopt::StructOpt;

// Internal
use util::{
    archive::Archived,
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingTcs},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Script run when no other command source is given: depart, take a curve, approach a station and
/// stop.
const DEMO_SCRIPT: &str = "\
1.0: speed straight;
30.0: speed turn;
45.0: speed prestop;
60.0: speed stop;
";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "metro_exec", about = "Metro velocity controller on a bench vehicle")]
struct Opt {
    /// Script of timed commands to run. The built-in demo script is run if neither this nor
    /// `--stdin` is given.
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Read commands from stdin, one per line
    #[structopt(long, conflicts_with = "script")]
    stdin: bool,

    /// Run cycles back to back instead of in real time
    #[structopt(long)]
    fast: bool,

    /// Stop after this many seconds of simulated time
    #[structopt(long)]
    duration_s: Option<f64>,

    /// Minimum log level, one of `info`, `debug` or `trace`
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    Script(ScriptInterpreter),
    Stdin(Receiver<String>),
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "metro_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opt.log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Metro Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let exec_params: MetroExecParams = util::params::load(
        "metro_exec.toml"
    ).wrap_err("Could not load exec params")?;

    let velo_ctrl_params: velo_ctrl::Params = util::params::load(
        "velo_ctrl.toml"
    ).wrap_err("Could not load VeloCtrl params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    let mut tc_source = if opt.stdin {
        info!("Reading commands from stdin\n");
        TcSource::Stdin(spawn_stdin_reader())
    }
    else {
        let si = match opt.script {
            Some(ref path) => {
                info!("Loading script from {:?}", path);
                ScriptInterpreter::new(path)
            },
            None => {
                info!("No script provided, running the demo script");
                ScriptInterpreter::from_script(DEMO_SCRIPT)
            }
        }.wrap_err("Failed to load script")?;

        info!(
            "Loaded script lasts {:.02} s and contains {} TCs\n",
            si.get_duration(),
            si.get_num_tcs()
        );

        TcSource::Script(si)
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut sim = SimVehicle::new(exec_params.sim.clone())
        .wrap_err("Failed to initialise the bench vehicle")?;
    let eqpt = sim.equipment();
    info!(
        "Bench vehicle has {} thrusters, {} suspensions and {} seats",
        eqpt.thrusters.len(),
        eqpt.suspensions.len(),
        eqpt.cockpits.len()
    );

    let velo_ctrl = VeloCtrl::init(
        velo_ctrl::InitData {
            params: velo_ctrl_params,
            thrusters: eqpt.thrusters,
            suspensions: eqpt.suspensions,
            cockpits: eqpt.cockpits,
        },
        &session
    ).wrap_err("Failed to initialise VeloCtrl")?;
    info!("VeloCtrl init complete");

    let mut ds = DataStore::new(velo_ctrl);

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let cycles_per_s = ((1.0 / exec_params.cycle_period_s).round() as u128).max(1);
    let mut end_of_tcs = false;

    info!("Beginning main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(exec_params.cycle_period_s);

        // ---- TELECOMMAND PROCESSING ----

        match tc_source {
            TcSource::Script(ref mut si) => {
                let pending = match opt.fast {
                    true => si.get_pending_tcs_at(ds.sim_time_s),
                    false => si.get_pending_tcs()
                };

                match pending {
                    PendingTcs::None => (),
                    PendingTcs::Some(tc_vec) => {
                        for tc in tc_vec.iter() {
                            tc_processor::exec(&mut ds, tc);
                        }
                    },
                    PendingTcs::EndOfScript => {
                        if !end_of_tcs {
                            info!("End of TC script reached, stopping once idle");
                            end_of_tcs = true;
                        }
                    }
                }
            },
            TcSource::Stdin(ref rx) => loop {
                match rx.try_recv() {
                    Ok(cmd) => tc_processor::exec_str(&mut ds, &cmd),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if !end_of_tcs {
                            info!("End of stdin reached, stopping once idle");
                            end_of_tcs = true;
                        }
                        break
                    }
                }
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        match ds.velo_ctrl.proc(&ds.velo_ctrl_input) {
            Ok((o, r)) => {
                ds.velo_ctrl_output = o;
                ds.velo_ctrl_status_rpt = r;
            },
            Err(e) => match e {}
        };

        if ds.num_cycles % cycles_per_s == 0 {
            debug!(
                "Sim time {:.1} s: {} m/s (target {} m/s, {:?})",
                ds.sim_time_s,
                ds.velo_ctrl_status_rpt.measured_velocity_ms,
                ds.velo_ctrl_status_rpt.target_velocity_ms,
                ds.velo_ctrl_status_rpt.mode
            );
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.velo_ctrl.write() {
            warn!("Could not write the VeloCtrl archive: {}", e);
        }

        // ---- BENCH VEHICLE ----

        sim.step(exec_params.cycle_period_s);

        // ---- CYCLE MANAGEMENT ----

        ds.cycle_end();

        if end_of_tcs && ds.velo_ctrl_status_rpt.mode == VeloMode::Idle {
            info!("No more commands and VeloCtrl is idle, stopping");
            break
        }

        if let Some(duration_s) = opt.duration_s {
            if ds.sim_time_s >= duration_s {
                info!("Run duration of {:.02} s reached, stopping", duration_s);
                break
            }
        }

        if opt.fast {
            continue
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }
    }

    // ---- SHUTDOWN ----

    info!(
        "Final speed {:.2} m/s after {} cycles, {} commands ignored",
        sim.speed_ms(),
        ds.num_cycles,
        ds.num_ignored_tcs
    );

    session.save("velo_ctrl/final_status.json", &ds.velo_ctrl_status_rpt)
        .wrap_err("Failed to save the final VeloCtrl status")?;

    info!("End of execution");

    Ok(())
}

/// Read lines from stdin on a background thread.
///
/// The returned channel disconnects when stdin is closed.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break
                    }
                },
                Err(e) => {
                    warn!("Could not read from stdin: {}", e);
                    break
                }
            }
        }
    });

    rx
}
