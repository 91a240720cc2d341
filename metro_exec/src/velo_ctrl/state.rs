//! Implementations for the VeloCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{
    filter_forward_thrusters, select_controller,
    Params, Ticker, VeloCtrlError, MAX_FRICTION_PCT};
use comms_if::eqpt::{ShipController, Suspension, Thruster};
use util::{
    module::State,
    archive::{Archived, ArchiveError, Archiver},
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Velocity control module state
///
/// Owns the handles to the forward thrusters, all suspensions, and the
/// controlling seat, which is also the speed sensor.
pub struct VeloCtrl<T, S, C> {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) forward_thrusters: Vec<T>,
    pub(crate) suspensions: Vec<S>,
    pub(crate) cockpit: C,

    /// Target set by the last command.
    ///
    /// Units: meters/second
    pub(crate) target_velocity_ms: i32,

    /// True if the last command asked to speed up.
    pub(crate) is_change_positive: bool,

    /// Gate for the periodic correction, armed while moving toward a target.
    pub(crate) ticker: Ticker,
}

/// Data required to initialise VeloCtrl.
///
/// The equipment lists are everything the host found on the grid, VeloCtrl
/// selects what it needs from them.
pub struct InitData<T, S, C> {
    pub params: Params,
    pub thrusters: Vec<T>,
    pub suspensions: Vec<S>,
    pub cockpits: Vec<C>,
}

/// Input data to Velocity Control.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// New target velocity, or `None` if there is no new command on this
    /// cycle.
    ///
    /// Units: meters/second
    pub target_velocity_ms: Option<i32>
}

/// Demands VeloCtrl wrote to the equipment on this cycle.
#[derive(Debug, Default, Clone, Serialize)]
pub struct OutputData {
    /// Thrust override of each forward thruster.
    ///
    /// Units: Newtons
    pub thrust_override_n: Vec<f64>,

    /// Friction of each suspension.
    ///
    /// Units: percent
    pub friction_pct: Vec<f64>,
}

/// Status report for VeloCtrl processing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// Units: meters/second
    pub measured_velocity_ms: i32,

    /// Units: meters/second
    pub target_velocity_ms: i32,

    pub mode: VeloMode,

    /// The periodic correction ran on this cycle.
    pub tick_fired: bool,

    /// The target was reached on this cycle and the tick was disarmed.
    pub target_reached: bool,

    /// Number of suspensions at maximum friction.
    pub num_friction_saturated: usize,

    /// Number of thrust demands which had to be clamped on this cycle.
    pub num_thrust_limited: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// What VeloCtrl is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VeloMode {
    /// Holding, no correction scheduled.
    Idle,
    /// Moving toward a higher target.
    Accelerating,
    /// Moving toward a lower target.
    Decelerating,
}

impl Default for VeloMode {
    fn default() -> Self {
        VeloMode::Idle
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T, S, C> State for VeloCtrl<T, S, C>
where
    T: Thruster,
    S: Suspension,
    C: ShipController
{
    type InitData = InitData<T, S, C>;
    type InitError = VeloCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the VeloCtrl module.
    ///
    /// Selects the equipment and opens the status report archive in the
    /// session.
    fn init(init_data: Self::InitData, session: &Session)
        -> Result<Self, Self::InitError>
    {
        let mut velo_ctrl = Self::new(
            init_data.params,
            init_data.thrusters,
            init_data.suspensions,
            init_data.cockpits
        )?;

        velo_ctrl.arch_report = Archiver::from_path(
            session, "velo_ctrl/status_report.csv"
        )?;

        Ok(velo_ctrl)
    }

    /// Perform cyclic processing of Velocity Control.
    ///
    /// A new command is acted on immediately and the tick is not polled on
    /// that cycle. Otherwise, if the tick fires, the correction runs and is
    /// followed by the arrival check.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        self.report = StatusReport::default();

        if let Some(target_velocity_ms) = input_data.target_velocity_ms {
            self.change_velocity_to(target_velocity_ms);
        }
        else if self.ticker.poll() {
            self.report.tick_fired = true;
            self.update();
            self.report.target_reached = self.finalize_velocity_change();
        }

        self.report.measured_velocity_ms = self.measured_velocity_ms();
        self.report.target_velocity_ms = self.target_velocity_ms;
        self.report.mode = self.mode();
        self.report.num_friction_saturated = self.suspensions
            .iter()
            .filter(|s| s.friction_pct() >= MAX_FRICTION_PCT)
            .count();

        let output = self.output();

        trace!("VeloCtrl output:\n    thr: {:?}\n    fri: {:?}",
            output.thrust_override_n,
            output.friction_pct);

        Ok((output, self.report))
    }
}

impl<T, S, C> Archived for VeloCtrl<T, S, C> {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)
    }
}

impl<T, S, C> VeloCtrl<T, S, C>
where
    T: Thruster,
    S: Suspension,
    C: ShipController
{
    /// Build a new controller from everything the host found on the grid.
    ///
    /// Fails only if there is no seat to measure the speed with. A grid with
    /// no forward thrusters is accepted but will never be able to speed up.
    pub fn new(
        params: Params,
        thrusters: Vec<T>,
        suspensions: Vec<S>,
        cockpits: Vec<C>
    ) -> Result<Self, VeloCtrlError> {

        let num_cockpits = cockpits.len();
        let (cockpit, reason) = select_controller(cockpits)?;
        info!(
            "Controlling seat selected from {} candidates ({:?})",
            num_cockpits,
            reason
        );

        let num_thrusters = thrusters.len();
        let forward_thrusters = filter_forward_thrusters(
            thrusters,
            &cockpit.orientation()
        );

        if forward_thrusters.is_empty() {
            warn!(
                "None of the {} thrusters push forward, the grid will not be able to accelerate",
                num_thrusters
            );
        }
        else {
            info!(
                "{} of {} thrusters push forward",
                forward_thrusters.len(),
                num_thrusters
            );
        }

        info!("{} suspensions available for braking", suspensions.len());

        Ok(Self {
            ticker: Ticker::new(params.tick_period_cycles),
            params,
            report: StatusReport::default(),
            arch_report: Archiver::default(),
            forward_thrusters,
            suspensions,
            cockpit,
            target_velocity_ms: 0,
            is_change_positive: false,
        })
    }

    /// Current mode, derived from the tick gate and the last direction.
    pub fn mode(&self) -> VeloMode {
        match (self.ticker.is_armed(), self.is_change_positive) {
            (false, _) => VeloMode::Idle,
            (true, true) => VeloMode::Accelerating,
            (true, false) => VeloMode::Decelerating,
        }
    }

    /// Snapshot of the demands currently applied to the equipment.
    pub fn output(&self) -> OutputData {
        OutputData {
            thrust_override_n: self.forward_thrusters
                .iter()
                .map(|t| t.thrust_override_n())
                .collect(),
            friction_pct: self.suspensions
                .iter()
                .map(|s| s.friction_pct())
                .collect(),
        }
    }
}

impl<T, S, C> VeloCtrl<T, S, C> {

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Units: meters/second
    pub fn target_velocity_ms(&self) -> i32 {
        self.target_velocity_ms
    }

    pub fn is_change_positive(&self) -> bool {
        self.is_change_positive
    }

    /// True while the periodic correction is scheduled.
    pub fn is_tick_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn forward_thrusters(&self) -> &[T] {
        &self.forward_thrusters
    }

    pub fn suspensions(&self) -> &[S] {
        &self.suspensions
    }

    pub fn cockpit(&self) -> &C {
        &self.cockpit
    }

    pub fn report(&self) -> &StatusReport {
        &self.report
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
