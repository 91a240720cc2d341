//! In-process equipment used by the VeloCtrl tests.

use std::{cell::Cell, rc::Rc};

use comms_if::eqpt::{
    Base6Direction, BlockOrientation, ShipController, Suspension, Thruster,
};
use nalgebra::Vector3;

use super::{Params, VeloCtrl};

#[derive(Debug, Clone)]
pub struct MockThruster {
    pub orientation: BlockOrientation,
    pub max_thrust_n: f64,
    pub thrust_override_n: f64,
}

#[derive(Debug, Clone)]
pub struct MockSuspension {
    pub friction_pct: f64,
}

#[derive(Debug, Clone)]
pub struct MockCockpit {
    pub id: usize,
    pub orientation: BlockOrientation,
    pub main: bool,
    pub can_control: bool,
    pub under_control: bool,
    /// Speed along the cockpit's forward axis, shared with the test.
    pub speed_ms: Rc<Cell<f64>>,
}

impl MockThruster {
    pub fn facing(forward: Base6Direction, max_thrust_n: f64) -> Self {
        Self {
            orientation: BlockOrientation::new(forward, Base6Direction::Up),
            max_thrust_n,
            thrust_override_n: 0.0,
        }
    }
}

impl MockCockpit {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            orientation: BlockOrientation::default(),
            main: false,
            can_control: false,
            under_control: false,
            speed_ms: Rc::new(Cell::new(0.0)),
        }
    }
}

impl Thruster for MockThruster {
    fn orientation(&self) -> BlockOrientation {
        self.orientation
    }

    fn max_thrust_n(&self) -> f64 {
        self.max_thrust_n
    }

    fn thrust_override_n(&self) -> f64 {
        self.thrust_override_n
    }

    fn set_thrust_override_n(&mut self, thrust_n: f64) {
        self.thrust_override_n = thrust_n;
    }
}

impl Suspension for MockSuspension {
    fn friction_pct(&self) -> f64 {
        self.friction_pct
    }

    fn set_friction_pct(&mut self, friction_pct: f64) {
        self.friction_pct = friction_pct;
    }
}

impl ShipController for MockCockpit {
    fn orientation(&self) -> BlockOrientation {
        self.orientation
    }

    fn linear_velocity_ms(&self) -> Vector3<f64> {
        let fwd = self.orientation.matrix().forward();
        Vector3::new(fwd.x as f64, fwd.y as f64, fwd.z as f64) * self.speed_ms.get()
    }

    fn is_main_cockpit(&self) -> bool {
        self.main
    }

    fn can_control_ship(&self) -> bool {
        self.can_control
    }

    fn is_under_control(&self) -> bool {
        self.under_control
    }
}

pub type MockVeloCtrl = VeloCtrl<MockThruster, MockSuspension, MockCockpit>;

/// Build a controller with two forward thrusters of `max_thrust_n`, one
/// sideways thruster, and `num_suspensions` suspensions all at
/// `friction_pct`.
///
/// Returns the controller and the handle used to set the measured speed.
pub fn build(
    params: Params,
    max_thrust_n: f64,
    num_suspensions: usize,
    friction_pct: f64,
) -> (MockVeloCtrl, Rc<Cell<f64>>) {
    let mut cockpit = MockCockpit::new(0);
    cockpit.main = true;
    let speed = cockpit.speed_ms.clone();

    let thrusters = vec![
        MockThruster::facing(Base6Direction::Backward, max_thrust_n),
        MockThruster::facing(Base6Direction::Left, max_thrust_n),
        MockThruster::facing(Base6Direction::Backward, max_thrust_n),
    ];

    let suspensions = vec![MockSuspension { friction_pct }; num_suspensions];

    let velo_ctrl = VeloCtrl::new(params, thrusters, suspensions, vec![cockpit])
        .expect("a cockpit was provided");

    (velo_ctrl, speed)
}
