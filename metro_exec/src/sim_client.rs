//! # Simulation Client
//!
//! A bench vehicle standing in for the host, so the executive can be run without it. It provides
//! equipment handles implementing the `comms_if::eqpt` traits over a shared, one dimensional
//! vehicle state, and integrates the vehicle speed once per cycle.
//!
//! The model is deliberately crude: the sum of the thrust along the direction of travel, minus a
//! constant drag and a braking force proportional to the mean suspension friction. It is not a
//! model of the host physics and should only be used to exercise the executive.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc};

use comms_if::eqpt::{
    Base6Direction, BlockOrientation, ShipController, Suspension, Thruster,
};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters of the bench vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Units: kilograms
    pub mass_kg: f64,

    /// Constant resistance while moving.
    ///
    /// Units: Newtons
    pub drag_n: f64,

    /// Braking force per percent of mean suspension friction.
    ///
    /// Units: Newtons/percent
    pub brake_n_per_pct: f64,

    /// Highest speed the vehicle can reach.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Units: meters/second
    pub initial_speed_ms: f64,

    /// Direction the vehicle travels in, in grid-local coordinates.
    pub travel_direction: Base6Direction,

    pub thrusters: Vec<SimThrusterParams>,

    pub num_suspensions: usize,

    pub cockpits: Vec<SimCockpitParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimThrusterParams {
    pub orientation: BlockOrientation,

    /// Units: Newtons
    pub max_thrust_n: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimCockpitParams {
    pub orientation: BlockOrientation,

    #[serde(default)]
    pub main: bool,

    #[serde(default)]
    pub can_control: bool,

    #[serde(default)]
    pub under_control: bool,
}

/// The bench vehicle.
pub struct SimVehicle {
    params: SimParams,
    state: Rc<RefCell<SimState>>,
}

/// Handle to one of the vehicle's thrusters.
#[derive(Debug, Clone)]
pub struct SimThruster {
    index: usize,
    orientation: BlockOrientation,
    max_thrust_n: f64,
    state: Rc<RefCell<SimState>>,
}

/// Handle to one of the vehicle's suspensions.
#[derive(Debug, Clone)]
pub struct SimSuspension {
    index: usize,
    state: Rc<RefCell<SimState>>,
}

/// Handle to one of the vehicle's seats.
#[derive(Debug, Clone)]
pub struct SimCockpit {
    params: SimCockpitParams,
    travel_direction: Base6Direction,
    state: Rc<RefCell<SimState>>,
}

#[derive(Debug, Default)]
struct SimState {
    speed_ms: f64,
    thrust_override_n: Vec<f64>,
    friction_pct: Vec<f64>,
}

/// Handles to every block on the vehicle, as the host would enumerate them.
pub struct SimEquipment {
    pub thrusters: Vec<SimThruster>,
    pub suspensions: Vec<SimSuspension>,
    pub cockpits: Vec<SimCockpit>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("The vehicle mass must be positive, found {0} kg")]
    InvalidMass(f64),

    #[error("The maximum speed must be positive, found {0} m/s")]
    InvalidMaxSpeed(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        let seat = BlockOrientation::default();
        let rear = BlockOrientation::new(Base6Direction::Backward, Base6Direction::Up);
        let front = BlockOrientation::new(Base6Direction::Forward, Base6Direction::Up);

        Self {
            mass_kg: 10_000.0,
            drag_n: 400.0,
            brake_n_per_pct: 1_000.0,
            max_speed_ms: 100.0,
            initial_speed_ms: 0.0,
            travel_direction: Base6Direction::Forward,
            thrusters: vec![
                SimThrusterParams { orientation: rear, max_thrust_n: 12_000.0 },
                SimThrusterParams { orientation: rear, max_thrust_n: 12_000.0 },
                SimThrusterParams { orientation: front, max_thrust_n: 12_000.0 },
            ],
            num_suspensions: 8,
            cockpits: vec![
                SimCockpitParams {
                    orientation: seat,
                    main: false,
                    can_control: false,
                    under_control: false,
                },
                SimCockpitParams {
                    orientation: seat,
                    main: true,
                    can_control: true,
                    under_control: false,
                },
            ],
        }
    }
}

impl SimVehicle {
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        if !(params.mass_kg > 0.0) {
            return Err(SimError::InvalidMass(params.mass_kg));
        }
        if !(params.max_speed_ms > 0.0) {
            return Err(SimError::InvalidMaxSpeed(params.max_speed_ms));
        }

        let state = SimState {
            speed_ms: params.initial_speed_ms.max(0.0).min(params.max_speed_ms),
            thrust_override_n: vec![0.0; params.thrusters.len()],
            friction_pct: vec![0.0; params.num_suspensions],
        };

        Ok(Self {
            params,
            state: Rc::new(RefCell::new(state)),
        })
    }

    /// Build handles to every block on the vehicle.
    pub fn equipment(&self) -> SimEquipment {
        SimEquipment {
            thrusters: self.params.thrusters
                .iter()
                .enumerate()
                .map(|(index, p)| SimThruster {
                    index,
                    orientation: p.orientation,
                    max_thrust_n: p.max_thrust_n,
                    state: self.state.clone(),
                })
                .collect(),
            suspensions: (0..self.params.num_suspensions)
                .map(|index| SimSuspension {
                    index,
                    state: self.state.clone(),
                })
                .collect(),
            cockpits: self.params.cockpits
                .iter()
                .map(|p| SimCockpit {
                    params: p.clone(),
                    travel_direction: self.params.travel_direction,
                    state: self.state.clone(),
                })
                .collect(),
        }
    }

    /// Units: meters/second
    pub fn speed_ms(&self) -> f64 {
        self.state.borrow().speed_ms
    }

    /// Advance the vehicle by `dt_s` seconds.
    pub fn step(&mut self, dt_s: f64) {
        let travel = to_f64(self.params.travel_direction.vector());
        let mut state = self.state.borrow_mut();

        // A thruster pushes opposite to the direction it faces
        let thrust_n: f64 = self.params.thrusters
            .iter()
            .zip(state.thrust_override_n.iter())
            .map(|(p, t)| -to_f64(p.orientation.matrix().forward()).dot(&travel) * t)
            .sum();

        let mean_friction_pct = util::maths::mean(&state.friction_pct).unwrap_or(0.0);
        let resist_n = self.params.drag_n + mean_friction_pct * self.params.brake_n_per_pct;

        // Resistance can stop the vehicle but never push it backwards
        let net_n = if state.speed_ms > 0.0 {
            thrust_n - resist_n
        }
        else {
            (thrust_n - resist_n).max(0.0)
        };

        let speed_ms = state.speed_ms + net_n / self.params.mass_kg * dt_s;
        state.speed_ms = speed_ms.max(0.0).min(self.params.max_speed_ms);

        debug!(
            "Sim: {:.3} m/s (thrust {:.0} N, resistance {:.0} N)",
            state.speed_ms,
            thrust_n,
            resist_n
        );
    }
}

impl Thruster for SimThruster {
    fn orientation(&self) -> BlockOrientation {
        self.orientation
    }

    fn max_thrust_n(&self) -> f64 {
        self.max_thrust_n
    }

    fn thrust_override_n(&self) -> f64 {
        self.state.borrow().thrust_override_n[self.index]
    }

    fn set_thrust_override_n(&mut self, thrust_n: f64) {
        self.state.borrow_mut().thrust_override_n[self.index] = thrust_n;
    }
}

impl Suspension for SimSuspension {
    fn friction_pct(&self) -> f64 {
        self.state.borrow().friction_pct[self.index]
    }

    fn set_friction_pct(&mut self, friction_pct: f64) {
        self.state.borrow_mut().friction_pct[self.index] = friction_pct;
    }
}

impl ShipController for SimCockpit {
    fn orientation(&self) -> BlockOrientation {
        self.params.orientation
    }

    fn linear_velocity_ms(&self) -> Vector3<f64> {
        to_f64(self.travel_direction.vector()) * self.state.borrow().speed_ms
    }

    fn is_main_cockpit(&self) -> bool {
        self.params.main
    }

    fn can_control_ship(&self) -> bool {
        self.params.can_control
    }

    fn is_under_control(&self) -> bool {
        self.params.under_control
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn to_f64(v: Vector3<i32>) -> Vector3<f64> {
    v.map(|x| x as f64)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_invalid_params() {
        let params = SimParams { mass_kg: 0.0, ..SimParams::default() };
        assert!(matches!(SimVehicle::new(params), Err(SimError::InvalidMass(_))));

        let params = SimParams { max_speed_ms: -1.0, ..SimParams::default() };
        assert!(matches!(SimVehicle::new(params), Err(SimError::InvalidMaxSpeed(_))));
    }

    #[test]
    fn test_handles_share_state() -> Result<(), SimError> {
        let sim = SimVehicle::new(SimParams::default())?;
        let mut eqpt = sim.equipment();

        assert_eq!(eqpt.thrusters.len(), 3);
        assert_eq!(eqpt.suspensions.len(), 8);
        assert_eq!(eqpt.cockpits.len(), 2);

        eqpt.thrusters[1].set_thrust_override_n(500.0);
        eqpt.suspensions[3].set_friction_pct(40.0);

        let again = sim.equipment();
        assert_eq!(again.thrusters[1].thrust_override_n(), 500.0);
        assert_eq!(again.suspensions[3].friction_pct(), 40.0);

        Ok(())
    }

    #[test]
    fn test_forward_thrust_accelerates() -> Result<(), SimError> {
        let mut sim = SimVehicle::new(SimParams::default())?;
        let mut eqpt = sim.equipment();

        // Rear facing thrusters push forward
        eqpt.thrusters[0].set_thrust_override_n(10_400.0);
        sim.step(1.0);

        assert!((sim.speed_ms() - 1.0).abs() < 1e-9);
        assert_eq!(eqpt.cockpits[0].linear_velocity_ms(), Vector3::new(0.0, 0.0, -1.0));

        Ok(())
    }

    #[test]
    fn test_resistance_never_reverses() -> Result<(), SimError> {
        let params = SimParams { initial_speed_ms: 0.5, ..SimParams::default() };
        let mut sim = SimVehicle::new(params)?;
        let mut eqpt = sim.equipment();

        for s in eqpt.suspensions.iter_mut() {
            s.set_friction_pct(100.0);
        }

        for _ in 0..10 {
            sim.step(0.1);
        }

        assert_eq!(sim.speed_ms(), 0.0);

        Ok(())
    }

    #[test]
    fn test_speed_limited() -> Result<(), SimError> {
        let mut sim = SimVehicle::new(SimParams::default())?;
        let mut eqpt = sim.equipment();

        eqpt.thrusters[0].set_thrust_override_n(12_000.0);
        eqpt.thrusters[1].set_thrust_override_n(12_000.0);

        for _ in 0..1000 {
            sim.step(0.1);
        }

        assert_eq!(sim.speed_ms(), 100.0);

        Ok(())
    }
}
