//! Equipment demands and speed measurement

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use comms_if::eqpt::{ShipController, Suspension, Thruster};
use util::maths::{clamp, round_half_even};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T, S, C> VeloCtrl<T, S, C>
where
    T: Thruster,
    S: Suspension,
    C: ShipController
{
    /// Speed of the grid, rounded to the nearest whole meter per second.
    ///
    /// Halfway speeds round to the even value, 54.5 m/s reads as 54.
    ///
    /// Units: meters/second
    pub fn measured_velocity_ms(&self) -> i32 {
        round_half_even(self.cockpit.linear_velocity_ms().norm()) as i32
    }

    /// Per-thruster override which cancels out the average resistance.
    ///
    /// `None` if there are no forward thrusters to share it between.
    ///
    /// Units: Newtons
    pub fn resistance_thrust_n(&self) -> Option<f64> {
        match self.forward_thrusters.len() {
            0 => None,
            n => Some((self.params.resistance_n / n as u32) as f64)
        }
    }

    /// Set every forward thruster to its maximum thrust.
    pub(crate) fn max_thruster_override(&mut self) {
        for i in 0..self.forward_thrusters.len() {
            let max = self.forward_thrusters[i].max_thrust_n();
            self.set_thrust_override(i, max);
        }
    }

    /// Set every forward thruster to the resistance cancelling thrust.
    pub(crate) fn thruster_override_to_ignore_resistance(&mut self) {
        if let Some(thrust_n) = self.resistance_thrust_n() {
            for i in 0..self.forward_thrusters.len() {
                self.set_thrust_override(i, thrust_n);
            }
        }
    }

    /// Zero the override of every forward thruster.
    ///
    /// The thrusters stay powered.
    pub(crate) fn disable_thrusters(&mut self) {
        for i in 0..self.forward_thrusters.len() {
            self.set_thrust_override(i, 0.0);
        }
    }

    /// Add one friction step to every suspension, up to the maximum.
    pub(crate) fn increase_friction(&mut self) {
        let step = self.params.friction_step_pct;

        for s in self.suspensions.iter_mut() {
            let increased = s.friction_pct() + step;
            s.set_friction_pct(clamp(&increased, &0.0, &MAX_FRICTION_PCT));
        }
    }

    /// Zero the friction of every suspension.
    ///
    /// The suspensions stay powered.
    pub(crate) fn disable_friction(&mut self) {
        for s in self.suspensions.iter_mut() {
            s.set_friction_pct(0.0);
        }
    }

    pub(crate) fn disable_thrusters_and_friction(&mut self) {
        self.disable_thrusters();
        self.disable_friction();
    }

    /// Write a thrust demand, clamped to what the thruster can do.
    ///
    /// Clamped demands are counted in the status report.
    fn set_thrust_override(&mut self, index: usize, demand_n: f64) {
        let thruster = &mut self.forward_thrusters[index];
        let max_n = thruster.max_thrust_n().max(0.0);
        let thrust_n = clamp(&demand_n, &0.0, &max_n);

        if thrust_n != demand_n {
            self.report.num_thrust_limited += 1;
        }

        thruster.set_thrust_override_n(thrust_n);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::velo_ctrl::mock;

    #[test]
    fn test_measured_velocity_rounding() {
        let (velo_ctrl, speed) = mock::build(Params::default(), 1000.0, 2, 0.0);

        speed.set(54.49);
        assert_eq!(velo_ctrl.measured_velocity_ms(), 54);
        speed.set(54.5);
        assert_eq!(velo_ctrl.measured_velocity_ms(), 54);
        speed.set(55.5);
        assert_eq!(velo_ctrl.measured_velocity_ms(), 56);
        speed.set(0.5);
        assert_eq!(velo_ctrl.measured_velocity_ms(), 0);
        speed.set(-12.6);
        assert_eq!(velo_ctrl.measured_velocity_ms(), 13);
    }

    #[test]
    fn test_friction_saturates() {
        let (mut velo_ctrl, _) = mock::build(Params::default(), 1000.0, 3, 95.0);

        velo_ctrl.increase_friction();
        velo_ctrl.increase_friction();
        for s in velo_ctrl.suspensions() {
            assert_eq!(s.friction_pct, 99.0);
        }

        // Once at the top, further steps change nothing
        for _ in 0..10 {
            velo_ctrl.increase_friction();
            for s in velo_ctrl.suspensions() {
                assert_eq!(s.friction_pct, MAX_FRICTION_PCT);
            }
        }
    }

    #[test]
    fn test_friction_recovers_from_out_of_range() {
        let (mut velo_ctrl, _) = mock::build(Params::default(), 1000.0, 2, -10.0);

        velo_ctrl.increase_friction();
        for s in velo_ctrl.suspensions() {
            assert_eq!(s.friction_pct, 0.0);
        }
    }

    #[test]
    fn test_resistance_thrust_clamped() {
        // 400 N over two thrusters is 200 N each, more than they can give
        let (mut velo_ctrl, _) = mock::build(Params::default(), 150.0, 2, 0.0);

        assert_eq!(velo_ctrl.resistance_thrust_n(), Some(200.0));

        velo_ctrl.thruster_override_to_ignore_resistance();

        for t in velo_ctrl.forward_thrusters() {
            assert_eq!(t.thrust_override_n, 150.0);
        }
        assert_eq!(velo_ctrl.report().num_thrust_limited, 2);
    }

    #[test]
    fn test_resistance_thrust_integer_share() {
        let params = Params { resistance_n: 401, ..Params::default() };
        let (velo_ctrl, _) = mock::build(params, 1000.0, 2, 0.0);

        assert_eq!(velo_ctrl.resistance_thrust_n(), Some(200.0));
    }
}
