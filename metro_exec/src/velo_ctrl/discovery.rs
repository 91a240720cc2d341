//! Equipment discovery
//!
//! Selection of the controlling seat and of the thrusters which push the grid
//! forward. These run once, when VeloCtrl is built, on the full lists of
//! blocks the host found on the grid.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::VeloCtrlError;
use comms_if::eqpt::{BlockOrientation, ShipController, Thruster};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Why a particular seat was chosen as the controlling seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionReason {
    /// The seat is the grid's main cockpit.
    MainCockpit,
    /// First seat able to control the grid.
    CanControl,
    /// First seat currently under control.
    UnderControl,
    /// Nothing else matched, first seat on the grid.
    First,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the index of the controlling seat in `cockpits`.
///
/// Priority is main cockpit, then the first seat that can control the grid,
/// then the first seat under control, then the first seat. Returns `None`
/// only if there are no seats at all.
pub fn select_controller_index<C>(cockpits: &[C]) -> Option<(usize, SelectionReason)>
where
    C: ShipController
{
    if cockpits.is_empty() {
        return None;
    }

    let found = cockpits
        .iter()
        .position(|c| c.is_main_cockpit())
        .map(|i| (i, SelectionReason::MainCockpit))
        .or_else(|| cockpits
            .iter()
            .position(|c| c.can_control_ship())
            .map(|i| (i, SelectionReason::CanControl)))
        .or_else(|| cockpits
            .iter()
            .position(|c| c.is_under_control())
            .map(|i| (i, SelectionReason::UnderControl)))
        .unwrap_or((0, SelectionReason::First));

    Some(found)
}

/// Take the controlling seat out of `cockpits`.
///
/// The other seats are dropped.
pub fn select_controller<C>(mut cockpits: Vec<C>) -> Result<(C, SelectionReason), VeloCtrlError>
where
    C: ShipController
{
    let (index, reason) = select_controller_index(&cockpits)
        .ok_or(VeloCtrlError::NoControllerFound)?;

    Ok((cockpits.swap_remove(index), reason))
}

/// Keep only the thrusters which push the grid in the seat's forward
/// direction.
///
/// A thruster pushes opposite to the way it faces, so these are the ones
/// whose forward direction is the seat's backward direction.
pub fn filter_forward_thrusters<T>(
    thrusters: Vec<T>,
    cockpit_orientation: &BlockOrientation
) -> Vec<T>
where
    T: Thruster
{
    let cockpit_backward = cockpit_orientation.matrix().backward();

    thrusters
        .into_iter()
        .filter(|t| t.orientation().matrix().forward() == cockpit_backward)
        .collect()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
