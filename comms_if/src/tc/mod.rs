//! # Telecommand module
//!
//! Commands are the plain strings the host dispatches to the controller, for example
//! `speed turn`. Only the fixed speed presets are recognised.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the controller by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tc {
    /// Change the target velocity to one of the presets.
    Speed(SpeedPreset),
}

/// Target velocity presets.
///
/// The velocity of each preset is a controller parameter, except `Stop` which is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedPreset {
    /// Maximum speed for curved track.
    Turn,
    /// Maximum speed for straight track.
    Straight,
    /// Crawl speed before arriving at a stop.
    PreStop,
    /// Full stop.
    Stop,
}

/// Possible parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TcParseError {
    #[error("Unrecognised command: \"{0}\"")]
    Unrecognised(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a command, returning `None` for anything that isn't a known command.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl FromStr for Tc {
    type Err = TcParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let preset = match s.trim() {
            "speed turn" => SpeedPreset::Turn,
            "speed straight" => SpeedPreset::Straight,
            "speed prestop" => SpeedPreset::PreStop,
            "speed stop" => SpeedPreset::Stop,
            other => return Err(TcParseError::Unrecognised(other.to_string())),
        };

        Ok(Tc::Speed(preset))
    }
}

impl fmt::Display for Tc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tc::Speed(SpeedPreset::Turn) => write!(f, "speed turn"),
            Tc::Speed(SpeedPreset::Straight) => write!(f, "speed straight"),
            Tc::Speed(SpeedPreset::PreStop) => write!(f, "speed prestop"),
            Tc::Speed(SpeedPreset::Stop) => write!(f, "speed stop"),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
