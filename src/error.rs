//! Crate error type
//!
//! The simulation itself never fails; errors only come from the edges
//! (configuration files, missing drawing surface).

use std::fmt;

/// Errors raised while setting up a game session
#[derive(Debug)]
pub enum GameError {
    /// The drawing surface could not be found (fatal at startup)
    MissingSurface(String),
    /// A configuration value is out of bounds
    InvalidConfig(String),
    /// Configuration JSON is malformed
    Parse(serde_json::Error),
    /// Configuration file could not be read
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingSurface(what) => write!(f, "drawing surface unavailable: {what}"),
            GameError::InvalidConfig(why) => write!(f, "invalid configuration: {why}"),
            GameError::Parse(e) => write!(f, "malformed configuration: {e}"),
            GameError::Io(e) => write!(f, "cannot read configuration: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Parse(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
