use std::result;

use thiserror::Error;

use super::{Axis, SessionState};

pub type SetupResult<T> = result::Result<T, SetupError>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{axis} \"{text}\" is neither decimal degrees nor sDDD*MM")]
    Format { axis: Axis, text: String },

    #[error("{axis} \"{text}\" is outside the valid range of -{bound} to {bound} degrees")]
    Range {
        axis: Axis,
        text: String,
        bound: u16,
    },

    #[error("expected a {expected} coordinate, got the {found} {text}")]
    WrongAxis {
        expected: Axis,
        found: Axis,
        text: String,
    },

    #[error("could not open serial port {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("setup step {step} ({command}) failed: {reason}")]
    Protocol {
        step: usize,
        command: String,
        reason: String,
    },

    #[error("can't configure a session that is {0}")]
    State(SessionState),
}

impl SetupError {
    /// 1-based index of the failing setup step, if this is a protocol error
    pub fn step(&self) -> Option<usize> {
        match self {
            SetupError::Protocol { step, .. } => Some(*step),
            _ => None,
        }
    }
}
