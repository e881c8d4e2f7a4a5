//! Structured errors for unit groups
//!
//! Every failure is surfaced to the immediate caller. Nothing in this crate
//! retries or swallows an error, except the best-effort preset and
//! preference paths which collect per-group failures into a report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const UNBOUND_CONTEXT: &str = "UNBOUND_CONTEXT";
}

/// Broad class of a [`UnitError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad index, identifier or unit name
    InvalidArgument,
    /// Text that could not be turned into a value
    Format,
    /// Structural mutation of a read-only group
    Unsupported,
    /// Context-bound unit used without a usable reference
    UnboundContext,
}

/// Error type for unit and group operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("index out of range: {index} (group has {count} units)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("unknown quantity group: {0}")]
    UnknownGroup(String),

    #[error("unit not found in group: {0}")]
    UnknownUnit(String),

    #[error("unit symbol already present in group: {0}")]
    DuplicateSymbol(String),

    #[error("invalid unit {0}")]
    InvalidUnit(String),

    #[error("a group must keep at least one unit")]
    LastUnit,

    #[error("cannot remove the default unit {0}, select another default first")]
    DefaultUnitRemoval(String),

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("unrecognized unit: {0:?}")]
    UnrecognizedUnit(String),

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("unit {0} has no usable reference diameter")]
    UnboundContext(String),
}

impl UnitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UnitError::IndexOutOfRange { .. }
            | UnitError::UnknownGroup(_)
            | UnitError::UnknownUnit(_)
            | UnitError::DuplicateSymbol(_)
            | UnitError::InvalidUnit(_)
            | UnitError::LastUnit
            | UnitError::DefaultUnitRemoval(_) => ErrorKind::InvalidArgument,
            UnitError::NotANumber(_) | UnitError::UnrecognizedUnit(_) => ErrorKind::Format,
            UnitError::Unsupported(_) => ErrorKind::Unsupported,
            UnitError::UnboundContext(_) => ErrorKind::UnboundContext,
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidArgument => codes::INVALID_ARGUMENT,
            ErrorKind::Format => codes::FORMAT_ERROR,
            ErrorKind::Unsupported => codes::UNSUPPORTED,
            ErrorKind::UnboundContext => codes::UNBOUND_CONTEXT,
        }
    }
}
