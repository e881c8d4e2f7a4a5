//! Identifiers of the registered quantity groups
//!
//! The set is closed: every identifier has exactly one group in a
//! [`crate::Registry`], and no identifiers can be added at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnitError;

/// One physical quantity as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupId {
    None,
    Length,
    MotorDimensions,
    Distance,
    Area,
    Stability,
    Velocity,
    Acceleration,
    Mass,
    Angle,
    DensityBulk,
    DensitySurface,
    DensityLine,
    Force,
    Impulse,
    /// Time in the order of less than a second (time step etc)
    TimeStep,
    /// Time in the order of seconds (motor delay etc)
    ShortTime,
    /// Time in the order of a flight
    FlightTime,
    Roll,
    Temperature,
    Pressure,
    Relative,
    Roughness,
    Coefficient,
}

impl GroupId {
    pub const COUNT: usize = 24;

    /// Every identifier, in declaration order
    pub const ALL: [GroupId; Self::COUNT] = [
        GroupId::None,
        GroupId::Length,
        GroupId::MotorDimensions,
        GroupId::Distance,
        GroupId::Area,
        GroupId::Stability,
        GroupId::Velocity,
        GroupId::Acceleration,
        GroupId::Mass,
        GroupId::Angle,
        GroupId::DensityBulk,
        GroupId::DensitySurface,
        GroupId::DensityLine,
        GroupId::Force,
        GroupId::Impulse,
        GroupId::TimeStep,
        GroupId::ShortTime,
        GroupId::FlightTime,
        GroupId::Roll,
        GroupId::Temperature,
        GroupId::Pressure,
        GroupId::Relative,
        GroupId::Roughness,
        GroupId::Coefficient,
    ];

    /// Position in [`GroupId::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical textual identifier, e.g. "LENGTH"
    pub fn name(&self) -> &'static str {
        match self {
            GroupId::None => "NONE",
            GroupId::Length => "LENGTH",
            GroupId::MotorDimensions => "MOTOR_DIMENSIONS",
            GroupId::Distance => "DISTANCE",
            GroupId::Area => "AREA",
            GroupId::Stability => "STABILITY",
            GroupId::Velocity => "VELOCITY",
            GroupId::Acceleration => "ACCELERATION",
            GroupId::Mass => "MASS",
            GroupId::Angle => "ANGLE",
            GroupId::DensityBulk => "DENSITY_BULK",
            GroupId::DensitySurface => "DENSITY_SURFACE",
            GroupId::DensityLine => "DENSITY_LINE",
            GroupId::Force => "FORCE",
            GroupId::Impulse => "IMPULSE",
            GroupId::TimeStep => "TIME_STEP",
            GroupId::ShortTime => "SHORT_TIME",
            GroupId::FlightTime => "FLIGHT_TIME",
            GroupId::Roll => "ROLL",
            GroupId::Temperature => "TEMPERATURE",
            GroupId::Pressure => "PRESSURE",
            GroupId::Relative => "RELATIVE",
            GroupId::Roughness => "ROUGHNESS",
            GroupId::Coefficient => "COEFFICIENT",
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GroupId {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| UnitError::UnknownGroup(s.to_string()))
    }
}
