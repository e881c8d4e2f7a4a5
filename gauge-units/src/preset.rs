//! Metric and imperial presets
//!
//! A preset rewrites the default unit of a fixed list of groups by symbol.
//! Application is best-effort: a group that cannot be updated is logged and
//! reported, and the remaining groups are still updated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::group::QuantityGroup;
use crate::unit::{CALIBER_SYMBOL, DEGREE_SYMBOL};
use crate::units::{CUBED, MICRO, SQUARED};
use crate::{GroupId, Registry, UnitError};

/// A bulk default-unit assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Metric,
    Imperial,
}

impl Preset {
    /// Group and default symbol pairs, in application order
    pub fn table(self) -> Vec<(GroupId, String)> {
        let imperial = self == Preset::Imperial;
        let pick = |metric: &str, other: &str| if imperial { other } else { metric }.to_string();

        vec![
            (GroupId::Length, pick("cm", "in")),
            (GroupId::MotorDimensions, pick("mm", "in")),
            (GroupId::Distance, pick("m", "ft")),
            (GroupId::Area, pick("cm", "in") + SQUARED),
            (GroupId::Stability, CALIBER_SYMBOL.to_string()),
            (GroupId::Velocity, pick("m/s", "ft/s")),
            (GroupId::Acceleration, pick("m/s", "ft/s") + SQUARED),
            (GroupId::Mass, pick("g", "oz")),
            (GroupId::Angle, DEGREE_SYMBOL.to_string()),
            (GroupId::DensityBulk, pick("g/cm", "oz/in") + CUBED),
            (GroupId::DensitySurface, pick("g/m", "oz/ft") + SQUARED),
            (GroupId::DensityLine, pick("g/m", "oz/ft")),
            (GroupId::Force, "N".to_string()),
            (GroupId::Impulse, "Ns".to_string()),
            (GroupId::TimeStep, "s".to_string()),
            (GroupId::FlightTime, "s".to_string()),
            (GroupId::Roll, "r/s".to_string()),
            (GroupId::Temperature, DEGREE_SYMBOL.to_string() + &pick("C", "F")),
            (GroupId::Pressure, "mbar".to_string()),
            (GroupId::Relative, "%".to_string()),
            (GroupId::Roughness, pick(&format!("{}m", MICRO), "mil")),
        ]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Metric => write!(f, "metric"),
            Preset::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Preset::Metric),
            "imperial" => Ok(Preset::Imperial),
            other => Err(format!("unknown preset '{}', expected metric or imperial", other)),
        }
    }
}

/// One group a preset or preference restore could not update
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultFailure {
    /// Group identifier as given
    pub group: String,
    pub symbol: String,
    pub error: UnitError,
}

/// Outcome of a best-effort default assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsReport {
    /// Number of groups updated
    pub applied: usize,
    pub failures: Vec<DefaultFailure>,
}

impl DefaultsReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(&mut self, group: &str, symbol: &str, result: Result<(), UnitError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(error) => {
                tracing::warn!(group, symbol, %error, "could not set default unit");
                self.failures.push(DefaultFailure {
                    group: group.to_string(),
                    symbol: symbol.to_string(),
                    error,
                });
            }
        }
    }
}

impl Registry {
    /// Set each listed group's default by symbol, continuing past failures
    pub fn apply_defaults<S: AsRef<str>>(&self, table: &[(GroupId, S)]) -> DefaultsReport {
        let mut report = DefaultsReport::default();
        for (id, symbol) in table {
            let symbol = symbol.as_ref();
            report.record(id.name(), symbol, self.group(*id).set_default_by_symbol(symbol));
        }
        report
    }

    pub fn apply_preset(&self, preset: Preset) -> DefaultsReport {
        let report = self.apply_defaults(&preset.table());
        tracing::info!(
            %preset,
            applied = report.applied,
            failed = report.failures.len(),
            "preset applied"
        );
        report
    }

    pub fn apply_metric_preset(&self) -> DefaultsReport {
        self.apply_preset(Preset::Metric)
    }

    pub fn apply_imperial_preset(&self) -> DefaultsReport {
        self.apply_preset(Preset::Imperial)
    }
}
