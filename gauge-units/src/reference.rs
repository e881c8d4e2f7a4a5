//! Reference objects for caliber-based units
//!
//! A caliber is the maximum body diameter of a design. Stability margins are
//! expressed in calibers, so converting them needs a design (or a subset of
//! its stages) to read that diameter from at conversion time.

use serde::{Deserialize, Serialize};

/// Anything a caliber unit can read its reference diameter from.
///
/// Returns `None` when no positive, finite diameter is available (an empty
/// design, a selection with no matching stages).
pub trait CaliberSource {
    fn reference_diameter(&self) -> Option<f64>;
}

/// A fixed diameter in meters
impl CaliberSource for f64 {
    fn reference_diameter(&self) -> Option<f64> {
        usable(*self)
    }
}

/// One stage of a design with the outer diameters of its body sections (m)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub body_diameters: Vec<f64>,
}

impl Stage {
    pub fn new(name: &str, body_diameters: &[f64]) -> Self {
        Stage {
            name: name.to_string(),
            body_diameters: body_diameters.to_vec(),
        }
    }

    fn max_diameter(&self) -> Option<f64> {
        max_usable(self.body_diameters.iter().copied())
    }
}

/// A complete design: an ordered list of stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    pub name: String,
    pub stages: Vec<Stage>,
}

impl Airframe {
    pub fn new(name: &str) -> Self {
        Airframe {
            name: name.to_string(),
            stages: Vec::new(),
        }
    }

    /// Builder: append a stage
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// A narrower configuration containing only the named stages
    pub fn select<'a>(&'a self, names: &[&str]) -> StageSelection<'a> {
        StageSelection {
            airframe: self,
            active: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl CaliberSource for Airframe {
    fn reference_diameter(&self) -> Option<f64> {
        max_usable(self.stages.iter().filter_map(Stage::max_diameter))
    }
}

/// A subset of an [`Airframe`]'s stages, borrowed from it
#[derive(Debug, Clone)]
pub struct StageSelection<'a> {
    airframe: &'a Airframe,
    active: Vec<String>,
}

impl StageSelection<'_> {
    pub fn is_active(&self, stage: &str) -> bool {
        self.active.iter().any(|s| s == stage)
    }
}

impl CaliberSource for StageSelection<'_> {
    fn reference_diameter(&self) -> Option<f64> {
        max_usable(
            self.airframe
                .stages
                .iter()
                .filter(|s| self.is_active(&s.name))
                .filter_map(Stage::max_diameter),
        )
    }
}

fn usable(d: f64) -> Option<f64> {
    (d.is_finite() && d > 0.0).then_some(d)
}

fn max_usable(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter_map(usable).fold(None, |acc, d| match acc {
        Some(m) if m >= d => Some(m),
        _ => Some(d),
    })
}
