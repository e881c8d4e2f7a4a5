//! Measurement type - an SI value presented in a unit

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Unit, UnitError};

/// An SI value together with the unit it is shown in
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<'a> {
    si: f64,
    unit: Unit<'a>,
}

/// Serializable snapshot of a [`Measurement`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Value in SI units
    pub si: f64,
    /// Value in the display unit (NaN for unbound caliber units)
    pub value: f64,
    pub unit: String,
    /// Formatted text including the symbol
    pub text: String,
}

impl<'a> Measurement<'a> {
    pub fn new(si: f64, unit: Unit<'a>) -> Self {
        Measurement { si, unit }
    }

    /// Create from a value expressed in `unit`
    pub fn from_display(value: f64, unit: Unit<'a>) -> Self {
        let si = unit.to_si(value);
        Measurement { si, unit }
    }

    pub fn si(&self) -> f64 {
        self.si
    }

    pub fn unit(&self) -> &Unit<'a> {
        &self.unit
    }

    /// Value in the display unit
    pub fn value(&self) -> f64 {
        self.unit.to_display(self.si)
    }

    /// Value in the display unit, failing for unbound caliber units
    pub fn checked_value(&self) -> Result<f64, UnitError> {
        self.unit.checked_to_display(self.si)
    }

    /// Same SI value shown in another unit
    pub fn convert_to<'b>(&self, target: Unit<'b>) -> Measurement<'b> {
        Measurement::new(self.si, target)
    }

    pub fn to_record(&self) -> MeasurementRecord {
        MeasurementRecord {
            si: self.si,
            value: self.value(),
            unit: self.unit.symbol().to_string(),
            text: self.to_string(),
        }
    }
}

impl fmt::Display for Measurement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit.format_with_symbol(self.si))
    }
}
