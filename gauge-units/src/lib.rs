//! Gauge Units - Quantity groups for rocket design values
//!
//! Values are stored in SI units and shown in a user-selected unit. Each
//! physical quantity has a group of alternative units with one mutable
//! default:
//! - Lengths (mm, cm, m, km, in, ft, yd, mi, mm², m², ...)
//! - Motion and forces (m/s, km/h, ft/s, mph, m/s², N, lbf, Ns, ...)
//! - Mass and densities (g, kg, oz, lb, kg/m³, oz/in³, g/m, ...)
//! - Time and rotation (ms, s, min, rad/s, r/s, rpm)
//! - Angles (°, rad)
//! - Temperature and pressure (K, °C, °F, mbar, bar, atm, mmHg, psi, Pa, ...)
//! - Ratios (%, ‰) and surface roughness (µm, mil)
//! - Stability margins in calibers, bound to a design diameter

mod error;
mod format;
mod group;
mod group_id;
mod measurement;
mod parse;
mod preferences;
mod preset;
mod reference;
mod stability;
mod unit;
mod units;

pub use error::{codes, ErrorKind, UnitError};
pub use format::{Style, NOT_AVAILABLE};
pub use group::{QuantityGroup, UnitGroup};
pub use group_id::GroupId;
pub use measurement::{Measurement, MeasurementRecord};
pub use parse::{split_quantity, Reading};
pub use preferences::Preferences;
pub use preset::{DefaultFailure, DefaultsReport, Preset};
pub use reference::{Airframe, CaliberSource, Stage, StageSelection};
pub use stability::StabilityView;
pub use unit::{Law, Unit, CALIBER_SYMBOL, DEGREE_SYMBOL, ZWSP};
pub use units::Registry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CaliberSource, GroupId, QuantityGroup, Registry, Unit, UnitError};
}
