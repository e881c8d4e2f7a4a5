//! Unit definitions - the built-in quantity groups

use std::f64::consts::PI;

use crate::group::{QuantityGroup, UnitGroup};
use crate::reference::CaliberSource;
use crate::stability::StabilityView;
use crate::unit::ZWSP;
use crate::{GroupId, Unit, UnitError};

pub(crate) const SQUARED: &str = "\u{b2}";
pub(crate) const CUBED: &str = "\u{b3}";
pub(crate) const DOT: &str = "\u{b7}";
pub(crate) const MICRO: &str = "\u{b5}";
pub(crate) const PERMILLE: &str = "\u{2030}";

/// Registry of all quantity groups.
///
/// Created once by the host with [`Registry::new`] and passed to whatever
/// needs it. There is one group per [`GroupId`], stored at the identifier's
/// index; the groups' defaults stay mutable.
#[derive(Debug)]
pub struct Registry {
    groups: [UnitGroup; GroupId::COUNT],
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            groups: GroupId::ALL.map(builtin_group),
        }
    }

    /// The group for `id`
    pub fn group(&self, id: GroupId) -> &UnitGroup {
        &self.groups[id.index()]
    }

    /// The group for a textual identifier such as "LENGTH"
    pub fn get(&self, identifier: &str) -> Result<&UnitGroup, UnitError> {
        let id: GroupId = identifier.parse()?;
        Ok(self.group(id))
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> impl Iterator<Item = GroupId> {
        GroupId::ALL.into_iter()
    }

    /// A fresh stability group whose caliber unit reads from `reference`
    pub fn stability_group_for<'a>(&'a self, reference: &'a dyn CaliberSource) -> StabilityView<'a> {
        StabilityView::new(self.group(GroupId::Stability), reference)
    }

    /// Symbol of the current default unit of every group
    pub fn default_symbols(&self) -> Vec<(GroupId, &str)> {
        self.ids()
            .map(|id| (id, self.group(id).default_unit().symbol()))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit table and initial default of each group
fn builtin_group(id: GroupId) -> UnitGroup {
    let (units, default_index) = match id {
        GroupId::None => (vec![Unit::linear(ZWSP, 1.0)], 0),

        GroupId::Length => (vec![
            Unit::linear("mm", 0.001),
            Unit::linear("cm", 0.01),
            Unit::linear("m", 1.0),
            Unit::linear("in", 0.0254),
            Unit::linear("ft", 0.3048),
        ], 1),

        GroupId::MotorDimensions => (vec![
            Unit::linear("mm", 0.001),
            Unit::linear("cm", 0.01),
            Unit::linear("in", 0.0254),
        ], 0),

        GroupId::Distance => (vec![
            Unit::linear("m", 1.0),
            Unit::linear("km", 1000.0),
            Unit::linear("ft", 0.3048),
            Unit::linear("yd", 0.9144),
            Unit::linear("mi", 1609.344),
        ], 0),

        GroupId::Area => (vec![
            Unit::linear(&format!("mm{}", SQUARED), 0.001 * 0.001),
            Unit::linear(&format!("cm{}", SQUARED), 0.01 * 0.01),
            Unit::linear(&format!("m{}", SQUARED), 1.0),
            Unit::linear(&format!("in{}", SQUARED), 0.0254 * 0.0254),
            Unit::linear(&format!("ft{}", SQUARED), 0.3048 * 0.3048),
        ], 1),

        // the caliber placeholder is replaced per design by StabilityView
        GroupId::Stability => (vec![
            Unit::linear("mm", 0.001),
            Unit::linear("cm", 0.01),
            Unit::linear("in", 0.0254),
            Unit::unbound_caliber(),
        ], 3),

        GroupId::Velocity => (vec![
            Unit::linear("m/s", 1.0),
            Unit::linear("km/h", 1.0 / 3.6),
            Unit::linear("ft/s", 0.3048),
            Unit::linear("mph", 0.44704),
        ], 0),

        GroupId::Acceleration => (vec![
            Unit::linear(&format!("m/s{}", SQUARED), 1.0),
            Unit::linear(&format!("ft/s{}", SQUARED), 0.3048),
        ], 0),

        GroupId::Mass => (vec![
            Unit::linear("g", 0.001),
            Unit::linear("kg", 1.0),
            Unit::linear("oz", 0.0283495231),
            Unit::linear("lb", 0.45359237),
        ], 0),

        GroupId::Angle => (vec![
            Unit::degree(),
            Unit::quantized("rad", 0.01, 1.0),
        ], 0),

        GroupId::DensityBulk => (vec![
            Unit::linear(&format!("g/cm{}", CUBED), 1000.0),
            Unit::linear(&format!("kg/m{}", CUBED), 1.0),
            Unit::linear(&format!("oz/in{}", CUBED), 1729.99404),
            Unit::linear(&format!("lb/ft{}", CUBED), 16.0184634),
        ], 0),

        GroupId::DensitySurface => (vec![
            Unit::linear(&format!("g/cm{}", SQUARED), 10.0),
            Unit::linear(&format!("g/m{}", SQUARED), 0.001),
            Unit::linear(&format!("kg/m{}", SQUARED), 1.0),
            Unit::linear(&format!("oz/in{}", SQUARED), 43.9418487),
            Unit::linear(&format!("oz/ft{}", SQUARED), 0.305151727),
            Unit::linear(&format!("lb/ft{}", SQUARED), 4.88242764),
        ], 1),

        GroupId::DensityLine => (vec![
            Unit::linear("g/m", 0.001),
            Unit::linear("kg/m", 1.0),
            Unit::linear("oz/ft", 0.0930102465),
        ], 0),

        GroupId::Force => (vec![
            Unit::linear("N", 1.0),
            Unit::linear("lbf", 4.44822162),
            Unit::linear("kgf", 9.80665),
        ], 0),

        GroupId::Impulse => (vec![
            Unit::linear("Ns", 1.0),
            Unit::linear(&format!("lbf{}s", DOT), 4.44822162),
        ], 0),

        GroupId::TimeStep => (vec![
            Unit::quantized("ms", 1.0, 0.001),
            Unit::quantized("s", 0.01, 1.0),
        ], 1),

        GroupId::ShortTime => (vec![Unit::linear("s", 1.0)], 0),

        GroupId::FlightTime => (vec![
            Unit::linear("s", 1.0),
            Unit::linear("min", 60.0),
        ], 0),

        GroupId::Roll => (vec![
            Unit::linear("rad/s", 1.0),
            Unit::linear("r/s", 2.0 * PI),
            Unit::linear("rpm", 2.0 * PI / 60.0),
        ], 1),

        // K = C + 273.15 and K = (F + 459.67) * 5/9
        GroupId::Temperature => (vec![
            Unit::quantized("K", 1.0, 1.0),
            Unit::affine("\u{b0}C", 1.0, 273.15),
            Unit::affine("\u{b0}F", 5.0 / 9.0, 459.67 * 5.0 / 9.0),
        ], 1),

        GroupId::Pressure => (vec![
            Unit::quantized("mbar", 1.0, 1.0e2),
            Unit::quantized("bar", 0.001, 1.0e5),
            Unit::quantized("atm", 0.001, 1.01325e5),
            Unit::linear("mmHg", 101325.0 / 760.0),
            Unit::linear("inHg", 3386.389),
            Unit::linear("psi", 6894.75729),
            Unit::linear("Pa", 1.0),
        ], 0),

        GroupId::Relative => (vec![
            Unit::quantized(ZWSP, 0.01, 1.0),
            Unit::quantized("%", 1.0, 0.01),
            Unit::quantized(PERMILLE, 1.0, 0.001),
        ], 1),

        GroupId::Roughness => (vec![
            Unit::linear(&format!("{}m", MICRO), 0.000001),
            Unit::linear("mil", 0.0000254),
        ], 0),

        GroupId::Coefficient => (vec![Unit::quantized(ZWSP, 0.01, 1.0)], 0),
    };
    UnitGroup::builtin(units, default_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_every_identifier_is_registered_and_valid() {
        let registry = Registry::new();
        for id in GroupId::ALL {
            let group = registry.group(id);
            // same checks as UnitGroup::new
            let rebuilt = UnitGroup::new(group.as_slice().to_vec(), group.default_unit_index());
            assert!(rebuilt.is_ok(), "{}", id);
        }
    }

    #[test]
    fn test_get_by_identifier() {
        let registry = Registry::new();
        assert_eq!(registry.get("PRESSURE").unwrap().default_unit().symbol(), "mbar");
        assert_eq!(
            registry.get("SPEED").unwrap_err(),
            UnitError::UnknownGroup("SPEED".to_string())
        );
    }

    #[test]
    fn test_initial_defaults() {
        let registry = Registry::new();
        let default_of = |id| registry.group(id).default_unit().symbol().to_string();
        assert_eq!(default_of(GroupId::Length), "cm");
        assert_eq!(default_of(GroupId::Stability), "cal");
        assert_eq!(default_of(GroupId::Temperature), "\u{b0}C");
        assert_eq!(default_of(GroupId::Relative), "%");
        assert_eq!(default_of(GroupId::TimeStep), "s");
        assert_eq!(default_of(GroupId::Roll), "r/s");
        assert_eq!(default_of(GroupId::DensitySurface), format!("g/m{}", SQUARED));
    }

    #[test]
    fn test_linear_round_trips() {
        let registry = Registry::new();
        let samples = [0.0, 1e-6, 0.0254, 1.0, -3.5, 42.0, 1.0e4, 6.5e7];
        for id in registry.ids() {
            for unit in registry.group(id).units() {
                if !matches!(unit.law(), crate::Law::Linear { .. } | crate::Law::Affine { .. }) {
                    continue;
                }
                for x in samples {
                    assert!(close(unit.to_si(unit.to_display(x)), x), "{} {} {}", id, unit, x);
                }
            }
        }
    }

    #[test]
    fn test_quantized_rounding_is_a_fixed_point() {
        let registry = Registry::new();
        let samples = [0.0, 0.000123, 0.0157, 1.23456, -7.891, 101_325.0, 1234.5678];
        for id in registry.ids() {
            for unit in registry.group(id).units() {
                if let crate::Law::Quantized { precision, .. } = *unit.law() {
                    for x in samples {
                        let shown = unit.to_display(x);
                        assert_eq!(crate::unit::round_to(shown, precision), shown, "{} {}", unit, x);
                        assert_eq!(unit.round(shown), shown);
                    }
                }
            }
        }
    }

    #[test]
    fn test_known_conversions() {
        let registry = Registry::new();
        let length = registry.group(GroupId::Length);
        assert!(close(length.parse("5 mm").unwrap(), 0.005));

        let temp = registry.group(GroupId::Temperature);
        assert!(close(temp.parse("0").unwrap(), 273.15));
        assert!(close(temp.parse("32 \u{b0}f").unwrap(), 273.15));
        // parsed input is converted as typed, only display values are quantized
        assert!(close(temp.parse("300.4 K").unwrap(), 300.4));
        assert_eq!(temp.to_display_string_with_symbol(293.15), "20 \u{b0}C");

        let pressure = registry.group(GroupId::Pressure);
        assert_eq!(pressure.to_display_string_with_symbol(101_325.0), "1013 mbar");
        pressure.set_default_by_symbol("bar").unwrap();
        assert_eq!(pressure.to_display_string_with_symbol(101_325.0), "1.013 bar");

        let relative = registry.group(GroupId::Relative);
        assert_eq!(relative.to_display_string_with_symbol(0.256), "26%");
        assert!(close(relative.parse("15 %").unwrap(), 0.15));
        assert!(close(relative.parse("12.5 %").unwrap(), 0.125));
        assert!(close(registry.group(GroupId::TimeStep).parse("1.5 ms").unwrap(), 0.0015));

        let angle = registry.group(GroupId::Angle);
        assert_eq!(angle.to_display_string_with_symbol(PI / 6.0), "30\u{b0}");
        assert_eq!(registry.group(GroupId::TimeStep).to_display_string(0.0123), "0.01");
    }

    #[test]
    fn test_find_approximate_in_registry() {
        let registry = Registry::new();
        let accel = registry.group(GroupId::Acceleration);
        assert_eq!(accel.find_approximate("m/s2").unwrap().symbol(), format!("m/s{}", SQUARED));
        let roughness = registry.group(GroupId::Roughness);
        assert_eq!(roughness.find_approximate("um").unwrap().symbol(), format!("{}m", MICRO));
        let impulse = registry.group(GroupId::Impulse);
        assert_eq!(impulse.find_approximate("lbf s").unwrap().symbol(), format!("lbf{}s", DOT));
    }

    #[test]
    fn test_stability_group_for_designs() {
        let registry = Registry::new();
        let small = 0.04_f64;
        let large = 0.08_f64;
        let a = registry.stability_group_for(&small);
        let b = registry.stability_group_for(&large);
        assert_eq!(a.to_display_string_with_symbol(0.08), "2 cal");
        assert_eq!(b.to_display_string_with_symbol(0.08), "1 cal");
        let canonical = registry.group(GroupId::Stability);
        for i in 0..3 {
            assert_eq!(
                a.unit_at(i).unwrap().format(0.08),
                canonical.unit_at(i).unwrap().format(0.08)
            );
        }
    }
}
