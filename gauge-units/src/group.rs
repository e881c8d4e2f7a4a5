//! Quantity groups: ordered, interchangeable units of one physical quantity

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::measurement::Measurement;
use crate::parse::{approximate_key, split_quantity, symbol_matches};
use crate::{Unit, UnitError};

/// Read and default-switching access shared by owned groups and views.
///
/// Unit order is meaningful: it is the display and selection order, and
/// indices are exposed to callers. The default index is always in range.
///
/// Defaults are switched through `&self`. There is no cross-group locking;
/// a reader racing a writer may see the previous default.
pub trait QuantityGroup {
    fn unit_count(&self) -> usize;

    /// Unit at `index` in group order
    fn unit_at(&self, index: usize) -> Result<&Unit<'_>, UnitError>;

    fn default_unit(&self) -> &Unit<'_>;

    fn default_unit_index(&self) -> usize;

    /// Select the default unit by index
    fn set_default(&self, index: usize) -> Result<(), UnitError>;

    /// Position of `unit` in the group, by equality
    fn index_of(&self, unit: &Unit<'_>) -> Option<usize>;

    fn append(&mut self, unit: Unit<'static>) -> Result<(), UnitError>;

    fn insert(&mut self, index: usize, unit: Unit<'static>) -> Result<(), UnitError>;

    fn remove_at(&mut self, index: usize) -> Result<Unit<'static>, UnitError>;

    /// All units in group order
    fn units(&self) -> Vec<&Unit<'_>> {
        (0..self.unit_count())
            .filter_map(|i| self.unit_at(i).ok())
            .collect()
    }

    fn contains(&self, unit: &Unit<'_>) -> bool {
        self.index_of(unit).is_some()
    }

    /// Select the default unit by its exact (case-sensitive) symbol
    fn set_default_by_symbol(&self, symbol: &str) -> Result<(), UnitError> {
        let index = self
            .units()
            .iter()
            .position(|u| u.symbol() == symbol)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.to_string()))?;
        self.set_default(index)
    }

    /// Tolerant lookup: compares symbols reduced to letters and digits,
    /// ignoring case, so "m/s2" finds "m/s\u{b2}"
    fn find_approximate(&self, query: &str) -> Option<&Unit<'_>> {
        let key = approximate_key(query);
        self.units()
            .into_iter()
            .find(|u| approximate_key(u.symbol()) == key)
    }

    /// Format an SI value in the default unit
    fn to_display_string(&self, si: f64) -> String {
        self.default_unit().format(si)
    }

    /// Format an SI value in the default unit, followed by its symbol
    fn to_display_string_with_symbol(&self, si: f64) -> String {
        self.default_unit().format_with_symbol(si)
    }

    /// Pair an SI value with the default unit
    fn to_measurement(&self, si: f64) -> Measurement<'_> {
        Measurement::new(si, self.default_unit().clone())
    }

    /// Parse "number [unit]" into an SI value.
    ///
    /// Without a suffix the default unit applies; a suffix must match one of
    /// the group's symbols ignoring case. See [`crate::parse`] for the
    /// limits of the number scan.
    fn parse(&self, text: &str) -> Result<f64, UnitError> {
        let reading = split_quantity(text)?;
        match reading.unit {
            None => Ok(self.default_unit().to_si(reading.value)),
            Some(suffix) => self
                .units()
                .into_iter()
                .find(|u| symbol_matches(suffix, u.symbol()))
                .map(|u| u.to_si(reading.value))
                .ok_or_else(|| UnitError::UnrecognizedUnit(suffix.to_string())),
        }
    }
}

/// A group that owns its units
#[derive(Debug)]
pub struct UnitGroup {
    units: Vec<Unit<'static>>,
    default_index: AtomicUsize,
}

impl UnitGroup {
    /// Create a group, checking every unit, symbol uniqueness and the default index
    pub fn new(units: Vec<Unit<'static>>, default_index: usize) -> Result<Self, UnitError> {
        Self::check(&units, default_index)?;
        Ok(Self::from_parts(units, default_index))
    }

    /// Built-in tables; their validity is covered by the registry tests
    pub(crate) fn builtin(units: Vec<Unit<'static>>, default_index: usize) -> Self {
        debug_assert!(Self::check(&units, default_index).is_ok());
        Self::from_parts(units, default_index)
    }

    /// The owned units in group order
    pub fn as_slice(&self) -> &[Unit<'static>] {
        &self.units
    }

    fn from_parts(units: Vec<Unit<'static>>, default_index: usize) -> Self {
        UnitGroup {
            units,
            default_index: AtomicUsize::new(default_index),
        }
    }

    fn check(units: &[Unit<'static>], default_index: usize) -> Result<(), UnitError> {
        if units.is_empty() {
            return Err(UnitError::LastUnit);
        }
        let mut seen = HashSet::new();
        for unit in units {
            unit.validate()?;
            if !seen.insert(unit.symbol()) {
                return Err(UnitError::DuplicateSymbol(unit.symbol().to_string()));
            }
        }
        if default_index >= units.len() {
            return Err(UnitError::IndexOutOfRange {
                index: default_index,
                count: units.len(),
            });
        }
        Ok(())
    }

    fn check_new_unit(&self, unit: &Unit<'static>) -> Result<(), UnitError> {
        unit.validate()?;
        if self.units.iter().any(|u| u.symbol() == unit.symbol()) {
            return Err(UnitError::DuplicateSymbol(unit.symbol().to_string()));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> UnitError {
        UnitError::IndexOutOfRange {
            index,
            count: self.units.len(),
        }
    }
}

impl Clone for UnitGroup {
    fn clone(&self) -> Self {
        Self::from_parts(self.units.clone(), self.default_unit_index())
    }
}

impl QuantityGroup for UnitGroup {
    fn unit_count(&self) -> usize {
        self.units.len()
    }

    fn unit_at(&self, index: usize) -> Result<&Unit<'_>, UnitError> {
        self.units.get(index).ok_or_else(|| self.out_of_range(index))
    }

    fn default_unit(&self) -> &Unit<'_> {
        // every mutation keeps the index in range and the list non-empty
        &self.units[self.default_unit_index()]
    }

    fn default_unit_index(&self) -> usize {
        self.default_index.load(Ordering::Relaxed)
    }

    fn set_default(&self, index: usize) -> Result<(), UnitError> {
        if index >= self.units.len() {
            return Err(self.out_of_range(index));
        }
        self.default_index.store(index, Ordering::Relaxed);
        tracing::debug!(unit = %self.units[index], index, "default unit changed");
        Ok(())
    }

    fn index_of(&self, unit: &Unit<'_>) -> Option<usize> {
        self.units.iter().position(|u| u == unit)
    }

    fn append(&mut self, unit: Unit<'static>) -> Result<(), UnitError> {
        self.check_new_unit(&unit)?;
        self.units.push(unit);
        Ok(())
    }

    /// Insert before `index` (`index == unit_count()` appends). The default
    /// keeps pointing at the same unit.
    fn insert(&mut self, index: usize, unit: Unit<'static>) -> Result<(), UnitError> {
        if index > self.units.len() {
            return Err(self.out_of_range(index));
        }
        self.check_new_unit(&unit)?;
        self.units.insert(index, unit);
        let default = self.default_index.get_mut();
        if index <= *default {
            *default += 1;
        }
        Ok(())
    }

    /// Remove the unit at `index`. The last remaining unit and the current
    /// default cannot be removed.
    fn remove_at(&mut self, index: usize) -> Result<Unit<'static>, UnitError> {
        if index >= self.units.len() {
            return Err(self.out_of_range(index));
        }
        if self.units.len() == 1 {
            return Err(UnitError::LastUnit);
        }
        let default = self.default_index.get_mut();
        if index == *default {
            return Err(UnitError::DefaultUnitRemoval(self.units[index].symbol().to_string()));
        }
        if index < *default {
            *default -= 1;
        }
        Ok(self.units.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length() -> UnitGroup {
        UnitGroup::new(
            vec![
                Unit::linear("mm", 0.001),
                Unit::linear("cm", 0.01),
                Unit::linear("m", 1.0),
                Unit::linear("in", 0.0254),
                Unit::linear("ft", 0.3048),
            ],
            2,
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_new_rejects_bad_groups() {
        assert_eq!(UnitGroup::new(vec![], 0).unwrap_err(), UnitError::LastUnit);
        assert_eq!(
            UnitGroup::new(vec![Unit::linear("m", 1.0)], 1).unwrap_err(),
            UnitError::IndexOutOfRange { index: 1, count: 1 }
        );
        assert_eq!(
            UnitGroup::new(vec![Unit::linear("m", 1.0), Unit::linear("m", 2.0)], 0).unwrap_err(),
            UnitError::DuplicateSymbol("m".to_string())
        );
        assert!(matches!(
            UnitGroup::new(vec![Unit::linear("m", 0.0)], 0),
            Err(UnitError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_default_switching() {
        let g = length();
        assert_eq!(g.default_unit().symbol(), "m");
        g.set_default(3).unwrap();
        assert_eq!(g.default_unit_index(), 3);
        assert_eq!(g.default_unit().symbol(), "in");
        assert_eq!(
            g.set_default(g.unit_count()),
            Err(UnitError::IndexOutOfRange { index: 5, count: 5 })
        );
        assert_eq!(g.set_default(usize::MAX).unwrap_err().code(), "INVALID_ARGUMENT");
        assert_eq!(g.default_unit().symbol(), "in");
    }

    #[test]
    fn test_default_by_symbol() {
        let g = length();
        g.set_default_by_symbol("ft").unwrap();
        assert_eq!(g.default_unit().symbol(), "ft");
        // exact, case-sensitive
        assert_eq!(g.set_default_by_symbol("FT"), Err(UnitError::UnknownUnit("FT".to_string())));
        assert_eq!(g.default_unit().symbol(), "ft");
    }

    #[test]
    fn test_unit_at_and_index_of() {
        let g = length();
        assert_eq!(g.unit_at(1).unwrap().symbol(), "cm");
        assert!(matches!(g.unit_at(5), Err(UnitError::IndexOutOfRange { index: 5, count: 5 })));
        assert_eq!(g.index_of(&Unit::linear("in", 0.0254)), Some(3));
        assert_eq!(g.index_of(&Unit::linear("in", 0.025)), None);
        assert!(g.contains(&Unit::linear("mm", 0.001)));
        let symbols: Vec<&str> = g.units().iter().map(|u| u.symbol()).collect();
        assert_eq!(symbols, ["mm", "cm", "m", "in", "ft"]);
    }

    #[test]
    fn test_find_approximate() {
        let g = UnitGroup::new(
            vec![Unit::linear("m/s\u{b2}", 1.0), Unit::linear("ft/s\u{b2}", 0.3048)],
            0,
        )
        .unwrap();
        assert_eq!(g.find_approximate("m/s2").unwrap().symbol(), "m/s\u{b2}");
        assert_eq!(g.find_approximate("FT/S^2").unwrap().symbol(), "ft/s\u{b2}");
        assert!(g.find_approximate("km/h").is_none());
    }

    #[test]
    fn test_parse() {
        let g = length();
        assert!(close(g.parse("5 mm").unwrap(), 0.005));
        assert!(close(g.parse("2.5").unwrap(), 2.5));
        assert!(close(g.parse("  12IN ").unwrap(), 0.3048));
        assert!(close(g.parse("-1 ft").unwrap(), -0.3048));
        assert_eq!(g.parse("10 bogus"), Err(UnitError::UnrecognizedUnit("bogus".to_string())));
        assert_eq!(g.parse("abc"), Err(UnitError::NotANumber("abc".to_string())));
        g.set_default_by_symbol("cm").unwrap();
        assert!(close(g.parse("250").unwrap(), 2.5));
    }

    #[test]
    fn test_display_strings() {
        let g = length();
        g.set_default_by_symbol("mm").unwrap();
        assert_eq!(g.to_display_string(0.0125), "12.5");
        assert_eq!(g.to_display_string_with_symbol(0.0125), "12.5 mm");
        let m = g.to_measurement(0.0125);
        assert_eq!(m.unit().symbol(), "mm");
        assert_eq!(m.si(), 0.0125);
    }

    #[test]
    fn test_append_and_insert() {
        let mut g = length();
        g.append(Unit::linear("yd", 0.9144)).unwrap();
        assert_eq!(g.unit_count(), 6);
        assert_eq!(g.unit_at(5).unwrap().symbol(), "yd");
        assert_eq!(
            g.append(Unit::linear("yd", 1.0)),
            Err(UnitError::DuplicateSymbol("yd".to_string()))
        );

        // default "m" at 2 moves to 3
        g.insert(0, Unit::linear("um", 1e-6)).unwrap();
        assert_eq!(g.default_unit_index(), 3);
        assert_eq!(g.default_unit().symbol(), "m");
        assert!(g.insert(99, Unit::linear("km", 1000.0)).is_err());
        g.insert(g.unit_count(), Unit::linear("km", 1000.0)).unwrap();
        assert_eq!(g.unit_at(7).unwrap().symbol(), "km");
    }

    #[test]
    fn test_remove() {
        let mut g = length();
        assert_eq!(
            g.remove_at(2),
            Err(UnitError::DefaultUnitRemoval("m".to_string()))
        );
        let removed = g.remove_at(0).unwrap();
        assert_eq!(removed.symbol(), "mm");
        assert_eq!(g.default_unit().symbol(), "m");
        assert_eq!(g.default_unit_index(), 1);
        assert!(g.remove_at(10).is_err());

        let mut single = UnitGroup::new(vec![Unit::linear("s", 1.0)], 0).unwrap();
        assert_eq!(single.remove_at(0), Err(UnitError::LastUnit));
        assert_eq!(single.unit_count(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let g = length();
        let copy = g.clone();
        copy.set_default(0).unwrap();
        assert_eq!(g.default_unit().symbol(), "m");
        assert_eq!(copy.default_unit().symbol(), "mm");
    }
}
