//! Stability margin group bound to a specific design
//!
//! The canonical STABILITY group holds an unbound caliber placeholder. A
//! [`StabilityView`] presents that group with the placeholder swapped for a
//! caliber unit reading its diameter from one reference. Order, count and the
//! default index all come from the canonical group, so switching the default
//! through any view switches it for every view.

use crate::group::{QuantityGroup, UnitGroup};
use crate::reference::CaliberSource;
use crate::{Unit, UnitError};

/// Read-only view of the stability group with its own caliber unit.
///
/// Borrows both the canonical group and the reference, so it cannot outlive
/// either.
#[derive(Debug)]
pub struct StabilityView<'a> {
    canonical: &'a UnitGroup,
    caliber: Unit<'a>,
}

impl<'a> StabilityView<'a> {
    pub fn new(canonical: &'a UnitGroup, reference: &'a dyn CaliberSource) -> Self {
        StabilityView {
            canonical,
            caliber: Unit::caliber(reference),
        }
    }

    /// The bound caliber unit
    pub fn caliber_unit(&self) -> &Unit<'a> {
        &self.caliber
    }

    /// Slot of the caliber placeholder in the canonical group
    fn caliber_slot(&self) -> Option<usize> {
        self.canonical
            .units()
            .iter()
            .position(|u| u.is_context_bound())
    }
}

impl QuantityGroup for StabilityView<'_> {
    fn unit_count(&self) -> usize {
        self.canonical.unit_count()
    }

    fn unit_at(&self, index: usize) -> Result<&Unit<'_>, UnitError> {
        let unit = self.canonical.unit_at(index)?;
        if unit.is_context_bound() {
            return Ok(&self.caliber);
        }
        Ok(unit)
    }

    fn default_unit(&self) -> &Unit<'_> {
        let unit = self.canonical.default_unit();
        if unit.is_context_bound() {
            return &self.caliber;
        }
        unit
    }

    fn default_unit_index(&self) -> usize {
        self.canonical.default_unit_index()
    }

    fn set_default(&self, index: usize) -> Result<(), UnitError> {
        self.canonical.set_default(index)
    }

    /// Any caliber unit maps to the caliber slot, whatever it is bound to
    fn index_of(&self, unit: &Unit<'_>) -> Option<usize> {
        if unit.is_context_bound() {
            return self.caliber_slot();
        }
        self.canonical.index_of(unit)
    }

    fn append(&mut self, _unit: Unit<'static>) -> Result<(), UnitError> {
        Err(UnitError::Unsupported("stability view must not be modified"))
    }

    fn insert(&mut self, _index: usize, _unit: Unit<'static>) -> Result<(), UnitError> {
        Err(UnitError::Unsupported("stability view must not be modified"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<Unit<'static>, UnitError> {
        Err(UnitError::Unsupported("stability view must not be modified"))
    }
}
