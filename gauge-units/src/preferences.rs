//! Persisted default-unit choices
//!
//! Preferences map group identifiers to the symbol of the chosen default
//! unit. They are stored as JSON by the host application and restored with
//! the same best-effort rules as presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::group::QuantityGroup;
use crate::preset::DefaultsReport;
use crate::{GroupId, Registry};

/// Default unit symbol per group identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub defaults: BTreeMap<String, String>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn set(&mut self, id: GroupId, symbol: &str) {
        self.defaults.insert(id.name().to_string(), symbol.to_string());
    }

    pub fn get(&self, id: GroupId) -> Option<&str> {
        self.defaults.get(id.name()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl Registry {
    /// Snapshot of every group's current default
    pub fn preferences(&self) -> Preferences {
        let mut prefs = Preferences::new();
        for (id, symbol) in self.default_symbols() {
            prefs.set(id, symbol);
        }
        prefs
    }

    /// Restore saved defaults. Unknown groups and symbols are reported and
    /// skipped.
    pub fn apply_preferences(&self, prefs: &Preferences) -> DefaultsReport {
        let mut report = DefaultsReport::default();
        for (group, symbol) in &prefs.defaults {
            let result = group
                .parse::<GroupId>()
                .and_then(|id| self.group(id).set_default_by_symbol(symbol));
            report.record(group, symbol, result);
        }
        tracing::debug!(
            applied = report.applied,
            failed = report.failures.len(),
            "preferences restored"
        );
        report
    }
}
