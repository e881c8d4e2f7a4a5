//! Command execution and preference persistence

use std::fs;
use std::path::Path;

use gauge_units::{codes, GroupId, Preferences, QuantityGroup, Registry, UnitError};
use serde::Serialize;
use thiserror::Error;

use crate::cli::Command;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Units(#[from] UnitError),

    #[error("preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Units(e) => e.code(),
            CliError::Io(_) => "IO_ERROR",
            CliError::Json(_) => codes::FORMAT_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct GroupSummary<'a> {
    id: GroupId,
    default: &'a str,
    units: Vec<&'a str>,
}

impl Command {
    pub fn execute(&self, registry: &Registry) -> Result<String, CliError> {
        match self {
            Command::Groups => {
                let summaries: Vec<GroupSummary> = registry
                    .ids()
                    .map(|id| {
                        let group = registry.group(id);
                        GroupSummary {
                            id,
                            default: group.default_unit().symbol(),
                            units: group.units().iter().map(|u| u.symbol()).collect(),
                        }
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&summaries)?)
            }
            Command::Units { group } => {
                let group = registry.get(group)?;
                let default = group.default_unit_index();
                let lines: Vec<String> = group
                    .units()
                    .iter()
                    .enumerate()
                    .map(|(i, u)| {
                        let marker = if i == default { "*" } else { " " };
                        format!("{} {}", marker, u.symbol())
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
            Command::Format { group, si, unit } => {
                let group = registry.get(group)?;
                match unit {
                    Some(symbol) => {
                        let unit = group
                            .units()
                            .into_iter()
                            .find(|u| u.symbol() == symbol.as_str())
                            .ok_or_else(|| UnitError::UnknownUnit(symbol.clone()))?;
                        Ok(unit.format_with_symbol(*si))
                    }
                    None => Ok(group.to_display_string_with_symbol(*si)),
                }
            }
            Command::Parse { group, text } => {
                let si = registry.get(group)?.parse(&text.join(" "))?;
                Ok(si.to_string())
            }
            Command::Stability { diameter, si } => {
                let view = registry.stability_group_for(diameter);
                let measurement = view.to_measurement(*si);
                measurement.checked_value()?;
                Ok(measurement.to_string())
            }
            Command::Default { group, unit } => {
                let group = registry.get(group)?;
                group.set_default_by_symbol(unit)?;
                Ok(format!("default unit is now {}", group.default_unit().symbol()))
            }
            Command::Preset { preset } => {
                let report = registry.apply_preset(*preset);
                let mut out = format!("{} preset applied to {} groups", preset, report.applied);
                for failure in &report.failures {
                    out.push_str(&format!(
                        "\n  {} '{}': {}",
                        failure.group, failure.symbol, failure.error
                    ));
                }
                Ok(out)
            }
        }
    }
}

/// Restore saved defaults if the file exists
pub fn load_preferences(registry: &Registry, path: &Path) -> Result<(), CliError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no preferences file");
        return Ok(());
    }
    let prefs = Preferences::from_json(&fs::read_to_string(path)?)?;
    let report = registry.apply_preferences(&prefs);
    tracing::info!(path = %path.display(), applied = report.applied, "preferences loaded");
    Ok(())
}

pub fn save_preferences(registry: &Registry, path: &Path) -> Result<(), CliError> {
    fs::write(path, registry.preferences().to_json()?)?;
    tracing::info!(path = %path.display(), "preferences saved");
    Ok(())
}
