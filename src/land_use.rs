use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{HydroError, Result};
use crate::inputs::CoefficientParams;

// Built-in runoff fractions, mirrored by land_use.toml at the crate root
const DEFAULT_LAND_USES: [(&str, &str, f64); 4] = [
    ("urban", "Urban built-up (impervious)", 0.60),
    ("agriculture", "Agriculture / tilled land", 0.25),
    ("grassland", "Grassland / pasture", 0.15),
    ("forest", "Forest / dense vegetation", 0.10),
];

#[derive(Deserialize)]
struct LandUseFile {
    land_use: BTreeMap<String, LandUseEntry>,
}

#[derive(Deserialize)]
struct LandUseEntry {
    #[serde(default)]
    label: Option<String>,
    fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandUse {
    pub label: String,
    pub params: CoefficientParams,
}

/// Read-only table from land-use category to runoff fraction.
///
/// Built once and then only read, so it can be shared across threads
/// without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct LandUseTable {
    entries: BTreeMap<String, LandUse>,
}

impl Default for LandUseTable {
    fn default() -> Self {
        let entries = DEFAULT_LAND_USES
            .iter()
            .map(|&(key, label, fraction)| {
                (
                    key.to_string(),
                    LandUse {
                        label: label.to_string(),
                        params: CoefficientParams::from_constant(fraction),
                    },
                )
            })
            .collect();
        LandUseTable { entries }
    }
}

impl LandUseTable {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: LandUseFile = toml::from_str(toml_str)?;

        let mut entries = BTreeMap::new();
        for (key, entry) in file.land_use {
            let params = CoefficientParams::new(entry.fraction)?;
            let label = entry.label.unwrap_or_else(|| key.clone());
            entries.insert(key.to_lowercase(), LandUse { label, params });
        }
        debug!(categories = entries.len(), "land-use table loaded");
        Ok(LandUseTable { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let toml_str = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&toml_str)
    }

    pub fn get(&self, land_use: &str) -> Option<&LandUse> {
        self.entries.get(&land_use.trim().to_lowercase())
    }

    // Runoff fraction for a category, case-insensitive
    pub fn fraction(&self, land_use: &str) -> Result<CoefficientParams> {
        self.get(land_use)
            .map(|entry| entry.params)
            .ok_or_else(|| HydroError::UnknownCategory(format!("land use '{}'", land_use)))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &LandUse)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
