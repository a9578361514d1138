//! Encounter configuration loader.

use std::path::Path;

use encounter_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter configuration from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} (in {})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<EncounterConfig> {
        let config: EncounterConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter config TOML: {}", e))?;

        // Written so NaN fails too.
        let factors_valid = config.engagement_radius_factor >= 0.0
            && config.approach_acceptance_factor >= 0.0;
        if !factors_valid {
            anyhow::bail!("Encounter config factors must be non-negative");
        }
        Ok(config)
    }
}
