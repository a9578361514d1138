//! Boss catalog loader.

use std::path::Path;

use encounter_core::BossTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Boss catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCatalog {
    pub bosses: Vec<BossTemplate>,
}

/// Loader for boss catalogs from RON files.
pub struct BossLoader;

impl BossLoader {
    /// Load and validate every boss in a RON catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<BossTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} (in {})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<BossTemplate>> {
        let catalog: BossCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse boss catalog RON: {}", e))?;

        for template in &catalog.bosses {
            template
                .validate()
                .map_err(|e| anyhow::anyhow!("Boss '{}' is invalid: {}", template.name, e))?;
        }
        tracing::debug!("Loaded {} boss templates", catalog.bosses.len());
        Ok(catalog.bosses)
    }
}
