//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use encounter_core::EncounterConfig;

use crate::loaders::{BossLoader, ConfigLoader, LoadResult, ProfileLoader};
use crate::profiles::ProfileTable;
use crate::roster::BossRoster;

/// Everything a host needs to stage encounters.
#[derive(Clone, Debug)]
pub struct Content {
    pub roster: BossRoster,
    pub profiles: ProfileTable,
    pub config: EncounterConfig,
}

/// Content factory that loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── encounter.toml
/// ├── profiles.toml
/// └── bosses.ron
/// ```
///
/// Every file is optional. Missing files leave the built-in content as is.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load encounter configuration from `encounter.toml`.
    pub fn load_config(&self) -> LoadResult<EncounterConfig> {
        let path = self.data_dir.join("encounter.toml");
        if !path.exists() {
            return Ok(EncounterConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load profile overrides from `profiles.toml`.
    pub fn load_profiles(&self) -> LoadResult<ProfileTable> {
        let path = self.data_dir.join("profiles.toml");
        if !path.exists() {
            return Ok(ProfileTable::new());
        }
        ProfileLoader::load(&path)
    }

    /// Built-in zone bosses plus everything in `bosses.ron`.
    pub fn load_roster(&self) -> LoadResult<BossRoster> {
        let mut roster = BossRoster::with_presets();
        let path = self.data_dir.join("bosses.ron");
        if path.exists() {
            roster.extend(BossLoader::load(&path)?);
        }
        Ok(roster)
    }

    pub fn load(&self) -> LoadResult<Content> {
        let content = Content {
            roster: self.load_roster()?,
            profiles: self.load_profiles()?,
            config: self.load_config()?,
        };
        tracing::info!(
            "Loaded {} bosses from {}",
            content.roster.len(),
            self.data_dir.display()
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
