//! Profile tuning loader.

use std::collections::BTreeMap;
use std::path::Path;

use encounter_core::{CombatAiProfile, ProfileTuning};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::profiles::ProfileTable;

/// File format: one `[profiles.<name>]` table per overridden profile.
///
/// ```toml
/// [profiles.brute]
/// max_simultaneous_attackers = 1
/// ```
///
/// Keys left out keep the profile's built-in value, not the neutral default.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: BTreeMap<String, toml::Table>,
}

/// Loader for profile tuning overrides from TOML files.
pub struct ProfileLoader;

impl ProfileLoader {
    pub fn load(path: &Path) -> LoadResult<ProfileTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} (in {})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ProfileTable> {
        let file: ProfileFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse profile TOML: {}", e))?;

        let mut table = ProfileTable::new();
        for (name, overrides) in file.profiles {
            let profile: CombatAiProfile = name
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown combat profile '{}'", name))?;
            table.set(profile, overlay(profile, overrides)?);
        }
        Ok(table)
    }
}

/// Writes `overrides` over the built-in tuning for `profile`.
fn overlay(profile: CombatAiProfile, overrides: toml::Table) -> LoadResult<ProfileTuning> {
    let mut merged = toml::Table::try_from(ProfileTuning::for_profile(profile))
        .map_err(|e| anyhow::anyhow!("Failed to encode {} tuning: {}", profile, e))?;

    for (key, value) in overrides {
        if !merged.contains_key(&key) {
            anyhow::bail!("Unknown tuning key '{}' for profile {}", key, profile);
        }
        merged.insert(key, value);
    }

    merged
        .try_into()
        .map_err(|e| anyhow::anyhow!("Invalid tuning for profile {}: {}", profile, e))
}
