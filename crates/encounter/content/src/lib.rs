//! Data-driven encounter content and loaders.
//!
//! This crate houses the built-in bosses and the loaders for RON/TOML data files:
//! - Zone boss presets ([`BossZone`])
//! - Boss rosters (built-ins plus RON catalogs)
//! - Combat profile tuning tables (TOML)
//! - Encounter configuration (TOML)

pub mod presets;
pub mod profiles;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::BossZone;
pub use profiles::ProfileTable;
pub use roster::{BossRoster, roster_key};

#[cfg(feature = "loaders")]
pub use loaders::{
    BossCatalog, BossLoader, ConfigLoader, ContentFactory, LoadResult, ProfileLoader,
    factory::Content,
};
