//! Named boss templates available to a host.

use std::collections::BTreeMap;

use encounter_core::{BossFight, BossTemplate, CombatantId, EncounterConfig, TemplateError};
use strum::IntoEnumIterator;

use crate::presets::BossZone;

/// Lookup key for a boss name: lowercase, words joined by `_`.
///
/// `"Tail Warden"`, `"tail-warden"` and `"tail_warden"` all share a key, which
/// also matches the [`BossZone`] spelling.
pub fn roster_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for word in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !key.is_empty() {
            key.push('_');
        }
        key.push_str(&word.to_ascii_lowercase());
    }
    key
}

/// Boss templates keyed by [`roster_key`].
#[derive(Clone, Debug, Default)]
pub struct BossRoster {
    templates: BTreeMap<String, BossTemplate>,
}

impl BossRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster holding every built-in zone boss.
    pub fn with_presets() -> Self {
        let mut roster = Self::new();
        for zone in BossZone::iter() {
            roster.insert(zone.template());
        }
        roster
    }

    /// Adds a template, replacing any boss with the same key.
    /// Returns the replaced template.
    pub fn insert(&mut self, template: BossTemplate) -> Option<BossTemplate> {
        let key = roster_key(&template.name);
        let replaced = self.templates.insert(key, template);
        if let Some(old) = &replaced {
            tracing::debug!("Roster: replaced boss '{}'", old.name);
        }
        replaced
    }

    pub fn extend(&mut self, templates: impl IntoIterator<Item = BossTemplate>) {
        for template in templates {
            self.insert(template);
        }
    }

    pub fn get(&self, name: &str) -> Option<&BossTemplate> {
        self.templates.get(&roster_key(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.values().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Builds a live fight for `name` owned by `owner`.
    /// Returns `None` for an unknown boss.
    pub fn spawn(
        &self,
        name: &str,
        owner: CombatantId,
        config: &EncounterConfig,
    ) -> Option<Result<BossFight, TemplateError>> {
        self.get(name).map(|template| template.build(owner, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_and_separators() {
        assert_eq!(roster_key("Tail Warden"), "tail_warden");
        assert_eq!(roster_key("  tail--WARDEN "), "tail_warden");
        assert_eq!(roster_key("Zone7"), "zone7");
        assert_eq!(roster_key(""), "");
    }

    #[test]
    fn presets_are_reachable_by_zone_name() {
        let roster = BossRoster::with_presets();
        assert_eq!(roster.len(), 7);
        for zone in BossZone::iter() {
            assert!(roster.get(zone.as_ref()).is_some(), "{zone} missing");
        }
        assert_eq!(roster.get("Engine Guardian").unwrap().max_health, 800.0);
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut roster = BossRoster::with_presets();
        let mut custom = BossZone::TailWarden.template();
        custom.name = "TAIL WARDEN".into();
        custom.max_health = 900.0;
        let old = roster.insert(custom).unwrap();
        assert_eq!(old.max_health, 500.0);
        assert_eq!(roster.len(), 7);
        assert_eq!(roster.get("tail_warden").unwrap().max_health, 900.0);
    }

    #[test]
    fn spawn_builds_or_reports() {
        let roster = BossRoster::with_presets();
        let config = EncounterConfig::default();
        let fight = roster
            .spawn("first_class_marshal", CombatantId(9), &config)
            .unwrap()
            .unwrap();
        assert_eq!(fight.owner(), CombatantId(9));
        assert_eq!(fight.attacks().len(), 4);
        assert!(roster.spawn("nobody", CombatantId(9), &config).is_none());

        let mut broken = BossRoster::new();
        broken.insert(BossTemplate::new("Hollow", 100.0));
        assert!(matches!(
            broken.spawn("hollow", CombatantId(9), &config),
            Some(Err(TemplateError::NoPhases))
        ));
    }
}
