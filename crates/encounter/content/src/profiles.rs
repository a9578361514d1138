//! Per-profile tuning overrides.

use std::collections::BTreeMap;

use encounter_core::{
    CombatAiController, CombatAiProfile, CombatantId, EncounterConfig, ProfileTuning,
};

/// Tuning for each combat profile. Profiles without an override use the
/// built-in numbers from [`ProfileTuning::for_profile`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileTable {
    profiles: BTreeMap<CombatAiProfile, ProfileTuning>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every built-in tuning written out.
    pub fn with_presets() -> Self {
        let mut table = Self::new();
        for profile in CombatAiProfile::ALL {
            table.set(profile, ProfileTuning::for_profile(profile));
        }
        table
    }

    pub fn set(&mut self, profile: CombatAiProfile, tuning: ProfileTuning) {
        self.profiles.insert(profile, tuning);
    }

    pub fn get(&self, profile: CombatAiProfile) -> ProfileTuning {
        self.profiles
            .get(&profile)
            .copied()
            .unwrap_or_else(|| ProfileTuning::for_profile(profile))
    }

    pub fn is_overridden(&self, profile: CombatAiProfile) -> bool {
        self.profiles.contains_key(&profile)
    }

    /// Applies every override in `other` on top of this table.
    pub fn merge(&mut self, other: ProfileTable) {
        self.profiles.extend(other.profiles);
    }

    /// Builds a controller for `profile` using this table's tuning.
    pub fn controller(
        &self,
        id: CombatantId,
        profile: CombatAiProfile,
        config: &EncounterConfig,
        seed: u64,
    ) -> CombatAiController {
        CombatAiController::new(id, profile, self.get(profile), config.clone(), seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profiles_fall_back_to_presets() {
        let table = ProfileTable::new();
        assert!(!table.is_overridden(CombatAiProfile::Captain));
        assert_eq!(
            table.get(CombatAiProfile::Captain),
            ProfileTuning::for_profile(CombatAiProfile::Captain)
        );
    }

    #[test]
    fn merge_overrides_only_named_profiles() {
        let mut table = ProfileTable::with_presets();
        let mut patch = ProfileTable::new();
        let mut brute = ProfileTuning::for_profile(CombatAiProfile::Brute);
        brute.max_simultaneous_attackers = 1;
        patch.set(CombatAiProfile::Brute, brute);

        table.merge(patch);
        assert_eq!(table.get(CombatAiProfile::Brute).max_simultaneous_attackers, 1);
        assert_eq!(
            table.get(CombatAiProfile::Zealot),
            ProfileTuning::for_profile(CombatAiProfile::Zealot)
        );
    }

    #[test]
    fn controller_carries_table_tuning() {
        let mut table = ProfileTable::new();
        let mut guard = ProfileTuning::for_profile(CombatAiProfile::FirstClassGuard);
        guard.decision_interval = 0.9;
        table.set(CombatAiProfile::FirstClassGuard, guard);

        let ai = table.controller(
            CombatantId(4),
            CombatAiProfile::FirstClassGuard,
            &EncounterConfig::default(),
            1,
        );
        assert_eq!(ai.tuning().decision_interval, 0.9);
        assert_eq!(ai.profile(), CombatAiProfile::FirstClassGuard);
    }
}
