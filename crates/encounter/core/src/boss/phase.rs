//! Boss phases and the threshold table that drives them.

use bitflags::bitflags;

use super::template::TemplateError;

/// Segment of a boss fight.
///
/// Variants are declared in fight order; the derived `Ord` is the
/// transition order and transitions only ever move forward.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPhase {
    Phase1,
    Phase2,
    Phase3,
    Enraged,
    Defeated,
}

impl BossPhase {
    /// Phases a boss can fight in (everything but `Defeated`).
    pub const FIGHTING: [BossPhase; 4] = [
        BossPhase::Phase1,
        BossPhase::Phase2,
        BossPhase::Phase3,
        BossPhase::Enraged,
    ];

    /// The flag for this phase; empty for `Defeated`.
    pub const fn flag(self) -> PhaseSet {
        match self {
            BossPhase::Phase1 => PhaseSet::PHASE1,
            BossPhase::Phase2 => PhaseSet::PHASE2,
            BossPhase::Phase3 => PhaseSet::PHASE3,
            BossPhase::Enraged => PhaseSet::ENRAGED,
            BossPhase::Defeated => PhaseSet::empty(),
        }
    }
}

bitflags! {
    /// Set of phases in which an attack may be used.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PhaseSet: u8 {
        const PHASE1  = 1 << 0;
        const PHASE2  = 1 << 1;
        const PHASE3  = 1 << 2;
        const ENRAGED = 1 << 3;

        const LATE = Self::PHASE2.bits() | Self::PHASE3.bits() | Self::ENRAGED.bits();
        const FINAL = Self::PHASE3.bits() | Self::ENRAGED.bits();
    }
}

impl PhaseSet {
    /// Whether an attack tagged with this set may be used in `phase`.
    /// Always false for `Defeated`.
    pub fn allows(self, phase: BossPhase) -> bool {
        let flag = phase.flag();
        !flag.is_empty() && self.contains(flag)
    }
}

/// Modifiers that apply while the boss is in one phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhaseConfig {
    pub phase: BossPhase,
    /// Health fraction at or below which this phase begins (1.0 = full).
    pub health_threshold: f32,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub damage_multiplier: f32,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub speed_multiplier: f32,
    /// Fraction of incoming damage ignored in this phase (0.0 - 1.0).
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_resistance: f32,
    /// Adds summoned on entering this phase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub adds: u32,
}

#[cfg(feature = "serde")]
fn one() -> f32 {
    1.0
}

impl BossPhaseConfig {
    pub fn new(phase: BossPhase, health_threshold: f32) -> Self {
        Self {
            phase,
            health_threshold,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            damage_resistance: 0.0,
            adds: 0,
        }
    }

    pub fn with_multipliers(mut self, damage: f32, speed: f32) -> Self {
        self.damage_multiplier = damage;
        self.speed_multiplier = speed;
        self
    }

    pub fn with_resistance(mut self, resistance: f32) -> Self {
        self.damage_resistance = resistance;
        self
    }

    pub fn with_adds(mut self, adds: u32) -> Self {
        self.adds = adds;
        self
    }
}

/// Validated phase configurations, in phase order.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable {
    configs: Vec<BossPhaseConfig>,
}

impl PhaseTable {
    /// Sorts `configs` by phase and validates them.
    ///
    /// Input order does not matter, but thresholds are never reordered to
    /// fit: once sorted by phase, every later phase must have a strictly
    /// lower threshold than the one before, or the table is rejected with
    /// [`TemplateError::ThresholdOrder`].
    ///
    /// Also rejects empty tables, thresholds outside `[0, 1]`, duplicate
    /// phases and a `Defeated` entry.
    ///
    /// An `Enraged` entry only supplies modifiers. Its threshold is never
    /// consulted since enrage is driven by the fight timer.
    pub fn new(mut configs: Vec<BossPhaseConfig>) -> Result<Self, TemplateError> {
        if configs.is_empty() {
            return Err(TemplateError::NoPhases);
        }

        for config in &configs {
            if config.phase == BossPhase::Defeated {
                return Err(TemplateError::DefeatedPhaseConfigured);
            }
            if !(0.0..=1.0).contains(&config.health_threshold) {
                return Err(TemplateError::ThresholdOutOfRange {
                    phase: config.phase,
                    threshold: config.health_threshold,
                });
            }
            if !(0.0..=1.0).contains(&config.damage_resistance) {
                return Err(TemplateError::ResistanceOutOfRange {
                    phase: config.phase,
                    resistance: config.damage_resistance,
                });
            }
        }

        configs.sort_by(|a, b| a.phase.cmp(&b.phase));
        for pair in configs.windows(2) {
            if pair[0].phase == pair[1].phase {
                return Err(TemplateError::DuplicatePhase(pair[0].phase));
            }
            if pair[1].phase != BossPhase::Enraged
                && pair[1].health_threshold >= pair[0].health_threshold
            {
                return Err(TemplateError::ThresholdOrder {
                    earlier: pair[0].phase,
                    later: pair[1].phase,
                });
            }
        }

        // Phase order and threshold order now agree, so ascending phase is
        // descending threshold.
        Ok(Self { configs })
    }

    pub fn get(&self, phase: BossPhase) -> Option<&BossPhaseConfig> {
        self.configs.iter().find(|c| c.phase == phase)
    }

    /// Configurations in phase order (descending threshold, `Enraged` last).
    pub fn iter(&self) -> impl Iterator<Item = &BossPhaseConfig> {
        self.configs.iter()
    }

    fn thresholds(&self) -> impl DoubleEndedIterator<Item = &BossPhaseConfig> {
        self.configs.iter().filter(|c| c.phase != BossPhase::Enraged)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// The phase a boss at `health_pct` belongs in: the configured phase
    /// with the lowest threshold still at or above `health_pct`.
    /// Falls back to `Phase1` when no threshold reaches that high.
    pub fn phase_for(&self, health_pct: f32) -> BossPhase {
        self.thresholds()
            .rev()
            .find(|c| health_pct <= c.health_threshold)
            .map(|c| c.phase)
            .unwrap_or(BossPhase::Phase1)
    }

    /// The single next transition from `current`, if any.
    ///
    /// Walks thresholds in descending order and returns the first phase
    /// beyond `current` whose threshold has been crossed. A boss that loses
    /// most of its health in one frame therefore passes through every
    /// intermediate phase instead of jumping straight to the last one.
    pub fn next_step(&self, current: BossPhase, health_pct: f32) -> Option<BossPhase> {
        self.thresholds()
            .find(|c| c.phase > current && health_pct <= c.health_threshold)
            .map(|c| c.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warden() -> PhaseTable {
        PhaseTable::new(vec![
            BossPhaseConfig::new(BossPhase::Phase3, 0.3),
            BossPhaseConfig::new(BossPhase::Phase1, 1.0),
            BossPhaseConfig::new(BossPhase::Phase2, 0.6),
        ])
        .unwrap()
    }

    #[test]
    fn table_is_sorted_by_descending_threshold() {
        let thresholds: Vec<f32> = warden().iter().map(|c| c.health_threshold).collect();
        assert_eq!(thresholds, vec![1.0, 0.6, 0.3]);
    }

    #[test]
    fn swapped_thresholds_are_rejected_not_reordered() {
        let swapped = PhaseTable::new(vec![
            BossPhaseConfig::new(BossPhase::Phase1, 1.0),
            BossPhaseConfig::new(BossPhase::Phase2, 0.3),
            BossPhaseConfig::new(BossPhase::Phase3, 0.6),
        ]);
        assert_eq!(
            swapped,
            Err(TemplateError::ThresholdOrder {
                earlier: BossPhase::Phase2,
                later: BossPhase::Phase3,
            })
        );
    }

    #[test]
    fn phase_for_picks_deepest_crossed_threshold() {
        let table = warden();
        assert_eq!(table.phase_for(1.0), BossPhase::Phase1);
        assert_eq!(table.phase_for(0.61), BossPhase::Phase1);
        assert_eq!(table.phase_for(0.6), BossPhase::Phase2);
        assert_eq!(table.phase_for(0.31), BossPhase::Phase2);
        assert_eq!(table.phase_for(0.3), BossPhase::Phase3);
        assert_eq!(table.phase_for(0.0), BossPhase::Phase3);
    }

    #[test]
    fn phase_for_defaults_to_phase_one_above_every_threshold() {
        let table = PhaseTable::new(vec![BossPhaseConfig::new(BossPhase::Phase2, 0.5)]).unwrap();
        assert_eq!(table.phase_for(0.9), BossPhase::Phase1);
    }

    #[test]
    fn next_step_walks_one_phase_at_a_time() {
        let table = warden();
        assert_eq!(table.next_step(BossPhase::Phase1, 0.1), Some(BossPhase::Phase2));
        assert_eq!(table.next_step(BossPhase::Phase2, 0.1), Some(BossPhase::Phase3));
        assert_eq!(table.next_step(BossPhase::Phase3, 0.1), None);
    }

    #[test]
    fn next_step_never_goes_backwards() {
        let table = warden();
        assert_eq!(table.next_step(BossPhase::Phase3, 0.9), None);
        assert_eq!(table.next_step(BossPhase::Enraged, 0.1), None);
    }

    #[test]
    fn stepping_converges_on_phase_for() {
        let table = warden();
        for pct in [1.0, 0.75, 0.6, 0.45, 0.3, 0.05, 0.0] {
            let mut phase = BossPhase::Phase1;
            while let Some(next) = table.next_step(phase, pct) {
                phase = next;
            }
            assert_eq!(phase, table.phase_for(pct), "health {pct}");
        }
    }

    #[test]
    fn rejects_inconsistent_tables() {
        assert_eq!(PhaseTable::new(vec![]), Err(TemplateError::NoPhases));
        assert!(matches!(
            PhaseTable::new(vec![BossPhaseConfig::new(BossPhase::Phase1, 1.5)]),
            Err(TemplateError::ThresholdOutOfRange { .. })
        ));
        assert_eq!(
            PhaseTable::new(vec![
                BossPhaseConfig::new(BossPhase::Phase1, 1.0),
                BossPhaseConfig::new(BossPhase::Phase1, 0.5),
            ]),
            Err(TemplateError::DuplicatePhase(BossPhase::Phase1))
        );
        assert_eq!(
            PhaseTable::new(vec![
                BossPhaseConfig::new(BossPhase::Phase1, 0.5),
                BossPhaseConfig::new(BossPhase::Phase2, 0.8),
            ]),
            Err(TemplateError::ThresholdOrder {
                earlier: BossPhase::Phase1,
                later: BossPhase::Phase2,
            })
        );
        assert_eq!(
            PhaseTable::new(vec![BossPhaseConfig::new(BossPhase::Defeated, 0.0)]),
            Err(TemplateError::DefeatedPhaseConfigured)
        );
    }

    #[test]
    fn enraged_entry_never_triggers_by_health() {
        let table = PhaseTable::new(vec![
            BossPhaseConfig::new(BossPhase::Phase1, 1.0),
            BossPhaseConfig::new(BossPhase::Phase2, 0.5),
            BossPhaseConfig::new(BossPhase::Enraged, 0.9).with_multipliers(2.0, 1.5),
        ])
        .unwrap();
        assert_eq!(table.phase_for(0.0), BossPhase::Phase2);
        assert_eq!(table.next_step(BossPhase::Phase2, 0.0), None);
        assert_eq!(table.get(BossPhase::Enraged).map(|c| c.damage_multiplier), Some(2.0));
    }

    #[test]
    fn phase_set_excludes_defeated() {
        assert!(PhaseSet::all().allows(BossPhase::Enraged));
        assert!(!PhaseSet::all().allows(BossPhase::Defeated));
        assert!(PhaseSet::LATE.allows(BossPhase::Phase2));
        assert!(!PhaseSet::LATE.allows(BossPhase::Phase1));
        assert!(!PhaseSet::empty().allows(BossPhase::Phase1));
    }
}
