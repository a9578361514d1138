//! Combat profiles and their tuning.

use crate::combat::{AttackDirection, BlockDirection, WeightedTable};

/// Fighting temperament of an AI-controlled combatant.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatAiProfile {
    /// Tailies: poorly equipped, wild swings.
    Desperate,
    /// Jackboots: trained, methodical, good blockers.
    Disciplined,
    /// Breachmen: dirty fighters, use the environment.
    Cunning,
    /// Heavy hitters, slow but powerful.
    Brute,
    /// Commands and rallies nearby disciplined troops.
    Captain,
    /// Turns frenzied and reckless when wounded.
    Zealot,
    /// Precise fencers who keep their distance and counter.
    FirstClassGuard,
}

// Cumulative bounds; rolls past the last bound land on the last entry.
const DESPERATE_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::Mid, 0.6),
    (AttackDirection::High, 0.8),
    (AttackDirection::Low, 1.0),
]);
const DISCIPLINED_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.33),
    (AttackDirection::Mid, 0.66),
    (AttackDirection::Low, 1.0),
]);
const CUNNING_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.2),
    (AttackDirection::Mid, 0.5),
    (AttackDirection::Low, 1.0),
]);
const BRUTE_SWINGS: WeightedTable<AttackDirection> =
    WeightedTable::new(&[(AttackDirection::High, 0.5), (AttackDirection::Mid, 1.0)]);
const CAPTAIN_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.35),
    (AttackDirection::Mid, 0.75),
    (AttackDirection::Low, 1.0),
]);
const ZEALOT_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.4),
    (AttackDirection::Mid, 0.7),
    (AttackDirection::Low, 1.0),
]);
const FRENZIED_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.25),
    (AttackDirection::Mid, 0.5),
    (AttackDirection::Low, 0.75),
    (AttackDirection::Left, 0.875),
    (AttackDirection::Right, 1.0),
]);
const GUARD_SWINGS: WeightedTable<AttackDirection> = WeightedTable::new(&[
    (AttackDirection::High, 0.45),
    (AttackDirection::Mid, 0.8),
    (AttackDirection::Low, 1.0),
]);

const ELITE_GUARDS: WeightedTable<BlockDirection> = WeightedTable::new(&[
    (BlockDirection::Mid, 0.5),
    (BlockDirection::High, 0.8),
    (BlockDirection::Low, 1.0),
]);
const COMMON_GUARDS: WeightedTable<BlockDirection> = WeightedTable::new(&[
    (BlockDirection::Mid, 0.4),
    (BlockDirection::High, 0.7),
    (BlockDirection::Low, 1.0),
]);

impl CombatAiProfile {
    pub const ALL: [CombatAiProfile; 7] = [
        CombatAiProfile::Desperate,
        CombatAiProfile::Disciplined,
        CombatAiProfile::Cunning,
        CombatAiProfile::Brute,
        CombatAiProfile::Captain,
        CombatAiProfile::Zealot,
        CombatAiProfile::FirstClassGuard,
    ];

    /// Swing direction weights for melee attacks.
    pub const fn swing_table(self, frenzied: bool) -> WeightedTable<AttackDirection> {
        match self {
            Self::Desperate => DESPERATE_SWINGS,
            Self::Disciplined => DISCIPLINED_SWINGS,
            Self::Cunning => CUNNING_SWINGS,
            Self::Brute => BRUTE_SWINGS,
            Self::Captain => CAPTAIN_SWINGS,
            Self::Zealot if frenzied => FRENZIED_SWINGS,
            Self::Zealot => ZEALOT_SWINGS,
            Self::FirstClassGuard => GUARD_SWINGS,
        }
    }

    /// Guard direction weights when this profile blocks.
    pub const fn guard_table(self) -> WeightedTable<BlockDirection> {
        match self {
            Self::Captain | Self::FirstClassGuard => ELITE_GUARDS,
            _ => COMMON_GUARDS,
        }
    }

    /// Multiplier on the tuned block chance.
    pub const fn block_bonus(self) -> f32 {
        match self {
            Self::FirstClassGuard => 1.3,
            _ => 1.0,
        }
    }

    /// Whether a capped-out fighter circles to the target's flank instead of holding.
    pub const fn flanks(self) -> bool {
        matches!(self, Self::Cunning | Self::Disciplined | Self::Captain)
    }

    /// Whether a captain's rally raises this profile's attacker cap.
    pub const fn answers_rally(self) -> bool {
        matches!(self, Self::Disciplined)
    }
}

/// Numbers that shape how a profile fights.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileTuning {
    pub block_chance: f32,
    pub dodge_chance: f32,
    /// Seconds between decisions.
    pub decision_interval: f32,
    pub environmental_use_chance: f32,
    /// Corridor discipline: how many AI may engage one target at once.
    pub max_simultaneous_attackers: u32,
    /// Melee reach; also scales the engagement radius and approach distance.
    pub preferred_combat_range: f32,
    pub ranged_attack_chance: f32,
    pub preferred_ranged_range: f32,
    pub counter_attack_chance: f32,
    pub suicidal_charge_chance: f32,
    pub frenzy_health_threshold: f32,
    pub command_radius: f32,
}

impl ProfileTuning {
    pub const DEFAULT_PREFERRED_COMBAT_RANGE: f32 = 180.0;
    pub const DEFAULT_DECISION_INTERVAL: f32 = 0.5;
    pub const DEFAULT_MAX_SIMULTANEOUS_ATTACKERS: u32 = 2;
    pub const DEFAULT_PREFERRED_RANGED_RANGE: f32 = 800.0;
    pub const DEFAULT_FRENZY_HEALTH_THRESHOLD: f32 = 0.3;
    pub const DEFAULT_COMMAND_RADIUS: f32 = 500.0;

    /// Neutral tuning: shared defaults with every chance at zero.
    pub const fn new() -> Self {
        Self {
            block_chance: 0.0,
            dodge_chance: 0.0,
            decision_interval: Self::DEFAULT_DECISION_INTERVAL,
            environmental_use_chance: 0.0,
            max_simultaneous_attackers: Self::DEFAULT_MAX_SIMULTANEOUS_ATTACKERS,
            preferred_combat_range: Self::DEFAULT_PREFERRED_COMBAT_RANGE,
            ranged_attack_chance: 0.0,
            preferred_ranged_range: Self::DEFAULT_PREFERRED_RANGED_RANGE,
            counter_attack_chance: 0.0,
            suicidal_charge_chance: 0.0,
            frenzy_health_threshold: Self::DEFAULT_FRENZY_HEALTH_THRESHOLD,
            command_radius: Self::DEFAULT_COMMAND_RADIUS,
        }
    }

    /// Built-in tuning for `profile`.
    pub const fn for_profile(profile: CombatAiProfile) -> Self {
        let base = Self::new();
        match profile {
            CombatAiProfile::Desperate => Self {
                block_chance: 0.15,
                dodge_chance: 0.2,
                decision_interval: 0.8,
                environmental_use_chance: 0.05,
                ..base
            },
            CombatAiProfile::Disciplined => Self {
                block_chance: 0.5,
                dodge_chance: 0.2,
                decision_interval: 0.4,
                environmental_use_chance: 0.1,
                max_simultaneous_attackers: 3,
                ..base
            },
            CombatAiProfile::Cunning => Self {
                block_chance: 0.3,
                dodge_chance: 0.35,
                decision_interval: 0.5,
                environmental_use_chance: 0.4,
                ..base
            },
            CombatAiProfile::Brute => Self {
                block_chance: 0.1,
                dodge_chance: 0.05,
                decision_interval: 1.0,
                environmental_use_chance: 0.02,
                ..base
            },
            CombatAiProfile::Captain => Self {
                block_chance: 0.45,
                dodge_chance: 0.25,
                decision_interval: 0.35,
                environmental_use_chance: 0.15,
                max_simultaneous_attackers: 4,
                ranged_attack_chance: 0.4,
                preferred_ranged_range: 1000.0,
                counter_attack_chance: 0.2,
                ..base
            },
            CombatAiProfile::Zealot => Self {
                block_chance: 0.15,
                dodge_chance: 0.1,
                decision_interval: 0.6,
                environmental_use_chance: 0.05,
                suicidal_charge_chance: 0.5,
                frenzy_health_threshold: 0.3,
                ..base
            },
            CombatAiProfile::FirstClassGuard => Self {
                block_chance: 0.6,
                dodge_chance: 0.3,
                decision_interval: 0.3,
                environmental_use_chance: 0.08,
                ranged_attack_chance: 0.25,
                preferred_ranged_range: 800.0,
                counter_attack_chance: 0.5,
                ..base
            },
        }
    }
}

impl Default for ProfileTuning {
    fn default() -> Self {
        Self::new()
    }
}
