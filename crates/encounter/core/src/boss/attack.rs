//! Boss special attacks and range-aware selection.

use super::phase::{BossPhase, PhaseSet};

/// Shape of a special attack. Drives how the host animates and resolves it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAttackType {
    /// Ground pound with area damage.
    AreaSlam,
    /// Dash across the corridor.
    ChargeRush,
    /// Uses train hazards (steam vents, electrical panels).
    EnvironmentalTrigger,
    /// Calls in adds instead of dealing damage.
    SummonMinions,
    /// Multiple projectiles.
    RangedBarrage,
    /// Grab and throw.
    GrabAttack,
    /// Must be dodged.
    UnblockableStrike,
}

/// A special attack and its cooldown state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossAttack {
    pub name: String,
    pub attack_type: BossAttackType,
    pub damage: f32,
    pub range: f32,
    pub cooldown: f32,
    /// Telegraph time before the attack lands.
    pub wind_up: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blockable: bool,
    #[cfg_attr(feature = "serde", serde(default = "dodgeable_default"))]
    pub dodgeable: bool,
    #[cfg_attr(feature = "serde", serde(default = "PhaseSet::all"))]
    pub phases: PhaseSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cooldown_remaining: f32,
}

#[cfg(feature = "serde")]
fn dodgeable_default() -> bool {
    true
}

impl BossAttack {
    pub fn new(name: impl Into<String>, attack_type: BossAttackType) -> Self {
        Self {
            name: name.into(),
            attack_type,
            damage: 0.0,
            range: 0.0,
            cooldown: 0.0,
            wind_up: 0.0,
            blockable: false,
            dodgeable: true,
            phases: PhaseSet::all(),
            cooldown_remaining: 0.0,
        }
    }

    pub fn with_damage(mut self, damage: f32, range: f32) -> Self {
        self.damage = damage;
        self.range = range;
        self
    }

    pub fn with_timing(mut self, cooldown: f32, wind_up: f32) -> Self {
        self.cooldown = cooldown;
        self.wind_up = wind_up;
        self
    }

    pub fn with_defense(mut self, blockable: bool, dodgeable: bool) -> Self {
        self.blockable = blockable;
        self.dodgeable = dodgeable;
        self
    }

    pub fn with_phases(mut self, phases: PhaseSet) -> Self {
        self.phases = phases;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn is_summon(&self) -> bool {
        self.attack_type == BossAttackType::SummonMinions
    }

    /// Whether the attack reaches a target `distance` away.
    pub fn reaches(&self, distance: f32) -> bool {
        distance <= self.range
    }

    /// Selection score: raw damage when the target is in reach, otherwise
    /// how far short the attack falls (negative, closer to zero is better).
    pub fn score(&self, distance: f32) -> f32 {
        if self.reaches(distance) {
            self.damage
        } else {
            self.range - distance
        }
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown;
    }

    pub(crate) fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }
}

/// Index of the best attack to use against a target `distance` away.
///
/// Only ready attacks allowed in `phase` compete. The highest score strictly
/// above `floor` wins; on equal scores the earlier attack is kept.
pub fn select_best(
    attacks: &[BossAttack],
    phase: BossPhase,
    distance: f32,
    floor: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, attack) in attacks.iter().enumerate() {
        if !attack.is_ready() || !attack.phases.allows(phase) {
            continue;
        }
        let score = attack.score(distance);
        let bar = best.map_or(floor, |(_, s)| s);
        if score > bar {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
