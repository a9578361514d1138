//! Condition nodes for combat decision trees.
//!
//! Conditions only read the situation. The one exception is [`RollChance`],
//! which spends a die.

use behavior_tree::{Behavior, Status};

use crate::ai::Situation;

/// Target is within melee reach.
pub struct InMeleeRange;

impl Behavior<Situation> for InMeleeRange {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.in_melee_range())
    }
}

/// Target is past melee reach but inside ranged reach.
pub struct InRangedBand;

impl Behavior<Situation> for InRangedBand {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.in_ranged_band())
    }
}

/// Corridor discipline allows another attacker on the target.
pub struct CanEngage;

impl Behavior<Situation> for CanEngage {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.can_engage)
    }
}

/// Target is further than `factor` times melee reach.
pub struct TargetBeyond {
    pub factor: f32,
}

impl Behavior<Situation> for TargetBeyond {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.distance > ctx.tuning.preferred_combat_range * self.factor)
    }
}

/// Target is closer than `factor` times melee reach.
pub struct TargetWithin {
    pub factor: f32,
}

impl Behavior<Situation> for TargetWithin {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.distance < ctx.tuning.preferred_combat_range * self.factor)
    }
}

/// Which tuned chance a [`RollChance`] node tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chance {
    RangedAttack,
    EnvironmentalUse,
    SuicidalCharge,
}

/// Succeeds with the tuned probability. A zero chance fails without
/// spending a die.
pub struct RollChance(pub Chance);

impl Behavior<Situation> for RollChance {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let p = match self.0 {
            Chance::RangedAttack => ctx.tuning.ranged_attack_chance,
            Chance::EnvironmentalUse => ctx.tuning.environmental_use_chance,
            Chance::SuicidalCharge => ctx.tuning.suicidal_charge_chance,
        };
        if p <= 0.0 {
            return Status::Failure;
        }
        Status::from_bool(ctx.dice.chance(p))
    }
}
