//! Per-profile decision trees.
//!
//! ```text
//! profile_tree(profile)
//!   └─ Sequence
//!       ├─ AlwaysSucceed(profile_hook)     captain rally / zealot charge / guard retreat
//!       └─ Selector
//!           ├─ ranged_volley()              ranged band, roll, weapon
//!           ├─ melee_engagement()           in range, can engage
//!           │   └─ Selector
//!           │       ├─ environmental_kill() roll, then hazard (ends the decision either way)
//!           │       └─ MeleeAttack
//!           ├─ approach()                   can engage
//!           ├─ Flank                        flanking profiles only
//!           └─ Hold
//! ```

use behavior_tree::Behavior;
use behavior_tree::builder::{always_succeed, condition, selector, sequence};

use super::context::Situation;
use super::nodes::*;
use super::profile::CombatAiProfile;

pub type DecisionTree = Box<dyn Behavior<Situation>>;

/// Builds the full decision tree for `profile`.
pub fn profile_tree(profile: CombatAiProfile) -> DecisionTree {
    let mut steps = Vec::with_capacity(2);
    if let Some(hook) = profile_hook(profile) {
        steps.push(always_succeed(hook));
    }
    steps.push(engagement(profile.flanks()));
    sequence(steps)
}

/// Side behavior that runs before the main choice and never blocks it.
pub fn profile_hook(profile: CombatAiProfile) -> Option<DecisionTree> {
    match profile {
        CombatAiProfile::Captain => Some(Box::new(RallyAllies)),
        CombatAiProfile::Zealot => Some(frenzied_charge()),
        CombatAiProfile::FirstClassGuard => Some(keep_distance()),
        _ => None,
    }
}

/// Ranged, melee, approach, then flank or hold.
pub fn engagement(flanks: bool) -> DecisionTree {
    let mut branches = vec![ranged_volley(), melee_engagement(), approach()];
    if flanks {
        branches.push(Box::new(Flank));
    }
    branches.push(Box::new(Hold));
    selector(branches)
}

pub fn ranged_volley() -> DecisionTree {
    sequence(vec![
        Box::new(InRangedBand),
        Box::new(RollChance(Chance::RangedAttack)),
        condition(|ctx: &Situation| ctx.has_ranged_weapon),
        Box::new(RangedAttack),
    ])
}

pub fn melee_engagement() -> DecisionTree {
    sequence(vec![
        Box::new(InMeleeRange),
        Box::new(CanEngage),
        selector(vec![environmental_kill(), Box::new(MeleeAttack)]),
    ])
}

/// Once the roll succeeds the decision is spent on the hazard, found or not.
pub fn environmental_kill() -> DecisionTree {
    sequence(vec![
        Box::new(RollChance(Chance::EnvironmentalUse)),
        always_succeed(Box::new(TriggerHazard)),
    ])
}

pub fn approach() -> DecisionTree {
    sequence(vec![Box::new(CanEngage), Box::new(Approach)])
}

pub fn frenzied_charge() -> DecisionTree {
    sequence(vec![
        condition(|ctx: &Situation| ctx.frenzied),
        Box::new(TargetBeyond { factor: 2.0 }),
        Box::new(RollChance(Chance::SuicidalCharge)),
        Box::new(Charge),
    ])
}

pub fn keep_distance() -> DecisionTree {
    sequence(vec![Box::new(TargetWithin { factor: 0.5 }), Box::new(Retreat)])
}
