//! Action nodes for combat decision trees.
//!
//! Each node appends one [`Directive`] to the situation and succeeds, or
//! fails without touching it.

use behavior_tree::{Behavior, Status};

use crate::ai::{Directive, Situation};

/// Swings at the target in a direction drawn from the profile's table.
pub struct MeleeAttack;

impl Behavior<Situation> for MeleeAttack {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let roll = ctx.dice.roll_unit();
        let direction = ctx.profile.swing_table(ctx.frenzied).draw(roll);
        Status::from_bool(ctx.issue(Directive::MeleeAttack {
            target: ctx.target,
            direction,
        }))
    }
}

pub struct RangedAttack;

impl Behavior<Situation> for RangedAttack {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let aim = ctx.toward_target();
        Status::from_bool(ctx.issue(Directive::RangedAttack {
            target: ctx.target,
            aim,
        }))
    }
}

/// Sets off the hazard near the target, if the target stands in its zone.
pub struct TriggerHazard;

impl Behavior<Situation> for TriggerHazard {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let Some(sighting) = ctx.hazard.filter(|s| s.covers_target) else {
            tracing::debug!("AI {} found no hazard covering {}", ctx.me, ctx.target);
            return Status::Failure;
        };
        Status::from_bool(ctx.issue(Directive::TriggerHazard {
            hazard: sighting.hazard,
            target: ctx.target,
        }))
    }
}

pub struct Approach;

impl Behavior<Situation> for Approach {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let acceptance_radius =
            ctx.tuning.preferred_combat_range * ctx.config.approach_acceptance_factor;
        Status::from_bool(ctx.issue(Directive::Approach {
            target: ctx.target,
            acceptance_radius,
        }))
    }
}

/// Moves beside the target, offset along my right vector.
pub struct Flank;

impl Behavior<Situation> for Flank {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let destination = ctx
            .target_location
            .add(ctx.right.scale(ctx.config.flank_offset));
        Status::from_bool(ctx.issue(Directive::Flank { destination }))
    }
}

pub struct Hold;

impl Behavior<Situation> for Hold {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.issue(Directive::Hold))
    }
}

/// Steps straight away from the target.
pub struct Retreat;

impl Behavior<Situation> for Retreat {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let away = ctx.toward_target().scale(-ctx.config.retreat_distance);
        let destination = ctx.my_location.add(away);
        Status::from_bool(ctx.issue(Directive::Retreat { destination }))
    }
}

/// Launches at the target.
pub struct Charge;

impl Behavior<Situation> for Charge {
    fn tick(&self, ctx: &mut Situation) -> Status {
        let direction = ctx.toward_target();
        Status::from_bool(ctx.issue(Directive::Charge {
            direction,
            impulse: ctx.config.charge_impulse,
        }))
    }
}

pub struct RallyAllies;

impl Behavior<Situation> for RallyAllies {
    fn tick(&self, ctx: &mut Situation) -> Status {
        Status::from_bool(ctx.issue(Directive::RallyAllies {
            radius: ctx.tuning.command_radius,
            attacker_cap: ctx.config.rally_attacker_cap,
        }))
    }
}
