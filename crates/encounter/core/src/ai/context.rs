//! Blackboard handed to a decision tree.
//!
//! Everything a tree needs is measured once, before the tree runs, so nodes
//! never reach back into the arena. Nodes read the measurements and append
//! [`Directive`]s; the dice are the only other thing they change.

use crate::config::EncounterConfig;
use crate::env::{CombatantId, Dice, HazardSighting, Location};

use super::directive::{Directive, Directives};
use super::profile::{CombatAiProfile, ProfileTuning};

#[derive(Clone, Debug)]
pub struct Situation {
    pub me: CombatantId,
    pub profile: CombatAiProfile,
    pub tuning: ProfileTuning,
    pub config: EncounterConfig,

    pub target: CombatantId,
    pub my_location: Location,
    pub target_location: Location,
    /// Unit vector to my right.
    pub right: Location,
    pub distance: f32,

    /// Corridor discipline verdict, after profile overrides.
    pub can_engage: bool,
    pub frenzied: bool,
    pub has_ranged_weapon: bool,
    /// Nearest triggerable hazard around the target.
    pub hazard: Option<HazardSighting>,

    pub dice: Dice,
    pub directives: Directives,
}

impl Situation {
    /// Appends a directive; returns `false` if the decision is already full.
    pub fn issue(&mut self, directive: Directive) -> bool {
        match self.directives.try_push(directive) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    "AI {} dropped {:?}: decision already holds {} directives",
                    self.me,
                    directive,
                    self.directives.len()
                );
                false
            }
        }
    }

    pub fn in_melee_range(&self) -> bool {
        self.distance <= self.tuning.preferred_combat_range
    }

    /// Beyond melee reach but within ranged reach.
    pub fn in_ranged_band(&self) -> bool {
        self.distance > self.tuning.preferred_combat_range
            && self.distance <= self.tuning.preferred_ranged_range
    }

    /// Unit vector from me toward the target.
    pub fn toward_target(&self) -> Location {
        self.target_location.sub(self.my_location).normalized()
    }
}
