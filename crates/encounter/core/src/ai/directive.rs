use arrayvec::ArrayVec;

use crate::combat::AttackDirection;
use crate::config::EncounterConfig;
use crate::env::{CombatantId, HazardId, Location};

/// Something an AI decision asks its body to do. The host carries it out.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directive {
    MeleeAttack {
        target: CombatantId,
        direction: AttackDirection,
    },
    /// Fire along `aim`, a unit vector toward the target.
    RangedAttack {
        target: CombatantId,
        aim: Location,
    },
    TriggerHazard {
        hazard: HazardId,
        target: CombatantId,
    },
    /// Path toward the target and stop within `acceptance_radius`.
    Approach {
        target: CombatantId,
        acceptance_radius: f32,
    },
    Flank {
        destination: Location,
    },
    /// Stop moving and wait for an opening.
    Hold,
    Retreat {
        destination: Location,
    },
    /// Launch along `direction` with `impulse` strength.
    Charge {
        direction: Location,
        impulse: f32,
    },
    /// Raise the attacker cap of rally-responsive allies within `radius`.
    RallyAllies {
        radius: f32,
        attacker_cap: u32,
    },
}

pub type Directives = ArrayVec<Directive, { EncounterConfig::MAX_DIRECTIVES }>;

/// Outcome of one AI decision.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub target: CombatantId,
    pub distance: f32,
    /// In the order the host should apply them. May be empty when the AI
    /// went looking for a hazard and found none.
    pub directives: Directives,
}

impl Decision {
    /// The primary action: the last directive issued.
    pub fn primary(&self) -> Option<&Directive> {
        self.directives.last()
    }

    pub fn contains(&self, pred: impl Fn(&Directive) -> bool) -> bool {
        self.directives.iter().any(pred)
    }
}
