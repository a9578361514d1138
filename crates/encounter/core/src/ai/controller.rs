use arrayvec::ArrayVec;

use crate::combat::{AttackDirection, BlockDirection, IncomingAttack};
use crate::config::EncounterConfig;
use crate::env::{Arena, CombatantId, Dice};

use super::context::Situation;
use super::directive::Decision;
use super::profile::{CombatAiProfile, ProfileTuning};
use super::tree::{DecisionTree, profile_tree};

/// Interval-driven decision loop for one AI-controlled combatant.
///
/// The controller decides; the host acts. Each decision comes back as a
/// [`Decision`] whose directives the host applies to its own body.
pub struct CombatAiController {
    id: CombatantId,
    profile: CombatAiProfile,
    tuning: ProfileTuning,
    config: EncounterConfig,
    tree: DecisionTree,
    dice: Dice,
    decision_timer: f32,
    frenzied: bool,
    target: Option<CombatantId>,
}

impl CombatAiController {
    pub fn new(
        id: CombatantId,
        profile: CombatAiProfile,
        tuning: ProfileTuning,
        config: EncounterConfig,
        seed: u64,
    ) -> Self {
        Self {
            id,
            profile,
            tuning,
            config,
            tree: profile_tree(profile),
            dice: Dice::new(seed),
            decision_timer: 0.0,
            frenzied: false,
            target: None,
        }
    }

    /// Controller with the built-in tuning for `profile`.
    pub fn with_profile(id: CombatantId, profile: CombatAiProfile, seed: u64) -> Self {
        Self::new(
            id,
            profile,
            ProfileTuning::for_profile(profile),
            EncounterConfig::default(),
            seed,
        )
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn profile(&self) -> CombatAiProfile {
        self.profile
    }

    pub fn tuning(&self) -> &ProfileTuning {
        &self.tuning
    }

    pub fn is_frenzied(&self) -> bool {
        self.frenzied
    }

    /// Target chosen by the most recent decision.
    pub fn target(&self) -> Option<CombatantId> {
        self.target
    }

    /// Seconds until the next decision.
    pub fn decision_timer(&self) -> f32 {
        self.decision_timer
    }

    /// Swaps temperament. Tuning is replaced wholesale, so a frenzy or a
    /// rallied attacker cap does not carry over.
    pub fn set_profile(&mut self, profile: CombatAiProfile, tuning: ProfileTuning) {
        tracing::debug!("AI {} profile {} -> {}", self.id, self.profile, profile);
        self.profile = profile;
        self.tuning = tuning;
        self.tree = profile_tree(profile);
        self.frenzied = false;
    }

    /// Answers a captain's rally. Only rally-responsive profiles listen, and
    /// the cap only ever grows. Returns whether it changed.
    pub fn raise_attacker_cap(&mut self, cap: u32) -> bool {
        if !self.profile.answers_rally() || cap <= self.tuning.max_simultaneous_attackers {
            return false;
        }
        self.tuning.max_simultaneous_attackers = cap;
        true
    }

    /// Advances the decision timer and decides when it runs out.
    ///
    /// Returns `None` between decisions, while unable to act (dead,
    /// staggered, grappled, despawned) and when there is nobody to fight.
    pub fn tick(&mut self, dt: f32, arena: &impl Arena) -> Option<Decision> {
        let vitals = arena.vitals(self.id)?;
        if !vitals.can_act() {
            return None;
        }

        if self.profile == CombatAiProfile::Zealot
            && !self.frenzied
            && vitals.health_percent() < self.tuning.frenzy_health_threshold
        {
            self.frenzied = true;
            self.tuning.decision_interval *= 0.5;
            tracing::info!("AI {} entered a frenzy", self.id);
        }

        self.decision_timer -= dt;
        if self.decision_timer > 0.0 {
            return None;
        }
        self.decision_timer = self.tuning.decision_interval;
        self.decide(arena)
    }

    fn decide(&mut self, arena: &impl Arena) -> Option<Decision> {
        let target = arena.find_target(self.id)?;
        self.target = Some(target);
        let my_location = arena.location(self.id)?;
        let target_location = arena.location(target)?;
        let distance = my_location.distance(target_location);

        let engagement_radius =
            self.tuning.preferred_combat_range * self.config.engagement_radius_factor;
        let engaging = arena.engaging_count(target, self.id, engagement_radius);
        let can_engage = engaging < self.tuning.max_simultaneous_attackers || self.frenzied;

        let mut situation = Situation {
            me: self.id,
            profile: self.profile,
            tuning: self.tuning,
            config: self.config.clone(),
            target,
            my_location,
            target_location,
            right: arena.right_vector(self.id).unwrap_or_default(),
            distance,
            can_engage,
            frenzied: self.frenzied,
            has_ranged_weapon: arena.has_ranged_weapon(self.id),
            hazard: arena.nearest_hazard(target_location, self.config.hazard_search_radius),
            dice: self.dice.clone(),
            directives: ArrayVec::new(),
        };
        self.tree.tick(&mut situation);
        self.dice = situation.dice;

        tracing::debug!(
            "AI {} ({}) vs {} at {:.0}: engaging={} can_engage={} -> {:?}",
            self.id,
            self.profile,
            target,
            distance,
            engaging,
            can_engage,
            situation.directives
        );
        Some(Decision {
            target,
            distance,
            directives: situation.directives,
        })
    }

    /// Rolls whether to raise a guard against `attack`, and where.
    pub fn consider_block(&mut self, attack: &IncomingAttack) -> Option<BlockDirection> {
        if !attack.blockable {
            return None;
        }
        let chance = self.tuning.block_chance * self.profile.block_bonus();
        if !self.dice.chance(chance) {
            return None;
        }
        Some(self.profile.guard_table().draw(self.dice.roll_unit()))
    }

    pub fn consider_dodge(&mut self, attack: &IncomingAttack) -> bool {
        attack.dodgeable && self.dice.chance(self.tuning.dodge_chance)
    }

    /// Rolls for a riposte after a successful block.
    pub fn consider_counter_attack(&mut self) -> Option<AttackDirection> {
        if !self.dice.chance(self.tuning.counter_attack_chance) {
            return None;
        }
        Some(
            self.profile
                .swing_table(self.frenzied)
                .draw(self.dice.roll_unit()),
        )
    }
}

impl core::fmt::Debug for CombatAiController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatAiController")
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("frenzied", &self.frenzied)
            .field("decision_timer", &self.decision_timer)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
