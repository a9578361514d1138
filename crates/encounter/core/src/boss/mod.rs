//! Boss encounter state machine.
//!
//! A [`BossFight`] owns phase progression, special attack cooldowns and
//! wind-ups for one boss. Health, positions and damage resolution belong to
//! the host and are reached through [`Arena`] / [`ArenaMut`].
//!
//! Each [`BossFight::tick`] runs these steps in order, stopping at the first
//! one that consumes the tick:
//!
//! 1. Defeated bosses and missing owners do nothing.
//! 2. A dead owner is forced into `Defeated`.
//! 3. The enrage countdown runs regardless of what else is happening.
//! 4. An open invulnerability window counts down and consumes the tick.
//! 5. A crossed health threshold advances exactly one phase.
//! 6. A pending wind-up counts down and resolves on expiry.
//! 7. Attack cooldowns and the special-attack interval recover.

mod attack;
mod cadence;
mod events;
mod phase;
mod template;

pub use attack::{BossAttack, BossAttackType, select_best};
pub use cadence::AttackCadence;
pub use events::BossEvent;
pub use phase::{BossPhase, BossPhaseConfig, PhaseSet, PhaseTable};
pub use template::{BossFightSettings, BossTemplate, TemplateError};

use crate::combat::{AttackDirection, IncomingAttack};
use crate::config::EncounterConfig;
use crate::env::{Arena, ArenaMut, CombatantId};
use crate::error::{EncounterError, ErrorSeverity};
use crate::events::{Observers, SubscriptionId};

/// A special attack that has been selected and is being telegraphed.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackWindUp {
    /// Index into [`BossFight::attacks`].
    pub index: usize,
    pub attack: String,
    pub target: CombatantId,
    pub duration: f32,
}

#[derive(Clone, Copy, Debug)]
struct PendingAttack {
    index: usize,
    target: CombatantId,
    remaining: f32,
}

/// Reasons a special attack request was refused. State is left untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpecialAttackError {
    #[error("boss is defeated")]
    Defeated,

    #[error("boss is not present in the arena")]
    OwnerMissing,

    #[error("target {0} is missing or dead")]
    TargetUnavailable(CombatantId),

    #[error("boss is already winding up an attack")]
    WindingUp,

    #[error("boss is transitioning between phases")]
    InTransition,

    #[error("special attacks recover in {remaining:.2}s")]
    SpecialOnCooldown { remaining: f32 },

    #[error("no special attack is ready for this phase and range")]
    NoAttackAvailable,
}

impl EncounterError for SpecialAttackError {
    fn severity(&self) -> ErrorSeverity {
        use SpecialAttackError::*;
        match self {
            Defeated => ErrorSeverity::Terminal,
            OwnerMissing | TargetUnavailable(_) => ErrorSeverity::Validation,
            WindingUp | InTransition | SpecialOnCooldown { .. } | NoAttackAvailable => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use SpecialAttackError::*;
        match self {
            Defeated => "SPECIAL_BOSS_DEFEATED",
            OwnerMissing => "SPECIAL_OWNER_MISSING",
            TargetUnavailable(_) => "SPECIAL_TARGET_UNAVAILABLE",
            WindingUp => "SPECIAL_WINDING_UP",
            InTransition => "SPECIAL_IN_TRANSITION",
            SpecialOnCooldown { .. } => "SPECIAL_ON_COOLDOWN",
            NoAttackAvailable => "SPECIAL_NO_ATTACK_AVAILABLE",
        }
    }
}

/// Live state of one boss encounter.
#[derive(Debug)]
pub struct BossFight {
    owner: CombatantId,
    name: String,
    settings: BossFightSettings,
    phases: PhaseTable,
    attacks: Vec<BossAttack>,
    score_floor: f32,

    phase: BossPhase,
    invulnerable_remaining: Option<f32>,
    pending: Option<PendingAttack>,
    special_timer: f32,
    enrage_remaining: f32,
    enrage_fired: bool,
    adds_alive: u32,

    observers: Observers<BossEvent>,
}

impl BossFight {
    /// Use [`BossTemplate::build`]; it validates the parts first.
    pub(crate) fn new(
        owner: CombatantId,
        name: String,
        settings: BossFightSettings,
        phases: PhaseTable,
        attacks: Vec<BossAttack>,
        config: &EncounterConfig,
    ) -> Self {
        let enrage_remaining = settings.enrage_timer;
        Self {
            owner,
            name,
            settings,
            phases,
            attacks,
            score_floor: config.attack_score_floor,
            phase: BossPhase::Phase1,
            invulnerable_remaining: None,
            pending: None,
            special_timer: 0.0,
            enrage_remaining,
            enrage_fired: false,
            adds_alive: 0,
            observers: Observers::new(),
        }
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&BossEvent) + Send + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn owner(&self) -> CombatantId {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &BossFightSettings {
        &self.settings
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn attacks(&self) -> &[BossAttack] {
        &self.attacks
    }

    /// Owner health as a clamped fraction; `0` when the owner is gone.
    pub fn health_percent(&self, arena: &impl Arena) -> f32 {
        arena
            .vitals(self.owner)
            .map_or(0.0, |vitals| vitals.health_percent())
    }

    pub fn is_winding_up(&self) -> bool {
        self.pending.is_some()
    }

    /// The attack currently being telegraphed, with its remaining time.
    pub fn wind_up(&self) -> Option<AttackWindUp> {
        self.pending.map(|pending| AttackWindUp {
            index: pending.index,
            attack: self.attacks[pending.index].name.clone(),
            target: pending.target,
            duration: pending.remaining,
        })
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_remaining.is_some()
    }

    pub fn is_enraged(&self) -> bool {
        self.phase == BossPhase::Enraged
    }

    pub fn is_defeated(&self) -> bool {
        self.phase == BossPhase::Defeated
    }

    /// Outgoing damage multiplier: phase modifier times enrage bonus.
    pub fn damage_multiplier(&self) -> f32 {
        let phase = self
            .phases
            .get(self.phase)
            .map_or(1.0, |config| config.damage_multiplier);
        if self.is_enraged() {
            phase * self.settings.enrage_damage_multiplier
        } else {
            phase
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.phases
            .get(self.phase)
            .map_or(1.0, |config| config.speed_multiplier)
    }

    /// Seconds until enrage, or `None` once it fired or when disabled.
    pub fn enrage_remaining(&self) -> Option<f32> {
        if self.settings.enrage_timer > 0.0 && !self.enrage_fired {
            Some(self.enrage_remaining)
        } else {
            None
        }
    }

    /// Seconds until another special attack may be started.
    pub fn special_cooldown_remaining(&self) -> f32 {
        self.special_timer
    }

    pub fn adds_alive(&self) -> u32 {
        self.adds_alive
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Selects the best special attack against `target` and starts its wind-up.
    pub fn try_special_attack(
        &mut self,
        target: CombatantId,
        arena: &impl Arena,
    ) -> Result<AttackWindUp, SpecialAttackError> {
        if self.is_defeated() {
            return Err(SpecialAttackError::Defeated);
        }
        if self.pending.is_some() {
            return Err(SpecialAttackError::WindingUp);
        }
        if self.is_invulnerable() {
            return Err(SpecialAttackError::InTransition);
        }
        if self.special_timer > 0.0 {
            return Err(SpecialAttackError::SpecialOnCooldown {
                remaining: self.special_timer,
            });
        }

        let origin = arena
            .location(self.owner)
            .ok_or(SpecialAttackError::OwnerMissing)?;
        if !arena.vitals(target).is_some_and(|v| v.is_alive()) {
            return Err(SpecialAttackError::TargetUnavailable(target));
        }
        let distance = arena
            .location(target)
            .map(|at| origin.distance(at))
            .ok_or(SpecialAttackError::TargetUnavailable(target))?;

        let index = select_best(&self.attacks, self.phase, distance, self.score_floor)
            .ok_or(SpecialAttackError::NoAttackAvailable)?;
        let attack = &self.attacks[index];

        self.pending = Some(PendingAttack {
            index,
            target,
            remaining: attack.wind_up,
        });
        let wind_up = AttackWindUp {
            index,
            attack: attack.name.clone(),
            target,
            duration: attack.wind_up,
        };

        tracing::debug!(
            "Boss {} winding up {} against {} ({:.0} away, {:.2}s)",
            self.name,
            wind_up.attack,
            target,
            distance,
            wind_up.duration
        );
        self.observers.emit(&BossEvent::WindUpStarted {
            attack: wind_up.attack.clone(),
            target,
            duration: wind_up.duration,
        });
        Ok(wind_up)
    }

    /// Drops the pending wind-up without resolving it.
    /// Returns `false` if nothing was winding up.
    pub fn cancel_wind_up(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let attack = self.attacks[pending.index].name.clone();
        tracing::debug!("Boss {} wind-up of {} cancelled", self.name, attack);
        self.observers.emit(&BossEvent::WindUpCancelled { attack });
        true
    }

    /// Applies the opening phase's resistance. Call once when the fight starts.
    pub fn engage(&mut self, arena: &mut impl ArenaMut) {
        if let Some(config) = self.phases.get(self.phase) {
            arena.set_damage_resistance(self.owner, 1.0 - config.damage_resistance);
        }
        tracing::info!("Boss {} engaged in {}", self.name, self.phase);
    }

    /// Host callback when one of this boss's adds dies.
    pub fn notify_add_defeated(&mut self) {
        self.adds_alive = self.adds_alive.saturating_sub(1);
    }

    pub fn tick(&mut self, dt: f32, arena: &mut impl ArenaMut) {
        if self.is_defeated() {
            return;
        }
        let Some(vitals) = arena.vitals(self.owner) else {
            return;
        };
        if !vitals.is_alive() {
            self.transition_to(BossPhase::Defeated, arena);
            return;
        }

        if self.tick_enrage(dt, arena) {
            return;
        }

        if let Some(remaining) = self.invulnerable_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.invulnerable_remaining = None;
                self.observers
                    .emit(&BossEvent::InvulnerabilityEnded { phase: self.phase });
            }
            return;
        }

        if let Some(next) = self.phases.next_step(self.phase, vitals.health_percent()) {
            self.transition_to(next, arena);
            return;
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                let pending = *pending;
                self.pending = None;
                self.resolve(pending, arena);
            }
            return;
        }

        for attack in &mut self.attacks {
            attack.tick_cooldown(dt);
        }
        self.special_timer = (self.special_timer - dt).max(0.0);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Returns `true` if enrage fired this tick.
    fn tick_enrage(&mut self, dt: f32, arena: &mut impl ArenaMut) -> bool {
        if self.enrage_fired || self.settings.enrage_timer <= 0.0 {
            return false;
        }
        self.enrage_remaining -= dt;
        if self.enrage_remaining > 0.0 {
            return false;
        }
        self.enrage_remaining = 0.0;
        self.enrage_fired = true;
        self.transition_to(BossPhase::Enraged, arena);
        true
    }

    fn transition_to(&mut self, next: BossPhase, arena: &mut impl ArenaMut) {
        if next == self.phase {
            return;
        }
        let from = self.phase;
        self.phase = next;

        let config = self.phases.get(next).cloned();
        if let Some(config) = &config {
            arena.set_damage_resistance(self.owner, 1.0 - config.damage_resistance);
        }

        if next == BossPhase::Defeated {
            self.invulnerable_remaining = None;
            self.cancel_wind_up();
        } else if self.settings.invulnerable_during_transition
            && self.settings.transition_duration > 0.0
        {
            self.invulnerable_remaining = Some(self.settings.transition_duration);
        }

        tracing::info!("Boss {} phase {} -> {}", self.name, from, next);
        self.observers.emit(&BossEvent::PhaseChanged { from, to: next });

        match next {
            BossPhase::Enraged => {
                self.enrage_fired = true;
                self.observers.emit(&BossEvent::Enraged);
            }
            BossPhase::Defeated => self.observers.emit(&BossEvent::Defeated),
            _ => {}
        }

        if let Some(config) = config
            && config.adds > 0
        {
            self.summon(config.adds, arena);
        }
    }

    /// Requests up to `requested` adds, capped by the free add slots.
    fn summon(&mut self, requested: u32, arena: &mut impl ArenaMut) -> u32 {
        let room = self.settings.max_adds.saturating_sub(self.adds_alive);
        let count = requested.min(room);
        if count == 0 {
            tracing::debug!("Boss {} has no room for more adds", self.name);
            return 0;
        }
        let spawned = arena.summon_adds(self.owner, count).min(count);
        self.adds_alive += spawned;
        self.observers.emit(&BossEvent::AddsSummoned {
            requested: count,
            spawned,
        });
        spawned
    }

    fn resolve(&mut self, pending: PendingAttack, arena: &mut impl ArenaMut) {
        let target_alive = arena.vitals(pending.target).is_some_and(|v| v.is_alive());
        let distance = arena.distance_between(self.owner, pending.target);
        let Some(distance) = distance.filter(|_| target_alive) else {
            let attack = self.attacks[pending.index].name.clone();
            tracing::debug!(
                "Boss {} lost target {} during {}",
                self.name,
                pending.target,
                attack
            );
            self.observers.emit(&BossEvent::WindUpCancelled { attack });
            return;
        };

        self.attacks[pending.index].start_cooldown();
        self.special_timer = self.settings.special_attack_interval;

        let attack = self.attacks[pending.index].clone();
        let (damage, hit) = if attack.is_summon() {
            let spawned = self.summon(self.settings.summon_count, arena);
            (0.0, spawned > 0)
        } else {
            let damage = attack.damage * self.damage_multiplier();
            let hit = attack.reaches(distance);
            if hit {
                arena.apply_attack(
                    pending.target,
                    IncomingAttack {
                        source: self.owner,
                        damage,
                        direction: AttackDirection::Mid,
                        blockable: attack.blockable,
                        dodgeable: attack.dodgeable,
                    },
                );
            }
            (damage, hit)
        };

        tracing::info!(
            "Boss {} executed {} on {} for {:.1} ({})",
            self.name,
            attack.name,
            pending.target,
            damage,
            if hit { "hit" } else { "missed" }
        );
        self.observers.emit(&BossEvent::AttackExecuted {
            attack: attack.name,
            target: pending.target,
            damage,
            hit,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{HazardSighting, Location, Vitals};
    use std::sync::{Arc, Mutex};

    const BOSS: CombatantId = CombatantId(1);
    const PLAYER: CombatantId = CombatantId(2);

    struct Duel {
        boss: Vitals,
        player: Option<Vitals>,
        player_at: Location,
        hits: Vec<IncomingAttack>,
        resistance: Vec<f32>,
        spawn_limit: u32,
    }

    impl Duel {
        fn new(player_distance: f32) -> Self {
            Self {
                boss: Vitals::new(500.0, 500.0),
                player: Some(Vitals::new(100.0, 100.0)),
                player_at: Location::new(player_distance, 0.0, 0.0),
                hits: Vec::new(),
                resistance: Vec::new(),
                spawn_limit: u32::MAX,
            }
        }
    }

    impl Arena for Duel {
        fn location(&self, id: CombatantId) -> Option<Location> {
            match id {
                BOSS => Some(Location::ORIGIN),
                PLAYER => self.player.map(|_| self.player_at),
                _ => None,
            }
        }

        fn vitals(&self, id: CombatantId) -> Option<Vitals> {
            match id {
                BOSS => Some(self.boss),
                PLAYER => self.player,
                _ => None,
            }
        }

        fn right_vector(&self, _: CombatantId) -> Option<Location> {
            Some(Location::new(0.0, 1.0, 0.0))
        }

        fn find_target(&self, _: CombatantId) -> Option<CombatantId> {
            self.player.map(|_| PLAYER)
        }

        fn engaging_count(&self, _: CombatantId, _: CombatantId, _: f32) -> u32 {
            0
        }

        fn nearest_hazard(&self, _: Location, _: f32) -> Option<HazardSighting> {
            None
        }

        fn has_ranged_weapon(&self, _: CombatantId) -> bool {
            false
        }
    }

    impl ArenaMut for Duel {
        fn apply_attack(&mut self, _: CombatantId, attack: IncomingAttack) {
            self.hits.push(attack);
        }

        fn set_damage_resistance(&mut self, _: CombatantId, multiplier: f32) {
            self.resistance.push(multiplier);
        }

        fn summon_adds(&mut self, _: CombatantId, count: u32) -> u32 {
            count.min(self.spawn_limit)
        }
    }

    fn warden() -> BossTemplate {
        BossTemplate::new("Tail Warden", 500.0)
            .with_phase(BossPhaseConfig::new(BossPhase::Phase1, 1.0).with_resistance(0.1))
            .with_phase(
                BossPhaseConfig::new(BossPhase::Phase2, 0.6)
                    .with_multipliers(1.5, 1.1)
                    .with_resistance(0.25),
            )
            .with_phase(BossPhaseConfig::new(BossPhase::Phase3, 0.3).with_multipliers(2.0, 1.3))
            .with_attack(
                BossAttack::new("GroundSlam", BossAttackType::AreaSlam)
                    .with_damage(40.0, 400.0)
                    .with_timing(10.0, 1.0)
                    .with_defense(false, true),
            )
            .with_attack(
                BossAttack::new("SummonScrappers", BossAttackType::SummonMinions)
                    .with_timing(30.0, 0.5)
                    .with_defense(false, false)
                    .with_phases(PhaseSet::FINAL),
            )
    }

    fn fight(template: &BossTemplate) -> (BossFight, Arc<Mutex<Vec<BossEvent>>>) {
        let mut fight = template.build(BOSS, &EncounterConfig::default()).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        fight.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (fight, events)
    }

    fn count(events: &Mutex<Vec<BossEvent>>, pred: impl Fn(&BossEvent) -> bool) -> usize {
        events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn large_drop_steps_through_every_phase() {
        let (mut fight, events) = fight(&warden());
        let mut arena = Duel::new(100.0);
        arena.boss.health = 50.0;

        fight.tick(0.5, &mut arena);
        assert_eq!(fight.phase(), BossPhase::Phase2);
        assert!(fight.is_invulnerable());

        // Window lasts two seconds and swallows every tick.
        for _ in 0..4 {
            fight.tick(0.5, &mut arena);
        }
        assert_eq!(fight.phase(), BossPhase::Phase2);
        assert!(!fight.is_invulnerable());

        fight.tick(0.5, &mut arena);
        assert_eq!(fight.phase(), BossPhase::Phase3);

        let changes: Vec<_> = events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                BossEvent::PhaseChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            changes,
            vec![
                (BossPhase::Phase1, BossPhase::Phase2),
                (BossPhase::Phase2, BossPhase::Phase3)
            ]
        );
    }

    #[test]
    fn transition_sets_phase_resistance() {
        let (mut fight, _) = fight(&warden());
        let mut arena = Duel::new(100.0);
        arena.boss.health = 250.0;
        fight.tick(0.5, &mut arena);
        assert_eq!(arena.resistance, vec![0.75]);

        arena.boss.health = 100.0;
        for _ in 0..6 {
            fight.tick(0.5, &mut arena);
        }
        assert_eq!(fight.phase(), BossPhase::Phase3);
        // A phase without resistance strips the earlier armour.
        assert_eq!(arena.resistance, vec![0.75, 1.0]);
    }

    #[test]
    fn engage_applies_opening_resistance() {
        let (mut fight, _) = fight(&warden());
        let mut arena = Duel::new(100.0);
        fight.engage(&mut arena);
        assert_eq!(arena.resistance, vec![0.9]);
        assert_eq!(fight.phase(), BossPhase::Phase1);
    }

    #[test]
    fn wind_up_executes_exactly_once() {
        let (mut fight, events) = fight(&warden());
        let mut arena = Duel::new(200.0);

        let wind_up = fight.try_special_attack(PLAYER, &arena).unwrap();
        assert_eq!(wind_up.attack, "GroundSlam");
        assert_eq!(
            fight.try_special_attack(PLAYER, &arena),
            Err(SpecialAttackError::WindingUp)
        );

        fight.tick(0.5, &mut arena);
        assert!(arena.hits.is_empty());
        fight.tick(0.5, &mut arena);
        assert_eq!(arena.hits.len(), 1);
        assert_eq!(arena.hits[0].damage, 40.0);
        assert!(!arena.hits[0].blockable);

        for _ in 0..4 {
            fight.tick(0.5, &mut arena);
        }
        assert_eq!(arena.hits.len(), 1);
        assert_eq!(
            count(&events, |e| matches!(e, BossEvent::AttackExecuted { .. })),
            1
        );
        assert!(!fight.attacks()[0].is_ready());
        assert!(matches!(
            fight.try_special_attack(PLAYER, &arena),
            Err(SpecialAttackError::SpecialOnCooldown { .. })
        ));
    }

    #[test]
    fn target_out_of_reach_at_expiry_is_a_miss() {
        let (mut fight, events) = fight(&warden());
        let mut arena = Duel::new(200.0);
        fight.try_special_attack(PLAYER, &arena).unwrap();

        arena.player_at = Location::new(900.0, 0.0, 0.0);
        fight.tick(1.0, &mut arena);

        assert!(arena.hits.is_empty());
        assert!(!fight.attacks()[0].is_ready());
        assert_eq!(
            count(&events, |e| matches!(e, BossEvent::AttackExecuted { hit: false, .. })),
            1
        );
    }

    #[test]
    fn vanished_target_cancels_without_damage_or_cooldown() {
        let (mut fight, events) = fight(&warden());
        let mut arena = Duel::new(200.0);
        fight.try_special_attack(PLAYER, &arena).unwrap();

        arena.player = None;
        fight.tick(1.0, &mut arena);

        assert!(arena.hits.is_empty());
        assert!(fight.attacks()[0].is_ready());
        assert_eq!(fight.special_cooldown_remaining(), 0.0);
        assert_eq!(
            count(&events, |e| matches!(e, BossEvent::WindUpCancelled { .. })),
            1
        );
    }

    #[test]
    fn enrage_fires_once_and_doubles_damage() {
        let mut template = warden();
        template.settings.enrage_timer = 2.0;
        template.settings.invulnerable_during_transition = false;
        let (mut fight, events) = fight(&template);
        let mut arena = Duel::new(200.0);

        for _ in 0..20 {
            fight.tick(0.5, &mut arena);
        }
        assert!(fight.is_enraged());
        assert_eq!(fight.enrage_remaining(), None);
        assert_eq!(count(&events, |e| matches!(e, BossEvent::Enraged)), 1);

        // Health thresholds no longer move an enraged boss.
        arena.boss.health = 10.0;
        fight.tick(0.5, &mut arena);
        assert!(fight.is_enraged());

        fight.try_special_attack(PLAYER, &arena).unwrap();
        fight.tick(1.0, &mut arena);
        assert_eq!(arena.hits[0].damage, 80.0);
    }

    #[test]
    fn death_forces_defeat_and_drops_wind_up() {
        let (mut fight, events) = fight(&warden());
        let mut arena = Duel::new(200.0);
        fight.try_special_attack(PLAYER, &arena).unwrap();

        arena.boss.health = 0.0;
        fight.tick(0.5, &mut arena);
        assert!(fight.is_defeated());
        assert!(!fight.is_winding_up());
        assert!(!fight.is_invulnerable());

        fight.tick(5.0, &mut arena);
        assert!(arena.hits.is_empty());
        assert_eq!(count(&events, |e| matches!(e, BossEvent::Defeated)), 1);
        let err = fight.try_special_attack(PLAYER, &arena).unwrap_err();
        assert_eq!(err, SpecialAttackError::Defeated);
        assert_eq!(err.severity(), ErrorSeverity::Terminal);
    }

    #[test]
    fn invulnerability_freezes_pending_wind_up() {
        let (mut fight, _) = fight(&warden());
        let mut arena = Duel::new(200.0);
        fight.try_special_attack(PLAYER, &arena).unwrap();

        arena.boss.health = 250.0;
        fight.tick(0.5, &mut arena);
        assert_eq!(fight.phase(), BossPhase::Phase2);
        for _ in 0..4 {
            fight.tick(0.5, &mut arena);
        }
        assert!(arena.hits.is_empty());
        assert!(fight.is_winding_up());

        fight.tick(1.0, &mut arena);
        assert_eq!(arena.hits.len(), 1);
        assert_eq!(arena.hits[0].damage, 60.0);
    }

    #[test]
    fn summon_attack_respects_add_cap() {
        let mut template = warden();
        template.settings.max_adds = 3;
        template.settings.summon_count = 2;
        template.settings.special_attack_interval = 0.0;
        template.settings.invulnerable_during_transition = false;
        template.attacks.truncate(1);
        template.attacks[0].phases = PhaseSet::PHASE1 | PhaseSet::PHASE2;
        template = template.with_attack(
            BossAttack::new("SummonScrappers", BossAttackType::SummonMinions)
                .with_damage(0.0, 2500.0)
                .with_timing(0.0, 0.5)
                .with_phases(PhaseSet::FINAL),
        );
        let (mut fight, _) = fight(&template);
        let mut arena = Duel::new(2000.0);
        arena.boss.health = 100.0;
        fight.tick(0.5, &mut arena);
        fight.tick(0.5, &mut arena);
        assert_eq!(fight.phase(), BossPhase::Phase3);

        fight.try_special_attack(PLAYER, &arena).unwrap();
        fight.tick(0.5, &mut arena);
        assert_eq!(fight.adds_alive(), 2);

        fight.tick(0.5, &mut arena);
        fight.try_special_attack(PLAYER, &arena).unwrap();
        fight.tick(0.5, &mut arena);
        assert_eq!(fight.adds_alive(), 3);

        fight.notify_add_defeated();
        assert_eq!(fight.adds_alive(), 2);
    }

    #[test]
    fn phase_entry_summons_configured_adds() {
        let mut template = warden();
        template.phases[1].adds = 3;
        let (mut fight, events) = fight(&template);
        let mut arena = Duel::new(200.0);
        arena.spawn_limit = 2;
        arena.boss.health = 250.0;

        fight.tick(0.5, &mut arena);
        assert_eq!(fight.adds_alive(), 2);
        assert_eq!(
            count(&events, |e| matches!(
                e,
                BossEvent::AddsSummoned {
                    requested: 3,
                    spawned: 2
                }
            )),
            1
        );
    }

    #[test]
    fn rejects_attacks_while_transitioning_or_without_target() {
        let (mut fight, _) = fight(&warden());
        let mut arena = Duel::new(200.0);
        arena.player = None;
        assert_eq!(
            fight.try_special_attack(PLAYER, &arena),
            Err(SpecialAttackError::TargetUnavailable(PLAYER))
        );

        arena.player = Some(Vitals::new(100.0, 100.0));
        arena.boss.health = 250.0;
        fight.tick(0.5, &mut arena);
        let err = fight.try_special_attack(PLAYER, &arena).unwrap_err();
        assert_eq!(err, SpecialAttackError::InTransition);
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn out_of_range_everything_is_no_attack() {
        let (mut fight, _) = fight(&warden());
        let arena = Duel::new(1000.0);
        assert_eq!(
            fight.try_special_attack(PLAYER, &arena),
            Err(SpecialAttackError::NoAttackAvailable)
        );
        assert!(!fight.is_winding_up());
    }
}
