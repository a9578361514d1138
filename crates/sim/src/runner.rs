//! Fixed-step encounter loop.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver};

use encounter_content::ProfileTable;
use encounter_core::{
    AttackCadence, AttackDirection, BossEvent, BossFight, BossPhase, CombatAiController,
    CombatAiProfile, CombatantId, Directive, EncounterConfig, IncomingAttack,
};
use serde::Serialize;

use crate::world::{BOSS, PLAYER, Side, SimWorld, WorldStats};

const PLAYER_SWING_INTERVAL: f32 = 1.0;
/// Share of damage that still lands through a block.
const BLOCK_LEAK: f32 = 0.2;
const ADD_PROFILE: CombatAiProfile = CombatAiProfile::Desperate;

#[derive(Clone, Debug)]
pub struct SimOptions {
    pub seed: u64,
    pub dt: f32,
    pub duration: f32,
    pub player_dps: f32,
    pub player_health: f32,
    /// Squad temperaments, one per member.
    pub squad: Vec<CombatAiProfile>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BossDefeated,
    PlayerDefeated,
    TimeUp,
}

#[derive(Clone, Debug, Serialize)]
pub struct PhaseMark {
    pub at: f32,
    pub phase: BossPhase,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DefenseStats {
    pub blocks: u32,
    pub dodges: u32,
    pub counters: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub boss: String,
    pub outcome: Outcome,
    pub elapsed: f32,
    pub final_phase: BossPhase,
    pub boss_health_percent: f32,
    pub player_health: f32,
    pub phases: Vec<PhaseMark>,
    pub enraged_at: Option<f32>,
    pub attacks_started: u32,
    pub attacks_hit: u32,
    pub attacks_missed: u32,
    pub wind_ups_cancelled: u32,
    pub adds_defeated: u32,
    /// AI directives carried out, by kind.
    pub directives: BTreeMap<&'static str, u32>,
    pub defense: DefenseStats,
    pub world: WorldStats,
}

pub struct Simulation {
    options: SimOptions,
    world: SimWorld,
    fight: BossFight,
    cadence: AttackCadence,
    events: Receiver<BossEvent>,
    squad: BTreeMap<CombatantId, CombatAiController>,
    profiles: ProfileTable,
    config: EncounterConfig,
    elapsed: f32,
    swing_timer: f32,
    summary: Summary,
}

impl Simulation {
    /// Stages the fight. `fight` must be owned by [`BOSS`].
    pub fn new(
        options: SimOptions,
        mut fight: BossFight,
        max_health: f32,
        profiles: ProfileTable,
        config: EncounterConfig,
    ) -> Self {
        let mut world = SimWorld::new(options.player_health, max_health);

        let (sender, events) = mpsc::channel();
        fight.subscribe(move |event| {
            let _ = sender.send(event.clone());
        });
        fight.engage(&mut world);

        let mut squad = BTreeMap::new();
        for (slot, profile) in options.squad.iter().copied().enumerate() {
            let ranged = matches!(
                profile,
                CombatAiProfile::Captain | CombatAiProfile::FirstClassGuard
            );
            let id = world.spawn_squad(slot, ranged);
            let seed = options.seed.wrapping_add(u64::from(id.0));
            squad.insert(id, profiles.controller(id, profile, &config, seed));
        }

        let summary = Summary {
            boss: fight.name().to_string(),
            outcome: Outcome::TimeUp,
            elapsed: 0.0,
            final_phase: fight.phase(),
            boss_health_percent: 1.0,
            player_health: options.player_health,
            phases: vec![PhaseMark {
                at: 0.0,
                phase: fight.phase(),
            }],
            enraged_at: None,
            attacks_started: 0,
            attacks_hit: 0,
            attacks_missed: 0,
            wind_ups_cancelled: 0,
            adds_defeated: 0,
            directives: BTreeMap::new(),
            defense: DefenseStats::default(),
            world: WorldStats::default(),
        };

        Self {
            options,
            world,
            fight,
            cadence: AttackCadence::default(),
            events,
            squad,
            profiles,
            config,
            elapsed: 0.0,
            swing_timer: 0.0,
            summary,
        }
    }

    pub fn run(mut self) -> Summary {
        tracing::info!(
            "Encounter: {} vs player, squad of {}",
            self.fight.name(),
            self.squad.len()
        );
        let dt = self.options.dt;
        while self.elapsed < self.options.duration {
            self.step(dt);
            self.elapsed += dt;
            if let Some(outcome) = self.outcome() {
                self.summary.outcome = outcome;
                break;
            }
        }
        self.finish()
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.fight.is_defeated() {
            Some(Outcome::BossDefeated)
        } else if !self.world.is_alive(PLAYER) {
            Some(Outcome::PlayerDefeated)
        } else {
            None
        }
    }

    fn step(&mut self, dt: f32) {
        self.player_attacks(dt);

        let health = self.fight.health_percent(&self.world);
        if self.cadence.tick(dt, health) {
            match self.fight.try_special_attack(PLAYER, &self.world) {
                Ok(wind_up) => tracing::debug!(
                    "{} telegraphs {} ({:.1}s)",
                    self.fight.name(),
                    wind_up.attack,
                    wind_up.duration
                ),
                Err(e) => tracing::trace!("No special attack: {}", e),
            }
        }
        self.fight.tick(dt, &mut self.world);
        self.drain_events();

        for add in self.world.take_new_adds() {
            let seed = self.options.seed.wrapping_add(u64::from(add.0));
            let ai = self.profiles.controller(add, ADD_PROFILE, &self.config, seed);
            self.squad.insert(add, ai);
        }

        self.run_squad(dt);

        for add in self.world.reap_adds() {
            self.squad.remove(&add);
            self.fight.notify_add_defeated();
            self.summary.adds_defeated += 1;
        }

        self.world.step(dt, self.fight.speed_multiplier());
    }

    /// The player clears adds first, then works on the boss.
    fn player_attacks(&mut self, dt: f32) {
        self.swing_timer -= dt;
        if self.swing_timer > 0.0 || !self.world.is_alive(PLAYER) {
            return;
        }
        self.swing_timer = PLAYER_SWING_INTERVAL;
        let damage = self.options.player_dps * PLAYER_SWING_INTERVAL;

        let Some(add) = self.world.nearest_add() else {
            if !self.fight.is_invulnerable() {
                self.world.deal_damage(BOSS, damage);
            }
            return;
        };

        let swing = IncomingAttack {
            source: PLAYER,
            damage,
            direction: AttackDirection::Mid,
            blockable: true,
            dodgeable: true,
        };
        let Some(ai) = self.squad.get_mut(&add) else {
            self.world.deal_damage(add, damage);
            return;
        };
        if ai.consider_dodge(&swing) {
            self.summary.defense.dodges += 1;
            return;
        }
        if let Some(guard) = ai.consider_block(&swing) {
            self.summary.defense.blocks += 1;
            tracing::trace!("{} blocks {:?}", add, guard);
            self.world.deal_damage(add, damage * BLOCK_LEAK);
            if let Some(direction) = ai.consider_counter_attack() {
                self.summary.defense.counters += 1;
                self.world.apply_directive(
                    add,
                    &Directive::MeleeAttack {
                        target: PLAYER,
                        direction,
                    },
                );
            }
            return;
        }
        self.world.deal_damage(add, damage);
    }

    fn run_squad(&mut self, dt: f32) {
        let ids: Vec<CombatantId> = self.squad.keys().copied().collect();
        for id in ids {
            let Some(ai) = self.squad.get_mut(&id) else {
                continue;
            };
            let Some(decision) = ai.tick(dt, &self.world) else {
                continue;
            };
            for directive in &decision.directives {
                *self.summary.directives.entry(directive_kind(directive)).or_default() += 1;
                if let Directive::RallyAllies {
                    radius,
                    attacker_cap,
                } = *directive
                {
                    self.rally(id, radius, attacker_cap);
                } else {
                    self.world.apply_directive(id, directive);
                }
            }
        }
    }

    fn rally(&mut self, captain: CombatantId, radius: f32, attacker_cap: u32) {
        let Some(center) = self.world.body(captain).map(|b| b.at) else {
            return;
        };
        for ally in self.world.allies_near(Side::Squad, center, radius) {
            if ally == captain {
                continue;
            }
            if let Some(ai) = self.squad.get_mut(&ally)
                && ai.raise_attacker_cap(attacker_cap)
            {
                tracing::debug!("{} rallied {} (cap {})", captain, ally, attacker_cap);
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match &event {
                BossEvent::PhaseChanged { to, .. } => self.summary.phases.push(PhaseMark {
                    at: self.elapsed,
                    phase: *to,
                }),
                BossEvent::WindUpStarted { .. } => self.summary.attacks_started += 1,
                BossEvent::AttackExecuted { hit: true, .. } => self.summary.attacks_hit += 1,
                BossEvent::AttackExecuted { hit: false, .. } => self.summary.attacks_missed += 1,
                BossEvent::WindUpCancelled { .. } => self.summary.wind_ups_cancelled += 1,
                BossEvent::Enraged => self.summary.enraged_at = Some(self.elapsed),
                BossEvent::Defeated
                | BossEvent::AddsSummoned { .. }
                | BossEvent::InvulnerabilityEnded { .. } => {}
            }
            tracing::info!("[{:>6.2}s] {:?}", self.elapsed, event);
        }
    }

    fn finish(mut self) -> Summary {
        self.summary.elapsed = self.elapsed;
        self.summary.final_phase = self.fight.phase();
        self.summary.boss_health_percent = self.fight.health_percent(&self.world);
        self.summary.player_health = self.world.health(PLAYER);
        self.summary.world = self.world.stats.clone();
        self.summary
    }
}

fn directive_kind(directive: &Directive) -> &'static str {
    match directive {
        Directive::MeleeAttack { .. } => "melee_attack",
        Directive::RangedAttack { .. } => "ranged_attack",
        Directive::TriggerHazard { .. } => "trigger_hazard",
        Directive::Approach { .. } => "approach",
        Directive::Flank { .. } => "flank",
        Directive::Hold => "hold",
        Directive::Retreat { .. } => "retreat",
        Directive::Charge { .. } => "charge",
        Directive::RallyAllies { .. } => "rally_allies",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_content::{BossRoster, BossZone};

    fn simulate(zone: BossZone, squad: Vec<CombatAiProfile>, player_dps: f32) -> Summary {
        let config = EncounterConfig::default();
        let template = BossRoster::with_presets()
            .get(zone.as_ref())
            .cloned()
            .unwrap();
        let fight = template.build(BOSS, &config).unwrap();
        let options = SimOptions {
            seed: 7,
            dt: 0.1,
            duration: 400.0,
            player_dps,
            player_health: 100_000.0,
            squad,
        };
        Simulation::new(options, fight, template.max_health, ProfileTable::new(), config).run()
    }

    #[test]
    fn steady_damage_defeats_the_warden() {
        let summary = simulate(BossZone::TailWarden, Vec::new(), 12.0);
        assert_eq!(summary.outcome, Outcome::BossDefeated);
        assert_eq!(summary.final_phase, BossPhase::Defeated);
        let walked: Vec<BossPhase> = summary.phases.iter().map(|m| m.phase).collect();
        assert_eq!(
            walked,
            vec![
                BossPhase::Phase1,
                BossPhase::Phase2,
                BossPhase::Phase3,
                BossPhase::Defeated
            ]
        );
        assert!(summary.attacks_started > 0);
        assert_eq!(summary.boss_health_percent, 0.0);
    }

    #[test]
    fn passive_player_sees_the_boss_enrage() {
        let summary = simulate(BossZone::EngineGuardian, Vec::new(), 0.0);
        assert_eq!(summary.outcome, Outcome::TimeUp);
        assert_eq!(summary.final_phase, BossPhase::Enraged);
        assert!(summary.enraged_at.is_some_and(|t| (t - 180.0).abs() < 0.5));
    }

    #[test]
    fn squad_closes_in_and_fights() {
        let summary = simulate(
            BossZone::ThirdClassOverseer,
            vec![
                CombatAiProfile::Captain,
                CombatAiProfile::Disciplined,
                CombatAiProfile::Brute,
                CombatAiProfile::Cunning,
            ],
            10.0,
        );
        assert!(summary.directives.get("approach").copied().unwrap_or(0) > 0);
        assert!(summary.directives.get("melee_attack").copied().unwrap_or(0) > 0);
        assert!(summary.directives.get("rally_allies").copied().unwrap_or(0) > 0);
    }
}
