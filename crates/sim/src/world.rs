//! In-memory arena: a straight train car with a player, a boss, an AI
//! squad, the boss's adds and a few hazards along the walls.

use std::collections::BTreeMap;

use encounter_core::{
    Arena, ArenaMut, AttackDirection, CombatantId, Directive, HazardId, HazardSighting,
    IncomingAttack, Location, Vitals,
};

pub const PLAYER: CombatantId = CombatantId(0);
pub const BOSS: CombatantId = CombatantId(1);

const SQUAD_MELEE_DAMAGE: f32 = 12.0;
const SQUAD_RANGED_DAMAGE: f32 = 8.0;
const SQUAD_SPEED: f32 = 450.0;
const SQUAD_HEALTH: f32 = 120.0;
const ADD_HEALTH: f32 = 60.0;
const BOSS_SPEED: f32 = 300.0;
const BOSS_STANDOFF: f32 = 250.0;
/// Distance covered per unit of charge impulse.
const CHARGE_TRAVEL: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Boss,
    Squad,
    Add,
}

#[derive(Clone, Debug)]
pub struct Body {
    pub side: Side,
    pub at: Location,
    pub facing: Location,
    pub vitals: Vitals,
    /// Incoming damage multiplier.
    pub resistance: f32,
    pub ranged: bool,
    goal: Option<(Location, f32)>,
}

impl Body {
    fn new(side: Side, at: Location, health: f32) -> Self {
        Self {
            side,
            at,
            facing: Location::new(1.0, 0.0, 0.0),
            vitals: Vitals::new(health, health),
            resistance: 1.0,
            ranged: false,
            goal: None,
        }
    }

    fn fights_player(&self) -> bool {
        matches!(self.side, Side::Squad | Side::Add)
    }
}

#[derive(Clone, Debug)]
pub struct Hazard {
    pub id: HazardId,
    pub at: Location,
    pub radius: f32,
    pub damage: f32,
    pub cooldown: f32,
    pub cooldown_remaining: f32,
}

/// Running totals the summary reports.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct WorldStats {
    pub damage_to_player: f32,
    pub damage_to_boss: f32,
    pub hazards_triggered: u32,
    pub adds_spawned: u32,
}

#[derive(Debug, Default)]
pub struct SimWorld {
    bodies: BTreeMap<CombatantId, Body>,
    hazards: Vec<Hazard>,
    next_id: u32,
    /// Adds spawned since the last [`SimWorld::take_new_adds`].
    new_adds: Vec<CombatantId>,
    pub stats: WorldStats,
}

impl SimWorld {
    /// Player at the origin, boss down the car, hazards along the way.
    pub fn new(player_health: f32, boss_health: f32) -> Self {
        let mut world = Self {
            next_id: 2,
            ..Self::default()
        };
        world
            .bodies
            .insert(PLAYER, Body::new(Side::Player, Location::ORIGIN, player_health));
        world.bodies.insert(
            BOSS,
            Body::new(Side::Boss, Location::new(900.0, 0.0, 0.0), boss_health),
        );
        for (i, x) in [150.0, 450.0, 750.0].into_iter().enumerate() {
            world.hazards.push(Hazard {
                id: HazardId(i as u32),
                at: Location::new(x, 120.0, 0.0),
                radius: 180.0,
                damage: 25.0,
                cooldown: 5.0,
                cooldown_remaining: 0.0,
            });
        }
        world
    }

    fn allocate(&mut self) -> CombatantId {
        let id = CombatantId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Places a squad member behind the boss, fanned out across the car.
    pub fn spawn_squad(&mut self, slot: usize, ranged: bool) -> CombatantId {
        let id = self.allocate();
        let lane = (slot % 3) as f32 - 1.0;
        let row = (slot / 3) as f32;
        let mut body = Body::new(
            Side::Squad,
            Location::new(700.0 + row * 120.0, lane * 140.0, 0.0),
            SQUAD_HEALTH,
        );
        body.ranged = ranged;
        self.bodies.insert(id, body);
        id
    }

    pub fn body(&self, id: CombatantId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.vitals.is_alive())
    }

    pub fn health(&self, id: CombatantId) -> f32 {
        self.bodies.get(&id).map_or(0.0, |b| b.vitals.health)
    }

    pub fn take_new_adds(&mut self) -> Vec<CombatantId> {
        std::mem::take(&mut self.new_adds)
    }

    /// Removes dead adds and returns their ids.
    pub fn reap_adds(&mut self) -> Vec<CombatantId> {
        let dead: Vec<CombatantId> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.side == Side::Add && !b.vitals.is_alive())
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            self.bodies.remove(id);
        }
        dead
    }

    /// Nearest living add, which the player clears before the boss.
    pub fn nearest_add(&self) -> Option<CombatantId> {
        let player_at = self.bodies.get(&PLAYER)?.at;
        self.bodies
            .iter()
            .filter(|(_, b)| b.side == Side::Add && b.vitals.is_alive())
            .min_by(|a, b| {
                a.1.at
                    .distance(player_at)
                    .total_cmp(&b.1.at.distance(player_at))
            })
            .map(|(id, _)| *id)
    }

    /// Ids of living fighters on `side` within `radius` of `center`.
    pub fn allies_near(&self, side: Side, center: Location, radius: f32) -> Vec<CombatantId> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.side == side && b.vitals.is_alive() && b.at.distance(center) <= radius)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Damage scaled by the target's resistance. Returns what landed.
    pub fn deal_damage(&mut self, target: CombatantId, damage: f32) -> f32 {
        let Some(body) = self.bodies.get_mut(&target) else {
            return 0.0;
        };
        if !body.vitals.is_alive() {
            return 0.0;
        }
        let landed = (damage * body.resistance).min(body.vitals.health);
        body.vitals.health -= landed;
        match body.side {
            Side::Player => self.stats.damage_to_player += landed,
            Side::Boss => self.stats.damage_to_boss += landed,
            _ => {}
        }
        landed
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// Carries out one AI directive for `actor`. Rallies are left to the
    /// caller, which owns the controllers.
    pub fn apply_directive(&mut self, actor: CombatantId, directive: &Directive) {
        match *directive {
            Directive::MeleeAttack { target, direction } => {
                self.strike(actor, target, SQUAD_MELEE_DAMAGE, direction);
            }
            Directive::RangedAttack { target, .. } => {
                self.strike(actor, target, SQUAD_RANGED_DAMAGE, AttackDirection::Mid);
            }
            Directive::TriggerHazard { hazard, .. } => self.trigger_hazard(hazard),
            Directive::Approach {
                target,
                acceptance_radius,
            } => {
                if let Some(at) = self.location(target) {
                    self.set_goal(actor, Some((at, acceptance_radius)));
                }
            }
            Directive::Flank { destination } | Directive::Retreat { destination } => {
                self.set_goal(actor, Some((destination, 10.0)));
            }
            Directive::Hold => self.set_goal(actor, None),
            Directive::Charge { direction, impulse } => {
                if let Some(body) = self.bodies.get_mut(&actor) {
                    body.at = body.at.add(direction.scale(impulse * CHARGE_TRAVEL));
                    body.goal = None;
                }
            }
            Directive::RallyAllies { .. } => {}
        }
    }

    fn strike(
        &mut self,
        actor: CombatantId,
        target: CombatantId,
        damage: f32,
        direction: AttackDirection,
    ) {
        self.apply_attack(
            target,
            IncomingAttack {
                source: actor,
                damage,
                direction,
                blockable: true,
                dodgeable: true,
            },
        );
    }

    fn trigger_hazard(&mut self, id: HazardId) {
        let Some(hazard) = self
            .hazards
            .iter_mut()
            .find(|h| h.id == id && h.cooldown_remaining <= 0.0)
        else {
            return;
        };
        hazard.cooldown_remaining = hazard.cooldown;
        let (at, radius, damage) = (hazard.at, hazard.radius, hazard.damage);
        self.stats.hazards_triggered += 1;

        let caught: Vec<CombatantId> = self
            .bodies
            .iter()
            .filter(|(_, b)| b.vitals.is_alive() && b.at.distance(at) <= radius)
            .map(|(id, _)| *id)
            .collect();
        tracing::debug!("Hazard {:?} caught {} fighters", id, caught.len());
        for victim in caught {
            self.deal_damage(victim, damage);
        }
    }

    fn set_goal(&mut self, actor: CombatantId, goal: Option<(Location, f32)>) {
        if let Some(body) = self.bodies.get_mut(&actor) {
            body.goal = goal;
        }
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Moves everyone toward their goals and cools hazards down.
    pub fn step(&mut self, dt: f32, boss_speed_multiplier: f32) {
        for hazard in &mut self.hazards {
            hazard.cooldown_remaining = (hazard.cooldown_remaining - dt).max(0.0);
        }

        let player_at = self.location(PLAYER).unwrap_or_default();
        if let Some(boss) = self.bodies.get_mut(&BOSS)
            && boss.vitals.is_alive()
        {
            boss.goal = Some((player_at, BOSS_STANDOFF));
            walk(boss, BOSS_SPEED * boss_speed_multiplier * dt);
        }
        for body in self.bodies.values_mut().filter(|b| b.fights_player()) {
            if body.vitals.is_alive() {
                walk(body, SQUAD_SPEED * dt);
                body.facing = player_at.sub(body.at).normalized();
            }
        }
    }
}

fn walk(body: &mut Body, max_step: f32) {
    let Some((goal, stop_within)) = body.goal else {
        return;
    };
    let offset = goal.sub(body.at);
    let remaining = offset.length() - stop_within;
    if remaining <= 0.0 {
        body.goal = None;
        return;
    }
    let direction = offset.normalized();
    body.at = body.at.add(direction.scale(remaining.min(max_step)));
    body.facing = direction;
}

impl Arena for SimWorld {
    fn location(&self, id: CombatantId) -> Option<Location> {
        self.bodies.get(&id).map(|b| b.at)
    }

    fn vitals(&self, id: CombatantId) -> Option<Vitals> {
        self.bodies.get(&id).map(|b| b.vitals)
    }

    fn right_vector(&self, id: CombatantId) -> Option<Location> {
        let facing = self.bodies.get(&id)?.facing;
        Some(Location::new(-facing.y, facing.x, 0.0))
    }

    fn find_target(&self, seeker: CombatantId) -> Option<CombatantId> {
        let body = self.bodies.get(&seeker)?;
        (body.side != Side::Player && self.is_alive(PLAYER)).then_some(PLAYER)
    }

    fn engaging_count(&self, target: CombatantId, exclude: CombatantId, radius: f32) -> u32 {
        let Some(at) = self.location(target) else {
            return 0;
        };
        self.bodies
            .iter()
            .filter(|(id, b)| {
                **id != exclude
                    && b.fights_player()
                    && b.vitals.is_alive()
                    && b.at.distance(at) <= radius
            })
            .count() as u32
    }

    fn nearest_hazard(&self, near: Location, radius: f32) -> Option<HazardSighting> {
        self.hazards
            .iter()
            .filter(|h| h.cooldown_remaining <= 0.0 && h.at.distance(near) <= radius)
            .min_by(|a, b| a.at.distance(near).total_cmp(&b.at.distance(near)))
            .map(|h| HazardSighting {
                hazard: h.id,
                covers_target: h.at.distance(near) <= h.radius,
            })
    }

    fn has_ranged_weapon(&self, id: CombatantId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.ranged)
    }
}

impl ArenaMut for SimWorld {
    fn apply_attack(&mut self, target: CombatantId, attack: IncomingAttack) {
        let landed = self.deal_damage(target, attack.damage);
        tracing::trace!(
            "{} hits {} {:?} for {:.1}",
            attack.source,
            target,
            attack.direction,
            landed
        );
    }

    fn set_damage_resistance(&mut self, id: CombatantId, multiplier: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.resistance = multiplier;
        }
    }

    fn summon_adds(&mut self, owner: CombatantId, count: u32) -> u32 {
        let Some(at) = self.location(owner) else {
            return 0;
        };
        for n in 0..count {
            let id = self.allocate();
            let offset = Location::new(-60.0, (n as f32 - 0.5) * 120.0, 0.0);
            self.bodies
                .insert(id, Body::new(Side::Add, at.add(offset), ADD_HEALTH));
            self.new_adds.push(id);
        }
        self.stats.adds_spawned += count;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistance_scales_damage_and_stats() {
        let mut world = SimWorld::new(100.0, 500.0);
        world.set_damage_resistance(BOSS, 0.9);
        assert_eq!(world.deal_damage(BOSS, 100.0), 90.0);
        assert_eq!(world.stats.damage_to_boss, 90.0);
        assert_eq!(world.deal_damage(PLAYER, 500.0), 100.0);
        assert!(!world.is_alive(PLAYER));
    }

    #[test]
    fn squad_counts_toward_engagement() {
        let mut world = SimWorld::new(100.0, 500.0);
        let a = world.spawn_squad(0, false);
        let b = world.spawn_squad(1, false);
        world.bodies.get_mut(&a).unwrap().at = Location::new(100.0, 0.0, 0.0);
        world.bodies.get_mut(&b).unwrap().at = Location::new(0.0, 100.0, 0.0);

        assert_eq!(world.engaging_count(PLAYER, a, 270.0), 1);
        assert_eq!(world.engaging_count(PLAYER, CombatantId(99), 270.0), 2);
        // The boss is never counted.
        world.bodies.get_mut(&BOSS).unwrap().at = Location::new(50.0, 0.0, 0.0);
        assert_eq!(world.engaging_count(PLAYER, a, 270.0), 1);
    }

    #[test]
    fn hazard_hits_everyone_in_zone_then_cools_down() {
        let mut world = SimWorld::new(100.0, 500.0);
        world.bodies.get_mut(&PLAYER).unwrap().at = Location::new(150.0, 0.0, 0.0);
        let sighting = world.nearest_hazard(Location::new(150.0, 0.0, 0.0), 300.0).unwrap();
        assert!(sighting.covers_target);

        world.trigger_hazard(sighting.hazard);
        assert_eq!(world.health(PLAYER), 75.0);
        assert_eq!(world.stats.hazards_triggered, 1);

        world.trigger_hazard(sighting.hazard);
        assert_eq!(world.health(PLAYER), 75.0);
        world.step(5.0, 1.0);
        world.trigger_hazard(sighting.hazard);
        assert_eq!(world.health(PLAYER), 50.0);
    }

    #[test]
    fn approach_stops_at_acceptance_radius() {
        let mut world = SimWorld::new(100.0, 500.0);
        let grunt = world.spawn_squad(1, false);
        world.apply_directive(
            grunt,
            &Directive::Approach {
                target: PLAYER,
                acceptance_radius: 144.0,
            },
        );
        for _ in 0..20 {
            world.step(0.25, 1.0);
        }
        let distance = world.location(grunt).unwrap().distance(Location::ORIGIN);
        assert!((distance - 144.0).abs() < 0.01, "{distance}");
    }

    #[test]
    fn summoned_adds_are_reported_once() {
        let mut world = SimWorld::new(100.0, 500.0);
        assert_eq!(world.summon_adds(BOSS, 2), 2);
        let adds = world.take_new_adds();
        assert_eq!(adds.len(), 2);
        assert!(world.take_new_adds().is_empty());

        world.deal_damage(adds[0], 1000.0);
        assert_eq!(world.reap_adds(), vec![adds[0]]);
        assert_eq!(world.nearest_add(), Some(adds[1]));
    }
}
