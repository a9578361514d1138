//! The host world as seen by encounter logic.
//!
//! Boss fights and AI controllers never own positions or health. They query
//! the host through [`Arena`] and request changes through [`ArenaMut`]. Every
//! query returns `Option` so a despawned combatant degrades into a no-op
//! instead of an error.

mod rng;

pub use rng::Dice;

use crate::combat::IncomingAttack;

/// Identifier of anything that can fight: bosses, AI, the player, adds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an environmental hazard (steam vent, electrical panel, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardId(pub u32);

/// A point or direction in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Location {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self, other: Self) -> f32 {
        self.sub(other).length()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Unit vector in the same direction; near-zero vectors stay zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ORIGIN
        } else {
            self.scale(1.0 / len)
        }
    }
}

/// Health and control state of a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    pub staggered: bool,
    pub grappled: bool,
}

impl Vitals {
    pub const fn new(health: f32, max_health: f32) -> Self {
        Self {
            health,
            max_health,
            staggered: false,
            grappled: false,
        }
    }

    /// Health as a fraction of maximum, clamped to `[0, 1]`.
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// True when the combatant can act this tick.
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.staggered && !self.grappled
    }
}

/// A hazard found near a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardSighting {
    pub hazard: HazardId,
    /// Whether the target currently stands inside the hazard's zone.
    pub covers_target: bool,
}

/// Read-only queries against the host world.
pub trait Arena {
    fn location(&self, id: CombatantId) -> Option<Location>;

    fn vitals(&self, id: CombatantId) -> Option<Vitals>;

    /// Unit vector pointing to the combatant's right.
    fn right_vector(&self, id: CombatantId) -> Option<Location>;

    /// The enemy `seeker` should fight, if any.
    fn find_target(&self, seeker: CombatantId) -> Option<CombatantId>;

    /// Number of AI-controlled combatants, other than `exclude`, within
    /// `radius` of `target`.
    fn engaging_count(&self, target: CombatantId, exclude: CombatantId, radius: f32) -> u32;

    /// Nearest hazard that can currently trigger, strictly within `radius`
    /// of `near`.
    fn nearest_hazard(&self, near: Location, radius: f32) -> Option<HazardSighting>;

    fn has_ranged_weapon(&self, id: CombatantId) -> bool;

    /// Straight-line distance between two combatants.
    fn distance_between(&self, a: CombatantId, b: CombatantId) -> Option<f32> {
        Some(self.location(a)?.distance(self.location(b)?))
    }
}

/// Mutations encounter logic may request from the host world.
pub trait ArenaMut: Arena {
    /// Delivers an attack. The host resolves blocking, dodging and resistances.
    fn apply_attack(&mut self, target: CombatantId, attack: IncomingAttack);

    /// Sets the incoming-damage multiplier for `id` (1.0 = normal, 0.7 = 30% resist).
    fn set_damage_resistance(&mut self, id: CombatantId, multiplier: f32);

    /// Spawns up to `count` adds around `owner`; returns how many appeared.
    fn summon_adds(&mut self, owner: CombatantId, count: u32) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_percent_is_clamped() {
        assert_eq!(Vitals::new(150.0, 100.0).health_percent(), 1.0);
        assert_eq!(Vitals::new(-20.0, 100.0).health_percent(), 0.0);
        assert_eq!(Vitals::new(25.0, 100.0).health_percent(), 0.25);
        assert_eq!(Vitals::new(10.0, 0.0).health_percent(), 0.0);
    }

    #[test]
    fn staggered_combatant_cannot_act() {
        let mut vitals = Vitals::new(50.0, 100.0);
        assert!(vitals.can_act());
        vitals.staggered = true;
        assert!(!vitals.can_act());
        assert!(vitals.is_alive());
    }

    #[test]
    fn normalized_zero_vector_stays_zero() {
        assert_eq!(Location::ORIGIN.normalized(), Location::ORIGIN);
        let unit = Location::new(3.0, 4.0, 0.0).normalized();
        assert!((unit.length() - 1.0).abs() < 1e-6);
        assert_eq!(Location::new(3.0, 4.0, 0.0).distance(Location::ORIGIN), 5.0);
    }
}
