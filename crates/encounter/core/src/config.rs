/// Encounter-wide tunables shared by boss fights and combat AI.
///
/// Per-boss and per-profile numbers live in [`crate::BossFightSettings`] and
/// [`crate::ProfileTuning`]; this struct holds the knobs that apply to every
/// combatant in an arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Special attacks scoring at or below this value are never selected.
    pub attack_score_floor: f32,
    /// Other AI within `preferred_combat_range * factor` of a target count as engaged.
    pub engagement_radius_factor: f32,
    /// Approach stops once within `preferred_combat_range * factor`.
    pub approach_acceptance_factor: f32,
    /// Sideways offset from the target used when flanking.
    pub flank_offset: f32,
    /// Hazards further than this from the target are ignored.
    pub hazard_search_radius: f32,
    /// How far a guard steps back when an enemy crowds it.
    pub retreat_distance: f32,
    /// Launch strength of a frenzied zealot charge.
    pub charge_impulse: f32,
    /// Attacker cap a captain grants to nearby disciplined allies.
    pub rally_attacker_cap: u32,
}

impl EncounterConfig {
    // ===== compile-time constants =====
    /// Upper bound on directives produced by a single AI decision.
    pub const MAX_DIRECTIVES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_SCORE_FLOOR: f32 = -1.0;
    pub const DEFAULT_ENGAGEMENT_RADIUS_FACTOR: f32 = 1.5;
    pub const DEFAULT_APPROACH_ACCEPTANCE_FACTOR: f32 = 0.8;
    pub const DEFAULT_FLANK_OFFSET: f32 = 100.0;
    pub const DEFAULT_HAZARD_SEARCH_RADIUS: f32 = 300.0;
    pub const DEFAULT_RETREAT_DISTANCE: f32 = 200.0;
    pub const DEFAULT_CHARGE_IMPULSE: f32 = 800.0;
    pub const DEFAULT_RALLY_ATTACKER_CAP: u32 = 4;

    pub const fn new() -> Self {
        Self {
            attack_score_floor: Self::DEFAULT_ATTACK_SCORE_FLOOR,
            engagement_radius_factor: Self::DEFAULT_ENGAGEMENT_RADIUS_FACTOR,
            approach_acceptance_factor: Self::DEFAULT_APPROACH_ACCEPTANCE_FACTOR,
            flank_offset: Self::DEFAULT_FLANK_OFFSET,
            hazard_search_radius: Self::DEFAULT_HAZARD_SEARCH_RADIUS,
            retreat_distance: Self::DEFAULT_RETREAT_DISTANCE,
            charge_impulse: Self::DEFAULT_CHARGE_IMPULSE,
            rally_attacker_cap: Self::DEFAULT_RALLY_ATTACKER_CAP,
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
