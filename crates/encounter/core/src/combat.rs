//! Shared combat vocabulary: directions, attacks in flight, weighted draws.

use crate::env::CombatantId;

/// Swing direction for positional combat in tight corridors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackDirection {
    High,
    Mid,
    Low,
    Left,
    Right,
}

/// Guard direction; must match the attack direction to fully mitigate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockDirection {
    High,
    Mid,
    Low,
}

/// An attack handed to the host for resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncomingAttack {
    pub source: CombatantId,
    /// Damage after the attacker's multipliers, before the defender's resistances.
    pub damage: f32,
    pub direction: AttackDirection,
    pub blockable: bool,
    pub dodgeable: bool,
}

/// A static cumulative-weight table.
///
/// Each entry holds an outcome and the exclusive upper bound of its slice of
/// `[0, 1)`. A roll picks the first entry whose bound exceeds it; rolls past
/// the last bound fall through to the last entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedTable<T: 'static> {
    entries: &'static [(T, f32)],
}

impl<T: Copy + 'static> WeightedTable<T> {
    /// # Panics
    ///
    /// Panics if `entries` is empty.
    pub const fn new(entries: &'static [(T, f32)]) -> Self {
        assert!(!entries.is_empty(), "WeightedTable needs at least one entry");
        Self { entries }
    }

    pub fn draw(&self, roll: f32) -> T {
        let last = &self.entries[self.entries.len() - 1];
        let (value, _) = self
            .entries
            .iter()
            .find(|(_, bound)| roll < *bound)
            .unwrap_or(last);
        *value
    }

    pub fn entries(&self) -> &'static [(T, f32)] {
        self.entries
    }
}
