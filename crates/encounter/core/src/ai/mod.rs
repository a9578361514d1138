//! Combat AI for regular enemies.
//!
//! A [`CombatAiController`] re-evaluates its situation on a fixed,
//! profile-dependent interval. Each evaluation measures the arena once into a
//! [`Situation`] and runs the profile's behavior tree over it:
//!
//! 1. Profile hook (captain rally, zealot charge, guard retreat)
//! 2. Ranged attack when the target sits in the ranged band
//! 3. Melee (or an environmental kill) when in range and under the attacker cap
//! 4. Approach when under the cap
//! 5. Flank or hold when the corridor is full

mod context;
mod controller;
mod directive;
pub mod nodes;
mod profile;
pub mod tree;

pub use context::Situation;
pub use controller::CombatAiController;
pub use directive::{Decision, Directive, Directives};
pub use profile::{CombatAiProfile, ProfileTuning};
pub use tree::{DecisionTree, profile_tree};
