//! Boss encounters and corridor combat AI, independent of any engine.
//!
//! `encounter-core` decides; the host acts. Boss fights ([`BossFight`]) and
//! AI controllers ([`CombatAiController`]) read the world through [`Arena`],
//! request changes through [`ArenaMut`], and report what happened through
//! observer callbacks and returned [`Decision`]s. Everything is tick-driven
//! and deterministic for a given seed.
pub mod ai;
pub mod boss;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;

pub use ai::{CombatAiController, CombatAiProfile, Decision, Directive, ProfileTuning, Situation};
pub use boss::{
    AttackCadence, AttackWindUp, BossAttack, BossAttackType, BossEvent, BossFight,
    BossFightSettings, BossPhase, BossPhaseConfig, BossTemplate, PhaseSet, PhaseTable,
    SpecialAttackError, TemplateError, select_best,
};
pub use combat::{AttackDirection, BlockDirection, IncomingAttack, WeightedTable};
pub use config::EncounterConfig;
pub use env::{Arena, ArenaMut, CombatantId, Dice, HazardId, HazardSighting, Location, Vitals};
pub use error::{EncounterError, ErrorSeverity};
pub use events::{Observers, SubscriptionId};
