use crate::env::CombatantId;

use super::phase::BossPhase;

/// Notifications broadcast by a [`super::BossFight`] to its subscribers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossEvent {
    PhaseChanged {
        from: BossPhase,
        to: BossPhase,
    },
    /// A special attack is being telegraphed.
    WindUpStarted {
        attack: String,
        target: CombatantId,
        duration: f32,
    },
    /// A wind-up resolved. `hit` is false when the target had moved out of
    /// reach; the cooldown is spent either way.
    AttackExecuted {
        attack: String,
        target: CombatantId,
        damage: f32,
        hit: bool,
    },
    /// A wind-up ended without resolving. No damage, no cooldown.
    WindUpCancelled {
        attack: String,
    },
    Enraged,
    Defeated,
    AddsSummoned {
        requested: u32,
        spawned: u32,
    },
    InvulnerabilityEnded {
        phase: BossPhase,
    },
}
