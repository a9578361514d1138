//! Boss definitions and the validation that turns them into live fights.

use crate::config::EncounterConfig;
use crate::env::CombatantId;
use crate::error::{EncounterError, ErrorSeverity};

use super::BossFight;
use super::attack::BossAttack;
use super::phase::{BossPhase, BossPhaseConfig, PhaseTable};

/// Fight-wide timers and caps for one boss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossFightSettings {
    /// Minimum time between two special attacks.
    pub special_attack_interval: f32,
    /// Seconds until the boss enrages; `0` disables enrage.
    pub enrage_timer: f32,
    pub enrage_damage_multiplier: f32,
    pub invulnerable_during_transition: bool,
    pub transition_duration: f32,
    /// Upper bound on adds alive at once.
    pub max_adds: u32,
    /// Adds requested by a `SummonMinions` attack.
    pub summon_count: u32,
}

impl BossFightSettings {
    pub const DEFAULT_SPECIAL_ATTACK_INTERVAL: f32 = 6.0;
    pub const DEFAULT_ENRAGE_TIMER: f32 = 180.0;
    pub const DEFAULT_ENRAGE_DAMAGE_MULTIPLIER: f32 = 2.0;
    pub const DEFAULT_TRANSITION_DURATION: f32 = 2.0;
    pub const DEFAULT_MAX_ADDS: u32 = 4;
    pub const DEFAULT_SUMMON_COUNT: u32 = 2;

    pub const fn new() -> Self {
        Self {
            special_attack_interval: Self::DEFAULT_SPECIAL_ATTACK_INTERVAL,
            enrage_timer: Self::DEFAULT_ENRAGE_TIMER,
            enrage_damage_multiplier: Self::DEFAULT_ENRAGE_DAMAGE_MULTIPLIER,
            invulnerable_during_transition: true,
            transition_duration: Self::DEFAULT_TRANSITION_DURATION,
            max_adds: Self::DEFAULT_MAX_ADDS,
            summon_count: Self::DEFAULT_SUMMON_COUNT,
        }
    }
}

impl Default for BossFightSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Static description of a boss: what a content file defines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossTemplate {
    pub name: String,
    pub max_health: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: BossFightSettings,
    pub phases: Vec<BossPhaseConfig>,
    pub attacks: Vec<BossAttack>,
}

impl BossTemplate {
    pub fn new(name: impl Into<String>, max_health: f32) -> Self {
        Self {
            name: name.into(),
            max_health,
            settings: BossFightSettings::new(),
            phases: Vec::new(),
            attacks: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: BossFightSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_phase(mut self, phase: BossPhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_attack(mut self, attack: BossAttack) -> Self {
        self.attacks.push(attack);
        self
    }

    /// Checks the template without building a fight.
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.checked_parts().map(|_| ())
    }

    /// Validates the template and creates a fresh fight for `owner`.
    pub fn build(
        &self,
        owner: CombatantId,
        config: &EncounterConfig,
    ) -> Result<BossFight, TemplateError> {
        let (phases, attacks) = self.checked_parts()?;
        Ok(BossFight::new(
            owner,
            self.name.clone(),
            self.settings.clone(),
            phases,
            attacks,
            config,
        ))
    }

    fn checked_parts(&self) -> Result<(PhaseTable, Vec<BossAttack>), TemplateError> {
        if self.max_health.is_nan() || self.max_health <= 0.0 {
            return Err(TemplateError::InvalidMaxHealth(self.max_health));
        }
        let settings = &self.settings;
        if !non_negative(settings.special_attack_interval)
            || !non_negative(settings.enrage_timer)
            || !non_negative(settings.transition_duration)
        {
            return Err(TemplateError::NegativeTimer);
        }

        let phases = PhaseTable::new(self.phases.clone())?;

        let mut attacks = self.attacks.clone();
        for (index, attack) in attacks.iter_mut().enumerate() {
            if attack.name.is_empty() {
                return Err(TemplateError::InvalidAttack {
                    name: format!("#{index}"),
                    reason: "name is empty",
                });
            }
            if !non_negative(attack.damage) || !non_negative(attack.range) {
                return Err(TemplateError::InvalidAttack {
                    name: attack.name.clone(),
                    reason: "damage and range must be non-negative",
                });
            }
            if !non_negative(attack.cooldown) || !non_negative(attack.wind_up) {
                return Err(TemplateError::InvalidAttack {
                    name: attack.name.clone(),
                    reason: "cooldown and wind-up must be non-negative",
                });
            }
            if attack.phases.is_empty() {
                return Err(TemplateError::InvalidAttack {
                    name: attack.name.clone(),
                    reason: "no phase allows it",
                });
            }
            attack.cooldown_remaining = 0.0;
        }

        Ok((phases, attacks))
    }
}

/// `false` for negatives and NaN.
fn non_negative(value: f32) -> bool {
    value >= 0.0
}

/// Reasons a [`BossTemplate`] cannot become a fight.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("boss has no phase configurations")]
    NoPhases,

    #[error("Defeated is terminal and cannot be configured")]
    DefeatedPhaseConfigured,

    #[error("phase {0} is configured twice")]
    DuplicatePhase(BossPhase),

    #[error("phase {phase} threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange { phase: BossPhase, threshold: f32 },

    #[error("phase {phase} resistance {resistance} is outside [0, 1]")]
    ResistanceOutOfRange { phase: BossPhase, resistance: f32 },

    #[error("phase {later} must have a lower threshold than {earlier}")]
    ThresholdOrder { earlier: BossPhase, later: BossPhase },

    #[error("max health must be positive, got {0}")]
    InvalidMaxHealth(f32),

    #[error("fight timers must be non-negative")]
    NegativeTimer,

    #[error("attack {name}: {reason}")]
    InvalidAttack { name: String, reason: &'static str },
}

impl EncounterError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use TemplateError::*;
        match self {
            NoPhases => "TEMPLATE_NO_PHASES",
            DefeatedPhaseConfigured => "TEMPLATE_DEFEATED_CONFIGURED",
            DuplicatePhase(_) => "TEMPLATE_DUPLICATE_PHASE",
            ThresholdOutOfRange { .. } => "TEMPLATE_THRESHOLD_OUT_OF_RANGE",
            ResistanceOutOfRange { .. } => "TEMPLATE_RESISTANCE_OUT_OF_RANGE",
            ThresholdOrder { .. } => "TEMPLATE_THRESHOLD_ORDER",
            InvalidMaxHealth(_) => "TEMPLATE_INVALID_MAX_HEALTH",
            NegativeTimer => "TEMPLATE_NEGATIVE_TIMER",
            InvalidAttack { .. } => "TEMPLATE_INVALID_ATTACK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::{BossAttackType, PhaseSet};

    fn overseer() -> BossTemplate {
        BossTemplate::new("Third Class Overseer", 400.0)
            .with_phase(BossPhaseConfig::new(BossPhase::Phase1, 1.0))
            .with_phase(
                BossPhaseConfig::new(BossPhase::Phase2, 0.5)
                    .with_multipliers(1.2, 1.2)
                    .with_resistance(0.15),
            )
            .with_attack(
                BossAttack::new("SteamBlast", BossAttackType::EnvironmentalTrigger)
                    .with_damage(35.0, 500.0)
                    .with_timing(8.0, 1.0),
            )
    }

    #[test]
    fn valid_template_builds() {
        let fight = overseer()
            .build(CombatantId(1), &EncounterConfig::default())
            .unwrap();
        assert_eq!(fight.name(), "Third Class Overseer");
        assert_eq!(fight.phase(), BossPhase::Phase1);
        assert_eq!(fight.attacks().len(), 1);
    }

    #[test]
    fn rejects_bad_health_and_attacks() {
        let mut template = overseer();
        template.max_health = 0.0;
        assert_eq!(template.validate(), Err(TemplateError::InvalidMaxHealth(0.0)));

        let template = overseer().with_attack(
            BossAttack::new("Nowhere", BossAttackType::AreaSlam).with_phases(PhaseSet::empty()),
        );
        let err = template.validate().unwrap_err();
        assert_eq!(err.error_code(), "TEMPLATE_INVALID_ATTACK");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn rejects_nan_timings() {
        let mut template = overseer();
        template.settings.enrage_timer = f32::NAN;
        assert_eq!(template.validate(), Err(TemplateError::NegativeTimer));

        let mut template = overseer();
        template.attacks[0].wind_up = f32::NAN;
        assert!(matches!(
            template.validate(),
            Err(TemplateError::InvalidAttack { ref name, .. }) if name == "SteamBlast"
        ));

        let mut template = overseer();
        template.attacks[0].range = f32::NAN;
        assert!(template.validate().is_err());
    }

    #[test]
    fn phase_errors_surface_through_build() {
        let mut template = overseer();
        template.phases.clear();
        assert!(matches!(
            template.build(CombatantId(1), &EncounterConfig::default()),
            Err(TemplateError::NoPhases)
        ));
    }
}
