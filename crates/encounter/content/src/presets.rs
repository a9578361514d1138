//! Built-in bosses, one per train zone.

use encounter_core::{BossAttack, BossAttackType, BossPhase, BossPhaseConfig, BossTemplate, PhaseSet};

/// Train zone a built-in boss guards, front to back.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BossZone {
    TailWarden,
    ThirdClassOverseer,
    AgriculturalGuardian,
    IndustrialForeman,
    HospitalityDirector,
    FirstClassMarshal,
    EngineGuardian,
}

impl BossZone {
    pub fn template(self) -> BossTemplate {
        match self {
            Self::TailWarden => tail_warden(),
            Self::ThirdClassOverseer => third_class_overseer(),
            Self::AgriculturalGuardian => agricultural_guardian(),
            Self::IndustrialForeman => industrial_foreman(),
            Self::HospitalityDirector => hospitality_director(),
            Self::FirstClassMarshal => first_class_marshal(),
            Self::EngineGuardian => engine_guardian(),
        }
    }
}

// ============================================================================
// Phase sets for bosses without a third phase
// ============================================================================

fn two_phase_all() -> PhaseSet {
    PhaseSet::PHASE1 | PhaseSet::PHASE2 | PhaseSet::ENRAGED
}

fn second_phase_on() -> PhaseSet {
    PhaseSet::PHASE2 | PhaseSet::ENRAGED
}

fn phase(
    which: BossPhase,
    threshold: f32,
    damage: f32,
    speed: f32,
    resistance: f32,
) -> BossPhaseConfig {
    BossPhaseConfig::new(which, threshold)
        .with_multipliers(damage, speed)
        .with_resistance(resistance)
}

fn attack(
    name: &str,
    attack_type: BossAttackType,
    damage: f32,
    range: f32,
    cooldown: f32,
    wind_up: f32,
) -> BossAttack {
    BossAttack::new(name, attack_type)
        .with_damage(damage, range)
        .with_timing(cooldown, wind_up)
}

fn summon(name: &str, cooldown: f32, wind_up: f32) -> BossAttack {
    BossAttack::new(name, BossAttackType::SummonMinions)
        .with_timing(cooldown, wind_up)
        .with_defense(false, false)
}

// ============================================================================
// Zones
// ============================================================================

/// Brute enforcer. Sheds its armour when desperate.
fn tail_warden() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Tail Warden", 500.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.1))
        .with_phase(phase(BossPhase::Phase2, 0.6, 1.3, 1.1, 0.2))
        .with_phase(phase(BossPhase::Phase3, 0.3, 1.5, 1.3, 0.0))
        .with_attack(attack("GroundSlam", AreaSlam, 40.0, 400.0, 10.0, 2.0))
        .with_attack(
            attack("ChargeAttack", ChargeRush, 50.0, 800.0, 15.0, 1.5).with_defense(true, true),
        )
        .with_attack(summon("SummonScrappers", 30.0, 3.0).with_phases(PhaseSet::LATE))
}

/// Turns the car's machinery against the player.
fn third_class_overseer() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Third Class Overseer", 400.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.0))
        .with_phase(phase(BossPhase::Phase2, 0.5, 1.2, 1.2, 0.15))
        .with_attack(
            attack("SteamBlast", EnvironmentalTrigger, 35.0, 500.0, 8.0, 1.0)
                .with_phases(two_phase_all()),
        )
        .with_attack(
            attack("MachineryTrap", EnvironmentalTrigger, 60.0, 300.0, 12.0, 2.5)
                .with_phases(two_phase_all()),
        )
        .with_attack(summon("WorkerSwarm", 25.0, 2.0).with_phases(second_phase_on()))
}

fn agricultural_guardian() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Agricultural Guardian", 350.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.0))
        .with_phase(phase(BossPhase::Phase2, 0.5, 1.4, 1.3, 0.1))
        .with_attack(
            attack("ScytheWhirlwind", AreaSlam, 45.0, 300.0, 10.0, 1.5)
                .with_defense(true, true)
                .with_phases(two_phase_all()),
        )
        .with_attack(
            attack("PoisonCloud", EnvironmentalTrigger, 15.0, 600.0, 15.0, 2.0)
                .with_phases(two_phase_all()),
        )
        .with_attack(
            attack("VineGrab", GrabAttack, 25.0, 400.0, 12.0, 1.0).with_phases(two_phase_all()),
        )
}

/// Forge master. Slows down but only gets tankier.
fn industrial_foreman() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Industrial Foreman", 600.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.25))
        .with_phase(phase(BossPhase::Phase2, 0.6, 1.2, 1.0, 0.3))
        .with_phase(phase(BossPhase::Phase3, 0.3, 1.5, 0.8, 0.4))
        .with_attack(attack("MoltenSplash", AreaSlam, 50.0, 350.0, 12.0, 2.5))
        .with_attack(
            attack("AnvilStrike", UnblockableStrike, 70.0, 200.0, 18.0, 3.0)
                .with_phases(PhaseSet::LATE),
        )
        .with_attack(
            attack("ForgeFlameWall", EnvironmentalTrigger, 30.0, 800.0, 20.0, 2.0)
                .with_defense(false, false),
        )
}

/// Fights through minions and misdirection.
fn hospitality_director() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Hospitality Director", 300.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.0))
        .with_phase(phase(BossPhase::Phase2, 0.5, 1.5, 1.5, 0.0))
        .with_attack(summon("SummonGuards", 20.0, 1.5).with_phases(two_phase_all()))
        .with_attack(
            attack("PoisonDart", RangedBarrage, 25.0, 1000.0, 8.0, 0.5)
                .with_defense(true, true)
                .with_phases(two_phase_all()),
        )
        .with_attack(
            attack("BackstabLunge", ChargeRush, 45.0, 500.0, 12.0, 0.8)
                .with_defense(true, true)
                .with_phases(two_phase_all()),
        )
}

fn first_class_marshal() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("First Class Marshal", 500.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.15))
        .with_phase(phase(BossPhase::Phase2, 0.6, 1.3, 1.2, 0.2))
        .with_phase(phase(BossPhase::Phase3, 0.25, 1.6, 1.4, 0.1))
        .with_attack(attack("SabreFlurry", UnblockableStrike, 40.0, 200.0, 10.0, 1.2))
        .with_attack(attack("PistolBarrage", RangedBarrage, 30.0, 1500.0, 6.0, 0.8))
        .with_attack(
            attack("ExecutionStrike", GrabAttack, 80.0, 150.0, 20.0, 2.0)
                .with_phases(PhaseSet::FINAL),
        )
        .with_attack(summon("EliteGuardWave", 30.0, 2.0).with_phases(PhaseSet::LATE))
}

/// Runs the train's systems as weapons. Armour breaks in the last phase.
fn engine_guardian() -> BossTemplate {
    use BossAttackType::*;
    BossTemplate::new("Engine Guardian", 800.0)
        .with_phase(phase(BossPhase::Phase1, 1.0, 1.0, 1.0, 0.3))
        .with_phase(phase(BossPhase::Phase2, 0.7, 1.2, 1.0, 0.35))
        .with_phase(phase(BossPhase::Phase3, 0.4, 1.5, 1.2, 0.2))
        .with_attack(attack(
            "ElectricalOverload",
            EnvironmentalTrigger,
            60.0,
            600.0,
            12.0,
            2.0,
        ))
        .with_attack(attack("ColdVent", AreaSlam, 40.0, 500.0, 10.0, 1.5))
        .with_attack(
            attack("PressureSurge", ChargeRush, 55.0, 400.0, 15.0, 2.5).with_phases(PhaseSet::LATE),
        )
        .with_attack(
            attack("EngineOverride", EnvironmentalTrigger, 100.0, 1000.0, 30.0, 4.0)
                .with_phases(PhaseSet::FINAL),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{CombatantId, EncounterConfig};
    use strum::IntoEnumIterator;

    #[test]
    fn every_preset_validates() {
        for zone in BossZone::iter() {
            let template = zone.template();
            template
                .validate()
                .unwrap_or_else(|e| panic!("{zone}: {e}"));
            assert!(!template.attacks.is_empty(), "{zone} has no attacks");
        }
    }

    #[test]
    fn zone_names_parse_case_insensitively() {
        assert_eq!(
            "engine_guardian".parse::<BossZone>().unwrap(),
            BossZone::EngineGuardian
        );
        assert_eq!("TAIL_WARDEN".parse::<BossZone>().unwrap(), BossZone::TailWarden);
        assert_eq!(BossZone::FirstClassMarshal.to_string(), "first_class_marshal");
    }

    #[test]
    fn tail_warden_drops_armour_in_last_phase() {
        let fight = BossZone::TailWarden
            .template()
            .build(CombatantId(1), &EncounterConfig::default())
            .unwrap();
        let last = fight.phases().get(BossPhase::Phase3).unwrap();
        assert_eq!(last.damage_resistance, 0.0);
        assert_eq!(last.damage_multiplier, 1.5);
    }

    #[test]
    fn two_phase_bosses_keep_late_attacks_for_phase_two() {
        let overseer = BossZone::ThirdClassOverseer.template();
        let swarm = overseer
            .attacks
            .iter()
            .find(|a| a.name == "WorkerSwarm")
            .unwrap();
        assert!(!swarm.phases.allows(BossPhase::Phase1));
        assert!(swarm.phases.allows(BossPhase::Phase2));
        assert!(swarm.phases.allows(BossPhase::Enraged));
    }
}
