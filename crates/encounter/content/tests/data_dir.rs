use std::fs;

use encounter_content::{BossZone, ConfigLoader, ContentFactory};
use encounter_core::{CombatAiProfile, CombatantId};

#[test]
fn data_dir_overrides_builtins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bosses.ron"),
        r#"(bosses: [(
            name: "tail warden",
            max_health: 650.0,
            phases: [
                (phase: Phase1, health_threshold: 1.0),
                (phase: Phase2, health_threshold: 0.4, damage_multiplier: 1.4),
            ],
            attacks: [(
                name: "Headbutt",
                attack_type: UnblockableStrike,
                damage: 30.0,
                range: 150.0,
                cooldown: 6.0,
                wind_up: 0.7,
            )],
        )])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("profiles.toml"),
        "[profiles.zealot]\nfrenzy_health_threshold = 0.5\n",
    )
    .unwrap();
    fs::write(dir.path().join("encounter.toml"), "flank_offset = 60.0\n").unwrap();

    let content = ContentFactory::new(dir.path()).load().unwrap();

    assert_eq!(content.roster.len(), 7);
    let warden = content.roster.get(BossZone::TailWarden.as_ref()).unwrap();
    assert_eq!(warden.max_health, 650.0);
    assert_eq!(warden.attacks[0].name, "Headbutt");

    let zealot = content.profiles.get(CombatAiProfile::Zealot);
    assert_eq!(zealot.frenzy_health_threshold, 0.5);
    assert_eq!(zealot.suicidal_charge_chance, 0.5);
    assert_eq!(content.config.flank_offset, 60.0);

    let fight = content
        .roster
        .spawn("Tail Warden", CombatantId(1), &content.config)
        .unwrap()
        .unwrap();
    assert_eq!(fight.attacks().len(), 1);
}

#[test]
fn broken_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("profiles.toml"), "[profiles.zealot\n").unwrap();

    let err = ContentFactory::new(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("profiles.toml"), "{err}");
}

#[test]
fn broken_config_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("encounter.toml"), "flank_offset = \"wide\"\n").unwrap();

    let err = ContentFactory::new(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("encounter.toml"), "{err}");

    let err = ConfigLoader::load(&dir.path().join("encounter.toml")).unwrap_err();
    assert!(err.to_string().contains("encounter.toml"), "{err}");
}
