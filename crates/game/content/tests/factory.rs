use std::fs;
use std::path::Path;

use combat_content::ContentFactory;
use combat_core::{CatalogOracle, CombatConfig, CombatantId, CombatantStore, WeaponId};
use tempfile::TempDir;

const ACTIONS: &str = r#"(actions: [
    (id: "jab", target: SingleEnemy, effects: [(kind: "DealDamage", amount: 1)]),
    (id: "block", target: SelfOnly, priority: 1),
])"#;

const WEAPONS: &str = r#"(weapons: [
    (id: "unarmed", primary_attack: Some("jab")),
    (id: "shield", granted_actions: ["block"]),
])"#;

const DUEL: &str = r#"(
    name: "Duel",
    combatants: [
        (name: "Knight", controller: Player, health: Some(20), weapon: Some("shield"), persistent: ["jab"]),
        (name: "Bandit", controller: Ai, intellect: Some(Dumb), health: Some(10), innate: ["jab"]),
    ],
)"#;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "actions.ron", ACTIONS);
    write(dir.path(), "weapons.ron", WEAPONS);
    write(dir.path(), "encounters/duel.ron", DUEL);
    dir
}

#[test]
fn loads_a_complete_data_directory() {
    let dir = data_dir();
    write(dir.path(), "config.toml", "hand_size = 2\npost_action_delay_ms = 0\n");
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert_eq!(config.hand_size, 2);
    assert_eq!(config.post_action_delay_ms, 0);

    let catalog = factory.load_catalog().unwrap();
    assert_eq!(catalog.action_count(), 2);
    assert!(catalog.weapon(&WeaponId::new("shield")).is_some());

    let encounter = factory.load_encounter("duel", &catalog).unwrap();
    let store = encounter.to_store();
    assert_eq!(encounter.roster().len(), 2);
    assert_eq!(store.label(CombatantId(1)), "Bandit");
    assert!(store.deck(CombatantId(0)).is_some());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = data_dir();
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn encounter_listing_ignores_other_files() {
    let dir = data_dir();
    write(dir.path(), "encounters/arena.ron", DUEL);
    write(dir.path(), "encounters/notes.txt", "not an encounter");

    let names = ContentFactory::new(dir.path()).encounter_names().unwrap();
    assert_eq!(names, vec!["arena".to_owned(), "duel".to_owned()]);
}

#[test]
fn errors_name_the_offending_file() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());
    let catalog = factory.load_catalog().unwrap();

    let missing = factory.load_encounter("nowhere", &catalog).unwrap_err();
    assert!(format!("{missing:#}").contains("nowhere.ron"));

    write(
        dir.path(),
        "encounters/bad.ron",
        r#"(name: "Bad", combatants: [(name: "Ghost", controller: Player, persistent: ["wail"])])"#,
    );
    let invalid = factory.load_encounter("bad", &catalog).unwrap_err();
    let message = format!("{invalid:#}");
    assert!(message.contains("bad.ron"));
    assert!(message.contains("wail"));
}

#[test]
fn malformed_catalog_is_reported() {
    let dir = data_dir();
    write(dir.path(), "actions.ron", "(actions: [(id: )])");
    assert!(ContentFactory::new(dir.path()).load_catalog().is_err());
}
