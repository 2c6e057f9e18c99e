use std::fs;

use hideseek_nav::TilePos;
use hideseek_sim::{ConfigError, SimConfig};

#[test]
fn yaml_overrides_merge_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.yaml");
    fs::write(
        &path,
        r#"
seed: 42
tile_size: 8.0
hider_spawn: { x: 1, y: 2 }
hider:
  panic_distance: 3
  energy:
    sprint_speed: 5.0
seeker:
  vision: 9
  target_offsets: [[4, 0], [0, 4]]
"#,
    )
    .expect("write");

    let config = SimConfig::load(&path).expect("load");
    assert_eq!(config.seed, 42);
    assert_eq!(config.tile_size, 8.0);
    assert_eq!(config.hider_spawn, Some(TilePos::new(1, 2)));
    assert_eq!(config.seeker_spawn, None);
    assert_eq!(config.hider.panic_distance, 3);
    assert_eq!(config.hider.far_distance, 8);
    assert_eq!(config.hider.energy.sprint_speed, 5.0);
    assert_eq!(config.hider.energy.base_speed, 2.0);
    assert_eq!(config.seeker.vision, 9);
    assert_eq!(config.seeker.target_offsets, vec![(4, 0), (0, 4)]);
    assert_eq!(config.max_ticks, SimConfig::default().max_ticks);
}

#[test]
fn json_is_chosen_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.json");
    fs::write(&path, r#"{ "seed": 9, "seeker": { "chase_cooldown_far": 10 } }"#).expect("write");

    let config = SimConfig::load(&path).expect("load");
    assert_eq!(config.seed, 9);
    assert_eq!(config.seeker.chase_cooldown_far, 10);
}

#[test]
fn empty_yaml_document_is_all_defaults() {
    let config = SimConfig::from_yaml_str("{}").expect("parse");
    assert_eq!(config, SimConfig::default());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.toml");
    fs::write(&path, "seed = 1").expect("write");

    assert!(matches!(
        SimConfig::load(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.yaml");

    let err = SimConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    assert!(matches!(
        SimConfig::from_yaml_str("seed: [not, a, number]"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn validation_catches_bad_values() {
    assert!(matches!(
        SimConfig::from_yaml_str("tile_size: 0"),
        Err(ConfigError::TileSize(_))
    ));
    assert!(matches!(
        SimConfig::from_yaml_str("hider: { panic_distance: 10, far_distance: 5 }"),
        Err(ConfigError::Agents(_))
    ));
    assert!(matches!(
        SimConfig::from_yaml_str("seeker: { energy: { slow_threshold: 70 } }"),
        Err(ConfigError::Agents(_))
    ));
    assert!(matches!(
        SimConfig::from_json_str(
            r#"{ "hider_spawn": { "x": 3, "y": 3 }, "seeker_spawn": { "x": 3, "y": 3 } }"#
        ),
        Err(ConfigError::SharedSpawn { .. })
    ));
}
