use std::path::Path;
use std::time::Duration;

use dodge_game::config::{GameConfig, MAX_COLUMNS};

#[test]
fn defaults_match_the_classic_field() {
    let c = GameConfig::default();
    assert_eq!(c.max_enemies, 3);
    assert_eq!((c.game_width, c.game_height), (375.0, 500.0));
    assert_eq!((c.player_width, c.player_height), (75.0, 54.0));
    assert_eq!((c.enemy_width, c.enemy_height), (75.0, 156.0));
    assert_eq!(c.starting_lives, 3);
    assert_eq!(c.tick_interval(), Duration::from_millis(20));
    assert_eq!(c.max_frame_dt_ms, None);
    assert!(c.validate().is_ok());
}

#[test]
fn columns_follow_enemy_width() {
    let c = GameConfig::default();
    assert_eq!(c.columns(), 5);
    let wide = GameConfig {
        game_width: 400.0,
        ..GameConfig::default()
    };
    assert_eq!(wide.columns(), 5); // partial lane is dropped
}

#[test]
fn partial_ron_keeps_other_defaults() {
    let c = GameConfig::from_ron_str("(max_enemies: 4, tick_interval_ms: 33)").unwrap();
    assert_eq!(c.max_enemies, 4);
    assert_eq!(c.tick_interval_ms, 33);
    assert_eq!(c.game_height, 500.0);
    assert_eq!(c.starting_lives, 3);
}

#[test]
fn ron_can_set_frame_clamp() {
    let c = GameConfig::from_ron_str("(max_frame_dt_ms: Some(100))").unwrap();
    assert_eq!(c.max_frame_dt_ms, Some(100));
}

#[test]
fn empty_ron_struct_is_default() {
    let c = GameConfig::from_ron_str("()").unwrap();
    assert_eq!(c, GameConfig::default());
}

#[test]
fn malformed_ron_is_rejected() {
    assert!(GameConfig::from_ron_str("(max_enemies: three)").is_err());
}

#[test]
fn too_many_enemies_for_the_columns() {
    let err = GameConfig::from_ron_str("(max_enemies: 6)").unwrap_err();
    assert!(format!("{:#}", err).contains("exceeds"));
}

#[test]
fn zero_enemies_is_allowed() {
    let c = GameConfig::from_ron_str("(max_enemies: 0)").unwrap();
    assert_eq!(c.max_enemies, 0);
}

#[test]
fn starting_lives_must_be_positive() {
    assert!(GameConfig::from_ron_str("(starting_lives: 0)").is_err());
    assert!(GameConfig::from_ron_str("(starting_lives: 1)").is_ok());
}

#[test]
fn speed_range_must_be_ordered_and_positive() {
    assert!(GameConfig::from_ron_str("(enemy_speed_min: 0.8, enemy_speed_max: 0.2)").is_err());
    assert!(GameConfig::from_ron_str("(enemy_speed_min: 0.0)").is_err());
}

#[test]
fn dimensions_must_be_positive() {
    assert!(GameConfig::from_ron_str("(game_width: 0.0)").is_err());
    assert!(GameConfig::from_ron_str("(enemy_height: -1.0)").is_err());
    assert!(GameConfig::from_ron_str("(tick_interval_ms: 0)").is_err());
}

#[test]
fn missing_file_reports_its_path() {
    let err = GameConfig::load(Path::new("/definitely/not/here.ron")).unwrap_err();
    assert!(format!("{:#}", err).contains("/definitely/not/here.ron"));
}

#[test]
fn player_start_column_must_fit_the_field() {
    // Five 75-wide player columns: 0..=4 fit, 5 would start off the edge.
    assert!(GameConfig::from_ron_str("(player_start_column: 4)").is_ok());
    let err = GameConfig::from_ron_str("(player_start_column: 5)").unwrap_err();
    assert!(format!("{:#}", err).contains("outside the field"));
}

#[test]
fn tiny_enemy_width_is_rejected() {
    let err = GameConfig::from_ron_str("(enemy_width: 1e-30, max_enemies: 1)").unwrap_err();
    assert!(format!("{:#}", err).contains("spawn columns"));
}

#[test]
fn column_limit_is_inclusive() {
    let c = GameConfig {
        game_width: 1024.0,
        enemy_width: 1.0,
        ..GameConfig::default()
    };
    assert_eq!(c.columns(), MAX_COLUMNS);
    assert!(c.validate().is_ok());
}
