use invaders::config::*;

#[test]
fn defaults_match_classic_layout() {
    let c = RoundConfig::default();
    assert_eq!((c.screen_width, c.screen_height), (600, 700));
    assert_eq!(c.fire_delay_ms, 300);
    assert_eq!(c.enemy_fire_interval_ms, 600);
    assert_eq!((c.bonus_interval_min_ms, c.bonus_interval_max_ms), (4000, 8000));
    assert_eq!((c.enemy_points, c.bonus_points), (100, 300));
    assert_eq!(c.player_rest(), (305, 682));
}

#[test]
fn toml_overrides_only_named_keys() {
    let c = RoundConfig::from_toml_str(
        r#"
        screen_width = 800
        enemy_count = 8

        [sprites]
        ship = [40, 20]
        "#,
    )
    .unwrap();
    assert_eq!(c.screen_width, 800);
    assert_eq!(c.enemy_count, 8);
    assert_eq!(c.sprites.ship, (40, 20));
    assert_eq!(c.sprites.enemy, (36, 28));
    assert_eq!(c.screen_height, 700);
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(RoundConfig::from_toml_str("").unwrap(), RoundConfig::default());
}

#[test]
fn inverted_bonus_interval_rejected() {
    let err = RoundConfig::from_toml_str(
        "bonus_interval_min_ms = 9000\nbonus_interval_max_ms = 8000\n",
    );
    assert!(err.is_err());
}

#[test]
fn unreadable_file_reports_path() {
    let err = RoundConfig::load_from_file("/nonexistent/invaders.toml").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/invaders.toml"));
}
