use std::io::Write;

use tank_skirmish::core::config::GameConfig;

#[test]
fn defaults_are_valid() {
    let cfg = GameConfig::default();
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    assert_eq!(cfg.sim.tick_hz, 60.0);
    assert_eq!(cfg.tank.size, 50.0);
    assert!(!cfg.enemy.bullets_hit_player);
}

#[test]
fn shipped_config_parses_cleanly() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron")
        .expect("assets/config/game.ron should parse");
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn unreadable_single_file_falls_back_to_defaults() {
    let (cfg, err) = GameConfig::load_or_default("no/such/game.ron");
    assert_eq!(cfg, GameConfig::default());
    assert!(err.unwrap().starts_with("read config"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(bullet: (speed: 14.0))").unwrap();
    let (cfg, err) = GameConfig::load_or_default(file.path());
    assert!(err.is_none());
    assert_eq!(cfg.bullet.speed, 14.0);
}

#[test]
fn layers_override_only_the_keys_they_name() {
    let mut base = tempfile::NamedTempFile::new().unwrap();
    write!(base, "(window: (width: 800.0, height: 600.0, title: \"Base\"), tank: (size: 40.0))").unwrap();
    let mut overlay = tempfile::NamedTempFile::new().unwrap();
    write!(overlay, "(tank: (size: 32.0), sim: (seed: Some(9)))").unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([base.path(), overlay.path()]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.title, "Base");
    assert_eq!(cfg.window.width, 800.0);
    assert_eq!(cfg.tank.size, 32.0);
    assert_eq!(cfg.tank.boost, GameConfig::default().tank.boost);
    assert_eq!(cfg.sim.seed, Some(9));
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let mut broken = tempfile::NamedTempFile::new().unwrap();
    write!(broken, "(tank: (size: ").unwrap();
    let (cfg, used, errors) =
        GameConfig::load_layered([std::path::Path::new("does/not/exist.ron"), broken.path()]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn nonsense_values_produce_warnings() {
    let mut cfg = GameConfig::default();
    cfg.window.width = 0.0;
    cfg.sim.tick_hz = -1.0;
    let warnings = cfg.validate();
    assert!(warnings.len() >= 2, "{warnings:?}");
}
