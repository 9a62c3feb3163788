use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            title: "Tank Skirmish".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate. Every per-tick constant below assumes this rate.
    pub tick_hz: f64,
    /// Seed for the gameplay RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TankConfig {
    /// Half side of the tank hitbox; also the wraparound margin.
    pub size: f32,
    pub boost: f32,
    pub recoil: f32,
    /// Radians per tick.
    pub turn_rate: f32,
    pub damping: f32,
    /// Distance behind the tank centre where the boost trail is emitted.
    pub trail_offset: f32,
}
impl Default for TankConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            boost: 0.3,
            recoil: 0.2,
            turn_rate: 0.05,
            damping: 0.98,
            trail_offset: 70.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    pub boost: f32,
    /// Clockwise radians per tick.
    pub spin: f32,
    pub shoot_interval: u32,
    /// Fraction of the arena (per axis, centred) in which enemies never spawn.
    pub center_exclusion: f32,
    pub bullets_hit_player: bool,
}
impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            boost: 0.2,
            spin: 0.01,
            shoot_interval: 30,
            center_exclusion: 1.0 / 3.0,
            bullets_hit_player: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub size: f32,
}
impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            size: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DropConfig {
    pub size: f32,
}
impl Default for DropConfig {
    fn default() -> Self {
        Self { size: 40.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    /// Pixels per second.
    pub speed: f32,
    /// Lifespan (seconds) of a particle emitted at or above `full_speed`.
    pub max_lifespan: f32,
    /// Tank speed (pixels per tick) at which the trail reaches full strength.
    pub full_speed: f32,
    pub spread_deg: f32,
    pub scale_start: f32,
    pub scale_end: f32,
    pub base_size: f32,
}
impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            speed: 100.0,
            max_lifespan: 2.0,
            full_speed: 5.0,
            spread_deg: 10.0,
            scale_start: 0.6,
            scale_end: 0.0,
            base_size: 24.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BurstConfig {
    pub count: usize,
    /// Speeds are drawn from `-speed..=speed`.
    pub speed: f32,
    pub scale_start: f32,
    pub scale_end: f32,
    pub lifespan: f32,
    pub gravity: f32,
}
impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 12,
            speed: 800.0,
            scale_start: 0.5,
            scale_end: 0.0,
            lifespan: 0.6,
            gravity: 800.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SparkConfig {
    pub large: BurstConfig,
    pub small: BurstConfig,
    pub base_size: f32,
}
impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            large: BurstConfig {
                count: 14,
                ..default()
            },
            small: BurstConfig {
                count: 10,
                scale_start: 0.3,
                lifespan: 0.3,
                ..default()
            },
            base_size: 32.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplosionConfig {
    pub frame_rate: f32,
    pub frames: u32,
    pub size: f32,
}
impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            frame_rate: 20.0,
            frames: 9,
            size: 96.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub sim: SimConfig,
    pub tank: TankConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub drops: DropConfig,
    pub trail: TrailConfig,
    pub sparks: SparkConfig,
    pub explosion: ExplosionConfig,
}

/// Outcome of the startup config load, kept so it can be logged once logging is up.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ConfigLoadReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Single-file load that never fails; the error, if any, comes back for logging.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge every readable file in order (later files override earlier keys) and deserialize
    /// the result. Returns the config, the paths actually used, and any read/parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        if bm.iter().any(|(ek, _)| *ek == k) {
                            if let Some((_, ev)) = bm.iter_mut().find(|(ek, _)| **ek == k) {
                                merge_value(ev, v);
                            }
                        } else {
                            bm.insert(k, v);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if !(1.0..=1000.0).contains(&self.sim.tick_hz) {
            w.push(format!("sim.tick_hz {} outside 1..1000", self.sim.tick_hz));
        }
        if self.tank.size <= 0.0 {
            w.push("tank.size must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.tank.damping) {
            w.push(format!(
                "tank.damping {} outside 0..1 -> velocity grows without bound",
                self.tank.damping
            ));
        }
        if self.tank.boost <= 0.0 {
            w.push("tank.boost must be > 0; the player cannot move".into());
        }
        if self.tank.turn_rate.abs() > std::f32::consts::FRAC_PI_2 {
            w.push(format!(
                "tank.turn_rate {} very large (radians per tick)",
                self.tank.turn_rate
            ));
        }
        if self.enemy.shoot_interval == 0 {
            w.push("enemy.shoot_interval is 0 -> treated as never shooting".into());
        }
        if !(0.0..1.0).contains(&self.enemy.center_exclusion) {
            w.push(format!(
                "enemy.center_exclusion {} must be in 0..1",
                self.enemy.center_exclusion
            ));
        }
        if self.bullet.speed <= 0.0 {
            w.push("bullet.speed must be > 0; bullets never leave the barrel".into());
        }
        if self.bullet.size <= 0.0 {
            w.push("bullet.size must be > 0".into());
        }
        if self.drops.size <= 0.0 {
            w.push("drops.size must be > 0; drops cannot be collected".into());
        }
        if self.trail.full_speed <= 0.0 {
            w.push("trail.full_speed must be > 0".into());
        }
        if self.trail.max_lifespan < 0.0 {
            w.push("trail.max_lifespan negative".into());
        }
        for (label, burst) in [("sparks.large", &self.sparks.large), ("sparks.small", &self.sparks.small)] {
            if burst.lifespan <= 0.0 {
                w.push(format!("{label}.lifespan must be > 0"));
            }
            if burst.count > 500 {
                w.push(format!("{label}.count {} very high", burst.count));
            }
        }
        if self.explosion.frames == 0 || self.explosion.frame_rate <= 0.0 {
            w.push("explosion needs frames > 0 and frame_rate > 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(contents.as_bytes()).expect("write temp");
        f
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.enemy.shoot_interval, 30);
        assert!((cfg.tank.damping - 0.98).abs() < 1e-6);
    }

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 800.0, height: 600.0, title: "Test"),
            sim: (tick_hz: 30.0, seed: Some(7)),
            tank: (size: 40.0, boost: 0.5),
            enemy: (shoot_interval: 10),
        )"#;
        let cfg = GameConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert_eq!(cfg.window.width, 800.0);
        assert_eq!(cfg.sim.seed, Some(7));
        assert_eq!(cfg.tank.size, 40.0);
        assert_eq!(cfg.enemy.shoot_interval, 10);
        // Untouched fields keep their defaults.
        assert!((cfg.tank.turn_rate - 0.05).abs() < 1e-6);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn layered_overrides_nested_keys() {
        let base = write_temp("(tank: (size: 40.0, boost: 0.5), bullet: (speed: 12.0))");
        let local = write_temp("(tank: (boost: 0.9))");
        let (cfg, used, errors) = GameConfig::load_layered([base.path(), local.path()]);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.tank.size, 40.0);
        assert!((cfg.tank.boost - 0.9).abs() < 1e-6);
        assert_eq!(cfg.bullet.speed, 12.0);
    }

    #[test]
    fn layered_reports_missing_files() {
        let base = write_temp("(drops: (size: 30.0))");
        let missing = base.path().with_extension("nope");
        let (cfg, used, errors) = GameConfig::load_layered([base.path(), missing.as_path()]);
        assert_eq!(cfg.drops.size, 30.0);
        assert_eq!(used.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("read error"));
    }

    #[test]
    fn validate_detects_warnings() {
        let mut bad = GameConfig::default();
        bad.window.width = -1.0;
        bad.tank.damping = 1.5;
        bad.enemy.shoot_interval = 0;
        bad.bullet.speed = 0.0;
        bad.explosion.frames = 0;
        let warns = bad.validate();
        assert!(warns.len() >= 5, "expected several warnings, got {warns:?}");
        assert!(warns.iter().any(|w| w.contains("damping")));
    }
}
