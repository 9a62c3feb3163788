pub mod config;

pub use config::{
    BulletConfig, BurstConfig, ConfigLoadReport, DropConfig, EnemyConfig, ExplosionConfig, GameConfig, SimConfig,
    SparkConfig, TankConfig, TrailConfig, WindowConfig,
};
