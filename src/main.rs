use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use tank_skirmish::interaction::session::config_hot_reload::ConfigReloadSettings;
use tank_skirmish::{ConfigLoadReport, CurrentTank, GameConfig, GamePlugin, TankCode};

const BASE_CONFIG: &str = "assets/config/game.ron";
const LOCAL_CONFIG: &str = "assets/config/game.local.ron";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Extra RON layers merged over the base config, in order.
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Start with this tank instead of 000 (three digits: turret, body, chassis).
    #[arg(long)]
    tank: Option<TankCode>,
    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn config_layers(extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut layers = vec![PathBuf::from(BASE_CONFIG)];
    // The local override is optional; only a missing base file is worth reporting.
    if Path::new(LOCAL_CONFIG).exists() {
        layers.push(PathBuf::from(LOCAL_CONFIG));
    }
    layers.extend(extra.iter().cloned());
    layers
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let layers = config_layers(&cli.config);
    let (mut cfg, used, errors) = GameConfig::load_layered(&layers);
    if cli.seed.is_some() {
        cfg.sim.seed = cli.seed;
    }
    let report = ConfigLoadReport { used, errors, warnings: cfg.validate() };

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(ConfigReloadSettings {
            paths: layers,
            seed_override: cli.seed,
            ..default()
        })
        .insert_resource(CurrentTank(cli.tank.unwrap_or_default()))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("game exited with code {code}"),
    }
}
