pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use app::state::AppState;
pub use core::config::{ConfigLoadReport, GameConfig, WindowConfig};
pub use core::tank_code::{CurrentTank, TankCode};
