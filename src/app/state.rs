use bevy::prelude::*;

/// Top-level scene state.
/// SelectTank -> Game <-> Inventory, Game -> GameOver -> (Game | SelectTank)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Player assembles a tank from parts.
    #[default]
    SelectTank,
    /// Active combat.
    Game,
    /// Browse and fit collected parts.
    Inventory,
    /// Player tank was destroyed.
    GameOver,
}
