pub mod game;
pub mod game_over;
pub mod inventory_screen;
pub mod select_tank;
pub mod state;
pub mod ui;
