use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    // World origin sits in the middle of the window, matching the arena layout.
    commands.spawn((Camera2d, Name::new("MainCamera")));
}
