pub mod background;
pub mod camera;
pub mod explosion;
pub mod palette;
pub mod particles;

use bevy::prelude::*;

/// Camera, arena floor and transient effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            camera::CameraPlugin,
            background::BackgroundPlugin,
            particles::ParticlesPlugin,
            explosion::ExplosionPlugin,
        ));
    }
}
