use bevy::prelude::*;

use crate::core::resources::Arena;
use crate::rendering::palette;

/// Spacing of the faint floor grid, in pixels.
const GRID_CELL: f32 = 128.0;
const GRID_LINE: f32 = 2.0;

#[derive(Component, Debug)]
pub struct ArenaFloor;

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(palette::BACKGROUND))
            .add_systems(Update, rebuild_floor.run_if(resource_changed::<Arena>));
    }
}

/// Offsets of grid lines from the centre along one axis, covering `-half..=half`.
pub fn grid_offsets(half: f32, cell: f32) -> Vec<f32> {
    if cell <= 0.0 || half <= 0.0 {
        return vec![0.0];
    }
    let n = (half / cell).floor() as i32;
    (-n..=n).map(|i| i as f32 * cell).collect()
}

fn spawn_floor(mut commands: Commands, arena: Res<Arena>) {
    let size = arena.size();
    commands
        .spawn((
            ArenaFloor,
            Name::new("ArenaFloor"),
            Transform::from_xyz(0.0, 0.0, -10.0),
            Visibility::default(),
        ))
        .with_children(|floor| {
            for x in grid_offsets(arena.half_extents.x, GRID_CELL) {
                floor.spawn((
                    Sprite::from_color(palette::GRID_LINE, Vec2::new(GRID_LINE, size.y)),
                    Transform::from_xyz(x, 0.0, 0.0),
                ));
            }
            for y in grid_offsets(arena.half_extents.y, GRID_CELL) {
                floor.spawn((
                    Sprite::from_color(palette::GRID_LINE, Vec2::new(size.x, GRID_LINE)),
                    Transform::from_xyz(0.0, y, 0.0),
                ));
            }
        });
}

/// Runs on the first frame and whenever the arena is resized.
fn rebuild_floor(mut commands: Commands, arena: Res<Arena>, floors: Query<Entity, With<ArenaFloor>>) {
    for entity in &floors {
        commands.entity(entity).despawn();
    }
    spawn_floor(commands, arena);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_symmetric() {
        let offsets = grid_offsets(300.0, 128.0);
        assert_eq!(offsets, vec![-256.0, -128.0, 0.0, 128.0, 256.0]);
        assert_eq!(grid_offsets(0.0, 128.0), vec![0.0]);
    }
}
