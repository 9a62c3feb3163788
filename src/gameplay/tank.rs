//! Tank assembly, player control and the shared per-tick motion step.

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{
    BoostTrail, Faction, GameEntity, Hitbox, PlayerTank, Tank, TankPart, TankRig, Wrecked,
};
use crate::core::config::GameConfig;
use crate::core::events::ShotFired;
use crate::core::resources::{Arena, RunStats, SimTick};
use crate::core::system::SimSet;
use crate::core::tank_code::{CurrentTank, TankCode};
use crate::gameplay::bullet::spawn_bullet;
use crate::gameplay::motion::{heading_vector, integrate, wrap_position};
use crate::interaction::inputmap::types::InputMap;
use crate::rendering::palette;

pub const Z_TANK: f32 = 2.0;

/// Rear plate slides back this far per tick while the trigger is held, up to `MAX_CHASSIS_SLIDE`.
const CHASSIS_SLIDE_STEP: f32 = 2.0;
const MAX_CHASSIS_SLIDE: f32 = 20.0;
const TRACK_TILT_STEP: f32 = 1.0;
const MAX_TRACK_TILT: f32 = 6.0;

pub struct TankPlugin;

impl Plugin for TankPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Game), spawn_player)
            .add_systems(FixedUpdate, player_control.in_set(SimSet::Control))
            .add_systems(FixedUpdate, move_tanks.in_set(SimSet::Motion))
            .add_systems(Update, sync_tank_rigs.run_if(in_state(AppState::Game)));
    }
}

/// Local offset, sprite size and relative depth of one part for a tank of half-size `s`.
pub fn part_layout(part: TankPart, code: TankCode, s: f32) -> (Vec2, Vec2, f32) {
    match part {
        TankPart::ChassisRear => (Vec2::ZERO, Vec2::new(1.8 * s, 1.9 * s), 0.00),
        TankPart::Body => (Vec2::ZERO, Vec2::new(1.3 * s, 1.5 * s), 0.01),
        TankPart::Tracks => (
            Vec2::new(0.0, -0.75 * s),
            Vec2::new(1.9 * s, 0.35 * s),
            0.02,
        ),
        TankPart::Turret => (
            Vec2::new(0.0, 0.55 * s),
            Vec2::new((0.16 + 0.02 * code.turret as f32) * s, 1.1 * s),
            0.03,
        ),
    }
}

fn part_color(part: TankPart, code: TankCode) -> Color {
    match part {
        TankPart::ChassisRear | TankPart::Tracks => palette::chassis_color(code.chassis),
        TankPart::Body => palette::body_color(code.body),
        TankPart::Turret => palette::turret_color(code.turret),
    }
}

/// Spawn the four part sprites of a tank under a single parent. `extra` is added to the parent
/// so callers can attach gameplay or preview components.
pub fn spawn_tank_visual(
    commands: &mut Commands,
    code: TankCode,
    size: f32,
    position: Vec2,
    heading: f32,
    extra: impl Bundle,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position.extend(Z_TANK))
                .with_rotation(Quat::from_rotation_z(heading)),
            Visibility::default(),
            TankRig::default(),
            extra,
        ))
        .with_children(|parent| {
            // Draw order: rear plate, hull, tracks, turret.
            for part in [TankPart::ChassisRear, TankPart::Body, TankPart::Tracks, TankPart::Turret] {
                let (offset, sprite_size, z) = part_layout(part, code, size);
                parent.spawn((
                    part,
                    Sprite::from_color(part_color(part, code), sprite_size),
                    Transform::from_translation(offset.extend(z)),
                ));
            }
        })
        .id()
}

/// Gameplay tank: visuals plus body, hitbox, trail and scene marker.
pub fn spawn_tank(
    commands: &mut Commands,
    cfg: &GameConfig,
    code: TankCode,
    faction: Faction,
    position: Vec2,
    heading: f32,
    extra: impl Bundle,
) -> Entity {
    let trail = match faction {
        Faction::Player => palette::PLAYER_TRAIL,
        Faction::Enemy => palette::ENEMY_TRAIL,
    };
    spawn_tank_visual(
        commands,
        code,
        cfg.tank.size,
        position,
        heading,
        (
            Tank::new(code, heading),
            faction,
            Hitbox::square(cfg.tank.size),
            BoostTrail { color: trail },
            GameEntity,
            extra,
        ),
    )
}

fn spawn_player(mut commands: Commands, cfg: Res<GameConfig>, current: Res<CurrentTank>) {
    info!(target: "game", "CURRENT_TANK {}", current.0);
    let entity = spawn_tank(
        &mut commands,
        &cfg,
        current.0,
        Faction::Player,
        Vec2::ZERO,
        0.0,
        (PlayerTank, Name::new("PlayerTank")),
    );
    // Start with the trigger latched: a fire key still held from the menu must be released
    // before the first shot.
    commands
        .entity(entity)
        .insert(Tank { is_shooting: true, ..Tank::new(current.0, 0.0) });
}

/// Boost, steer and fire from the action map, then advance the cosmetic rig.
#[allow(clippy::too_many_arguments)]
pub fn player_control(
    mut commands: Commands,
    input: Option<Res<InputMap>>,
    cfg: Res<GameConfig>,
    tick: Res<SimTick>,
    mut stats: ResMut<RunStats>,
    mut shots: EventWriter<ShotFired>,
    mut q: Query<(&Transform, &mut Tank, &mut TankRig), (With<PlayerTank>, Without<Wrecked>)>,
) {
    let pressed = |name: &str| input.as_ref().is_some_and(|m| m.pressed(name));
    let boost = pressed("Boost");
    let brake = pressed("Brake");
    let left = pressed("TurnLeft");
    let right = pressed("TurnRight");
    let shoot = pressed("Shoot");

    for (transform, mut tank, mut rig) in &mut q {
        if boost {
            let force = heading_vector(tank.heading) * cfg.tank.boost;
            tank.velocity += force;
        }
        if right {
            tank.heading -= cfg.tank.turn_rate;
        } else if left {
            tank.heading += cfg.tank.turn_rate;
        }

        if shoot && !tank.is_shooting {
            let position = transform.translation.truncate();
            spawn_bullet(&mut commands, &cfg, Faction::Player, position, tank.heading);
            shots.write(ShotFired { owner: Faction::Player, position });
            stats.shots_fired += 1;
            let recoil = heading_vector(tank.heading) * cfg.tank.recoil;
            tank.velocity -= recoil;
            tank.is_shooting = true;
        }
        if !shoot {
            tank.is_shooting = false;
        }

        step_rig(&mut rig, tick.0, boost || brake, tank.is_shooting, left, right);
    }
}

/// Advance the cosmetic animation state by one tick.
pub fn step_rig(rig: &mut TankRig, tick: u64, engine: bool, shooting: bool, left: bool, right: bool) {
    rig.body_jitter = if engine {
        Vec2::splat((tick % 3) as f32 - 1.0)
    } else {
        Vec2::ZERO
    };

    // Held trigger pumps the plate: slide to the limit, snap home, repeat.
    if shooting && rig.chassis_slide < MAX_CHASSIS_SLIDE {
        rig.chassis_slide += CHASSIS_SLIDE_STEP;
    } else {
        rig.chassis_slide = 0.0;
    }

    if left || right {
        if right && rig.track_tilt > -MAX_TRACK_TILT {
            rig.track_tilt -= TRACK_TILT_STEP;
        }
        if left && rig.track_tilt < MAX_TRACK_TILT {
            rig.track_tilt += TRACK_TILT_STEP;
        }
    } else if rig.track_tilt > 0.0 {
        rig.track_tilt = (rig.track_tilt - TRACK_TILT_STEP).max(0.0);
    } else if rig.track_tilt < 0.0 {
        rig.track_tilt = (rig.track_tilt + TRACK_TILT_STEP).min(0.0);
    }
}

/// Integrate, damp and wrap every tank, then mirror heading into the transform.
pub fn move_tanks(
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    mut q: Query<(&mut Transform, &mut Tank)>,
) {
    for (mut transform, mut tank) in &mut q {
        let mut position = transform.translation.truncate();
        let tank = &mut *tank;
        integrate(&mut position, &mut tank.velocity, cfg.tank.damping);
        let position = wrap_position(position, arena.half_extents, cfg.tank.size);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = Quat::from_rotation_z(tank.heading);
    }
}

/// Apply `TankRig` offsets to the part sprites.
pub fn sync_tank_rigs(
    cfg: Res<GameConfig>,
    rigs: Query<(&TankRig, &Tank)>,
    mut parts: Query<(&TankPart, &ChildOf, &mut Transform)>,
) {
    for (part, child_of, mut transform) in &mut parts {
        let Ok((rig, tank)) = rigs.get(child_of.parent()) else {
            continue;
        };
        let (offset, _, z) = part_layout(*part, tank.code, cfg.tank.size);
        let mut rotation = Quat::IDENTITY;
        let offset = match part {
            TankPart::Body => offset + rig.body_jitter,
            TankPart::ChassisRear => offset - Vec2::Y * rig.chassis_slide,
            TankPart::Tracks => {
                // Tracks lean against the turn.
                rotation = Quat::from_rotation_z(-rig.track_tilt.to_radians());
                offset
            }
            TankPart::Turret => offset,
        };
        transform.translation = offset.extend(z);
        transform.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chassis_pumps_while_shooting_and_snaps_on_release() {
        let mut rig = TankRig::default();
        for t in 0..10 {
            step_rig(&mut rig, t, false, true, false, false);
        }
        assert_eq!(rig.chassis_slide, MAX_CHASSIS_SLIDE);
        step_rig(&mut rig, 10, false, true, false, false);
        assert_eq!(rig.chassis_slide, 0.0);
        step_rig(&mut rig, 11, false, true, false, false);
        assert_eq!(rig.chassis_slide, CHASSIS_SLIDE_STEP);
        step_rig(&mut rig, 12, false, false, false, false);
        assert_eq!(rig.chassis_slide, 0.0);
    }

    #[test]
    fn tracks_tilt_and_relax() {
        let mut rig = TankRig::default();
        for t in 0..10 {
            step_rig(&mut rig, t, false, false, true, false);
        }
        assert_eq!(rig.track_tilt, MAX_TRACK_TILT);
        for t in 0..3 {
            step_rig(&mut rig, t, false, false, false, false);
        }
        assert_eq!(rig.track_tilt, 3.0);
        for t in 0..10 {
            step_rig(&mut rig, t, false, false, false, true);
        }
        assert_eq!(rig.track_tilt, -MAX_TRACK_TILT);
        for t in 0..20 {
            step_rig(&mut rig, t, false, false, false, false);
        }
        assert_eq!(rig.track_tilt, 0.0);
    }

    #[test]
    fn body_jitters_only_with_engine() {
        let mut rig = TankRig::default();
        step_rig(&mut rig, 0, true, false, false, false);
        assert_eq!(rig.body_jitter, Vec2::splat(-1.0));
        step_rig(&mut rig, 2, true, false, false, false);
        assert_eq!(rig.body_jitter, Vec2::splat(1.0));
        step_rig(&mut rig, 3, false, false, false, false);
        assert_eq!(rig.body_jitter, Vec2::ZERO);
    }

    fn control_app() -> (App, Entity) {
        use crate::interaction::inputmap::parse::parse_input_toml;
        use crate::interaction::inputmap::plugin::DEFAULT_INPUT_TOML;

        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .init_resource::<SimTick>()
            .init_resource::<RunStats>()
            .insert_resource(parse_input_toml(DEFAULT_INPUT_TOML, false).input_map)
            .add_event::<ShotFired>()
            .add_systems(Update, player_control);
        let cfg = GameConfig::default();
        let entity = {
            let world = app.world_mut();
            let entity = spawn_tank(
                &mut world.commands(),
                &cfg,
                TankCode::default(),
                Faction::Player,
                Vec2::ZERO,
                0.0,
                PlayerTank,
            );
            world.flush();
            entity
        };
        (app, entity)
    }

    fn hold(app: &mut App, action: &str, pressed: bool) {
        app.world_mut().resource_mut::<InputMap>().inject(action, pressed);
    }

    fn bullets(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut q = world.query::<&crate::core::components::Bullet>();
        q.iter(world).count()
    }

    fn tank(app: &App, entity: Entity) -> Tank {
        *app.world().get::<Tank>(entity).unwrap()
    }

    #[test]
    fn one_round_per_press_with_recoil() {
        let (mut app, entity) = control_app();
        let cfg = GameConfig::default();
        hold(&mut app, "Shoot", true);
        for _ in 0..3 {
            app.update();
        }
        assert_eq!(bullets(&mut app), 1);
        assert_eq!(app.world().resource::<RunStats>().shots_fired, 1);
        let velocity = tank(&app, entity).velocity;
        assert!((velocity - Vec2::new(0.0, -cfg.tank.recoil)).length() < 1e-6, "{velocity}");

        hold(&mut app, "Shoot", false);
        app.update();
        assert!(!tank(&app, entity).is_shooting);
        hold(&mut app, "Shoot", true);
        app.update();
        assert_eq!(bullets(&mut app), 2);
    }

    #[test]
    fn boost_pushes_along_heading() {
        let (mut app, entity) = control_app();
        hold(&mut app, "Boost", true);
        app.update();
        let velocity = tank(&app, entity).velocity;
        assert!((velocity - Vec2::new(0.0, GameConfig::default().tank.boost)).length() < 1e-6);
    }

    #[test]
    fn right_turn_wins_over_left() {
        let (mut app, entity) = control_app();
        let rate = GameConfig::default().tank.turn_rate;
        hold(&mut app, "TurnLeft", true);
        hold(&mut app, "TurnRight", true);
        app.update();
        assert!((tank(&app, entity).heading + rate).abs() < 1e-6);
        hold(&mut app, "TurnRight", false);
        app.update();
        app.update();
        assert!((tank(&app, entity).heading - rate).abs() < 1e-6);
    }

    #[test]
    fn fresh_player_waits_for_fire_release() {
        use bevy::ecs::system::RunSystemOnce;

        let (mut app, stand_in) = control_app();
        app.world_mut().despawn(stand_in);
        app.init_resource::<CurrentTank>();
        app.world_mut().run_system_once(spawn_player).unwrap();
        {
            let world = app.world_mut();
            let mut q = world.query_filtered::<&Tank, With<PlayerTank>>();
            assert!(q.single(world).unwrap().is_shooting);
        }

        hold(&mut app, "Shoot", true);
        app.update();
        assert_eq!(bullets(&mut app), 0, "held key from the menu must not fire");
        hold(&mut app, "Shoot", false);
        app.update();
        hold(&mut app, "Shoot", true);
        app.update();
        assert_eq!(bullets(&mut app), 1);
    }

    #[test]
    fn tanks_wrap_through_the_motion_step() {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .init_resource::<Arena>()
            .add_systems(Update, move_tanks);
        let cfg = GameConfig::default();
        let limit = Arena::from_config(&cfg).half_extents.x + cfg.tank.size;
        let mut moving = Tank::new(TankCode::default(), 0.0);
        moving.velocity = Vec2::new(5.0, 0.0);
        let entity = app
            .world_mut()
            .spawn((Transform::from_xyz(limit - 1.0, 10.0, Z_TANK), moving))
            .id();
        app.update();
        let tf = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(tf.translation.truncate(), Vec2::new(-limit, 10.0));
        let velocity = app.world().get::<Tank>(entity).unwrap().velocity;
        assert!((velocity.x - 5.0 * cfg.tank.damping).abs() < 1e-6);
    }

    #[test]
    fn turret_width_tracks_variant() {
        let narrow = part_layout(TankPart::Turret, TankCode::default(), 50.0).1;
        let wide = part_layout(
            TankPart::Turret,
            TankCode { turret: 9, body: 0, chassis: 0 },
            50.0,
        )
        .1;
        assert!(wide.x > narrow.x);
    }
}
