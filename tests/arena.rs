//! End-to-end arena scenarios through the public API

use proptest::prelude::*;

use robot_arena::params::{EntityParams, RandomObstacles, RobotParams};
use robot_arena::sim::{
    Arena, ArenaEntity, ArenaPhase, Color, Command, ContactSource, Event, KeyCode, Obstacle,
    SensorTouch, Wall,
};
use robot_arena::{ArenaParams, Position};

fn layout(arena: &Arena) -> Vec<(String, Position, f32)> {
    arena
        .entities()
        .map(|e| (e.name().to_string(), e.position(), e.radius()))
        .collect()
}

fn seeded_params() -> ArenaParams {
    ArenaParams {
        random_obstacles: Some(RandomObstacles {
            count: 5,
            min_radius: 10.0,
            max_radius: 30.0,
            seed: 2017,
            color: Color::rgb(200, 0, 0),
        }),
        ..ArenaParams::default()
    }
}

#[test]
fn obstacle_stays_put_and_keeps_first_name() {
    let pos = Position::new(1.0, 1.0);
    let mut obstacle = Obstacle::new(1.0, pos, Color::new(0, 0, 0, 1.0));
    for _ in 0..10 {
        obstacle.timestep_update(1.0);
        assert_eq!(obstacle.position(), pos);
    }
    assert_eq!(obstacle.name(), "Obstacle0");
}

#[test]
fn robot_heading_zero_moves_along_x() {
    let params = ArenaParams {
        obstacles: Vec::new(),
        ..ArenaParams::default()
    };
    let mut arena = Arena::new(&params).unwrap();
    let start = arena.robot().position();
    for _ in 0..5 {
        arena.accept(&Event::Command(Command::SpeedUp));
    }
    arena.advance_time(1.0);
    assert_eq!(arena.robot().position(), Position::new(start.x + 5.0, start.y));
}

#[test]
fn exact_touch_activates_sensor() {
    let robot_radius = 20.0;
    let obstacle = Obstacle::new(15.0, Position::new(200.0, 135.0), Color::BLACK);
    let touch = SensorTouch::check(
        Position::new(200.0, 100.0),
        robot_radius,
        90.0,
        1.0,
        std::slice::from_ref(&obstacle),
        400.0,
        400.0,
    );
    assert!(touch.activated());
    assert_eq!(touch.source(), Some(ContactSource::Obstacle(0)));
}

#[test]
fn restart_reproduces_initial_layout() {
    let params = seeded_params();
    let mut arena = Arena::new(&params).unwrap();
    let original = layout(&arena);

    arena.accept(&Event::Keypress(KeyCode::UP));
    arena.accept(&Event::Keypress(KeyCode::UP));
    for _ in 0..20 {
        arena.advance_time(0.5);
    }
    assert_ne!(layout(&arena), original);

    arena.restart().unwrap();
    assert_eq!(layout(&arena), original);
    assert_eq!(arena.phase(), ArenaPhase::Running);

    let fresh = Arena::new(&params).unwrap();
    assert_eq!(layout(&fresh), original);
}

#[test]
fn identical_runs_are_deterministic() {
    let params = seeded_params();
    let mut a = Arena::new(&params).unwrap();
    let mut b = Arena::new(&params).unwrap();
    let script = [
        KeyCode::UP,
        KeyCode::UP,
        KeyCode::UP,
        KeyCode::RIGHT,
        KeyCode(0),
        KeyCode::UP,
        KeyCode::LEFT,
        KeyCode::LEFT,
    ];

    for key in script {
        a.accept(&Event::Keypress(key));
        b.accept(&Event::Keypress(key));
        for _ in 0..30 {
            a.advance_time(0.1);
            b.advance_time(0.1);
        }
    }

    assert_eq!(layout(&a), layout(&b));
    assert_eq!(a.robot().heading_angle(), b.robot().heading_angle());
    assert_eq!(a.robot().battery_level(), b.robot().battery_level());
    assert_eq!(a.collisions(), b.collisions());
}

#[test]
fn robot_bounded_by_walls_over_long_run() {
    let params = ArenaParams {
        x_dim: 300.0,
        y_dim: 200.0,
        robot: RobotParams {
            position: Position::new(150.0, 100.0),
            heading_angle: 35.0,
            battery_decay_rate: 0.0,
            collision_penalty: 0.0,
            ..RobotParams::default()
        },
        home_base: EntityParams::new(Position::new(0.0, 0.0), 0.0, Color::BLACK),
        obstacles: Vec::new(),
        random_obstacles: None,
    };
    let mut arena = Arena::new(&params).unwrap();
    for _ in 0..10 {
        arena.accept(&Event::Command(Command::SpeedUp));
    }

    let slack = 1e-3;
    for _ in 0..2000 {
        arena.advance_time(0.1);
        let robot = arena.robot();
        let pos = robot.position();
        let r = robot.radius();
        assert!(pos.x - r >= -slack && pos.x + r <= 300.0 + slack, "x out of bounds: {}", pos.x);
        assert!(pos.y - r >= -slack && pos.y + r <= 200.0 + slack, "y out of bounds: {}", pos.y);
        assert!(robot.heading_angle() >= 0.0 && robot.heading_angle() < 360.0);
    }
    assert!(arena.collisions() > 0);
}

fn pocket_params(obstacle_x: f32) -> ArenaParams {
    ArenaParams {
        x_dim: 500.0,
        y_dim: 400.0,
        robot: RobotParams {
            position: Position::new(490.0, 200.0),
            radius: 10.0,
            battery_decay_rate: 0.0,
            collision_penalty: 0.0,
            ..RobotParams::default()
        },
        home_base: EntityParams::new(Position::new(50.0, 50.0), 10.0, Color::BLACK),
        obstacles: vec![EntityParams::new(Position::new(obstacle_x, 200.0), 15.0, Color::BLACK)],
        random_obstacles: None,
    }
}

#[test]
fn robot_starting_inside_an_obstacle_is_rejected() {
    let mut params = pocket_params(470.0);
    params.robot.position = Position::new(488.0, 200.0);
    assert!(Arena::new(&params).is_err());
}

#[test]
fn wall_ahead_bounces_robot_leaving_an_obstacle() {
    // Robot fits exactly between the obstacle and the right wall
    let mut arena = Arena::new(&pocket_params(465.0)).unwrap();
    for _ in 0..5 {
        arena.accept(&Event::Command(Command::SpeedUp));
    }

    arena.advance_time(0.0);
    let touch = arena.robot().sensor_touch();
    assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Right)));
    assert!((arena.robot().heading_angle() - 180.0).abs() < 1e-3);
    assert_eq!(arena.collisions(), 1);

    let obstacle = arena.obstacles()[0].position();
    for step in 0..40u32 {
        arena.advance_time(0.1);
        let pos = arena.robot().position();
        assert!(pos.distance(obstacle) >= 25.0 - 1e-3, "overlapping obstacle at {:?}", pos);
        assert!(pos.x + 10.0 <= 500.0 + 1e-3, "past the wall at {:?}", pos);
        assert_eq!(arena.collisions(), step + 2);
    }
}

proptest! {
    #[test]
    fn arena_invariants_hold_for_any_key_sequence(
        keys in proptest::collection::vec(
            prop_oneof![
                Just(KeyCode::LEFT),
                Just(KeyCode::RIGHT),
                Just(KeyCode::UP),
                Just(KeyCode::DOWN),
                (0i32..400).prop_map(KeyCode),
            ],
            0..60,
        ),
        dt in 0.0f32..0.5,
    ) {
        let mut arena = Arena::new(&ArenaParams::default()).unwrap();
        let home = arena.home_base().position();
        for key in keys {
            arena.accept(&Event::Keypress(key));
            arena.advance_time(dt);

            let robot = arena.robot();
            prop_assert!(robot.heading_angle() >= 0.0 && robot.heading_angle() < 360.0);
            prop_assert!(robot.speed() >= 0.0 && robot.speed() <= robot.max_speed());
            prop_assert!(robot.battery_level() >= 0.0);
            prop_assert_eq!(arena.home_base().position(), home);
            if arena.hit_home() {
                prop_assert!(arena.phase().is_terminal());
            }
        }
    }
}
