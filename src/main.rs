//! Robot Arena entry point
//!
//! Runs a headless session: loads arena parameters (JSON path as the first
//! argument, built-in defaults otherwise), then steers the robot toward the
//! home base with arrow-key events until the game is won or lost.

use robot_arena::consts::HEADING_STEP_DEG;
use robot_arena::sim::{ArenaEntity, Event, KeyCode};
use robot_arena::{ArenaParams, ConfigError, Driver, direction_degrees};

/// Simulated frame time (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many frames
const MAX_FRAMES: u32 = 60 * 300;
/// Frames between steering decisions
const STEER_INTERVAL: u32 = 10;

fn load_params() -> Result<ArenaParams, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading arena parameters from {}", path);
            ArenaParams::from_file(&path)
        }
        None => Ok(ArenaParams::default()),
    }
}

/// Pick the arrow key that moves the robot closer to heading at the home base
fn steer(driver: &Driver) -> Option<KeyCode> {
    let arena = driver.arena();
    let robot = arena.robot();
    let to_home = arena.home_base().position() - robot.position();
    let target = direction_degrees(to_home);

    // Signed difference in (-180, 180]
    let mut diff = target - robot.heading_angle();
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }

    if diff.abs() >= HEADING_STEP_DEG {
        Some(if diff > 0.0 { KeyCode::RIGHT } else { KeyCode::LEFT })
    } else if robot.speed() < robot.max_speed() {
        Some(KeyCode::UP)
    } else {
        None
    }
}

fn main() {
    env_logger::init();
    log::info!("Robot Arena (headless) starting...");

    let params = match load_params() {
        Ok(params) => params,
        Err(e) => {
            log::error!("Bad arena parameters: {}", e);
            std::process::exit(1);
        }
    };
    let mut driver = match Driver::new(&params) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Cannot build arena: {}", e);
            std::process::exit(1);
        }
    };

    for frame in 0..MAX_FRAMES {
        if frame % STEER_INTERVAL == 0 {
            if let Some(key) = steer(&driver) {
                driver.accept(&Event::Keypress(key));
            }
        }
        driver.update(FRAME_DT);

        if frame % 600 == 0 {
            let robot = driver.arena().robot();
            log::info!(
                "t={:.1} {} at ({:.1}, {:.1}) heading {:.0} speed {:.0} {}",
                driver.arena().elapsed(),
                robot.name(),
                robot.position().x,
                robot.position().y,
                robot.heading_angle(),
                robot.speed(),
                robot.battery_status()
            );
        }
        if driver.arena().phase().is_terminal() {
            break;
        }
    }

    let arena = driver.arena();
    println!(
        "{} (t={:.1}, collisions={}, {})",
        driver.status_text(),
        arena.elapsed(),
        arena.collisions(),
        arena.robot().battery_status()
    );
}
