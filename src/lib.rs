//! Robot Arena - a bounded 2D arena with one keyboard-driven robot
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion, touch sensing, arena pipeline)
//! - `params`: Arena parameter bundle (serde/JSON) and validation
//! - `driver`: Headless frame driver (time accumulation, pause, restart)

pub mod driver;
pub mod params;
pub mod sim;

pub use driver::Driver;
pub use params::{ArenaParams, ConfigError};

use glam::Vec2;

/// A point in arena space
pub type Position = Vec2;

/// Simulation constants
pub mod consts {
    /// Minimum accumulated frame time before the driver advances the arena
    pub const MIN_SIM_STEP: f32 = 0.05;

    /// Heading change per turn command (degrees)
    pub const HEADING_STEP_DEG: f32 = 10.0;
    /// Speed change per speed-up/slow-down command
    pub const SPEED_STEP: f32 = 1.0;

    /// Arena defaults
    pub const DEFAULT_X_DIM: f32 = 1024.0;
    pub const DEFAULT_Y_DIM: f32 = 768.0;

    /// Robot defaults
    pub const ROBOT_RADIUS: f32 = 20.0;
    pub const ROBOT_MAX_SPEED: f32 = 10.0;
    pub const BATTERY_MAX_CHARGE: f32 = 100.0;
    /// Charge lost per time unit
    pub const BATTERY_DECAY_RATE: f32 = 1.0;
    /// Charge lost per contact with an obstacle or wall
    pub const COLLISION_PENALTY: f32 = 5.0;

    /// Home base defaults
    pub const HOME_BASE_RADIUS: f32 = 25.0;

    /// Random obstacle placement gives up after this many tries per obstacle
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading given in degrees
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Direction of a vector in degrees, normalized to [0, 360)
#[inline]
pub fn direction_degrees(v: Vec2) -> f32 {
    normalize_degrees(v.y.atan2(v.x).to_degrees())
}
