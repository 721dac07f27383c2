//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Time only advances through `Arena::advance_time`
//! - Seeded RNG only (random obstacle layouts)
//! - Stable iteration order (robot, obstacles by index, home base)
//! - No rendering or platform dependencies

pub mod arena;
pub mod color;
pub mod entity;
pub mod event;
pub mod motion;
pub mod robot;
pub mod sensor;

pub use arena::{Arena, ArenaPhase};
pub use color::Color;
pub use entity::{ArenaEntity, EntityKind, EntityNamer, HomeBase, Mobility, Obstacle, circles_touch};
pub use event::{Command, CommandError, Event, KeyCode};
pub use motion::{RobotMotionBehavior, RobotMotionHandler};
pub use robot::{Battery, Robot};
pub use sensor::{ContactSource, SensorTouch, Wall};
