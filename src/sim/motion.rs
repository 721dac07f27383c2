//! Robot motion: command handling and kinematic integration
//!
//! `RobotMotionHandler` owns the (heading, speed) state and changes it in
//! response to user commands and touch-sensor readings.
//! `RobotMotionBehavior` turns that state into a position change.

use serde::{Deserialize, Serialize};

use super::event::Command;
use super::sensor::SensorTouch;
use crate::consts::{HEADING_STEP_DEG, SPEED_STEP};
use crate::{Position, heading_vector, normalize_degrees};

/// Heading/speed state machine bounded by `max_speed`
///
/// Heading is in degrees, always in [0, 360). Speed is always in
/// [0, max_speed].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotMotionHandler {
    heading_angle: f32,
    speed: f32,
    max_speed: f32,
}

impl Default for RobotMotionHandler {
    fn default() -> Self {
        Self::new(crate::consts::ROBOT_MAX_SPEED)
    }
}

impl RobotMotionHandler {
    pub fn new(max_speed: f32) -> Self {
        Self {
            heading_angle: 0.0,
            speed: 0.0,
            max_speed: max_speed.max(0.0),
        }
    }

    /// Apply a user command
    pub fn accept_command(&mut self, cmd: Command) {
        match cmd {
            Command::TurnLeft => {
                self.heading_angle -= HEADING_STEP_DEG;
                if self.heading_angle < 0.0 {
                    self.heading_angle += 360.0;
                }
            }
            Command::TurnRight => {
                self.heading_angle += HEADING_STEP_DEG;
                if self.heading_angle >= 360.0 {
                    self.heading_angle -= 360.0;
                }
            }
            Command::SpeedUp => {
                self.speed = (self.speed + SPEED_STEP).min(self.max_speed);
            }
            Command::SlowDown => {
                self.speed = (self.speed - SPEED_STEP).max(0.0);
            }
        }
        // Guards against float drift at the wrap point
        self.heading_angle = normalize_degrees(self.heading_angle);
    }

    /// Bounce off whatever the touch sensor reports; speed is unchanged
    pub fn update_velocity(&mut self, touch: &SensorTouch) {
        if touch.activated() {
            self.heading_angle = normalize_degrees(-touch.angle_of_contact());
        }
    }

    /// Back to the un-commanded state (max speed is kept)
    pub fn reset(&mut self) {
        self.heading_angle = 0.0;
        self.speed = 0.0;
    }

    pub fn heading_angle(&self) -> f32 {
        self.heading_angle
    }

    pub fn set_heading_angle(&mut self, degrees: f32) {
        self.heading_angle = normalize_degrees(degrees);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(0.0, self.max_speed);
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}

/// Integrates heading and speed into a position delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotMotionBehavior;

impl RobotMotionBehavior {
    /// Position change over `dt` for the given heading (degrees) and speed
    #[inline]
    pub fn delta(&self, heading_angle: f32, speed: f32, dt: f32) -> Position {
        heading_vector(heading_angle) * (speed * dt)
    }

    /// Move `position` one timestep along the handler's heading
    pub fn update_position(&self, position: &mut Position, handler: &RobotMotionHandler, dt: f32) {
        *position += self.delta(handler.heading_angle(), handler.speed(), dt);
    }
}
