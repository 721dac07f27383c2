//! The robot: the arena's only mobile entity

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::entity::{ArenaEntity, EntityKind, EntityNamer};
use super::event::Command;
use super::motion::{RobotMotionBehavior, RobotMotionHandler};
use super::sensor::SensorTouch;
use crate::Position;
use crate::params::RobotParams;

/// Robot battery, drained linearly over time and on each collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    level: f32,
    max_charge: f32,
}

impl Battery {
    pub fn new(max_charge: f32) -> Self {
        let max_charge = max_charge.max(0.0);
        Self {
            level: max_charge,
            max_charge,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn max_charge(&self) -> f32 {
        self.max_charge
    }

    /// Remove charge, never going below zero
    pub fn deplete(&mut self, amount: f32) {
        if amount > 0.0 {
            self.level = (self.level - amount).max(0.0);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.level <= 0.0
    }

    pub fn recharge(&mut self) {
        self.level = self.max_charge;
    }
}

/// A differential-drive robot steered by discrete commands
#[derive(Debug, Clone)]
pub struct Robot {
    name: String,
    position: Position,
    radius: f32,
    color: Color,
    motion_handler: RobotMotionHandler,
    motion_behavior: RobotMotionBehavior,
    sensor_touch: SensorTouch,
    battery: Battery,
}

impl Robot {
    /// Create a robot in its own naming scope (always `Robot0`)
    pub fn new(params: &RobotParams) -> Self {
        Self::with_namer(&mut EntityNamer::new(), params)
    }

    pub fn with_namer(namer: &mut EntityNamer, params: &RobotParams) -> Self {
        let mut motion_handler = RobotMotionHandler::new(params.max_speed);
        motion_handler.set_heading_angle(params.heading_angle);
        Self {
            name: namer.next_name(EntityKind::Robot),
            position: params.position,
            radius: params.radius,
            color: params.color,
            motion_handler,
            motion_behavior: RobotMotionBehavior,
            sensor_touch: SensorTouch::inactive(),
            battery: Battery::new(params.battery_max_charge),
        }
    }

    pub fn accept_command(&mut self, cmd: Command) {
        log::debug!("{}: motion cmd {} received", self.name, cmd.as_str());
        self.motion_handler.accept_command(cmd);
    }

    /// Record a touch reading and bounce if it is active
    pub fn handle_touch(&mut self, touch: SensorTouch) {
        self.motion_handler.update_velocity(&touch);
        self.sensor_touch = touch;
    }

    /// Move the robot out of an overlap along the contact normal
    pub(crate) fn resolve_penetration(&mut self, touch: &SensorTouch) {
        if touch.activated() && touch.penetration() > 0.0 {
            self.position += touch.normal() * touch.penetration();
        }
    }

    /// Clamp the robot's circle inside a `x_dim` by `y_dim` box
    pub(crate) fn keep_inside(&mut self, x_dim: f32, y_dim: f32) {
        let r = self.radius;
        self.position.x = self.position.x.max(r).min(x_dim - r);
        self.position.y = self.position.y.max(r).min(y_dim - r);
    }

    /// Motion and battery back to their initial state; position is kept
    pub fn reset(&mut self) {
        self.motion_handler.reset();
        self.sensor_touch = SensorTouch::inactive();
        self.battery.recharge();
    }

    pub fn heading_angle(&self) -> f32 {
        self.motion_handler.heading_angle()
    }

    pub fn speed(&self) -> f32 {
        self.motion_handler.speed()
    }

    pub fn max_speed(&self) -> f32 {
        self.motion_handler.max_speed()
    }

    pub fn motion_handler(&self) -> &RobotMotionHandler {
        &self.motion_handler
    }

    /// Most recent touch reading
    pub fn sensor_touch(&self) -> &SensorTouch {
        &self.sensor_touch
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub(crate) fn battery_mut(&mut self) -> &mut Battery {
        &mut self.battery
    }

    pub fn battery_level(&self) -> f32 {
        self.battery.level()
    }

    /// Battery text for display
    pub fn battery_status(&self) -> String {
        format!("Battery: {:.1}", self.battery.level())
    }
}

impl ArenaEntity for Robot {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Robot
    }

    fn timestep_update(&mut self, dt: f32) {
        self.motion_behavior
            .update_position(&mut self.position, &self.motion_handler, dt);
    }
}
