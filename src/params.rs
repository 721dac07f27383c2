//! Arena construction parameters
//!
//! Loaded from JSON (every field has a default) and validated before an
//! arena is built. Validation fails fast: nothing is clamped into range.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Position;
use crate::consts::*;
use crate::sim::color::Color;

/// Configuration errors reported at arena construction
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive and finite, got {x_dim} x {y_dim}")]
    BadDimensions { x_dim: f32, y_dim: f32 },
    #[error("{entity} radius must be non-negative and finite, got {radius}")]
    BadRadius { entity: String, radius: f32 },
    #[error("{entity} position ({x}, {y}) is outside the arena")]
    OutOfBounds { entity: String, x: f32, y: f32 },
    #[error("robot of radius {radius} at ({x}, {y}) does not fit inside the arena")]
    RobotOutside { x: f32, y: f32, radius: f32 },
    #[error("robot starts overlapping obstacle {obstacle}")]
    RobotOverlap { obstacle: usize },
    #[error("robot {field} must be non-negative and finite, got {value}")]
    BadRobotValue { field: &'static str, value: f32 },
    #[error("random obstacle radius range [{min}, {max}] is invalid")]
    BadRadiusRange { min: f32, max: f32 },
    #[error("could not place random obstacle {index} without overlap after {attempts} attempts")]
    Placement { index: u32, attempts: u32 },
    #[error("invalid arena parameters JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read arena parameters: {0}")]
    Io(#[from] std::io::Error),
}

/// Position, size and color of an immobile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityParams {
    pub position: Position,
    pub radius: f32,
    #[serde(default)]
    pub color: Color,
}

impl EntityParams {
    pub fn new(position: Position, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }
}

/// Robot start state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    pub position: Position,
    pub radius: f32,
    pub color: Color,
    /// Initial heading (degrees)
    pub heading_angle: f32,
    pub max_speed: f32,
    pub battery_max_charge: f32,
    /// Charge lost per time unit
    pub battery_decay_rate: f32,
    /// Charge lost per collision
    pub collision_penalty: f32,
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            position: Position::new(100.0, DEFAULT_Y_DIM / 2.0),
            radius: ROBOT_RADIUS,
            color: Color::rgb(0, 0, 255),
            heading_angle: 0.0,
            max_speed: ROBOT_MAX_SPEED,
            battery_max_charge: BATTERY_MAX_CHARGE,
            battery_decay_rate: BATTERY_DECAY_RATE,
            collision_penalty: COLLISION_PENALTY,
        }
    }
}

/// Seeded random obstacle layout, added after the explicit obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomObstacles {
    pub count: u32,
    pub min_radius: f32,
    pub max_radius: f32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub color: Color,
}

/// Everything needed to build (and rebuild) an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaParams {
    pub x_dim: f32,
    pub y_dim: f32,
    pub robot: RobotParams,
    pub home_base: EntityParams,
    /// Obstacles at fixed positions
    pub obstacles: Vec<EntityParams>,
    pub random_obstacles: Option<RandomObstacles>,
}

impl Default for ArenaParams {
    fn default() -> Self {
        let obstacle_color = Color::rgb(255, 0, 0);
        Self {
            x_dim: DEFAULT_X_DIM,
            y_dim: DEFAULT_Y_DIM,
            robot: RobotParams::default(),
            home_base: EntityParams::new(
                Position::new(DEFAULT_X_DIM - 100.0, DEFAULT_Y_DIM / 2.0),
                HOME_BASE_RADIUS,
                Color::rgb(0, 255, 0),
            ),
            obstacles: vec![
                EntityParams::new(Position::new(300.0, 200.0), 40.0, obstacle_color),
                EntityParams::new(Position::new(512.0, 384.0), 60.0, obstacle_color),
                EntityParams::new(Position::new(700.0, 550.0), 30.0, obstacle_color),
                EntityParams::new(Position::new(750.0, 250.0), 50.0, obstacle_color),
            ],
            random_obstacles: None,
        }
    }
}

impl ArenaParams {
    /// Parse and validate parameters from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: ArenaParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON parameter file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every value the arena depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.x_dim.is_finite() && self.y_dim.is_finite() && self.x_dim > 0.0 && self.y_dim > 0.0) {
            return Err(ConfigError::BadDimensions {
                x_dim: self.x_dim,
                y_dim: self.y_dim,
            });
        }

        self.check_entity("robot", self.robot.position, self.robot.radius)?;
        self.check_entity("home base", self.home_base.position, self.home_base.radius)?;
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            self.check_entity(&format!("obstacle {}", i), obstacle.position, obstacle.radius)?;
        }

        let robot = &self.robot;
        let (pos, r) = (robot.position, robot.radius);
        if pos.x - r < 0.0 || pos.x + r > self.x_dim || pos.y - r < 0.0 || pos.y + r > self.y_dim {
            return Err(ConfigError::RobotOutside {
                x: pos.x,
                y: pos.y,
                radius: r,
            });
        }
        // Touching is fine; overlapping is not
        if let Some(obstacle) = self
            .obstacles
            .iter()
            .position(|o| pos.distance(o.position) < r + o.radius)
        {
            return Err(ConfigError::RobotOverlap { obstacle });
        }

        for (field, value) in [
            ("max_speed", robot.max_speed),
            ("battery_max_charge", robot.battery_max_charge),
            ("battery_decay_rate", robot.battery_decay_rate),
            ("collision_penalty", robot.collision_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadRobotValue { field, value });
            }
        }
        if !robot.heading_angle.is_finite() {
            return Err(ConfigError::BadRobotValue {
                field: "heading_angle",
                value: robot.heading_angle,
            });
        }

        if let Some(random) = &self.random_obstacles {
            let valid = random.min_radius.is_finite()
                && random.max_radius.is_finite()
                && random.min_radius >= 0.0
                && random.min_radius <= random.max_radius;
            if !valid {
                return Err(ConfigError::BadRadiusRange {
                    min: random.min_radius,
                    max: random.max_radius,
                });
            }
        }

        Ok(())
    }

    fn check_entity(&self, entity: &str, position: Position, radius: f32) -> Result<(), ConfigError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::BadRadius {
                entity: entity.to_string(),
                radius,
            });
        }
        let inside = position.is_finite()
            && (0.0..=self.x_dim).contains(&position.x)
            && (0.0..=self.y_dim).contains(&position.y);
        if !inside {
            return Err(ConfigError::OutOfBounds {
                entity: entity.to_string(),
                x: position.x,
                y: position.y,
            });
        }
        Ok(())
    }
}
