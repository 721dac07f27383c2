//! The arena: entity ownership and the per-timestep pipeline
//!
//! `advance_time` runs, in order:
//! 1. `timestep_update` on every entity (only the robot moves)
//! 2. battery decay
//! 3. touch sensing against obstacles and walls, then collision response
//!    (push out of the overlap, keep inside the walls, bounce, collision
//!    penalty)
//! 4. win/lose checks
//!
//! The whole pass runs before control returns, so callers never observe a
//! partially advanced arena.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{ArenaEntity, EntityNamer, HomeBase, Obstacle, circles_touch};
use super::event::{Command, CommandError, Event};
use super::robot::Robot;
use super::sensor::SensorTouch;
use crate::Position;
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::params::{ArenaParams, ConfigError, RandomObstacles};

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaPhase {
    /// Still playing
    Running,
    /// Robot reached the home base
    Won,
    /// Battery ran out
    Lost,
}

impl ArenaPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ArenaPhase::Running)
    }
}

/// A bounded arena owning one robot, its obstacles and the home base
#[derive(Debug, Clone)]
pub struct Arena {
    params: ArenaParams,
    x_dim: f32,
    y_dim: f32,
    robot: Robot,
    obstacles: Vec<Obstacle>,
    home_base: HomeBase,
    phase: ArenaPhase,
    /// Simulated time so far
    elapsed: f32,
    /// Collisions where the robot was driving into something
    collisions: u32,
}

impl Arena {
    /// Validate `params` and build an arena from them
    pub fn new(params: &ArenaParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let arena = Self::build(params.clone())?;
        log::info!(
            "Arena {}x{} built with {} obstacles",
            arena.x_dim,
            arena.y_dim,
            arena.obstacles.len()
        );
        Ok(arena)
    }

    fn build(params: ArenaParams) -> Result<Self, ConfigError> {
        let mut namer = EntityNamer::new();
        let robot = Robot::with_namer(&mut namer, &params.robot);

        let mut obstacles: Vec<Obstacle> = params
            .obstacles
            .iter()
            .map(|o| Obstacle::with_namer(&mut namer, o.radius, o.position, o.color))
            .collect();

        let home_base = HomeBase::with_namer(
            &mut namer,
            params.home_base.radius,
            params.home_base.position,
            params.home_base.color,
        );

        if let Some(random) = &params.random_obstacles {
            place_random_obstacles(&params, random, &robot, &home_base, &mut namer, &mut obstacles)?;
        }

        Ok(Self {
            x_dim: params.x_dim,
            y_dim: params.y_dim,
            params,
            robot,
            obstacles,
            home_base,
            phase: ArenaPhase::Running,
            elapsed: 0.0,
            collisions: 0,
        })
    }

    /// Throw this arena away and rebuild it from the saved parameters
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        *self = Self::build(self.params.clone())?;
        log::info!("Arena restarted");
        Ok(())
    }

    /// Advance the whole arena by `dt` time units
    ///
    /// Negative or non-finite `dt` is ignored.
    pub fn advance_time(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid timestep {}", dt);
            return;
        }

        for entity in self.entities_mut() {
            entity.timestep_update(dt);
        }

        let decay = self.params.robot.battery_decay_rate * dt;
        self.robot.battery_mut().deplete(decay);

        let touch = SensorTouch::check(
            self.robot.position(),
            self.robot.radius(),
            self.robot.heading_angle(),
            self.robot.speed(),
            &self.obstacles,
            self.x_dim,
            self.y_dim,
        );
        if touch.activated() {
            self.robot.resolve_penetration(&touch);
            // Only one contact is resolved per step; a second wall in a
            // corner is handled by clamping
            self.robot.keep_inside(self.x_dim, self.y_dim);
            if touch.approaching() {
                self.collisions += 1;
                self.robot
                    .battery_mut()
                    .deplete(self.params.robot.collision_penalty);
                log::debug!(
                    "{} hit {:?} at {:.1} degrees",
                    self.robot.name(),
                    touch.source(),
                    touch.contact_direction()
                );
            }
        }
        self.robot.handle_touch(touch);

        self.elapsed += dt;
        self.update_phase();
    }

    fn update_phase(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        if self.hit_home() {
            self.phase = ArenaPhase::Won;
            log::info!("{} reached {} after {:.2}", self.robot.name(), self.home_base.name(), self.elapsed);
        } else if self.is_empty() {
            self.phase = ArenaPhase::Lost;
            log::info!("{} ran out of battery after {:.2}", self.robot.name(), self.elapsed);
        }
    }

    /// Dispatch an input event to the robot
    ///
    /// Keypresses without a mapping are ignored.
    pub fn accept(&mut self, event: &Event) {
        match event {
            Event::Command(cmd) => self.robot.accept_command(*cmd),
            Event::Keypress(key) => match key.to_command() {
                Some(cmd) => self.robot.accept_command(cmd),
                None => log::trace!("Ignoring unmapped key {}", key.0),
            },
        }
    }

    /// Dispatch a raw command code
    pub fn accept_command_code(&mut self, code: i32) -> Result<(), CommandError> {
        let cmd = Command::try_from(code)?;
        self.robot.accept_command(cmd);
        Ok(())
    }

    /// True once the robot's battery is exhausted
    pub fn is_empty(&self) -> bool {
        self.robot.battery().is_empty()
    }

    /// True while the robot touches the home base
    pub fn hit_home(&self) -> bool {
        self.robot.touches(&self.home_base)
    }

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn home_base(&self) -> &HomeBase {
        &self.home_base
    }

    /// Every entity: robot, obstacles in order, then the home base
    pub fn entities(&self) -> impl Iterator<Item = &dyn ArenaEntity> {
        std::iter::once(&self.robot as &dyn ArenaEntity)
            .chain(self.obstacles.iter().map(|o| o as &dyn ArenaEntity))
            .chain(std::iter::once(&self.home_base as &dyn ArenaEntity))
    }

    fn entities_mut(&mut self) -> impl Iterator<Item = &mut dyn ArenaEntity> {
        std::iter::once(&mut self.robot as &mut dyn ArenaEntity)
            .chain(self.obstacles.iter_mut().map(|o| o as &mut dyn ArenaEntity))
            .chain(std::iter::once(&mut self.home_base as &mut dyn ArenaEntity))
    }

    pub fn x_dim(&self) -> f32 {
        self.x_dim
    }

    pub fn y_dim(&self) -> f32 {
        self.y_dim
    }

    pub fn params(&self) -> &ArenaParams {
        &self.params
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn collisions(&self) -> u32 {
        self.collisions
    }
}

/// Append `random.count` obstacles that stay inside the walls and overlap
/// nothing placed before them
fn place_random_obstacles(
    params: &ArenaParams,
    random: &RandomObstacles,
    robot: &Robot,
    home_base: &HomeBase,
    namer: &mut EntityNamer,
    obstacles: &mut Vec<Obstacle>,
) -> Result<(), ConfigError> {
    let mut rng = Pcg32::seed_from_u64(random.seed);

    for index in 0..random.count {
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let radius = if random.min_radius < random.max_radius {
                rng.random_range(random.min_radius..=random.max_radius)
            } else {
                random.min_radius
            };
            let x = rng.random_range(0.0..=params.x_dim);
            let y = rng.random_range(0.0..=params.y_dim);
            let position = Position::new(x, y);

            let inside = x - radius >= 0.0
                && x + radius <= params.x_dim
                && y - radius >= 0.0
                && y + radius <= params.y_dim;
            let clear = inside
                && !circles_touch(position, radius, robot.position(), robot.radius())
                && !circles_touch(position, radius, home_base.position(), home_base.radius())
                && obstacles
                    .iter()
                    .all(|o| !circles_touch(position, radius, o.position(), o.radius()));
            if clear {
                placed = Some((position, radius));
                break;
            }
        }

        let Some((position, radius)) = placed else {
            return Err(ConfigError::Placement {
                index,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            });
        };
        obstacles.push(Obstacle::with_namer(namer, radius, position, random.color));
    }

    Ok(())
}
