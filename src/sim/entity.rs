//! Arena entities: shared contract, naming, and the immobile occupants
//!
//! Every occupant of the arena exposes a name, position, radius and color,
//! and advances once per timestep. Immobile entities (obstacles, the home
//! base) never move; the robot is the only mobile entity.

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::Position;

/// Concrete entity kinds, used for naming and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Robot,
    Obstacle,
    HomeBase,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Robot => "Robot",
            EntityKind::Obstacle => "Obstacle",
            EntityKind::HomeBase => "HomeBase",
        }
    }

    pub fn mobility(&self) -> Mobility {
        match self {
            EntityKind::Robot => Mobility::Mobile,
            EntityKind::Obstacle | EntityKind::HomeBase => Mobility::Immobile,
        }
    }

    fn index(&self) -> usize {
        match self {
            EntityKind::Robot => 0,
            EntityKind::Obstacle => 1,
            EntityKind::HomeBase => 2,
        }
    }
}

/// Whether an entity can change position during a timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mobility {
    Immobile,
    Mobile,
}

/// Hands out entity names as `<Kind><index>`, one counter per kind
///
/// A namer is a naming scope. Each arena owns one, so a rebuilt arena names
/// its entities exactly like the original. Entities constructed on their own
/// get a fresh scope and are always `<Kind>0`.
#[derive(Debug, Clone, Default)]
pub struct EntityNamer {
    counters: [u32; 3],
}

impl EntityNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next name for `kind`
    pub fn next_name(&mut self, kind: EntityKind) -> String {
        let counter = &mut self.counters[kind.index()];
        let name = format!("{}{}", kind.as_str(), counter);
        *counter += 1;
        name
    }

    /// Number of names handed out so far for `kind`
    pub fn issued(&self, kind: EntityKind) -> u32 {
        self.counters[kind.index()]
    }
}

/// Shared contract for everything that occupies the arena
pub trait ArenaEntity {
    fn name(&self) -> &str;
    fn position(&self) -> Position;
    fn radius(&self) -> f32;
    fn color(&self) -> Color;
    fn kind(&self) -> EntityKind;

    /// Advance this entity by `dt` time units
    fn timestep_update(&mut self, dt: f32);

    fn mobility(&self) -> Mobility {
        self.kind().mobility()
    }

    /// True if the two circles touch or overlap
    fn touches(&self, other: &dyn ArenaEntity) -> bool {
        circles_touch(self.position(), self.radius(), other.position(), other.radius())
    }
}

/// Contact test between two circles, inclusive of exact touch
#[inline]
pub fn circles_touch(a: Position, a_radius: f32, b: Position, b_radius: f32) -> bool {
    a.distance(b) <= a_radius + b_radius
}

/// An immobile obstacle the robot bounces off
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    name: String,
    position: Position,
    radius: f32,
    color: Color,
}

impl Obstacle {
    /// Create an obstacle in its own naming scope (always `Obstacle0`)
    pub fn new(radius: f32, position: Position, color: Color) -> Self {
        Self::with_namer(&mut EntityNamer::new(), radius, position, color)
    }

    /// Create an obstacle named from a shared scope
    pub fn with_namer(namer: &mut EntityNamer, radius: f32, position: Position, color: Color) -> Self {
        Self {
            name: namer.next_name(EntityKind::Obstacle),
            position,
            radius,
            color,
        }
    }
}

impl ArenaEntity for Obstacle {
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
        EntityKind::Obstacle
    }

    fn timestep_update(&mut self, _dt: f32) {}
}

/// The robot's goal; reaching it wins the game
#[derive(Debug, Clone, PartialEq)]
pub struct HomeBase {
    name: String,
    position: Position,
    radius: f32,
    color: Color,
}

impl HomeBase {
    /// Create a home base in its own naming scope (always `HomeBase0`)
    pub fn new(radius: f32, position: Position, color: Color) -> Self {
        Self::with_namer(&mut EntityNamer::new(), radius, position, color)
    }

    pub fn with_namer(namer: &mut EntityNamer, radius: f32, position: Position, color: Color) -> Self {
        Self {
            name: namer.next_name(EntityKind::HomeBase),
            position,
            radius,
            color,
        }
    }
}

impl ArenaEntity for HomeBase {
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
        EntityKind::HomeBase
    }

    fn timestep_update(&mut self, _dt: f32) {}
}
