//! Touch sensing between the robot and obstacles or arena walls
//!
//! Contact is inclusive: circles at exactly the sum of their radii touch, and
//! a robot whose edge sits exactly on a wall touches it. Only one contact is
//! reported per check. Candidates are scanned in a fixed order: obstacles by
//! index, then the left, right, top and bottom walls. The first contact the
//! robot is driving into wins over any it is touching while moving away.

use glam::Vec2;

use super::entity::{ArenaEntity, Obstacle};
use crate::{Position, direction_degrees, heading_vector, normalize_degrees};

/// Arena wall identifiers, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// x = 0
    Left,
    /// x = x_dim
    Right,
    /// y = 0
    Top,
    /// y = y_dim
    Bottom,
}

/// What the robot touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSource {
    /// Obstacle at this index in the arena's obstacle list
    Obstacle(usize),
    Wall(Wall),
}

/// Result of a touch-sensor check
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTouch {
    activated: bool,
    source: Option<ContactSource>,
    /// Contact point on the robot's edge
    point_of_contact: Position,
    /// Direction from robot center to the contact point (degrees)
    contact_direction: f32,
    /// Heading measured against the contact normal; its negation is the
    /// heading the robot should leave with
    angle_of_contact: f32,
    /// Unit normal pointing from the contact surface toward the robot center
    normal: Vec2,
    /// Overlap depth (0 at exact touch)
    penetration: f32,
    /// Robot was moving (speed > 0) into the contact surface
    approaching: bool,
}

impl Default for SensorTouch {
    fn default() -> Self {
        Self::inactive()
    }
}

impl SensorTouch {
    pub fn inactive() -> Self {
        Self {
            activated: false,
            source: None,
            point_of_contact: Position::ZERO,
            contact_direction: 0.0,
            angle_of_contact: 0.0,
            normal: Vec2::ZERO,
            penetration: 0.0,
            approaching: false,
        }
    }

    /// An activated reading carrying only an angle of contact
    pub fn with_angle(angle_of_contact: f32) -> Self {
        Self {
            activated: true,
            angle_of_contact: normalize_degrees(angle_of_contact),
            approaching: true,
            ..Self::inactive()
        }
    }

    /// Scan obstacles then walls for contact with the robot's circle
    ///
    /// The first contact the robot is moving into wins. When it is moving
    /// into none of them, the first contact in scan order is reported.
    pub fn check(
        robot_pos: Position,
        robot_radius: f32,
        heading_angle: f32,
        speed: f32,
        obstacles: &[Obstacle],
        x_dim: f32,
        y_dim: f32,
    ) -> Self {
        let obstacle_contacts = obstacles.iter().enumerate().filter_map(|(index, obstacle)| {
            let offset = robot_pos - obstacle.position();
            let dist = offset.length();
            let reach = robot_radius + obstacle.radius();
            if dist > reach {
                return None;
            }
            // Coincident centers: treat the obstacle as dead ahead
            let normal = if dist > 0.0 {
                offset / dist
            } else {
                -heading_vector(heading_angle)
            };
            Some((ContactSource::Obstacle(index), normal, reach - dist))
        });

        let walls = [
            (Wall::Left, Vec2::X, robot_radius - robot_pos.x),
            (Wall::Right, Vec2::NEG_X, robot_pos.x + robot_radius - x_dim),
            (Wall::Top, Vec2::Y, robot_radius - robot_pos.y),
            (Wall::Bottom, Vec2::NEG_Y, robot_pos.y + robot_radius - y_dim),
        ];
        let wall_contacts = walls
            .into_iter()
            .filter(|&(_, _, penetration)| penetration >= 0.0)
            .map(|(wall, normal, penetration)| (ContactSource::Wall(wall), normal, penetration));

        let mut first = None;
        for (source, normal, penetration) in obstacle_contacts.chain(wall_contacts) {
            let touch = Self::contact(
                source,
                robot_pos,
                robot_radius,
                heading_angle,
                speed > 0.0,
                normal,
                penetration,
            );
            if touch.approaching {
                return touch;
            }
            if first.is_none() {
                first = Some(touch);
            }
        }

        first.unwrap_or_else(Self::inactive)
    }

    fn contact(
        source: ContactSource,
        robot_pos: Position,
        robot_radius: f32,
        heading_angle: f32,
        moving: bool,
        normal: Vec2,
        penetration: f32,
    ) -> Self {
        let contact_direction = direction_degrees(-normal);
        let approaching = moving && heading_vector(heading_angle).dot(normal) < 0.0;
        // Mirror the heading off the contact surface. A robot at rest or
        // already moving away keeps its heading.
        let outgoing = if approaching {
            2.0 * contact_direction + 180.0 - heading_angle
        } else {
            heading_angle
        };
        Self {
            activated: true,
            source: Some(source),
            point_of_contact: robot_pos - normal * robot_radius,
            contact_direction,
            angle_of_contact: normalize_degrees(-outgoing),
            normal,
            penetration: penetration.max(0.0),
            approaching,
        }
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn source(&self) -> Option<ContactSource> {
        self.source
    }

    pub fn point_of_contact(&self) -> Position {
        self.point_of_contact
    }

    pub fn contact_direction(&self) -> f32 {
        self.contact_direction
    }

    pub fn angle_of_contact(&self) -> f32 {
        self.angle_of_contact
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn penetration(&self) -> f32 {
        self.penetration
    }

    pub fn approaching(&self) -> bool {
        self.approaching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::Color;

    const X_DIM: f32 = 500.0;
    const Y_DIM: f32 = 400.0;

    fn obstacle(x: f32, y: f32, radius: f32) -> Obstacle {
        Obstacle::new(radius, Position::new(x, y), Color::BLACK)
    }

    #[test]
    fn test_no_contact_in_open_space() {
        let touch = SensorTouch::check(Position::new(250.0, 200.0), 10.0, 0.0, 1.0, &[], X_DIM, Y_DIM);
        assert!(!touch.activated());
        assert_eq!(touch.source(), None);
    }

    #[test]
    fn test_exact_touch_activates() {
        // Distance 30 == 10 + 20
        let obstacles = [obstacle(130.0, 100.0, 20.0)];
        let touch = SensorTouch::check(Position::new(100.0, 100.0), 10.0, 0.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert!(touch.activated());
        assert_eq!(touch.source(), Some(ContactSource::Obstacle(0)));
        assert_eq!(touch.penetration(), 0.0);
        assert_eq!(touch.point_of_contact(), Position::new(110.0, 100.0));
        assert!(touch.contact_direction().abs() < 1e-4);
    }

    #[test]
    fn test_just_apart_does_not_activate() {
        let obstacles = [obstacle(130.5, 100.0, 20.0)];
        let touch = SensorTouch::check(Position::new(100.0, 100.0), 10.0, 0.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert!(!touch.activated());
    }

    #[test]
    fn test_lowest_index_obstacle_wins() {
        let obstacles = [
            obstacle(300.0, 300.0, 10.0),
            obstacle(115.0, 100.0, 10.0),
            obstacle(85.0, 100.0, 10.0),
        ];
        let touch = SensorTouch::check(Position::new(100.0, 100.0), 10.0, 0.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Obstacle(1)));
    }

    #[test]
    fn test_obstacle_before_wall() {
        // Driving down-left into the left wall and an obstacle below
        let obstacles = [obstacle(10.0, 115.0, 10.0)];
        let touch = SensorTouch::check(Position::new(10.0, 100.0), 10.0, 135.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Obstacle(0)));
        assert!(touch.approaching());
    }

    #[test]
    fn test_wall_ahead_beats_obstacle_behind() {
        // Overlapping an obstacle while driving into the right wall
        let obstacles = [obstacle(470.0, 200.0, 15.0)];
        let touch = SensorTouch::check(Position::new(490.5, 200.0), 10.0, 0.0, 5.0, &obstacles, X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Right)));
        assert!(touch.approaching());
        assert!((normalize_degrees(-touch.angle_of_contact()) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_first_contact_reported_when_moving_away_from_all() {
        // Top-left corner, heading out of it
        let touch = SensorTouch::check(Position::new(10.0, 10.0), 10.0, 45.0, 5.0, &[], X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Left)));
        assert!(!touch.approaching());
        assert!((normalize_degrees(-touch.angle_of_contact()) - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_stationary_robot_does_not_approach() {
        let touch = SensorTouch::check(Position::new(495.0, 200.0), 10.0, 0.0, 0.0, &[], X_DIM, Y_DIM);
        assert!(touch.activated());
        assert!(!touch.approaching());
        assert!(normalize_degrees(-touch.angle_of_contact()).abs() < 1e-3);
    }

    #[test]
    fn test_wall_order_in_corner() {
        // Bottom-right corner: right wall is scanned before bottom
        let touch = SensorTouch::check(Position::new(495.0, 395.0), 10.0, 45.0, 1.0, &[], X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Right)));

        // Top-left corner: left wall first
        let touch = SensorTouch::check(Position::new(5.0, 5.0), 10.0, 225.0, 1.0, &[], X_DIM, Y_DIM);
        assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Left)));
    }

    #[test]
    fn test_wall_exact_touch_activates() {
        let touch = SensorTouch::check(Position::new(250.0, 390.0), 10.0, 90.0, 1.0, &[], X_DIM, Y_DIM);
        assert!(touch.activated());
        assert_eq!(touch.source(), Some(ContactSource::Wall(Wall::Bottom)));
        assert!((touch.contact_direction() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_head_on_wall_reverses_heading() {
        let touch = SensorTouch::check(Position::new(495.0, 200.0), 10.0, 0.0, 1.0, &[], X_DIM, Y_DIM);
        assert!(touch.approaching());
        // -angle_of_contact is the outgoing heading
        assert!((normalize_degrees(-touch.angle_of_contact()) - 180.0).abs() < 1e-3);
        assert!((touch.penetration() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_glancing_bottom_wall_mirrors_heading() {
        let touch = SensorTouch::check(Position::new(250.0, 395.0), 10.0, 80.0, 1.0, &[], X_DIM, Y_DIM);
        let outgoing = normalize_degrees(-touch.angle_of_contact());
        assert!((outgoing - 280.0).abs() < 1e-3, "outgoing {}", outgoing);
    }

    #[test]
    fn test_moving_away_keeps_heading() {
        // Touching the right wall while heading left
        let touch = SensorTouch::check(Position::new(490.0, 200.0), 10.0, 180.0, 1.0, &[], X_DIM, Y_DIM);
        assert!(touch.activated());
        assert!(!touch.approaching());
        let outgoing = normalize_degrees(-touch.angle_of_contact());
        assert!((outgoing - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_centers() {
        let obstacles = [obstacle(100.0, 100.0, 5.0)];
        let touch = SensorTouch::check(Position::new(100.0, 100.0), 10.0, 90.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert!(touch.activated());
        assert!(touch.approaching());
        assert_eq!(touch.penetration(), 15.0);
    }

    #[test]
    fn test_zero_radius_entities_touch_when_coincident() {
        let obstacles = [obstacle(100.0, 100.0, 0.0)];
        let touch = SensorTouch::check(Position::new(100.0, 100.0), 0.0, 0.0, 1.0, &obstacles, X_DIM, Y_DIM);
        assert!(touch.activated());
    }
}
