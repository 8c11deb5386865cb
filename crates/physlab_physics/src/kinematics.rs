//! Projectile motion
//!
//! Closed-form results for a projectile launched from ground level with no
//! drag, plus a per-frame flight that traces the parabola across the screen.
//! Displayed values are rounded the same way they are shown to the user:
//! two decimals for times and distances, four for the trajectory coefficient.

use std::collections::VecDeque;

use physlab_math::{round_to, Vec2};

/// Standard gravity used by the kinematics demo (m/s²)
pub const EARTH_GRAVITY: f32 = 9.8;

/// Whether an aim angle (degrees, screen space) may be launched
///
/// Only pointers above and to the right of the origin produce a launch,
/// i.e. `-90 < theta <= 0`.
pub fn is_launch_angle(theta_deg: f32) -> bool {
    -90.0 < theta_deg && theta_deg <= 0.0
}

/// A projectile defined by its launch speed and elevation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    speed: f32,
    /// Elevation in radians, always non-negative
    theta: f32,
    gravity: f32,
}

impl Projectile {
    /// Create a projectile from speed (m/s) and launch angle (degrees)
    ///
    /// The sign of the angle is discarded: screen-space aim angles are
    /// negative when pointing up.
    pub fn new(speed: f32, angle_deg: f32, gravity: f32) -> Self {
        Self {
            speed,
            theta: angle_deg.abs().to_radians(),
            gravity,
        }
    }

    /// Projectile under [`EARTH_GRAVITY`]
    pub fn with_earth_gravity(speed: f32, angle_deg: f32) -> Self {
        Self::new(speed, angle_deg, EARTH_GRAVITY)
    }

    /// Launch speed (m/s)
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Launch elevation in degrees
    pub fn angle_degrees(&self) -> f32 {
        self.theta.to_degrees()
    }

    /// Time of flight `2·u·sin θ / g`, rounded to 2 decimals
    pub fn time_of_flight(&self) -> f32 {
        round_to(2.0 * self.speed * self.theta.sin() / self.gravity, 2)
    }

    /// Horizontal range `u²·2·sin θ·cos θ / g`, rounded to 2 decimals
    pub fn range(&self) -> f32 {
        let r = self.speed.powi(2) * 2.0 * self.theta.sin() * self.theta.cos() / self.gravity;
        round_to(r, 2)
    }

    /// Maximum height `u²·sin²θ / 2g`, rounded to 2 decimals
    pub fn max_height(&self) -> f32 {
        let h = self.speed.powi(2) * self.theta.sin().powi(2) / (2.0 * self.gravity);
        round_to(h, 2)
    }

    /// Coefficient `f` of the trajectory `y = x·tan θ − f·x²`, rounded to 4 decimals
    pub fn trajectory_coefficient(&self) -> f32 {
        round_to(
            self.gravity / (2.0 * self.speed.powi(2) * self.theta.cos().powi(2)),
            4,
        )
    }

    /// Height above the launch point after `x` metres of horizontal travel
    pub fn height_at(&self, x: f32) -> f32 {
        if x == 0.0 {
            return 0.0;
        }
        x * self.theta.tan() - self.trajectory_coefficient() * x * x
    }
}

/// Animation parameters for a [`Flight`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightConfig {
    /// Horizontal advance per frame, in pixels (1 m = 1 px)
    pub step: f32,
    /// Number of recent positions kept in the trail
    pub trail_length: usize,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            step: 2.0,
            trail_length: 50,
        }
    }
}

/// A projectile travelling across the screen one frame at a time
#[derive(Clone, Debug)]
pub struct Flight {
    projectile: Projectile,
    origin: Vec2,
    x: f32,
    dx: f32,
    end_x: f32,
    trail: VecDeque<Vec2>,
    trail_length: usize,
}

impl Flight {
    /// Start a flight from `origin` (screen coordinates)
    pub fn launch(projectile: Projectile, origin: Vec2, config: FlightConfig) -> Self {
        Self {
            projectile,
            origin,
            x: origin.x,
            dx: config.step,
            end_x: origin.x + projectile.range().abs(),
            trail: VecDeque::with_capacity(config.trail_length),
            trail_length: config.trail_length.max(1),
        }
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    /// Advance one frame and return the new screen position
    ///
    /// Once the projectile has reached its range it stays put.
    pub fn step(&mut self) -> Vec2 {
        if self.is_landed() {
            self.dx = 0.0;
        }
        self.x += self.dx;

        let height = self.projectile.height_at(self.x - self.origin.x);
        let position = Vec2::new(self.x, self.origin.y - height.abs());

        self.trail.push_back(position);
        while self.trail.len() > self.trail_length {
            self.trail.pop_front();
        }
        position
    }

    /// Whether the projectile has covered its full range
    pub fn is_landed(&self) -> bool {
        self.x >= self.end_x
    }

    /// Most recent position, if the flight has been stepped
    pub fn position(&self) -> Option<Vec2> {
        self.trail.back().copied()
    }

    /// Recent positions, oldest first
    pub fn trail(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.trail.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_forty_five_degree_launch() {
        let p = Projectile::with_earth_gravity(20.0, 45.0);
        assert!(approx(p.range(), 40.82), "range was {}", p.range());
        assert!(approx(p.time_of_flight(), 2.89), "time was {}", p.time_of_flight());
        assert!(approx(p.max_height(), 10.2), "height was {}", p.max_height());
        assert!(approx(p.trajectory_coefficient(), 0.0245));
    }

    #[test]
    fn test_negative_angle_uses_magnitude() {
        let up = Projectile::with_earth_gravity(20.0, 30.0);
        let screen = Projectile::with_earth_gravity(20.0, -30.0);
        assert_eq!(up, screen);
        assert!(approx(screen.angle_degrees(), 30.0));
    }

    #[test]
    fn test_complementary_angles_share_range() {
        let low = Projectile::with_earth_gravity(30.0, 30.0);
        let high = Projectile::with_earth_gravity(30.0, 60.0);
        assert!(approx(low.range(), high.range()));
        assert!(high.max_height() > low.max_height());
    }

    #[test]
    fn test_height_returns_to_ground_at_range() {
        let p = Projectile::with_earth_gravity(20.0, 45.0);
        assert_eq!(p.height_at(0.0), 0.0);
        assert!(p.height_at(p.range()).abs() < 0.05);
        let apex = p.height_at(p.range() / 2.0);
        assert!((apex - p.max_height()).abs() < 0.05);
    }

    #[test]
    fn test_launch_angle_window() {
        assert!(is_launch_angle(0.0));
        assert!(is_launch_angle(-45.0));
        assert!(is_launch_angle(-89.99));
        assert!(!is_launch_angle(-90.0));
        assert!(!is_launch_angle(10.0));
    }

    #[test]
    fn test_flight_stops_at_range() {
        let origin = Vec2::new(20.0, 340.0);
        let p = Projectile::with_earth_gravity(20.0, 45.0);
        let mut flight = Flight::launch(p, origin, FlightConfig::default());

        for _ in 0..100 {
            flight.step();
        }
        assert!(flight.is_landed());
        let landed = flight.position().unwrap();
        // 2 px steps overshoot the 40.82 m range by at most one step
        assert_eq!(landed.x, 62.0);
        assert!(landed.y <= origin.y);

        let before = flight.position();
        flight.step();
        assert_eq!(flight.position(), before);
    }

    #[test]
    fn test_flight_rises_above_origin() {
        let origin = Vec2::new(20.0, 340.0);
        let p = Projectile::with_earth_gravity(40.0, 60.0);
        let mut flight = Flight::launch(p, origin, FlightConfig::default());
        let pos = (0..20).map(|_| flight.step()).last().unwrap();
        assert_eq!(pos.x, 60.0);
        assert!(pos.y < origin.y, "screen y should decrease while climbing");
    }

    #[test]
    fn test_trail_is_bounded() {
        let config = FlightConfig {
            step: 2.0,
            trail_length: 10,
        };
        let p = Projectile::with_earth_gravity(50.0, 45.0);
        let mut flight = Flight::launch(p, Vec2::ZERO, config);
        for _ in 0..30 {
            flight.step();
        }
        assert_eq!(flight.trail().count(), 10);
        let xs: Vec<f32> = flight.trail().map(|v| v.x).collect();
        assert_eq!(xs.first(), Some(&42.0));
        assert_eq!(xs.last(), Some(&60.0));
    }

    #[test]
    fn test_zero_speed_never_moves() {
        let origin = Vec2::new(20.0, 340.0);
        let p = Projectile::with_earth_gravity(0.0, 45.0);
        let mut flight = Flight::launch(p, origin, FlightConfig::default());
        let pos = flight.step();
        assert_eq!(pos, origin);
        assert!(flight.is_landed());
    }
}
