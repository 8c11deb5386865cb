//! Gravitational slingshot
//!
//! A single fixed planet pulls on any number of spacecraft. Ships do not
//! interact with each other. Integration is per frame: accelerations are
//! added straight to velocities and velocities straight to positions, so all
//! constants are in "pixels per frame" units.

use physlab_math::Vec2;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to a spacecraft in a [`SlingshotWorld`]
    pub struct ShipKey;
}

/// Configuration for the slingshot world
#[derive(Clone, Debug, PartialEq)]
pub struct SlingshotConfig {
    /// Gravitational constant
    pub gravitational_constant: f32,
    /// Mass of the planet
    pub planet_mass: f32,
    /// Mass given to launched ships
    pub ship_mass: f32,
    /// Planet radius; ships closer than this are destroyed
    pub planet_radius: f32,
    /// Divisor applied to the drag vector when launching
    pub velocity_scale: f32,
    /// World extent (window size); ships leaving it are removed
    pub bounds: Vec2,
}

impl Default for SlingshotConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 5.0,
            planet_mass: 100.0,
            ship_mass: 5.0,
            planet_radius: 50.0,
            velocity_scale: 100.0,
            bounds: Vec2::new(800.0, 600.0),
        }
    }
}

/// The attracting body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub position: Vec2,
    pub mass: f32,
    pub radius: f32,
}

/// A ship moving freely under the planet's gravity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacecraft {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
}

impl Spacecraft {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// Acceleration toward `planet` for gravitational constant `g`
    ///
    /// `F = g·m·M / d²`, so `a = F / m`. A ship sitting exactly on the
    /// planet's centre feels no pull.
    pub fn acceleration_towards(&self, planet: &Planet, g: f32) -> Vec2 {
        let offset = planet.position - self.position;
        let distance_sq = offset.length_squared();
        if distance_sq == 0.0 {
            return Vec2::ZERO;
        }
        let force = g * self.mass * planet.mass / distance_sq;
        let acceleration = force / self.mass;
        Vec2::from_angle(offset.angle()) * acceleration
    }

    /// Apply one frame of gravity, then move
    pub fn advance(&mut self, planet: &Planet, g: f32) {
        self.velocity += self.acceleration_towards(planet, g);
        self.position += self.velocity;
    }
}

/// Why a ship was removed during a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipFate {
    /// Left the visible area
    LeftBounds,
    /// Came within the planet's radius
    Collided,
}

/// A planet plus the ships orbiting (or escaping) it
pub struct SlingshotWorld {
    config: SlingshotConfig,
    planet: Planet,
    ships: SlotMap<ShipKey, Spacecraft>,
}

impl SlingshotWorld {
    /// Create a world with the planet at the centre of the bounds
    pub fn new(config: SlingshotConfig) -> Self {
        let planet = Planet {
            position: config.bounds * 0.5,
            mass: config.planet_mass,
            radius: config.planet_radius,
        };
        Self {
            config,
            planet,
            ships: SlotMap::with_key(),
        }
    }

    pub fn config(&self) -> &SlingshotConfig {
        &self.config
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    /// Launch a ship placed at `placed` toward `aim`
    ///
    /// The initial velocity is the drag vector divided by the velocity scale.
    pub fn launch(&mut self, placed: Vec2, aim: Vec2) -> ShipKey {
        let velocity = (aim - placed) / self.config.velocity_scale;
        let ship = Spacecraft::new(placed, velocity, self.config.ship_mass);
        self.add_ship(ship)
    }

    /// Add an already-built ship and return its key
    pub fn add_ship(&mut self, ship: Spacecraft) -> ShipKey {
        self.ships.insert(ship)
    }

    pub fn get_ship(&self, key: ShipKey) -> Option<&Spacecraft> {
        self.ships.get(key)
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Iterate over all live ships
    pub fn ships(&self) -> impl Iterator<Item = (ShipKey, &Spacecraft)> + '_ {
        self.ships.iter()
    }

    /// Remove every ship
    pub fn clear(&mut self) {
        self.ships.clear();
    }

    /// Advance every ship by one frame
    ///
    /// Returns the ships removed during this step and why.
    pub fn step(&mut self) -> Vec<(ShipKey, ShipFate)> {
        let g = self.config.gravitational_constant;
        let planet = self.planet;
        let bounds = self.config.bounds;

        let mut removed = Vec::new();
        for (key, ship) in &mut self.ships {
            ship.advance(&planet, g);

            let p = ship.position;
            if p.x < 0.0 || p.x > bounds.x || p.y < 0.0 || p.y > bounds.y {
                removed.push((key, ShipFate::LeftBounds));
            } else if p.distance(planet.position) <= planet.radius {
                removed.push((key, ShipFate::Collided));
            }
        }

        for (key, _) in &removed {
            self.ships.remove(*key);
        }
        removed
    }
}
