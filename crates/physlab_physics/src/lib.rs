//! Physics for the PhysLab demos
//!
//! Each module backs one simulation unit:
//! - [`kinematics`] - closed-form projectile motion and a per-frame flight
//! - [`gravitation`] - a planet and independent spacecraft (slingshot)
//! - [`fluid`] - a buoyant smoke plume on staggered Eulerian grids

pub mod fluid;
pub mod gravitation;
pub mod kinematics;

// Re-export commonly used types
pub use fluid::{Extrapolation, Grid, PlumeConfig, SmokePlume, StaggeredVelocity};
pub use gravitation::{Planet, ShipFate, ShipKey, SlingshotConfig, SlingshotWorld, Spacecraft};
pub use kinematics::{is_launch_angle, Flight, FlightConfig, Projectile, EARTH_GRAVITY};
