//! 2D Mathematics Library
//!
//! Small vector and angle toolkit shared by the PhysLab simulations.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components (screen space, y down)
//!
//! ## Helpers
//!
//! - [`angle::aim_angle`] - angle of a pointer relative to an origin
//! - [`angle::point_on_circle`] - polar to screen coordinates
//! - [`angle::round_to`] - fixed decimal rounding used for displayed values

mod vec2;
pub mod angle;

pub use vec2::Vec2;
pub use angle::{aim_angle, gradient, point_on_circle, round_to};
