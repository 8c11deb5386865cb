//! Kinematics category

pub mod projectile;

pub const CATEGORY: &str = "Kinematics";
