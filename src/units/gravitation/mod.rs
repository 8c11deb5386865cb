//! Gravitation category

pub mod gravitational_slingshot;

pub const CATEGORY: &str = "gravitation";
