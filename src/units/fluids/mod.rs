//! Fluids category

pub mod smoke_plume;

pub const CATEGORY: &str = "fluids";
