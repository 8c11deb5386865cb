//! Catalog discovery and name-based dispatch for physlab
//!
//! - [`CatalogBuilder`] walks the simulations directory into a [`Catalog`]
//! - [`Registry`] maps `(category, unit)` names to entry points
//! - [`Dispatcher`] runs a chosen unit against the host

mod catalog;
mod dispatcher;
mod error;
mod registry;
mod thumbnail;

pub use catalog::{
    Catalog, CatalogBuilder, Category, SimulationDescriptor, SkippedUnit, DEFAULT_UNIT_EXTENSION,
    NO_DESCRIPTION,
};
pub use dispatcher::Dispatcher;
pub use error::{CatalogError, DispatchError, RegistryError, UnitError};
pub use registry::{EntryPoint, Registry, UnitKey, UnitResolver};
pub use thumbnail::{Thumbnail, ThumbnailError};
