//! Error types for catalog building and dispatch
//!
//! - [`CatalogError`] - a category directory could not be enumerated (fatal at startup)
//! - [`RegistryError`] - the registry was wired incorrectly
//! - [`DispatchError`] - a launch request could not be honoured
//! - [`UnitError`] - a simulation unit failed while running

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::registry::UnitKey;

/// Error raised while building the catalog
#[derive(Debug)]
pub enum CatalogError {
    /// A configured category has no readable directory
    MissingCategory {
        category: String,
        path: PathBuf,
        source: io::Error,
    },
    /// The category path exists but is not a directory
    NotADirectory { category: String, path: PathBuf },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MissingCategory {
                category,
                path,
                source,
            } => write!(
                f,
                "Category '{}' cannot be enumerated at {}: {}",
                category,
                path.display(),
                source
            ),
            CatalogError::NotADirectory { category, path } => write!(
                f,
                "Category '{}' path {} is not a directory",
                category,
                path.display()
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::MissingCategory { source, .. } => Some(source),
            CatalogError::NotADirectory { .. } => None,
        }
    }
}

/// Error raised while populating the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same (category, unit) pair was registered twice
    Duplicate(UnitKey),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate(key) => write!(f, "Unit '{}' is registered twice", key),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Error raised by a simulation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The unit's window could not be created or driven
    Window(String),
    /// GPU or surface failure
    Render(String),
    /// A required asset could not be loaded
    Asset(String),
    /// Anything else
    Other(String),
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::Window(msg) => write!(f, "Window error: {}", msg),
            UnitError::Render(msg) => write!(f, "Render error: {}", msg),
            UnitError::Asset(msg) => write!(f, "Asset error: {}", msg),
            UnitError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for UnitError {}

impl From<String> for UnitError {
    fn from(msg: String) -> Self {
        UnitError::Other(msg)
    }
}

impl From<&str> for UnitError {
    fn from(msg: &str) -> Self {
        UnitError::Other(msg.to_string())
    }
}

/// Error returned by [`Dispatcher::invoke`](crate::Dispatcher::invoke)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No unit is registered under this category
    UnknownCategory(String),
    /// The category exists but has no unit of this name
    UnknownUnit { category: String, unit: String },
    /// The unit is registered but the catalog did not offer it
    NotOffered(UnitKey),
    /// The unit started but returned an error
    UnitFailed { key: UnitKey, source: UnitError },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownCategory(category) => {
                write!(f, "Unknown simulation category '{}'", category)
            }
            DispatchError::UnknownUnit { category, unit } => {
                write!(f, "No simulation named '{}' in category '{}'", unit, category)
            }
            DispatchError::NotOffered(key) => {
                write!(f, "Simulation '{}' is not in the catalog", key)
            }
            DispatchError::UnitFailed { key, source } => {
                write!(f, "Simulation '{}' failed: {}", key, source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::UnitFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_category_display() {
        let err = CatalogError::MissingCategory {
            category: "fluids".to_string(),
            path: PathBuf::from("simulations/fluids"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("fluids"));
        assert!(msg.contains("no such directory"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_dispatch_error_display() {
        let err = DispatchError::UnknownUnit {
            category: "Kinematics".to_string(),
            unit: "nonexistent".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("Kinematics"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unit_failure_has_source() {
        let err = DispatchError::UnitFailed {
            key: UnitKey::new("fluids", "smoke_plume"),
            source: UnitError::Render("surface lost".to_string()),
        };
        assert!(err.to_string().contains("fluids/smoke_plume"));
        assert!(err.to_string().contains("surface lost"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unit_error_from_str() {
        let err: UnitError = "bad input".into();
        assert_eq!(err, UnitError::Other("bad input".to_string()));
    }
}
