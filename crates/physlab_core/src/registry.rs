//! Startup registry of simulation entry points
//!
//! Every runnable unit is registered once, before the catalog is built, under
//! its `(category, unit)` key. Lookups by name then either resolve to a plain
//! function pointer or fail with a [`DispatchError`] the UI can display.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{DispatchError, RegistryError, UnitError};

/// Identity of a simulation unit
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitKey {
    pub category: String,
    pub unit: String,
}

impl UnitKey {
    pub fn new(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.unit)
    }
}

/// A unit's entry operation
///
/// `H` is the host handle (event loop and configuration); units receive no
/// other arguments.
pub type EntryPoint<H> = fn(&mut H) -> Result<(), UnitError>;

/// Anything that can say whether a unit is runnable
///
/// The catalog builder consults this to filter discovered unit files.
pub trait UnitResolver {
    fn resolves(&self, key: &UnitKey) -> bool;
}

/// Mapping from unit keys to entry points
pub struct Registry<H> {
    entries: BTreeMap<UnitKey, EntryPoint<H>>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register an entry point, refusing duplicates
    pub fn register(
        &mut self,
        category: &str,
        unit: &str,
        entry: EntryPoint<H>,
    ) -> Result<(), RegistryError> {
        let key = UnitKey::new(category, unit);
        if self.entries.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        log::debug!("Registered simulation {}", key);
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Look up an entry point by name
    pub fn resolve(&self, category: &str, unit: &str) -> Result<EntryPoint<H>, DispatchError> {
        let key = UnitKey::new(category, unit);
        if let Some(entry) = self.entries.get(&key) {
            return Ok(*entry);
        }
        if self.entries.keys().any(|k| k.category == category) {
            Err(DispatchError::UnknownUnit {
                category: category.to_string(),
                unit: unit.to_string(),
            })
        } else {
            Err(DispatchError::UnknownCategory(category.to_string()))
        }
    }

    pub fn contains(&self, key: &UnitKey) -> bool {
        self.entries.contains_key(key)
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &UnitKey> + '_ {
        self.entries.keys()
    }

    /// Distinct categories with at least one registered unit
    pub fn categories(&self) -> BTreeSet<&str> {
        self.entries.keys().map(|k| k.category.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered units whose category is not in `configured`
    ///
    /// These can never be offered by the launcher, which usually means the
    /// configuration and the registry disagree.
    pub fn validate<'a>(&'a self, configured: &[String]) -> Vec<&'a UnitKey> {
        self.entries
            .keys()
            .filter(|k| !configured.iter().any(|c| *c == k.category))
            .collect()
    }
}

impl<H> UnitResolver for Registry<H> {
    fn resolves(&self, key: &UnitKey) -> bool {
        self.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut u32) -> Result<(), UnitError> {
        Ok(())
    }

    fn bump(counter: &mut u32) -> Result<(), UnitError> {
        *counter += 1;
        Ok(())
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = Registry::<u32>::new();
        registry.register("Kinematics", "projectile", bump).unwrap();

        let entry = registry.resolve("Kinematics", "projectile").unwrap();
        let mut counter = 0;
        entry(&mut counter).unwrap();
        assert_eq!(counter, 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::<u32>::new();
        registry.register("fluids", "smoke_plume", noop).unwrap();
        let err = registry.register("fluids", "smoke_plume", bump).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate(UnitKey::new("fluids", "smoke_plume")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_unit_vs_unknown_category() {
        let mut registry = Registry::<u32>::new();
        registry.register("Kinematics", "projectile", noop).unwrap();

        match registry.resolve("Kinematics", "nonexistent") {
            Err(DispatchError::UnknownUnit { category, unit }) => {
                assert_eq!(category, "Kinematics");
                assert_eq!(unit, "nonexistent");
            }
            _ => panic!("Expected UnknownUnit"),
        }
        match registry.resolve("atomics", "projectile") {
            Err(DispatchError::UnknownCategory(category)) => assert_eq!(category, "atomics"),
            _ => panic!("Expected UnknownCategory"),
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = Registry::<u32>::new();
        registry.register("Kinematics", "projectile", noop).unwrap();
        assert!(registry.resolve("kinematics", "projectile").is_err());
    }

    #[test]
    fn test_keys_sorted_and_categories() {
        let mut registry = Registry::<u32>::new();
        registry.register("gravitation", "gravitational_slingshot", noop).unwrap();
        registry.register("Kinematics", "projectile", noop).unwrap();
        registry.register("fluids", "smoke_plume", noop).unwrap();

        let keys: Vec<String> = registry.keys().map(|k| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "Kinematics/projectile",
                "fluids/smoke_plume",
                "gravitation/gravitational_slingshot",
            ]
        );
        assert_eq!(registry.categories().len(), 3);
    }

    #[test]
    fn test_validate_reports_unconfigured() {
        let mut registry = Registry::<u32>::new();
        registry.register("Kinematics", "projectile", noop).unwrap();
        registry.register("optics", "lens", noop).unwrap();

        let configured = vec!["Kinematics".to_string(), "fluids".to_string()];
        let missing = registry.validate(&configured);
        assert_eq!(missing, vec![&UnitKey::new("optics", "lens")]);
    }

    #[test]
    fn test_resolver() {
        let mut registry = Registry::<u32>::new();
        registry.register("Kinematics", "projectile", noop).unwrap();
        assert!(registry.resolves(&UnitKey::new("Kinematics", "projectile")));
        assert!(!registry.resolves(&UnitKey::new("Kinematics", "orbit")));
    }
}
