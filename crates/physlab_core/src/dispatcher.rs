//! Dynamic dispatch of simulation units by name
//!
//! The dispatcher owns the [`Registry`] and hands the host to exactly one unit
//! at a time. Because `invoke` takes `&mut H`, a second unit cannot start
//! until the first returns.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::error::DispatchError;
use crate::registry::{Registry, UnitKey};

pub struct Dispatcher<H> {
    registry: Registry<H>,
    offered: Option<BTreeSet<UnitKey>>,
    /// Categories shown to the user, including empty ones
    categories: BTreeSet<String>,
}

impl<H> Dispatcher<H> {
    /// Dispatch to anything in `registry`
    pub fn new(registry: Registry<H>) -> Self {
        Self {
            registry,
            offered: None,
            categories: BTreeSet::new(),
        }
    }

    /// Only dispatch to what `catalog` offers
    ///
    /// Every catalog category counts as known, so an unknown name inside an
    /// empty tab is an unknown unit rather than an unknown category.
    pub fn offering(self, catalog: &Catalog) -> Self {
        self.with_known_categories(catalog.categories().iter().map(|c| c.name()))
            .restricted_to(catalog.keys())
    }

    /// Categories that exist even when nothing in them is offered
    pub fn with_known_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(names.into_iter().map(Into::into));
        self
    }

    /// Only dispatch to units in `keys`, typically the catalog's offer
    pub fn restricted_to(mut self, keys: impl IntoIterator<Item = UnitKey>) -> Self {
        self.offered = Some(keys.into_iter().collect());
        self
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    /// Resolve `category/unit` and run it to completion
    ///
    /// Resolution failures leave `host` untouched. A unit's own error is
    /// returned as [`DispatchError::UnitFailed`].
    pub fn invoke(&self, host: &mut H, category: &str, unit: &str) -> Result<(), DispatchError> {
        let key = UnitKey::new(category, unit);
        self.check_offered(&key)?;
        let entry = self.registry.resolve(category, unit)?;

        log::info!("Launching {}", key);
        let started = Instant::now();
        let result = entry(host);
        let elapsed = started.elapsed().as_secs_f32();

        match result {
            Ok(()) => {
                log::info!("{} returned after {:.1}s", key, elapsed);
                Ok(())
            }
            Err(source) => {
                log::error!("{} failed after {:.1}s: {}", key, elapsed, source);
                Err(DispatchError::UnitFailed { key, source })
            }
        }
    }

    fn check_offered(&self, key: &UnitKey) -> Result<(), DispatchError> {
        let Some(offered) = &self.offered else {
            return Ok(());
        };
        if offered.contains(key) {
            return Ok(());
        }
        if self.registry.contains(key) {
            return Err(DispatchError::NotOffered(key.clone()));
        }
        let known = self.categories.contains(&key.category)
            || offered.iter().any(|k| k.category == key.category);
        if known {
            Err(DispatchError::UnknownUnit {
                category: key.category.clone(),
                unit: key.unit.clone(),
            })
        } else {
            Err(DispatchError::UnknownCategory(key.category.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;

    #[derive(Default)]
    struct Host {
        runs: Vec<&'static str>,
    }

    fn projectile(host: &mut Host) -> Result<(), UnitError> {
        host.runs.push("projectile");
        Ok(())
    }

    fn broken(host: &mut Host) -> Result<(), UnitError> {
        host.runs.push("broken");
        Err(UnitError::Render("no adapter".to_string()))
    }

    fn dispatcher() -> Dispatcher<Host> {
        let mut registry = Registry::new();
        registry.register("Kinematics", "projectile", projectile).unwrap();
        registry.register("Kinematics", "broken", broken).unwrap();
        Dispatcher::new(registry)
    }

    #[test]
    fn test_invoke_runs_unit() {
        let mut host = Host::default();
        dispatcher().invoke(&mut host, "Kinematics", "projectile").unwrap();
        assert_eq!(host.runs, vec!["projectile"]);
    }

    #[test]
    fn test_unknown_unit_does_not_touch_host() {
        let mut host = Host::default();
        let d = dispatcher();
        let err = d.invoke(&mut host, "Kinematics", "nonexistent").unwrap_err();
        assert!(matches!(err, DispatchError::UnknownUnit { .. }));
        assert!(host.runs.is_empty());

        // The dispatcher still works afterwards
        d.invoke(&mut host, "Kinematics", "projectile").unwrap();
        assert_eq!(host.runs, vec!["projectile"]);
    }

    #[test]
    fn test_unit_failure_wrapped() {
        let mut host = Host::default();
        let err = dispatcher()
            .invoke(&mut host, "Kinematics", "broken")
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnitFailed {
                key: UnitKey::new("Kinematics", "broken"),
                source: UnitError::Render("no adapter".to_string()),
            }
        );
    }

    #[test]
    fn test_restricted_to_offered() {
        let mut host = Host::default();
        let d = dispatcher().restricted_to([UnitKey::new("Kinematics", "projectile")]);

        let err = d.invoke(&mut host, "Kinematics", "broken").unwrap_err();
        assert_eq!(err, DispatchError::NotOffered(UnitKey::new("Kinematics", "broken")));
        assert!(host.runs.is_empty());

        d.invoke(&mut host, "Kinematics", "projectile").unwrap();
        assert_eq!(host.runs, vec!["projectile"]);
    }

    #[test]
    fn test_unknown_unit_in_offered_empty_category() {
        let mut host = Host::default();
        let d = dispatcher()
            .restricted_to([UnitKey::new("Kinematics", "projectile")])
            .with_known_categories(["Kinematics", "atomics"]);

        let err = d.invoke(&mut host, "atomics", "nonexistent").unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownUnit {
                category: "atomics".to_string(),
                unit: "nonexistent".to_string(),
            }
        );
        let err = d.invoke(&mut host, "optics", "lens").unwrap_err();
        assert_eq!(err, DispatchError::UnknownCategory("optics".to_string()));
        assert!(host.runs.is_empty());
    }

    #[test]
    fn test_sequential_runs() {
        let mut host = Host::default();
        let d = dispatcher();
        d.invoke(&mut host, "Kinematics", "projectile").unwrap();
        d.invoke(&mut host, "Kinematics", "projectile").unwrap();
        assert_eq!(host.runs.len(), 2);
    }
}
