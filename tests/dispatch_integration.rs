//! Integration tests for dispatching catalog entries
//!
//! Units here record that they ran instead of opening windows, so the
//! launcher's catalog-then-dispatch flow can run headless.

use physlab::config::AppConfig;
use physlab_core::{CatalogBuilder, DispatchError, Dispatcher, Registry, UnitError, UnitKey};

#[derive(Default)]
struct RecordingHost {
    runs: Vec<&'static str>,
}

fn projectile(host: &mut RecordingHost) -> Result<(), UnitError> {
    host.runs.push("projectile");
    Ok(())
}

fn slingshot(host: &mut RecordingHost) -> Result<(), UnitError> {
    host.runs.push("gravitational_slingshot");
    Ok(())
}

fn smoke_plume(host: &mut RecordingHost) -> Result<(), UnitError> {
    host.runs.push("smoke_plume");
    Ok(())
}

fn broken(_host: &mut RecordingHost) -> Result<(), UnitError> {
    Err(UnitError::Render("surface lost".to_string()))
}

fn registry() -> Registry<RecordingHost> {
    let mut registry = Registry::new();
    registry.register("Kinematics", "projectile", projectile).unwrap();
    registry.register("gravitation", "gravitational_slingshot", slingshot).unwrap();
    registry.register("fluids", "smoke_plume", smoke_plume).unwrap();
    registry
}

fn shipped_dispatcher(registry: Registry<RecordingHost>) -> (Dispatcher<RecordingHost>, Vec<UnitKey>) {
    let config = AppConfig::default();
    let catalog = CatalogBuilder::new(&config.catalog.root)
        .with_categories(config.catalog.categories.iter().cloned())
        .build(&registry)
        .unwrap();
    let keys: Vec<UnitKey> = catalog.keys().collect();
    (Dispatcher::new(registry).offering(&catalog), keys)
}

#[test]
fn test_every_catalog_unit_dispatches() {
    let (dispatcher, keys) = shipped_dispatcher(registry());
    let mut host = RecordingHost::default();

    for key in &keys {
        dispatcher.invoke(&mut host, &key.category, &key.unit).unwrap();
    }
    assert_eq!(
        host.runs,
        ["projectile", "smoke_plume", "gravitational_slingshot"]
    );
}

#[test]
fn test_unknown_unit_then_valid_unit() {
    let (dispatcher, _) = shipped_dispatcher(registry());
    let mut host = RecordingHost::default();

    let err = dispatcher.invoke(&mut host, "Kinematics", "nonexistent").unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownUnit {
            category: "Kinematics".to_string(),
            unit: "nonexistent".to_string(),
        }
    );
    assert!(host.runs.is_empty());

    dispatcher.invoke(&mut host, "Kinematics", "projectile").unwrap();
    assert_eq!(host.runs, ["projectile"]);
}

#[test]
fn test_unknown_unit_in_empty_tab() {
    let (dispatcher, _) = shipped_dispatcher(registry());
    let mut host = RecordingHost::default();

    let err = dispatcher.invoke(&mut host, "atomics", "nonexistent").unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownUnit {
            category: "atomics".to_string(),
            unit: "nonexistent".to_string(),
        }
    );
    assert!(host.runs.is_empty());

    dispatcher.invoke(&mut host, "fluids", "smoke_plume").unwrap();
    assert_eq!(host.runs, ["smoke_plume"]);
}

#[test]
fn test_unknown_category() {
    let (dispatcher, _) = shipped_dispatcher(registry());
    let mut host = RecordingHost::default();
    let err = dispatcher.invoke(&mut host, "optics", "lens").unwrap_err();
    assert_eq!(err, DispatchError::UnknownCategory("optics".to_string()));
}

#[test]
fn test_unit_without_file_is_not_offered() {
    let mut registry = registry();
    registry.register("materials", "stress_test", broken).unwrap();
    let (dispatcher, keys) = shipped_dispatcher(registry);
    assert!(!keys.contains(&UnitKey::new("materials", "stress_test")));

    let mut host = RecordingHost::default();
    let err = dispatcher.invoke(&mut host, "materials", "stress_test").unwrap_err();
    assert_eq!(err, DispatchError::NotOffered(UnitKey::new("materials", "stress_test")));
}

#[test]
fn test_unit_failure_is_reported() {
    let mut registry = registry();
    registry.register("materials", "stress_test", broken).unwrap();
    let dispatcher = Dispatcher::new(registry);
    let mut host = RecordingHost::default();

    let err = dispatcher.invoke(&mut host, "materials", "stress_test").unwrap_err();
    assert!(matches!(err, DispatchError::UnitFailed { .. }));
    assert!(err.to_string().contains("surface lost"));

    dispatcher.invoke(&mut host, "fluids", "smoke_plume").unwrap();
    assert_eq!(host.runs, ["smoke_plume"]);
}
