//! PhysLab - physics simulation launcher
//!
//! Shows the catalog of simulations and runs the one the user picks, then
//! returns to the catalog.

use physlab::config::AppConfig;
use physlab::launcher::Launcher;
use physlab::units::{self, Runtime};
use physlab_core::{CatalogBuilder, Dispatcher};

fn main() {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();
    log::info!("Starting PhysLab");

    if let Err(e) = run(config) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = units::registry()?;
    for key in registry.validate(&config.catalog.categories) {
        log::warn!("Unit {} is registered but its category is not configured", key);
    }

    let catalog = CatalogBuilder::new(&config.catalog.root)
        .with_categories(config.catalog.categories.iter().cloned())
        .with_unit_extension(config.catalog.unit_extension.clone())
        .with_thumbnail_size(config.catalog.thumbnail_size, config.catalog.corner_radius)
        .build(&registry)?;

    let dispatcher = Dispatcher::new(registry).offering(&catalog);
    let mut launcher = Launcher::new(catalog, &config.window, &config.catalog);
    let mut runtime = Runtime::new(config)?;

    loop {
        runtime.host.run(&mut launcher)?;
        let Some(key) = launcher.take_selection() else {
            break;
        };
        if let Err(e) = dispatcher.invoke(&mut runtime, &key.category, &key.unit) {
            log::error!("{}", e);
            launcher.report_error(e.to_string());
        }
    }

    log::info!("Exiting PhysLab");
    Ok(())
}
