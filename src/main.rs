use anyhow::Context;
use clap::Parser;
use map_pins::config::Command;
use map_pins::utils::logger;
use map_pins::{
    haversine_distance, CliConfig, ConfigProvider, Coordinate, LocalStorage, PinError, PinStore,
    StoreOptions,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting map-pins CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.storage_dir());
    tracing::debug!("Using data directory {}", storage.base_path().display());
    let mut store = PinStore::with_options(storage, StoreOptions::from_config(&config))
        .with_context(|| format!("failed to load pins from {}", config.storage_dir()))?;

    if let Err(e) = run(&cli.command, &mut store) {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: &Command, store: &mut PinStore<LocalStorage>) -> Result<(), PinError> {
    match command {
        Command::Add { lat, lon } => {
            store.save_annotation(Coordinate::new(*lat, *lon))?;
            println!("Saved pin {}, {} ({} total)", lat, lon, store.len());
        }
        Command::List { json } => {
            print_coordinates(&store.all_coordinates(), None, *json)?;
        }
        Command::Nearby {
            lat,
            lon,
            radius,
            json,
        } => {
            if let Some(text) = radius {
                if !store.set_radius_from_text(text) {
                    tracing::warn!(
                        "Radius '{}' is not a number, keeping {} m",
                        text,
                        store.radius()
                    );
                }
            }
            let reference = Coordinate::new(*lat, *lon);
            print_coordinates(&store.filtered_coordinates(reference), Some(reference), *json)?;
        }
        Command::Count => println!("{}", store.len()),
    }
    Ok(())
}

fn print_coordinates(
    coordinates: &[Coordinate],
    reference: Option<Coordinate>,
    json: bool,
) -> Result<(), PinError> {
    if json {
        println!("{}", serde_json::to_string_pretty(coordinates)?);
        return Ok(());
    }

    for coordinate in coordinates {
        match reference {
            Some(reference) => println!(
                "{:.6}, {:.6}  ({:.1} m)",
                coordinate.latitude,
                coordinate.longitude,
                haversine_distance(*coordinate, reference)
            ),
            None => println!("{:.6}, {:.6}", coordinate.latitude, coordinate.longitude),
        }
    }
    Ok(())
}
