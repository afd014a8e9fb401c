use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use zip_radius::{Config, CoordinateTable, DEFAULT_RADIUS_MILES, RadiusRequest, ZipError};
use zip_radius::{describe_zip, find_nearby, format_distance};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zip_radius=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <zip_code> [radius] [dataset]", args[0]);
        eprintln!("  zip_code: origin ZIP code (e.g., 10001)");
        eprintln!("  radius: miles (default: {})", DEFAULT_RADIUS_MILES);
        eprintln!("  dataset: CSV with ZIP,LAT,LNG columns (default: $ZIP_DATASET or USZip2016.csv)");
        std::process::exit(1);
    }

    let zip_code = args[1].trim().to_string();
    let radius = match args.get(2) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid radius: {}", raw))?,
        None => DEFAULT_RADIUS_MILES,
    };

    let config = Config::from_env();
    let dataset = args.get(3).map(PathBuf::from).unwrap_or(config.dataset);

    let table = CoordinateTable::load(&dataset)
        .with_context(|| format!("Failed to load ZIP dataset {}", dataset.display()))?;

    let request = RadiusRequest::new(zip_code, radius);
    match find_nearby(&table, &request.zip_code, request.radius) {
        Ok(nearby) => {
            println!(
                "{} ZIP code(s) within {} miles of {}:",
                nearby.len(),
                request.radius,
                describe_zip(&request.zip_code)
            );
            for n in &nearby {
                println!(
                    "  {:>10}  {}",
                    format_distance(n.distance_miles),
                    describe_zip(&n.zip_code)
                );
            }
            Ok(())
        }
        Err(e @ ZipError::NotFound(_)) => {
            eprintln!("Error: {} ({})", e, request.zip_code);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
