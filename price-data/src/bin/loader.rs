use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use price_data::CatalogLoader;
use price_db_sqlite::SqliteStore;

/// Load vehicle catalog data from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - id: Listing identifier (e.g., car1)
/// - make, model, year: The vehicle itself
/// - price: Asking price in whole currency units
/// - mileage: Odometer reading in miles
/// - condition: excellent, good, fair or poor
/// - fuel_type: gasoline, diesel, electric or hybrid
/// - transmission: automatic or manual
#[derive(Parser, Debug)]
#[command(name = "price-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing vehicle catalog data
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database path (e.g., market.db, created if missing)
    #[arg(short, long, default_value = "market.db")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let store = SqliteStore::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        store
            .run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        store
            .run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading vehicle catalog from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = CatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = CatalogLoader::load(&store, records)
        .await
        .context("Failed to load vehicle catalog into database")?;

    println!("Successfully loaded {} vehicles into the database.", inserted);

    Ok(())
}
