//! Storefront operator CLI.
//!
//! Usage: storefront [--db <PATH>] <ping|seed|brands|products>

use clap::{Args, Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use storefront_core::db::open_db;
use storefront_core::{
    core_version, default_log_level, init_logging, ping, seed_catalog, ListParams,
    ListingService, SeedPlan, SqliteBrandStore, SqliteProductStore,
};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog maintenance", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "STOREFRONT_DB_PATH", default_value = "storefront.sqlite3")]
    db: PathBuf,

    /// Write logs to this absolute directory
    #[arg(long, global = true, env = "STOREFRONT_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check core linkage and print the version
    Ping,
    /// Replace the catalog with generated brands and products
    Seed(SeedArgs),
    /// List brands
    Brands(ListArgs),
    /// List products with their brand
    Products(ListArgs),
}

#[derive(Debug, Args)]
struct SeedArgs {
    #[arg(long, default_value_t = SeedPlan::default().brands)]
    brands: u32,
    #[arg(long, default_value_t = SeedPlan::default().products)]
    products: u32,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Sort field (default: name)
    #[arg(long)]
    sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    direction: Option<String>,
    /// Case-insensitive name filter
    #[arg(long)]
    q: Option<String>,
}

impl From<ListArgs> for ListParams {
    fn from(args: ListArgs) -> Self {
        Self {
            sort: args.sort,
            direction: args.direction,
            q: args.q,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("Warning: logging disabled: {err}");
        }
    }

    let result = match cli.command {
        Commands::Ping => execute_ping(),
        Commands::Seed(args) => execute_seed(&cli.db, args),
        Commands::Brands(args) => execute_brands(&cli.db, args),
        Commands::Products(args) => execute_products(&cli.db, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute_ping() -> CliResult {
    println!("storefront_core ping={}", ping());
    println!("storefront_core version={}", core_version());
    Ok(())
}

fn execute_seed(db: &Path, args: SeedArgs) -> CliResult {
    let mut conn = open_db(db)?;
    let plan = SeedPlan {
        brands: args.brands,
        products: args.products,
    };
    let report = seed_catalog(&mut conn, &plan)?;

    info!(
        "event=catalog_seed module=cli status=ok brands={} products={}",
        report.brands, report.products
    );
    println!(
        "Seeded {} brands and {} products into {}",
        report.brands,
        report.products,
        db.display()
    );
    Ok(())
}

fn execute_brands(db: &Path, args: ListArgs) -> CliResult {
    let conn = open_db(db)?;
    let listing = ListingService::new(SqliteBrandStore::new(&conn)).list(&args.into())?;

    for brand in &listing.items {
        println!("{}  {}", brand.id, brand.name);
    }
    print_footer(listing.items.len(), listing.filters.sort, listing.filters.direction);
    Ok(())
}

fn execute_products(db: &Path, args: ListArgs) -> CliResult {
    let conn = open_db(db)?;
    let listing = ListingService::new(SqliteProductStore::new(&conn)).list(&args.into())?;

    for record in &listing.items {
        let product = &record.product;
        println!(
            "{}  {}  {}.{:02}  ({})",
            product.id,
            product.name,
            product.price_cents / 100,
            product.price_cents % 100,
            record.brand.name
        );
    }
    print_footer(listing.items.len(), listing.filters.sort, listing.filters.direction);
    Ok(())
}

fn print_footer(count: usize, sort: &str, direction: &str) {
    println!("{count} record(s), sorted by {sort} {direction}");
}
