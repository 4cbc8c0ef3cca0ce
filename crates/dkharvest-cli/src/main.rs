use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dkharvest_core::RunConfig;
use dkharvest_scraper::{endpoints, CatalogClient, RunOutcome};

mod sink;

/// Additional attempts per request after the first failure.
const FETCH_RETRIES: u32 = 2;
/// Base pause for the transport's linear backoff.
const FETCH_BACKOFF: Duration = Duration::from_millis(800);

#[derive(Debug, Parser)]
#[command(name = "dkharvest")]
#[command(about = "Harvest Samsung products and reviews from the Digikala mobile catalog")]
struct Cli {
    /// Category listing pages to walk (0 = all pages).
    #[arg(long, default_value_t = 0)]
    list_pages: u32,

    /// Brand-matched products to process (0 = all).
    #[arg(long, default_value_t = 0)]
    max_products: u32,

    /// Review pages fetched per product (0 = all).
    #[arg(long, default_value_t = 0)]
    per_product_pages: u32,

    /// Reviews collected per product (0 = unlimited).
    #[arg(long, default_value_t = 500)]
    per_product_max_comments: u32,

    /// Pause between requests, in seconds.
    #[arg(long, default_value_t = 0.6)]
    delay: f64,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,

    /// Output path for the products table.
    #[arg(long, default_value = "Digikala_products.csv")]
    products_out: PathBuf,

    /// Output path for the reviews table.
    #[arg(long, default_value = "Digikala_comments.csv")]
    reviews_out: PathBuf,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            page_limit: self.list_pages,
            max_products: self.max_products,
            review_page_limit: self.per_product_pages,
            review_cap: self.per_product_max_comments,
            delay: Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = CatalogClient::new(
        endpoints::API_BASE,
        endpoints::HOME_URL,
        FETCH_RETRIES,
        FETCH_BACKOFF,
    )
    .context("failed to build the HTTP client")?;

    match dkharvest_scraper::run(&client, &cli.run_config()).await {
        RunOutcome::NoProductIds => {
            println!("no product ids enumerated from the category pages");
        }
        RunOutcome::NothingCollected => {
            println!("nothing collected");
        }
        RunOutcome::Complete(harvest) => {
            sink::write_products(&cli.products_out, &harvest.products)
                .with_context(|| format!("failed to write {}", cli.products_out.display()))?;
            sink::write_reviews(&cli.reviews_out, &harvest.reviews)
                .with_context(|| format!("failed to write {}", cli.reviews_out.display()))?;
            println!(
                "wrote {} ({} products) and {} ({} reviews)",
                cli.products_out.display(),
                harvest.products.len(),
                cli.reviews_out.display(),
                harvest.reviews.len()
            );
        }
    }

    Ok(())
}
