//! Fixture Generator
//!
//! Run with: cargo run --bin generate_fixtures -- --products 10 --salesmen 5 --seed 42

use sales_report::fixtures::{FixtureGenerator, FixturePlan};
use sales_report::Config;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_report=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let flag = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let mut config = Config::from_env()?;
    if let Some(dir) = flag("--dir") {
        config.data_dir = dir.into();
    }

    let mut plan = FixturePlan::default();
    if let Some(products) = flag("--products") {
        plan.products = products.parse()?;
    }
    if let Some(salesmen) = flag("--salesmen") {
        plan.salesmen = salesmen.parse()?;
    }
    if let Some(seed) = flag("--seed") {
        plan.seed = Some(seed.parse()?);
    }

    let generated = FixtureGenerator::new(plan).write_all(&config)?;

    println!("Products: {}", generated.products_file.display());
    println!("Salesmen: {}", generated.salesmen_file.display());
    println!("Sales files: {}", generated.sales_files.len());

    Ok(())
}
