mod logging;

use anyhow::{Context, Result};
use chart_scraper::{DatasetSummary, Pipeline, PipelineConfig};

fn main() -> Result<()> {
    logging::init_logging();

    let config = PipelineConfig::default();
    tracing::info!("IMDb Top 250 scraper starting");

    let pipeline = Pipeline::new(config);
    let output = pipeline
        .run(&mut rand::rng())
        .context("failed to write the datasets")?;

    match output.strategy {
        Some(strategy) => tracing::info!("dataset built from scraped data ({})", strategy),
        None => tracing::info!("dataset built from synthetic data"),
    }

    println!("Basic data:  {}", output.files.basic.display());
    println!("Custom data: {}", output.files.custom.display());
    println!();
    println!("{}", DatasetSummary::new(&output.movies));

    Ok(())
}
