use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use survivor_picker::config::Config;
use survivor_picker::document::{load_picks, load_season, picks_to_json, save_picks};
use survivor_picker::picker::{make_picks, PickOptions};

fn main() {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Config::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    let season = load_season(&config.season_path)?;
    info!(
        "Season loaded: {} weeks, {} teams ({})",
        season.week_count(),
        season.teams().len(),
        config.season_path.display()
    );

    let previous_picks = config
        .previous_picks
        .as_ref()
        .map(|path| load_picks(path))
        .transpose()?;
    if let Some(prev) = &previous_picks {
        info!("Keeping {} previous pick(s)", prev.len());
    }

    info!("Making picks with the {} picker", config.picker);
    let options = PickOptions {
        probability_floor: config.probability_floor,
        ..PickOptions::default()
    };
    let picks = make_picks(config.picker, &season, previous_picks.as_ref(), options)?;

    match &config.output {
        Some(path) => {
            save_picks(&picks, path)?;
            info!("Wrote {} picks to {}", picks.len(), path.display());
        }
        None => println!("{}", picks_to_json(&picks)?),
    }
    Ok(())
}
