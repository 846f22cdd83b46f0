use std::path::PathBuf;

use clap::Parser;

use crate::picker::{PickerKind, DEFAULT_PROBABILITY_FLOOR};

/// Make picks for a survivor pool
#[derive(Parser, Debug, Clone)]
#[command(name = "survivor-picker", version, about)]
pub struct Config {
    /// Season document (JSON, or YAML for .yaml/.yml) with every week's games and win probabilities
    #[arg(short, long = "season", env = "SURVIVOR_SEASON")]
    pub season_path: PathBuf,

    /// Picks already made; they are kept as-is
    #[arg(long, env = "SURVIVOR_PREVIOUS_PICKS")]
    pub previous_picks: Option<PathBuf>,

    /// Picking strategy
    #[arg(short, long, env = "SURVIVOR_PICKER", value_enum, ignore_case = true, default_value_t = PickerKind::Optimal)]
    pub picker: PickerKind,

    /// Where to write the picks document (stdout when omitted)
    #[arg(short, long, env = "SURVIVOR_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Smallest win probability used in the optimal picker's log objective
    #[arg(long, env = "SURVIVOR_PROBABILITY_FLOOR", default_value_t = DEFAULT_PROBABILITY_FLOOR)]
    pub probability_floor: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.probability_floor > 0.0 && self.probability_floor < 1.0) {
            anyhow::bail!("probability_floor must be between 0.0 and 1.0 (exclusive)");
        }
        if self.output.as_ref() == Some(&self.season_path) {
            anyhow::bail!("output must not overwrite the season document");
        }
        Ok(())
    }
}
