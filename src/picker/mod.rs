pub mod diagnostics;
pub mod greedy;
pub mod optimal;
pub mod solver;

pub use diagnostics::{PickEvent, PickObserver, TracingObserver};
pub use greedy::GreedyPicker;
pub use optimal::{LinearProgram, OptimalPicker, DEFAULT_PROBABILITY_FLOOR};
pub use solver::{MicroLpSolver, MilpSolver, SolveStatus, SolverOutcome};

use std::fmt;

use crate::error::PickError;
use crate::model::{Picks, Season};

/// Trait every picking strategy implements.
///
/// A picker borrows its season and previous picks for its whole lifetime and
/// never mutates them.
pub trait Picker {
    /// Picks for every week of the season, previous picks included.
    fn picks(&self) -> Result<Picks, PickError>;

    fn name(&self) -> &'static str;
}

/// The available strategies, selectable by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PickerKind {
    #[value(aliases = ["greedy-picker", "greedypicker"])]
    Greedy,
    #[value(aliases = ["lp", "lp-picker", "lppicker"])]
    Optimal,
}

impl fmt::Display for PickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerKind::Greedy => write!(f, "greedy"),
            PickerKind::Optimal => write!(f, "optimal"),
        }
    }
}

/// Knobs shared by [`make_picks`] callers.
#[derive(Clone, Copy)]
pub struct PickOptions<'a> {
    pub probability_floor: f64,
    pub observer: &'a dyn PickObserver,
}

impl Default for PickOptions<'_> {
    fn default() -> Self {
        PickOptions {
            probability_floor: DEFAULT_PROBABILITY_FLOOR,
            observer: &diagnostics::TRACING_OBSERVER,
        }
    }
}

/// Run the `kind` strategy over `season`, honouring `previous_picks`.
pub fn make_picks(
    kind: PickerKind,
    season: &Season,
    previous_picks: Option<&Picks>,
    options: PickOptions<'_>,
) -> Result<Picks, PickError> {
    let picks = match kind {
        PickerKind::Greedy => run(
            &GreedyPicker::new(season, previous_picks)?.with_observer(options.observer),
            season,
            options.observer,
        )?,
        PickerKind::Optimal => run(
            &OptimalPicker::with_probability_floor(
                season,
                previous_picks,
                options.probability_floor,
            )?
            .with_observer(options.observer),
            season,
            options.observer,
        )?,
    };
    Ok(picks)
}

fn run(
    picker: &dyn Picker,
    season: &Season,
    observer: &dyn PickObserver,
) -> Result<Picks, PickError> {
    let picks = picker.picks()?;
    let win_probability = season.picks_win_probability(&picks)?;
    observer.on_event(&PickEvent::PicksCompleted {
        picker: picker.name(),
        weeks: picks.len(),
        win_probability,
    });
    Ok(picks)
}
