//! Survivor pool pick maker.
//!
//! A [`Season`](model::Season) holds every week's games with each team's win
//! probability. A picker assigns one team per week, never the same team
//! twice, trying to maximise the chance that every pick wins:
//!
//! - [`GreedyPicker`](picker::GreedyPicker): best available team each week
//! - [`OptimalPicker`](picker::OptimalPicker): exact 0/1 integer program

pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod picker;

pub use error::PickError;
pub use model::{Game, Picks, Season, Week};
pub use picker::{make_picks, PickOptions, Picker, PickerKind};
