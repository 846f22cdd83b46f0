use tracing::{debug, info, warn};

use super::solver::SolveStatus;

/// Progress reported by a picker while it works.
#[derive(Debug, Clone, PartialEq)]
pub enum PickEvent {
    /// A pick was settled for `week`. `locked` marks a pick taken from the
    /// previous picks rather than chosen.
    WeekPicked {
        week: u32,
        team: String,
        probability: f64,
        locked: bool,
    },
    /// The integer program was formulated.
    ProgramBuilt {
        variables: usize,
        week_constraints: usize,
        team_constraints: usize,
        locked_constraints: usize,
    },
    /// The named MILP backend returned.
    SolverFinished { solver: String, status: SolveStatus },
    /// A picker returned a complete set of picks.
    PicksCompleted {
        picker: &'static str,
        weeks: usize,
        win_probability: f64,
    },
}

/// Receives [`PickEvent`]s from a picker.
pub trait PickObserver: Send + Sync {
    fn on_event(&self, event: &PickEvent);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PickObserver for TracingObserver {
    fn on_event(&self, event: &PickEvent) {
        match event {
            PickEvent::WeekPicked {
                week,
                team,
                probability,
                locked,
            } => debug!(week, team = %team, probability, locked, "Week picked"),
            PickEvent::ProgramBuilt {
                variables,
                week_constraints,
                team_constraints,
                locked_constraints,
            } => info!(
                variables,
                week_constraints,
                team_constraints,
                locked_constraints,
                "Built integer program"
            ),
            PickEvent::SolverFinished { solver, status } => {
                if *status == SolveStatus::Optimal {
                    info!(solver = %solver, status = %status, "Solver finished");
                } else {
                    warn!(
                        solver = %solver,
                        status = %status,
                        "Solver finished without an optimal solution"
                    );
                }
            }
            PickEvent::PicksCompleted {
                picker,
                weeks,
                win_probability,
            } => info!(
                picker,
                weeks,
                win_probability,
                "Picks completed (season win probability {:.4}%)",
                win_probability * 100.0
            ),
        }
    }
}

pub(crate) static TRACING_OBSERVER: TracingObserver = TracingObserver;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{PickEvent, PickObserver};

    /// Keeps every event it receives.
    #[derive(Default)]
    pub struct RecordingObserver {
        events: Mutex<Vec<PickEvent>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<PickEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl PickObserver for RecordingObserver {
        fn on_event(&self, event: &PickEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
