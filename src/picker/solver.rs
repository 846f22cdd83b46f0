use std::fmt;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::error::PickError;

use super::optimal::{LinearProgram, Sense};

/// Outcome class reported by a MILP solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Solver stopped for any other reason.
    NotSolved(String),
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::NotSolved(reason) => write!(f, "Not Solved ({reason})"),
        }
    }
}

/// Status plus one value per program variable (same order as
/// [`LinearProgram::variables`]). `values` is only meaningful when the status
/// is `Optimal`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: SolveStatus,
    pub values: Vec<f64>,
}

impl SolverOutcome {
    pub fn without_solution(status: SolveStatus) -> Self {
        SolverOutcome {
            status,
            values: Vec::new(),
        }
    }
}

/// Trait every MILP backend must implement. Solving is a single blocking call.
pub trait MilpSolver: Send + Sync {
    fn solve(&self, program: &LinearProgram) -> Result<SolverOutcome, PickError>;

    /// Reported in [`PickEvent::SolverFinished`](super::PickEvent::SolverFinished).
    fn name(&self) -> &str;
}

/// Solves through `good_lp` with the pure-Rust `microlp` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MilpSolver for MicroLpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, program: &LinearProgram) -> Result<SolverOutcome, PickError> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables()
            .iter()
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective: Expression = program
            .objective()
            .iter()
            .map(|&(idx, coefficient)| handles[idx] * coefficient)
            .sum();

        let mut model = vars.maximise(objective).using(microlp);
        for c in program.constraints() {
            let lhs: Expression = c
                .terms
                .iter()
                .map(|&idx| Expression::from(handles[idx]))
                .sum();
            model = model.with(match c.sense {
                Sense::Equal => constraint::eq(lhs, c.rhs),
                Sense::AtMost => constraint::leq(lhs, c.rhs),
            });
        }

        let outcome = match model.solve() {
            Ok(solution) => SolverOutcome {
                status: SolveStatus::Optimal,
                values: handles.iter().map(|v| solution.value(*v)).collect(),
            },
            Err(ResolutionError::Infeasible) => {
                SolverOutcome::without_solution(SolveStatus::Infeasible)
            }
            Err(ResolutionError::Unbounded) => {
                SolverOutcome::without_solution(SolveStatus::Unbounded)
            }
            Err(other) => SolverOutcome::without_solution(SolveStatus::NotSolved(other.to_string())),
        };
        Ok(outcome)
    }
}
