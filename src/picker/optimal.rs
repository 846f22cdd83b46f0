//! Exact picks via a 0/1 integer program.
//!
//! One binary variable `x[w, t]` exists for every team `t` playing in week `w`.
//!
//! - one pick per week: `sum_t x[w, t] == 1`
//! - no team twice: `sum_w x[w, t] <= 1`
//! - locked previous picks: `x[w, t] == 1`
//!
//! The objective maximises `sum x[w, t] * ln(p[w, t])`. Since `ln` is strictly
//! increasing this picks the same assignment as maximising the product of
//! probabilities, without the underflow of multiplying many small numbers.

use std::collections::{BTreeMap, HashSet};

use crate::error::PickError;
use crate::model::{Picks, Season};

use super::diagnostics::{PickEvent, PickObserver, TRACING_OBSERVER};
use super::solver::{MicroLpSolver, MilpSolver, SolveStatus};
use super::Picker;

/// Smallest probability passed to `ln` unless configured otherwise.
pub const DEFAULT_PROBABILITY_FLOOR: f64 = 1e-9;

/// Solver values above this count as a pick.
const PICKED_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Equal,
    AtMost,
}

/// `sum of terms <sense> rhs`, every coefficient being 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    /// Indices into [`LinearProgram::variables`].
    pub terms: Vec<usize>,
    pub sense: Sense,
    pub rhs: f64,
}

/// A maximisation problem over binary variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    variables: Vec<(u32, String)>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(usize, f64)>,
    week_constraints: usize,
    team_constraints: usize,
    locked_constraints: usize,
}

impl LinearProgram {
    /// Formulate the survivor problem for `season` with `previous_picks` locked.
    pub fn survivor(
        season: &Season,
        previous_picks: Option<&Picks>,
        probability_floor: f64,
    ) -> Result<Self, PickError> {
        let mut variables = Vec::new();
        let mut index: BTreeMap<(u32, &str), usize> = BTreeMap::new();
        let mut objective = Vec::new();
        for week in season.weeks() {
            for game in week.games() {
                for team in game.teams() {
                    let idx = variables.len();
                    variables.push((week.number(), team.to_string()));
                    index.insert((week.number(), team), idx);
                    let p = game.win_probability(team)?;
                    objective.push((idx, p.max(probability_floor).ln()));
                }
            }
        }

        let mut constraints = Vec::new();
        for week in season.weeks() {
            constraints.push(LinearConstraint {
                name: format!("week_{}", week.number()),
                terms: week.teams().map(|t| index[&(week.number(), t)]).collect(),
                sense: Sense::Equal,
                rhs: 1.0,
            });
        }
        let week_constraints = constraints.len();

        for team in season.teams() {
            constraints.push(LinearConstraint {
                name: format!("team_{team}"),
                terms: season
                    .team_weeks(team)
                    .iter()
                    .map(|w| index[&(w.number(), team.as_str())])
                    .collect(),
                sense: Sense::AtMost,
                rhs: 1.0,
            });
        }
        let team_constraints = constraints.len() - week_constraints;

        for (week, team) in previous_picks.into_iter().flat_map(|p| p.iter()) {
            let w = season.nth_week(week)?;
            let idx = *index
                .get(&(week, team))
                .ok_or_else(|| PickError::unknown_team(team, format!("week {}", w.number())))?;
            constraints.push(LinearConstraint {
                name: format!("previous_pick_{week}_{team}"),
                terms: vec![idx],
                sense: Sense::Equal,
                rhs: 1.0,
            });
        }
        let locked_constraints = constraints.len() - week_constraints - team_constraints;

        Ok(LinearProgram {
            variables,
            constraints,
            objective,
            week_constraints,
            team_constraints,
            locked_constraints,
        })
    }

    /// `(week, team)` for each variable, ascending by week.
    pub fn variables(&self) -> &[(u32, String)] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// `(variable index, coefficient)` pairs of the maximised objective.
    pub fn objective(&self) -> &[(usize, f64)] {
        &self.objective
    }

    pub fn week_constraints(&self) -> &[LinearConstraint] {
        &self.constraints[..self.week_constraints]
    }

    pub fn team_constraints(&self) -> &[LinearConstraint] {
        &self.constraints[self.week_constraints..self.week_constraints + self.team_constraints]
    }

    pub fn locked_constraints(&self) -> &[LinearConstraint] {
        &self.constraints[self.week_constraints + self.team_constraints..]
    }

    fn built_event(&self) -> PickEvent {
        PickEvent::ProgramBuilt {
            variables: self.variables.len(),
            week_constraints: self.week_constraints,
            team_constraints: self.team_constraints,
            locked_constraints: self.locked_constraints,
        }
    }
}

/// Maximises the season win probability by solving [`LinearProgram`].
///
/// The program is formulated once in [`OptimalPicker::new`] for the given
/// season and previous picks; build a new picker for different inputs.
pub struct OptimalPicker<'a> {
    season: &'a Season,
    program: LinearProgram,
    solver: Box<dyn MilpSolver + 'a>,
    observer: &'a dyn PickObserver,
}

impl<'a> OptimalPicker<'a> {
    pub fn new(season: &'a Season, previous_picks: Option<&'a Picks>) -> Result<Self, PickError> {
        Self::with_probability_floor(season, previous_picks, DEFAULT_PROBABILITY_FLOOR)
    }

    pub fn with_probability_floor(
        season: &'a Season,
        previous_picks: Option<&'a Picks>,
        probability_floor: f64,
    ) -> Result<Self, PickError> {
        if let Some(previous) = previous_picks {
            season.check_picks(previous)?;
        }
        let program = LinearProgram::survivor(season, previous_picks, probability_floor)?;
        Ok(OptimalPicker {
            season,
            program,
            solver: Box::new(MicroLpSolver),
            observer: &TRACING_OBSERVER,
        })
    }

    pub fn with_solver(mut self, solver: impl MilpSolver + 'a) -> Self {
        self.solver = Box::new(solver);
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn PickObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn program(&self) -> &LinearProgram {
        &self.program
    }
}

fn infeasible(status: SolveStatus) -> PickError {
    PickError::OptimizationInfeasible { status }
}

impl Picker for OptimalPicker<'_> {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn picks(&self) -> Result<Picks, PickError> {
        self.observer.on_event(&self.program.built_event());

        let outcome = self.solver.solve(&self.program)?;
        self.observer.on_event(&PickEvent::SolverFinished {
            solver: self.solver.name().to_string(),
            status: outcome.status.clone(),
        });
        if outcome.status != SolveStatus::Optimal {
            return Err(infeasible(outcome.status));
        }

        let mut picks = Picks::new();
        for ((week, team), value) in self.program.variables().iter().zip(&outcome.values) {
            if *value > PICKED_THRESHOLD && picks.insert(*week, team.as_str()).is_some() {
                // Two picks in one week: the solution breaks its own constraints.
                return Err(infeasible(SolveStatus::NotSolved(format!(
                    "solution picks more than one team in week {week}"
                ))));
            }
        }
        if picks.len() != self.season.week_count() {
            return Err(infeasible(SolveStatus::NotSolved(format!(
                "solution covers {} of {} weeks",
                picks.len(),
                self.season.week_count()
            ))));
        }

        let locked_weeks: HashSet<u32> = self
            .program
            .locked_constraints()
            .iter()
            .flat_map(|c| c.terms.iter().map(|&i| self.program.variables()[i].0))
            .collect();
        for (week, team) in picks.iter() {
            self.observer.on_event(&PickEvent::WeekPicked {
                week,
                team: team.to_string(),
                probability: self.season.nth_week(week)?.team_win_probability(team)?,
                locked: locked_weeks.contains(&week),
            });
        }
        Ok(picks)
    }
}
