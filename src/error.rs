use crate::picker::solver::SolveStatus;

/// Errors raised by the domain model, document conversion and the pickers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickError {
    #[error("Team {team} is not playing in {context}")]
    UnknownTeam { team: String, context: String },

    #[error("Week {0} is not included in the season")]
    InvalidWeek(u32),

    #[error("Malformed game: {0}")]
    MalformedGame(String),

    #[error("Invalid win probability {probability} for team {team}")]
    InvalidProbability { team: String, probability: f64 },

    #[error("Team {team} plays more than one game in week {week}")]
    DuplicateTeam { week: u32, team: String },

    #[error("Week {0} appears more than once")]
    DuplicateWeek(u32),

    #[error("Invalid picks: team {team} is picked in both week {first_week} and week {second_week}")]
    DuplicatePick {
        team: String,
        first_week: u32,
        second_week: u32,
    },

    #[error("Cannot solve for week {week} since all teams playing this week have been picked already")]
    GreedyInfeasible { week: u32 },

    #[error("Optimization did not find a solution (solver status: {status})")]
    OptimizationInfeasible { status: SolveStatus },
}

impl PickError {
    pub(crate) fn unknown_team(team: &str, context: impl Into<String>) -> Self {
        PickError::UnknownTeam {
            team: team.to_string(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = PickError::unknown_team("c", "game a vs b");
        let msg = err.to_string();
        assert!(msg.contains('c') && msg.contains("not playing"));

        let err = PickError::GreedyInfeasible { week: 3 };
        let msg = err.to_string();
        assert!(msg.contains("Cannot solve") && msg.contains("week 3"));

        let err = PickError::DuplicatePick {
            team: "a".into(),
            first_week: 1,
            second_week: 2,
        };
        assert!(err.to_string().to_lowercase().contains("invalid picks"));
    }

    #[test]
    fn infeasible_optimization_reports_status() {
        let err = PickError::OptimizationInfeasible {
            status: SolveStatus::Infeasible,
        };
        assert!(err.to_string().contains("Infeasible"));
    }
}
