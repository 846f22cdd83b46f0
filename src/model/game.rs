use std::fmt;

use crate::error::PickError;

/// One matchup between two teams.
///
/// The two probabilities are independent marginals as published by the odds
/// source; they are not required to sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    teams: [(String, f64); 2],
}

impl Game {
    /// Build a game from `(team, win probability)` pairs.
    ///
    /// Fails with `MalformedGame` when both entries name the same team and
    /// with `InvalidProbability` when a probability is not within `[0, 1]`.
    pub fn new(
        team_one: (impl Into<String>, f64),
        team_two: (impl Into<String>, f64),
    ) -> Result<Self, PickError> {
        let teams = [
            (team_one.0.into(), team_one.1),
            (team_two.0.into(), team_two.1),
        ];
        if teams[0].0 == teams[1].0 {
            return Err(PickError::MalformedGame(format!(
                "team {} cannot play against itself",
                teams[0].0
            )));
        }
        for (team, probability) in &teams {
            if !probability.is_finite() || !(0.0..=1.0).contains(probability) {
                return Err(PickError::InvalidProbability {
                    team: team.clone(),
                    probability: *probability,
                });
            }
        }
        Ok(Game { teams })
    }

    /// Names of the two teams, in the order they were given.
    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.teams.iter().map(|(team, _)| team.as_str())
    }

    pub fn contains(&self, team: &str) -> bool {
        self.teams.iter().any(|(t, _)| t == team)
    }

    pub fn win_probability(&self, team: &str) -> Result<f64, PickError> {
        self.teams
            .iter()
            .find(|(t, _)| t == team)
            .map(|(_, p)| *p)
            .ok_or_else(|| PickError::unknown_team(team, self.to_string()))
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [(one, p_one), (two, p_two)] = &self.teams;
        write!(f, "Game({one}: {p_one}, {two}: {p_two})")
    }
}
