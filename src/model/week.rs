use std::collections::HashMap;

use crate::error::PickError;

use super::game::Game;

/// One week's worth of games.
///
/// The team -> game index is built once in [`Week::new`] and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    number: u32,
    games: Vec<Game>,
    /// Team name -> position of its game in `games`.
    team_to_game: HashMap<String, usize>,
}

impl Week {
    /// Fails with `DuplicateTeam` when a team shows up in two games.
    pub fn new(number: u32, games: impl IntoIterator<Item = Game>) -> Result<Self, PickError> {
        let games: Vec<Game> = games.into_iter().collect();
        let mut team_to_game = HashMap::with_capacity(games.len() * 2);
        for (idx, game) in games.iter().enumerate() {
            for team in game.teams() {
                if team_to_game.insert(team.to_string(), idx).is_some() {
                    return Err(PickError::DuplicateTeam {
                        week: number,
                        team: team.to_string(),
                    });
                }
            }
        }
        Ok(Week {
            number,
            games,
            team_to_game,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Every team playing this week, in game order.
    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.games.iter().flat_map(|game| game.teams())
    }

    pub fn plays(&self, team: &str) -> bool {
        self.team_to_game.contains_key(team)
    }

    /// The game `team` plays this week, or `None` on a bye.
    pub fn team_game(&self, team: &str) -> Option<&Game> {
        self.team_to_game.get(team).map(|&idx| &self.games[idx])
    }

    pub fn team_win_probability(&self, team: &str) -> Result<f64, PickError> {
        self.team_game(team)
            .ok_or_else(|| PickError::unknown_team(team, format!("week {}", self.number)))?
            .win_probability(team)
    }
}
