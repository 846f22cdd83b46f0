use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::PickError;

use super::picks::Picks;
use super::week::Week;

/// Weeks spanning a season, keyed by week number.
///
/// Immutable once built, so one `Season` can be shared by several pickers
/// running on different threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    weeks: BTreeMap<u32, Week>,
    /// Team -> week numbers it plays in, ascending.
    team_weeks: HashMap<String, Vec<u32>>,
    teams: BTreeSet<String>,
}

impl Season {
    /// Fails with `DuplicateWeek` when two weeks share a number.
    pub fn new(weeks: impl IntoIterator<Item = Week>) -> Result<Self, PickError> {
        let mut by_number = BTreeMap::new();
        for week in weeks {
            let number = week.number();
            if by_number.insert(number, week).is_some() {
                return Err(PickError::DuplicateWeek(number));
            }
        }

        // BTreeMap iteration is ascending, so every list below ends up sorted.
        let mut team_weeks: HashMap<String, Vec<u32>> = HashMap::new();
        for (number, week) in &by_number {
            for team in week.teams() {
                team_weeks.entry(team.to_string()).or_default().push(*number);
            }
        }
        let teams = team_weeks.keys().cloned().collect();

        Ok(Season {
            weeks: by_number,
            team_weeks,
            teams,
        })
    }

    /// Weeks in ascending week-number order.
    pub fn weeks(&self) -> impl Iterator<Item = &Week> + '_ {
        self.weeks.values()
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn nth_week(&self, week_number: u32) -> Result<&Week, PickError> {
        self.weeks
            .get(&week_number)
            .ok_or(PickError::InvalidWeek(week_number))
    }

    /// Weeks `team` plays in, ascending. Empty for a team that never plays.
    pub fn team_weeks(&self, team: &str) -> Vec<&Week> {
        self.team_weeks
            .get(team)
            .map(|numbers| numbers.iter().map(|n| &self.weeks[n]).collect())
            .unwrap_or_default()
    }

    /// Every distinct team across the season, sorted by name.
    pub fn teams(&self) -> &BTreeSet<String> {
        &self.teams
    }

    /// Probability that every pick in `picks` wins.
    pub fn picks_win_probability(&self, picks: &Picks) -> Result<f64, PickError> {
        picks.iter().try_fold(1.0, |acc, (week, team)| {
            Ok(acc * self.nth_week(week)?.team_win_probability(team)?)
        })
    }

    /// Every pick must name a week of this season and a team playing that
    /// week. A team picked in two weeks is not an error here.
    pub fn check_picks(&self, picks: &Picks) -> Result<(), PickError> {
        for (week, team) in picks.iter() {
            if !self.nth_week(week)?.plays(team) {
                return Err(PickError::unknown_team(team, format!("week {week}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Game;
    use approx::assert_relative_eq;

    fn game_one() -> Game {
        Game::new(("a", 0.1), ("b", 0.9)).unwrap()
    }
    fn game_two() -> Game {
        Game::new(("c", 0.2), ("d", 0.8)).unwrap()
    }
    fn game_three() -> Game {
        Game::new(("e", 0.3), ("f", 0.7)).unwrap()
    }

    fn weeks() -> Vec<Week> {
        vec![
            Week::new(1, vec![game_one()]).unwrap(),
            Week::new(2, vec![game_one(), game_two()]).unwrap(),
            Week::new(3, vec![game_one(), game_two(), game_three()]).unwrap(),
        ]
    }

    fn season() -> Season {
        // Out of order on purpose: iteration must still be ascending.
        let mut ws = weeks();
        ws.reverse();
        Season::new(ws).unwrap()
    }

    #[test]
    fn weeks_ascending() {
        let numbers: Vec<u32> = season().weeks().map(Week::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(season().week_count(), 3);
    }

    #[test]
    fn nth_week_found_and_missing() {
        let s = season();
        let ws = weeks();
        for w in &ws {
            assert_eq!(s.nth_week(w.number()).unwrap(), w);
        }
        let err = s.nth_week(4).unwrap_err();
        assert_eq!(err, PickError::InvalidWeek(4));
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains("not included"));
    }

    #[test]
    fn team_weeks_index() {
        let s = season();
        let numbers = |team: &str| s.team_weeks(team).iter().map(|w| w.number()).collect::<Vec<_>>();
        assert_eq!(numbers("a"), vec![1, 2, 3]);
        assert_eq!(numbers("c"), vec![2, 3]);
        assert_eq!(numbers("f"), vec![3]);
        assert!(s.team_weeks("z").is_empty());
    }

    #[test]
    fn teams_across_season() {
        let expected: BTreeSet<String> = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(season().teams(), &expected);
    }

    #[test]
    fn empty_picks_have_probability_one() {
        assert_relative_eq!(
            season().picks_win_probability(&Picks::new()).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        let empty = Season::new(Vec::new()).unwrap();
        assert_relative_eq!(
            empty.picks_win_probability(&Picks::new()).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn picks_probability_is_product() {
        let picks: Picks = [(1, "b"), (2, "d"), (3, "f")].into_iter().collect();
        assert_relative_eq!(
            season().picks_win_probability(&picks).unwrap(),
            0.9 * 0.8 * 0.7,
            epsilon = 1e-12
        );
    }

    #[test]
    fn picks_probability_propagates_lookup_errors() {
        let bad_week: Picks = [(7, "a")].into_iter().collect();
        assert_eq!(
            season().picks_win_probability(&bad_week).unwrap_err(),
            PickError::InvalidWeek(7)
        );
        let bad_team: Picks = [(1, "f")].into_iter().collect();
        assert!(matches!(
            season().picks_win_probability(&bad_team),
            Err(PickError::UnknownTeam { .. })
        ));
    }

    #[test]
    fn check_picks_names_week_and_team() {
        let s = season();
        let ok: Picks = [(1, "a"), (3, "a")].into_iter().collect();
        assert!(s.check_picks(&ok).is_ok());
        let bad_week: Picks = [(9, "a")].into_iter().collect();
        assert_eq!(s.check_picks(&bad_week).unwrap_err(), PickError::InvalidWeek(9));
        let bad_team: Picks = [(1, "zz")].into_iter().collect();
        assert_eq!(
            s.check_picks(&bad_team).unwrap_err(),
            PickError::unknown_team("zz", "week 1")
        );
    }

    #[test]
    fn rejects_repeated_week_number() {
        let err = Season::new(vec![
            Week::new(1, vec![game_one()]).unwrap(),
            Week::new(1, vec![game_two()]).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, PickError::DuplicateWeek(1));
    }
}
