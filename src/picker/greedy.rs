use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::PickError;
use crate::model::{Picks, Season, Week};

use super::diagnostics::{PickEvent, PickObserver, TRACING_OBSERVER};
use super::Picker;

/// Takes the most likely winner still available, week by week.
///
/// There is no lookahead and no backtracking: an early choice can leave a
/// later week with nobody left to pick even when a feasible assignment
/// exists. That week is reported as `GreedyInfeasible`.
///
/// Previous picks are adopted as given, including a team locked in two
/// weeks, but each must name a week of the season and a team playing in it.
pub struct GreedyPicker<'a> {
    season: &'a Season,
    previous_picks: Option<&'a Picks>,
    observer: &'a dyn PickObserver,
}

impl<'a> GreedyPicker<'a> {
    pub fn new(
        season: &'a Season,
        previous_picks: Option<&'a Picks>,
    ) -> Result<Self, PickError> {
        if let Some(previous) = previous_picks {
            season.check_picks(previous)?;
        }
        Ok(GreedyPicker {
            season,
            previous_picks,
            observer: &TRACING_OBSERVER,
        })
    }

    pub fn with_observer(mut self, observer: &'a dyn PickObserver) -> Self {
        self.observer = observer;
        self
    }
}

impl Picker for GreedyPicker<'_> {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn picks(&self) -> Result<Picks, PickError> {
        let mut used: HashSet<&str> = self
            .previous_picks
            .into_iter()
            .flat_map(|p| p.teams())
            .collect();
        let mut picks = Picks::new();

        for week in self.season.weeks() {
            let number = week.number();
            if let Some(team) = self.previous_picks.and_then(|p| p.get(number)) {
                let probability = week.team_win_probability(team)?;
                picks.insert(number, team);
                self.observer.on_event(&PickEvent::WeekPicked {
                    week: number,
                    team: team.to_string(),
                    probability,
                    locked: true,
                });
                continue;
            }

            let (team, probability) = best_available(week, &used)
                .ok_or(PickError::GreedyInfeasible { week: number })?;
            picks.insert(number, team);
            used.insert(team);
            self.observer.on_event(&PickEvent::WeekPicked {
                week: number,
                team: team.to_string(),
                probability,
                locked: false,
            });
        }
        Ok(picks)
    }
}

/// Highest probability among teams not yet used; ties go to the
/// alphabetically first name.
fn best_available<'w>(week: &'w Week, used: &HashSet<&str>) -> Option<(&'w str, f64)> {
    week.games()
        .iter()
        .flat_map(|game| {
            game.teams()
                .filter_map(move |team| game.win_probability(team).ok().map(|p| (team, p)))
        })
        .filter(|(team, _)| !used.contains(team))
        .max_by(|(team_a, p_a), (team_b, p_b)| {
            p_a.partial_cmp(p_b)
                .unwrap_or(Ordering::Equal)
                // reversed: the smaller name must compare as the larger element
                .then_with(|| team_b.cmp(team_a))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Game;
    use crate::picker::diagnostics::testing::RecordingObserver;

    fn game(one: (&str, f64), two: (&str, f64)) -> Game {
        Game::new(one, two).unwrap()
    }

    fn season() -> Season {
        let g1 = || game(("a", 0.1), ("b", 0.9));
        let g2 = || game(("c", 0.2), ("d", 0.8));
        let g3 = || game(("e", 0.3), ("f", 0.7));
        Season::new(vec![
            Week::new(1, vec![g1()]).unwrap(),
            Week::new(2, vec![g1(), g2()]).unwrap(),
            Week::new(3, vec![g1(), g2(), g3()]).unwrap(),
        ])
        .unwrap()
    }

    // Greedy leaves nobody for week 3 although a, c, b would have worked.
    fn infeasible_season() -> Season {
        Season::new(vec![
            Week::new(1, vec![game(("a", 0.1), ("b", 0.9))]).unwrap(),
            Week::new(2, vec![game(("a", 0.1), ("c", 0.9))]).unwrap(),
            Week::new(3, vec![game(("b", 0.1), ("c", 0.9))]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn picks_feasible() {
        let s = season();
        let picks = GreedyPicker::new(&s, None).unwrap().picks().unwrap();
        let expected: Picks = [(1, "b"), (2, "d"), (3, "f")].into_iter().collect();
        assert_eq!(picks, expected);
    }

    #[test]
    fn picks_infeasible() {
        let s = infeasible_season();
        let err = GreedyPicker::new(&s, None).unwrap().picks().unwrap_err();
        assert_eq!(err, PickError::GreedyInfeasible { week: 3 });
        let msg = err.to_string();
        assert!(msg.contains("Cannot solve") && msg.contains("week 3"));
    }

    #[test]
    fn previous_picks_adopted_and_used() {
        let s = season();
        let prev: Picks = [(1, "a")].into_iter().collect();
        let picks = GreedyPicker::new(&s, Some(&prev)).unwrap().picks().unwrap();
        assert_eq!(picks.get(1), Some("a"));
        // b is free again once week 1 is locked to a
        assert_eq!(picks.get(2), Some("b"));
        assert_eq!(picks.get(3), Some("d"));
    }

    #[test]
    fn previous_picks_seed_used_set_for_other_weeks() {
        let s = season();
        let prev: Picks = [(3, "b")].into_iter().collect();
        let picks = GreedyPicker::new(&s, Some(&prev)).unwrap().picks().unwrap();
        // b is locked in week 3 so week 1 must settle for a
        assert_eq!(picks.get(1), Some("a"));
        assert_eq!(picks.get(2), Some("d"));
        assert_eq!(picks.get(3), Some("b"));
    }

    #[test]
    fn previous_picks_not_cross_validated() {
        let s = season();
        let prev: Picks = [(1, "b"), (2, "b")].into_iter().collect();
        let picks = GreedyPicker::new(&s, Some(&prev)).unwrap().picks().unwrap();
        assert_eq!(picks.get(1), Some("b"));
        assert_eq!(picks.get(2), Some("b"));
        assert_eq!(picks.get(3), Some("d"));
    }

    #[test]
    fn previous_pick_outside_season_rejected() {
        let s = Season::new(vec![
            Week::new(1, vec![game(("a", 0.4), ("b", 0.6))]).unwrap(),
            Week::new(2, vec![game(("a", 0.4), ("c", 0.6))]).unwrap(),
        ])
        .unwrap();
        let prev: Picks = [(9, "a")].into_iter().collect();
        assert_eq!(
            GreedyPicker::new(&s, Some(&prev)).err(),
            Some(PickError::InvalidWeek(9))
        );
    }

    #[test]
    fn previous_pick_of_absent_team_rejected() {
        let s = season();
        let observer = RecordingObserver::default();
        let prev: Picks = [(1, "zz")].into_iter().collect();
        let result = GreedyPicker::new(&s, Some(&prev))
            .map(|picker| picker.with_observer(&observer).picks());
        assert!(matches!(
            result,
            Err(PickError::UnknownTeam { ref team, .. }) if team == "zz"
        ));
        assert!(observer.events().is_empty());
    }

    #[test]
    fn full_previous_result_is_returned_unchanged() {
        let s = season();
        let first = GreedyPicker::new(&s, None).unwrap().picks().unwrap();
        let again = GreedyPicker::new(&s, Some(&first)).unwrap().picks().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn ties_go_to_first_name() {
        let s = Season::new(vec![Week::new(
            1,
            vec![game(("y", 0.6), ("z", 0.4)), game(("x", 0.6), ("w", 0.4))],
        )
        .unwrap()])
        .unwrap();
        for _ in 0..5 {
            let picks = GreedyPicker::new(&s, None).unwrap().picks().unwrap();
            assert_eq!(picks.get(1), Some("x"));
        }
    }

    #[test]
    fn reports_each_week() {
        let s = season();
        let prev: Picks = [(1, "a")].into_iter().collect();
        let observer = RecordingObserver::default();
        GreedyPicker::new(&s, Some(&prev))
            .unwrap()
            .with_observer(&observer)
            .picks()
            .unwrap();
        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            PickEvent::WeekPicked { week: 1, locked: true, .. }
        ));
        assert!(matches!(
            &events[2],
            PickEvent::WeekPicked { week: 3, locked: false, team, .. } if team == "d"
        ));
    }
}
