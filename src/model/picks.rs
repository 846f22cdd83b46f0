use std::collections::{BTreeMap, HashMap};

use crate::error::PickError;

/// Week number -> picked team.
///
/// Ad hoc construction does not check for repeated teams; documents are
/// checked with [`Picks::ensure_unique_teams`] when they are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picks {
    week_to_team: BTreeMap<u32, String>,
}

impl Picks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `team` for `week`, returning the pick it replaced.
    pub fn insert(&mut self, week: u32, team: impl Into<String>) -> Option<String> {
        self.week_to_team.insert(week, team.into())
    }

    pub fn get(&self, week: u32) -> Option<&str> {
        self.week_to_team.get(&week).map(String::as_str)
    }

    pub fn contains_week(&self, week: u32) -> bool {
        self.week_to_team.contains_key(&week)
    }

    /// Picks in ascending week order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.week_to_team
            .iter()
            .map(|(week, team)| (*week, team.as_str()))
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.week_to_team.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.week_to_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.week_to_team.is_empty()
    }

    /// Fails with `DuplicatePick` naming the first team found in two weeks.
    pub fn ensure_unique_teams(&self) -> Result<(), PickError> {
        let mut seen: HashMap<&str, u32> = HashMap::with_capacity(self.len());
        for (week, team) in self.iter() {
            if let Some(&first_week) = seen.get(team) {
                return Err(PickError::DuplicatePick {
                    team: team.to_string(),
                    first_week,
                    second_week: week,
                });
            }
            seen.insert(team, week);
        }
        Ok(())
    }
}

impl<T: Into<String>> FromIterator<(u32, T)> for Picks {
    fn from_iter<I: IntoIterator<Item = (u32, T)>>(iter: I) -> Self {
        Picks {
            week_to_team: iter
                .into_iter()
                .map(|(week, team)| (week, team.into()))
                .collect(),
        }
    }
}
