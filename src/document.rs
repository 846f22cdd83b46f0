//! Season and picks documents, stored as JSON or YAML with the same shape.
//!
//! ```text
//! season := [ { "week": { "number": 1, "games": [ { "game": [ team, team ] } ] } } ]
//! team   := { "team": { "name": "b", "probability": 0.9 } }
//! picks  := [ { "week": { "number": 1, "pick": "b" } } ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PickError;
use crate::model::{Game, Picks, Season, Week};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonDocument(pub Vec<WeekEntry>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekEntry {
    pub week: WeekDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekDocument {
    pub number: u32,
    pub games: Vec<GameEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEntry {
    /// Must hold exactly two teams.
    pub game: Vec<TeamEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: TeamDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDocument {
    pub name: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PicksDocument(pub Vec<PickEntry>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickEntry {
    pub week: PickDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickDocument {
    pub number: u32,
    pub pick: String,
}

impl TryFrom<SeasonDocument> for Season {
    type Error = PickError;

    fn try_from(doc: SeasonDocument) -> Result<Self, Self::Error> {
        let weeks = doc
            .0
            .into_iter()
            .map(|entry| week_from_document(entry.week))
            .collect::<Result<Vec<_>, _>>()?;
        Season::new(weeks)
    }
}

fn week_from_document(doc: WeekDocument) -> Result<Week, PickError> {
    let number = doc.number;
    let games = doc
        .games
        .into_iter()
        .map(|entry| {
            let [one, two]: [TeamEntry; 2] = entry.game.try_into().map_err(|teams: Vec<_>| {
                PickError::MalformedGame(format!(
                    "week {number} has a game with {} team(s), expected 2",
                    teams.len()
                ))
            })?;
            Game::new(
                (one.team.name, one.team.probability),
                (two.team.name, two.team.probability),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Week::new(number, games)
}

impl TryFrom<PicksDocument> for Picks {
    type Error = PickError;

    /// Rejects repeated week numbers and teams picked in more than one week.
    fn try_from(doc: PicksDocument) -> Result<Self, Self::Error> {
        let mut week_to_team = BTreeMap::new();
        for PickEntry { week } in doc.0 {
            if week_to_team.insert(week.number, week.pick).is_some() {
                return Err(PickError::DuplicateWeek(week.number));
            }
        }
        let picks: Picks = week_to_team.into_iter().collect();
        picks.ensure_unique_teams()?;
        Ok(picks)
    }
}

impl From<&Picks> for PicksDocument {
    fn from(picks: &Picks) -> Self {
        PicksDocument(
            picks
                .iter()
                .map(|(number, team)| PickEntry {
                    week: PickDocument {
                        number,
                        pick: team.to_string(),
                    },
                })
                .collect(),
        )
    }
}

/// On-disk encoding of a document, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` (any case) are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T> {
        Ok(match self {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            DocumentFormat::Json => serde_json::to_string_pretty(value)?,
            DocumentFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

pub fn parse_season_as(text: &str, format: DocumentFormat) -> Result<Season> {
    let doc: SeasonDocument = format
        .decode(text)
        .context("Failed to parse season document")?;
    Ok(Season::try_from(doc)?)
}

pub fn parse_picks_as(text: &str, format: DocumentFormat) -> Result<Picks> {
    let doc: PicksDocument = format
        .decode(text)
        .context("Failed to parse picks document")?;
    Ok(Picks::try_from(doc)?)
}

pub fn parse_season(json: &str) -> Result<Season> {
    parse_season_as(json, DocumentFormat::Json)
}

pub fn parse_picks(json: &str) -> Result<Picks> {
    parse_picks_as(json, DocumentFormat::Json)
}

/// Picks sorted by week number.
pub fn picks_to_string(picks: &Picks, format: DocumentFormat) -> Result<String> {
    format
        .encode(&PicksDocument::from(picks))
        .context("Failed to serialize picks")
}

/// Pretty-printed JSON, sorted by week number.
pub fn picks_to_json(picks: &Picks) -> Result<String> {
    picks_to_string(picks, DocumentFormat::Json)
}

pub fn load_season(path: impl AsRef<Path>) -> Result<Season> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read season from {}", path.display()))?;
    parse_season_as(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("Invalid season document {}", path.display()))
}

pub fn load_picks(path: impl AsRef<Path>) -> Result<Picks> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read picks from {}", path.display()))?;
    parse_picks_as(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("Invalid picks document {}", path.display()))
}

/// Writes YAML for `.yaml`/`.yml` paths and JSON otherwise.
pub fn save_picks(picks: &Picks, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut text = picks_to_string(picks, DocumentFormat::from_path(path))?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("Failed to write picks to {}", path.display()))
}
