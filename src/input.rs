//! Raw season input.
//!
//! The scraping layer hands over three JSON files per season, each mapping
//! an owner key to its chronologically ordered records. Suspended games are
//! already excluded upstream. Array order is the chronological order the
//! aggregators rely on; dates may arrive pre-suffixed for doubleheaders or
//! get suffixed here on collision.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::gamelog::{GameRecord, PitcherAppearance, PitcherLog, SeasonData, TeamLog, TeamPitchingGame};

pub const GAME_DATA: &str = "game-data.json";
pub const PITCHER_DATA: &str = "pitcher-data.json";
pub const TEAM_PITCHING: &str = "team-pitching.json";

/// Load one season's raw data from `data_dir/<season>/`.
pub fn load_season_dir(data_dir: &Path, season: u16) -> Result<SeasonData> {
    let dir = season_dir(data_dir, season);

    let games: BTreeMap<String, Vec<GameRecord>> = read_json(&dir.join(GAME_DATA))?;
    let pitchers: BTreeMap<String, Vec<PitcherAppearance>> = read_json(&dir.join(PITCHER_DATA))?;
    let team_pitching: BTreeMap<String, Vec<TeamPitchingGame>> =
        read_json(&dir.join(TEAM_PITCHING))?;

    let mut data = SeasonData {
        season,
        ..SeasonData::default()
    };
    for (team, records) in games {
        let mut log = TeamLog::new(team.clone());
        for record in records {
            log.push(record);
        }
        data.teams.insert(team, log);
    }
    for (pitcher_id, appearances) in pitchers {
        let mut log = PitcherLog::new(pitcher_id.clone());
        for app in appearances {
            log.push(app);
        }
        data.pitchers.insert(pitcher_id, log);
    }
    data.team_pitching = team_pitching;
    Ok(data)
}

pub fn season_dir(data_dir: &Path, season: u16) -> PathBuf {
    data_dir.join(season.to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read season file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("decode season file {}", path.display()))
}
