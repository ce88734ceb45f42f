//! Season game-log entities.
//!
//! Each team owns one chronologically ordered sequence of its own game
//! records; each pitcher owns one ordered sequence of appearances.
//! Cross-references (the opponent's record on a given date, a starter's
//! appearance) resolve by key lookup into the sibling collection, never by a
//! shared reference. Insertion order is chronological order; a doubleheader's
//! second game is disambiguated with a `" (2)"` date suffix.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel the scraping layer writes when a starter could not be resolved.
pub const UNRESOLVED_STARTER: &str = "not_found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hand {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

/// One split's batting rates, reported only when the split has samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattingRates {
    pub ba: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
}

/// One team-game of raw counting stats plus the derived pregame fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// `YYYY-MM-DD`, with `" (2)"` appended for the second game of a
    /// doubleheader.
    pub date: String,
    pub home: bool,
    pub opp: String,
    pub runs: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub hbp: u32,
    pub sac_flies: u32,
    /// Opposing starter's throwing hand; `None` when unresolved.
    #[serde(default)]
    pub opp_starter_hand: Option<Hand>,
    /// Opposing starter's last name as listed in the team game log.
    #[serde(default)]
    pub opp_starter: Option<String>,
    /// Opposing starter's full name from the box score lineup.
    #[serde(default)]
    pub opp_starter_name: Option<String>,
    /// Opposing starter's player id from the box score lineup.
    #[serde(default)]
    pub opp_starter_id: Option<String>,

    // Derived by the aggregator. Absent (not zero) until enough prior
    // samples exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregame: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_split: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_split: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs_right: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs_left: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_10: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_15: Option<BattingRates>,
}

impl GameRecord {
    pub fn singles(&self) -> u32 {
        self.hits - (self.doubles + self.triples + self.home_runs)
    }

    /// Starter id, with the scraper's unresolved sentinel mapped to `None`.
    pub fn resolved_starter_id(&self) -> Option<&str> {
        match self.opp_starter_id.as_deref() {
            Some(UNRESOLVED_STARTER) | None => None,
            Some(id) => Some(id),
        }
    }
}

/// One team's season of game records, insertion-ordered with date lookup.
#[derive(Debug, Clone, Default)]
pub struct TeamLog {
    pub team: String,
    games: Vec<GameRecord>,
    index: HashMap<String, usize>,
}

impl TeamLog {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            games: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append a game, suffixing the date when it collides with a game
    /// already recorded for that day (second game of a doubleheader).
    pub fn push(&mut self, mut game: GameRecord) {
        if self.index.contains_key(&game.date) {
            game.date = format!("{} (2)", game.date);
        }
        self.index.insert(game.date.clone(), self.games.len());
        self.games.push(game);
    }

    pub fn get(&self, date: &str) -> Option<&GameRecord> {
        self.index.get(date).map(|&i| &self.games[i])
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn games_mut(&mut self) -> &mut [GameRecord] {
        &mut self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// One pitcher-game line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherAppearance {
    pub date: String,
    pub team: String,
    pub opp: String,
    /// Innings pitched in IP notation.
    pub ip: f64,
    pub earned_runs: u32,
    pub hits: u32,
    pub walks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregame_era: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregame_whip: Option<f64>,
}

/// One pitcher's season of appearances, insertion-ordered with date lookup.
#[derive(Debug, Clone, Default)]
pub struct PitcherLog {
    pub pitcher_id: String,
    appearances: Vec<PitcherAppearance>,
    index: HashMap<String, usize>,
}

impl PitcherLog {
    pub fn new(pitcher_id: impl Into<String>) -> Self {
        Self {
            pitcher_id: pitcher_id.into(),
            appearances: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn push(&mut self, mut app: PitcherAppearance) {
        if self.index.contains_key(&app.date) {
            app.date = format!("{} (2)", app.date);
        }
        self.index.insert(app.date.clone(), self.appearances.len());
        self.appearances.push(app);
    }

    pub fn get(&self, date: &str) -> Option<&PitcherAppearance> {
        self.index.get(date).map(|&i| &self.appearances[i])
    }

    pub fn appearances(&self) -> &[PitcherAppearance] {
        &self.appearances
    }

    pub fn appearances_mut(&mut self) -> &mut [PitcherAppearance] {
        &mut self.appearances
    }

    pub fn len(&self) -> usize {
        self.appearances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appearances.is_empty()
    }
}

/// A team's full-staff pitching line for one game, from the team pitching
/// game log. Input to bullpen derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPitchingGame {
    pub date: String,
    pub opp: String,
    pub ip: f64,
    pub earned_runs: u32,
    pub hits: u32,
    pub walks: u32,
}

/// Bullpen-only line for one game (team totals minus the team's starter),
/// plus the pregame cumulative rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BullpenGame {
    pub date: String,
    pub outs: i64,
    pub earned_runs: i64,
    pub hits: i64,
    pub walks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregame_era: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregame_whip: Option<f64>,
}

impl BullpenGame {
    /// Bullpen innings for the game, rendered in IP notation.
    pub fn ip(&self) -> f64 {
        crate::innings::outs_to_ip(self.outs)
    }
}

/// One team's derived bullpen games, insertion-ordered with date lookup.
#[derive(Debug, Clone, Default)]
pub struct BullpenLog {
    pub team: String,
    games: Vec<BullpenGame>,
    index: HashMap<String, usize>,
}

impl BullpenLog {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            games: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.index.contains_key(date)
    }

    pub fn push(&mut self, game: BullpenGame) {
        self.index.insert(game.date.clone(), self.games.len());
        self.games.push(game);
    }

    pub fn get(&self, date: &str) -> Option<&BullpenGame> {
        self.index.get(date).map(|&i| &self.games[i])
    }

    pub fn games(&self) -> &[BullpenGame] {
        &self.games
    }

    pub fn games_mut(&mut self) -> &mut [BullpenGame] {
        &mut self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Everything the batch pass needs for one season.
#[derive(Debug, Clone, Default)]
pub struct SeasonData {
    pub season: u16,
    pub teams: BTreeMap<String, TeamLog>,
    pub pitchers: BTreeMap<String, PitcherLog>,
    /// Team pitching game logs, in chronological order per team.
    pub team_pitching: BTreeMap<String, Vec<TeamPitchingGame>>,
    /// Derived by the pipeline.
    pub bullpens: BTreeMap<String, BullpenLog>,
}

/// Strip the doubleheader suffix: `"2021-08-17 (2)"` -> `"2021-08-17"`.
pub fn base_date(date: &str) -> &str {
    match date.split_once(' ') {
        Some((base, _)) => base,
        None => date,
    }
}

pub fn parse_base_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(base_date(date), "%Y-%m-%d")
        .with_context(|| format!("unparseable game date {date:?}"))
}

/// The aggregator assumes sorted input; reject the batch otherwise.
/// Equal dates are legal only via the doubleheader suffix, which keeps the
/// keys distinct while preserving insertion order.
pub fn ensure_chronological<'a, I>(series: &str, dates: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut prev: Option<(NaiveDate, String)> = None;
    for date in dates {
        let parsed = parse_base_date(date)?;
        if let Some((prev_date, prev_raw)) = &prev
            && parsed < *prev_date
        {
            bail!("{series}: out-of-order game dates ({prev_raw} then {date})");
        }
        prev = Some((parsed, date.to_string()));
    }
    Ok(())
}
