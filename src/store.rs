//! SQLite persistence for enriched seasons.
//!
//! Keyed season -> team -> date (and pitcher id -> date). Raw counting stats
//! get their own columns; the derived pregame block is stored as one JSON
//! payload per game so the schema does not chase every split field.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::gamelog::{
    BattingRates, BullpenGame, BullpenLog, GameRecord, Hand, PitcherAppearance, PitcherLog,
    SeasonData, TeamLog,
};

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS games (
            season INTEGER NOT NULL,
            team TEXT NOT NULL,
            date TEXT NOT NULL,
            home INTEGER NOT NULL,
            opp TEXT NOT NULL,
            runs INTEGER NOT NULL,
            at_bats INTEGER NOT NULL,
            hits INTEGER NOT NULL,
            doubles INTEGER NOT NULL,
            triples INTEGER NOT NULL,
            home_runs INTEGER NOT NULL,
            walks INTEGER NOT NULL,
            hbp INTEGER NOT NULL,
            sac_flies INTEGER NOT NULL,
            opp_starter_hand TEXT NULL,
            opp_starter TEXT NULL,
            opp_starter_name TEXT NULL,
            opp_starter_id TEXT NULL,
            derived_json TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (season, team, date)
        );
        CREATE INDEX IF NOT EXISTS idx_games_team ON games(season, team);

        CREATE TABLE IF NOT EXISTS pitcher_games (
            season INTEGER NOT NULL,
            pitcher_id TEXT NOT NULL,
            date TEXT NOT NULL,
            team TEXT NOT NULL,
            opp TEXT NOT NULL,
            ip REAL NOT NULL,
            earned_runs INTEGER NOT NULL,
            hits INTEGER NOT NULL,
            walks INTEGER NOT NULL,
            pregame_era REAL NULL,
            pregame_whip REAL NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (season, pitcher_id, date)
        );

        CREATE TABLE IF NOT EXISTS bullpen_games (
            season INTEGER NOT NULL,
            team TEXT NOT NULL,
            date TEXT NOT NULL,
            outs INTEGER NOT NULL,
            earned_runs INTEGER NOT NULL,
            hits INTEGER NOT NULL,
            walks INTEGER NOT NULL,
            pregame_era REAL NULL,
            pregame_whip REAL NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (season, team, date)
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct SaveSummary {
    pub games: usize,
    pub pitcher_games: usize,
    pub bullpen_games: usize,
}

/// The derived block persisted as one JSON column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DerivedBatting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pregame: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    home_split: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    away_split: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vs_right: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vs_left: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_10: Option<BattingRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_15: Option<BattingRates>,
}

impl DerivedBatting {
    fn of(game: &GameRecord) -> Self {
        Self {
            pregame: game.pregame,
            home_split: game.home_split,
            away_split: game.away_split,
            vs_right: game.vs_right,
            vs_left: game.vs_left,
            last_10: game.last_10,
            last_15: game.last_15,
        }
    }

    fn apply(self, game: &mut GameRecord) {
        game.pregame = self.pregame;
        game.home_split = self.home_split;
        game.away_split = self.away_split;
        game.vs_right = self.vs_right;
        game.vs_left = self.vs_left;
        game.last_10 = self.last_10;
        game.last_15 = self.last_15;
    }
}

pub fn save_season(conn: &mut Connection, data: &SeasonData) -> Result<SaveSummary> {
    let mut summary = SaveSummary::default();
    let now = Utc::now().to_rfc3339();
    let tx = conn.transaction().context("begin save transaction")?;

    for log in data.teams.values() {
        for game in log.games() {
            upsert_game(&tx, data.season, &log.team, game, &now)?;
            summary.games += 1;
        }
    }
    for log in data.pitchers.values() {
        for app in log.appearances() {
            upsert_pitcher_game(&tx, data.season, &log.pitcher_id, app, &now)?;
            summary.pitcher_games += 1;
        }
    }
    for log in data.bullpens.values() {
        for game in log.games() {
            upsert_bullpen_game(&tx, data.season, &log.team, game, &now)?;
            summary.bullpen_games += 1;
        }
    }

    tx.commit().context("commit save transaction")?;
    Ok(summary)
}

fn upsert_game(
    tx: &rusqlite::Transaction<'_>,
    season: u16,
    team: &str,
    game: &GameRecord,
    now: &str,
) -> Result<()> {
    let derived = serde_json::to_string(&DerivedBatting::of(game))
        .context("serialize derived batting block")?;
    tx.execute(
        r#"
        INSERT INTO games (
            season, team, date, home, opp,
            runs, at_bats, hits, doubles, triples, home_runs, walks, hbp, sac_flies,
            opp_starter_hand, opp_starter, opp_starter_name, opp_starter_id,
            derived_json, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
        ON CONFLICT(season, team, date) DO UPDATE SET
            home = excluded.home,
            opp = excluded.opp,
            runs = excluded.runs,
            at_bats = excluded.at_bats,
            hits = excluded.hits,
            doubles = excluded.doubles,
            triples = excluded.triples,
            home_runs = excluded.home_runs,
            walks = excluded.walks,
            hbp = excluded.hbp,
            sac_flies = excluded.sac_flies,
            opp_starter_hand = excluded.opp_starter_hand,
            opp_starter = excluded.opp_starter,
            opp_starter_name = excluded.opp_starter_name,
            opp_starter_id = excluded.opp_starter_id,
            derived_json = excluded.derived_json,
            updated_at = excluded.updated_at
        "#,
        params![
            season as i64,
            team,
            game.date,
            game.home as i64,
            game.opp,
            game.runs as i64,
            game.at_bats as i64,
            game.hits as i64,
            game.doubles as i64,
            game.triples as i64,
            game.home_runs as i64,
            game.walks as i64,
            game.hbp as i64,
            game.sac_flies as i64,
            hand_to_str(game.opp_starter_hand),
            game.opp_starter,
            game.opp_starter_name,
            game.opp_starter_id,
            derived,
            now,
        ],
    )
    .context("upsert game")?;
    Ok(())
}

fn upsert_pitcher_game(
    tx: &rusqlite::Transaction<'_>,
    season: u16,
    pitcher_id: &str,
    app: &PitcherAppearance,
    now: &str,
) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO pitcher_games (
            season, pitcher_id, date, team, opp,
            ip, earned_runs, hits, walks, pregame_era, pregame_whip, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(season, pitcher_id, date) DO UPDATE SET
            team = excluded.team,
            opp = excluded.opp,
            ip = excluded.ip,
            earned_runs = excluded.earned_runs,
            hits = excluded.hits,
            walks = excluded.walks,
            pregame_era = excluded.pregame_era,
            pregame_whip = excluded.pregame_whip,
            updated_at = excluded.updated_at
        "#,
        params![
            season as i64,
            pitcher_id,
            app.date,
            app.team,
            app.opp,
            app.ip,
            app.earned_runs as i64,
            app.hits as i64,
            app.walks as i64,
            app.pregame_era,
            app.pregame_whip,
            now,
        ],
    )
    .context("upsert pitcher game")?;
    Ok(())
}

fn upsert_bullpen_game(
    tx: &rusqlite::Transaction<'_>,
    season: u16,
    team: &str,
    game: &BullpenGame,
    now: &str,
) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO bullpen_games (
            season, team, date, outs, earned_runs, hits, walks,
            pregame_era, pregame_whip, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(season, team, date) DO UPDATE SET
            outs = excluded.outs,
            earned_runs = excluded.earned_runs,
            hits = excluded.hits,
            walks = excluded.walks,
            pregame_era = excluded.pregame_era,
            pregame_whip = excluded.pregame_whip,
            updated_at = excluded.updated_at
        "#,
        params![
            season as i64,
            team,
            game.date,
            game.outs,
            game.earned_runs,
            game.hits,
            game.walks,
            game.pregame_era,
            game.pregame_whip,
            now,
        ],
    )
    .context("upsert bullpen game")?;
    Ok(())
}

/// Load one season back out, in chronological order per series.
///
/// ISO dates order lexically, and a bare date sorts before its
/// doubleheader-suffixed twin, so `ORDER BY date` reconstructs the
/// insertion order the aggregators require.
pub fn load_season(conn: &Connection, season: u16) -> Result<SeasonData> {
    let mut data = SeasonData {
        season,
        ..SeasonData::default()
    };

    let mut stmt = conn
        .prepare(
            r#"
            SELECT team, date, home, opp,
                   runs, at_bats, hits, doubles, triples, home_runs, walks, hbp, sac_flies,
                   opp_starter_hand, opp_starter, opp_starter_name, opp_starter_id,
                   derived_json
            FROM games WHERE season = ?1
            ORDER BY team ASC, date ASC
            "#,
        )
        .context("prepare games query")?;
    let rows = stmt
        .query_map(params![season as i64], |row| {
            let team: String = row.get(0)?;
            let derived_json: String = row.get(17)?;
            let hand: Option<String> = row.get(13)?;
            let game = GameRecord {
                date: row.get(1)?,
                home: row.get::<_, i64>(2)? != 0,
                opp: row.get(3)?,
                runs: row.get(4)?,
                at_bats: row.get(5)?,
                hits: row.get(6)?,
                doubles: row.get(7)?,
                triples: row.get(8)?,
                home_runs: row.get(9)?,
                walks: row.get(10)?,
                hbp: row.get(11)?,
                sac_flies: row.get(12)?,
                opp_starter_hand: hand.as_deref().and_then(hand_from_str),
                opp_starter: row.get(14)?,
                opp_starter_name: row.get(15)?,
                opp_starter_id: row.get(16)?,
                pregame: None,
                home_split: None,
                away_split: None,
                vs_right: None,
                vs_left: None,
                last_10: None,
                last_15: None,
            };
            Ok((team, game, derived_json))
        })
        .context("query games")?;
    for row in rows {
        let (team, mut game, derived_json) = row.context("decode game row")?;
        let derived: DerivedBatting =
            serde_json::from_str(&derived_json).context("decode derived batting block")?;
        derived.apply(&mut game);
        data.teams
            .entry(team.clone())
            .or_insert_with(|| TeamLog::new(team))
            .push(game);
    }

    let mut stmt = conn
        .prepare(
            r#"
            SELECT pitcher_id, date, team, opp, ip, earned_runs, hits, walks,
                   pregame_era, pregame_whip
            FROM pitcher_games WHERE season = ?1
            ORDER BY pitcher_id ASC, date ASC
            "#,
        )
        .context("prepare pitcher games query")?;
    let rows = stmt
        .query_map(params![season as i64], |row| {
            let pitcher_id: String = row.get(0)?;
            Ok((
                pitcher_id,
                PitcherAppearance {
                    date: row.get(1)?,
                    team: row.get(2)?,
                    opp: row.get(3)?,
                    ip: row.get(4)?,
                    earned_runs: row.get(5)?,
                    hits: row.get(6)?,
                    walks: row.get(7)?,
                    pregame_era: row.get(8)?,
                    pregame_whip: row.get(9)?,
                },
            ))
        })
        .context("query pitcher games")?;
    for row in rows {
        let (pitcher_id, app) = row.context("decode pitcher row")?;
        data.pitchers
            .entry(pitcher_id.clone())
            .or_insert_with(|| PitcherLog::new(pitcher_id))
            .push(app);
    }

    let mut stmt = conn
        .prepare(
            r#"
            SELECT team, date, outs, earned_runs, hits, walks, pregame_era, pregame_whip
            FROM bullpen_games WHERE season = ?1
            ORDER BY team ASC, date ASC
            "#,
        )
        .context("prepare bullpen games query")?;
    let rows = stmt
        .query_map(params![season as i64], |row| {
            let team: String = row.get(0)?;
            Ok((
                team,
                BullpenGame {
                    date: row.get(1)?,
                    outs: row.get(2)?,
                    earned_runs: row.get(3)?,
                    hits: row.get(4)?,
                    walks: row.get(5)?,
                    pregame_era: row.get(6)?,
                    pregame_whip: row.get(7)?,
                },
            ))
        })
        .context("query bullpen games")?;
    for row in rows {
        let (team, game) = row.context("decode bullpen row")?;
        data.bullpens
            .entry(team.clone())
            .or_insert_with(|| BullpenLog::new(team))
            .push(game);
    }

    Ok(data)
}

fn hand_to_str(hand: Option<Hand>) -> Option<&'static str> {
    hand.map(|h| match h {
        Hand::Left => "L",
        Hand::Right => "R",
    })
}

fn hand_from_str(raw: &str) -> Option<Hand> {
    match raw {
        "L" => Some(Hand::Left),
        "R" => Some(Hand::Right),
        _ => None,
    }
}
