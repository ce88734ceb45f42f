//! Bullpen derivation and aggregation.
//!
//! A bullpen line is the team's full-staff pitching totals minus its own
//! starter's line. The starter is found through the opponent's game record
//! (the opponent's "opposing starter" is this team's starter) and must be
//! verified across the two independently scraped name fields before any
//! subtraction happens. A game that cannot be verified is excluded outright
//! and the season-cumulative state does not advance for that date.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::gamelog::{
    BullpenGame, BullpenLog, PitcherLog, TeamLog, TeamPitchingGame, ensure_chronological,
};
use crate::innings::ip_to_outs;
use crate::pitching::PitchingTotals;

/// Cross-source identity check: the game-log last name must appear within
/// the box-score full name. ("Snell", "Blake Snell") -> true.
pub fn starter_verified(last_name: &str, full_name: &str) -> bool {
    !last_name.is_empty() && full_name.to_lowercase().contains(&last_name.to_lowercase())
}

/// Result of deriving one team's bullpen games.
#[derive(Debug, Clone)]
pub struct BullpenDerivation {
    pub log: BullpenLog,
    /// Games excluded from bullpen aggregation, with the reason.
    pub skipped: Vec<String>,
}

/// Derive a team's bullpen-only game lines for a season.
///
/// `lines` is the team's pitching game log in chronological order; starter
/// lookups go through `teams` (the opponent's record for the date) and
/// `pitchers` (the starter's own appearance).
pub fn derive_team_bullpen(
    team: &str,
    lines: &[TeamPitchingGame],
    teams: &BTreeMap<String, TeamLog>,
    pitchers: &BTreeMap<String, PitcherLog>,
) -> Result<BullpenDerivation> {
    ensure_chronological(team, lines.iter().map(|l| l.date.as_str()))?;

    let mut log = BullpenLog::new(team);
    let mut skipped = Vec::new();

    for line in lines {
        // Second game of a doubleheader shows up under the same date in the
        // team pitching log; re-key it before any cross-log lookup.
        let mut date = line.date.clone();
        if log.contains(&date) {
            date = format!("{date} (2)");
        }

        let Some(opp_log) = teams.get(&line.opp) else {
            skipped.push(format!("{team} {date}: opponent {} has no season log", line.opp));
            continue;
        };
        // Both season logs must carry the date; a mismatch means the game
        // was suspended on one side of the scrape.
        let Some(opp_record) = opp_log.get(&date) else {
            skipped.push(format!("{team} {date}: missing from {} season log", line.opp));
            continue;
        };
        if teams.get(team).and_then(|t| t.get(&date)).is_none() {
            skipped.push(format!("{team} {date}: missing from own season log"));
            continue;
        }

        let Some(starter_id) = opp_record.resolved_starter_id() else {
            skipped.push(format!("{team} {date}: starter unresolved"));
            continue;
        };
        let (Some(last_name), Some(full_name)) = (
            opp_record.opp_starter.as_deref(),
            opp_record.opp_starter_name.as_deref(),
        ) else {
            skipped.push(format!("{team} {date}: starter name missing from a source"));
            continue;
        };
        if !starter_verified(last_name, full_name) {
            skipped.push(format!(
                "{team} {date}: starter mismatch ({last_name:?} not in {full_name:?})"
            ));
            continue;
        }
        let Some(starter) = pitchers.get(starter_id).and_then(|p| p.get(&date)) else {
            skipped.push(format!("{team} {date}: no appearance for starter {starter_id}"));
            continue;
        };

        log.push(BullpenGame {
            date,
            outs: ip_to_outs(line.ip) - ip_to_outs(starter.ip),
            earned_runs: line.earned_runs as i64 - starter.earned_runs as i64,
            hits: line.hits as i64 - starter.hits as i64,
            walks: line.walks as i64 - starter.walks as i64,
            pregame_era: None,
            pregame_whip: None,
        });
    }

    Ok(BullpenDerivation { log, skipped })
}

/// Walk a derived bullpen log and fill pregame ERA/WHIP, read-then-fold.
///
/// Returns the number of games that received pregame rates. The season can
/// stay at zero outs past the first game (a complete-game start leaves the
/// bullpen unused), so the gate is on accumulated outs, not game index.
pub fn enrich_bullpen_log(log: &mut BullpenLog) -> Result<usize> {
    ensure_chronological(&log.team, log.games().iter().map(|g| g.date.as_str()))?;

    let mut season = PitchingTotals::default();
    let mut enriched = 0usize;
    for game in log.games_mut() {
        if season.outs > 0 {
            game.pregame_era = season.era();
            game.pregame_whip = season.whip();
            enriched += 1;
        }
        season.fold(game.outs, game.earned_runs, game.hits, game.walks);
    }
    Ok(enriched)
}
