//! Season batch pass.
//!
//! Fans the three aggregations out across a rayon pool: one unit of work per
//! team batting log, per pitcher, and per team bullpen. Order is load-bearing
//! only within a single series, so each worker owns its accumulators and the
//! fan-in just collects counts and skip notes. Any out-of-order series
//! rejects the whole batch.

use anyhow::Result;
use rayon::prelude::*;

use crate::batting::enrich_team_batting;
use crate::bullpen::{derive_team_bullpen, enrich_bullpen_log};
use crate::gamelog::SeasonData;
use crate::pitching::enrich_pitcher_log;

#[derive(Debug, Clone, Default)]
pub struct EnrichSummary {
    pub season: u16,
    pub teams: usize,
    pub games_enriched: usize,
    pub pitchers: usize,
    pub appearances_enriched: usize,
    pub bullpen_games: usize,
    pub bullpen_games_enriched: usize,
    /// Games excluded from bullpen aggregation, with reasons.
    pub skipped: Vec<String>,
}

/// Run the full pregame enrichment over one season, in place.
pub fn enrich_season(data: &mut SeasonData) -> Result<EnrichSummary> {
    let mut summary = EnrichSummary {
        season: data.season,
        ..EnrichSummary::default()
    };

    // Batting: one unit per team.
    let mut team_logs: Vec<_> = data.teams.values_mut().collect();
    let batting: Vec<usize> = team_logs
        .par_iter_mut()
        .map(|log| enrich_team_batting(log))
        .collect::<Result<_>>()?;
    summary.teams = batting.len();
    summary.games_enriched = batting.iter().sum();

    // Starters: one unit per pitcher.
    let mut pitcher_logs: Vec<_> = data.pitchers.values_mut().collect();
    let pitching: Vec<usize> = pitcher_logs
        .par_iter_mut()
        .map(|log| enrich_pitcher_log(log))
        .collect::<Result<_>>()?;
    summary.pitchers = pitching.len();
    summary.appearances_enriched = pitching.iter().sum();

    // Bullpens: derive against the (now read-only) team and pitcher logs,
    // then fan the per-team logs back in.
    let units: Vec<_> = data.team_pitching.iter().collect();
    let derived = units
        .par_iter()
        .map(|(team, lines)| {
            derive_team_bullpen(team.as_str(), lines.as_slice(), &data.teams, &data.pitchers)
        })
        .collect::<Result<Vec<_>>>()?;

    for mut derivation in derived {
        summary.bullpen_games += derivation.log.len();
        summary.bullpen_games_enriched += enrich_bullpen_log(&mut derivation.log)?;
        summary.skipped.append(&mut derivation.skipped);
        data.bullpens
            .insert(derivation.log.team.clone(), derivation.log);
    }

    Ok(summary)
}
