//! Incremental per-pitcher ERA/WHIP aggregation.
//!
//! Same read-then-fold step as the batting pass, with a single cumulative
//! accumulator per pitcher and outs as the running innings representation.

use anyhow::Result;

use crate::gamelog::{PitcherLog, ensure_chronological};
use crate::innings::{ip_to_outs, outs_to_ip};
use crate::rates;

/// Running pitching sums. Innings accumulate as whole outs so repeated
/// addition stays exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchingTotals {
    pub outs: i64,
    pub earned_runs: i64,
    pub hits: i64,
    pub walks: i64,
}

impl PitchingTotals {
    pub fn fold(&mut self, outs: i64, earned_runs: i64, hits: i64, walks: i64) {
        self.outs += outs;
        self.earned_runs += earned_runs;
        self.hits += hits;
        self.walks += walks;
    }

    pub fn era(&self) -> Option<f64> {
        if self.outs <= 0 {
            return None;
        }
        Some(rates::era(self.earned_runs as f64, outs_to_ip(self.outs)))
    }

    pub fn whip(&self) -> Option<f64> {
        if self.outs <= 0 {
            return None;
        }
        Some(rates::whip(
            outs_to_ip(self.outs),
            self.walks as f64,
            self.hits as f64,
        ))
    }
}

/// Walk one pitcher's appearances and fill pregame ERA/WHIP.
///
/// Returns the number of appearances that received pregame rates. An
/// appearance before any recorded outs (including a first start) gets none.
pub fn enrich_pitcher_log(log: &mut PitcherLog) -> Result<usize> {
    ensure_chronological(
        &log.pitcher_id,
        log.appearances().iter().map(|a| a.date.as_str()),
    )?;

    let mut season = PitchingTotals::default();
    let mut enriched = 0usize;
    for app in log.appearances_mut() {
        if season.outs > 0 {
            app.pregame_era = season.era();
            app.pregame_whip = season.whip();
            enriched += 1;
        }
        season.fold(
            ip_to_outs(app.ip),
            app.earned_runs as i64,
            app.hits as i64,
            app.walks as i64,
        );
    }
    Ok(enriched)
}
