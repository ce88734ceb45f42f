//! Rate-stat calculators: ERA, WHIP, BA, OBP, SLG, OPS.
//!
//! All are pure and round to the conventional precision (2 decimals for
//! ERA/WHIP, 3 for the batting rates). A zero denominator is a caller bug;
//! the guards live with the accumulators that decide whether a rate is
//! reportable at all.

use crate::innings::ip_to_decimal;

/// Earned runs per nine innings. `ip` is in IP notation.
pub fn era(earned_runs: f64, ip: f64) -> f64 {
    let innings = ip_to_decimal(ip);
    assert!(innings > 0.0, "ERA with zero innings pitched");
    round2(earned_runs * 9.0 / innings)
}

/// Walks plus hits per inning pitched. `ip` is in IP notation.
pub fn whip(ip: f64, walks: f64, hits: f64) -> f64 {
    let innings = ip_to_decimal(ip);
    assert!(innings > 0.0, "WHIP with zero innings pitched");
    round2((walks + hits) / innings)
}

/// Batting average.
pub fn ba(at_bats: u32, hits: u32) -> f64 {
    assert!(at_bats > 0, "BA with zero at-bats");
    round3(hits as f64 / at_bats as f64)
}

/// On-base percentage.
pub fn obp(hits: u32, walks: u32, hbp: u32, at_bats: u32, sac_flies: u32) -> f64 {
    let denom = at_bats + sac_flies + hbp + walks;
    assert!(denom > 0, "OBP with zero plate appearances");
    round3((hits + walks + hbp) as f64 / denom as f64)
}

/// Slugging percentage. `singles` is hits minus extra-base hits.
pub fn slg(singles: u32, doubles: u32, triples: u32, home_runs: u32, at_bats: u32) -> f64 {
    assert!(at_bats > 0, "SLG with zero at-bats");
    let bases = singles + 2 * doubles + 3 * triples + 4 * home_runs;
    round3(bases as f64 / at_bats as f64)
}

/// On-base plus slugging.
pub fn ops(obp: f64, slg: f64) -> f64 {
    round3(obp + slg)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
