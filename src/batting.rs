//! Incremental batting aggregation.
//!
//! One forward pass per team in chronological order. Every step first reads
//! the cumulative state built from strictly earlier games (pregame carry,
//! split rates, trailing windows) and only then folds the current game's
//! counts in. That read-then-fold ordering is the invariant the whole engine
//! rests on: a game never contributes to its own pregame stats.

use anyhow::Result;

use crate::gamelog::{BattingRates, GameRecord, Hand, TeamLog, ensure_chronological};
use crate::rates;

/// Trailing-window sizes, in games.
pub const RECENT_WINDOWS: [usize; 2] = [10, 15];

/// Running sums of one split's counting stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattingTotals {
    pub at_bats: u32,
    pub hits: u32,
    pub walks: u32,
    pub hbp: u32,
    pub sac_flies: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
}

impl BattingTotals {
    pub fn fold(&mut self, game: &GameRecord) {
        self.at_bats += game.at_bats;
        self.hits += game.hits;
        self.walks += game.walks;
        self.hbp += game.hbp;
        self.sac_flies += game.sac_flies;
        self.doubles += game.doubles;
        self.triples += game.triples;
        self.home_runs += game.home_runs;
    }

    pub fn singles(&self) -> u32 {
        self.hits - (self.doubles + self.triples + self.home_runs)
    }

    /// Current rates, or `None` while the split has no at-bats. Absence is
    /// load-bearing: a zero-filled rate would poison downstream features.
    pub fn rates(&self) -> Option<BattingRates> {
        if self.at_bats == 0 {
            return None;
        }
        let obp = rates::obp(
            self.hits,
            self.walks,
            self.hbp,
            self.at_bats,
            self.sac_flies,
        );
        let slg = rates::slg(
            self.singles(),
            self.doubles,
            self.triples,
            self.home_runs,
            self.at_bats,
        );
        Some(BattingRates {
            ba: rates::ba(self.at_bats, self.hits),
            obp,
            slg,
            ops: rates::ops(obp, slg),
        })
    }
}

/// Sum the trailing `window` games ending just before index `i`.
///
/// Recomputed from the records directly each game rather than slid, so the
/// window can never drift from the log it summarizes.
fn trailing_totals(prior: &[GameRecord], window: usize) -> BattingTotals {
    let start = prior.len().saturating_sub(window);
    let mut totals = BattingTotals::default();
    for game in &prior[start..] {
        totals.fold(game);
    }
    totals
}

/// Walk one team's season and fill every derived batting field.
///
/// Returns the number of games enriched (all but the first, which by
/// definition has no pregame state).
pub fn enrich_team_batting(log: &mut TeamLog) -> Result<usize> {
    ensure_chronological(&log.team, log.games().iter().map(|g| g.date.as_str()))?;

    let mut season = BattingTotals::default();
    let mut home = BattingTotals::default();
    let mut away = BattingTotals::default();
    let mut vs_right = BattingTotals::default();
    let mut vs_left = BattingTotals::default();
    let mut enriched = 0usize;

    let games = log.games_mut();
    for i in 0..games.len() {
        let (prior, rest) = games.split_at_mut(i);
        let game = &mut rest[0];

        if i > 0 {
            // Carry the cumulative season rates forward as this game's
            // pregame line, then report each split that has samples.
            game.pregame = season.rates();
            game.home_split = home.rates();
            game.away_split = away.rates();
            game.vs_right = vs_right.rates();
            game.vs_left = vs_left.rates();
            game.last_10 = trailing_totals(prior, RECENT_WINDOWS[0]).rates();
            game.last_15 = trailing_totals(prior, RECENT_WINDOWS[1]).rates();
            enriched += 1;
        }

        season.fold(game);
        if game.home {
            home.fold(game);
        } else {
            away.fold(game);
        }
        // Handedness split only folds when the opposing starter resolved.
        match game.opp_starter_hand {
            Some(Hand::Right) => vs_right.fold(game),
            Some(Hand::Left) => vs_left.fold(game),
            None => {}
        }
    }

    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamelog::GameRecord;

    fn game(date: &str, home: bool, hand: Option<Hand>, ab: u32, hits: u32) -> GameRecord {
        GameRecord {
            date: date.to_string(),
            home,
            opp: "NYM".to_string(),
            runs: hits,
            at_bats: ab,
            hits,
            doubles: 0,
            triples: 0,
            home_runs: 0,
            walks: 0,
            hbp: 0,
            sac_flies: 0,
            opp_starter_hand: hand,
            opp_starter: None,
            opp_starter_name: None,
            opp_starter_id: None,
            pregame: None,
            home_split: None,
            away_split: None,
            vs_right: None,
            vs_left: None,
            last_10: None,
            last_15: None,
        }
    }

    #[test]
    fn three_game_season_end_to_end() {
        let mut log = TeamLog::new("BOS");
        log.push(game("2021-04-01", true, Some(Hand::Right), 4, 2));
        log.push(game("2021-04-02", false, Some(Hand::Left), 4, 1));
        log.push(game("2021-04-03", true, Some(Hand::Right), 4, 3));
        let enriched = enrich_team_batting(&mut log).unwrap();
        assert_eq!(enriched, 2);

        let games = log.games();
        // First game of the season has no pregame state at all.
        assert!(games[0].pregame.is_none());
        assert!(games[0].home_split.is_none());
        assert!(games[0].last_10.is_none());

        // Game 2: season BA from game 1 only; no away or vs-LHP samples yet.
        let g2 = &games[1];
        assert_eq!(g2.pregame.unwrap().ba, 0.5);
        assert_eq!(g2.home_split.unwrap().ba, 0.5);
        assert_eq!(g2.vs_right.unwrap().ba, 0.5);
        assert!(g2.away_split.is_none());
        assert!(g2.vs_left.is_none());
        assert_eq!(g2.last_10.unwrap().ba, 0.5);

        // Game 3: 3-for-8 over the two prior games.
        let g3 = &games[2];
        assert_eq!(g3.pregame.unwrap().ba, 0.375);
        assert_eq!(g3.home_split.unwrap().ba, 0.5);
        assert_eq!(g3.vs_right.unwrap().ba, 0.5);
        assert_eq!(g3.away_split.unwrap().ba, 0.25);
        assert_eq!(g3.vs_left.unwrap().ba, 0.25);
        assert_eq!(g3.last_15.unwrap().ba, 0.375);
    }

    #[test]
    fn unresolved_starter_still_counts_in_season_and_location() {
        let mut log = TeamLog::new("BOS");
        log.push(game("2021-04-01", true, None, 4, 2));
        log.push(game("2021-04-02", true, Some(Hand::Right), 4, 2));
        log.push(game("2021-04-03", true, Some(Hand::Right), 4, 2));
        enrich_team_batting(&mut log).unwrap();

        let g3 = &log.games()[2];
        // Season and home splits saw both prior games.
        assert_eq!(g3.pregame.unwrap().ba, 0.5);
        assert_eq!(g3.home_split.unwrap().ba, 0.5);
        // Handedness split saw only the resolved one.
        let vs_right = g3.vs_right.unwrap();
        assert_eq!(vs_right.ba, 0.5);
        assert!(g3.vs_left.is_none());
    }

    #[test]
    fn trailing_window_matches_direct_resummation() {
        let mut log = TeamLog::new("BOS");
        for day in 1..=25u32 {
            let hits = day % 5;
            log.push(game(&format!("2021-05-{day:02}"), day % 2 == 0, None, 4, hits));
        }
        enrich_team_batting(&mut log).unwrap();

        let games = log.games();
        for i in 1..games.len() {
            for (window, field) in [
                (10, games[i].last_10),
                (15, games[i].last_15),
            ] {
                let start = i.saturating_sub(window);
                let mut ab = 0u32;
                let mut h = 0u32;
                for g in &games[start..i] {
                    ab += g.at_bats;
                    h += g.hits;
                }
                assert_eq!(field.unwrap().ba, rates::ba(ab, h), "game {i} window {window}");
            }
        }
    }

    #[test]
    fn out_of_order_input_rejected() {
        let mut log = TeamLog::new("BOS");
        log.push(game("2021-04-02", true, None, 4, 1));
        log.push(game("2021-04-01", true, None, 4, 1));
        assert!(enrich_team_batting(&mut log).is_err());
    }
}
