use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mlb_pregame::batting::enrich_team_batting;
use mlb_pregame::gamelog::{GameRecord, Hand, PitcherAppearance, PitcherLog, TeamLog};
use mlb_pregame::pitching::enrich_pitcher_log;

fn synthetic_team_log(team: &str, games: usize) -> TeamLog {
    let mut log = TeamLog::new(team);
    let opening = NaiveDate::from_ymd_opt(2021, 4, 1).expect("valid opening day");
    for i in 0..games {
        let date = opening + chrono::Days::new(i as u64);
        let hits = 5 + (i % 7) as u32;
        log.push(GameRecord {
            date: date.format("%Y-%m-%d").to_string(),
            home: i % 2 == 0,
            opp: "OPP".to_string(),
            runs: hits / 2,
            at_bats: 33 + (i % 5) as u32,
            hits,
            doubles: (i % 3) as u32,
            triples: (i % 11 == 0) as u32,
            home_runs: (i % 4) as u32,
            walks: 2 + (i % 4) as u32,
            hbp: (i % 6 == 0) as u32,
            sac_flies: (i % 5 == 0) as u32,
            opp_starter_hand: if i % 4 == 0 { Some(Hand::Left) } else { Some(Hand::Right) },
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
        });
    }
    log
}

fn synthetic_pitcher_log(starts: usize) -> PitcherLog {
    let mut log = PitcherLog::new("benchpi01");
    let opening = NaiveDate::from_ymd_opt(2021, 4, 3).expect("valid first start");
    for i in 0..starts {
        let date = opening + chrono::Days::new(5 * i as u64);
        log.push(PitcherAppearance {
            date: date.format("%Y-%m-%d").to_string(),
            team: "SEA".to_string(),
            opp: "OPP".to_string(),
            ip: 5.0 + (i % 3) as f64 / 10.0 + (i % 2) as f64,
            earned_runs: (i % 5) as u32,
            hits: 3 + (i % 6) as u32,
            walks: (i % 4) as u32,
            pregame_era: None,
            pregame_whip: None,
        });
    }
    log
}

fn bench_team_batting_season(c: &mut Criterion) {
    let log = synthetic_team_log("BOS", 162);
    c.bench_function("team_batting_162_games", |b| {
        b.iter(|| {
            let mut log = log.clone();
            enrich_team_batting(black_box(&mut log)).unwrap();
            black_box(log.games().last().map(|g| g.pregame));
        })
    });
}

fn bench_league_batting_season(c: &mut Criterion) {
    let logs: Vec<TeamLog> = (0..30)
        .map(|i| synthetic_team_log(&format!("T{i:02}"), 162))
        .collect();
    c.bench_function("league_batting_30_teams", |b| {
        b.iter(|| {
            let mut logs = logs.clone();
            for log in &mut logs {
                enrich_team_batting(black_box(log)).unwrap();
            }
            black_box(logs.len());
        })
    });
}

fn bench_pitcher_season(c: &mut Criterion) {
    let log = synthetic_pitcher_log(33);
    c.bench_function("pitcher_33_starts", |b| {
        b.iter(|| {
            let mut log = log.clone();
            enrich_pitcher_log(black_box(&mut log)).unwrap();
            black_box(log.appearances().last().map(|a| a.pregame_era));
        })
    });
}

criterion_group!(
    benches,
    bench_team_batting_season,
    bench_league_batting_season,
    bench_pitcher_season
);
criterion_main!(benches);
