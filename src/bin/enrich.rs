use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use mlb_pregame::input;
use mlb_pregame::pipeline;
use mlb_pregame::store;

fn main() -> Result<()> {
    let season = parse_season_arg().ok_or_else(|| anyhow!("missing --season YEAR"))?;
    let data_dir = parse_path_arg("--data-dir").unwrap_or_else(|| PathBuf::from("data"));
    let db_path = parse_path_arg("--db")
        .unwrap_or_else(|| input::season_dir(&data_dir, season).join("pregame.sqlite"));

    let mut data = input::load_season_dir(&data_dir, season)
        .with_context(|| format!("load season {season} from {}", data_dir.display()))?;
    let summary = pipeline::enrich_season(&mut data)?;

    let mut conn = store::open_db(&db_path)?;
    let saved = store::save_season(&mut conn, &data)?;

    println!("Season {season} enriched");
    println!("DB: {}", db_path.display());
    println!(
        "Teams: {} ({} games with pregame stats)",
        summary.teams, summary.games_enriched
    );
    println!(
        "Pitchers: {} ({} appearances with pregame stats)",
        summary.pitchers, summary.appearances_enriched
    );
    println!(
        "Bullpen games: {} ({} with pregame stats)",
        summary.bullpen_games, summary.bullpen_games_enriched
    );
    println!(
        "Saved: {} games, {} pitcher games, {} bullpen games",
        saved.games, saved.pitcher_games, saved.bullpen_games
    );
    if !summary.skipped.is_empty() {
        println!("Bullpen exclusions: {}", summary.skipped.len());
        for note in summary.skipped.iter().take(10) {
            println!("  - {note}");
        }
    }

    Ok(())
}

fn parse_season_arg() -> Option<u16> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(year) = arg.strip_prefix("--season=") {
            if let Ok(year) = year.trim().parse::<u16>() {
                return Some(year);
            }
        }
        if arg == "--season" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if let Ok(year) = next.trim().parse::<u16>() {
                return Some(year);
            }
        }
    }
    None
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&format!("{flag}=")) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
