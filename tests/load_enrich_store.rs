use std::fs;
use std::path::PathBuf;

use mlb_pregame::input::{GAME_DATA, PITCHER_DATA, TEAM_PITCHING, load_season_dir};
use mlb_pregame::pipeline::enrich_season;
use mlb_pregame::store::{load_season, open_db, save_season};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("mlb_pregame_tests")
        .join(format!("{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("2021")).expect("scratch dir should be creatable");
    dir
}

const GAMES_JSON: &str = r#"
{
    "SEA": [
        {
            "date": "2021-04-23", "home": true, "opp": "LAA",
            "runs": 4, "at_bats": 33, "hits": 9, "doubles": 2, "triples": 0,
            "home_runs": 1, "walks": 3, "hbp": 0, "sac_flies": 1,
            "opp_starter_hand": "L", "opp_starter": "Heaney",
            "opp_starter_name": "Andrew Heaney", "opp_starter_id": "heanean01"
        },
        {
            "date": "2021-04-24", "home": true, "opp": "LAA",
            "runs": 2, "at_bats": 31, "hits": 6, "doubles": 1, "triples": 0,
            "home_runs": 0, "walks": 2, "hbp": 1, "sac_flies": 0,
            "opp_starter_hand": "R", "opp_starter": "Bundy",
            "opp_starter_name": "Dylan Bundy", "opp_starter_id": "bundydy01"
        }
    ],
    "LAA": [
        {
            "date": "2021-04-23", "home": false, "opp": "SEA",
            "runs": 1, "at_bats": 30, "hits": 5, "doubles": 1, "triples": 0,
            "home_runs": 0, "walks": 1, "hbp": 0, "sac_flies": 0,
            "opp_starter_hand": "R", "opp_starter": "Flexen",
            "opp_starter_name": "Chris Flexen", "opp_starter_id": "flexech01"
        },
        {
            "date": "2021-04-24", "home": false, "opp": "SEA",
            "runs": 3, "at_bats": 32, "hits": 8, "doubles": 2, "triples": 1,
            "home_runs": 1, "walks": 2, "hbp": 0, "sac_flies": 1,
            "opp_starter_hand": "R", "opp_starter": "Gilbert",
            "opp_starter_name": "Logan Gilbert", "opp_starter_id": "gilbelo01"
        }
    ]
}"#;

const PITCHERS_JSON: &str = r#"
{
    "flexech01": [
        { "date": "2021-04-23", "team": "SEA", "opp": "LAA",
          "ip": 5.2, "earned_runs": 1, "hits": 4, "walks": 1 }
    ],
    "gilbelo01": [
        { "date": "2021-04-24", "team": "SEA", "opp": "LAA",
          "ip": 6.0, "earned_runs": 3, "hits": 6, "walks": 2 }
    ],
    "heanean01": [
        { "date": "2021-04-23", "team": "LAA", "opp": "SEA",
          "ip": 6.0, "earned_runs": 3, "hits": 7, "walks": 2 }
    ],
    "bundydy01": [
        { "date": "2021-04-24", "team": "LAA", "opp": "SEA",
          "ip": 5.0, "earned_runs": 2, "hits": 5, "walks": 2 }
    ]
}"#;

const TEAM_PITCHING_JSON: &str = r#"
{
    "SEA": [
        { "date": "2021-04-23", "opp": "LAA", "ip": 9.0, "earned_runs": 1, "hits": 5, "walks": 1 },
        { "date": "2021-04-24", "opp": "LAA", "ip": 9.0, "earned_runs": 3, "hits": 8, "walks": 2 }
    ],
    "LAA": [
        { "date": "2021-04-23", "opp": "SEA", "ip": 8.0, "earned_runs": 4, "hits": 9, "walks": 3 },
        { "date": "2021-04-24", "opp": "SEA", "ip": 8.0, "earned_runs": 2, "hits": 6, "walks": 2 }
    ]
}"#;

#[test]
fn json_in_sqlite_out_preserves_enrichment() {
    let dir = scratch_dir("roundtrip");
    fs::write(dir.join("2021").join(GAME_DATA), GAMES_JSON).unwrap();
    fs::write(dir.join("2021").join(PITCHER_DATA), PITCHERS_JSON).unwrap();
    fs::write(dir.join("2021").join(TEAM_PITCHING), TEAM_PITCHING_JSON).unwrap();

    let mut data = load_season_dir(&dir, 2021).unwrap();
    assert_eq!(data.teams.len(), 2);
    assert_eq!(data.pitchers.len(), 4);

    let summary = enrich_season(&mut data).unwrap();
    assert_eq!(summary.games_enriched, 2);
    assert_eq!(summary.bullpen_games, 4);
    assert!(summary.skipped.is_empty(), "{:?}", summary.skipped);

    let db_path = dir.join("pregame.sqlite");
    let mut conn = open_db(&db_path).unwrap();
    save_season(&mut conn, &data).unwrap();
    let loaded = load_season(&conn, 2021).unwrap();

    // Batting enrichment survives the round trip, absence included.
    let sea = &loaded.teams["SEA"];
    assert!(sea.games()[0].pregame.is_none());
    let expected = data.teams["SEA"].games()[1].pregame.unwrap();
    assert_eq!(sea.games()[1].pregame.unwrap(), expected);
    assert!(sea.games()[1].away_split.is_none());

    // SEA bullpen on 04-24 carries pregame rates from the 04-23 bullpen
    // line (9.0 - 5.2 = 3.1 IP).
    let bullpen = &loaded.bullpens["SEA"];
    let first = bullpen.get("2021-04-23").unwrap();
    assert_eq!(first.ip(), 3.1);
    assert!(first.pregame_era.is_none());
    let second = bullpen.get("2021-04-24").unwrap();
    assert_eq!(second.pregame_era, data.bullpens["SEA"].get("2021-04-24").unwrap().pregame_era);
    assert!(second.pregame_era.is_some());

    // Pitcher pregame rates persist too.
    let flexen = loaded.pitchers["flexech01"].get("2021-04-23").unwrap();
    assert!(flexen.pregame_era.is_none());

    let _ = fs::remove_dir_all(&dir);
}
