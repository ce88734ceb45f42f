//! Static franchise lookup tables: abbreviation <-> name and park factors.
//!
//! Loaded once at first use; nothing here has a lifecycle beyond process
//! start. Historical abbreviations (ANA, FLA, TBD) are kept so older seasons
//! resolve.

use std::collections::HashMap;

use once_cell::sync::Lazy;

const FRANCHISES: &[(&str, &str)] = &[
    ("ANA", "Anaheim Angels"),
    ("ARI", "Arizona Diamondbacks"),
    ("ATL", "Atlanta Braves"),
    ("BAL", "Baltimore Orioles"),
    ("BOS", "Boston Red Sox"),
    ("CHC", "Chicago Cubs"),
    ("CHW", "Chicago White Sox"),
    ("CIN", "Cincinnati Reds"),
    ("CLE", "Cleveland Indians"),
    ("COL", "Colorado Rockies"),
    ("DET", "Detroit Tigers"),
    ("FLA", "Florida Marlins"),
    ("HOU", "Houston Astros"),
    ("KCR", "Kansas City Royals"),
    ("LAA", "Los Angeles Angels"),
    ("LAD", "Los Angeles Dodgers"),
    ("MIA", "Miami Marlins"),
    ("MIL", "Milwaukee Brewers"),
    ("MIN", "Minnesota Twins"),
    ("NYM", "New York Mets"),
    ("NYY", "New York Yankees"),
    ("OAK", "Oakland Athletics"),
    ("PHI", "Philadelphia Phillies"),
    ("PIT", "Pittsburgh Pirates"),
    ("SDP", "San Diego Padres"),
    ("SEA", "Seattle Mariners"),
    ("SFG", "San Francisco Giants"),
    ("STL", "St. Louis Cardinals"),
    ("TBD", "Tampa Bay Devil Rays"),
    ("TBR", "Tampa Bay Rays"),
    ("TEX", "Texas Rangers"),
    ("TOR", "Toronto Blue Jays"),
    ("WSN", "Washington Nationals"),
];

// Park run factors relative to league average.
const PARK_FACTORS: &[(&str, f64)] = &[
    ("ARI", 1.044),
    ("ATL", 1.063),
    ("BAL", 1.088),
    ("BOS", 1.174),
    ("CHW", 0.995),
    ("CHC", 0.968),
    ("CIN", 1.162),
    ("CLE", 0.984),
    ("COL", 1.334),
    ("DET", 0.970),
    ("HOU", 1.005),
    ("KCR", 1.103),
    ("LAA", 1.068),
    ("LAD", 0.928),
    ("MIA", 0.982),
    ("FLA", 0.982),
    ("MIL", 1.014),
    ("MIN", 0.980),
    ("NYM", 0.881),
    ("NYY", 0.952),
    ("OAK", 0.878),
    ("PHI", 1.000),
    ("PIT", 1.020),
    ("SDP", 0.885),
    ("SFG", 0.908),
    ("SEA", 0.911),
    ("STL", 0.884),
    ("TBR", 0.862),
    ("TBD", 0.862),
    ("TEX", 0.963),
    ("TOR", 1.017),
    ("WSN", 0.989),
];

static NAME_BY_ABBR: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| FRANCHISES.iter().copied().collect());

static ABBR_BY_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static str> =
        FRANCHISES.iter().map(|(abbr, name)| (*name, *abbr)).collect();
    // Renames that still map to the same game-log abbreviation.
    map.insert("Cleveland Guardians", "CLE");
    map.insert("Los Angeles Angels of Anaheim", "ANA");
    map
});

static PARK_FACTOR_BY_ABBR: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| PARK_FACTORS.iter().copied().collect());

pub fn team_name(abbr: &str) -> Option<&'static str> {
    NAME_BY_ABBR.get(abbr).copied()
}

pub fn team_abbr(name: &str) -> Option<&'static str> {
    ABBR_BY_NAME.get(name).copied()
}

pub fn park_factor(abbr: &str) -> Option<f64> {
    PARK_FACTOR_BY_ABBR.get(abbr).copied()
}
