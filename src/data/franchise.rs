//! Franchise lineage: historical and relocated team names mapped onto the
//! current franchise, so a rivalry spans every name a club has played under.

use tui::style::Color;

/// Historical name → current franchise. Many-to-one; defunct clubs with no
/// successor map to themselves.
static FRANCHISE_MAP: &[(&str, &str)] = &[
    // Arizona Cardinals
    ("Chicago Cardinals", "Arizona Cardinals"),
    ("St. Louis Cardinals", "Arizona Cardinals"),
    ("Phoenix Cardinals", "Arizona Cardinals"),
    ("Chi/Pit Cards/Steelers", "Arizona Cardinals"), // 1944 Card-Pitt
    // Indianapolis Colts
    ("Baltimore Colts", "Indianapolis Colts"),
    // Detroit Lions
    ("Portsmouth Spartans", "Detroit Lions"),
    // Washington Commanders
    ("Boston Braves", "Washington Commanders"),
    ("Boston Redskins", "Washington Commanders"),
    ("Washington Redskins", "Washington Commanders"),
    ("Washington Football Team", "Washington Commanders"),
    // Tennessee Titans
    ("Houston Oilers", "Tennessee Titans"),
    ("Tennessee Oilers", "Tennessee Titans"),
    // New England Patriots
    ("Boston Patriots", "New England Patriots"),
    // Las Vegas Raiders
    ("Oakland Raiders", "Las Vegas Raiders"),
    ("Los Angeles Raiders", "Las Vegas Raiders"),
    // Los Angeles Chargers
    ("San Diego Chargers", "Los Angeles Chargers"),
    // Los Angeles Rams
    ("Cleveland Rams", "Los Angeles Rams"),
    ("St. Louis Rams", "Los Angeles Rams"),
    // Pittsburgh Steelers
    ("Pittsburgh Pirates", "Pittsburgh Steelers"),
    // 1943 Steagles are credited to the Eagles
    ("Phi/Pit Eagles/Steelers", "Philadelphia Eagles"),
    // Defunct Yanks lineage, no modern successor
    ("Boston Yanks", "Boston Yanks"),
    ("New York Bulldogs", "New York Bulldogs"),
    ("New York Yanks", "New York Yanks"),
    ("Bos/Bkn Yanks/Tigers", "Bos/Bkn Yanks/Tigers"),
    // New York Jets (AFL)
    ("New York Titans", "New York Jets"),
    // Kansas City Chiefs
    ("Dallas Texans", "Kansas City Chiefs"),
];

/// The 32 current franchises with their primary colour, sorted by name.
pub static CURRENT_TEAMS: &[(&str, Color)] = &[
    ("Arizona Cardinals", Color::Rgb(0x97, 0x23, 0x3F)),
    ("Atlanta Falcons", Color::Rgb(0xA7, 0x19, 0x30)),
    ("Baltimore Ravens", Color::Rgb(0x24, 0x17, 0x73)),
    ("Buffalo Bills", Color::Rgb(0x00, 0x33, 0x8D)),
    ("Carolina Panthers", Color::Rgb(0x00, 0x85, 0xCA)),
    ("Chicago Bears", Color::Rgb(0xC8, 0x38, 0x03)),
    ("Cincinnati Bengals", Color::Rgb(0xFB, 0x4F, 0x14)),
    ("Cleveland Browns", Color::Rgb(0xFF, 0x3C, 0x00)),
    ("Dallas Cowboys", Color::Rgb(0x00, 0x35, 0x94)),
    ("Denver Broncos", Color::Rgb(0xFB, 0x4F, 0x14)),
    ("Detroit Lions", Color::Rgb(0x00, 0x76, 0xB6)),
    ("Green Bay Packers", Color::Rgb(0x20, 0x37, 0x31)),
    ("Houston Texans", Color::Rgb(0xA7, 0x19, 0x30)),
    ("Indianapolis Colts", Color::Rgb(0x00, 0x2C, 0x5F)),
    ("Jacksonville Jaguars", Color::Rgb(0x00, 0x67, 0x78)),
    ("Kansas City Chiefs", Color::Rgb(0xE3, 0x18, 0x37)),
    ("Las Vegas Raiders", Color::Rgb(0xA5, 0xAC, 0xAF)),
    ("Los Angeles Chargers", Color::Rgb(0x00, 0x80, 0xC6)),
    ("Los Angeles Rams", Color::Rgb(0x00, 0x35, 0x94)),
    ("Miami Dolphins", Color::Rgb(0x00, 0x8E, 0x97)),
    ("Minnesota Vikings", Color::Rgb(0x4F, 0x26, 0x83)),
    ("New England Patriots", Color::Rgb(0xC6, 0x0C, 0x30)),
    ("New Orleans Saints", Color::Rgb(0xD3, 0xBC, 0x8D)),
    ("New York Giants", Color::Rgb(0x0B, 0x22, 0x65)),
    ("New York Jets", Color::Rgb(0x12, 0x57, 0x40)),
    ("Philadelphia Eagles", Color::Rgb(0x00, 0x4C, 0x54)),
    ("Pittsburgh Steelers", Color::Rgb(0xFF, 0xB6, 0x12)),
    ("San Francisco 49ers", Color::Rgb(0xAA, 0x00, 0x00)),
    ("Seattle Seahawks", Color::Rgb(0x69, 0xBE, 0x28)),
    ("Tampa Bay Buccaneers", Color::Rgb(0xD5, 0x0A, 0x0A)),
    ("Tennessee Titans", Color::Rgb(0x4B, 0x92, 0xDB)),
    ("Washington Commanders", Color::Rgb(0x5A, 0x14, 0x14)),
];

const LEAGUE_NAVY: Color = Color::Rgb(0x01, 0x33, 0x69);

/// Current franchise name for any name found in the dataset. Unknown names
/// pass through unchanged.
pub fn normalize(name: &str) -> &str {
    FRANCHISE_MAP
        .iter()
        .find(|(historical, _)| *historical == name)
        .map(|(_, current)| *current)
        .unwrap_or(name)
}

pub fn is_current(name: &str) -> bool {
    CURRENT_TEAMS.iter().any(|(team, _)| *team == name)
}

pub fn team_color(name: &str) -> Color {
    let current = normalize(name);
    CURRENT_TEAMS
        .iter()
        .find(|(team, _)| *team == current)
        .map(|(_, color)| *color)
        .unwrap_or(LEAGUE_NAVY)
}
