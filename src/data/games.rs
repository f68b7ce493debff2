use crate::data::franchise;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;

/// Date layouts seen across the 1926–2024 exports.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y"];

/// One CSV row as it appears in the dataset. Every column is optional so a
/// short or sparse row still decodes and is judged by `parse_games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "DOW", default)]
    pub dow: Option<String>,
    #[serde(rename = "WT", default)]
    pub winner: Option<String>,
    #[serde(rename = "LT", default)]
    pub loser: Option<String>,
    #[serde(rename = "WTS", default)]
    pub winner_score: Option<String>,
    #[serde(rename = "LTS", default)]
    pub loser_score: Option<String>,
    #[serde(rename = "Type", default)]
    pub game_type: Option<String>,
    #[serde(rename = "Season", default)]
    pub season: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SeasonType {
    #[default]
    RegularSeason,
    Playoff,
}

impl SeasonType {
    pub fn label(&self) -> &'static str {
        match self {
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Playoff => "Playoff",
        }
    }

    fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default().trim().to_lowercase();
        if raw.contains("playoff") || raw.contains("post") {
            SeasonType::Playoff
        } else {
            SeasonType::RegularSeason
        }
    }
}

/// A single historical game. Scores that could not be read are `None`, and so
/// is everything derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub date: String,
    pub calendar_date: Option<NaiveDate>,
    pub day_of_week: String,
    pub winner: String,
    pub loser: String,
    pub winner_norm: String,
    pub loser_norm: String,
    pub winner_score: Option<u32>,
    pub loser_score: Option<u32>,
    pub season_type: SeasonType,
    pub season: Option<i32>,
    pub margin: Option<u32>,
    pub total_points: Option<u32>,
    /// For a tie, winner/loser hold the two participants in dataset order.
    pub is_tie: bool,
}

impl GameRecord {
    pub fn new(
        date: &str,
        day_of_week: &str,
        winner: &str,
        loser: &str,
        winner_score: Option<u32>,
        loser_score: Option<u32>,
        season_type: SeasonType,
        season: Option<i32>,
    ) -> Self {
        let (margin, total_points, is_tie) = match (winner_score, loser_score) {
            (Some(w), Some(l)) => (w.checked_sub(l), w.checked_add(l), w == l),
            _ => (None, None, false),
        };
        Self {
            date: date.to_owned(),
            calendar_date: parse_date(date),
            day_of_week: day_of_week.to_owned(),
            winner: winner.to_owned(),
            loser: loser.to_owned(),
            winner_norm: franchise::normalize(winner).to_owned(),
            loser_norm: franchise::normalize(loser).to_owned(),
            winner_score,
            loser_score,
            season_type,
            season,
            margin,
            total_points,
            is_tie,
        }
    }

    /// True if `team` won outright.
    pub fn won_by(&self, team: &str) -> bool {
        !self.is_tie && self.winner_norm == team
    }

    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        (self.winner_norm == team_a && self.loser_norm == team_b)
            || (self.winner_norm == team_b && self.loser_norm == team_a)
    }

    /// Short score line, "?" standing in for an unreadable score.
    pub fn score_line(&self) -> String {
        let fmt = |s: Option<u32>| s.map_or_else(|| "?".to_string(), |v| v.to_string());
        format!(
            "{} {} - {} {}",
            self.winner,
            fmt(self.winner_score),
            self.loser,
            fmt(self.loser_score)
        )
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_score(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Convert raw rows into game records, preserving input order. Rows missing
/// the date or either team are dropped.
pub fn parse_games<I>(rows: I) -> Vec<GameRecord>
where
    I: IntoIterator<Item = RawRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            let date = non_empty(&row.date)?;
            let winner = non_empty(&row.winner)?;
            let loser = non_empty(&row.loser)?;
            Some(GameRecord::new(
                date,
                row.dow.as_deref().unwrap_or_default().trim(),
                winner,
                loser,
                parse_score(row.winner_score.as_deref()),
                parse_score(row.loser_score.as_deref()),
                SeasonType::parse(row.game_type.as_deref()),
                row.season.as_deref().and_then(|s| s.trim().parse().ok()),
            ))
        })
        .collect()
}

/// Read the games CSV (header row required). Undecodable rows are skipped.
pub fn read_games<R: Read>(reader: R) -> Vec<GameRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut skipped = 0usize;
    let rows: Vec<RawRow> = csv_reader
        .deserialize::<RawRow>()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                skipped += 1;
                debug!("skipping undecodable row: {e}");
                None
            }
        })
        .collect();

    let total_rows = rows.len();
    let games = parse_games(rows);
    skipped += total_rows - games.len();
    if skipped > 0 {
        warn!("skipped {skipped} malformed rows while loading games");
    }
    debug!("parsed {} games", games.len());
    games
}

/// Franchises for the team pickers: current clubs first, then any historical
/// names still present after normalization, alphabetically.
pub fn unique_teams(games: &[GameRecord]) -> Vec<String> {
    let historical: BTreeSet<&str> = games
        .iter()
        .flat_map(|g| [g.winner_norm.as_str(), g.loser_norm.as_str()])
        .filter(|name| !franchise::is_current(name))
        .collect();

    franchise::CURRENT_TEAMS
        .iter()
        .map(|(team, _)| team.to_string())
        .chain(historical.into_iter().map(str::to_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,DOW,WT,LT,WTS,LTS,Type,Season
1934-09-23,Sun,Detroit Lions,Green Bay Packers,3,0,Regular Season,1934
1932-10-02,Sun,Portsmouth Spartans,Green Bay Packers,10,0,Regular Season,1932
,Sun,Chicago Bears,Green Bay Packers,7,0,Regular Season,1933
2024-01-14,Sun,Green Bay Packers,Dallas Cowboys,48,32,Playoff,2023
1936-11-01,Sun,Green Bay Packers,Chicago Cardinals,x,0,,1936
1963-11-24,Sun,Philadelphia Eagles,Pittsburgh Steelers,20,20,Regular Season,1963
";

    #[test]
    fn reads_rows_and_drops_incomplete_ones() {
        let games = read_games(SAMPLE.as_bytes());
        assert_eq!(games.len(), 5);
        assert_eq!(games[0].winner, "Detroit Lions");
        assert_eq!(games[1].winner_norm, "Detroit Lions");
        assert_eq!(games[1].winner, "Portsmouth Spartans");
    }

    #[test]
    fn derived_fields() {
        let games = read_games(SAMPLE.as_bytes());
        let playoff = &games[2];
        assert_eq!(playoff.season_type, SeasonType::Playoff);
        assert_eq!(playoff.margin, Some(16));
        assert_eq!(playoff.total_points, Some(80));
        assert_eq!(playoff.season, Some(2023));
        assert_eq!(playoff.calendar_date, NaiveDate::from_ymd_opt(2024, 1, 14));
        assert!(!playoff.is_tie);
    }

    #[test]
    fn huge_scores_leave_total_unknown() {
        let csv = "\
Date,DOW,WT,LT,WTS,LTS,Type,Season
2001-09-09,Sun,Chicago Bears,Detroit Lions,4000000000,1000000000,Regular Season,2001
";
        let games = read_games(csv.as_bytes());
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].winner_score, Some(4_000_000_000));
        assert_eq!(games[0].margin, Some(3_000_000_000));
        assert_eq!(games[0].total_points, None);
        assert!(!games[0].is_tie);
    }

    #[test]
    fn ties_keep_dataset_order() {
        let games = read_games(SAMPLE.as_bytes());
        let tie = &games[4];
        assert!(tie.is_tie);
        assert_eq!(tie.margin, Some(0));
        assert_eq!(tie.winner, "Philadelphia Eagles");
        assert_eq!(tie.loser, "Pittsburgh Steelers");
        assert!(!tie.won_by("Philadelphia Eagles"));
    }

    #[test]
    fn unreadable_score_is_kept_as_unknown() {
        let games = read_games(SAMPLE.as_bytes());
        let odd = &games[3];
        assert_eq!(odd.winner_score, None);
        assert_eq!(odd.loser_score, Some(0));
        assert_eq!(odd.margin, None);
        assert!(!odd.is_tie);
        assert_eq!(odd.season_type, SeasonType::RegularSeason);
        assert_eq!(odd.loser_norm, "Arizona Cardinals");
        assert!(odd.score_line().contains('?'));
    }

    #[test]
    fn alternate_date_layouts_parse() {
        assert_eq!(parse_date("9/23/1934"), NaiveDate::from_ymd_opt(1934, 9, 23));
        assert_eq!(parse_date("1934/09/23"), NaiveDate::from_ymd_opt(1934, 9, 23));
        assert_eq!(parse_date("sometime"), None);
    }

    #[test]
    fn parse_preserves_order() {
        let rows = vec![
            RawRow {
                date: Some("2000-01-02".into()),
                winner: Some("B".into()),
                loser: Some("A".into()),
                ..Default::default()
            },
            RawRow {
                date: Some("1990-01-02".into()),
                winner: Some(" A ".into()),
                loser: Some("B".into()),
                ..Default::default()
            },
        ];
        let games = parse_games(rows);
        assert_eq!(games[0].winner, "B");
        assert_eq!(games[1].winner, "A");
    }

    #[test]
    fn unique_teams_lists_current_then_historical() {
        let games = read_games(SAMPLE.as_bytes());
        let teams = unique_teams(&games);
        assert_eq!(teams.len(), 32);
        assert_eq!(teams[0], "Arizona Cardinals");

        let extra = vec![GameRecord::new(
            "1926-10-10",
            "Sun",
            "Frankford Yellow Jackets",
            "Chicago Bears",
            Some(10),
            Some(7),
            SeasonType::RegularSeason,
            Some(1926),
        )];
        let teams = unique_teams(&extra);
        assert_eq!(teams.last().map(String::as_str), Some("Frankford Yellow Jackets"));
    }
}
