//! Head-to-head analytics over the games between two franchises.
//!
//! Every function here is pure and takes the already normalized franchise
//! names. A "matchup set" is the slice returned by `filter_matchup`; order is
//! irrelevant on input, each function sorts by date where it matters.

use crate::data::games::{GameRecord, SeasonType};
use std::collections::BTreeMap;

/// Presentation order for day-of-week groupings.
pub const WEEK_ORDER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const DEFAULT_RECENT: usize = 10;
pub const DEFAULT_BLOWOUTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupRecord {
    pub total_games: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub ties: usize,
    /// Average points scored by each side in the games it won (0 when none).
    pub a_avg_win_score: f64,
    pub b_avg_win_score: f64,
    /// Average points scored by each side in the games it lost (0 when none).
    pub a_avg_loss_score: f64,
    pub b_avg_loss_score: f64,
}

impl MatchupRecord {
    pub fn leader<'a>(&self, team_a: &'a str, team_b: &'a str) -> Option<&'a str> {
        match self.a_wins.cmp(&self.b_wins) {
            std::cmp::Ordering::Greater => Some(team_a),
            std::cmp::Ordering::Less => Some(team_b),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// "12-8-1" from team A's point of view; the tie count is omitted when zero.
    pub fn summary(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.a_wins, self.b_wins, self.ties)
        } else {
            format!("{}-{}", self.a_wins, self.b_wins)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordByType {
    pub regular: MatchupRecord,
    pub playoff: MatchupRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentStreak {
    pub team: Option<String>,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Streaks {
    pub a_longest: u32,
    pub b_longest: u32,
    pub current: CurrentStreak,
}

/// One bar of the rivalry timeline, signed from team A's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub date: String,
    pub season: Option<i32>,
    pub margin: Option<i64>,
    pub total_points: Option<u32>,
    /// "Tie", team A, or the winning franchise.
    pub result: String,
    pub winner: String,
    pub loser: String,
    pub winner_score: Option<u32>,
    pub loser_score: Option<u32>,
    pub season_type: SeasonType,
    pub day_of_week: String,
    pub is_tie: bool,
}

#[derive(Default)]
struct Tally {
    points: u64,
    games: u32,
}

impl Tally {
    fn add(&mut self, score: Option<u32>) {
        if let Some(score) = score {
            self.points += u64::from(score);
            self.games += 1;
        }
    }

    fn average(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let avg = self.points as f64 / f64::from(self.games);
        (avg * 10.0).round() / 10.0
    }
}

pub fn filter_matchup<'a>(games: &'a [GameRecord], team_a: &str, team_b: &str) -> Vec<&'a GameRecord> {
    games.iter().filter(|g| g.is_between(team_a, team_b)).collect()
}

pub fn compute_record(games: &[&GameRecord], team_a: &str, _team_b: &str) -> MatchupRecord {
    let mut record = MatchupRecord { total_games: games.len(), ..Default::default() };
    let (mut a_won, mut a_lost, mut b_won, mut b_lost) =
        (Tally::default(), Tally::default(), Tally::default(), Tally::default());

    for game in games {
        if game.is_tie {
            record.ties += 1;
        } else if game.winner_norm == team_a {
            record.a_wins += 1;
            a_won.add(game.winner_score);
            b_lost.add(game.loser_score);
        } else {
            record.b_wins += 1;
            b_won.add(game.winner_score);
            a_lost.add(game.loser_score);
        }
    }

    record.a_avg_win_score = a_won.average();
    record.a_avg_loss_score = a_lost.average();
    record.b_avg_win_score = b_won.average();
    record.b_avg_loss_score = b_lost.average();
    record
}

pub fn compute_record_by_type(games: &[&GameRecord], team_a: &str, team_b: &str) -> RecordByType {
    let subset = |kind: SeasonType| -> Vec<&GameRecord> {
        games.iter().copied().filter(|g| g.season_type == kind).collect()
    };
    RecordByType {
        regular: compute_record(&subset(SeasonType::RegularSeason), team_a, team_b),
        playoff: compute_record(&subset(SeasonType::Playoff), team_a, team_b),
    }
}

/// Records keyed by the dataset's day label. Use `order_days` for display.
pub fn compute_record_by_day(
    games: &[&GameRecord],
    team_a: &str,
    team_b: &str,
) -> BTreeMap<String, MatchupRecord> {
    let mut days: BTreeMap<String, Vec<&GameRecord>> = BTreeMap::new();
    for game in games {
        days.entry(game.day_of_week.clone()).or_default().push(*game);
    }
    days.into_iter()
        .map(|(day, games)| {
            let record = compute_record(&games, team_a, team_b);
            (day, record)
        })
        .collect()
}

/// Sun..Sat first, then any unrecognised labels alphabetically.
pub fn order_days(by_day: BTreeMap<String, MatchupRecord>) -> Vec<(String, MatchupRecord)> {
    let mut days: Vec<(String, MatchupRecord)> = by_day.into_iter().collect();
    days.sort_by_key(|(day, _)| {
        WEEK_ORDER
            .iter()
            .position(|d| d.eq_ignore_ascii_case(day))
            .unwrap_or(WEEK_ORDER.len())
    });
    days
}

pub fn biggest_blowouts<'a>(games: &[&'a GameRecord], n: usize) -> Vec<&'a GameRecord> {
    let mut decided: Vec<&GameRecord> = games.iter().copied().filter(|g| !g.is_tie).collect();
    decided.sort_by(|x, y| y.margin.cmp(&x.margin));
    decided.truncate(n);
    decided
}

pub fn compute_streaks(games: &[&GameRecord], team_a: &str, team_b: &str) -> Streaks {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|g| g.calendar_date);

    let mut streaks = Streaks::default();
    let (mut a_current, mut b_current) = (0u32, 0u32);

    for game in sorted {
        if game.is_tie {
            a_current = 0;
            b_current = 0;
        } else if game.winner_norm == team_a {
            a_current += 1;
            b_current = 0;
            streaks.a_longest = streaks.a_longest.max(a_current);
        } else {
            b_current += 1;
            a_current = 0;
            streaks.b_longest = streaks.b_longest.max(b_current);
        }
    }

    streaks.current = if a_current > 0 {
        CurrentStreak { team: Some(team_a.to_owned()), count: a_current }
    } else if b_current > 0 {
        CurrentStreak { team: Some(team_b.to_owned()), count: b_current }
    } else {
        CurrentStreak::default()
    };
    streaks
}

pub fn recent_games<'a>(games: &[&'a GameRecord], n: usize) -> Vec<&'a GameRecord> {
    let mut sorted = games.to_vec();
    sorted.sort_by(|x, y| y.calendar_date.cmp(&x.calendar_date));
    sorted.truncate(n);
    sorted
}

pub fn prepare_timeline(games: &[&GameRecord], team_a: &str) -> Vec<TimelinePoint> {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|g| g.calendar_date);

    sorted
        .into_iter()
        .map(|g| {
            let a_won = g.won_by(team_a);
            let margin = if g.is_tie {
                Some(0)
            } else {
                g.margin.map(|m| if a_won { i64::from(m) } else { -i64::from(m) })
            };
            let result = if g.is_tie {
                "Tie".to_string()
            } else if a_won {
                team_a.to_owned()
            } else {
                g.winner_norm.clone()
            };
            TimelinePoint {
                date: g.date.clone(),
                season: g.season,
                margin,
                total_points: g.total_points,
                result,
                winner: g.winner.clone(),
                loser: g.loser.clone(),
                winner_score: g.winner_score,
                loser_score: g.loser_score,
                season_type: g.season_type,
                day_of_week: g.day_of_week.clone(),
                is_tie: g.is_tie,
            }
        })
        .collect()
}

/// Everything the matchup views render, computed once per team selection.
#[derive(Debug, Clone, Default)]
pub struct MatchupReport {
    pub team_a: String,
    pub team_b: String,
    pub record: MatchupRecord,
    pub by_type: RecordByType,
    pub by_day: Vec<(String, MatchupRecord)>,
    pub streaks: Streaks,
    pub blowouts: Vec<GameRecord>,
    pub recent: Vec<GameRecord>,
    pub timeline: Vec<TimelinePoint>,
}

impl MatchupReport {
    pub fn build(games: &[GameRecord], team_a: &str, team_b: &str) -> Self {
        let matchup = filter_matchup(games, team_a, team_b);
        Self {
            team_a: team_a.to_owned(),
            team_b: team_b.to_owned(),
            record: compute_record(&matchup, team_a, team_b),
            by_type: compute_record_by_type(&matchup, team_a, team_b),
            by_day: order_days(compute_record_by_day(&matchup, team_a, team_b)),
            streaks: compute_streaks(&matchup, team_a, team_b),
            blowouts: biggest_blowouts(&matchup, DEFAULT_BLOWOUTS)
                .into_iter()
                .cloned()
                .collect(),
            recent: recent_games(&matchup, DEFAULT_RECENT)
                .into_iter()
                .cloned()
                .collect(),
            timeline: prepare_timeline(&matchup, team_a),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record.total_games == 0
    }

    /// Plain-text series summary for pasting elsewhere.
    pub fn share_text(&self) -> String {
        let (a, b) = (&self.team_a, &self.team_b);
        let r = &self.record;
        let ties = if r.ties > 0 { format!(" - {}T", r.ties) } else { String::new() };
        let verdict = match r.leader(a, b) {
            Some(leader) => format!("{leader} leads the series!"),
            None => "The series is tied!".to_string(),
        };
        [
            format!("NFL Rivalry: {a} vs {b}"),
            format!("All-Time Record: {a} {}W - {}W{ties}", r.a_wins, r.b_wins),
            format!("{} total games played", r.total_games),
            verdict,
        ]
        .join("\n")
    }
}
