//! Super Bowl Squares: a 10x10 grid whose rows and columns are keyed by a
//! shuffled last digit of each team's cumulative score.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const GRID_SIZE: usize = 10;
pub const MIN_WAGER: f64 = 0.01;
pub const UNASSIGNED: &str = "(unassigned)";

/// Share of the pool paid out per period. Q4 and overtime carry no payout.
pub const PAYOUT_SHARES: [(PeriodLabel, f64); 4] = [
    (PeriodLabel::Quarter(1), 0.2),
    (PeriodLabel::Quarter(2), 0.2),
    (PeriodLabel::Quarter(3), 0.2),
    (PeriodLabel::Final, 0.4),
];

/// Identifies the scoring snapshot a winner was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PeriodLabel {
    /// Regulation quarter 1..=4.
    Quarter(u8),
    /// Overtime period, 1-based.
    Overtime(u8),
    Final,
}

impl PeriodLabel {
    /// Label for the nth period of a game (1-based), overtime after the fourth.
    pub fn for_period(period: u8) -> Self {
        if period <= 4 {
            PeriodLabel::Quarter(period)
        } else {
            PeriodLabel::Overtime(period - 4)
        }
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodLabel::Quarter(q) => write!(f, "Q{q}"),
            PeriodLabel::Overtime(1) => write!(f, "OT"),
            PeriodLabel::Overtime(n) => write!(f, "OT{n}"),
            PeriodLabel::Final => write!(f, "Final"),
        }
    }
}

impl From<PeriodLabel> for String {
    fn from(label: PeriodLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for PeriodLabel {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let bad = || format!("unknown period label: {raw}");
        if raw == "Final" {
            return Ok(PeriodLabel::Final);
        }
        if raw == "OT" {
            return Ok(PeriodLabel::Overtime(1));
        }
        if let Some(n) = raw.strip_prefix("OT") {
            return n.parse().map(PeriodLabel::Overtime).map_err(|_| bad());
        }
        if let Some(q) = raw.strip_prefix('Q') {
            return match q.parse() {
                Ok(q @ 1..=4) => Ok(PeriodLabel::Quarter(q)),
                _ => Err(bad()),
            };
        }
        Err(bad())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub label: PeriodLabel,
    pub row: usize,
    pub col: usize,
    pub digit_a: u8,
    pub digit_b: u8,
    pub score_a: u32,
    pub score_b: u32,
    pub name: String,
}

impl Winner {
    pub fn announcement(&self, team_a: &str, team_b: &str) -> String {
        format!(
            "{} Winner: {} ({team_a} {} - {team_b} {})",
            self.label, self.name, self.score_a, self.score_b
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Configured,
    InProgress,
    Complete,
}

impl Phase {
    pub fn of(game: Option<&SquaresGame>) -> Self {
        game.map_or(Phase::Uninitialized, SquaresGame::phase)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "No game",
            Phase::Configured => "Setup",
            Phase::InProgress => "In progress",
            Phase::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SquaresError {
    OutOfBounds { row: usize, col: usize },
    MissingTeams,
}

impl fmt::Display for SquaresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquaresError::OutOfBounds { row, col } => {
                write!(f, "square ({row}, {col}) is outside the 10x10 grid")
            }
            SquaresError::MissingTeams => write!(f, "both team names are required"),
        }
    }
}

impl std::error::Error for SquaresError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Payouts {
    pub pool: f64,
    pub shares: Vec<(PeriodLabel, f64)>,
}

impl Payouts {
    pub fn for_label(&self, label: PeriodLabel) -> Option<f64> {
        self.shares.iter().find(|(l, _)| *l == label).map(|(_, amount)| *amount)
    }
}

pub fn calculate_payouts(wager: f64) -> Payouts {
    let pool = wager * 100.0;
    let shares = PAYOUT_SHARES
        .iter()
        .map(|(label, pct)| (*label, (pool * pct * 100.0).round() / 100.0))
        .collect();
    Payouts { pool, shares }
}

/// One squares pool. Team A owns the rows, team B the columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquaresGame {
    pub id: String,
    pub team_a: String,
    pub team_b: String,
    pub row_digits: [u8; GRID_SIZE],
    pub col_digits: [u8; GRID_SIZE],
    pub grid: [[String; GRID_SIZE]; GRID_SIZE],
    pub wager: f64,
    /// Append-only, at most one entry per label.
    #[serde(default)]
    pub winners: Vec<Winner>,
    /// Live-feed event once it has been located.
    #[serde(default)]
    pub event_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SquaresGame {
    pub fn new(team_a: &str, team_b: &str, wager: f64) -> Result<Self, SquaresError> {
        Self::with_rng(team_a, team_b, wager, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        team_a: &str,
        team_b: &str,
        wager: f64,
        rng: &mut R,
    ) -> Result<Self, SquaresError> {
        let (team_a, team_b) = (team_a.trim(), team_b.trim());
        if team_a.is_empty() || team_b.is_empty() {
            return Err(SquaresError::MissingTeams);
        }
        let wager = if wager.is_finite() { wager.max(MIN_WAGER) } else { MIN_WAGER };
        let created_at = Utc::now();

        Ok(Self {
            id: format!("{:x}", created_at.timestamp_millis()),
            team_a: team_a.to_owned(),
            team_b: team_b.to_owned(),
            row_digits: shuffled_digits(rng),
            col_digits: shuffled_digits(rng),
            grid: Default::default(),
            wager,
            winners: Vec::new(),
            event_id: None,
            created_at,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.winner(PeriodLabel::Final).is_some() {
            Phase::Complete
        } else if !self.winners.is_empty() || self.event_id.is_some() {
            Phase::InProgress
        } else {
            Phase::Configured
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.grid.get(row)?.get(col).map(String::as_str)
    }

    /// Put `name` on a square, replacing whoever was there. A blank name clears it.
    pub fn assign_cell(&mut self, row: usize, col: usize, name: &str) -> Result<(), SquaresError> {
        let cell = self
            .grid
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(SquaresError::OutOfBounds { row, col })?;
        *cell = name.trim().to_owned();
        Ok(())
    }

    /// Fill squares row-major from the start of the grid. Squares past the end
    /// of `names` keep their occupants. Returns how many were written.
    pub fn bulk_assign<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let cells = self.grid.iter_mut().flat_map(|row| row.iter_mut());
        let mut written = 0;
        for (cell, name) in cells.zip(names) {
            *cell = name.as_ref().trim().to_owned();
            written += 1;
        }
        written
    }

    pub fn assigned_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .count()
    }

    /// Resolve the square for a pair of cumulative scores. Does not record it.
    pub fn find_winner(&self, score_a: u32, score_b: u32, label: PeriodLabel) -> Winner {
        let digit_a = (score_a % 10) as u8;
        let digit_b = (score_b % 10) as u8;
        let row = position_of(&self.row_digits, digit_a);
        let col = position_of(&self.col_digits, digit_b);
        let name = match self.grid[row][col].trim() {
            "" => UNASSIGNED.to_string(),
            name => name.to_owned(),
        };
        Winner { label, row, col, digit_a, digit_b, score_a, score_b, name }
    }

    pub fn winner(&self, label: PeriodLabel) -> Option<&Winner> {
        self.winners.iter().find(|w| w.label == label)
    }

    /// Record a winner unless its label already has one. Returns whether it was added.
    pub fn record_winner(&mut self, winner: Winner) -> bool {
        if self.winner(winner.label).is_some() {
            return false;
        }
        self.winners.push(winner);
        true
    }

    pub fn payouts(&self) -> Payouts {
        calculate_payouts(self.wager)
    }

    /// Whether a restored game still holds together: both digit axes are
    /// permutations of 0..=9, the wager is usable and each period won once.
    pub fn is_valid(&self) -> bool {
        let mut labels = HashSet::new();
        is_permutation(&self.row_digits)
            && is_permutation(&self.col_digits)
            && self.wager.is_finite()
            && self.wager >= MIN_WAGER
            && !self.team_a.trim().is_empty()
            && !self.team_b.trim().is_empty()
            && self.winners.iter().all(|w| labels.insert(w.label))
    }
}

fn is_permutation(digits: &[u8; GRID_SIZE]) -> bool {
    let mut seen = [false; GRID_SIZE];
    for &d in digits {
        match seen.get_mut(d as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

fn shuffled_digits<R: Rng + ?Sized>(rng: &mut R) -> [u8; GRID_SIZE] {
    let mut digits = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    digits.shuffle(rng);
    digits
}

fn position_of(digits: &[u8; GRID_SIZE], digit: u8) -> usize {
    // Both axes are permutations of 0..=9, so the digit is always present.
    digits.iter().position(|d| *d == digit).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(seed: u64) -> SquaresGame {
        let mut rng = StdRng::seed_from_u64(seed);
        SquaresGame::with_rng("Chiefs", "Eagles", 2.0, &mut rng).unwrap()
    }

    #[test]
    fn axes_are_permutations() {
        for seed in 0..50 {
            let g = game(seed);
            assert!(is_permutation(&g.row_digits));
            assert!(is_permutation(&g.col_digits));
        }
    }

    #[test]
    fn validity_rejects_broken_axes_and_repeated_labels() {
        let g = game(3);
        assert!(g.is_valid());

        let mut repeated_digit = g.clone();
        repeated_digit.row_digits[0] = repeated_digit.row_digits[1];
        assert!(!repeated_digit.is_valid());

        let mut out_of_range = g.clone();
        out_of_range.col_digits[4] = 10;
        assert!(!out_of_range.is_valid());

        let mut nan_wager = g.clone();
        nan_wager.wager = f64::NAN;
        assert!(!nan_wager.is_valid());

        let mut twice = g.clone();
        let winner = twice.find_winner(3, 0, PeriodLabel::Quarter(1));
        twice.winners.push(winner.clone());
        twice.winners.push(winner);
        assert!(!twice.is_valid());
    }

    #[test]
    fn new_game_is_empty_and_configured() {
        let g = game(7);
        assert_eq!(g.assigned_count(), 0);
        assert!(g.winners.is_empty());
        assert_eq!(g.phase(), Phase::Configured);
        assert_eq!(Phase::of(None), Phase::Uninitialized);
        assert_eq!(Phase::of(Some(&g)), Phase::Configured);
    }

    #[test]
    fn wager_is_clamped_and_teams_required() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = SquaresGame::with_rng(" A ", "B", 0.0, &mut rng).unwrap();
        assert_eq!(g.wager, MIN_WAGER);
        assert_eq!(g.team_a, "A");
        let g = SquaresGame::with_rng("A", "B", -5.0, &mut rng).unwrap();
        assert_eq!(g.wager, MIN_WAGER);
        assert_eq!(
            SquaresGame::with_rng("A", "  ", 1.0, &mut rng),
            Err(SquaresError::MissingTeams)
        );
    }

    #[test]
    fn assign_cell_overwrites_and_checks_bounds() {
        let mut g = game(3);
        g.assign_cell(2, 5, "Ann").unwrap();
        g.assign_cell(2, 5, "Bob").unwrap();
        g.assign_cell(0, 0, "Bob").unwrap();
        assert_eq!(g.cell(2, 5), Some("Bob"));
        assert_eq!(g.assigned_count(), 2);
        assert_eq!(
            g.assign_cell(10, 0, "Zed"),
            Err(SquaresError::OutOfBounds { row: 10, col: 0 })
        );
        g.assign_cell(0, 0, "  ").unwrap();
        assert_eq!(g.assigned_count(), 1);
    }

    #[test]
    fn bulk_assign_fills_row_major_and_keeps_the_rest() {
        let mut g = game(4);
        g.assign_cell(9, 9, "Keeper").unwrap();
        let written = g.bulk_assign(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
        assert_eq!(written, 11);
        assert_eq!(g.cell(0, 0), Some("a"));
        assert_eq!(g.cell(0, 9), Some("j"));
        assert_eq!(g.cell(1, 0), Some("k"));
        assert_eq!(g.cell(1, 1), Some(""));
        assert_eq!(g.cell(9, 9), Some("Keeper"));
        assert_eq!(g.assigned_count(), 12);
    }

    #[test]
    fn find_winner_uses_last_digits() {
        let mut g = game(11);
        let row = g.row_digits.iter().position(|d| *d == 4).unwrap();
        let col = g.col_digits.iter().position(|d| *d == 7).unwrap();

        let w = g.find_winner(24, 17, PeriodLabel::Quarter(2));
        assert_eq!((w.row, w.col), (row, col));
        assert_eq!((w.digit_a, w.digit_b), (4, 7));
        assert_eq!(w.name, UNASSIGNED);

        g.assign_cell(row, col, "Dana").unwrap();
        assert_eq!(g.find_winner(24, 17, PeriodLabel::Quarter(2)).name, "Dana");
        assert!(g.winners.is_empty());
    }

    #[test]
    fn recording_a_label_twice_keeps_the_first() {
        let mut g = game(5);
        let first = g.find_winner(7, 0, PeriodLabel::Quarter(1));
        assert!(g.record_winner(first.clone()));
        assert_eq!(g.phase(), Phase::InProgress);

        let second = g.find_winner(14, 3, PeriodLabel::Quarter(1));
        assert!(!g.record_winner(second));
        assert_eq!(g.winners.len(), 1);
        assert_eq!(g.winner(PeriodLabel::Quarter(1)), Some(&first));

        let final_winner = g.find_winner(31, 20, PeriodLabel::Final);
        assert!(g.record_winner(final_winner));
        assert_eq!(g.phase(), Phase::Complete);
    }

    #[test]
    fn payouts_split_the_pool() {
        let payouts = calculate_payouts(2.0);
        assert_eq!(payouts.pool, 200.0);
        assert_eq!(payouts.for_label(PeriodLabel::Quarter(1)), Some(40.0));
        assert_eq!(payouts.for_label(PeriodLabel::Quarter(3)), Some(40.0));
        assert_eq!(payouts.for_label(PeriodLabel::Final), Some(80.0));
        assert_eq!(payouts.for_label(PeriodLabel::Quarter(4)), None);

        let odd = calculate_payouts(0.33);
        assert_eq!(odd.for_label(PeriodLabel::Quarter(1)), Some(6.6));
        assert_eq!(odd.for_label(PeriodLabel::Final), Some(13.2));
    }

    #[test]
    fn period_labels_display_and_parse() {
        let labels = [
            (PeriodLabel::Quarter(1), "Q1"),
            (PeriodLabel::Quarter(4), "Q4"),
            (PeriodLabel::Overtime(1), "OT"),
            (PeriodLabel::Overtime(2), "OT2"),
            (PeriodLabel::Final, "Final"),
        ];
        for (label, text) in labels {
            assert_eq!(label.to_string(), text);
            assert_eq!(PeriodLabel::try_from(text.to_string()), Ok(label));
        }
        assert_eq!(PeriodLabel::for_period(3), PeriodLabel::Quarter(3));
        assert_eq!(PeriodLabel::for_period(6), PeriodLabel::Overtime(2));
        assert!(PeriodLabel::try_from("Q5".to_string()).is_err());
    }

    #[test]
    fn announcement_names_both_teams() {
        let g = game(9);
        let w = g.find_winner(7, 3, PeriodLabel::Quarter(1));
        assert_eq!(
            w.announcement(&g.team_a, &g.team_b),
            "Q1 Winner: (unassigned) (Chiefs 7 - Eagles 3)"
        );
    }
}
