//! Turns live score snapshots into recorded squares winners.

use crate::squares::engine::{PeriodLabel, SquaresGame, Winner};
use log::{debug, info};
use nfl_api::{ScoreSnapshot, Side, matching};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// The pool's team labels could not be tied to exactly one home/away pairing.
    UnmatchedTeams {
        team_a: String,
        team_b: String,
        home: String,
        away: String,
    },
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::UnmatchedTeams { team_a, team_b, home, away } => write!(
                f,
                "cannot tell which of {away} @ {home} is \"{team_a}\" and which is \"{team_b}\""
            ),
        }
    }
}

impl std::error::Error for DetectionError {}

/// Which snapshot side plays the pool's rows (team A).
pub fn side_of_team_a(game: &SquaresGame, snapshot: &ScoreSnapshot) -> Result<Side, DetectionError> {
    matching::assign_sides(
        &game.team_a,
        &game.team_b,
        (&snapshot.home.name, &snapshot.home.abbrev),
        (&snapshot.away.name, &snapshot.away.abbrev),
    )
    .ok_or_else(|| DetectionError::UnmatchedTeams {
        team_a: game.team_a.clone(),
        team_b: game.team_b.clone(),
        home: snapshot.home.name.clone(),
        away: snapshot.away.name.clone(),
    })
}

/// Record a winner for every completed period not yet paid, plus Final once the
/// game is over. Returns only the winners added by this call, so applying the
/// same snapshot twice yields nothing the second time.
pub fn detect_winners(
    game: &mut SquaresGame,
    snapshot: &ScoreSnapshot,
) -> Result<Vec<Winner>, DetectionError> {
    let side_a = side_of_team_a(game, snapshot)?;
    let line_a = snapshot.side(side_a);
    let line_b = snapshot.side(side_a.other());

    let mut labelled: Vec<(PeriodLabel, u32, u32)> = (1..=snapshot.completed_periods())
        .map(|p| {
            let label = PeriodLabel::for_period(u8::try_from(p).unwrap_or(u8::MAX));
            (label, line_a.cumulative(p), line_b.cumulative(p))
        })
        .collect();
    if snapshot.is_complete() {
        labelled.push((PeriodLabel::Final, line_a.total(), line_b.total()));
    }

    let mut added = Vec::new();
    for (label, score_a, score_b) in labelled {
        if game.winner(label).is_some() {
            continue;
        }
        let winner = game.find_winner(score_a, score_b, label);
        if game.record_winner(winner.clone()) {
            info!("{}", winner.announcement(&game.team_a, &game.team_b));
            added.push(winner);
        }
    }
    debug!("detection on {}: {} new winners", snapshot.event_id, added.len());
    Ok(added)
}
