pub mod client;
pub mod espn;
pub mod matching;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types, independent of the ESPN wire format
// ---------------------------------------------------------------------------

/// One entry of the league scoreboard, enough to pick the event to track.
#[derive(Debug, Clone, Default)]
pub struct EventSummary {
    pub id: String,
    pub name: String,       // "Kansas City Chiefs at Philadelphia Eagles"
    pub short_name: String, // "KC @ PHI"
    pub competitors: Vec<String>,
    pub status: GameStatus,
    pub start_time: Option<DateTime<Utc>>,
}

impl EventSummary {
    pub fn is_super_bowl(&self) -> bool {
        self.name.to_lowercase().contains("super bowl")
    }

    /// "KC @ PHI, Pre-Game, kickoff 2025-02-09 23:30 UTC"
    pub fn describe(&self) -> String {
        let title = if self.short_name.is_empty() { &self.name } else { &self.short_name };
        match self.start_time {
            Some(kickoff) => format!(
                "{title}, {}, kickoff {}",
                self.status.label(),
                kickoff.format("%Y-%m-%d %H:%M UTC")
            ),
            None => format!("{title}, {}", self.status.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    PreGame,
    InProgress,
    Complete,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::PreGame => "Pre-Game",
            GameStatus::InProgress => "Live",
            GameStatus::Complete => "Final",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A team's line in the box score: name plus points scored in each period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamLine {
    pub name: String,   // "Kansas City Chiefs"
    pub abbrev: String, // "KC"
    pub linescores: Vec<u16>,
}

impl TeamLine {
    /// Points scored through the given 1-based period (inclusive).
    pub fn cumulative(&self, through: usize) -> u32 {
        self.linescores
            .iter()
            .take(through)
            .map(|&p| u32::from(p))
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.cumulative(self.linescores.len())
    }
}

/// Simplified live score state for a single event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSnapshot {
    pub event_id: String,
    pub home: TeamLine,
    pub away: TeamLine,
    pub status: GameStatus,
    pub status_detail: String, // "End of 1st", "Halftime", "Final/OT"
    pub period: u8,
    /// True between periods (end of quarter, halftime).
    pub period_ended: bool,
}

impl ScoreSnapshot {
    pub fn is_complete(&self) -> bool {
        self.status == GameStatus::Complete
    }

    pub fn side(&self, side: Side) -> &TeamLine {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Number of periods whose scoring is final.
    ///
    /// ESPN appends the running period to the linescores as soon as it starts,
    /// so an in-progress game only counts the periods before the current one,
    /// unless the clock has stopped at the end of that period.
    pub fn completed_periods(&self) -> usize {
        let reported = self.home.linescores.len().min(self.away.linescores.len());
        match self.status {
            GameStatus::PreGame => 0,
            GameStatus::Complete => reported,
            GameStatus::InProgress => {
                let period = usize::from(self.period);
                let finished = if self.period_ended {
                    period
                } else {
                    period.saturating_sub(1)
                };
                reported.min(finished)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_description_prefers_short_name() {
        let mut event = EventSummary {
            id: "1".into(),
            name: "Kansas City Chiefs at Philadelphia Eagles".into(),
            short_name: "KC @ PHI".into(),
            status: GameStatus::InProgress,
            start_time: Utc.with_ymd_and_hms(2025, 2, 9, 23, 30, 0).single(),
            ..Default::default()
        };
        assert_eq!(event.describe(), "KC @ PHI, Live, kickoff 2025-02-09 23:30 UTC");

        event.short_name.clear();
        event.start_time = None;
        assert_eq!(event.describe(), "Kansas City Chiefs at Philadelphia Eagles, Live");
    }

    fn line(scores: &[u16]) -> TeamLine {
        TeamLine { linescores: scores.to_vec(), ..Default::default() }
    }

    #[test]
    fn cumulative_sums_through_period() {
        let l = line(&[7, 3, 0, 14]);
        assert_eq!(l.cumulative(1), 7);
        assert_eq!(l.cumulative(2), 10);
        assert_eq!(l.cumulative(9), 24);
        assert_eq!(l.total(), 24);
    }

    #[test]
    fn running_period_is_not_completed() {
        let snap = ScoreSnapshot {
            home: line(&[7, 3]),
            away: line(&[0, 10]),
            status: GameStatus::InProgress,
            period: 2,
            ..Default::default()
        };
        assert_eq!(snap.completed_periods(), 1);
    }

    #[test]
    fn ended_period_counts_as_completed() {
        let snap = ScoreSnapshot {
            home: line(&[7, 3]),
            away: line(&[0, 10]),
            status: GameStatus::InProgress,
            period: 2,
            period_ended: true,
            ..Default::default()
        };
        assert_eq!(snap.completed_periods(), 2);
    }

    #[test]
    fn complete_game_counts_every_reported_period() {
        let snap = ScoreSnapshot {
            home: line(&[7, 3, 0, 7, 3]),
            away: line(&[0, 10, 7, 0]),
            status: GameStatus::Complete,
            period: 5,
            ..Default::default()
        };
        assert_eq!(snap.completed_periods(), 4);
    }

    #[test]
    fn pre_game_has_no_completed_periods() {
        let snap = ScoreSnapshot { status: GameStatus::PreGame, ..Default::default() };
        assert_eq!(snap.completed_periods(), 0);
    }
}
