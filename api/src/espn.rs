/// ESPN API raw wire types: serde shapes for deserializing ESPN NFL responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>, // "Kansas City Chiefs at Philadelphia Eagles"
    #[serde(rename = "shortName")]
    pub short_name: Option<String>, // "KC VS PHI"
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub date: Option<String>, // ISO 8601, minute precision ("2025-02-09T23:30Z")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatusType {
    pub name: Option<String>,  // "STATUS_SCHEDULED", "STATUS_END_PERIOD", "STATUS_FINAL", ...
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "End of 2nd", "Final/OT"
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    /// Only populated on the summary header; the scoreboard keeps status on the event.
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub linescores: Option<Vec<EspnLinescore>>,
    pub winner: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnLinescore {
    /// Scoreboard linescores carry a number, summary linescores a display string.
    pub value: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub header: Option<EspnHeader>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnHeader {
    pub id: Option<String>,
    pub competitions: Option<Vec<EspnCompetition>>,
}
