use crate::espn::{EspnCompetitor, EspnEvent, EspnLinescore, EspnStatus, ScoreboardResponse, SummaryResponse};
use crate::{EventSummary, GameStatus, ScoreSnapshot, TeamLine, matching};
use chrono::Utc;
use log::debug;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

/// NFL API client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nfltui/0.1 (terminal rivalry viewer)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    /// The resource sits behind a sign-in gate and the request was not authorized.
    Unauthorized(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Unauthorized(url) => write!(f, "Authentication required for {url}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different ESPN-compatible host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Fetch the current NFL scoreboard.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Vec<EventSummary>> {
        let url = format!("{}/scoreboard", self.base_url);
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(raw
            .events
            .unwrap_or_default()
            .iter()
            .map(map_event)
            .collect())
    }

    /// Locate the event for a squares game on today's scoreboard.
    ///
    /// An event whose competitors match both labels wins; failing that, the
    /// first event named as a Super Bowl is used.
    pub async fn find_event(&self, team_a: &str, team_b: &str) -> ApiResult<Option<EventSummary>> {
        let events = self.fetch_scoreboard().await?;
        debug!("scoreboard returned {} events", events.len());
        Ok(select_event(events, team_a, team_b))
    }

    /// Fetch the per-period score state of one event.
    pub async fn fetch_scores(&self, event_id: &str) -> ApiResult<ScoreSnapshot> {
        let url = format!("{}/summary?event={event_id}", self.base_url);
        let raw: SummaryResponse = self.get(&url).await?;
        map_summary(event_id, raw)
            .ok_or_else(|| ApiError::NotFound(format!("no competition data for event {event_id}")))
    }

    /// Download the historical games CSV from a sign-in gated endpoint.
    ///
    /// 401/403 surface as `ApiError::Unauthorized` so callers can prompt for
    /// credentials instead of reporting the data as missing.
    pub async fn fetch_dataset(&self, url: &str, token: Option<&str>) -> ApiResult<String> {
        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            request = request.bearer_auth(token.trim());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Unauthorized(url.to_owned()));
            }
            StatusCode::NOT_FOUND => {
                return Err(ApiError::NotFound(format!("no dataset at {url}")));
            }
            _ => {}
        }

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .text()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }

    /// GET a JSON body. A 404 is `NotFound`; any other error status is an `Api` error.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(ApiError::NotFound(format!("nothing at {url}")))
            }
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn select_event(events: Vec<EventSummary>, team_a: &str, team_b: &str) -> Option<EventSummary> {
    let teams_match = |e: &EventSummary| {
        e.competitors.iter().any(|c| matching::names_match(team_a, c))
            && e.competitors.iter().any(|c| matching::names_match(team_b, c))
    };

    if let Some(idx) = events.iter().position(teams_match) {
        return events.into_iter().nth(idx);
    }
    events.into_iter().find(EventSummary::is_super_bowl)
}

fn map_event(event: &EspnEvent) -> EventSummary {
    let competitors = event
        .competitions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flat_map(|c| c.competitors.iter().flatten())
        .filter_map(|c| c.team.as_ref().and_then(|t| t.display_name.clone()))
        .collect();

    let start_time = event
        .date
        .as_deref()
        .and_then(parse_espn_date)
        .map(|dt| dt.with_timezone(&Utc));

    EventSummary {
        id: event.id.clone().unwrap_or_default(),
        name: event.name.clone().unwrap_or_default(),
        short_name: event.short_name.clone().unwrap_or_default(),
        competitors,
        status: event.status.as_ref().map(parse_status).unwrap_or_default(),
        start_time,
    }
}

/// ESPN dates drop the seconds ("2025-02-09T23:30Z"), which RFC 3339 rejects.
fn parse_espn_date(raw: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%#z").ok())
}

fn parse_status(status: &EspnStatus) -> GameStatus {
    let Some(status_type) = status.status_type.as_ref() else {
        return GameStatus::PreGame;
    };
    match status_type.state.as_deref() {
        Some("pre") => GameStatus::PreGame,
        Some("in") => GameStatus::InProgress,
        Some("post") => GameStatus::Complete,
        _ if status_type.completed == Some(true) => GameStatus::Complete,
        _ => match status_type.name.as_deref() {
            Some("STATUS_FINAL") | Some("STATUS_FINAL_OVERTIME") => GameStatus::Complete,
            Some("STATUS_IN_PROGRESS") | Some("STATUS_HALFTIME") | Some("STATUS_END_PERIOD") => {
                GameStatus::InProgress
            }
            _ => GameStatus::PreGame,
        },
    }
}

fn is_period_break(status: &EspnStatus) -> bool {
    matches!(
        status.status_type.as_ref().and_then(|t| t.name.as_deref()),
        Some("STATUS_END_PERIOD") | Some("STATUS_HALFTIME")
    )
}

fn map_summary(event_id: &str, raw: SummaryResponse) -> Option<ScoreSnapshot> {
    let competition = raw.header?.competitions?.into_iter().next()?;
    let competitors = competition.competitors.unwrap_or_default();

    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .or_else(|| competitors.first());
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .or_else(|| competitors.get(1));

    let status = competition.status.unwrap_or_default();
    let status_detail = status
        .status_type
        .as_ref()
        .and_then(|t| t.short_detail.clone().or_else(|| t.detail.clone()))
        .unwrap_or_default();

    Some(ScoreSnapshot {
        event_id: event_id.to_owned(),
        home: map_team_line(home, "Home", "HME"),
        away: map_team_line(away, "Away", "AWY"),
        status: parse_status(&status),
        status_detail,
        period: status.period.unwrap_or_default(),
        period_ended: is_period_break(&status),
    })
}

fn map_team_line(competitor: Option<&EspnCompetitor>, name: &str, abbrev: &str) -> TeamLine {
    let team = competitor.and_then(|c| c.team.as_ref());
    TeamLine {
        name: team
            .and_then(|t| t.display_name.clone())
            .unwrap_or_else(|| name.to_owned()),
        abbrev: team
            .and_then(|t| t.abbreviation.clone())
            .unwrap_or_else(|| abbrev.to_owned()),
        linescores: competitor
            .and_then(|c| c.linescores.as_deref())
            .unwrap_or_default()
            .iter()
            .map(parse_linescore)
            .collect(),
    }
}

/// Unreadable period scores count as zero points.
fn parse_linescore(ls: &EspnLinescore) -> u16 {
    ls.display_value
        .as_deref()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .or_else(|| ls.value.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u16))
        .unwrap_or_default()
}
