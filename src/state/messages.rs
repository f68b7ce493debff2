use crate::data::games::GameRecord;
use crate::state::app_settings::DataSource;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_api::ScoreSnapshot;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadDataset { source: DataSource },
    /// Poll the live feed for a squares game. Without an event id the
    /// scoreboard is searched for the two labels first.
    RefreshScores {
        game_id: String,
        team_a: String,
        team_b: String,
        event_id: Option<String>,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DatasetLoaded { games: Vec<GameRecord>, origin: String },
    /// Tagged with the squares game that asked, so late replies can be dropped.
    ScoresLoaded { game_id: String, event_id: String, snapshot: ScoreSnapshot },
    /// The dataset endpoint wants credentials; distinct from a plain failure.
    AuthRequired { message: String },
    /// The live feed could not be reached or had no matching game.
    ScoresUnavailable { message: String },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    PollTick,
}
