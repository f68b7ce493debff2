use crate::data::games;
use crate::state::app_settings::DataSource;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use nfl_api::client::{ApiError, ApiResult, NflApi};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: NflApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self::with_client(NflApi::new(), requests, responses)
    }

    pub fn with_client(
        client: NflApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let is_score_refresh = matches!(request, NetworkRequest::RefreshScores { .. });
            let result = match request {
                NetworkRequest::LoadDataset { source } => self.handle_load_dataset(source).await,
                NetworkRequest::RefreshScores { game_id, team_a, team_b, event_id } => {
                    self.handle_refresh_scores(game_id, &team_a, &team_b, event_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| {
                if err.is_auth() {
                    NetworkResponse::AuthRequired { message: err.to_string() }
                } else if is_score_refresh {
                    NetworkResponse::ScoresUnavailable { message: err.to_string() }
                } else {
                    NetworkResponse::Error { message: err.to_string() }
                }
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dataset(&self, source: DataSource) -> ApiResult<NetworkResponse> {
        let origin = source.describe();
        debug!("loading games from {origin}");
        let games = match source {
            DataSource::File(path) => read_dataset_file(&path).await?,
            DataSource::Url { url, token } => {
                let body = self.client.fetch_dataset(&url, token.as_deref()).await?;
                games::read_games(body.as_bytes())
            }
        };
        if games.is_empty() {
            return Err(ApiError::NotFound(format!("no games could be read from {origin}")));
        }
        info!("loaded {} games from {origin}", games.len());
        Ok(NetworkResponse::DatasetLoaded { games, origin })
    }

    async fn handle_refresh_scores(
        &self,
        game_id: String,
        team_a: &str,
        team_b: &str,
        event_id: Option<String>,
    ) -> ApiResult<NetworkResponse> {
        let event_id = match event_id {
            Some(id) => id,
            None => {
                let event = self.client.find_event(team_a, team_b).await?.ok_or_else(|| {
                    ApiError::NotFound(format!(
                        "no game for {team_a} vs {team_b} on the current scoreboard"
                    ))
                })?;
                info!("tracking event {} ({})", event.id, event.describe());
                event.id
            }
        };
        debug!("refreshing scores for event {event_id}");
        let snapshot = self.client.fetch_scores(&event_id).await?;
        Ok(NetworkResponse::ScoresLoaded { game_id, event_id, snapshot })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

async fn read_dataset_file(path: &Path) -> ApiResult<Vec<games::GameRecord>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Other(format!("cannot read {}: {e}", path.display())))?;
    Ok(games::read_games(bytes.as_slice()))
}
