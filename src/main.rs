mod app;
mod data;
mod draw;
mod keys;
mod squares;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::ScorePoller;
use crate::state::view_query::RivalryLink;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    data: Option<String>,
    link: Option<RivalryLink>,
}

#[derive(Debug, PartialEq)]
enum CliAction {
    Help,
    Version,
    Run(CliOptions),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(options) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let mut settings = AppSettings::load();
    if let Some(data) = options.data.as_deref() {
        settings.override_data(data);
    }
    let poll_interval = settings.poll_interval;
    let app = Arc::new(Mutex::new(App::new(settings, options.link)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Live score polling, started and stopped from the squares tab
    let poller = ScorePoller::new(ui_event_tx.clone(), poll_interval);

    // Trigger dataset load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx, poller).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> Option<CliOptions> {
    match parse_cli_args(std::env::args().skip(1)) {
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(CliAction::Version) => {
            println!("nfltui {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Ok(CliAction::Run(options)) => Some(options),
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn parse_cli_args<I>(args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut options = CliOptions::default();
    let (mut team_a, mut team_b) = (None, None);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--data" => options.data = Some(value("--data")?),
            "--team-a" => team_a = Some(value("--team-a")?),
            "--team-b" => team_b = Some(value("--team-b")?),
            "--link" => {
                let raw = value("--link")?;
                let link = RivalryLink::parse(&raw)
                    .ok_or_else(|| format!("--link needs teamA and teamB: {raw}"))?;
                options.link = Some(link);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    match (team_a, team_b) {
        (Some(a), Some(b)) => options.link = Some(RivalryLink::new(a, b)),
        (None, None) => {}
        _ => return Err("--team-a and --team-b go together".to_string()),
    }
    Ok(CliAction::Run(options))
}

fn usage_text() -> &'static str {
    "nfltui - NFL rivalry history and Super Bowl Squares in the terminal

Usage:
  nfltui [--data <path-or-url>] [--team-a <team> --team-b <team>]
  nfltui --link 'rivalry?teamA=Green%20Bay%20Packers&teamB=Chicago%20Bears'
  nfltui --help
  nfltui --version

Environment:
  NFLTUI_DATA          Games CSV path or URL (default data/1926-2024_COMBINED_NFL_SCORES.csv)
  NFLTUI_DATA_TOKEN    Bearer token for a sign-in gated data URL
  NFLTUI_POLL_SECS     Live score polling interval in seconds (default 60)
  NFLTUI_LOG           Log level: error, warn, info, debug, trace
  XDG_CONFIG_HOME      Squares game is saved under $XDG_CONFIG_HOME/nfltui/"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    mut poller: ScorePoller,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                sync_poller(&app, &mut poller).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                sync_poller(&app, &mut poller).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

/// Keep the poller running exactly while the squares state asks for it.
async fn sync_poller(app: &Arc<Mutex<App>>, poller: &mut ScorePoller) {
    let wanted = app.lock().await.state.squares.polling;
    if wanted && !poller.is_running() {
        poller.start();
    } else if !wanted {
        poller.stop();
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let request = app.lock().await.load_dataset_request();
            let _ = network_requests.send(request).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::PollTick => {
            let request = app.lock().await.score_refresh_request();
            if let Some(request) = request {
                let _ = network_requests.send(request).await;
            }
            false
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::DatasetLoaded { games, origin } => {
            app.lock().await.on_dataset_loaded(games, origin);
        }
        NetworkResponse::ScoresLoaded { game_id, event_id, snapshot } => {
            app.lock().await.on_scores_loaded(&game_id, event_id, snapshot);
        }
        NetworkResponse::AuthRequired { message } => {
            app.lock().await.on_auth_required(message);
        }
        NetworkResponse::ScoresUnavailable { message } => {
            app.lock().await.on_scores_unavailable(message);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    );
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
