use crate::data::games::{self, GameRecord};
use crate::data::matchup::MatchupReport;
use crate::data::franchise;
use crate::squares::detection::detect_winners;
use crate::squares::engine::SquaresGame;
use crate::squares::store::SquaresStore;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputMode, PickerFocus};
use crate::state::messages::NetworkRequest;
use crate::state::view_query::RivalryLink;
use chrono::Local;
use log::{debug, info, warn};
use nfl_api::ScoreSnapshot;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matchup,
    Timeline,
    Squares,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    store: SquaresStore,
    /// Teams requested on the command line, applied once the games arrive.
    pending_link: Option<RivalryLink>,
}

impl App {
    pub fn new(settings: AppSettings, link: Option<RivalryLink>) -> Self {
        let app = Self::with_store(settings, SquaresStore::default(), link);

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn with_store(settings: AppSettings, store: SquaresStore, link: Option<RivalryLink>) -> Self {
        let mut state = AppState::new();
        state.squares.game = store.load();
        if let Some(game) = &state.squares.game {
            info!("resuming squares game {} vs {}", game.team_a, game.team_b);
        }
        Self { settings, state, store, pending_link: link }
    }

    pub fn load_dataset_request(&self) -> NetworkRequest {
        NetworkRequest::LoadDataset { source: self.settings.data_source.clone() }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dataset_loaded(&mut self, games: Vec<GameRecord>, origin: String) {
        let dataset = &mut self.state.dataset;
        dataset.teams = games::unique_teams(&games);
        dataset.games = games;
        dataset.origin = Some(origin);
        dataset.auth_required = None;
        self.state.last_error = None;

        if let Some(link) = self.pending_link.take() {
            self.select_teams(&link.team_a, &link.team_b);
        } else {
            self.rebuild_report();
        }
    }

    pub fn on_auth_required(&mut self, message: String) {
        warn!("{message}");
        self.state.dataset.auth_required = Some(message);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    pub fn on_scores_loaded(&mut self, game_id: &str, event_id: String, snapshot: ScoreSnapshot) {
        let squares = &mut self.state.squares;
        let Some(game) = squares.game.as_mut().filter(|game| game.id == game_id) else {
            // Reset or replaced while the request was in flight.
            debug!("dropping scores for squares game {game_id}");
            return;
        };

        let mut changed = false;
        match detect_winners(game, &snapshot) {
            Ok(added) => {
                // Only an event whose teams line up with the game is kept.
                if game.event_id.as_deref() != Some(event_id.as_str()) {
                    game.event_id = Some(event_id);
                    changed = true;
                }
                squares.fetch_error = None;
                if let Some(latest) = added.last() {
                    squares.highlight = Some((latest.row, latest.col));
                    squares.notification = Some(latest.announcement(&game.team_a, &game.team_b));
                    changed = true;
                }
                if snapshot.is_complete() && squares.polling {
                    info!("game complete, polling stopped");
                    squares.polling = false;
                }
                squares.snapshot = Some(snapshot);
            }
            Err(e) => {
                warn!("{e}");
                if game.event_id.take().is_some() {
                    changed = true;
                }
                squares.fetch_error = Some(e.to_string());
            }
        }
        squares.last_update = Some(Local::now().format("%H:%M:%S").to_string());

        if changed {
            self.persist_squares();
        }
    }

    pub fn on_scores_unavailable(&mut self, message: String) {
        warn!("score refresh failed: {message}");
        self.state.squares.fetch_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.share = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Matchup selection
    // -----------------------------------------------------------------------

    pub fn picker_down(&mut self) {
        let count = self.state.dataset.teams.len();
        self.state.matchup.move_down(count);
    }

    pub fn picker_up(&mut self) {
        self.state.matchup.move_up();
    }

    pub fn picker_toggle_focus(&mut self) {
        self.state.matchup.focus = self.state.matchup.focus.toggle();
    }

    /// Take the highlighted team for the focused picker.
    pub fn picker_select(&mut self) {
        let matchup = &mut self.state.matchup;
        let Some(team) = self.state.dataset.teams.get(matchup.cursor()).cloned() else {
            return;
        };
        match matchup.focus {
            PickerFocus::TeamA => {
                matchup.team_a = Some(team);
                matchup.focus = PickerFocus::TeamB;
            }
            PickerFocus::TeamB => matchup.team_b = Some(team),
        }
        self.rebuild_report();
    }

    /// Select two teams by name; historical names resolve to their franchise.
    pub fn select_teams(&mut self, team_a: &str, team_b: &str) {
        let team_a = franchise::normalize(team_a.trim()).to_owned();
        let team_b = franchise::normalize(team_b.trim()).to_owned();
        let dataset = &self.state.dataset;
        let matchup = &mut self.state.matchup;
        if let Some(i) = dataset.team_index(&team_a) {
            matchup.cursor_a = i;
        }
        if let Some(i) = dataset.team_index(&team_b) {
            matchup.cursor_b = i;
        }
        matchup.team_a = Some(team_a);
        matchup.team_b = Some(team_b);
        self.rebuild_report();
    }

    pub fn swap_teams(&mut self) {
        let m = &mut self.state.matchup;
        std::mem::swap(&mut m.team_a, &mut m.team_b);
        std::mem::swap(&mut m.cursor_a, &mut m.cursor_b);
        self.rebuild_report();
    }

    fn rebuild_report(&mut self) {
        let matchup = &mut self.state.matchup;
        matchup.scroll_offset = 0;
        self.state.timeline.scroll_offset = 0;
        self.state.share = None;

        matchup.report = match matchup.both_selected() {
            Some((a, b)) if a != b && self.state.dataset.is_loaded() => {
                Some(MatchupReport::build(&self.state.dataset.games, a, b))
            }
            _ => None,
        };
    }

    /// Shareable link for the current pair, also kept for the share popup.
    pub fn share_matchup(&mut self) -> Option<String> {
        let (a, b) = self.state.matchup.both_selected()?;
        let link = RivalryLink::new(a, b).to_query();
        if let Some(report) = &self.state.matchup.report {
            info!("{}", report.share_text().replace('\n', " | "));
        }
        info!("share link: {link}");
        self.state.share = Some(link.clone());
        Some(link)
    }

    pub fn dismiss_share(&mut self) {
        self.state.share = None;
    }

    pub fn matchup_scroll_down(&mut self) {
        self.state.matchup.scroll_offset = self.state.matchup.scroll_offset.saturating_add(1);
    }

    pub fn matchup_scroll_up(&mut self) {
        self.state.matchup.scroll_offset = self.state.matchup.scroll_offset.saturating_sub(1);
    }

    pub fn timeline_scroll_down(&mut self) {
        let max = self
            .state
            .matchup
            .report
            .as_ref()
            .map_or(0, |r| r.timeline.len().saturating_sub(1));
        let next = self.state.timeline.scroll_offset.saturating_add(1);
        self.state.timeline.scroll_offset = next.min(u16::try_from(max).unwrap_or(u16::MAX));
    }

    pub fn timeline_scroll_up(&mut self) {
        self.state.timeline.scroll_offset = self.state.timeline.scroll_offset.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Squares
    // -----------------------------------------------------------------------

    pub fn open_setup(&mut self) {
        let squares = &mut self.state.squares;
        squares.setup = Default::default();
        if let Some((a, b)) = self.state.matchup.both_selected() {
            squares.setup.team_a = a.to_owned();
            squares.setup.team_b = b.to_owned();
        }
        squares.input_mode = InputMode::Setup;
    }

    pub fn begin_edit_cell(&mut self) {
        let squares = &mut self.state.squares;
        let Some(game) = &squares.game else {
            return;
        };
        let (row, col) = squares.cursor;
        squares.input = game.cell(row, col).unwrap_or_default().to_owned();
        squares.input_mode = InputMode::EditCell;
    }

    pub fn begin_bulk_assign(&mut self) {
        if self.state.squares.game.is_some() {
            self.state.squares.input.clear();
            self.state.squares.input_mode = InputMode::BulkAssign;
        }
    }

    pub fn input_char(&mut self, c: char) {
        let squares = &mut self.state.squares;
        match squares.input_mode {
            InputMode::Setup => squares.setup.active_mut().push(c),
            InputMode::EditCell | InputMode::BulkAssign => squares.input.push(c),
            InputMode::Normal => {}
        }
    }

    pub fn input_backspace(&mut self) {
        let squares = &mut self.state.squares;
        match squares.input_mode {
            InputMode::Setup => {
                squares.setup.active_mut().pop();
            }
            InputMode::EditCell | InputMode::BulkAssign => {
                squares.input.pop();
            }
            InputMode::Normal => {}
        }
    }

    pub fn input_next_field(&mut self) {
        let setup = &mut self.state.squares.setup;
        setup.field = setup.field.next();
    }

    pub fn cancel_input(&mut self) {
        self.state.squares.cancel_input();
    }

    pub fn submit_input(&mut self) {
        match self.state.squares.input_mode {
            InputMode::Setup => self.create_squares_game(),
            InputMode::EditCell => self.commit_cell_edit(),
            InputMode::BulkAssign => self.commit_bulk_assign(),
            InputMode::Normal => {}
        }
    }

    fn create_squares_game(&mut self) {
        let setup = &self.state.squares.setup;
        match SquaresGame::new(&setup.team_a, &setup.team_b, setup.wager_value()) {
            Ok(game) => {
                info!("new squares game: {} (rows) vs {} (columns)", game.team_a, game.team_b);
                let squares = &mut self.state.squares;
                squares.reset();
                squares.game = Some(game);
                squares.notification = Some(
                    "Game created! Assign names to the squares, then start score tracking.".to_string(),
                );
                self.persist_squares();
            }
            Err(e) => self.state.squares.notification = Some(e.to_string()),
        }
    }

    fn commit_cell_edit(&mut self) {
        let squares = &mut self.state.squares;
        let (row, col) = squares.cursor;
        let name = std::mem::take(&mut squares.input);
        squares.input_mode = InputMode::Normal;
        let Some(game) = squares.game.as_mut() else {
            return;
        };
        match game.assign_cell(row, col, &name) {
            Ok(()) => self.persist_squares(),
            Err(e) => squares.notification = Some(e.to_string()),
        }
    }

    fn commit_bulk_assign(&mut self) {
        let squares = &mut self.state.squares;
        let raw = std::mem::take(&mut squares.input);
        squares.input_mode = InputMode::Normal;
        let Some(game) = squares.game.as_mut() else {
            return;
        };
        let names = parse_name_list(&raw);
        if names.is_empty() {
            return;
        }
        let written = game.bulk_assign(&names);
        squares.notification = Some(format!("Names assigned to the grid ({written} squares)."));
        self.persist_squares();
    }

    /// Request for the live feed, if there is a game to track.
    pub fn score_refresh_request(&self) -> Option<NetworkRequest> {
        let game = self.state.squares.game.as_ref()?;
        Some(NetworkRequest::RefreshScores {
            game_id: game.id.clone(),
            team_a: game.team_a.clone(),
            team_b: game.team_b.clone(),
            event_id: game.event_id.clone(),
        })
    }

    pub fn toggle_polling(&mut self) {
        let squares = &mut self.state.squares;
        if squares.game.is_none() {
            return;
        }
        if squares.snapshot.as_ref().is_some_and(ScoreSnapshot::is_complete) && !squares.polling {
            squares.notification = Some("Game is final; nothing left to track.".to_string());
            return;
        }
        squares.polling = !squares.polling;
    }

    pub fn reset_squares(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("{e}");
        }
        self.state.squares.reset();
        info!("squares game reset");
    }

    fn persist_squares(&mut self) {
        let Some(game) = &self.state.squares.game else {
            return;
        };
        if let Err(e) = self.store.save(game) {
            warn!("{e}");
            self.state.last_error = Some(e.to_string());
        }
    }
}

/// Comma separated names, blanks dropped.
fn parse_name_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squares::engine::PeriodLabel;
    use crate::state::app_state::SetupField;
    use nfl_api::{GameStatus, TeamLine};

    const CSV: &str = "\
Date,DOW,WT,LT,WTS,LTS,Type,Season
2001-09-09,Sun,Green Bay Packers,Chicago Bears,24,21,Regular Season,2001
2002-09-08,Sun,Chicago Bears,Green Bay Packers,30,9,Regular Season,2002
1934-09-23,Sun,Green Bay Packers,Chicago Cardinals,3,0,Regular Season,1934
";

    fn app(name: &str, link: Option<RivalryLink>) -> App {
        let dir = std::env::temp_dir().join(format!("nfltui-app-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        App::with_store(AppSettings::default(), SquaresStore::at(dir.join("squares.json")), link)
    }

    fn load(app: &mut App) {
        app.on_dataset_loaded(games::read_games(CSV.as_bytes()), "test.csv".to_string());
    }

    fn snapshot(status: GameStatus, period: u8, home: &[u16], away: &[u16]) -> ScoreSnapshot {
        ScoreSnapshot {
            event_id: "401671889".to_string(),
            home: TeamLine { name: "Philadelphia Eagles".into(), abbrev: "PHI".into(), linescores: home.to_vec() },
            away: TeamLine { name: "Kansas City Chiefs".into(), abbrev: "KC".into(), linescores: away.to_vec() },
            status,
            period,
            ..Default::default()
        }
    }

    fn with_game(app: &mut App) {
        app.open_setup();
        for c in "Chiefs".chars() {
            app.input_char(c);
        }
        app.input_next_field();
        for c in "Eagles".chars() {
            app.input_char(c);
        }
        app.submit_input();
    }

    #[test]
    fn command_line_link_selects_teams_after_load() {
        let mut app = app("link", Some(RivalryLink::new("Green Bay Packers", "Chicago Bears")));
        assert!(app.state.matchup.report.is_none());
        load(&mut app);

        let report = app.state.matchup.report.as_ref().unwrap();
        assert_eq!(report.record.total_games, 2);
        assert_eq!(app.share_matchup().as_deref(), Some("rivalry?teamA=Green%20Bay%20Packers&teamB=Chicago%20Bears"));
    }

    #[test]
    fn historical_names_resolve_to_the_franchise() {
        let mut app = app("historical", None);
        load(&mut app);
        app.select_teams("Chicago Cardinals", "Green Bay Packers");
        assert_eq!(app.state.matchup.team_a.as_deref(), Some("Arizona Cardinals"));
        assert_eq!(app.state.matchup.report.as_ref().unwrap().record.total_games, 1);
    }

    #[test]
    fn pickers_select_and_swap() {
        let mut app = app("pickers", None);
        load(&mut app);
        app.picker_select();
        app.picker_down();
        app.picker_select();
        let (a, b) = (app.state.dataset.teams[0].clone(), app.state.dataset.teams[1].clone());
        assert_eq!(app.state.matchup.both_selected(), Some((a.as_str(), b.as_str())));

        app.swap_teams();
        assert_eq!(app.state.matchup.team_a.as_deref(), Some(b.as_str()));
        assert!(app.state.matchup.report.is_some());
    }

    #[test]
    fn same_team_twice_has_no_report() {
        let mut app = app("same", None);
        load(&mut app);
        app.select_teams("Chicago Bears", "Chicago Bears");
        assert!(app.state.matchup.report.is_none());
        assert!(app.state.matchup.same_team_selected());
    }

    #[test]
    fn auth_gate_is_kept_apart_from_errors() {
        let mut app = app("auth", None);
        app.on_auth_required("Authentication required for https://x/api/games".to_string());
        assert!(app.state.dataset.auth_required.is_some());
        assert!(app.state.last_error.is_none());
    }

    #[test]
    fn setup_creates_and_persists_a_game() {
        let mut app = app("setup", None);
        with_game(&mut app);
        assert_eq!(app.state.squares.input_mode, InputMode::Normal);
        let game = app.state.squares.game.clone().unwrap();
        assert_eq!((game.team_a.as_str(), game.team_b.as_str()), ("Chiefs", "Eagles"));
        assert_eq!(app.store.load(), Some(game));
    }

    #[test]
    fn setup_without_teams_keeps_the_form_open() {
        let mut app = app("setup-empty", None);
        app.open_setup();
        app.state.squares.setup.field = SetupField::Wager;
        app.submit_input();
        assert!(app.state.squares.game.is_none());
        assert_eq!(app.state.squares.input_mode, InputMode::Setup);
    }

    #[test]
    fn cell_edit_and_bulk_assign() {
        let mut app = app("edit", None);
        with_game(&mut app);

        app.state.squares.cursor = (9, 9);
        app.begin_edit_cell();
        for c in "Zoe".chars() {
            app.input_char(c);
        }
        app.submit_input();

        app.begin_bulk_assign();
        for c in "Ann, Bob ,Cy,,".chars() {
            app.input_char(c);
        }
        app.submit_input();

        let game = app.state.squares.game.as_ref().unwrap();
        assert_eq!(game.cell(0, 0), Some("Ann"));
        assert_eq!(game.cell(0, 2), Some("Cy"));
        assert_eq!(game.cell(9, 9), Some("Zoe"));
        assert_eq!(game.assigned_count(), 4);
        assert_eq!(app.store.load().unwrap().assigned_count(), 4);
    }

    #[test]
    fn final_snapshot_records_winners_and_stops_polling() {
        let mut app = app("final", None);
        with_game(&mut app);
        app.toggle_polling();
        assert!(app.state.squares.polling);

        let snap = snapshot(GameStatus::Complete, 4, &[7, 10, 0, 7], &[3, 7, 7, 3]);
        let game_id = app.state.squares.game.as_ref().unwrap().id.clone();
        app.on_scores_loaded(&game_id, "401671889".to_string(), snap.clone());

        let squares = &app.state.squares;
        let game = squares.game.as_ref().unwrap();
        assert_eq!(game.winners.len(), 5);
        assert_eq!(game.event_id.as_deref(), Some("401671889"));
        assert!(!squares.polling);
        assert!(squares.notification.as_deref().unwrap().starts_with("Final Winner"));

        let saved = app.store.load().unwrap();
        assert_eq!(saved.winner(PeriodLabel::Final), game.winner(PeriodLabel::Final));

        // Overlapping refresh delivering the same result.
        app.on_scores_loaded(&game_id, "401671889".to_string(), snap);
        assert_eq!(app.state.squares.game.as_ref().unwrap().winners.len(), 5);
    }

    #[test]
    fn unmatched_feed_is_reported_not_recorded() {
        let mut app = app("unmatched", None);
        with_game(&mut app);
        let mut snap = snapshot(GameStatus::Complete, 4, &[7], &[0]);
        snap.home.name = "Buffalo Bills".into();
        snap.home.abbrev = "BUF".into();
        snap.event_id = "999".to_string();
        let game_id = app.state.squares.game.as_ref().unwrap().id.clone();
        app.on_scores_loaded(&game_id, "999".to_string(), snap);

        let squares = &app.state.squares;
        assert!(squares.fetch_error.is_some());
        assert!(squares.snapshot.is_none());
        let game = squares.game.as_ref().unwrap();
        assert!(game.winners.is_empty());
        assert_eq!(game.event_id, None);
        assert_eq!(app.store.load().unwrap().event_id, None);

        // The next poll searches the scoreboard again.
        match app.score_refresh_request() {
            Some(NetworkRequest::RefreshScores { event_id, .. }) => assert_eq!(event_id, None),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn scores_for_a_replaced_game_are_dropped() {
        let mut app = app("replaced", None);
        with_game(&mut app);
        let stale_id = match app.score_refresh_request() {
            Some(NetworkRequest::RefreshScores { game_id, .. }) => game_id,
            other => panic!("unexpected request: {other:?}"),
        };
        app.state.squares.game.as_mut().unwrap().id = "replacement".to_string();

        let snap = snapshot(GameStatus::Complete, 4, &[7, 10, 0, 7], &[3, 7, 7, 3]);
        app.on_scores_loaded(&stale_id, "401671889".to_string(), snap);

        let game = app.state.squares.game.as_ref().unwrap();
        assert!(game.winners.is_empty());
        assert_eq!(game.event_id, None);
        assert!(app.state.squares.snapshot.is_none());
    }

    #[test]
    fn reset_clears_saved_game() {
        let mut app = app("reset", None);
        with_game(&mut app);
        app.reset_squares();
        assert!(app.state.squares.game.is_none());
        assert!(app.store.load().is_none());
        assert!(app.score_refresh_request().is_none());
    }

    #[test]
    fn name_list_splits_on_commas() {
        assert_eq!(parse_name_list(" a ,b,,c,"), vec!["a", "b", "c"]);
        assert!(parse_name_list(" , ").is_empty());
    }
}
