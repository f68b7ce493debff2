use crate::app::MenuItem;
use crate::data::games::GameRecord;
use crate::data::matchup::MatchupReport;
use crate::squares::engine::{GRID_SIZE, SquaresGame};
use nfl_api::ScoreSnapshot;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DatasetState {
    pub games: Vec<GameRecord>,
    /// Picker order: current franchises, then historical ones.
    pub teams: Vec<String>,
    pub origin: Option<String>,
    /// Set when the data endpoint asked for credentials.
    pub auth_required: Option<String>,
}

impl DatasetState {
    pub fn is_loaded(&self) -> bool {
        !self.games.is_empty()
    }

    pub fn team_index(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t == name)
    }

    /// "14870 games from <origin>", once something is loaded.
    pub fn caption(&self) -> Option<String> {
        let origin = self.origin.as_deref().filter(|_| self.is_loaded())?;
        Some(format!("{} games from {origin}", self.games.len()))
    }
}

// ---------------------------------------------------------------------------
// Matchup + timeline views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerFocus {
    #[default]
    TeamA,
    TeamB,
}

impl PickerFocus {
    pub fn toggle(self) -> Self {
        match self {
            PickerFocus::TeamA => PickerFocus::TeamB,
            PickerFocus::TeamB => PickerFocus::TeamA,
        }
    }
}

#[derive(Debug, Default)]
pub struct MatchupState {
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub focus: PickerFocus,
    /// Highlighted row in each picker list.
    pub cursor_a: usize,
    pub cursor_b: usize,
    /// `None` until two different teams are picked.
    pub report: Option<MatchupReport>,
    pub scroll_offset: u16,
}

impl MatchupState {
    pub fn cursor(&self) -> usize {
        match self.focus {
            PickerFocus::TeamA => self.cursor_a,
            PickerFocus::TeamB => self.cursor_b,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            PickerFocus::TeamA => &mut self.cursor_a,
            PickerFocus::TeamB => &mut self.cursor_b,
        }
    }

    pub fn move_down(&mut self, team_count: usize) {
        let max = team_count.saturating_sub(1);
        let cursor = self.cursor_mut();
        *cursor = (*cursor + 1).min(max);
    }

    pub fn move_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn both_selected(&self) -> Option<(&str, &str)> {
        Some((self.team_a.as_deref()?, self.team_b.as_deref()?))
    }

    pub fn same_team_selected(&self) -> bool {
        matches!(self.both_selected(), Some((a, b)) if a == b)
    }
}

#[derive(Debug, Default)]
pub struct TimelineState {
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Squares
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Setup,
    EditCell,
    BulkAssign,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetupField {
    #[default]
    TeamA,
    TeamB,
    Wager,
}

impl SetupField {
    pub fn next(self) -> Self {
        match self {
            SetupField::TeamA => SetupField::TeamB,
            SetupField::TeamB => SetupField::Wager,
            SetupField::Wager => SetupField::TeamA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetupForm {
    pub team_a: String,
    pub team_b: String,
    pub wager: String,
    pub field: SetupField,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            team_a: String::new(),
            team_b: String::new(),
            wager: "1".to_string(),
            field: SetupField::TeamA,
        }
    }
}

impl SetupForm {
    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            SetupField::TeamA => &mut self.team_a,
            SetupField::TeamB => &mut self.team_b,
            SetupField::Wager => &mut self.wager,
        }
    }

    /// Unparseable wagers fall back to one unit per square.
    pub fn wager_value(&self) -> f64 {
        self.wager.trim().trim_start_matches('$').parse().unwrap_or(1.0)
    }

    pub fn is_complete(&self) -> bool {
        !self.team_a.trim().is_empty() && !self.team_b.trim().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SquaresState {
    pub game: Option<SquaresGame>,
    /// (row, col) of the grid cursor.
    pub cursor: (usize, usize),
    pub input_mode: InputMode,
    pub input: String,
    pub setup: SetupForm,
    pub snapshot: Option<ScoreSnapshot>,
    pub polling: bool,
    /// Square of the most recent winner.
    pub highlight: Option<(usize, usize)>,
    pub notification: Option<String>,
    pub fetch_error: Option<String>,
    pub last_update: Option<String>,
}

impl SquaresState {
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let step = |v: usize, d: isize| v.saturating_add_signed(d).min(GRID_SIZE - 1);
        self.cursor = (step(self.cursor.0, d_row), step(self.cursor.1, d_col));
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Forget everything tied to the current game.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Link shown after pressing the share key on the matchup tab.
    pub share: Option<String>,
    pub dataset: DatasetState,
    pub matchup: MatchupState,
    pub timeline: TimelineState,
    pub squares: SquaresState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a text field owns the keyboard.
    pub fn is_typing(&self) -> bool {
        self.active_tab == MenuItem::Squares && self.squares.input_mode != InputMode::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_names_origin_once_loaded() {
        let mut d = DatasetState { origin: Some("games.csv".to_string()), ..Default::default() };
        assert_eq!(d.caption(), None);
        d.games = vec![GameRecord::default(), GameRecord::default()];
        assert_eq!(d.caption().as_deref(), Some("2 games from games.csv"));
    }

    #[test]
    fn picker_cursor_is_clamped_per_focus() {
        let mut m = MatchupState::default();
        m.move_up();
        assert_eq!(m.cursor(), 0);
        for _ in 0..5 {
            m.move_down(3);
        }
        assert_eq!(m.cursor_a, 2);

        m.focus = m.focus.toggle();
        m.move_down(3);
        assert_eq!((m.cursor_a, m.cursor_b), (2, 1));
    }

    #[test]
    fn same_team_is_detected() {
        let mut m = MatchupState {
            team_a: Some("Chicago Bears".to_string()),
            team_b: Some("Chicago Bears".to_string()),
            ..Default::default()
        };
        assert!(m.same_team_selected());
        m.team_b = Some("Detroit Lions".to_string());
        assert!(!m.same_team_selected());
        assert_eq!(m.both_selected(), Some(("Chicago Bears", "Detroit Lions")));
    }

    #[test]
    fn grid_cursor_stays_on_the_board() {
        let mut s = SquaresState::default();
        s.move_cursor(-1, -1);
        assert_eq!(s.cursor, (0, 0));
        s.move_cursor(4, 20);
        assert_eq!(s.cursor, (4, 9));
    }

    #[test]
    fn setup_form_cycles_and_parses_wager() {
        let mut form = SetupForm::default();
        form.active_mut().push_str("Chiefs");
        form.field = form.field.next();
        form.active_mut().push_str("Eagles");
        form.field = form.field.next();
        assert_eq!(form.field, SetupField::Wager);
        *form.active_mut() = "$2.50".to_string();

        assert!(form.is_complete());
        assert_eq!(form.wager_value(), 2.5);
        form.wager = "lots".to_string();
        assert_eq!(form.wager_value(), 1.0);
        assert_eq!(form.field.next(), SetupField::TeamA);
    }
}
