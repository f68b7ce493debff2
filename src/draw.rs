use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::data::franchise;
use crate::data::games::SeasonType;
use crate::data::matchup::{MatchupRecord, MatchupReport, TimelinePoint};
use crate::squares::engine::{GRID_SIZE, PeriodLabel, Phase, SquaresGame};
use crate::state::app_state::{InputMode, PickerFocus, SetupField, SquaresState};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nfl_api::{ScoreSnapshot, Side};

static TABS: &[&str; 3] = &["Matchup", "Timeline", "Squares"];

const CELL_WIDTH: usize = 7;
const TIMELINE_LABEL_WIDTH: usize = 12;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Matchup => draw_matchup(f, layout.main, app),
            MenuItem::Timeline => draw_timeline(f, layout.main, app),
            MenuItem::Squares => draw_squares(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        if let Some(link) = app.state.share.as_deref() {
            draw_share_popup(f, f.area(), app, link);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Matchup => 0,
        MenuItem::Timeline => 1,
        MenuItem::Squares => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Shown in place of a view while the dataset is missing.
fn draw_dataset_gate(f: &mut Frame, area: Rect, app: &App) {
    let dataset = &app.state.dataset;
    let (msg, color) = if let Some(auth) = dataset.auth_required.as_deref() {
        (
            format!("{auth}\n\nSet NFLTUI_DATA_TOKEN to a valid token, then press R to retry."),
            Color::Yellow,
        )
    } else if let Some(err) = app.state.last_error.as_deref() {
        (format!("Failed to load data:\n{err}\n\nPress R to retry."), Color::Red)
    } else {
        (
            format!("Loading games from {}...", app.settings.data_source.describe()),
            Color::DarkGray,
        )
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

// ---------------------------------------------------------------------------
// Matchup tab
// ---------------------------------------------------------------------------

fn draw_matchup(f: &mut Frame, area: Rect, app: &App) {
    let mut block = default_border(Color::White).title(" Head to Head ");
    if let Some(caption) = app.state.dataset.caption() {
        block = block.title_bottom(Line::from(format!(" {caption} ")).right_aligned());
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.dataset.is_loaded() {
        draw_dataset_gate(f, inner, app);
        return;
    }

    let [pickers, report_area] =
        Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)]).areas(inner);
    let [picker_a, picker_b] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(pickers);
    draw_team_picker(f, picker_a, app, PickerFocus::TeamA);
    draw_team_picker(f, picker_b, app, PickerFocus::TeamB);

    let matchup = &app.state.matchup;
    let [legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(report_area);
    f.render_widget(
        Paragraph::new(" Tab=switch  j/k=move  Enter=pick  s=swap  y=share  J/K=scroll")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );

    let Some(report) = matchup.report.as_ref() else {
        let msg = if matchup.same_team_selected() {
            "Select two different teams."
        } else {
            "Pick Team A and Team B to compare their history."
        };
        draw_placeholder(f, content, msg);
        return;
    };

    if report.is_empty() {
        draw_placeholder(
            f,
            content,
            &format!("No games found between {} and {}.", report.team_a, report.team_b),
        );
        return;
    }

    f.render_widget(
        Paragraph::new(report_lines(report)).scroll((matchup.scroll_offset, 0)),
        content,
    );
}

fn draw_team_picker(f: &mut Frame, area: Rect, app: &App, which: PickerFocus) {
    let matchup = &app.state.matchup;
    let (title, chosen, cursor) = match which {
        PickerFocus::TeamA => (" Team A ", matchup.team_a.as_deref(), matchup.cursor_a),
        PickerFocus::TeamB => (" Team B ", matchup.team_b.as_deref(), matchup.cursor_b),
    };
    let focused = matchup.focus == which;
    let border = if focused { Color::White } else { Color::DarkGray };
    let title = match chosen {
        Some(team) => format!("{title}: {team} "),
        None => title.to_string(),
    };

    let items: Vec<ListItem> = app
        .state
        .dataset
        .teams
        .iter()
        .map(|team| {
            let mut style = Style::default().fg(franchise::team_color(team));
            if !franchise::is_current(team) {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if Some(team.as_str()) == chosen {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Span::styled(team.clone(), style))
        })
        .collect();

    let list = List::new(items)
        .block(default_border(border).title(title))
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(focused.then_some(cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn report_lines(report: &MatchupReport) -> Vec<Line<'static>> {
    let (a, b) = (report.team_a.as_str(), report.team_b.as_str());
    let a_style = Style::default().fg(franchise::team_color(a)).add_modifier(Modifier::BOLD);
    let b_style = Style::default().fg(franchise::team_color(b)).add_modifier(Modifier::BOLD);
    let heading = Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED);
    let r = &report.record;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(a.to_owned(), a_style),
            Span::raw("  vs  "),
            Span::styled(b.to_owned(), b_style),
        ]),
        Line::from(format!(
            "All-time: {} wins, {} wins, {} ties  ({} games)",
            r.a_wins, r.b_wins, r.ties, r.total_games
        )),
        Line::from(match r.leader(a, b) {
            Some(leader) => format!("{leader} lead the series {}", r.summary()),
            None => format!("Series tied {}", r.summary()),
        }),
        Line::from(format!(
            "Avg points in wins: {a} {:.1} | {b} {:.1}",
            r.a_avg_win_score, r.b_avg_win_score
        )),
        Line::from(format!(
            "Avg points in losses: {a} {:.1} | {b} {:.1}",
            r.a_avg_loss_score, r.b_avg_loss_score
        )),
        Line::default(),
        Line::styled("By game type", heading),
        record_line("Regular Season", &report.by_type.regular),
        record_line("Playoff", &report.by_type.playoff),
        Line::default(),
        Line::styled("By day of week", heading),
    ];
    lines.extend(report.by_day.iter().map(|(day, record)| record_line(day, record)));

    let streaks = &report.streaks;
    lines.push(Line::default());
    lines.push(Line::styled("Streaks", heading));
    lines.push(Line::from(format!("Longest {a}: {}", streaks.a_longest)));
    lines.push(Line::from(format!("Longest {b}: {}", streaks.b_longest)));
    lines.push(Line::from(match &streaks.current.team {
        Some(team) => format!("Current: {team} has won {}", streaks.current.count),
        None => "Current: none (last meeting was a tie)".to_string(),
    }));

    lines.push(Line::default());
    lines.push(Line::styled("Biggest blowouts", heading));
    for game in &report.blowouts {
        lines.push(Line::from(format!(
            "{}  {}  by {}",
            game.date,
            game.score_line(),
            game.margin.map_or_else(|| "?".to_string(), |m| m.to_string())
        )));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Recent meetings", heading));
    for game in &report.recent {
        let kind = if game.season_type == SeasonType::Playoff { "  (playoff)" } else { "" };
        lines.push(Line::from(format!("{}  {}{kind}", game.date, game.score_line())));
    }
    lines
}

fn record_line(label: &str, record: &MatchupRecord) -> Line<'static> {
    if record.total_games == 0 {
        return Line::from(format!("{label:<16} no games"));
    }
    Line::from(format!(
        "{label:<16} {:<8} ({} games)",
        record.summary(),
        record.total_games
    ))
}

// ---------------------------------------------------------------------------
// Timeline tab
// ---------------------------------------------------------------------------

fn draw_timeline(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Rivalry Timeline ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.dataset.is_loaded() {
        draw_dataset_gate(f, inner, app);
        return;
    }
    let Some(report) = app.state.matchup.report.as_ref().filter(|r| !r.is_empty()) else {
        draw_placeholder(f, inner, "Choose a matchup on the Matchup tab first.");
        return;
    };

    let [header, content] = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    let a_color = franchise::team_color(&report.team_a);
    let b_color = franchise::team_color(&report.team_b);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("◀ {} wins", report.team_b), Style::default().fg(b_color)),
                Span::raw("   |   "),
                Span::styled(format!("{} wins ▶", report.team_a), Style::default().fg(a_color)),
            ]),
            Line::styled("j/k to scroll, oldest first", Style::default().fg(Color::DarkGray)),
        ]),
        header,
    );

    let max_margin = report
        .timeline
        .iter()
        .filter_map(|p| p.margin)
        .map(i64::unsigned_abs)
        .max()
        .unwrap_or(1)
        .max(1);
    let width = usize::from(content.width);
    let half = width.saturating_sub(TIMELINE_LABEL_WIDTH + 2).min(80) / 3;

    let lines: Vec<Line> = report
        .timeline
        .iter()
        .map(|point| timeline_line(point, max_margin, half, a_color, b_color))
        .collect();
    f.render_widget(
        Paragraph::new(lines).scroll((app.state.timeline.scroll_offset, 0)),
        content,
    );
}

fn timeline_line(point: &TimelinePoint, max_margin: u64, half: usize, a: Color, b: Color) -> Line<'static> {
    let label = match point.season {
        Some(season) => format!("{season} {}", point.day_of_week),
        None => point.date.clone(),
    };
    let margin = point.margin.unwrap_or(0);
    let len = bar_length(margin.unsigned_abs(), max_margin, half);
    let bar = "█".repeat(len);
    let (left, right) = if margin < 0 {
        (Span::styled(format!("{bar:>half$}"), Style::default().fg(b)), Span::raw(" ".repeat(half)))
    } else {
        (Span::raw(" ".repeat(half)), Span::styled(format!("{bar:<half$}"), Style::default().fg(a)))
    };
    let axis = if point.is_tie { "=" } else { "│" };

    let score = |s: Option<u32>| s.map_or_else(|| "?".to_string(), |v| v.to_string());
    let detail = format!(
        " {} {}-{} {}{}",
        point.winner,
        score(point.winner_score),
        score(point.loser_score),
        point.loser,
        if point.season_type == SeasonType::Playoff { " (playoff)" } else { "" }
    );

    Line::from(vec![
        Span::styled(format!("{label:<w$}", w = TIMELINE_LABEL_WIDTH), Style::default().fg(Color::Gray)),
        left,
        Span::raw(axis),
        right,
        Span::raw(detail),
    ])
}

/// Bar cells for a margin, at least one for any decided game.
fn bar_length(margin: u64, max_margin: u64, half: usize) -> usize {
    if margin == 0 || half == 0 {
        return 0;
    }
    let scaled = (margin as f64 / max_margin.max(1) as f64 * half as f64).round() as usize;
    scaled.clamp(1, half)
}

// ---------------------------------------------------------------------------
// Squares tab
// ---------------------------------------------------------------------------

fn draw_squares(f: &mut Frame, area: Rect, app: &App) {
    let squares = &app.state.squares;
    let phase = Phase::of(squares.game.as_ref());
    let block = default_border(Color::White).title(format!(" Super Bowl Squares · {} ", phase.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if squares.input_mode == InputMode::Setup {
        draw_setup_form(f, inner, squares);
        return;
    }
    let Some(game) = squares.game.as_ref() else {
        draw_placeholder(f, inner, "No squares game yet. Press n to set one up.");
        return;
    };

    let grid_width = u16::try_from(CELL_WIDTH * (GRID_SIZE + 1) + 2).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Length(grid_width), Constraint::Fill(1)]).areas(inner);
    let [grid_area, input_area] =
        Layout::vertical([Constraint::Length(GRID_SIZE as u16 * 2 + 3), Constraint::Fill(1)]).areas(left);

    f.render_widget(Paragraph::new(grid_lines(game, squares)), grid_area);
    draw_squares_input(f, input_area, squares);
    draw_squares_sidebar(f, right, game, squares);
}

fn grid_lines(game: &SquaresGame, squares: &SquaresState) -> Vec<Line<'static>> {
    let a_color = franchise::team_color(&game.team_a);
    let b_color = franchise::team_color(&game.team_b);
    let header_b = Style::default().fg(b_color).add_modifier(Modifier::BOLD);
    let header_a = Style::default().fg(a_color).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::raw(" ".repeat(CELL_WIDTH)),
        Span::styled(format!("{} →", game.team_b), header_b),
    ])];
    let mut digits = vec![Span::styled(format!("{:<w$}", "↓", w = CELL_WIDTH), header_a)];
    digits.extend(
        game.col_digits
            .iter()
            .map(|d| Span::styled(format!("{d:^w$}", w = CELL_WIDTH), header_b)),
    );
    lines.push(Line::from(digits));

    for (row, names) in game.grid.iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:^w$}", game.row_digits[row], w = CELL_WIDTH),
            header_a,
        )];
        for (col, name) in names.iter().enumerate() {
            let mut style = Style::default().fg(Color::Gray);
            if game.winners.iter().any(|w| (w.row, w.col) == (row, col)) {
                style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            if squares.highlight == Some((row, col)) {
                style = Style::default().fg(Color::Black).bg(Color::Green);
            }
            if squares.cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let label = if name.is_empty() { "·".to_string() } else { truncate_name(name, CELL_WIDTH - 1) };
            spans.push(Span::styled(format!("{label:^w$}", w = CELL_WIDTH), style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }
    lines
}

fn draw_squares_input(f: &mut Frame, area: Rect, squares: &SquaresState) {
    let (title, hint) = match squares.input_mode {
        InputMode::EditCell => (
            format!(" Square ({}, {}) ", squares.cursor.0, squares.cursor.1),
            "Enter=save  Esc=cancel  (empty clears the square)",
        ),
        InputMode::BulkAssign => (
            " Bulk assign ".to_string(),
            "Names separated by commas, filled left to right from the top. Enter=apply",
        ),
        _ => {
            let legend = "arrows/hjkl=move  e=edit  b=bulk  p=poll  r=refresh  n=new  X=reset";
            f.render_widget(
                Paragraph::new(legend)
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true }),
                area,
            );
            return;
        }
    };
    let block = default_border(Color::Cyan).title(title);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("{}▏", squares.input)),
            Line::styled(hint, Style::default().fg(Color::DarkGray)),
        ])
        .wrap(Wrap { trim: false })
        .block(block),
        area,
    );
}

fn draw_squares_sidebar(f: &mut Frame, area: Rect, game: &SquaresGame, squares: &SquaresState) {
    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED);
    let payouts = game.payouts();

    let mut lines = vec![
        Line::from(format!("{} (rows) vs {} (columns)", game.team_a, game.team_b)),
        Line::from(format!(
            "${:.2} per square · pool ${:.2} · {}/100 assigned",
            game.wager,
            payouts.pool,
            game.assigned_count()
        )),
        Line::styled(
            if squares.polling { "Tracking live scores (p to stop)" } else { "Score tracking off (p to start)" },
            if squares.polling { Style::default().fg(Color::Green) } else { dim },
        ),
    ];
    if let Some(note) = squares.notification.as_deref() {
        lines.push(Line::styled(note.to_owned(), Style::default().fg(Color::Cyan)));
    }
    if let Some(err) = squares.fetch_error.as_deref() {
        lines.push(Line::styled(err.to_owned(), Style::default().fg(Color::Yellow)));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Scoreboard", heading));
    match squares.snapshot.as_ref() {
        Some(snapshot) => lines.extend(scoreboard_lines(snapshot)),
        None => lines.push(Line::styled("No scores yet (r to refresh)", dim)),
    }
    if let Some(at) = squares.last_update.as_deref() {
        lines.push(Line::styled(format!("updated {at}"), dim));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Winners", heading));
    if game.winners.is_empty() {
        lines.push(Line::styled("none yet", dim));
    }
    for winner in &game.winners {
        let prize = payouts
            .for_label(winner.label)
            .map(|amount| format!("  ${amount:.2}"))
            .unwrap_or_default();
        lines.push(Line::from(format!(
            "{:<6} {} [{}-{}] {}-{}{prize}",
            winner.label.to_string(),
            winner.name,
            winner.digit_a,
            winner.digit_b,
            winner.score_a,
            winner.score_b
        )));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Payouts", heading));
    for (label, amount) in &payouts.shares {
        let paid = game.winner(*label).is_some();
        let style = if paid { Style::default().fg(Color::Green) } else { Style::default() };
        lines.push(Line::styled(format!("{:<6} ${amount:.2}", label.to_string()), style));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(default_border(Color::DarkGray)),
        area,
    );
}

fn scoreboard_lines(snapshot: &ScoreSnapshot) -> Vec<Line<'static>> {
    let periods = snapshot.home.linescores.len().max(snapshot.away.linescores.len()).max(4);
    let header: String = (1..=periods)
        .map(|p| format!("{:>4}", PeriodLabel::for_period(u8::try_from(p).unwrap_or(u8::MAX)).to_string()))
        .collect();
    let mut lines = vec![Line::from(format!("{:<6}{header}   T", ""))];
    for side in [Side::Away, Side::Home] {
        let line = snapshot.side(side);
        let cells: String = (0..periods)
            .map(|i| line.linescores.get(i).map_or_else(|| format!("{:>4}", "-"), |p| format!("{p:>4}")))
            .collect();
        lines.push(Line::styled(
            format!("{:<6}{cells}{:>4}", truncate_name(&line.abbrev, 5).trim_end(), line.total()),
            Style::default().fg(franchise::team_color(&line.name)),
        ));
    }
    let status = if snapshot.status_detail.is_empty() {
        snapshot.status.label().to_string()
    } else {
        snapshot.status_detail.clone()
    };
    lines.push(Line::from(status));
    lines
}

fn draw_setup_form(f: &mut Frame, area: Rect, squares: &SquaresState) {
    let form = &squares.setup;
    let field = |label: &str, value: &str, which: SetupField| {
        let active = form.field == which;
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if active { "▏" } else { "" };
        Line::styled(format!("{label:<22}{value}{cursor}"), style)
    };

    let mut lines = vec![
        Line::from("New squares game"),
        Line::default(),
        field("Team A (rows):", &form.team_a, SetupField::TeamA),
        field("Team B (columns):", &form.team_b, SetupField::TeamB),
        field("Wager per square ($):", &form.wager, SetupField::Wager),
        Line::default(),
        Line::styled("Tab=next field  Enter=create  Esc=cancel", Style::default().fg(Color::DarkGray)),
    ];
    if let Some(note) = squares.notification.as_deref() {
        lines.push(Line::styled(note.to_owned(), Style::default().fg(Color::Yellow)));
    }
    if squares.game.is_some() {
        lines.push(Line::styled(
            "Creating a new game replaces the current one.",
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let text = "\
Global:   q quit   1 Matchup   2 Timeline   3 Squares   ? help   \" logs   f full screen   R reload data
Matchup:  Tab/h/l switch picker   j/k move   Enter pick   s swap teams   y share link   J/K scroll
Timeline: j/k scroll
Squares:  n new game   arrows/hjkl move   e/Enter edit square   b bulk assign
          p start/stop score tracking   r refresh now   X reset game
Editing:  type to enter text   Backspace delete   Enter save   Esc cancel

Esc to return";
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_share_popup(f: &mut Frame, area: Rect, app: &App, link: &str) {
    let width = area.width.saturating_sub(8).min(90);
    let height = 9.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let mut lines = vec![Line::styled(link.to_owned(), Style::default().fg(Color::Cyan)), Line::default()];
    if let Some(report) = app.state.matchup.report.as_ref() {
        lines.extend(report.share_text().lines().map(|l| Line::from(l.to_owned())));
    }

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(default_border(Color::Cyan).title(" Share (Esc to close) ")),
        popup,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::DarkGray))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(widget, area);
}

fn truncate_name(name: &str, max: usize) -> String {
    let mut s: String = name.chars().take(max).collect();
    while s.chars().count() < max {
        s.push(' ');
    }
    s
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_margin() {
        assert_eq!(bar_length(0, 30, 20), 0);
        assert_eq!(bar_length(30, 30, 20), 20);
        assert_eq!(bar_length(15, 30, 20), 10);
        assert_eq!(bar_length(1, 60, 20), 1);
        assert_eq!(bar_length(99, 30, 20), 20);
    }

    #[test]
    fn names_are_padded_or_cut() {
        assert_eq!(truncate_name("Bo", 4), "Bo  ");
        assert_eq!(truncate_name("Alexandra", 6), "Alexan");
    }
}
