use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (body, logs) = Self::split_logs(area, show_logs);

        if full_screen {
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main: body,
                logs,
            };
        }

        let [tab, main] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(body);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            main,
            logs,
        }
    }

    fn split_logs(area: Rect, show_logs: bool) -> (Rect, Option<Rect>) {
        if !show_logs || area.height < LOG_PANE_HEIGHT * 2 {
            return (area, None);
        }
        let [body, logs] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(area);
        (body, Some(logs))
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_pane_takes_the_bottom_rows() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = LayoutAreas::from_rect(area, false, true);
        let logs = layout.logs.unwrap();
        assert_eq!(logs.height, LOG_PANE_HEIGHT);
        assert_eq!(logs.y, 30);
        assert_eq!(layout.main.y, TAB_BAR_HEIGHT);
        assert_eq!(layout.main.height, 40 - LOG_PANE_HEIGHT - TAB_BAR_HEIGHT);
    }

    #[test]
    fn small_or_full_screen_layouts() {
        let small = LayoutAreas::from_rect(Rect::new(0, 0, 80, 15), false, true);
        assert!(small.logs.is_none());

        let full = LayoutAreas::from_rect(Rect::new(0, 0, 80, 30), true, false);
        assert_eq!(full.main, Rect::new(0, 0, 80, 30));
        assert_eq!(full.tab_bar, [Rect::ZERO, Rect::ZERO]);
    }
}
