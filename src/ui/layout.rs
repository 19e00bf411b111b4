use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const NAVBAR_HEIGHT: u16 = 2;
pub const TOAST_WIDTH: u16 = 44;

pub struct AppLayout {
    pub page: Rect,
    pub navbar: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: page | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let page = chunks[0];
    // The navigation bar floats over the top of the page.
    let navbar = Rect {
        height: NAVBAR_HEIGHT.min(page.height),
        ..page
    };

    AppLayout {
        page,
        navbar,
        status_bar: chunks[1],
    }
}

/// Top-right corner of `area`, sized for a notification of `lines` rows.
pub fn toast_area(area: Rect, lines: u16) -> Rect {
    let width = TOAST_WIDTH.min(area.width);
    let height = lines.saturating_add(2).min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + NAVBAR_HEIGHT.min(area.height - height),
        width,
        height,
    }
}
