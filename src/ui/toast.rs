use crate::app::state::AppState;
use crate::contact::NoticeKind;
use crate::ui::layout::{toast_area, TOAST_WIDTH};
use crate::ui::text::wrap;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Floating notification for the last finished submission.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(notice) = state.contact.notice() else {
        return;
    };
    let theme = Theme::for_mode(state.dark_mode);
    let (title, accent) = match notice.kind {
        NoticeKind::Success => (" Sent ", theme.success()),
        NoticeKind::Error => (" Not sent ", theme.error()),
    };

    let inner_width = TOAST_WIDTH.min(area.width).saturating_sub(2) as usize;
    let mut lines: Vec<Line> = wrap(&notice.text, inner_width)
        .into_iter()
        .map(|l| Line::styled(l, theme.text()))
        .collect();
    lines.push(Line::styled("Esc to dismiss", theme.muted()));

    let rect = toast_area(area, u16::try_from(lines.len()).unwrap_or(u16::MAX));
    let block = Block::default()
        .title(title)
        .title_style(accent.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(accent)
        .style(theme.page());

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
