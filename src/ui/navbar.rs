use crate::app::state::{AppState, Section};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Section anchor the viewport is currently in.
pub fn current_section(state: &AppState) -> Section {
    Section::ALL
        .into_iter()
        .filter(|s| {
            state
                .layout
                .anchors
                .get(s)
                .is_some_and(|row| *row <= state.offset)
        })
        .last()
        .unwrap_or(Section::Home)
}

/// Draw the navigation bar, if the scroll controller says it is visible.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if !state.scroll_state().visible {
        return;
    }

    let theme = Theme::for_mode(state.dark_mode);
    let bar = theme.navbar(state.scroll.reveal());
    let current = current_section(state);

    let mut spans = vec![Span::styled(
        format!(" {} ", state.config.site.brand),
        theme.title(),
    )];
    for section in Section::ALL {
        let style = if section == current {
            theme.card_selected()
        } else {
            theme.text()
        };
        spans.push(Span::styled(format!(" {}", section.hotkey()), theme.muted()));
        spans.push(Span::styled(format!(":{}", section.label()), style));
    }
    let icon = if state.dark_mode { "  ☀ t" } else { "  ☾ t" };
    spans.push(Span::styled(icon, theme.muted()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.muted())
        .style(bar);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
