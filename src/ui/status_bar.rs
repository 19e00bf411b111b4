use crate::app::state::*;
use crate::contact::SubmissionState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

fn key_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match state.focus {
        FocusPanel::Page => &[
            ("j/k", "scroll"),
            ("1-7", "jump"),
            ("Tab", "focus"),
            ("t", "theme"),
            ("q", "quit"),
        ],
        FocusPanel::Skills | FocusPanel::Projects => &[
            ("j/k", "select"),
            ("Enter", "expand"),
            ("Tab", "next"),
            ("Esc", "page"),
        ],
        FocusPanel::Contact => &[
            ("Tab", "next field"),
            ("Ctrl+S", "send"),
            ("Esc", "leave form"),
        ],
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::for_mode(state.dark_mode);
    let mut parts: Vec<Span> = Vec::new();

    // Focus indicator
    let focus_name = match state.focus {
        FocusPanel::Page => "PAGE",
        FocusPanel::Skills => "SKILLS",
        FocusPanel::Projects => "PROJECTS",
        FocusPanel::Contact => "CONTACT",
    };
    parts.push(Span::styled(format!(" [{}] ", focus_name), theme.status_key()));

    // Status text
    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        theme.status_bar(),
    ));

    match state.contact.state() {
        SubmissionState::Submitting => parts.push(Span::styled(
            " | sending ",
            theme.status_bar().fg(Color::Yellow),
        )),
        SubmissionState::Failed(_) => parts.push(Span::styled(
            " | send failed ",
            theme.status_bar().fg(Color::Red),
        )),
        _ => {}
    }

    let hints: Vec<Span> = key_hints(state)
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(format!(" {}", key), theme.status_key()),
                Span::styled(format!(" {} ", what), theme.status_bar()),
            ]
        })
        .collect();

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let hints_w: usize = hints.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hints_w);
    parts.push(Span::styled(" ".repeat(remaining), theme.status_bar()));
    if used + hints_w <= area.width as usize {
        parts.extend(hints);
    }

    let paragraph = Paragraph::new(Line::from(parts)).style(theme.status_bar());
    frame.render_widget(paragraph, area);
}
