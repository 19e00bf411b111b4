//! The scrollable page: every section rendered to a flat list of lines.
//!
//! [`build`] is deterministic for a given state and width, so the rows it
//! records in [`PageLayout`] line up with what the next frame draws.

use crate::app::state::{AppState, CardSet, FocusPanel, FormTarget, PageLayout, Section};
use crate::contact::{FieldId, SubmissionState};
use crate::ui::text::{pad_to, wrap};
use crate::ui::theme::Theme;
use chrono::Datelike;
use ratatui::prelude::*;
use unicode_width::UnicodeWidthChar;

const MARGIN: usize = 2;
const MESSAGE_ROWS: usize = 4;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

struct PageBuilder {
    theme: Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    layout: PageLayout,
}

impl PageBuilder {
    fn row(&self) -> usize {
        self.lines.len()
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn push(&mut self, spans: Vec<Span<'static>>) {
        let mut all = vec![Span::raw(" ".repeat(MARGIN))];
        all.extend(spans);
        self.lines.push(Line::from(all));
    }

    fn paragraph(&mut self, text: &str, style: Style, indent: usize) {
        let pad = " ".repeat(indent);
        for line in wrap(text, self.width.saturating_sub(indent)) {
            self.push(vec![Span::raw(pad.clone()), Span::styled(line, style)]);
        }
    }

    fn section(&mut self, section: Section, title: &str) {
        let row = self.row();
        self.layout.anchors.insert(section, row);
        self.blank();
        self.blank();
        let rule = "─".repeat(self.width.saturating_sub(title.chars().count() + 4));
        self.push(vec![
            Span::styled(format!("── {} ", title), self.theme.title()),
            Span::styled(rule, self.theme.muted()),
        ]);
        self.blank();
    }
}

/// Render the whole page at `width` columns and measure where things landed.
pub fn build(state: &AppState, width: u16) -> (Vec<Line<'static>>, PageLayout) {
    let mut page = PageBuilder {
        theme: Theme::for_mode(state.dark_mode),
        width: (width as usize).saturating_sub(MARGIN * 2).max(10),
        lines: Vec::new(),
        layout: PageLayout {
            width,
            ..Default::default()
        },
    };

    hero(&mut page, state);
    about(&mut page, state);
    page.section(Section::Skills, "Skills");
    cards(&mut page, state, CardSet::Skills);
    page.section(Section::Projects, "Projects");
    cards(&mut page, state, CardSet::Projects);
    testimonials(&mut page, state);
    blog(&mut page, state);
    contact(&mut page, state);
    footer(&mut page, state);

    page.layout.total_rows = page.lines.len();
    (page.lines, page.layout)
}

fn hero(page: &mut PageBuilder, state: &AppState) {
    let site = &state.config.site;
    page.layout.anchors.insert(Section::Home, 0);
    // Room for the navigation bar.
    for _ in 0..3 {
        page.blank();
    }
    let title = page.theme.title();
    page.paragraph(&site.hero.title, title, 0);
    page.blank();
    let muted = page.theme.muted();
    page.paragraph(&site.hero.subtitle, muted, 0);
    page.blank();
    page.push(vec![
        Span::styled("[ Explore My Work ]", page.theme.button(false)),
        Span::styled("  press e", page.theme.muted()),
    ]);
    page.blank();
}

fn about(page: &mut PageBuilder, state: &AppState) {
    let bio = &state.config.site.bio;
    page.section(Section::About, "About");
    let heading = page.theme.heading();
    page.paragraph(&bio.title, heading, 0);
    page.blank();
    let text = page.theme.text();
    page.paragraph(&bio.description, text, 0);
}

fn cards(page: &mut PageBuilder, state: &AppState, set: CardSet) {
    let controller = state.cards(set);
    let selected = (state.focused_card_set() == Some(set)).then(|| state.card_cursor(set));

    if controller.cards().is_empty() {
        let muted = page.theme.muted();
        page.paragraph("Nothing here yet.", muted, 0);
        return;
    }

    for (index, card) in controller.cards().iter().enumerate() {
        let row = page.row();
        page.layout.card_rows.insert((set, index), row);
        let expanded = controller.is_expanded(&card.id);
        let is_selected = selected == Some(index);

        let pointer = if is_selected { "> " } else { "  " };
        let marker = if expanded { "▾ " } else { "▸ " };
        let summary_style = if is_selected {
            page.theme.card_selected()
        } else {
            page.theme.heading()
        };
        let mut spans = vec![
            Span::styled(pointer, page.theme.card_selected()),
            Span::styled(marker, page.theme.accent()),
            Span::styled(card.summary.clone(), summary_style),
        ];
        if !expanded && is_selected {
            spans.push(Span::styled("  Enter to expand", page.theme.muted()));
        }
        page.push(spans);

        if expanded {
            let text = page.theme.text();
            page.paragraph(&card.detail, text, 4);
            if !card.related_tags.is_empty() {
                let mut tags = vec![Span::raw("    ")];
                for tag in &card.related_tags {
                    tags.push(Span::styled(format!(" {} ", tag), page.theme.tag()));
                    tags.push(Span::raw(" "));
                }
                page.push(tags);
            }
            page.blank();
        }
    }
}

fn testimonials(page: &mut PageBuilder, state: &AppState) {
    page.section(Section::Testimonials, "What People Say");
    for t in &state.config.site.testimonials {
        let text = page.theme.text().add_modifier(Modifier::ITALIC);
        page.paragraph(&format!("\"{}\"", t.content), text, 2);
        page.push(vec![
            Span::raw("  "),
            Span::styled(t.author.clone(), page.theme.heading()),
            Span::styled(format!(", {} via {}", t.role, t.platform), page.theme.muted()),
        ]);
        page.blank();
    }
}

fn blog(page: &mut PageBuilder, state: &AppState) {
    page.section(Section::Blog, "Latest Posts");
    for post in &state.config.site.posts {
        page.push(vec![Span::styled(
            format!(
                "{} · {} · {}",
                post.date.format("%b %-d, %Y"),
                post.category,
                post.read_time
            ),
            page.theme.muted(),
        )]);
        let heading = page.theme.heading();
        page.paragraph(&post.title, heading, 0);
        let text = page.theme.text();
        page.paragraph(&post.excerpt, text, 0);
        page.blank();
    }
}

fn contact(page: &mut PageBuilder, state: &AppState) {
    page.section(Section::Contact, "Get in Touch");
    let form_focused = state.focus == FocusPanel::Contact;

    for field in FieldId::ALL {
        let row = page.row();
        page.layout.form_rows.insert(field, row);
        let active = form_focused && state.form_target == FormTarget::Field(field);
        let label_style = if active {
            page.theme.card_selected()
        } else {
            page.theme.heading()
        };
        page.push(vec![Span::styled(field.label(), label_style)]);

        let value = state.contact.fields().get(field);
        let caret = active.then_some(state.cursor.pos);
        let min_rows = if field == FieldId::Message { MESSAGE_ROWS } else { 1 };
        for line in input_lines(&page.theme, value, field.placeholder(), caret, page.width, active, min_rows) {
            page.push(line);
        }

        if let Some(err) = state.contact.error_for(field) {
            page.push(vec![Span::styled(
                format!("! {}", err.message),
                page.theme.field_error(),
            )]);
        }
        page.blank();
    }

    let on_button = form_focused && state.form_target == FormTarget::SendButton;
    let label = match state.contact.state() {
        SubmissionState::Submitting | SubmissionState::Validating => {
            let frame = SPINNER[(state.tick_count / 2) as usize % SPINNER.len()];
            format!("[ {} Sending... ]", frame)
        }
        _ => "[ Send Message ]".to_string(),
    };
    let mut button = vec![Span::styled(label, page.theme.button(on_button))];
    if form_focused {
        button.push(Span::styled("  Ctrl+S to send", page.theme.muted()));
    }
    page.push(button);
    page.blank();

    let details = &state.config.site.contact;
    page.push(vec![
        Span::styled("Email  ", page.theme.muted()),
        Span::styled(details.email.clone(), page.theme.accent()),
    ]);
    for social in &details.socials {
        page.push(vec![
            Span::styled(format!("{:<7}", social.label), page.theme.muted()),
            Span::styled(social.url.clone(), page.theme.accent()),
        ]);
    }
    page.blank();
    let muted = page.theme.muted();
    page.paragraph(&details.response_note, muted, 0);
}

fn footer(page: &mut PageBuilder, state: &AppState) {
    page.blank();
    page.blank();
    let year = chrono::Local::now().year();
    let muted = page.theme.muted();
    page.paragraph(&format!("© {} {}", year, state.config.site.footer), muted, 0);
    page.blank();
}

/// Lay out an input box: hard-wrapped at `width`, padded so the background
/// fills the box, with the caret drawn as a reversed cell.
fn input_lines(
    theme: &Theme,
    value: &str,
    placeholder: &str,
    caret: Option<usize>,
    width: usize,
    active: bool,
    min_rows: usize,
) -> Vec<Vec<Span<'static>>> {
    let width = width.max(2);
    let fill = theme.input(active);

    if value.is_empty() && caret.is_none() {
        let mut rows = vec![vec![Span::styled(pad_to(placeholder, width), theme.placeholder())]];
        while rows.len() < min_rows {
            rows.push(vec![Span::styled(" ".repeat(width), fill)]);
        }
        return rows;
    }

    let mut rows: Vec<Vec<(char, Style)>> = vec![Vec::new()];
    let mut row_w = 0;
    for (i, c) in value.char_indices() {
        let at_caret = caret == Some(i);
        if c == '\n' {
            if at_caret {
                place(&mut rows, &mut row_w, width, ' ', theme.caret());
            }
            rows.push(Vec::new());
            row_w = 0;
            continue;
        }
        let style = if at_caret { theme.caret() } else { fill };
        place(&mut rows, &mut row_w, width, c, style);
    }
    if caret.is_some_and(|pos| pos >= value.len()) {
        place(&mut rows, &mut row_w, width, ' ', theme.caret());
    }

    while rows.len() < min_rows {
        rows.push(Vec::new());
    }

    rows.into_iter()
        .map(|cells| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style = fill;
            let mut used = 0;
            for (c, style) in cells {
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(c);
                used += c.width().unwrap_or(0);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            if used < width {
                spans.push(Span::styled(" ".repeat(width - used), fill));
            }
            spans
        })
        .collect()
}

fn place(rows: &mut Vec<Vec<(char, Style)>>, row_w: &mut usize, width: usize, c: char, style: Style) {
    let cw = c.width().unwrap_or(0);
    if *row_w + cw > width {
        rows.push(Vec::new());
        *row_w = 0;
    }
    if let Some(row) = rows.last_mut() {
        row.push((c, style));
    }
    *row_w += cw;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState::new(AppConfig::default()).unwrap()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_anchors_follow_page_order() {
        let (lines, layout) = build(&state(), 80);
        assert_eq!(layout.total_rows, lines.len());
        let rows: Vec<usize> = Section::ALL
            .iter()
            .map(|s| layout.anchors[s])
            .collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{:?}", rows);
    }

    #[test]
    fn test_expanding_a_card_shifts_later_rows() {
        let mut state = state();
        let (_, before) = build(&state, 80);
        state.projects.toggle_at(0).unwrap();
        let (lines, after) = build(&state, 80);

        assert_eq!(
            before.card_rows[&(CardSet::Projects, 0)],
            after.card_rows[&(CardSet::Projects, 0)]
        );
        assert!(after.card_rows[&(CardSet::Projects, 1)] > before.card_rows[&(CardSet::Projects, 1)]);
        assert!(after.anchors[&Section::Contact] > before.anchors[&Section::Contact]);

        let first = after.card_rows[&(CardSet::Projects, 0)];
        assert!(line_text(&lines[first]).contains("▾ E-Commerce Platform"));
        assert!(line_text(&lines[first + 1]).contains("Next.js and Stripe"));
    }

    #[test]
    fn test_field_errors_render_under_their_field() {
        let mut state = state();
        let _ = state.contact.submit_current();
        let (lines, layout) = build(&state, 80);
        let email = layout.form_rows[&FieldId::Email];
        assert!(line_text(&lines[email + 2]).contains("Please enter a valid email address"));
    }

    #[test]
    fn test_placeholder_shown_for_empty_unfocused_field() {
        let (lines, layout) = build(&state(), 80);
        let name = layout.form_rows[&FieldId::Name];
        assert!(line_text(&lines[name + 1]).contains(FieldId::Name.placeholder()));
    }

    #[test]
    fn test_input_wraps_and_places_caret() {
        let theme = Theme::for_mode(true);
        let rows = input_lines(&theme, "abcdef", "", Some(6), 4, true, 1);
        assert_eq!(rows.len(), 2);
        let second: String = rows[1].iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(second, "ef  ");
        assert!(rows[1].iter().any(|s| s.style == theme.caret()));
    }

    #[test]
    fn test_message_box_keeps_minimum_height() {
        let theme = Theme::for_mode(true);
        let rows = input_lines(&theme, "hi\nthere", "", None, 20, false, MESSAGE_ROWS);
        assert_eq!(rows.len(), MESSAGE_ROWS);
    }
}
