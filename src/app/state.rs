use crate::cards::ExclusiveExpansionController;
use crate::config::AppConfig;
use crate::contact::{FieldId, NoticeKind, SubmissionController};
use crate::scroll::{ScrollPolicy, ScrollState, ScrollVisibilityController};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::time::Instant;

/// Page sections, in page order. Each one is a navigation anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Testimonials,
    Blog,
    Contact,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Testimonials,
        Section::Blog,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Testimonials => "Testimonials",
            Section::Blog => "Blog",
            Section::Contact => "Contact",
        }
    }

    /// Number key that jumps to this anchor.
    pub fn hotkey(self) -> char {
        match self {
            Section::Home => '1',
            Section::About => '2',
            Section::Skills => '3',
            Section::Projects => '4',
            Section::Testimonials => '5',
            Section::Blog => '6',
            Section::Contact => '7',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.hotkey() == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardSet {
    Skills,
    Projects,
}

impl CardSet {
    pub fn section(self) -> Section {
        match self {
            CardSet::Skills => Section::Skills,
            CardSet::Projects => Section::Projects,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Page,
    Skills,
    Projects,
    Contact,
}

/// Which part of the contact form has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Field(FieldId),
    SendButton,
}

/// Row positions produced by the last page layout pass.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub total_rows: usize,
    pub anchors: BTreeMap<Section, usize>,
    pub card_rows: BTreeMap<(CardSet, usize), usize>,
    pub form_rows: BTreeMap<FieldId, usize>,
}

/// Caret position inside the focused contact field, as a byte offset.
#[derive(Debug, Default)]
pub struct TextCursor {
    pub pos: usize,
}

impl TextCursor {
    pub fn clamp(&mut self, text: &str) {
        if self.pos > text.len() {
            self.pos = text.len();
        }
        while !text.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
    }

    pub fn insert_char(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        text.insert(self.pos, c);
        self.pos += c.len_utf8();
    }

    pub fn delete_back(&mut self, text: &mut String) {
        self.clamp(text);
        if self.pos > 0 {
            let prev = text[..self.pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            text.drain(prev..self.pos);
            self.pos = prev;
        }
    }

    pub fn delete_forward(&mut self, text: &mut String) {
        self.clamp(text);
        if self.pos < text.len() {
            let next = text[self.pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.pos + i)
                .unwrap_or(text.len());
            text.drain(self.pos..next);
        }
    }

    pub fn move_left(&mut self, text: &str) {
        self.clamp(text);
        if self.pos > 0 {
            self.pos = text[..self.pos]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self, text: &str) {
        self.clamp(text);
        if self.pos < text.len() {
            self.pos = text[self.pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.pos + i)
                .unwrap_or(text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.pos = 0;
    }

    pub fn move_end(&mut self, text: &str) {
        self.pos = text.len();
    }

    pub fn delete_word_back(&mut self, text: &mut String) {
        self.clamp(text);
        if self.pos == 0 {
            return;
        }
        let mut pos = self.pos;
        // Skip trailing whitespace
        while pos > 0 && text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        text.drain(pos..self.pos);
        self.pos = pos;
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub scroll: ScrollVisibilityController,
    pub skills: ExclusiveExpansionController,
    pub projects: ExclusiveExpansionController,
    pub contact: SubmissionController,
    pub focus: FocusPanel,
    pub form_target: FormTarget,
    pub cursor: TextCursor,
    pub card_cursor: BTreeMap<CardSet, usize>,
    /// First page row shown in the viewport.
    pub offset: usize,
    pub viewport_rows: usize,
    pub layout: PageLayout,
    pub layout_stale: bool,
    pub dark_mode: bool,
    pub notice_since: Option<Instant>,
    pub status_message: Option<String>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let skills = config
            .site
            .skill_cards()
            .context("Invalid [site] skills")?;
        let projects = config
            .site
            .project_cards()
            .context("Invalid [site] projects")?;
        let policy = ScrollPolicy::from(&config.navigation);
        let dark_mode = config.ui.dark_mode;
        Ok(Self {
            config,
            scroll: ScrollVisibilityController::new(policy),
            skills: ExclusiveExpansionController::new(skills),
            projects: ExclusiveExpansionController::new(projects),
            contact: SubmissionController::new(),
            focus: FocusPanel::Page,
            form_target: FormTarget::Field(FieldId::Name),
            cursor: TextCursor::default(),
            card_cursor: BTreeMap::new(),
            offset: 0,
            viewport_rows: 0,
            layout: PageLayout::default(),
            layout_stale: true,
            dark_mode,
            notice_since: None,
            status_message: None,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        })
    }

    pub fn cards(&self, set: CardSet) -> &ExclusiveExpansionController {
        match set {
            CardSet::Skills => &self.skills,
            CardSet::Projects => &self.projects,
        }
    }

    pub fn cards_mut(&mut self, set: CardSet) -> &mut ExclusiveExpansionController {
        match set {
            CardSet::Skills => &mut self.skills,
            CardSet::Projects => &mut self.projects,
        }
    }

    pub fn card_cursor(&self, set: CardSet) -> usize {
        self.card_cursor.get(&set).copied().unwrap_or(0)
    }

    pub fn focused_card_set(&self) -> Option<CardSet> {
        match self.focus {
            FocusPanel::Skills => Some(CardSet::Skills),
            FocusPanel::Projects => Some(CardSet::Projects),
            FocusPanel::Page | FocusPanel::Contact => None,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn max_offset(&self) -> usize {
        self.layout.total_rows.saturating_sub(self.viewport_rows)
    }

    /// Move the viewport and feed the new position to the scroll controller.
    pub fn scroll_to(&mut self, row: usize) {
        self.offset = row.min(self.max_offset());
        let position = (self.offset as u64 * self.config.ui.row_height as u64).min(u32::MAX as u64);
        self.scroll.on_scroll(position as u32);
        self.dirty = true;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let row = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.scroll_to(row);
    }

    pub fn jump_to(&mut self, section: Section) {
        let row = self.layout.anchors.get(&section).copied().unwrap_or(0);
        self.scroll_to(row);
    }

    /// Scroll just enough to bring `row` into the viewport.
    pub fn reveal_row(&mut self, row: usize) {
        if self.viewport_rows == 0 {
            return;
        }
        if row < self.offset {
            self.scroll_to(row);
        } else if row >= self.offset + self.viewport_rows {
            self.scroll_to(row + 1 - self.viewport_rows);
        }
    }

    /// Install a freshly measured layout, keeping the viewport in range.
    pub fn apply_layout(&mut self, layout: PageLayout, viewport_rows: usize) {
        self.layout = layout;
        self.viewport_rows = viewport_rows;
        self.layout_stale = false;
        if self.offset > self.max_offset() {
            self.scroll_to(self.max_offset());
        }
    }

    pub fn needs_layout(&self, width: u16, viewport_rows: usize) -> bool {
        self.layout_stale || self.layout.width != width || self.viewport_rows != viewport_rows
    }

    /// Drop a stale hint such as "Please fix 2 fields". "Sending message..."
    /// stays until the delivery finishes.
    pub fn clear_status_hint(&mut self) {
        if !self.contact.is_busy() {
            self.status_message = None;
        }
    }

    pub fn set_focus(&mut self, focus: FocusPanel) {
        if self.focus == focus {
            return;
        }
        self.focus = focus;
        self.clear_status_hint();
        match focus {
            FocusPanel::Skills => self.jump_to(Section::Skills),
            FocusPanel::Projects => self.jump_to(Section::Projects),
            FocusPanel::Contact => {
                self.form_target = FormTarget::Field(FieldId::Name);
                self.cursor.move_end(&self.contact.fields().name);
                self.jump_to(Section::Contact);
            }
            FocusPanel::Page => {}
        }
        self.layout_stale = true;
        self.dirty = true;
    }

    pub fn cycle_focus(&mut self) {
        let next = match self.focus {
            FocusPanel::Page => FocusPanel::Skills,
            FocusPanel::Skills => FocusPanel::Projects,
            FocusPanel::Projects => FocusPanel::Contact,
            FocusPanel::Contact => FocusPanel::Page,
        };
        self.set_focus(next);
    }

    pub fn cycle_focus_back(&mut self) {
        let prev = match self.focus {
            FocusPanel::Page => FocusPanel::Contact,
            FocusPanel::Skills => FocusPanel::Page,
            FocusPanel::Projects => FocusPanel::Skills,
            FocusPanel::Contact => FocusPanel::Projects,
        };
        self.set_focus(prev);
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.layout_stale = true;
        self.dirty = true;
    }

    pub fn showing_error_notice(&self) -> bool {
        self.contact
            .notice()
            .is_some_and(|n| n.kind == NoticeKind::Error)
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        let pct = if self.max_offset() == 0 {
            100
        } else {
            self.offset * 100 / self.max_offset()
        };
        format!("{}%", pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default()).unwrap();
        let mut layout = PageLayout {
            width: 80,
            total_rows: 200,
            ..Default::default()
        };
        layout.anchors.insert(Section::Home, 0);
        layout.anchors.insert(Section::Skills, 40);
        layout.anchors.insert(Section::Contact, 170);
        state.apply_layout(layout, 20);
        state
    }

    #[test]
    fn test_scroll_feeds_controller_in_scroll_units() {
        let mut state = state();
        state.scroll_to(12);
        assert_eq!(state.scroll_state().current_position, 120);
        assert!(!state.scroll_state().visible);
        state.scroll_by(-1);
        assert_eq!(state.offset, 11);
        assert!(state.scroll_state().visible);
    }

    #[test]
    fn test_scroll_is_clamped_to_page() {
        let mut state = state();
        state.scroll_to(10_000);
        assert_eq!(state.offset, 180);
        state.scroll_by(-10_000);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_shrinking_layout_pulls_viewport_back() {
        let mut state = state();
        state.scroll_to(180);
        let layout = PageLayout {
            width: 80,
            total_rows: 100,
            ..Default::default()
        };
        state.apply_layout(layout, 20);
        assert_eq!(state.offset, 80);
    }

    #[test]
    fn test_focusing_contact_jumps_to_anchor() {
        let mut state = state();
        state.set_focus(FocusPanel::Contact);
        assert_eq!(state.offset, 170);
        assert_eq!(state.form_target, FormTarget::Field(FieldId::Name));
    }

    #[test]
    fn test_reveal_row_scrolls_minimally() {
        let mut state = state();
        state.reveal_row(25);
        assert_eq!(state.offset, 6);
        state.reveal_row(10);
        assert_eq!(state.offset, 6);
        state.reveal_row(2);
        assert_eq!(state.offset, 2);
    }

    #[test]
    fn test_focus_change_clears_status_hint() {
        let mut state = state();
        state.status_message = Some("Please fix 2 fields".into());
        state.set_focus(FocusPanel::Skills);
        assert_eq!(state.status_message, None);
        assert!(state.status_line().ends_with('%'));
    }

    #[test]
    fn test_section_hotkeys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_hotkey(section.hotkey()), Some(section));
        }
        assert_eq!(Section::from_hotkey('9'), None);
    }

    #[test]
    fn test_text_cursor_editing() {
        let mut text = String::new();
        let mut cursor = TextCursor::default();
        for c in "héllo wörld".chars() {
            cursor.insert_char(&mut text, c);
        }
        cursor.delete_word_back(&mut text);
        assert_eq!(text, "héllo ");
        cursor.move_left(&text);
        cursor.move_left(&text);
        cursor.delete_back(&mut text);
        assert_eq!(text, "hélo ");
        cursor.move_home();
        cursor.delete_forward(&mut text);
        assert_eq!(text, "élo ");
    }
}
