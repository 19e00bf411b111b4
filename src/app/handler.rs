use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::contact::{FieldId, SubmitError};
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::CardsChanged { set, change } => {
            // Siblings reflow around the expanded card, so re-measure the page.
            state.layout_stale = true;
            state.dirty = true;
            tracing::debug!(?set, current = ?change.current, "relayout after card change");
            vec![]
        }
        AppEvent::DeliveryFinished { attempt, outcome } => {
            match state.contact.complete(attempt, outcome) {
                Ok(_) => {
                    state.notice_since = Some(Instant::now());
                    state.status_message = None;
                    if state.contact.fields().is_empty() {
                        state.form_target = FormTarget::Field(FieldId::Name);
                        state.cursor.move_home();
                    }
                }
                Err(e) => tracing::warn!(error = %e, "dropped delivery outcome"),
            }
            state.layout_stale = true;
            state.dirty = true;
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    }
}

fn handle_tick(state: &mut AppState) {
    state.tick_count = state.tick_count.wrapping_add(1);
    if state.contact.is_busy() {
        // Animates the sending indicator.
        state.dirty = true;
    }

    let ttl = Duration::from_secs(state.config.ui.notification_secs);
    if let Some(since) = state.notice_since {
        if since.elapsed() >= ttl {
            dismiss_notice(state);
        }
    }
}

fn dismiss_notice(state: &mut AppState) -> bool {
    state.notice_since = None;
    if state.contact.dismiss_notice() {
        state.dirty = true;
        true
    } else {
        false
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Mouse(mouse) => {
            handle_mouse(state, mouse);
            vec![]
        }
        CEvent::Resize(_, _) => {
            state.layout_stale = true;
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = state.config.ui.scroll_step as isize;
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by(step),
        MouseEventKind::ScrollUp => state.scroll_by(-step),
        _ => {}
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    if key.code == KeyCode::Esc {
        if !dismiss_notice(state) {
            state.set_focus(FocusPanel::Page);
        }
        return vec![];
    }
    if key.code == KeyCode::BackTab {
        state.cycle_focus_back();
        return vec![];
    }

    if state.focus == FocusPanel::Contact {
        return handle_form_key(state, key);
    }

    if key.code == KeyCode::Tab {
        state.cycle_focus();
        return vec![];
    }

    match key.code {
        KeyCode::Char('q') => return vec![Action::Quit],
        KeyCode::Char('t') => {
            state.toggle_theme();
            return vec![];
        }
        KeyCode::Char('e') => {
            state.jump_to(Section::About);
            return vec![];
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(section) = Section::from_hotkey(c) {
                match section {
                    Section::Contact => state.set_focus(FocusPanel::Contact),
                    _ => state.jump_to(section),
                }
            }
            return vec![];
        }
        _ => {}
    }

    if let Some(set) = state.focused_card_set() {
        if handle_card_key(state, set, key) {
            return vec![];
        }
    }

    handle_page_key(state, key);
    vec![]
}

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let page = state.viewport_rows.saturating_sub(2).max(1) as isize;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => state.scroll_by(page),
        KeyCode::PageUp => state.scroll_by(-page),
        KeyCode::Home | KeyCode::Char('g') => state.scroll_to(0),
        KeyCode::End | KeyCode::Char('G') => state.scroll_to(usize::MAX),
        _ => {}
    }
}

/// Returns `true` when the key was consumed by the card collection.
fn handle_card_key(state: &mut AppState, set: CardSet, key: KeyEvent) -> bool {
    let len = state.cards(set).cards().len();
    if len == 0 {
        return false;
    }
    let current = state.card_cursor(set).min(len - 1);
    match key.code {
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
            move_card_cursor(state, set, (current + 1).min(len - 1));
            true
        }
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
            move_card_cursor(state, set, current.saturating_sub(1));
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            // Relayout follows from the CardsChanged notification; a miss is
            // already logged by the controller.
            let _ = state.cards_mut(set).toggle_at(current);
            true
        }
        _ => false,
    }
}

fn move_card_cursor(state: &mut AppState, set: CardSet, index: usize) {
    state.card_cursor.insert(set, index);
    if let Some(row) = state.layout.card_rows.get(&(set, index)).copied() {
        state.reveal_row(row);
    }
    state.layout_stale = true;
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('s') {
        return submit(state);
    }

    match (state.form_target, key.code) {
        (_, KeyCode::Tab) => {
            advance_form(state);
            vec![]
        }
        (FormTarget::SendButton, KeyCode::Enter) => submit(state),
        (FormTarget::SendButton, KeyCode::Up) => {
            set_form_target(state, FormTarget::Field(FieldId::Message));
            vec![]
        }
        (FormTarget::SendButton, _) => vec![],
        (FormTarget::Field(field), code) => {
            edit_field(state, field, code, ctrl);
            vec![]
        }
    }
}

fn advance_form(state: &mut AppState) {
    match state.form_target {
        FormTarget::Field(field) => match field.next() {
            Some(next) => set_form_target(state, FormTarget::Field(next)),
            None => set_form_target(state, FormTarget::SendButton),
        },
        FormTarget::SendButton => state.set_focus(FocusPanel::Page),
    }
}

fn set_form_target(state: &mut AppState, target: FormTarget) {
    state.form_target = target;
    if let FormTarget::Field(field) = target {
        state.cursor.move_end(state.contact.fields().get(field));
        if let Some(row) = state.layout.form_rows.get(&field).copied() {
            state.reveal_row(row);
        }
    }
    state.layout_stale = true;
}

fn edit_field(state: &mut AppState, field: FieldId, code: KeyCode, ctrl: bool) {
    state.clear_status_hint();
    match code {
        KeyCode::Enter if field == FieldId::Message => {
            if let Some(text) = state.contact.field_mut(field) {
                state.cursor.insert_char(text, '\n');
            }
        }
        KeyCode::Enter | KeyCode::Down => advance_form(state),
        KeyCode::Up => {
            if let Some(prev) = field.prev() {
                set_form_target(state, FormTarget::Field(prev));
            }
        }
        KeyCode::Left => state.cursor.move_left(state.contact.fields().get(field)),
        KeyCode::Right => state.cursor.move_right(state.contact.fields().get(field)),
        KeyCode::Home => state.cursor.move_home(),
        KeyCode::End => state.cursor.move_end(state.contact.fields().get(field)),
        KeyCode::Backspace => {
            if let Some(text) = state.contact.field_mut(field) {
                state.cursor.delete_back(text);
            }
        }
        KeyCode::Delete => {
            if let Some(text) = state.contact.field_mut(field) {
                state.cursor.delete_forward(text);
            }
        }
        KeyCode::Char('w') if ctrl => {
            if let Some(text) = state.contact.field_mut(field) {
                state.cursor.delete_word_back(text);
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(text) = state.contact.field_mut(field) {
                state.cursor.insert_char(text, c);
            }
        }
        _ => {}
    }
    state.layout_stale = true;
}

fn submit(state: &mut AppState) -> Vec<Action> {
    match state.contact.submit_current() {
        Ok(pending) => {
            state.notice_since = None;
            state.status_message = Some("Sending message...".to_string());
            state.layout_stale = true;
            vec![Action::Deliver(pending)]
        }
        Err(SubmitError::Busy) => {
            state.status_message = Some("Still sending, please wait".to_string());
            vec![]
        }
        Err(SubmitError::Invalid(errors)) => {
            if let Some(first) = errors.first() {
                set_form_target(state, FormTarget::Field(first.field));
            }
            state.status_message = Some(format!(
                "Please fix {} field{}",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            state.layout_stale = true;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::contact::{DeliveryOutcome, SubmissionState};
    use crossterm::event::KeyEventState;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default()).unwrap();
        let mut layout = PageLayout {
            width: 80,
            total_rows: 300,
            ..Default::default()
        };
        layout.anchors.insert(Section::Skills, 40);
        layout.anchors.insert(Section::Projects, 90);
        layout.anchors.insert(Section::Contact, 250);
        layout.card_rows.insert((CardSet::Projects, 0), 92);
        layout.card_rows.insert((CardSet::Projects, 1), 96);
        layout.card_rows.insert((CardSet::Projects, 2), 130);
        state.apply_layout(layout, 24);
        state
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
    }

    fn fill_form(state: &mut AppState) {
        handle_event(state, key(KeyCode::Char('7')));
        type_text(state, "Jo");
        handle_event(state, key(KeyCode::Tab));
        type_text(state, "a@b.com");
        handle_event(state, key(KeyCode::Tab));
        type_text(state, "hi");
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, key(KeyCode::Char('q'))), vec![Action::Quit]);
        assert_eq!(handle_event(&mut state, ctrl('c')), vec![Action::Quit]);
    }

    #[test]
    fn test_scrolling_down_hides_navigation() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.offset, 22);
        assert!(!state.scroll_state().visible);
        handle_event(&mut state, key(KeyCode::Char('k')));
        assert!(state.scroll_state().visible);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut state = state();
        handle_event(
            &mut state,
            AppEvent::Terminal(CEvent::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })),
        );
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn test_card_toggle_from_keyboard() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Tab));
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, FocusPanel::Projects);
        assert_eq!(state.offset, 90);

        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Enter));
        assert!(state.projects.is_expanded("ai-chat-application"));

        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.projects.is_expanded("ai-chat-application"));
        assert!(state.projects.is_expanded("portfolio-generator"));
        assert_eq!(state.offset, 107);

        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(state.projects.state().active_id, None);
    }

    #[test]
    fn test_anchor_hotkeys() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Char('3')));
        assert_eq!(state.offset, 40);
        handle_event(&mut state, key(KeyCode::Char('7')));
        assert_eq!(state.focus, FocusPanel::Contact);
        assert_eq!(state.offset, 250);
    }

    #[test]
    fn test_typing_in_contact_does_not_trigger_shortcuts() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Char('7')));
        let actions = handle_event(&mut state, key(KeyCode::Char('q')));
        assert!(actions.is_empty());
        type_text(&mut state, "t3");
        assert_eq!(state.contact.fields().name, "qt3");
        assert!(state.dark_mode);
    }

    #[test]
    fn test_invalid_submit_moves_to_first_bad_field() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Char('7')));
        type_text(&mut state, "Jo");
        let actions = handle_event(&mut state, ctrl('s'));
        assert!(actions.is_empty());
        assert_eq!(state.form_target, FormTarget::Field(FieldId::Email));
        assert!(state.contact.error_for(FieldId::Email).is_some());
        assert!(state.contact.error_for(FieldId::Message).is_some());
        assert!(state.contact.error_for(FieldId::Name).is_none());
    }

    #[test]
    fn test_validation_hint_clears_on_next_edit() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Char('7')));
        handle_event(&mut state, ctrl('s'));
        assert_eq!(state.status_line(), "Please fix 3 fields");

        type_text(&mut state, "J");
        assert_eq!(state.status_message, None);
        assert_ne!(state.status_line(), "Please fix 3 fields");
    }

    #[test]
    fn test_validation_hint_clears_on_focus_change() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Char('7')));
        handle_event(&mut state, ctrl('s'));
        assert!(state.status_message.is_some());

        handle_event(&mut state, key(KeyCode::Esc));
        assert_eq!(state.focus, FocusPanel::Page);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn test_sending_hint_survives_edits() {
        let mut state = state();
        fill_form(&mut state);
        handle_event(&mut state, ctrl('s'));
        type_text(&mut state, "x");
        assert_eq!(state.status_message.as_deref(), Some("Sending message..."));
    }

    #[test]
    fn test_submit_then_delivery_success() {
        let mut state = state();
        fill_form(&mut state);
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.form_target, FormTarget::SendButton);

        let actions = handle_event(&mut state, key(KeyCode::Enter));
        let pending = match actions.as_slice() {
            [Action::Deliver(pending)] => pending.clone(),
            other => panic!("unexpected actions: {:?}", other),
        };
        assert_eq!(pending.message.email, "a@b.com");
        assert_eq!(state.contact.state(), &SubmissionState::Submitting);

        assert!(handle_event(&mut state, ctrl('s')).is_empty());

        handle_event(
            &mut state,
            AppEvent::DeliveryFinished {
                attempt: pending.attempt,
                outcome: DeliveryOutcome::Delivered,
            },
        );
        assert_eq!(state.contact.state(), &SubmissionState::Idle);
        assert!(state.contact.fields().is_empty());
        assert!(state.notice_since.is_some());
        assert!(!state.showing_error_notice());
    }

    #[test]
    fn test_delivery_failure_keeps_draft() {
        let mut state = state();
        fill_form(&mut state);
        let actions = handle_event(&mut state, ctrl('s'));
        let attempt = match actions.as_slice() {
            [Action::Deliver(pending)] => pending.attempt,
            other => panic!("unexpected actions: {:?}", other),
        };
        handle_event(
            &mut state,
            AppEvent::DeliveryFinished {
                attempt,
                outcome: DeliveryOutcome::Failed { reason: None },
            },
        );
        assert_eq!(state.contact.fields().name, "Jo");
        assert!(state.showing_error_notice());

        handle_event(&mut state, key(KeyCode::Esc));
        assert!(state.contact.notice().is_none());
        assert_eq!(state.focus, FocusPanel::Contact);
    }

    #[test]
    fn test_notice_expires_on_tick() {
        let mut state = state();
        state.config.ui.notification_secs = 0;
        fill_form(&mut state);
        let attempt = match handle_event(&mut state, ctrl('s')).as_slice() {
            [Action::Deliver(pending)] => pending.attempt,
            other => panic!("unexpected actions: {:?}", other),
        };
        handle_event(
            &mut state,
            AppEvent::DeliveryFinished {
                attempt,
                outcome: DeliveryOutcome::Delivered,
            },
        );
        assert!(state.contact.notice().is_some());
        handle_event(&mut state, AppEvent::Tick);
        assert!(state.contact.notice().is_none());
    }

    #[test]
    fn test_message_field_accepts_newlines() {
        let mut state = state();
        fill_form(&mut state);
        handle_event(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "there");
        assert_eq!(state.contact.fields().message, "hi\nthere");
    }
}
