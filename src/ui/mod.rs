pub mod layout;
mod navbar;
pub mod page;
mod status_bar;
mod text;
mod theme;
mod toast;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);
    let theme = theme::Theme::for_mode(state.dark_mode);

    let (lines, _) = page::build(state, app_layout.page.width);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(state.offset)
        .take(app_layout.page.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible).style(theme.page()), app_layout.page);

    navbar::render(frame, app_layout.navbar, state);
    toast::render(frame, app_layout.page, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
