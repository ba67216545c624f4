use ratatui::{Frame, layout::Rect};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    super::render_auth_form(
        frame,
        area,
        state.screen.title(),
        "Welcome back. Sign in with your email.",
        &state.login,
        state.notice.as_ref(),
        &theme,
    );
}
