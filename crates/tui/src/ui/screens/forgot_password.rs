use ratatui::{Frame, layout::Rect};

use crate::{app::AppState, ui::theme::Theme};

/// Email-only form; the reset link itself is sent by the server.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    super::render_auth_form(
        frame,
        area,
        state.screen.title(),
        "Enter your email to receive a reset link.",
        &state.forgot_password,
        state.notice.as_ref(),
        &theme,
    );
}
