pub mod advisor_view;
pub mod board_view;
pub mod confirm_popup;
pub mod dashboard_view;
pub mod form_popup;
pub mod helpers;
pub mod login_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode, View};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Nothing but the sign-in screen until there is a session
    if app.mode == Mode::Login {
        login_view::render_login_view(frame, app, area);
        return;
    }

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Dashboard => dashboard_view::render_dashboard_view(frame, app, chunks[1]),
        View::Board => board_view::render_board_view(frame, app, chunks[1]),
        View::Analytics => dashboard_view::render_analytics_view(frame, app, chunks[1]),
        View::Advisor => advisor_view::render_advisor_view(frame, app, chunks[1]),
    }

    // Popups (rendered on top of the content)
    if app.form.is_some() {
        form_popup::render_form_popup(frame, app, chunks[1]);
    }
    if app.confirm.is_some() {
        confirm_popup::render_confirm_popup(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use crate::model::session::Role;
    use crate::tui::app::tests::test_app;

    #[test]
    fn signed_out_shows_only_login() {
        let (_dir, app) = test_app(None);
        let output = render_app(&app);
        assert!(output.contains("SyncroTask AI"));
        assert!(!output.contains("Dashboard"));
    }

    #[test]
    fn signed_in_shows_tabs_board_and_status() {
        let (_dir, app) = test_app(Some(Role::TeamLead));
        let output = render_app(&app);
        assert!(output.contains("Dashboard"));
        assert!(output.contains("AI Assistant"));
        assert!(output.contains("Q4 Budget Proposal"));
        assert!(output.contains("q quit"));
    }
}
