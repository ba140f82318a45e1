//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus, Screen};
use super::widgets::{about, header, home, input, query, sidebar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 26;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Sidebar + screen
        ])
        .split(area);

    let header_area = main_layout[0];
    let body_area = main_layout[1];

    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(body_area);

    let sidebar_area = body_layout[0];
    let screen_area = body_layout[1];

    render_header(frame, header_area, app);
    render_sidebar(frame, sidebar_area, app);
    render_screen(frame, screen_area, app);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = header::Header::new(&app.database_info, app.policy, app.is_processing);
    frame.render_widget(widget, area);
}

/// Renders the sidebar.
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let widget = sidebar::Sidebar::new(app.screen, app.sidebar_selected, focused);
    frame.render_widget(widget, area);
}

/// Renders the selected screen.
fn render_screen(frame: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Home => frame.render_widget(home::HomeScreen, area),
        Screen::About => frame.render_widget(about::AboutScreen::new(&app.llm_info), area),
        Screen::Query => {
            frame.render_widget(query::QueryScreen::new(app), area);

            // Position cursor in input field when focused
            if app.focus == Focus::Input {
                let (_, input_area, _) = query::layout(area);
                let visible_cursor = app.input.cursor
                    - input::calculate_scroll_offset(
                        app.input.cursor,
                        input::InputBar::available_width(input_area.width),
                    );
                let cursor_x = input_area.x + input::PROMPT_OFFSET + visible_cursor as u16;
                let cursor_y = input_area.y + 1;
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}
