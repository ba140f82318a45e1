//! Home screen.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const LOGO: &[&str] = &[
    "   _______________   ",
    "  /               \\  ",
    " |\\_______________/| ",
    " |                 | ",
    " |\\_______________/| ",
    " |                 | ",
    "  \\_______________/  ",
];

/// Welcome screen widget.
pub struct HomeScreen;

impl Widget for HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let green = Style::default().fg(Color::Green);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to IntelliSQL",
                green.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Query Databases Using Natural Language", green)),
            Line::from(""),
        ];

        lines.extend(
            LOGO.iter()
                .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Cyan)))),
        );

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press 3 or Tab to ask a question.",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
