//! About screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Screen describing what the application does.
pub struct AboutScreen<'a> {
    llm_info: &'a str,
}

impl<'a> AboutScreen<'a> {
    pub fn new(llm_info: &'a str) -> Self {
        Self { llm_info }
    }
}

impl Widget for AboutScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Style::default().fg(Color::White);
        let muted = Style::default().fg(Color::DarkGray);

        let lines = vec![
            Line::from(Span::styled(
                "About IntelliSQL",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "IntelliSQL allows users to query SQL databases using plain English.",
                text,
            )),
            Line::from(Span::styled(
                "It leverages Google's Gemini LLM to convert natural language into SQL.",
                text,
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Each question is turned into a single SQLite statement, which is run \
                 against the Students table (name, class, marks, company).",
                text,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Model: ", muted),
                Span::raw(self.llm_info.to_string()),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
