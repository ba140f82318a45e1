//! Sidebar widget for the TUI.
//!
//! Displays the navigation list of screens.

use crate::tui::app::Screen;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Sidebar navigation widget.
pub struct Sidebar {
    current: Screen,
    selected: usize,
    focused: bool,
}

impl Sidebar {
    /// Creates a new sidebar widget.
    pub fn new(current: Screen, selected: usize, focused: bool) -> Self {
        Self {
            current,
            selected,
            focused,
        }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Navigation ");

        let mut lines = vec![
            Line::from(Span::styled("Go to", Style::default().fg(Color::Gray))),
            Line::from(""),
        ];

        for (i, screen) in Screen::ALL.iter().enumerate() {
            let marker = if *screen == self.current { "(•)" } else { "( )" };
            let mut style = Style::default();
            if *screen == self.current {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if self.focused && i == self.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            lines.push(Line::from(Span::styled(
                format!("{} {} {}", i + 1, marker, screen.title()),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab: focus  Esc: quit",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
