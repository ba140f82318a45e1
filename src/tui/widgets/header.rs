//! Header widget for the TUI.
//!
//! Displays the application name, version, database path and policy.

use crate::safety::SafetyPolicy;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Status text shown while a question is being answered.
pub const PROCESSING_LABEL: &str = "Generating & executing SQL...";

/// Header bar widget.
pub struct Header<'a> {
    database_info: &'a str,
    policy: SafetyPolicy,
    processing: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(database_info: &'a str, policy: SafetyPolicy, processing: bool) -> Self {
        Self {
            database_info,
            policy,
            processing,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version
        let left_text = format!(" IntelliSQL v{}", env!("CARGO_PKG_VERSION"));
        let left_width = left_text.chars().count() as u16;
        buf.set_span(area.x, area.y, &Span::styled(left_text, style), area.width);

        // Center: status marker while busy
        if self.processing {
            let status_style = style.fg(Color::Yellow).bg(Color::DarkGray);
            let status_width = PROCESSING_LABEL.chars().count() as u16 + 2;
            let status_x = area.x + area.width.saturating_sub(status_width) / 2;
            if status_x > area.x + left_width {
                buf.set_string(
                    status_x,
                    area.y,
                    format!(" {} ", PROCESSING_LABEL),
                    status_style,
                );
            }
        }

        // Right side: database and policy
        let policy_color = if self.policy.is_read_only() {
            Color::Black
        } else {
            Color::Red
        };
        let right_text = format!(" [db: {}] [{}] ", self.database_info, self.policy);
        let right_width = right_text.chars().count() as u16;
        if right_width + left_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style.fg(policy_color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(header: Header, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_header_shows_name_and_database() {
        let line = render(Header::new("data.db", SafetyPolicy::ReadOnly, false), 80);
        assert!(line.contains("IntelliSQL v"));
        assert!(line.contains("[db: data.db]"));
        assert!(line.contains("[read-only]"));
        assert!(!line.contains(PROCESSING_LABEL));
    }

    #[test]
    fn test_header_shows_processing_marker() {
        let line = render(Header::new("data.db", SafetyPolicy::AllowWrites, true), 120);
        assert!(line.contains(PROCESSING_LABEL));
        assert!(line.contains("[allow-writes]"));
    }

    #[test]
    fn test_header_narrow_terminal_drops_right_side() {
        let line = render(Header::new("a/very/long/path/to/data.db", SafetyPolicy::ReadOnly, false), 30);
        assert!(line.contains("IntelliSQL"));
        assert!(!line.contains("[db:"));
    }
}
