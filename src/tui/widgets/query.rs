//! Query assistance screen.
//!
//! Question input on top; generated SQL, the result table or the error below.

use super::input::InputBar;
use super::table::ResultTable;
use crate::tui::app::{App, ErrorDisplay, Focus, QueryDisplay};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Title of the question input.
pub const INPUT_TITLE: &str = "Enter your question in English";

/// Splits the screen into title, input and output areas.
pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Query screen widget.
pub struct QueryScreen<'a> {
    app: &'a App,
}

impl<'a> QueryScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn output_lines(&self, width: usize) -> Vec<Line<'a>> {
        let heading = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        let mut lines = Vec::new();

        if let Some(question) = &self.app.last_question {
            lines.push(Line::from(vec![
                Span::styled("Question: ", muted),
                Span::raw(question.clone()),
            ]));
            lines.push(Line::from(""));
        }

        if self.app.is_processing {
            let status = match &self.app.generated_sql {
                Some(sql) => {
                    lines.extend(sql_lines(sql));
                    lines.push(Line::from(""));
                    "Executing SQL..."
                }
                None => "Generating SQL and querying the database...",
            };
            lines.push(Line::from(Span::styled(
                status,
                Style::default().fg(Color::Yellow),
            )));
            return lines;
        }

        match &self.app.display {
            None => {
                lines.push(Line::from(Span::styled(
                    "Press Enter to Generate & Execute SQL.",
                    muted,
                )));
            }
            Some(QueryDisplay::Answer(answer)) => {
                lines.extend(sql_lines(&answer.sql));
                if let Some(warning) = &answer.classification.warning {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "  {} {}: {}",
                            answer.classification.level,
                            answer.classification.statement_type,
                            warning
                        ),
                        Style::default().fg(Color::Red),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Query Result:", heading)));
                lines.extend(ResultTable::new(&answer.result).render_to_lines(width));
            }
            Some(QueryDisplay::Error(error)) => {
                if let Some(sql) = &self.app.generated_sql {
                    lines.extend(sql_lines(sql));
                    lines.push(Line::from(""));
                }
                lines.extend(error_lines(error));
            }
        }

        lines
    }
}

/// Heading plus the indented statement.
fn sql_lines<'a>(sql: &str) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        "Generated SQL:",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(sql.lines().map(|l| {
        Line::from(Span::styled(
            format!("  {}", l),
            Style::default().fg(Color::Cyan),
        ))
    }));
    lines
}

fn error_lines<'a>(error: &ErrorDisplay) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled(
            format!("Error ({}): {}", error.category, error.message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            error.hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Estimates how many rows `lines` take once wrapped to `width`.
///
/// Wrapping breaks at word boundaries, so each wrapped line gets one row of
/// slack.
fn wrapped_height(lines: &[Line<'_>], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let chars = line.width();
            if chars <= width {
                1
            } else {
                chars.div_ceil(width) + 1
            }
        })
        .sum()
}

/// Clamps a requested scroll offset so the panel stops at the last content row.
pub fn clamp_scroll(requested: u16, content_height: usize, visible_height: usize) -> u16 {
    let max = content_height.saturating_sub(visible_height);
    (requested as usize).min(max).min(u16::MAX as usize) as u16
}

impl Widget for QueryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_area, input_area, output_area) = layout(area);

        buf.set_string(
            title_area.x,
            title_area.y,
            "Intelligent Query Assistance",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

        InputBar::new(
            &self.app.input.text,
            self.app.input.cursor,
            self.app.focus == Focus::Input,
            INPUT_TITLE,
        )
        .render(input_area, buf);

        let inner_width = output_area.width.saturating_sub(2) as usize;
        let inner_height = output_area.height.saturating_sub(2) as usize;
        let lines = self.output_lines(inner_width);
        let content_height = wrapped_height(&lines, inner_width);
        let scroll = clamp_scroll(self.app.output_scroll, content_height, inner_height);

        let title = if content_height > inner_height {
            " Output (PgUp/PgDn to scroll) "
        } else {
            " Output "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(output_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(0, 50, 20), 0);
        assert_eq!(clamp_scroll(10, 50, 20), 10);
        assert_eq!(clamp_scroll(u16::MAX, 50, 20), 30);
        assert_eq!(clamp_scroll(5, 10, 20), 0);
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("short"), Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 1 + 4 + 1);
        assert_eq!(wrapped_height(&lines, 0), 3);
    }
}
