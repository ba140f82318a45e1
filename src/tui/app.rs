//! Application state for the TUI.
//!
//! Contains the main App struct and related types for managing UI state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Event;
use crate::app::Answer;
use crate::error::{IntelliSqlError, Result};
use crate::safety::SafetyPolicy;

/// Lines moved by PageUp/PageDown in the output panel.
const OUTPUT_PAGE: u16 = 10;

/// Screens reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    About,
    Query,
}

impl Screen {
    /// All screens in sidebar order.
    pub const ALL: [Screen; 3] = [Screen::Home, Screen::About, Screen::Query];

    /// Returns the sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Query => "Query Assistance",
        }
    }

    /// Returns the position in the sidebar.
    pub fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::About => 1,
            Self::Query => 2,
        }
    }

    /// Returns the screen at a sidebar position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Input,
}

impl Focus {
    /// Cycles to the next focus panel.
    pub fn next(self) -> Self {
        match self {
            Self::Sidebar => Self::Input,
            Self::Input => Self::Sidebar,
        }
    }
}

/// Input state for text editing.
///
/// The cursor is a character index, so multi-byte input is edited safely.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of characters in the input.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the cursor.
    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.text.remove(idx);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index();
            self.text.remove(idx);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An error as shown inline on the query screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDisplay {
    pub category: &'static str,
    pub message: String,
    pub hint: &'static str,
}

impl From<&IntelliSqlError> for ErrorDisplay {
    fn from(err: &IntelliSqlError) -> Self {
        Self {
            category: err.category(),
            message: err.to_string(),
            hint: err.hint(),
        }
    }
}

/// Outcome of the last submitted question.
#[derive(Debug, Clone)]
pub enum QueryDisplay {
    Answer(Answer),
    Error(ErrorDisplay),
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Screen shown in the content area.
    pub screen: Screen,
    /// Current focus panel.
    pub focus: Focus,
    /// Highlighted sidebar entry.
    pub sidebar_selected: usize,
    /// Question input field.
    pub input: InputState,
    /// The last question submitted.
    pub last_question: Option<String>,
    /// SQL generated for the last question, kept when execution fails.
    pub generated_sql: Option<String>,
    /// Result of the last question.
    pub display: Option<QueryDisplay>,
    /// Lines scrolled off the top of the output panel.
    pub output_scroll: u16,
    /// True while a question is being answered.
    pub is_processing: bool,
    /// Question waiting for the event loop to run it.
    pending_question: Option<String>,
    /// Database path for display.
    pub database_info: String,
    /// LLM provider/model for display.
    pub llm_info: String,
    /// Active safety policy for display.
    pub policy: SafetyPolicy,
}

impl App {
    /// Creates a new App instance.
    pub fn new(
        database_info: impl Into<String>,
        llm_info: impl Into<String>,
        policy: SafetyPolicy,
    ) -> Self {
        Self {
            running: true,
            screen: Screen::default(),
            focus: Focus::default(),
            sidebar_selected: 0,
            input: InputState::new(),
            last_question: None,
            generated_sql: None,
            display: None,
            output_scroll: 0,
            is_processing: false,
            pending_question: None,
            database_info: database_info.into(),
            llm_info: llm_info.into(),
            policy,
        }
    }

    /// Switches to a screen and syncs the sidebar highlight.
    pub fn open_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.sidebar_selected = screen.index();
        if screen == Screen::Query {
            self.focus = Focus::Input;
        }
    }

    /// Takes the submitted question, if any, for the event loop to answer.
    pub fn take_pending_question(&mut self) -> Option<String> {
        self.pending_question.take()
    }

    /// Records the SQL generated for the pending question.
    pub fn set_generated_sql(&mut self, sql: impl Into<String>) {
        self.generated_sql = Some(sql.into());
    }

    /// Records the outcome of answering a question.
    pub fn apply_result(&mut self, result: Result<Answer>) {
        self.is_processing = false;
        self.output_scroll = 0;
        self.display = Some(match result {
            Ok(answer) => QueryDisplay::Answer(answer),
            Err(e) => QueryDisplay::Error(ErrorDisplay::from(&e)),
        });
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.next();
                if self.focus == Focus::Input {
                    self.open_screen(Screen::Query);
                }
            }
            KeyCode::PageUp => self.scroll_output_up(OUTPUT_PAGE),
            KeyCode::PageDown => self.scroll_output_down(OUTPUT_PAGE),
            _ if self.focus == Focus::Input => self.handle_input_key(key),
            _ => self.handle_sidebar_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.sidebar_selected + 1 < Screen::ALL.len() {
                    self.sidebar_selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(screen) = Screen::from_index(self.sidebar_selected) {
                    self.open_screen(screen);
                }
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                if let Some(screen) = Screen::from_index(index) {
                    self.open_screen(screen);
                }
            }
            _ => {}
        }
    }

    /// Handles key events when input is focused.
    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Up => self.scroll_output_up(1),
            KeyCode::Down => self.scroll_output_down(1),
            _ => {}
        }
    }

    /// Scrolls the output panel towards its top.
    pub fn scroll_output_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    /// Scrolls the output panel towards its bottom.
    ///
    /// The renderer clamps the offset to the content height.
    pub fn scroll_output_down(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_add(lines);
    }

    /// Queues the current input for answering.
    ///
    /// Blank input is ignored, as is input submitted while busy.
    pub fn submit_input(&mut self) {
        if self.is_processing || self.input.text.trim().is_empty() {
            return;
        }

        let question = self.input.take().trim().to_string();
        self.last_question = Some(question.clone());
        self.generated_sql = None;
        self.output_scroll = 0;
        self.pending_question = Some(question);
        self.is_processing = true;
    }
}
