//! Terminal User Interface for IntelliSQL.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::app::Orchestrator;
use crate::error::{IntelliSqlError, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tracing::{debug, info};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| IntelliSqlError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            IntelliSqlError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| IntelliSqlError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| IntelliSqlError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            IntelliSqlError::internal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| IntelliSqlError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| IntelliSqlError::internal(format!("Failed to draw: {e}")))?;
        Ok(())
    }

    /// Runs the main event loop until the user quits.
    ///
    /// Each submitted question is answered in place: the processing frame is
    /// drawn, the SQL is generated and drawn, then executed before the next
    /// event is read.
    pub async fn run(&mut self, orchestrator: &Orchestrator) -> Result<()> {
        // Restore the terminal before the panic message is printed
        let original_hook = Arc::new(panic::take_hook());
        let chained_hook = Arc::clone(&original_hook);
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            (*chained_hook)(panic_info);
        }));

        let mut app = App::new(
            orchestrator.database_location(),
            orchestrator.llm_description(),
            orchestrator.policy(),
        );

        let result = self.event_loop(&mut app, orchestrator).await;

        // Dropping our hook releases its handle on the previous one
        drop(panic::take_hook());
        if let Ok(hook) = Arc::try_unwrap(original_hook) {
            panic::set_hook(hook);
        }

        result
    }

    async fn event_loop(&mut self, app: &mut App, orchestrator: &Orchestrator) -> Result<()> {
        loop {
            self.draw(app)?;

            if !app.running {
                break;
            }

            if let Some(question) = app.take_pending_question() {
                debug!("Answering submitted question");
                let result = match orchestrator.translate(&question).await {
                    Ok(sql) => {
                        app.set_generated_sql(sql.as_str());
                        self.draw(app)?;
                        orchestrator.execute(&sql).await
                    }
                    Err(e) => Err(e),
                };
                app.apply_result(result);
                continue;
            }

            let event = self.event_handler.next()?;
            app.handle_event(event);
        }

        info!("Exiting");
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application against a ready orchestrator.
pub async fn run(orchestrator: &Orchestrator) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(orchestrator).await
}
