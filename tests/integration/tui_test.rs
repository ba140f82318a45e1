//! TUI flow tests: key events in, rendered frames out.
//!
//! Mirrors the runner loop without a real terminal.

use super::{orchestrator, seeded_db};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use intellisql::app::Orchestrator;
use intellisql::llm::MockLlmClient;
use intellisql::safety::SafetyPolicy;
use intellisql::tui::app::{App, Focus, QueryDisplay, Screen};
use intellisql::tui::{ui, Event};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(text: &str) -> Vec<Event> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// Feeds events to the app, answering submitted questions as the runner does.
async fn drive(app: &mut App, orchestrator: &Orchestrator, events: Vec<Event>) {
    for event in events {
        app.handle_event(event);
        if let Some(question) = app.take_pending_question() {
            let result = match orchestrator.translate(&question).await {
                Ok(sql) => {
                    app.set_generated_sql(sql.as_str());
                    orchestrator.execute(&sql).await
                }
                Err(e) => Err(e),
            };
            app.apply_result(result);
        }
    }
}

fn draw(app: &App) -> String {
    let backend = TestBackend::new(110, 32);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn new_app(orchestrator: &Orchestrator) -> App {
    App::new(
        orchestrator.database_location(),
        orchestrator.llm_description(),
        orchestrator.policy(),
    )
}

#[tokio::test]
async fn test_navigate_and_ask_question() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);
    let mut app = new_app(&orchestrator);

    // Sidebar: move down twice and open Query Assistance
    let mut events = vec![key(KeyCode::Down), key(KeyCode::Down), key(KeyCode::Enter)];
    events.extend(type_text("How many entries are present?"));
    events.push(key(KeyCode::Enter));
    drive(&mut app, &orchestrator, events).await;

    assert_eq!(app.screen, Screen::Query);
    assert_eq!(app.focus, Focus::Input);
    assert!(!app.is_processing);
    assert!(app.input.is_empty());
    assert!(matches!(app.display, Some(QueryDisplay::Answer(_))));

    let screen = draw(&app);
    assert!(screen.contains("Question: How many entries are present?"));
    assert!(screen.contains("Generated SQL:"));
    assert!(screen.contains("SELECT COUNT(*) FROM Students;"));
    assert!(screen.contains("Query Result:"));
    assert!(screen.contains("1 row returned"));
}

#[tokio::test]
async fn test_rejected_write_shown_inline() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);
    let mut app = new_app(&orchestrator);

    let mut events = vec![key(KeyCode::Char('3'))];
    events.extend(type_text("Delete all students"));
    events.push(key(KeyCode::Enter));
    drive(&mut app, &orchestrator, events).await;

    match &app.display {
        Some(QueryDisplay::Error(error)) => assert_eq!(error.category, "Rejected Statement"),
        other => panic!("expected error display, got {other:?}"),
    }

    let screen = draw(&app);
    assert!(screen.contains("Generated SQL:"));
    assert!(screen.contains("DELETE FROM Students;"));
    assert!(screen.contains("Error (Rejected Statement)"));
    assert!(screen.contains("[read-only]"));
}

#[tokio::test]
async fn test_blank_question_is_not_submitted() {
    let (_dir, path) = seeded_db().await;
    let llm = MockLlmClient::new();
    let orchestrator = orchestrator(&path, llm.clone(), SafetyPolicy::ReadOnly);
    let mut app = new_app(&orchestrator);

    let mut events = vec![key(KeyCode::Tab)];
    events.extend(type_text("   "));
    events.push(key(KeyCode::Enter));
    drive(&mut app, &orchestrator, events).await;

    assert_eq!(app.screen, Screen::Query);
    assert!(app.display.is_none());
    assert!(app.last_question.is_none());
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_escape_quits() {
    let (_dir, path) = seeded_db().await;
    let orchestrator = orchestrator(&path, MockLlmClient::new(), SafetyPolicy::ReadOnly);
    let mut app = new_app(&orchestrator);

    drive(&mut app, &orchestrator, vec![key(KeyCode::Char('2'))]).await;
    assert_eq!(app.screen, Screen::About);
    assert!(draw(&app).contains("Model: mock"));

    drive(&mut app, &orchestrator, vec![key(KeyCode::Esc)]).await;
    assert!(!app.running);
}
