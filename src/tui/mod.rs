pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::responses::Answer;

/// Run the full-screen questionnaire until the user quits.
///
/// Returns the app so the caller can print the final report once the
/// terminal has been restored.
pub async fn run_tui(mut app: App) -> anyhow::Result<App> {
    // Buffer log output while the TUI owns the screen
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e);
        }

        handle_event(&mut app, events.next().await);

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result?;
    Ok(app)
}

/// `None` means terminal input has closed, so no key can quit any more.
fn handle_event(app: &mut App, event: Option<Event>) {
    match event {
        Some(Event::Key(key)) => handle_key_event(app, key),
        Some(Event::Tick) => app.update_flash(),
        Some(Event::Resize) => {}
        None => {
            tracing::warn!("Terminal input closed, leaving the questionnaire");
            app.should_quit = true;
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_question(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_question(),
            KeyCode::Tab => app.jump_to_unanswered(),

            // Answers
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_selected(Answer::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') => app.answer_selected(Answer::No),
            KeyCode::Char(' ') | KeyCode::Char('u') | KeyCode::Backspace => app.clear_selected(),
            KeyCode::Char('R') => app.reset(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
