//! Fake-It TUI - Terminal dashboard for the Fake-It mock endpoint server
//!
//! This crate provides an interactive terminal front end for managing mock
//! endpoints through the Fake-It management API.
//!
//! # Features
//!
//! - **Mock Management**: Create, edit, delete, enable/disable mocks
//! - **Search & Filter**: Narrow the list by name, path, or method
//! - **Request Tester**: Send ad-hoc requests against enabled mocks
//! - **Overview Dashboard**: Counts and a per-method breakdown
//!
//! # Example
//!
//! ```no_run
//! use fakeit_client::{resolve_mock_base, ApiClient, DEFAULT_API_URL};
//! use fakeit_tui::App;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new(DEFAULT_API_URL);
//!     let mock_base = resolve_mock_base(DEFAULT_API_URL, None);
//!     let app = App::new(client, mock_base);
//!     fakeit_tui::run(app).await
//! }
//! ```

pub mod app;
pub mod components;
pub mod event;
pub mod repository;
pub mod theme;
pub mod ui;

pub use app::App;
pub use event::{Event, EventHandler};
pub use repository::MocksRepository;
pub use theme::Theme;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// How often the tick event fires to expire transient status messages.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the TUI application with the given app state.
///
/// This function handles terminal setup, runs the main event loop,
/// and restores the terminal on exit.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    // Initial snapshot; refreshes afterwards are user- or action-triggered.
    app.refresh().await;

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    app.handle_key_event(key).await;
                }
                Event::Tick => {
                    app.clear_expired_status();
                }
                Event::Resize(_, _) => {
                    // Terminal will auto-redraw
                }
            }
        }
    }

    Ok(())
}
