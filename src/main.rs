//! # Vibecode CLI Entry Point
//!
//! ## Overview
//!
//! Vibecode is a mock IDE that runs entirely in your terminal: a file
//! explorer, a tabbed editor with syntax highlighting, a terminal panel,
//! and an AI assistant. Nothing is real - the workspace lives in memory,
//! terminal commands are answered from a canned table, and the assistant
//! replies from a fixed script after an artificial delay. It is a
//! playground shell, not a development tool.
//!
//! ## Usage
//!
//! ```bash
//! # Start with the configured theme
//! vibecode
//!
//! # Override the theme for this run
//! vibecode --theme "Tokyo Night"
//!
//! # Print the seeded workspace and canned commands, then exit
//! vibecode --debug
//! ```
//!
//! ## Architecture
//!
//! 1. **Seed**: build the demo workspace tree and the initial terminal log
//! 2. **UI**: one event loop - draw, poll keys, drain responder envelopes
//! 3. **Respond**: submitted commands/messages are answered on background
//!    threads after a fixed delay and applied back through the envelope
//!    channel
//!
//! ## Key Bindings
//!
//! ### Explorer (left panel)
//! - `q` / `Q` - Quit
//! - `j` / `Down`, `k` / `Up` - Move selection
//! - `h` / `Left`, `l` / `Right` - Collapse/expand folders
//! - `Enter` - Open file or toggle folder
//! - `n` / `N` - New file / new folder
//! - `r` / `d` - Rename / delete
//! - `i` - Key binding help
//!
//! ### Editor
//! - Plain typing edits the current file
//! - `Ctrl+W` - Close tab, `Ctrl+←`/`Ctrl+→` - Switch tab,
//!   `Alt+←`/`Alt+→` - Move tab
//! - `Esc` - Back to the explorer
//!
//! ### Terminal / Assistant
//! - `Enter` - Run command / send message
//! - `↑` / `↓` - Walk command history (terminal)
//!
//! ### Everywhere
//! - `Tab` - Cycle pane focus (outside the editor)
//! - `Ctrl+P` - Command palette, `Ctrl+T` / `Ctrl+A` - Toggle panels
//! - `Ctrl+Q` - Quit

use vibecode::respond::mock::{MockChatResponder, MockTerminalResponder};
use vibecode::respond::{Dispatcher, Envelope, TerminalResponder};
use vibecode::ui::config::Config;
use vibecode::ui::theme::Theme;
use vibecode::ui::{self, App, DispatchRequest};
use vibecode::workspace::sample;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Vibecode - a mock IDE for your terminal
#[derive(Parser, Debug)]
#[command(name = "vibecode")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A mock IDE for your terminal", long_about = None)]
struct Args {
    /// Theme to use for this run (overrides the configured one)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Artificial responder delay in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 600)]
    delay_ms: u64,

    /// Print the seeded workspace and canned commands, then exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _logging = vibecode::logging::init();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!(panic = %panic_info, "panic");
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    // Resolve the theme: CLI override first, then the persisted choice.
    let config = Config::load();
    let theme_name = args.theme.as_deref().unwrap_or(&config.theme);
    let theme = match Theme::by_name(theme_name) {
        Some(theme) => theme.clone(),
        None => {
            eprintln!("Warning: unknown theme '{theme_name}', falling back to default");
            eprintln!("Available themes:");
            for theme in Theme::all() {
                eprintln!("  - {}", theme.name);
            }
            Theme::default_theme().clone()
        }
    };

    // Seed the in-memory workspace.
    let (tree, entry) = sample::seed();

    if args.debug {
        println!("=== Seeded Workspace ===");
        for row in tree.visible_rows() {
            let name = tree.name(row.id).unwrap_or("?");
            let marker = if tree.is_folder(row.id) { "/" } else { "" };
            println!("  {}{name}{marker}", "  ".repeat(row.depth));
        }
        println!("\n=== Canned Commands ===");
        let (help, _) = MockTerminalResponder::new().respond("help");
        println!("{help}");
        return Ok(());
    }

    let mut app = App::new(tree, entry, theme);

    // The demo session starts with one command already in the log, answered
    // synchronously by the same responder the dispatcher uses.
    let terminal_responder = Arc::new(MockTerminalResponder::new());
    let (seed_output, seed_status) = terminal_responder.respond("ls -la");
    app.terminal.submit("ls -la");
    app.terminal
        .resolve(app.terminal.epoch(), "ls -la", &seed_output, seed_status);

    let (dispatcher, envelopes) = Dispatcher::new(
        terminal_responder,
        Arc::new(MockChatResponder::new()),
        Duration::from_millis(args.delay_ms),
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &dispatcher,
        &envelopes,
        &mut event_reader,
    )
    .await;

    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    envelopes: &Receiver<Envelope>,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        // Apply any responder answers that finished since the last frame.
        while let Ok(envelope) = envelopes.try_recv() {
            app.apply_envelope(envelope);
        }

        terminal
            .draw(|frame| ui::render(frame, app))
            .context("Failed to draw terminal UI")?;

        if app.should_quit {
            return Ok(());
        }

        // Poll faster while an answer is pending so the spinner animates.
        let poll_timeout = if app.terminal.is_running() || app.chat.is_waiting() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        app.on_tick();

        let Some(event) = event_reader.read_event(poll_timeout)? else {
            continue;
        };

        if let Event::Key(key) = event {
            match ui::handle_key(app, key) {
                Some(DispatchRequest::Command { epoch, command }) => {
                    dispatcher.dispatch_command(epoch, &command);
                }
                Some(DispatchRequest::Chat { epoch, content }) => {
                    dispatcher.dispatch_chat(epoch, &content);
                }
                None => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    /// Mock event reader for testing that returns a predetermined sequence of events
    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn mock_event_reader_returns_events_in_order() {
        let events = vec![
            key_event(KeyCode::Char('a')),
            key_event(KeyCode::Enter),
        ];

        let mut reader = MockEventReader::new(events);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('a'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));
        assert!(reader
            .read_event(Duration::from_millis(10))
            .expect("read")
            .is_none());
    }

    #[test]
    fn crossterm_event_reader_implements_the_trait() {
        let _reader: Box<dyn EventReader> = Box::new(CrosstermEventReader);
    }

    #[test]
    fn args_default_delay() {
        let args = Args::parse_from(["vibecode"]);
        assert_eq!(args.delay_ms, 600);
        assert!(args.theme.is_none());
        assert!(!args.debug);
    }

    #[test]
    fn args_parse_theme_and_debug() {
        let args = Args::parse_from(["vibecode", "--theme", "Nord", "--debug"]);
        assert_eq!(args.theme.as_deref(), Some("Nord"));
        assert!(args.debug);
    }
}
