use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, size as terminal_size, Clear, ClearType,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use favicon::app::App;
use favicon::cli::Cli;
use favicon::config::Config;
use favicon::history::LocationHistory;

/// How long one wait for input may block, so a pending resize is picked up
/// promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

fn main() {
    let cli = Cli::parse();
    favicon::logging::init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Loads everything that can fail before the terminal is touched, then hands
/// over to the editor.
fn run(cli: &Cli) -> favicon::Result<()> {
    let config = Config::load()?;
    let (file, line) = cli.target();
    let history = match LocationHistory::default_path() {
        Some(path) => LocationHistory::load(path),
        None => LocationHistory::in_memory(),
    };
    let app = App::open(file.clone(), config, history, line)?;
    run_editor(app, file)
}

/// Sets up the terminal, runs the TUI editor, and restores the terminal on exit.
fn run_editor(mut app: App, file: PathBuf) -> favicon::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (width, height) = terminal_size()?;
    app.resize(width, height);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal()?;
    if app.clear_on_quit {
        execute!(io::stdout(), Clear(ClearType::All))?;
    }
    result?;
    info!(path = %file.display(), "closed");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Resize notifications are only recorded by handle_event; they take
        // effect here, before anything else in this iteration.
        app.apply_pending_resize();

        app.render_frame(terminal)?;

        if event::poll(POLL_INTERVAL)? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
