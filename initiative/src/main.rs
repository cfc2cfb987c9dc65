//! Initiative tracker TUI application.
//!
//! A terminal roster for tabletop combat: initiative order, HP, garra and
//! the whose-turn-is-it marker, saved between sessions.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! printf 'add Doc init=12 hp=5\nnext\nsummary\n' | initiative --headless
//! ```

mod app;
mod clipboard;
mod events;
mod headless;
mod ui;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use initiative_core::{FileStorage, Storage, Tracker, TrackerConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use clipboard::{MemoryClipboard, Osc52Clipboard};
use events::{handle_event, EventResult};
use ui::render::render;

/// Log file for TUI mode. Unset means no logging while the screen is up.
const LOG_FILE_ENV: &str = "INITIATIVE_LOG";

const DEFAULT_FILTER: &str = "initiative=info,initiative_core=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let headless = args.iter().any(|a| a == "--headless");
    init_logging(headless)?;

    let mut config = TrackerConfig::from_env();
    if let Some(dir) = flag_value(&args, "--data-dir") {
        config = config.with_data_dir(dir);
    }
    tracing::info!(data_dir = %config.data_dir.display(), key = %config.storage_key, "starting");

    let storage = FileStorage::open(&config.data_dir)?;

    if headless {
        let mut tracker = Tracker::open(storage, config.storage_key.as_str());
        let mut clipboard = MemoryClipboard::new();
        headless::run_headless(&mut tracker, &mut clipboard)?;
        return Ok(());
    }

    let storage: Box<dyn Storage> = Box::new(storage);
    let tracker = Tracker::open(storage, config.storage_key.as_str());
    let app = App::new(
        tracker,
        Box::new(Osc52Clipboard::stdout()),
        config.notification_duration,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Poll with a timeout so notifications can expire
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Headless mode logs to stderr. The TUI logs only to `INITIATIVE_LOG`.
fn init_logging(headless: bool) -> io::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    if headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }
    Ok(())
}

/// Value following `flag`, if any.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn print_help() {
    println!("Initiative - turn order tracker for tabletop combat");
    println!();
    println!("USAGE:");
    println!("  initiative [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --headless         Run in headless mode (line commands on stdin)");
    println!("  --data-dir <DIR>   Where the roster is saved (default: ~/.initiative)");
    println!();
    println!("ENVIRONMENT:");
    println!("  INITIATIVE_DATA_DIR      Same as --data-dir");
    println!("  INITIATIVE_STORAGE_KEY   Name of the saved roster (default: rpg-tracker-data)");
    println!("  INITIATIVE_LOG           Log file for the TUI");
    println!("  RUST_LOG                 Log filter (default: {DEFAULT_FILTER})");
    println!();
    println!("EXAMPLES:");
    println!("  initiative                              # Interactive TUI mode");
    println!("  initiative --data-dir ./campaign        # Keep the roster beside the campaign notes");
    println!("  echo 'add Doc init=12' | initiative --headless");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_value() {
        let argv = args(&["initiative", "--data-dir", "/tmp/posse", "--headless"]);
        assert_eq!(flag_value(&argv, "--data-dir"), Some("/tmp/posse"));
        assert_eq!(flag_value(&argv, "--key"), None);

        let argv = args(&["initiative", "--data-dir"]);
        assert_eq!(flag_value(&argv, "--data-dir"), None);
    }
}
