// ghusers: browse and search GitHub users from the terminal.
// Wires config, logging, the cache and the API client into the TUI.

mod app;
mod cache;
mod config;
mod error;
mod github;
mod logging;
mod model;
mod paging;
mod repository;
mod state;
mod ui;

use std::io::{self, Stdout};
use std::process::ExitCode;
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::app::App;
use crate::cache::{CacheDb, paths};
use crate::config::Config;
use crate::error::{GhUsersError, Result};
use crate::github::GitHubClient;
use crate::repository::UserRepository;

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ghusers exited with an error");
            eprintln!("ghusers: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Before anything that can fail, so startup errors reach the log file
    if let Some(log_path) = paths::log_path() {
        logging::init(&log_path)?;
    }

    let config = Config::load()?;
    info!(?config, "starting ghusers");

    let db = CacheDb::open(&config.resolve_db_path()?)?;
    let client = GitHubClient::with_base_url(&config.token, &config.api_base_url)?;
    let repo = Arc::new(UserRepository::new(Arc::new(client), db, config.paging));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("ghusers-async")
        .build()?;

    let mut app = App::new(repo, runtime.handle().clone(), config.search_debounce);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;

    runtime.shutdown_background();
    result.map_err(GhUsersError::from)
}

fn setup_terminal() -> io::Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut AppTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Leave raw mode before the default hook prints, so panics stay readable.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
