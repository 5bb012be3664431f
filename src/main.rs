//! Terminal lifecycle, event loop, and cleanup for the ask TUI.

mod actions;
mod app;
mod backend;
mod config;
mod error;
mod events;
mod format;
mod reveal;
mod state;
mod typewriter;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use backend::{spawn_worker, BackendClient};
use config::Config;
use events::key_to_action;

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("ask_tui=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    // The terminal belongs to the UI, so logs only go to a file when asked.
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    info!(base_url = %config.base_url, char_delay_ms = config.char_delay.as_millis() as u64, "starting");

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let worker = {
        let _guard = runtime.enter();
        spawn_worker(BackendClient::new(config.base_url.clone()))
    };

    // Set up the terminal in raw / alternate-screen mode.
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    let mut app = App::new(worker, config.char_delay);

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    restore_terminal();
    let _ = terminal.show_cursor();
    runtime.shutdown_background();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick = app.tick.wrapping_add(1);
        app.poll_results(now);
        app.advance_reveal(now);
        app.observe_sections(now);

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        let frame = terminal.draw(|f| ui::render(f, app, tick, now))?;
        app.set_viewport(frame.area);

        if event::poll(app.poll_timeout(now))? {
            if let Event::Key(key) = event::read()? {
                if let Some(a) = key_to_action(&key, app.state.screen) {
                    app.dispatch(a);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
