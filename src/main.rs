use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use webtop::app::{App, Config};
use webtop::events::{AppEvent, EventResult, handle_event};
use webtop::fetch::Fetcher;
use webtop::{Result, WebtopError, ui};

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = init_logging(&config.log_file, &config.log_level) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    let fetcher = match Fetcher::new(&config.server_url, config.request_timeout) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    info!(
        server = fetcher.base_url(),
        tick_ms = config.tick_rate.as_millis() as u64,
        timeout_ms = config.request_timeout.as_millis() as u64,
        sort = %config.sort.label(),
        resort = config.resort_source.label(),
        "webtop starting"
    );

    if let Err(err) = run(&config, fetcher).await {
        error!(error = %err, "webtop exited with an error");
        eprintln!("webtop error: {err}");
        std::process::exit(1);
    }
    info!("webtop stopped");
}

async fn run(config: &Config, fetcher: Fetcher) -> Result<()> {
    let mut terminal = setup_terminal()?;
    install_panic_hook();
    let mut app = App::new(config);

    let result = run_app(&mut terminal, &mut app, &fetcher, config.tick_rate).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| WebtopError::logging(path.to_path_buf(), err.to_string()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| WebtopError::logging(path.to_path_buf(), err.to_string()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("webtop={level}"))
            .map_err(|err| WebtopError::invalid_argument(format!("log level {level}: {err}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| WebtopError::logging(path.to_path_buf(), err.to_string()))
}

fn setup_terminal() -> io::Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut AppTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal_raw();
        default_hook(info);
    }));
}

fn restore_terminal_raw() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, Show);
}

/// One loop turn handles exactly one event, so a response is applied in full
/// before the next draw.
async fn run_app(
    terminal: &mut AppTerminal,
    app: &mut App,
    fetcher: &Fetcher,
    tick_rate: Duration,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut interval = tokio::time::interval(tick_rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let event = tokio::select! {
            _ = interval.tick() => AppEvent::Tick,
            Some(outcome) = rx.recv() => AppEvent::Fetched(outcome),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Some(Ok(Event::Mouse(mouse))) => AppEvent::Mouse(mouse),
                Some(Ok(Event::Resize(w, h))) => AppEvent::Resize(w, h),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
                None => AppEvent::Quit,
            },
        };

        match handle_event(app, event) {
            EventResult::Exit => return Ok(()),
            EventResult::Refresh => fetcher.spawn_tick(app.next_tick(), &tx),
            EventResult::Continue => {}
        }
    }
}
