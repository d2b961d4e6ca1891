use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use misguard_core::client::DEFAULT_TIMEOUT;
use misguard_core::{
    BackendClient, FileSettingsStore, MemorySettingsStore, Settings, SettingsStore, SystemClock,
    ThemeKind,
};

mod action;
mod app;
mod backend;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Misinformation Guard: credibility analysis in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides MISGUARD_BACKEND_URL and the config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Color theme: dark or light
    #[arg(long)]
    theme: Option<ThemeKind>,

    /// Send submissions to the backend instead of the built-in demo result
    #[arg(long)]
    live: bool,

    /// Write logs here instead of the platform cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = init_logging(args.log_file.as_deref());

    let store: Box<dyn SettingsStore> = match FileSettingsStore::platform() {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using config file");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no config directory, settings will not persist");
            Box::new(MemorySettingsStore::new(Settings::default()))
        }
    };

    let mut app = App::new(store, Arc::new(SystemClock::new()));

    // Resolve config from CLI flags > env vars > config file > defaults
    let mut settings = app.settings.clone();
    if let Some(url) = args
        .backend_url
        .or_else(|| std::env::var("MISGUARD_BACKEND_URL").ok())
        .filter(|u| !u.trim().is_empty())
    {
        settings.backend_url = url.trim().to_string();
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if args.live {
        settings.live_analysis = true;
    }
    app.apply_overrides(settings);
    tracing::info!(
        backend = %app.settings.backend_url,
        theme = app.settings.theme.as_str(),
        live = app.settings.live_analysis,
        "starting"
    );

    let client = BackendClient::new(DEFAULT_TIMEOUT)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run_listener(
        client,
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // crossterm's poll/read block, so they run on a dedicated thread and
    // hand events to the loop over a channel.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Event>();
    let cancel_for_input = cancel.clone();
    tokio::task::spawn_blocking(move || read_terminal_events(input_tx, cancel_for_input));

    app.start();

    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            _ = ticker.tick() => {
                app.update(action::Action::Tick);
            }
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            maybe_input = input_rx.recv() => {
                match maybe_input {
                    Some(evt) => {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                    None => {
                        tracing::warn!("terminal input closed");
                        app.should_quit = true;
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.shutdown();
    cancel.cancel();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    tracing::info!("exited cleanly");

    Ok(())
}

/// Forward terminal events until cancelled or the receiver is gone.
fn read_terminal_events(tx: mpsc::UnboundedSender<Event>, cancel: CancellationToken) {
    let poll_interval = Duration::from_millis(50);
    while !cancel.is_cancelled() {
        match event::poll(poll_interval) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if tx.send(evt).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "terminal poll failed");
                break;
            }
        }
    }
}

/// Route tracing output to a file; the terminal belongs to the UI.
/// Returns the writer guard, which must live until exit so buffered lines flush.
fn init_logging(log_file: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None => dirs::cache_dir()?.join("misguard").join("misguard.log"),
    };
    let dir = path.parent()?.to_path_buf();
    let file_name = path.file_name()?.to_owned();
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Some(guard)
}
