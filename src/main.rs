//! detailcast - media detail screen in the terminal
//!
//! Opens a movie or show, routes playback into staged loading, the direct
//! player or the trailer player, and quiesces casting whenever the detail
//! screen comes back to the foreground.
//!
//! # Usage
//!
//! ```bash
//! # Launch the interactive screen
//! detailcast --media arrival.json
//!
//! # CLI mode (for automation)
//! detailcast layout arrival.json --large-screen
//! detailcast play arrival.json --json
//! detailcast health --seeds 120 --peers 40
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use detailcast::app::{App, Screen};
use detailcast::cli::{Cli, Command, ExitCode, Output};
use detailcast::commands;
use detailcast::config::Config;
use detailcast::models::MediaRecord;
use detailcast::presenter::PresenterError;
use detailcast::stream::CastManager;
use detailcast::ui::{self, Theme};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            let output = Output::new(&cli);
            return output.error(format!("{:#}", e), ExitCode::InvalidArgs).into();
        }
    };

    init_tracing(cli.is_cli_mode(), &config);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        run_cli(cli, &config).into()
    } else {
        // TUI mode: launch interactive interface
        run_tui(cli, &config).await.into()
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Install the global subscriber
///
/// CLI mode logs to stderr. The TUI owns the terminal, so it logs to
/// `<cache_dir>/detailcast/detailcast.log` instead.
fn init_tracing(cli_mode: bool, config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    let registry = tracing_subscriber::registry().with(filter);

    if cli_mode {
        let _ = registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
        return;
    }

    match open_log_file() {
        Some(file) => {
            let _ = registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
        }
        None => {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .try_init();
        }
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("detailcast");
    std::fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("detailcast.log"))
        .ok()
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
fn run_cli(mut cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let profile = cli.device_profile(config);

    match cli.take_command() {
        Some(Command::Layout(cmd)) => commands::layout_cmd(cmd, profile, &output),
        Some(Command::Play(cmd)) => commands::play_cmd(cmd, profile, &output),
        Some(Command::Trailer(cmd)) => commands::trailer_cmd(cmd, profile, &output),
        Some(Command::Health(cmd)) => commands::health_cmd(cmd, &output),
        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive detail screen
async fn run_tui(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    let media = match cli.media.as_deref().map(MediaRecord::load).transpose() {
        Ok(media) => media,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidMedia),
    };

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let profile = cli.terminal_profile(config, cols, rows);

    // Activation happens before the terminal is taken over, so a missing
    // subject closes the screen without drawing anything
    let cast = Arc::new(CastManager::new());
    let mut app = match App::open(media, profile, cast) {
        Ok(app) => app,
        Err(e @ PresenterError::MissingSubject) => {
            return output.error(
                format!("{} (pass --media <FILE>)", e),
                ExitCode::MissingSubject,
            )
        }
    };

    match run_terminal(&mut app).await {
        Ok(()) => {
            info!("detail screen closed");
            ExitCode::Success
        }
        Err(e) => {
            warn!(error = %e, "terminal session failed");
            output.error(format!("{:#}", e), ExitCode::Error)
        }
    }
}

async fn run_terminal(app: &mut App) -> Result<()> {
    let mut terminal = init_terminal().context("failed to initialize terminal")?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| render_ui(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Let spawned reapers run between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - dispatches to the foreground screen
fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match app.screen() {
        Screen::Detail => ui::detail::render(frame, chunks[1], app.view()),
        screen => ui::launch::render(frame, chunks[1], screen),
    }
    render_status_bar(frame, chunks[2], app);
}

/// Render the header with the app name and current media
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .presenter()
        .media()
        .map(|m| m.to_string())
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        Span::styled("DETAIL", Theme::title()),
        Span::styled("CAST", Theme::accent()),
        Span::styled(format!("  {}", title), Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(header, area);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let screen_indicator = Span::styled(
        match app.screen() {
            Screen::Detail => " DETAIL ",
            Screen::StagedLoading { .. } => " LOADING ",
            Screen::DirectPlayer { .. } => " PLAYER ",
            Screen::Trailer { .. } => " TRAILER ",
        },
        ratatui::style::Style::default()
            .fg(Theme::BACKGROUND)
            .bg(Theme::PRIMARY),
    );

    let cast_indicator = match app.cast().notification() {
        Some(notification) => {
            Span::styled(format!(" 📺 {} ", notification.text), Theme::accent())
        }
        None => Span::styled(" Idle ", Theme::dimmed()),
    };

    let help = match app.screen() {
        Screen::Detail => Span::styled(" q:quit  p:play  t:trailer  h:health ", Theme::dimmed()),
        _ => Span::styled(" ESC:back  q:quit ", Theme::dimmed()),
    };

    let status_line = Line::from(vec![
        screen_indicator,
        Span::raw(" "),
        cast_indicator,
        Span::raw(" │ "),
        help,
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
