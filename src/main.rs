use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::{info, warn};

use statusboard::server::{self, AppState};
use statusboard::{
    events, load_snapshot, parse_snapshot, telemetry, ui, App, Board, DataSource, FileSource,
    Settings,
};
use statusboard_reporter::{Reporter, WebsiteProbe};

#[derive(Parser, Debug)]
#[command(name = "statusboard", version)]
#[command(about = "Publish a status page from pushed snapshots")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (ingestion endpoint and status page)
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:8080"
        #[arg(short, long)]
        listen: Option<String>,

        /// Snapshot file the server reads and replaces
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Shared secret reporters must pass as `?token=`
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Watch the snapshot file in a terminal dashboard
    Watch {
        /// Snapshot file to watch
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Refresh interval in seconds
        #[arg(short, long)]
        refresh: Option<u64>,
    },

    /// Print the current status once
    Check {
        /// Snapshot file to read
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print the classified board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Push a snapshot file to an ingestion endpoint
    Push {
        /// Snapshot document to send
        #[arg(short, long)]
        file: PathBuf,

        /// Ingestion URL (defaults to this server's configured address)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Shared secret (defaults to the configured token)
        #[arg(short, long)]
        token: Option<String>,

        /// Stamp the snapshot with the current time if it has none
        #[arg(long)]
        stamp: bool,

        /// Probe each website's URL and publish the result as its status
        #[arg(long)]
        probe_websites: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve {
            listen,
            snapshot,
            token,
        } => {
            telemetry::init();
            if let Some(listen) = listen {
                settings.listen_addr = listen;
            }
            if let Some(snapshot) = snapshot {
                settings.snapshot_path = snapshot;
            }
            if token.is_some() {
                settings.token = token;
            }
            run_server(settings)
        }
        Command::Watch { snapshot, refresh } => {
            if let Some(snapshot) = snapshot {
                settings.snapshot_path = snapshot;
            }
            if let Some(refresh) = refresh {
                settings.page.refresh_secs = refresh;
            }
            run_with_file(&settings)
        }
        Command::Check { snapshot, json } => {
            let path = snapshot.unwrap_or(settings.snapshot_path);
            check(&path, json)
        }
        Command::Push {
            file,
            endpoint,
            token,
            stamp,
            probe_websites,
        } => {
            telemetry::init();
            let endpoint = endpoint.unwrap_or_else(|| default_endpoint(&settings));
            let token = token.or(settings.token);
            let options = PushOptions {
                stamp,
                probe_websites,
            };
            push(&file, &endpoint, token, options)
        }
    }
}

/// Run the HTTP server until Ctrl-C
fn run_server(settings: Settings) -> Result<()> {
    let state = AppState::new(settings)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(state))
}

/// Load the snapshot once and print its classification
fn check(path: &Path, json: bool) -> Result<()> {
    let board = Board::from_snapshot(&load_snapshot(path));

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    println!("{} {}", board.overall.icon().glyph(), board.headline);
    if let Some(ts) = &board.last_updated_utc {
        println!("Last updated: {ts}");
    }
    for group in board.groups.iter().filter(|g| !g.entries.is_empty()) {
        println!();
        println!("{}", group.title);
        for entry in &group.entries {
            println!(
                "  {} {:<32} {:<20} {}",
                entry.icon.glyph(),
                entry.name,
                entry.status,
                entry.severity.label()
            );
        }
    }
    Ok(())
}

/// How `push` prepares the snapshot before sending it.
#[derive(Debug, Clone, Copy)]
struct PushOptions {
    stamp: bool,
    probe_websites: bool,
}

/// Read, normalize and send a snapshot document
fn push(file: &Path, endpoint: &str, token: Option<String>, options: PushOptions) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str::<serde::de::IgnoredAny>(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let mut snapshot = parse_snapshot(&content);
    if snapshot.is_empty() {
        warn!(file = %file.display(), "snapshot has no components");
    }

    let rt = tokio::runtime::Runtime::new()?;
    if options.probe_websites {
        let probed = rt.block_on(WebsiteProbe::new().refresh_websites(&mut snapshot));
        info!(probed, "websites probed");
        // Website statuses are now as of this moment.
        snapshot.last_updated_utc = Some(chrono::Utc::now().to_rfc3339());
    }
    if options.stamp && snapshot.last_updated_utc.is_none() {
        snapshot.last_updated_utc = Some(chrono::Utc::now().to_rfc3339());
    }

    let mut builder = Reporter::builder().endpoint(endpoint);
    if let Some(token) = token {
        builder = builder.token(token);
    }
    let reporter = builder.build()?;

    rt.block_on(reporter.push(&snapshot))
        .with_context(|| format!("push to {endpoint} failed"))?;

    info!(endpoint, components = snapshot.len(), "snapshot pushed");
    Ok(())
}

/// The local ingestion URL derived from the server settings.
fn default_endpoint(settings: &Settings) -> String {
    let addr = settings
        .listen_addr
        .replace("0.0.0.0", "127.0.0.1")
        .replace("[::]", "[::1]");
    format!("http://{}{}", addr, settings.ingest_path)
}

/// Run the dashboard over the configured snapshot file
fn run_with_file(settings: &Settings) -> Result<()> {
    let source = Box::new(FileSource::new(&settings.snapshot_path));
    run_tui(
        source,
        &settings.page.title,
        settings.page.refresh_interval(),
    )
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, title: &str, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, title);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(6),    // Components
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::board::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + border (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
