use anyhow::{Context, Result};
use ci_tail_client::{CiClient, HttpCiClient};
use ci_tail_config::AppConfig;
use ci_tail_core::FetcherConfig;
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

mod actions;
mod cli;
mod dispatcher;
mod headless;
mod logger;
mod middleware;
mod reducers;
mod state;
mod store;
mod view_models;
mod views;

use actions::{Action, DashboardAction, GlobalAction, LogViewAction};
use cli::{BuildReference, Cli, Command};
use middleware::{
    dashboard_middleware::DashboardMiddleware, keyboard_middleware::KeyboardMiddleware,
    logging_middleware::LoggingMiddleware, mouse_middleware::MouseMiddleware,
    tail_middleware::TailMiddleware,
};
use state::AppState;
use store::Store;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command();

    // The viewer owns the terminal, so it logs to a file
    match command {
        Command::Tail { .. } => logger::init_stderr(),
        Command::Dashboard | Command::View { .. } => {
            let log_file = logger::init_file()?;
            log::info!("Starting ci-tail, logging to {}", log_file.display());
        }
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    config.apply_env();
    config.apply_server_override(cli.server.clone());

    let client: Arc<dyn CiClient> = Arc::new(
        HttpCiClient::new(&config.server_url)
            .with_context(|| format!("Cannot use server {}", config.server_url))?,
    );
    log::info!("CI server: {}", config.server_url);

    match command {
        Command::Tail { build, from, plain } => {
            let reference = BuildReference::parse(&build, None)?;
            headless::run(
                client,
                &reference.build_id,
                from,
                plain,
                fetcher_config(&config),
            )
        }
        Command::Dashboard => run_viewer(client, &config, None),
        Command::View { build, line } => {
            let reference = BuildReference::parse(&build, line)?;
            run_viewer(client, &config, Some(reference))
        }
    }
}

fn fetcher_config(config: &AppConfig) -> FetcherConfig {
    FetcherConfig {
        poll_interval: config.poll_interval(),
        request_timeout: config.request_timeout(),
    }
}

/// Run the terminal viewer, on the dashboard or straight on one log
fn run_viewer(
    client: Arc<dyn CiClient>,
    config: &AppConfig,
    open: Option<BuildReference>,
) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    let mut state = AppState::new(config.server_url.clone());
    state.has_dashboard = open.is_none();
    let mut store = Store::new(state);

    // Middleware executes in this order
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(KeyboardMiddleware::new()));
    store.add_middleware(Box::new(MouseMiddleware::new()));
    store.add_middleware(Box::new(TailMiddleware::new(
        runtime.handle().clone(),
        client.clone(),
        fetcher_config(config),
    )));
    store.add_middleware(Box::new(DashboardMiddleware::new(
        runtime.handle().clone(),
        client,
        config.dashboard_poll_interval(),
    )));

    let initial = match open {
        Some(reference) => Action::LogView(LogViewAction::Open {
            build_id: reference.build_id,
            fragment: reference.fragment,
        }),
        None => Action::Dashboard(DashboardAction::StartPolling),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut store, initial);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Stops the pollers before the runtime goes away
    drop(store);
    runtime.shutdown_timeout(Duration::from_secs(1));

    log::info!("Exiting ci-tail");
    result
}

/// Maximum time spent on queued actions before the next frame
const ACTION_BUDGET: Duration = Duration::from_millis(16);

/// How long to wait for terminal input per frame
const EVENT_POLL: Duration = Duration::from_millis(50);

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
    initial: Action,
) -> Result<()> {
    // Size the viewport before the first log is opened
    let size = terminal.size()?;
    store.dispatch(Action::Global(GlobalAction::Resize {
        width: size.width,
        height: size.height,
    }));
    store.dispatcher().dispatch(initial);

    loop {
        let start = Instant::now();
        while let Some(action) = store.dispatcher().pop() {
            store.dispatch(action);

            // Remaining actions stay queued for the next frame
            if start.elapsed() >= ACTION_BUDGET {
                break;
            }
        }

        if !store.state().running {
            break;
        }

        let mut area = ratatui::layout::Rect::default();
        terminal.draw(|frame| {
            area = frame.area();
            views::render(store.state(), frame);
        })?;

        if area != store.state().terminal {
            store.dispatch(Action::Global(GlobalAction::Resize {
                width: area.width,
                height: area.height,
            }));
        }

        if event::poll(EVENT_POLL)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    store.dispatch(Action::Global(GlobalAction::KeyPressed(key)));
                }
                Event::Mouse(mouse) => {
                    store.dispatch(Action::Global(GlobalAction::Mouse(mouse)));
                }
                Event::Resize(width, height) => {
                    store.dispatch(Action::Global(GlobalAction::Resize { width, height }));
                }
                _ => {}
            }
        }
    }

    Ok(())
}
