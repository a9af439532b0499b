//! skycards - current weather for a few locations, as terminal cards
//!
//! # Usage
//!
//! ```sh
//! export OPENWEATHER_API_KEY=...
//!
//! # Default ZIP codes (10001, 90210, 60601)
//! skycards
//!
//! # City tracker
//! skycards --mode city -l London -l "São Paulo" --units metric
//! ```

use std::cell::RefCell;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skycards::cli::{Args, Mode, StartupError};
use skycards::components::{Component, DashboardView, DashboardViewProps};
use skycards::{Action, Dashboard};
use skycards_core::location::{CityName, LocationKey, ZipCode};
use skycards_core::WeatherClient;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_path = args.log_path();
    if let Err(source) = skycards::logging::init(&log_path) {
        let err = StartupError::LogFile {
            path: log_path,
            source,
        };
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }

    let result = match args.mode {
        Mode::Zip => run::<ZipCode>(&args).await,
        Mode::City => run::<CityName>(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Startup(err)) => {
            error!(error = %err, "Startup failed");
            eprintln!("Error: {}", err);
            if matches!(err, StartupError::Config(_)) {
                eprintln!("Set OPENWEATHER_API_KEY or pass --api-key.");
            }
            ExitCode::FAILURE
        }
        Err(RunError::Terminal(err)) => {
            error!(error = %err, "Terminal error");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

enum RunError {
    Startup(StartupError),
    Terminal(io::Error),
}

impl From<StartupError> for RunError {
    fn from(err: StartupError) -> Self {
        RunError::Startup(err)
    }
}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        RunError::Terminal(err)
    }
}

/// Resolve settings for one identifier flavor, then run the UI.
async fn run<K: LocationKey>(args: &Args) -> Result<(), RunError> {
    // Everything that can fail on bad configuration happens before the
    // terminal is touched
    let client = WeatherClient::new(args.provider_config()?).map_err(StartupError::from)?;
    let state = args.initial_state::<K>()?;
    let refresh_every = args.refresh_every::<K>()?;

    info!(kind = K::KIND, base_url = %client.config().base_url(), "Starting skycards");

    let mut dashboard = Dashboard::new(state, client, refresh_every);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    dashboard.start();
    let view = RefCell::new(DashboardView::new());
    let result = dashboard
        .run(
            &mut terminal,
            |frame, state| {
                let area = frame.area();
                let props = DashboardViewProps {
                    state,
                    is_focused: true,
                };
                Component::<Action<K>>::render(&mut *view.borrow_mut(), frame, area, props);
            },
            |event, state| {
                let props = DashboardViewProps {
                    state,
                    is_focused: true,
                };
                let actions: Vec<Action<K>> =
                    Component::<Action<K>>::handle_event(&mut *view.borrow_mut(), event, props)
                        .into_iter()
                        .collect();
                actions
            },
        )
        .await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}
