use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use focus_wm::config::LayoutConfig;
use focus_wm::drivers::console::{ConsoleInputDriver, ConsoleSession};
use focus_wm::layout::Size;
use focus_wm::runner::{WorkspaceApp, run};
use focus_wm::store::{JsonFileStorage, MemoryStorage};
use focus_wm::tracing_sub;

#[derive(Parser, Debug)]
#[command(
    name = "focus-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating widget workspace in the terminal"
)]
struct Cli {
    /// Where the layout is saved between sessions.
    #[arg(long = "layout-file", value_name = "PATH")]
    layout_file: Option<PathBuf>,

    /// Keep the layout in memory only.
    #[arg(long = "no-persist", conflicts_with = "layout_file")]
    no_persist: bool,

    /// JSON file overriding the terminal layout settings.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append logs to this file; logs are discarded otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

impl Cli {
    fn layout_config(&self) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => Ok(LayoutConfig::load_with_base(path, LayoutConfig::terminal())?),
            None => Ok(LayoutConfig::terminal()),
        }
    }

    fn layout_path(&self) -> PathBuf {
        self.layout_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("focus-wm-layout.json"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_level, cli.log_file.as_deref())?;
    let config = cli.layout_config()?;

    let (columns, rows) = crossterm::terminal::size()?;
    let viewport = Size::new(i32::from(columns), i32::from(rows));
    let mut app = if cli.no_persist {
        WorkspaceApp::terminal(config, viewport, MemoryStorage::new())
    } else {
        let path = cli.layout_path();
        tracing::info!(path = %path.display(), "using layout file");
        WorkspaceApp::terminal(config, viewport, JsonFileStorage::new(path))
    };

    let mut session = ConsoleSession::enter()?;
    let result = run(
        session.terminal(),
        ConsoleInputDriver::new(),
        &mut app,
        Duration::from_millis(16),
    );
    session.exit()?;
    result?;
    Ok(())
}
