mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod menu;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::util::error_chain;
use anyhow::Context;
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let (config, config_err) = match Config::load_default() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(path) = config.log_file() {
        if let Err(e) = init_logging(&path) {
            eprintln!("Warning: {e:#}");
        }
    }
    log::info!("Starting fruitsnake {}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_err {
        log::warn!("{}; using default configuration", error_chain(&e));
    }
    let terminal = ratatui::init();
    let r = App::new(config).run(terminal);
    ratatui::restore();
    log::info!("Exiting");
    io_exit(r)
}

/// Append log messages to the file at `path`, creating it and its parent
/// directories if needed
fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)
        .context("failed to initialize logger")?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
