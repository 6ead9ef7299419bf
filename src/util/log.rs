use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_DIR_VAR: &str = "LYRICALLY_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "LYRICALLY_LOG_LEVEL";
pub const LOG_FILE: &str = "lyrically.log";

const DEFAULT_FILTER: &str = "info";

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lyrically", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var(LOG_DIR_VAR).ok(),
        project_directory().map(|dirs| dirs.data_local_dir().to_path_buf()),
    )
}

fn resolve_data_dir(override_dir: Option<String>, project_dir: Option<PathBuf>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .or(project_dir)
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// `RUST_LOG` wins, then our own level variable, then `info`.
fn filter_directive(rust_log: Option<String>, level: Option<String>) -> String {
    let set = |directive: &String| !directive.trim().is_empty();
    rust_log
        .filter(set)
        .or(level.filter(set))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Logs go to a file; the terminal belongs to the UI.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(LOG_FILE))?;

    let directive = filter_directive(
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        std::env::var(LOG_LEVEL_VAR).ok(),
    );
    let env_filter = EnvFilter::try_new(&directive)
        .map_err(|e| eyre!("invalid log filter {directive:?}: {e}"))?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
