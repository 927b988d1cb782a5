// harbor - declarative UI themes for a handheld game launcher
//
// The binary is a thin shell around the library:
// - compose / rects: headless inspection of a composed theme
// - preview: runs one screen in the terminal (ratatui + crossterm)
// - themes / config: discovery and configuration management

use anyhow::Result;
use clap::Parser;
use harbor::cli::{self, Cli};
use harbor::config::{Config, LogRotation, LoggingConfig};
use harbor::logging::{LogBuffer, TuiLogLayer};
use harbor::theme::{ensure_themes_extracted, ThemeLoader};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rolling JSON file writer, if file logging is enabled and its directory is usable
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }
    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread; the guard flushes on drop
    Some(tracing_appender::non_blocking(file_appender))
}

/// Initialize tracing
///
/// Interactive (preview): capture logs into the buffer so they don't garble
/// the alternate screen. Headless: human-readable logs on stderr, keeping
/// stdout for command output. File logging (JSON) is added to either.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, interactive: bool, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("harbor={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let tui_layer = interactive.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!interactive).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Extract bundled themes on first run so they can be copied and edited
    if let Some(dir) = ThemeLoader::user_dir() {
        ensure_themes_extracted(&dir);
    }

    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, cli.is_interactive(), &log_buffer);

    tracing::debug!(
        theme = %config.theme,
        screen = %format!("{}x{}", config.screen_width, config.screen_height),
        "configuration loaded"
    );

    cli::run(cli, config, log_buffer)
}
