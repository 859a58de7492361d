/// Failures that can actually happen: terminal I/O, config and log setup.
/// Everything in-fiction ("cannot delete hope.exe") is a dialog, not an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not set up logging: {0}")]
    Logging(String),
}
