use std::path::PathBuf;
use thiserror::Error;

use lyric_sync::LyricError;

/// Failures that abort [`run`](crate::app::run) or configuration loading.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window: {0}")]
    Window(#[from] minifb::Error),

    #[error("reading config {path}: {source}")]
    ConfigIo {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    ConfigParse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lyrics(#[from] LyricError),
}
