use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BvhError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: {message} (`{text}`)")]
    Parse {
        line: usize,
        text: String,
        message: String,
    },

    #[error("Unsupported channel count {0}, expected 3, 6 or 9")]
    UnsupportedChannelCount(usize),

    #[error("MOTION section reached before any CHANNELS declaration")]
    MissingChannels,

    #[error("HIERARCHY section declares no bones")]
    EmptySkeleton,

    #[error("Failed to serialize conversion: {0}")]
    Json(#[from] serde_json::Error),
}

impl BvhError {
    pub(crate) fn parse(line: usize, text: &str, message: impl Into<String>) -> Self {
        BvhError::Parse {
            line,
            text: text.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BvhError>;
