use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run; none of these are recovered from.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("{0}")]
    Usage(#[from] clap::Error),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}, line {line}: {reason}", .path.display())]
    Format {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("failed to draw the plot: {0}")]
    Render(String),
    #[error("failed to open the plot window: {0}")]
    Display(String),
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> PlotError {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> PlotError {
        PlotError::Format {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Process exit status for this error; usage errors use clap's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlotError::Usage(_) => 1,
            PlotError::Io { .. } => 2,
            PlotError::Format { .. } => 3,
            PlotError::Render(_) | PlotError::Display(_) => 4,
        }
    }
}
