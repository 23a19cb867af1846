use std::path::PathBuf;
use thiserror::Error;

/// A host source that could not be read. Never fatal.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures that stop the selector. User cancellation is not one of them.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no candidate hosts found")]
    EmptyCatalog,
    #[error("interactive terminal unavailable: {0}")]
    TerminalUnavailable(#[source] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
