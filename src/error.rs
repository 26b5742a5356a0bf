use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CloneError {
    #[error("no {kind} for '{name}' found under {root}")]
    SourceNotFound {
        kind: String,
        name: String,
        root: String,
    },

    #[error("destination directory {path} already exists")]
    DestinationConflict { path: String },

    #[error("{command} failed: {message}")]
    CopyToolFailure { command: String, message: String },

    #[error("multiple {kind} candidates for '{name}': {}", .candidates.join(", "))]
    AmbiguousMatch {
        kind: String,
        name: String,
        candidates: Vec<String>,
    },

    #[error("failed {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}
