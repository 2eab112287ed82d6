use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = AiresError> = std::result::Result<T, E>;

/// Every failure surfaced by the task builder, runner and loaders.
#[derive(Error, Debug)]
pub enum AiresError {
    #[error("invalid value for {name}: `{value}` ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid {quantity} unit `{unit}` (expected one of: {allowed})")]
    InvalidUnit {
        quantity: &'static str,
        unit: String,
        allowed: String,
    },

    #[error("unable to find `{program}` executable; ensure AIRES_DIR/bin is on PATH or provide the path explicitly")]
    ExecutableNotFound { program: String },

    #[error("run directory unavailable (${var}): {reason}")]
    MissingRunDirectory { var: String, reason: String },

    #[error("task `{task}` exited with code {exit_code}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    ProcessFailure {
        task: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("output for task `{task}` not found: {}", path.display())]
    OutputNotFound { task: String, path: PathBuf },

    #[error("malformed output {}:{line}: {reason}", path.display())]
    MalformedOutput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("task `{task}` cannot proceed: {reason}")]
    InvalidState { task: String, reason: String },

    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },

    #[error("cache error: {0}")]
    Cache(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("runner error: {0}")]
    Runner(#[from] anyhow::Error),
}

impl AiresError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Aires(#[from] AiresError),
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
