//! Run directory layout: `<root>/<task>/` and the file names AIRES/ZHAireS use inside it.

use std::path::{Path, PathBuf};

use crate::error::{AiresError, Result};

/// Default environment variable naming the run root.
pub const RUN_DIR_ENV: &str = "AIRES_RUN_DIR";

/// ZHAireS time-domain antenna output (all antennas, one sample per line).
pub const WAVEFORM_FILE: &str = "timefresnel-root.dat";

/// Written by ZHAireS once a task has started.
pub const STATUS_FILE: &str = "Zhaires.status";

/// Binary copy of the parsed waveform table.
pub const CACHE_FILE: &str = "waveforms.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    root: PathBuf,
}

impl RunDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the root from `var`; unset or blank is `MissingRunDirectory`.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(Self::new(v.trim())),
            Ok(_) => Err(AiresError::MissingRunDirectory {
                var: var.to_string(),
                reason: "variable is empty".to_string(),
            }),
            Err(_) => Err(AiresError::MissingRunDirectory {
                var: var.to_string(),
                reason: "variable is not set".to_string(),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn task_dir(&self, task: &str) -> PathBuf {
        self.root.join(task)
    }

    pub fn summary_file(&self, task: &str) -> PathBuf {
        self.task_dir(task).join(format!("{task}.sry"))
    }

    pub fn waveform_file(&self, task: &str) -> PathBuf {
        self.task_dir(task).join(WAVEFORM_FILE)
    }

    pub fn status_file(&self, task: &str) -> PathBuf {
        self.task_dir(task).join(STATUS_FILE)
    }

    pub fn cache_file(&self, task: &str) -> PathBuf {
        self.task_dir(task).join(CACHE_FILE)
    }

    pub fn input_file(&self, task: &str) -> PathBuf {
        self.task_dir(task).join(format!("{task}.inp"))
    }

    pub fn table_file(&self, task: &str, table: u32) -> PathBuf {
        self.task_dir(task).join(format!("{task}.t{table}"))
    }

    /// True once the simulator has started writing the task.
    pub fn exists(&self, task: &str) -> bool {
        self.status_file(task).is_file()
    }

    /// Checks that the root is an existing, writable directory.
    pub fn ensure_writable(&self, var: &str) -> Result<()> {
        let missing = |reason: String| AiresError::MissingRunDirectory {
            var: var.to_string(),
            reason,
        };

        if !self.root.is_dir() {
            return Err(missing(format!("{} is not a directory", self.root.display())));
        }

        let marker = self
            .root
            .join(format!(".zhaires-write-check-{}", std::process::id()));
        std::fs::write(&marker, b"")
            .map_err(|e| missing(format!("{} is not writable: {e}", self.root.display())))?;
        let _ = std::fs::remove_file(&marker);
        Ok(())
    }

    /// Creates `<root>/<task>/` if needed and returns it.
    pub fn create_task_dir(&self, task: &str) -> Result<PathBuf> {
        let dir = self.task_dir(task);
        std::fs::create_dir_all(&dir).map_err(|e| AiresError::io(&dir, e))?;
        Ok(dir)
    }
}
