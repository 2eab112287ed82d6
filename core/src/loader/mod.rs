//! Reading simulation output back into typed tables.

pub mod cache;
mod summary;
mod table;
mod waveform;

use std::path::Path;

pub use summary::{parse_summary, read_summary, ShowerSummary};
pub use table::{AntennaTraces, Column, WaveformRow, WaveformTable};

use crate::catalog;
use crate::config::LoaderConfig;
use crate::error::{AiresError, Result};
use crate::rundir::{RunDirectory, RUN_DIR_ENV};

/// Where a loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Cache,
    Parsed,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub table: WaveformTable,
    pub source: TableSource,
}

/// Loads task output from one run root, with an optional waveform cache.
#[derive(Debug, Clone)]
pub struct OutputLoader {
    run_dir: RunDirectory,
    cache: bool,
}

impl OutputLoader {
    pub fn new(run_dir: RunDirectory) -> Self {
        Self {
            run_dir,
            cache: true,
        }
    }

    /// Uses the run root named by `$AIRES_RUN_DIR`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(RunDirectory::from_env(RUN_DIR_ENV)?))
    }

    pub fn from_config(run_dir: RunDirectory, cfg: &LoaderConfig) -> Self {
        Self::new(run_dir).with_cache(cfg.cache)
    }

    /// Disabling the cache skips both reading and writing it.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    pub fn run_dir(&self) -> &RunDirectory {
        &self.run_dir
    }

    pub fn load_waveforms(&self, task: &str) -> Result<WaveformTable> {
        Ok(self.load(task)?.table)
    }

    pub fn load_summary(&self, task: &str) -> Result<ShowerSummary> {
        catalog::task_name(task)?;
        let path = self.run_dir.summary_file(task);
        require(task, &path)?;
        read_summary(&path)
    }

    pub fn load(&self, task: &str) -> Result<Loaded> {
        catalog::task_name(task)?;
        let dir = self.run_dir.task_dir(task);
        require(task, &dir)?;
        let summary_path = self.run_dir.summary_file(task);
        let waveform_path = self.run_dir.waveform_file(task);
        require(task, &summary_path)?;
        require(task, &waveform_path)?;

        let cache_path = self.run_dir.cache_file(task);
        let sources = [summary_path.as_path(), waveform_path.as_path()];
        if self.cache && cache::is_fresh(&cache_path, &sources) {
            match cache::read_cache(&cache_path) {
                Ok(Some(table)) => {
                    tracing::debug!(task, rows = table.len(), "waveforms loaded from cache");
                    return Ok(Loaded {
                        table,
                        source: TableSource::Cache,
                    });
                }
                Ok(None) => tracing::info!(task, "cache format changed; re-parsing"),
                Err(e) => tracing::warn!(task, error = %e, "cache unreadable; re-parsing"),
            }
        }

        let summary = read_summary(&summary_path)?;
        let samples = waveform::read_waveforms(&waveform_path)?;
        let table = WaveformTable::from_samples(summary, samples);
        tracing::info!(
            task,
            rows = table.len(),
            antennas = table.n_antennas(),
            "waveforms parsed"
        );

        if self.cache {
            if let Err(e) = cache::write_cache(&cache_path, &table) {
                tracing::warn!(task, error = %e, "failed to write waveform cache");
            }
        }

        Ok(Loaded {
            table,
            source: TableSource::Parsed,
        })
    }
}

fn require(task: &str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AiresError::OutputNotFound {
            task: task.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Loads the waveforms of `task` from the run root in `$AIRES_RUN_DIR`.
pub fn load_waveforms(task: &str) -> Result<WaveformTable> {
    OutputLoader::from_env()?.load_waveforms(task)
}
