//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `zhaires_core::api` instead of reaching into internal modules.

pub use crate::catalog::{Directive, PerShowerData, PrimaryParticle, Quantity};
pub use crate::config::{load_default, AiresConfig, AppConfig, LoaderConfig, LoggingConfig};
pub use crate::error::{AiresError, CliError, Result};
pub use crate::loader::{
    load_waveforms, AntennaTraces, Column, Loaded, OutputLoader, ShowerSummary, TableSource,
    WaveformRow, WaveformTable,
};
pub use crate::rundir::{RunDirectory, RUN_DIR_ENV};
pub use crate::runner::{
    run_session, ProcessRunnerPlugin, RunOutcome, RunSessionArgs, RunnerPlugin, RunnerSession,
    RunnerStartArgs,
};
pub use crate::tables::{generate_table, load_table, AiresTable, TableKind};
pub use crate::task::{RunReport, Task, TaskOptions, TaskState};
