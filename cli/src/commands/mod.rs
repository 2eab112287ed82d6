pub mod cli;
pub mod load;
pub mod run;
pub mod table;

use std::path::PathBuf;

use zhaires_core::api::{AppConfig, CliError, RunDirectory, RUN_DIR_ENV};

/// `--run-dir` when given, otherwise the variable named in `[aires] run_dir_env`.
pub fn resolve_run_dir(explicit: Option<PathBuf>, cfg: &AppConfig) -> Result<RunDirectory, CliError> {
    if let Some(dir) = explicit {
        return Ok(RunDirectory::new(dir));
    }
    let var = match cfg.aires.run_dir_env.trim() {
        "" => RUN_DIR_ENV,
        v => v,
    };
    Ok(RunDirectory::from_env(var)?)
}
