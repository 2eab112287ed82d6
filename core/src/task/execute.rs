use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AiresError, Result};
use crate::runner::{
    resolve_executable, run_session, ProcessRunnerPlugin, RunSessionArgs, RunnerPlugin,
    RunnerStartArgs, AIRES_PROGRAM,
};

use super::builder::Task;
use super::state::TaskState;

/// Outcome of a simulation that exited successfully.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub task: String,
    pub output_dir: PathBuf,
    pub program: PathBuf,
    pub exit_code: i32,
    pub duration_ms: Option<u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stdout_tail: String,
    pub stderr_tail: String,
}

impl Task {
    /// Runs the simulator as a local child process and waits for it to exit.
    pub async fn run(&mut self) -> Result<RunReport> {
        self.run_with(&ProcessRunnerPlugin::new()).await
    }

    /// Runs the simulator through `runner`.
    ///
    /// Everything that can fail before spawning (run root, executable, input
    /// file) is checked first and leaves the task in its current state.
    pub async fn run_with(&mut self, runner: &dyn RunnerPlugin) -> Result<RunReport> {
        if !matches!(self.state, TaskState::Created | TaskState::Configuring) {
            return Err(AiresError::InvalidState {
                task: self.name.clone(),
                reason: format!("cannot run while {:?}", self.state),
            });
        }

        let run_dir = self.run_directory()?;
        run_dir.ensure_writable(self.run_dir_env())?;
        let program = resolve_executable(self.options.program.as_deref(), AIRES_PROGRAM)?;

        let workdir = run_dir.create_task_dir(&self.name)?;
        let input = self.write_input_file(&run_dir.input_file(&self.name), Some(&workdir))?;

        let start_args = RunnerStartArgs {
            cmd: program.clone(),
            args: Vec::new(),
            envs: HashMap::new(),
            cwd: Some(workdir.clone()),
        };

        self.transition(TaskState::Running)?;
        let started_at = Utc::now();
        tracing::info!(
            task = %self.name,
            program = %program.display(),
            runner = runner.name(),
            directives = self.directives.len(),
            output_dir = %workdir.display(),
            "simulation started"
        );

        let outcome = match self.drive(runner, &start_args, &input).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = TaskState::Failed;
                tracing::error!(task = %self.name, error = %e, "simulation aborted");
                return Err(e);
            }
        };
        let finished_at = Utc::now();

        if !outcome.success() {
            self.transition(TaskState::Failed)?;
            tracing::error!(
                task = %self.name,
                exit_code = outcome.exit_code,
                duration_ms = outcome.duration_ms.unwrap_or_default(),
                "simulation failed"
            );
            return Err(AiresError::ProcessFailure {
                task: self.name.clone(),
                exit_code: outcome.exit_code,
                stdout: outcome.stdout_tail,
                stderr: outcome.stderr_tail,
            });
        }

        self.transition(TaskState::Completed)?;
        tracing::info!(
            task = %self.name,
            duration_ms = outcome.duration_ms.unwrap_or_default(),
            "simulation completed"
        );

        Ok(RunReport {
            task: self.name.clone(),
            output_dir: workdir,
            program,
            exit_code: outcome.exit_code,
            duration_ms: outcome.duration_ms,
            started_at,
            finished_at,
            stdout_tail: outcome.stdout_tail,
            stderr_tail: outcome.stderr_tail,
        })
    }

    async fn drive(
        &self,
        runner: &dyn RunnerPlugin,
        start_args: &RunnerStartArgs,
        input: &str,
    ) -> Result<crate::runner::RunOutcome> {
        let session = runner.start_session(start_args).await?;
        run_session(RunSessionArgs {
            session,
            stdin_payload: Some(input),
            capture_bytes: self.options.capture_bytes,
            passthrough: self.options.passthrough,
        })
        .await
    }
}
