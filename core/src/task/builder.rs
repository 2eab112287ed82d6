use std::path::{Path, PathBuf};

use crate::catalog::{self, Directive};
use crate::config::AiresConfig;
use crate::error::{AiresError, Result};
use crate::rundir::{RunDirectory, RUN_DIR_ENV};

use super::state::{StateTransition, TaskState};

pub(crate) const GENERATED_REMARK: &str = "Task generated using zhaires-rs";

/// Where and how a task runs.
#[derive(Debug, Clone)]
pub struct TaskOptions {
    /// Explicit simulator binary; `Aires` on PATH when unset.
    pub program: Option<String>,
    /// Run root; read from `run_dir_env` when unset.
    pub run_root: Option<PathBuf>,
    pub run_dir_env: String,
    pub capture_bytes: usize,
    pub echo: bool,
    pub passthrough: bool,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self::from(&AiresConfig::default())
    }
}

impl From<&AiresConfig> for TaskOptions {
    fn from(cfg: &AiresConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            run_root: None,
            run_dir_env: cfg.run_dir_env.clone(),
            capture_bytes: cfg.capture_bytes,
            echo: cfg.echo,
            passthrough: cfg.passthrough,
        }
    }
}

/// One configured AIRES simulation.
///
/// Directives are kept exactly in the order they were appended; AIRES itself
/// applies last-write-wins when a parameter is given twice.
#[derive(Debug, Clone)]
pub struct Task {
    pub(super) name: String,
    pub(super) directives: Vec<Directive>,
    pub(super) state: TaskState,
    pub(super) options: TaskOptions,
    preamble_len: usize,
}

impl Task {
    pub fn new(name: &str) -> Result<Self> {
        Self::with_options(name, TaskOptions::default())
    }

    pub fn with_options(name: &str, options: TaskOptions) -> Result<Self> {
        let task_name = catalog::task_name(name)?;
        let remark = catalog::remark(GENERATED_REMARK)?;
        Ok(Self {
            name: name.trim().to_string(),
            directives: vec![task_name, remark],
            state: TaskState::Created,
            options,
            preamble_len: 2,
        })
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.options.program = Some(program.into());
        self
    }

    pub fn run_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.run_root = Some(root.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Appends a directive verbatim. No validation is performed.
    pub fn raw(&mut self, directive: impl Into<String>) -> Result<&mut Self> {
        self.push(Directive::raw(directive))
    }

    /// Appends every non-blank line of an AIRES command/input file.
    pub fn load_directives(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| AiresError::io(path, e))?;
        let mut count = 0;
        for line in content.lines() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            self.push(Directive::raw(line))?;
            count += 1;
        }
        tracing::debug!(task = %self.name, path = %path.display(), count, "loaded directives");
        Ok(count)
    }

    pub(crate) fn push(&mut self, directive: Directive) -> Result<&mut Self> {
        if !StateTransition::accepts_directives(self.state) {
            return Err(AiresError::InvalidState {
                task: self.name.clone(),
                reason: format!("no directives accepted while {:?}", self.state),
            });
        }
        if self.options.echo {
            tracing::info!(target: "zhaires.directive", task = %self.name, "{}", directive);
        }
        self.directives.push(directive);
        self.transition(TaskState::Configuring)?;
        Ok(self)
    }

    pub(super) fn transition(&mut self, to: TaskState) -> Result<()> {
        StateTransition::validate(self.state, to).map_err(|e| AiresError::InvalidState {
            task: self.name.clone(),
            reason: e.to_string(),
        })?;
        self.state = to;
        Ok(())
    }

    /// Drops every directive after the construction preamble and returns to `Created`.
    pub fn reset(&mut self) -> Result<()> {
        if self.state == TaskState::Running {
            return Err(AiresError::InvalidState {
                task: self.name.clone(),
                reason: "cannot reset while running".to_string(),
            });
        }
        self.directives.truncate(self.preamble_len);
        self.transition(TaskState::Created)
    }

    /// Renders the directives as AIRES input, one per line.
    ///
    /// With `output_dir`, a leading `FileDirectory All <dir>/` routes every
    /// output file there; later directives may still override it.
    pub fn render_input(&self, output_dir: Option<&Path>) -> String {
        let mut out = String::new();
        if let Some(dir) = output_dir {
            out.push_str(&format!("FileDirectory All {}/\n", dir.display()));
        }
        for d in &self.directives {
            out.push_str(d.as_str());
            out.push('\n');
        }
        out
    }

    /// Writes the rendered input to `path` and returns what was written.
    pub fn write_input_file(&self, path: &Path, output_dir: Option<&Path>) -> Result<String> {
        let input = self.render_input(output_dir);
        std::fs::write(path, &input).map_err(|e| AiresError::io(path, e))?;
        Ok(input)
    }

    pub(super) fn run_directory(&self) -> Result<RunDirectory> {
        match &self.options.run_root {
            Some(root) => Ok(RunDirectory::new(root)),
            None => RunDirectory::from_env(self.run_dir_env()),
        }
    }

    pub(super) fn run_dir_env(&self) -> &str {
        if self.options.run_dir_env.trim().is_empty() {
            RUN_DIR_ENV
        } else {
            &self.options.run_dir_env
        }
    }
}
