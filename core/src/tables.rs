//! AIRES export tables (`<task>.t<ID>`), generated with `AiresExport`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::catalog;
use crate::error::{AiresError, Result};
use crate::rundir::RunDirectory;
use crate::runner::{
    resolve_executable, run_session, ProcessRunnerPlugin, RunSessionArgs, RunnerPlugin,
    RunnerStartArgs, EXPORT_PROGRAM,
};

/// Characters of the file header inspected to classify a table.
const HEADER_PROBE: usize = 600;

pub const UNITS: &[(&str, &str)] = &[
    ("depth", "g/cm^2"),
    ("length", "m"),
    ("time", "ns"),
    ("angle", "deg"),
    ("energy", "GeV"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Longitudinal,
    Lateral,
    Energy,
    Ground,
}

impl TableKind {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Longitudinal => &["depth", "mean", "rms", "stdev", "min", "max"],
            TableKind::Lateral => &["R", "mean", "rms", "stdev", "min", "max"],
            TableKind::Energy => &["energy", "mean", "rms", "stdev", "min", "max"],
            TableKind::Ground => &["number", "energy", "entries"],
        }
    }

    /// Classifies a table from the start of its header.
    pub fn detect(header: &str) -> Option<Self> {
        let head: String = header.chars().take(HEADER_PROBE).collect();
        if head.contains("TABLE 5") {
            Some(TableKind::Ground)
        } else if head.contains("Longitudinal development: Energy") {
            Some(TableKind::Energy)
        } else if head.contains("Longitudinal development:") {
            Some(TableKind::Longitudinal)
        } else if head.contains("Lateral distribution:")
            || head.contains("Unweighted lateral distribution:")
        {
            Some(TableKind::Lateral)
        } else if head.contains("Energy distribution") {
            Some(TableKind::Energy)
        } else {
            None
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableKind::Longitudinal => "longitudinal",
            TableKind::Lateral => "lateral",
            TableKind::Energy => "energy",
            TableKind::Ground => "ground",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiresTable {
    pub id: u32,
    pub kind: TableKind,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<f64>>,
}

impl AiresTable {
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    pub fn units(&self) -> HashMap<&'static str, &'static str> {
        UNITS.iter().copied().collect()
    }
}

/// Parses table text; the leading index column of every row is dropped.
pub fn parse_table(content: &str, id: u32, path: &Path) -> Result<AiresTable> {
    let kind = TableKind::detect(content)
        .ok_or_else(|| AiresError::malformed(path, 0, "unrecognised table type"))?;
    let columns = kind.columns();
    let width = columns.len() + 1;

    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values = trimmed
            .split_whitespace()
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| AiresError::malformed(path, lineno, format!("not a number: {raw:?}")))
            })
            .collect::<Result<Vec<f64>>>()?;
        if values.len() != width {
            return Err(AiresError::malformed(
                path,
                lineno,
                format!("expected {width} fields for a {kind} table, found {}", values.len()),
            ));
        }
        rows.push(values[1..].to_vec());
    }

    Ok(AiresTable {
        id,
        kind,
        columns: columns.to_vec(),
        rows,
    })
}

/// Loads `<root>/<task>/<task>.t<id>`.
pub fn load_table(run_dir: &RunDirectory, task: &str, id: u32) -> Result<AiresTable> {
    catalog::task_name(task)?;
    let path = run_dir.table_file(task, id);
    if !path.is_file() {
        return Err(AiresError::OutputNotFound {
            task: task.to_string(),
            path,
        });
    }
    let content = std::fs::read_to_string(&path).map_err(|e| AiresError::io(&path, e))?;
    parse_table(&content, id, &path)
}

/// Runs `AiresExport <task dir> <id>` and loads the resulting table.
pub async fn generate_table(
    run_dir: &RunDirectory,
    task: &str,
    id: u32,
    export_program: Option<&str>,
) -> Result<AiresTable> {
    generate_table_with(&ProcessRunnerPlugin::new(), run_dir, task, id, export_program).await
}

pub async fn generate_table_with(
    runner: &dyn RunnerPlugin,
    run_dir: &RunDirectory,
    task: &str,
    id: u32,
    export_program: Option<&str>,
) -> Result<AiresTable> {
    catalog::task_name(task)?;
    let task_dir = run_dir.task_dir(task);
    if !task_dir.is_dir() {
        return Err(AiresError::OutputNotFound {
            task: task.to_string(),
            path: task_dir,
        });
    }
    let program = resolve_executable(export_program, EXPORT_PROGRAM)?;

    let args = RunnerStartArgs {
        cmd: program.clone(),
        args: vec![task_dir.to_string_lossy().into_owned(), id.to_string()],
        envs: HashMap::new(),
        cwd: Some(task_dir.clone()),
    };
    tracing::info!(task, table = id, program = %program.display(), "exporting table");

    let session = runner.start_session(&args).await?;
    let outcome = run_session(RunSessionArgs {
        session,
        stdin_payload: None,
        capture_bytes: 16 * 1024,
        passthrough: false,
    })
    .await?;

    if !outcome.success() {
        return Err(AiresError::ProcessFailure {
            task: task.to_string(),
            exit_code: outcome.exit_code,
            stdout: outcome.stdout_tail,
            stderr: outcome.stderr_tail,
        });
    }
    load_table(run_dir, task, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LONG: &str = "\
# TABLE 1001
# Longitudinal development: Gammas
#
   1   100.0   12.0   3.0   1.0   10.0   14.0
   2   200.0   40.5   8.0   2.5   35.0   47.0
";

    #[test]
    fn detects_table_kinds() {
        assert_eq!(TableKind::detect(LONG), Some(TableKind::Longitudinal));
        assert_eq!(TableKind::detect("# TABLE 5501"), Some(TableKind::Ground));
        assert_eq!(
            TableKind::detect("# Longitudinal development: Energy of gammas"),
            Some(TableKind::Energy)
        );
        assert_eq!(
            TableKind::detect("# Unweighted lateral distribution: muons"),
            Some(TableKind::Lateral)
        );
        assert_eq!(TableKind::detect("# something else"), None);
    }

    #[test]
    fn only_the_header_is_inspected() {
        let text = format!("#{}\n# Lateral distribution: x\n", " ".repeat(HEADER_PROBE));
        assert_eq!(TableKind::detect(&text), None);
    }

    #[test]
    fn drops_index_column() {
        let table = parse_table(LONG, 1001, Path::new("t1.t1001")).unwrap();
        assert_eq!(table.kind, TableKind::Longitudinal);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column("depth"), Some(vec![100.0, 200.0]));
        assert_eq!(table.column("max"), Some(vec![14.0, 47.0]));
        assert_eq!(table.units()["depth"], "g/cm^2");
    }

    #[test]
    fn wrong_width_is_malformed() {
        let text = format!("{LONG}   3   300.0\n");
        let err = parse_table(&text, 1001, Path::new("t1.t1001")).unwrap_err();
        assert!(matches!(err, AiresError::MalformedOutput { line: 6, .. }));
    }

    #[test]
    fn missing_table_is_output_not_found() {
        let root = tempfile::tempdir().unwrap();
        let err = load_table(&RunDirectory::new(root.path()), "t1", 1001).unwrap_err();
        assert!(matches!(err, AiresError::OutputNotFound { .. }));
    }
}
