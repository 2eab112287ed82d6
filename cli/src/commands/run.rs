use std::path::{Path, PathBuf};

use zhaires_core::api::{AppConfig, CliError, Task, TaskOptions};

use super::cli::{RunArgs, TaskArgs};
use super::resolve_run_dir;

/// Task options from the `[aires]` config plus command-line overrides.
pub fn task_options(args: &TaskArgs, cfg: &AppConfig, run_root: Option<&Path>) -> TaskOptions {
    let mut options = TaskOptions::from(&cfg.aires);
    options.echo |= args.echo;
    options.run_root = run_root.map(Path::to_path_buf);
    options
}

pub fn build_task(args: &TaskArgs, options: TaskOptions) -> Result<Task, CliError> {
    let mut task = Task::with_options(&args.name, options)?;

    if let Some(path) = &args.input {
        task.load_directives(path)?;
    }
    if let Some(p) = &args.particle {
        task.primary_particle(p)?;
    }
    if let Some(energy) = &args.energy {
        let (value, unit) = parse_energy(energy)?;
        task.primary_energy(value, unit)?;
    }
    if let Some(z) = args.zenith {
        task.primary_zenith(z)?;
    }
    if let Some(a) = args.azimuth {
        task.primary_azimuth(a, false)?;
    }
    if args.zhaires {
        task.zhaires(true)?;
    }
    if args.fresnel_time {
        task.fresnel_time(true)?;
    }
    for point in &args.antennas {
        let (x, y, z) = parse_point(point)?;
        task.add_antenna(x, y, z)?;
    }
    if let Some(seed) = args.seed {
        task.random_seed(seed)?;
    }
    for line in &args.directives {
        task.raw(line.as_str())?;
    }

    Ok(task)
}

fn parse_energy(s: &str) -> Result<(f64, &str), CliError> {
    let mut parts = s.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CliError::Command(format!("--energy expects \"VALUE UNIT\", got {s:?}")));
    };
    let value = value
        .parse::<f64>()
        .map_err(|_| CliError::Command(format!("--energy value is not a number: {value:?}")))?;
    Ok((value, unit))
}

fn parse_point(s: &str) -> Result<(f64, f64, f64), CliError> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CliError::Command(format!("--antenna expects X,Y,Z, got {s:?}")))?;
    match coords.as_slice() {
        [x, y, z] => Ok((*x, *y, *z)),
        _ => Err(CliError::Command(format!("--antenna expects X,Y,Z, got {s:?}"))),
    }
}

pub async fn run_cmd(args: RunArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg)?;
    let mut options = task_options(&args.task, cfg, Some(run_dir.root()));
    if args.program.is_some() {
        options.program = args.program.clone();
    }
    options.passthrough |= args.passthrough;

    let mut task = build_task(&args.task, options)?;
    let report = task.run().await?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CliError::Anyhow(e.into()))?;
        println!("{json}");
    } else {
        println!(
            "task {} completed in {} ms; output in {}",
            report.task,
            report.duration_ms.unwrap_or_default(),
            report.output_dir.display()
        );
    }
    Ok(0)
}

/// Prints the input stream without running anything. The `FileDirectory`
/// line is included only when a run root is known.
pub fn render_cmd(args: TaskArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg).ok();
    let options = task_options(&args, cfg, run_dir.as_ref().map(|r| r.root()));
    let task = build_task(&args, options)?;
    let output_dir = run_dir.map(|r| r.task_dir(task.name()));
    print!("{}", task.render_input(output_dir.as_deref()));
    Ok(0)
}
