use std::path::PathBuf;

use serde::Serialize;
use zhaires_core::api::{AntennaTraces, AppConfig, CliError, OutputLoader, ShowerSummary, TableSource};

use super::cli::{LoadArgs, NameArgs};
use super::resolve_run_dir;

#[derive(Serialize)]
struct LoadJson<'a> {
    task: &'a str,
    source: &'static str,
    summary: &'a ShowerSummary,
    antennas: Vec<AntennaTraces>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Anyhow(e.into()))
}

pub fn load_cmd(args: LoadArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg)?;
    let mut loader = OutputLoader::from_config(run_dir, &cfg.loader);
    if args.no_cache {
        loader = loader.with_cache(false);
    }
    let loaded = loader.load(&args.name)?;
    let source = match loaded.source {
        TableSource::Cache => "cache",
        TableSource::Parsed => "parsed",
    };
    let table = &loaded.table;

    if args.json {
        println!(
            "{}",
            to_json(&LoadJson {
                task: &args.name,
                source,
                summary: table.summary(),
                antennas: table.antenna_traces(),
            })?
        );
    } else {
        println!(
            "{}: {} samples from {} antennas ({source})",
            args.name,
            table.len(),
            table.n_antennas()
        );
        for tr in table.antenna_traces() {
            let peak = tr
                .ex
                .iter()
                .zip(&tr.ey)
                .zip(&tr.ez)
                .map(|((x, y), z)| (x * x + y * y + z * z).sqrt())
                .fold(0.0f64, f64::max);
            println!(
                "  antenna {:>3} at ({:.1}, {:.1}, {:.1}) m: {} samples, peak |E| {:.3e} V/m",
                tr.antenna,
                tr.position.0,
                tr.position.1,
                tr.position.2,
                tr.t.len(),
                peak
            );
        }
    }
    Ok(0)
}

pub fn summary_cmd(args: NameArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg)?;
    let summary = OutputLoader::new(run_dir).load_summary(&args.name)?;

    if args.json {
        println!("{}", to_json(&summary)?);
        return Ok(0);
    }

    println!("energy    {} EeV", summary.energy);
    if let Some(p) = &summary.particle {
        println!("particle  {p}");
    }
    println!("zenith    {} deg", summary.zenith);
    println!("azimuth   {} deg", summary.azimuth);
    println!("site      lat {} deg, lon {} deg, ground {} m", summary.lat, summary.lon, summary.ground);
    println!(
        "field     {} uT, I {} deg, D {} deg",
        summary.mag_str, summary.mag_inc, summary.mag_dec
    );
    if let Some(xmax) = summary.xmax {
        println!("xmax      {xmax} g/cm2");
    }
    Ok(0)
}

/// Exit code 0 when the task has output, 1 otherwise.
pub fn status_cmd(args: NameArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg)?;
    let exists = run_dir.exists(&args.name);
    let cached = run_dir.cache_file(&args.name).is_file();

    if args.json {
        println!(
            "{}",
            to_json(&serde_json::json!({
                "task": args.name,
                "exists": exists,
                "cached": cached,
                "dir": run_dir.task_dir(&args.name),
            }))?
        );
    } else if exists {
        println!("{}: present{}", args.name, if cached { " (cached)" } else { "" });
    } else {
        println!("{}: not found in {}", args.name, run_dir.root().display());
    }
    Ok(if exists { 0 } else { 1 })
}
