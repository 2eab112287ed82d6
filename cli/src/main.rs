use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use zhaires_cli::commands::{cli, load, run, table};
use zhaires_core::api::{AiresError, AppConfig, CliError, LoggingConfig};
use zhaires_core::config;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = match &args.config {
        Some(path) => config::load_from_path(path).map(config::apply_env_overrides),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Command)?;
    tracing::debug!(run_dir = ?args.run_dir, cache = cfg.loader.cache, "configuration loaded");

    dispatch(args, &cfg).await
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config / invalid task parameters
    // 12: environment (run directory, executable)
    // 20: simulator process or IO error
    // 30: missing or malformed output
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Aires(ae) => match ae {
            AiresError::InvalidParameter { .. }
            | AiresError::InvalidUnit { .. }
            | AiresError::InvalidState { .. } => 11,
            AiresError::ExecutableNotFound { .. } | AiresError::MissingRunDirectory { .. } => 12,
            AiresError::ProcessFailure { .. }
            | AiresError::StreamIo { .. }
            | AiresError::Io { .. }
            | AiresError::Runner(_) => 20,
            AiresError::OutputNotFound { .. }
            | AiresError::MalformedOutput { .. }
            | AiresError::Cache(_) => 30,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(args: cli::Args, cfg: &AppConfig) -> Result<i32, CliError> {
    let run_dir = args.run_dir;
    match args.command {
        cli::Commands::Run(run_args) => run::run_cmd(run_args, cfg, run_dir).await,
        cli::Commands::Render(task_args) => run::render_cmd(task_args, cfg, run_dir),
        cli::Commands::Load(load_args) => load::load_cmd(load_args, cfg, run_dir),
        cli::Commands::Summary(name_args) => load::summary_cmd(name_args, cfg, run_dir),
        cli::Commands::Status(name_args) => load::status_cmd(name_args, cfg, run_dir),
        cli::Commands::Table(table_args) => table::table_cmd(table_args, cfg, run_dir).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("zhaires"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("zhaires.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_errors_map_to_30() {
        let e = CliError::Aires(AiresError::OutputNotFound {
            task: "t1".into(),
            path: "/runs/t1".into(),
        });
        assert_eq!(exit_code_for_error(&e), 30);
    }

    #[test]
    fn environment_errors_map_to_12() {
        let e = CliError::Aires(AiresError::ExecutableNotFound {
            program: "Aires".into(),
        });
        assert_eq!(exit_code_for_error(&e), 12);
    }

    #[test]
    fn process_failure_maps_to_20() {
        let e = CliError::Aires(AiresError::ProcessFailure {
            task: "t1".into(),
            exit_code: 1,
            stdout: String::new(),
            stderr: String::new(),
        });
        assert_eq!(exit_code_for_error(&e), 20);
    }
}
