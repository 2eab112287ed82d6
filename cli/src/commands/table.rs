use std::path::PathBuf;

use zhaires_core::api::{generate_table, load_table, AppConfig, CliError};

use super::cli::TableArgs;
use super::resolve_run_dir;

pub async fn table_cmd(args: TableArgs, cfg: &AppConfig, run_dir: Option<PathBuf>) -> Result<i32, CliError> {
    let run_dir = resolve_run_dir(run_dir, cfg)?;
    let table = if args.generate {
        generate_table(&run_dir, &args.name, args.id, cfg.aires.export_program.as_deref()).await?
    } else {
        load_table(&run_dir, &args.name, args.id)?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&table).map_err(|e| CliError::Anyhow(e.into()))?;
        println!("{json}");
        return Ok(0);
    }

    println!("# table {} ({}), {} rows", table.id, table.kind, table.rows.len());
    println!("# {}", table.columns.join("\t"));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
        println!("{}", cells.join("\t"));
    }
    Ok(0)
}
