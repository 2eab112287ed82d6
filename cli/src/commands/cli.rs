use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "zhaires", version, about = "Run and load AIRES/ZHAireS simulations")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Run root; defaults to the directory named by $AIRES_RUN_DIR.
    #[arg(long, global = true)]
    pub run_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Configuration shared by `run` and `render`.
///
/// Applied in this order: `--input`, typed flags, then `--directive` lines.
#[derive(ClapArgs, Debug, Clone)]
pub struct TaskArgs {
    /// Task name; output lands in `<run-dir>/<NAME>/`.
    pub name: String,

    /// AIRES command file whose lines are appended first.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub particle: Option<String>,

    /// Primary energy as "VALUE UNIT", e.g. "1 EeV".
    #[arg(long)]
    pub energy: Option<String>,

    /// Zenith angle in degrees.
    #[arg(long)]
    pub zenith: Option<f64>,

    /// Magnetic azimuth in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f64>,

    /// Enable ZHAireS radio emission.
    #[arg(long)]
    pub zhaires: bool,

    #[arg(long)]
    pub fresnel_time: bool,

    /// Antenna position "X,Y,Z" in metres. Can be specified multiple times.
    #[arg(long = "antenna", action = clap::ArgAction::Append, allow_hyphen_values = true)]
    pub antennas: Vec<String>,

    #[arg(long)]
    pub seed: Option<f64>,

    /// Raw directive line appended verbatim. Can be specified multiple times.
    #[arg(short = 'd', long = "directive", action = clap::ArgAction::Append)]
    pub directives: Vec<String>,

    /// Log each directive as it is appended.
    #[arg(long)]
    pub echo: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Path or name of the Aires executable.
    #[arg(long)]
    pub program: Option<String>,

    /// Forward the simulator's stdout/stderr to this terminal.
    #[arg(long)]
    pub passthrough: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LoadArgs {
    pub name: String,

    /// Neither read nor write the waveform cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Print per-antenna traces as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct NameArgs {
    pub name: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TableArgs {
    pub name: String,

    /// Table ID, e.g. 1001.
    pub id: u32,

    /// Run AiresExport before loading.
    #[arg(long)]
    pub generate: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a task and run the simulator.
    Run(RunArgs),
    /// Print the input stream a task would send to the simulator.
    Render(TaskArgs),
    /// Load the waveforms of a finished task.
    Load(LoadArgs),
    /// Print the shower summary of a finished task.
    Summary(NameArgs),
    /// Load (or generate) an AIRES export table.
    Table(TableArgs),
    /// Report whether a task has output in the run directory.
    Status(NameArgs),
}
