mod io_pump;
mod process;
mod resolve;
mod run;
mod traits;
pub mod types;

pub use process::ProcessRunnerPlugin;
pub use resolve::{resolve_executable, AIRES_PROGRAM, EXPORT_PROGRAM};
pub use run::{run_session, RunSessionArgs};
pub use traits::{RunnerPlugin, RunnerSession};
pub use types::{RunOutcome, RunnerStartArgs};
