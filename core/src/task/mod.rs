//! Building and running AIRES tasks.

mod builder;
mod catalog;
mod execute;
mod state;

pub use builder::{Task, TaskOptions};
pub use execute::RunReport;
pub use state::{StateTransition, TaskState, TransitionError};
