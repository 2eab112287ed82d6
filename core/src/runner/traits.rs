use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use super::types::RunnerStartArgs;

/// A spawned external process with its standard streams.
#[async_trait]
pub trait RunnerSession: Send {
    fn stdin(&mut self) -> Option<Box<dyn AsyncWrite + Unpin + Send>>;
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    /// Waits for exit; `None` when the process was terminated by a signal.
    async fn wait(&mut self) -> anyhow::Result<Option<i32>>;
}

#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &RunnerStartArgs)
        -> anyhow::Result<Box<dyn RunnerSession>>;
}
