use std::time::Instant;

use tokio::io::AsyncWriteExt;

use crate::error::{AiresError, Result};
use crate::util::RingBytes;

use super::io_pump::{self, OutputStream};
use super::traits::RunnerSession;
use super::types::RunOutcome;

pub struct RunSessionArgs<'a> {
    pub session: Box<dyn RunnerSession>,
    pub stdin_payload: Option<&'a str>,
    pub capture_bytes: usize,
    pub passthrough: bool,
}

/// Feeds the payload to the child, drains its output, and waits for exit.
///
/// stdin is written on its own task while stdout/stderr are drained, so a
/// child that produces output before consuming all of its input cannot
/// deadlock on a full pipe.
pub async fn run_session(args: RunSessionArgs<'_>) -> Result<RunOutcome> {
    let RunSessionArgs {
        mut session,
        stdin_payload,
        capture_bytes,
        passthrough,
    } = args;

    let started_at = Instant::now();

    let stdout = session
        .stdout()
        .ok_or_else(|| AiresError::Runner(anyhow::anyhow!("no stdout")))?;
    let stderr = session
        .stderr()
        .ok_or_else(|| AiresError::Runner(anyhow::anyhow!("no stderr")))?;
    let mut stdin = session
        .stdin()
        .ok_or_else(|| AiresError::Runner(anyhow::anyhow!("no stdin")))?;

    let ring_out = RingBytes::new(capture_bytes);
    let ring_err = RingBytes::new(capture_bytes);
    let out_task = io_pump::spawn_pump(stdout, OutputStream::Stdout, ring_out.clone(), passthrough);
    let err_task = io_pump::spawn_pump(stderr, OutputStream::Stderr, ring_err.clone(), passthrough);

    let payload = stdin_payload.unwrap_or_default().to_owned();
    let stdin_task = tokio::spawn(async move {
        if !payload.is_empty() {
            stdin.write_all(payload.as_bytes()).await?;
        }
        stdin.shutdown().await
    });

    let code = session.wait().await?;

    match stdin_task.await {
        Ok(Ok(())) => {}
        // The child may legitimately exit without reading all of its input.
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::warn!("child closed stdin before reading all directives");
        }
        Ok(Err(e)) => {
            return Err(AiresError::StreamIo {
                stream: "stdin",
                source: e,
            })
        }
        Err(e) => return Err(AiresError::Runner(anyhow::anyhow!("stdin writer panicked: {e}"))),
    }

    for (stream, task) in [(OutputStream::Stdout, out_task), (OutputStream::Stderr, err_task)] {
        let stats = task
            .await
            .map_err(|e| AiresError::Runner(anyhow::anyhow!("output pump panicked: {e}")))??;
        tracing::debug!(stream = stream.label(), bytes = stats.bytes, lines = stats.lines, "child output drained");
    }

    let duration_ms = started_at.elapsed().as_millis() as u64;
    Ok(RunOutcome {
        exit_code: code.unwrap_or(-1),
        duration_ms: Some(duration_ms),
        stdout_tail: ring_out.to_string_lossy(),
        stderr_tail: ring_err.to_string_lossy(),
    })
}
