use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;

use crate::error::AiresError;
use crate::util::RingBytes;

/// Which child pipe a pump drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub bytes: u64,
    pub lines: u64,
}

/// Drains one child pipe; with `passthrough` its bytes are copied to the
/// matching stream of this process.
pub fn spawn_pump<R>(
    rd: R,
    stream: OutputStream,
    ring: Arc<RingBytes>,
    passthrough: bool,
) -> JoinHandle<Result<PumpStats, AiresError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        match (stream, passthrough) {
            (OutputStream::Stdout, true) => drain(rd, Some(tokio::io::stdout()), stream, &ring).await,
            (OutputStream::Stderr, true) => drain(rd, Some(tokio::io::stderr()), stream, &ring).await,
            (_, false) => drain(rd, None::<tokio::io::Sink>, stream, &ring).await,
        }
    })
}

async fn drain<R, W>(
    rd: R,
    mut echo: Option<W>,
    stream: OutputStream,
    ring: &RingBytes,
) -> Result<PumpStats, AiresError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let label = stream.label();
    let io_err = |source| AiresError::StreamIo { stream: label, source };

    let mut reader = BufReader::with_capacity(16 * 1024, rd);
    let mut line = Vec::with_capacity(256);
    let mut stats = PumpStats::default();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).await.map_err(io_err)?;
        if n == 0 {
            break;
        }
        ring.push(&line);
        if let Some(wr) = echo.as_mut() {
            wr.write_all(&line).await.map_err(io_err)?;
        }
        stats.bytes += n as u64;
        stats.lines += 1;

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches(['\n', '\r']);
        if !text.is_empty() {
            tracing::trace!(target: "zhaires.child", stream = label, "{text}");
        }
    }

    if let Some(wr) = echo.as_mut() {
        let _ = wr.flush().await;
    }
    Ok(stats)
}
