//! `ci-tail tail` - stream a build log to stdout
//!
//! Runs the same fetcher as the viewer and writes every chunk as it
//! arrives. Stops on Ctrl+C or when stdout goes away.

use anyhow::{Context, Result};
use ci_tail_client::CiClient;
use ci_tail_core::{ByteCursor, FetcherConfig, TailEvent, TailFetcher};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

pub fn run(
    client: Arc<dyn CiClient>,
    build_id: &str,
    from: u64,
    plain: bool,
    config: FetcherConfig,
) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async move {
        // Stdout is written here, never from the fetch loop
        let (chunk_tx, mut chunk_rx) = mpsc::unbounded_channel::<String>();

        let fetcher =
            TailFetcher::new(client, build_id, config).starting_at(ByteCursor::new(from));
        let handle = fetcher.spawn(move |event| match event {
            TailEvent::Chunk { chunk, .. } => {
                let text = if plain {
                    strip_ansi(&chunk.output)
                } else {
                    chunk.output
                };
                let _ = chunk_tx.send(text);
            }
            TailEvent::Empty { .. } => {}
            TailEvent::FetchFailed {
                error,
                consecutive_failures,
                ..
            } => {
                log::warn!("{} ({} in a row)", error, consecutive_failures);
            }
        });

        let mut stdout = tokio::io::stdout();
        let written = tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl+C")?;
                Ok(())
            }
            result = write_chunks(&mut chunk_rx, &mut stdout) => result,
        };

        let stats = handle.shutdown().await.context("Tail task failed")?;
        log::info!(
            "Stopped at byte {} after {} polls ({} failures)",
            from + stats.bytes,
            stats.polls,
            stats.failures
        );

        finish(written)
    })
}

/// Write chunks in arrival order until the sender goes away or a write fails
async fn write_chunks<W>(rx: &mut mpsc::UnboundedReceiver<String>, out: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(text) = rx.recv().await {
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
    }
    Ok(())
}

fn finish(written: io::Result<()>) -> Result<()> {
    match written {
        // Reader went away (e.g. piped into `head`)
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(error) => Err(error).context("Failed to write to stdout"),
        Ok(()) => Ok(()),
    }
}

/// Drop ANSI escapes, keeping the line structure
fn strip_ansi(output: &str) -> String {
    output
        .split_inclusive('\n')
        .map(|raw| {
            let mut text = ci_tail_ansi::parse_line(raw).plain_text();
            if raw.ends_with('\n') {
                text.push('\n');
            }
            text
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::pin::Pin;
    use std::task::{Context as TaskContext, Poll};

    /// Writer whose reader has gone away
    struct ClosedPipe;

    impl AsyncWrite for ClosedPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn test_strip_ansi() {
        let output = "\x1b[32mok\x1b[0m\n\x1b[1;31merror\x1b[0m: boom\npartial";
        assert_eq!(strip_ansi(output), "ok\nerror: boom\npartial");
    }

    #[tokio::test]
    async fn test_chunks_are_written_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for chunk in ["step 1\n", "step 2\n", "pass"] {
            tx.send(chunk.to_string()).unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        write_chunks(&mut rx, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "step 1\nstep 2\npass");
    }

    #[tokio::test]
    async fn test_sender_is_not_blocked_by_writer() {
        // Chunks queue up while nothing is writing
        let (tx, mut rx) = mpsc::unbounded_channel();
        for i in 0..1000 {
            tx.send(format!("line {}\n", i)).unwrap();
        }
        drop(tx);

        let mut out = Vec::new();
        write_chunks(&mut rx, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1000);
    }

    #[tokio::test]
    async fn test_closed_reader_stops_quietly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send("ok\n".to_string()).unwrap();

        let written = write_chunks(&mut rx, &mut ClosedPipe).await;
        assert_eq!(written.as_ref().map_err(|e| e.kind()), Err(io::ErrorKind::BrokenPipe));
        assert!(finish(written).is_ok());

        let other: io::Result<()> = Err(io::ErrorKind::PermissionDenied.into());
        assert!(finish(other).is_err());
    }
}
