//! Touch batch reader for standard input
//!
//! Reads newline-delimited JSON touch batches on a dedicated thread and
//! forwards them to the dispatcher queue.

use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::touch::TouchBatch;

/// Errors that can occur in the input reader
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input reader was already started")]
    AlreadyStarted,

    #[error("failed to spawn reader thread: {0}")]
    ThreadSpawn(String),

    #[error("malformed touch batch: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads touch batches from stdin and queues them for the state machine
///
/// The queue sender is handed to the reader thread on start, so the queue
/// closes as soon as that thread finishes.
pub struct InputReader {
    batch_tx: Mutex<Option<mpsc::Sender<TouchBatch>>>,
    running: Arc<AtomicBool>,
}

impl InputReader {
    /// Create a new input reader
    pub fn new(batch_tx: mpsc::Sender<TouchBatch>) -> Self {
        Self {
            batch_tx: Mutex::new(Some(batch_tx)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start reading stdin
    pub fn start(&self) -> Result<(), InputError> {
        self.start_from(BufReader::new(std::io::stdin()))
    }

    /// Start reading from `reader`
    ///
    /// Spawns a dedicated thread that blocks on the reader. The thread exits
    /// at end of input, when the queue closes, or on the first line read
    /// after `stop()` is called. A reader can only be started once.
    pub fn start_from<R>(&self, reader: R) -> Result<(), InputError>
    where
        R: BufRead + Send + 'static,
    {
        let batch_tx = self
            .batch_tx
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or(InputError::AlreadyStarted)?;

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("touch-input".to_string())
            .spawn(move || {
                info!("input reader thread started");

                match read_batches(reader, &batch_tx, &running) {
                    Ok(count) => info!(batches = count, "input reader finished"),
                    Err(e) => error!(?e, "input reader error"),
                }

                running.store(false, Ordering::SeqCst);
                info!("input reader thread stopped");
                // Dropping the last sender closes the dispatcher queue
                drop(batch_tx);
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                InputError::ThreadSpawn(e.to_string())
            })?;

        Ok(())
    }

    /// Stop the input reader
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the reader is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Parse one input line. Blank lines carry no batch.
pub fn parse_batch(line: &str) -> Result<Option<TouchBatch>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Forward every well-formed batch from `reader`, returning how many were sent
///
/// Must not be called from within an async context.
fn read_batches<R: BufRead>(
    reader: R,
    batch_tx: &mpsc::Sender<TouchBatch>,
    running: &AtomicBool,
) -> Result<usize, InputError> {
    let mut sent = 0;

    for (index, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let batch = match parse_batch(&line?) {
            Ok(Some(batch)) => batch,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = index + 1, %e, "skipping input line");
                continue;
            }
        };

        debug!(phase = %batch.phase, touches = batch.touches.len(), "touch batch read");
        if batch_tx.blocking_send(batch).is_err() {
            warn!("failed to queue touch batch - channel closed?");
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
