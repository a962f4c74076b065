//! Line-based Console
//!
//! The game's only view of the outside world: lines come in over a channel,
//! text goes out through a writer. Standard input is read on a dedicated
//! thread so a blocked read never holds up the game loop or runtime shutdown.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Lines buffered between the reader thread and the game loop.
pub const INPUT_BUFFER: usize = 64;

/// Line input plus text output.
pub struct Console {
    input: mpsc::Receiver<String>,
    output: Box<dyn Write + Send>,
}

impl Console {
    /// Wire a console to an input channel and an output writer.
    pub fn new(input: mpsc::Receiver<String>, output: Box<dyn Write + Send>) -> Self {
        Self { input, output }
    }

    /// Console over the process's stdin and stdout.
    pub fn stdio() -> io::Result<Self> {
        let input = spawn_stdin_reader(INPUT_BUFFER)?;
        Ok(Self::new(input, Box::new(io::stdout())))
    }

    /// Write `text` followed by a newline.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Write `text` without a newline, for prompts.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Wait for the next input line.
    ///
    /// `None` once input is closed or unreadable. Cancel-safe: a line is
    /// either returned or left queued.
    pub async fn next_line(&mut self) -> Option<String> {
        self.input.recv().await
    }

    /// Drop lines that were typed while nothing was asking for input.
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while let Ok(line) = self.input.try_recv() {
            debug!(line = %line, "Discarding stale input");
            dropped += 1;
        }
        dropped
    }
}

/// Start a thread that forwards stdin lines into a channel.
///
/// The channel closes on end of input or on the first read error.
pub fn spawn_stdin_reader(capacity: usize) -> io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(capacity);

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), tx))?;

    Ok(rx)
}

/// Forward lines from `reader` until end of input, a read error, or the
/// receiver going away.
///
/// Bytes that are not UTF-8 are replaced rather than treated as a read
/// failure, so a garbled answer still reaches the validator. Must run off
/// the async runtime.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: mpsc::Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Input read failed: {}", e);
                break;
            }
        }
    }
    debug!("Input closed");
}

/// Cloneable in-memory writer.
///
/// Every clone appends to the same buffer, so a caller can hand one clone to
/// a [`Console`] and read the transcript through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryOutput {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
