//! Shutdown Signal
//!
//! Fan-in point for process interrupts. Any number of triggers, one
//! observable "stop now" for the game loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

/// Cloneable shutdown handle.
///
/// Triggering is idempotent: only the first call broadcasts.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a new, untriggered handle.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown.
    ///
    /// Returns `true` for the call that actually flipped the flag.
    pub fn trigger(&self) -> bool {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return false;
        }
        // No receivers just means nobody is listening yet.
        let _ = self.tx.send(());
        true
    }

    /// Subscribe to the shutdown broadcast.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
            triggered: self.triggered.clone(),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side held by the game loop.
#[derive(Debug)]
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownListener {
    /// Wait until shutdown is requested.
    ///
    /// Returns immediately if it already was, even when the trigger happened
    /// before this listener subscribed. Pends forever once every [`Shutdown`]
    /// handle is gone, since nothing can trigger any more. Cancel-safe.
    pub async fn requested(&mut self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        match self.rx.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => std::future::pending().await,
        }
    }

    /// Non-blocking check.
    pub fn is_requested(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}
