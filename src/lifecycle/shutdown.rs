//! Shutdown coordination.

use tokio::sync::broadcast;

/// Fan-out trigger for graceful shutdown.
///
/// The server subscribes before it starts serving; tests and the signal
/// task call `trigger`.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify every current subscriber. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}
