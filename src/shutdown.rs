//! Cooperative shutdown signal
//!
//! A watch-channel pair: the trigger side flips once and every receiver
//! observes it, during the inter-cycle wait or mid-cycle. A detached
//! listener task wires the trigger to ctrl-c and SIGTERM.

use tokio::sync::watch;

/// Receiving side of the shutdown signal
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Triggering side of the shutdown signal
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Create a connected trigger/receiver pair
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl Shutdown {
    /// True once shutdown has been triggered
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until shutdown is triggered.
    ///
    /// Cancellation-safe, so it can be raced in `tokio::select!` on every
    /// loop iteration. Returns immediately if already triggered.
    pub async fn wait(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                // Trigger dropped; no signal can arrive later
                break;
            }
        }
    }
}

impl ShutdownTrigger {
    /// Flip the signal; idempotent
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

/// Trigger shutdown on ctrl-c or SIGTERM.
///
/// Spawned as a detached task at startup; the daemon keeps running while
/// this listens.
pub async fn listen_for_signals(trigger: ShutdownTrigger) {
    #[cfg(unix)]
    let mut term = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(signal) => signal,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to register SIGTERM handler");
            trigger.trigger();
            return;
        }
    };

    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = term.recv() => {},
    }

    #[cfg(not(unix))]
    let _ = ctrl_c.await;

    tracing::info!("Shutdown signal received");
    trigger.trigger();
}
