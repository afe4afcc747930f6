//! ShutdownSignal - single-shot, idempotent termination request

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Shutdown request shared by every trigger source and waiter
///
/// Once triggered it stays triggered; later triggers are no-ops.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tx: watch::Sender<bool>,
    triggered: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                tx,
                triggered: AtomicBool::new(false),
            }),
        }
    }

    /// Request shutdown. Safe from any thread, any number of times.
    pub fn trigger(&self) {
        if !self.inner.triggered.swap(true, Ordering::SeqCst) {
            info!("shutdown requested");
        }
        self.inner.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.inner.tx.borrow()
    }

    /// Wait until triggered; returns at once if it already was
    pub async fn wait(&self) {
        let mut rx = self.inner.tx.subscribe();
        // The sender lives in `inner`, so the channel cannot close under us
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Trigger on the first Ctrl-C (SIGINT)
    ///
    /// Must be called inside a tokio runtime.
    pub fn trigger_on_ctrl_c(&self) -> JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received");
                    signal.trigger();
                }
                Err(e) => error!(error = %e, "failed to listen for interrupt"),
            }
        })
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
