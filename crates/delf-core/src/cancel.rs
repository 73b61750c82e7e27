//! Caller-driven cancellation of in-flight backend calls.

use tokio::sync::watch;

/// Create a connected handle/signal pair.
pub fn cancellation() -> (CancellationHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancellationHandle { tx }, CancelSignal { rx: Some(rx) })
}

/// Held by the caller; [`cancel`](Self::cancel) aborts every call watching a
/// signal created from it. Dropping the handle does not cancel anything.
#[derive(Debug)]
pub struct CancellationHandle {
    tx: watch::Sender<bool>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Another signal connected to this handle.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: Some(self.tx.subscribe()),
        }
    }
}

/// Observed by the pipeline while a backend call is in flight.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once the connected handle has cancelled; pends forever otherwise.
    pub async fn cancelled(&self) {
        let Some(rx) = &self.rx else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Handle dropped without cancelling.
            std::future::pending::<()>().await;
        }
    }
}
