//! Persistence synchronizer: debounced, coalescing autosave.
//!
//! Decouples "the user typed a character" from "a write was issued". Each
//! editing session owns one synchronizer task running the state machine
//!
//! ```text
//! Idle -> PendingWrite -> Writing -> (Idle | WriteFailed)
//! ```
//!
//! Every submitted snapshot (re)starts the debounce timer; a snapshot
//! arriving while one is already pending replaces it rather than queuing a
//! second write. Timer expiry re-encodes the model and issues exactly one
//! write to the backend, keyed by tenant. The task is sequential, so at
//! most one write is ever in flight per tenant.
//!
//! Failures are surfaced as [`SyncEvent`]s and never block further editing:
//! the next edit moves back to `PendingWrite` and retries.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::{debug, error, info};

use vitrine_core::{ShopConfig, TenantKey};

use crate::backend::DocumentBackend;
use crate::normalize;

/// Default debounce window between the last edit and the write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Synchronizer state, observable through [`SyncHandle::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing to write.
    Idle,
    /// An edit is waiting out the debounce window.
    PendingWrite,
    /// A write is in flight.
    Writing,
    /// The last write failed; the next edit retries.
    WriteFailed,
}

/// User-visible outcome of a write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The document was persisted.
    Saved,
    /// The write failed; transient and retryable, edits are not rolled back.
    WriteFailed { message: String },
    /// The local store is full; actionable (remove large embedded media),
    /// not a generic failure.
    StorageFull,
}

/// Tuning knobs for the synchronizer.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Debounce window between the last edit and the write.
    pub debounce: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Handle held by the editing session.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<ShopConfig>,
    state: watch::Receiver<SyncState>,
}

impl SyncHandle {
    /// Submit the latest model snapshot for (debounced) persistence.
    ///
    /// Coalesces: a snapshot submitted while one is pending replaces it.
    pub fn submit(&self, config: ShopConfig) {
        // The task only stops when every handle is gone, so a send failure
        // means shutdown is already underway.
        let _ = self.tx.send(config);
    }

    /// Current synchronizer state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        *self.state.borrow()
    }
}

/// Spawn the synchronizer task for one tenant.
///
/// `document_exists` selects insert-vs-update for the first write: an
/// unknown tenant is not an error, its first save performs an insert.
/// Returns the submit handle and the event stream.
pub fn spawn<B: DocumentBackend>(
    backend: B,
    tenant: TenantKey,
    document_exists: bool,
    options: SyncOptions,
) -> (SyncHandle, mpsc::UnboundedReceiver<SyncEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SyncState::Idle);
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(run(
        backend,
        tenant,
        document_exists,
        options,
        rx,
        state_tx,
        event_tx,
    ));

    (
        SyncHandle {
            tx,
            state: state_rx,
        },
        event_rx,
    )
}

async fn run<B: DocumentBackend>(
    backend: B,
    tenant: TenantKey,
    mut exists: bool,
    options: SyncOptions,
    mut edits: mpsc::UnboundedReceiver<ShopConfig>,
    state: watch::Sender<SyncState>,
    events: mpsc::UnboundedSender<SyncEvent>,
) {
    let mut closing = false;

    while !closing {
        // Idle (or WriteFailed): wait for the next edit.
        let Some(mut latest) = edits.recv().await else {
            break;
        };
        let _ = state.send(SyncState::PendingWrite);

        // Debounce: every further edit replaces the snapshot and restarts
        // the timer. Channel close flushes immediately.
        loop {
            let sleep = time::sleep(options.debounce);
            tokio::pin!(sleep);
            tokio::select! {
                () = &mut sleep => break,
                next = edits.recv() => match next {
                    Some(config) => {
                        debug!(tenant = %tenant, "coalescing edit into pending write");
                        latest = config;
                    }
                    None => {
                        closing = true;
                        break;
                    }
                },
            }
        }

        let _ = state.send(SyncState::Writing);
        let document = normalize::encode(&latest);
        let result = if exists {
            backend.update(&tenant, &document).await
        } else {
            backend.insert(&tenant, &document).await
        };

        match result {
            Ok(()) => {
                exists = true;
                let _ = state.send(SyncState::Idle);
                let _ = events.send(SyncEvent::Saved);
                info!(tenant = %tenant, "shop document saved");
            }
            Err(err) if err.is_storage_full() => {
                let _ = state.send(SyncState::WriteFailed);
                let _ = events.send(SyncEvent::StorageFull);
                error!(tenant = %tenant, error = %err, "local storage full");
            }
            Err(err) => {
                let _ = state.send(SyncState::WriteFailed);
                let _ = events.send(SyncEvent::WriteFailed {
                    message: err.to_string(),
                });
                error!(tenant = %tenant, error = %err, "shop document write failed");
            }
        }
    }
}
