//! Callback dispatcher: correlates outgoing requests with their replies.
//!
//! Every submitted request gets a correlation id and a single-assignment
//! completion slot (a `oneshot` sender) stored in the pending table. The
//! transport's reader path later completes the slot through [`resolve`] or
//! [`fail`]; a whole-connection failure completes all of them through
//! [`shutdown`].
//!
//! The table sits behind a `parking_lot::Mutex` held only for the O(1)
//! lookup or insertion; completion slots are always fired after the lock is
//! released.
//!
//! [`resolve`]: CallbackDispatcher::resolve
//! [`fail`]: CallbackDispatcher::fail
//! [`shutdown`]: CallbackDispatcher::shutdown

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex as SyncMutex;
use tokio::sync::oneshot;
use tracing::{debug, info, trace, warn};

use crate::error::{GlideError, Result};
use crate::value::Value;

/// Identifier tying one outgoing request to its reply.
pub type CallbackId = u32;

/// Receiving half of a completion slot.
pub type Completion = oneshot::Receiver<Result<Value>>;

/// Default cap on simultaneously reserved correlation ids.
pub const DEFAULT_MAX_PENDING: usize = 65_536;

struct Table {
    next_id: CallbackId,
    pending: HashMap<CallbackId, oneshot::Sender<Result<Value>>>,
    /// Cancelled ids whose late reply has not arrived yet. Reserved so a
    /// late reply can never complete a newer request.
    cancelled: HashSet<CallbackId>,
    /// Set by the first `shutdown`; later registrations fail with it.
    closed: Option<GlideError>,
}

/// Pending-request table plus id allocator.
pub struct CallbackDispatcher {
    table: SyncMutex<Table>,
    max_pending: usize,
    anomalies: AtomicU64,
}

impl CallbackDispatcher {
    /// Create a dispatcher allowing at most `max_pending` reserved ids.
    pub fn new(max_pending: usize) -> Self {
        Self::starting_at(max_pending, 0)
    }

    fn starting_at(max_pending: usize, first_id: CallbackId) -> Self {
        Self {
            table: SyncMutex::new(Table {
                next_id: first_id,
                pending: HashMap::new(),
                cancelled: HashSet::new(),
                closed: None,
            }),
            max_pending,
            anomalies: AtomicU64::new(0),
        }
    }

    /// Allocate a fresh correlation id and its completion slot.
    ///
    /// Fails with [`GlideError::Exhausted`] when the table is full or the
    /// counter has wrapped onto an id that is still reserved, and with the
    /// shutdown error once the dispatcher is closed.
    pub fn register(&self) -> Result<(CallbackId, Completion)> {
        let mut table = self.table.lock();

        if let Some(err) = &table.closed {
            return Err(err.clone());
        }

        let reserved = table.pending.len() + table.cancelled.len();
        if reserved >= self.max_pending {
            warn!(reserved, max = self.max_pending, "pending table full");
            return Err(GlideError::Exhausted(format!(
                "{reserved} requests already in flight"
            )));
        }

        let id = table.next_id;
        table.next_id = id.wrapping_add(1);
        // Only this allocation fails; the counter moves on so one long-lived
        // request cannot block every later registration.
        if table.pending.contains_key(&id) || table.cancelled.contains(&id) {
            warn!(id, "correlation id still in flight after counter wraparound");
            return Err(GlideError::Exhausted(format!("id {id} is still in flight")));
        }

        let (tx, rx) = oneshot::channel();
        table.pending.insert(id, tx);
        trace!(id, "registered");
        Ok((id, rx))
    }

    /// Complete `id` with a reply. Returns `false` when no pending entry
    /// matched; such replies are logged and dropped.
    pub fn resolve(&self, id: CallbackId, value: Value) -> bool {
        self.complete(id, Ok(value))
    }

    /// Complete `id` with an error. Same matching rules as [`resolve`].
    ///
    /// [`resolve`]: CallbackDispatcher::resolve
    pub fn fail(&self, id: CallbackId, error: GlideError) -> bool {
        self.complete(id, Err(error))
    }

    /// Fail a pending request early with [`GlideError::Cancelled`].
    ///
    /// The id stays reserved until the transport's late reply for it arrives
    /// (it is then absorbed silently) or until shutdown.
    pub fn cancel(&self, id: CallbackId) -> bool {
        let sender = {
            let mut table = self.table.lock();
            let Some(tx) = table.pending.remove(&id) else {
                return false;
            };
            table.cancelled.insert(id);
            tx
        };
        debug!(id, "cancelled");
        let _ = sender.send(Err(GlideError::Cancelled));
        true
    }

    /// Fail every pending request with `error` and refuse new ones.
    ///
    /// Idempotent: the first error is kept, later calls find nothing pending.
    pub fn shutdown(&self, error: GlideError) {
        let (error, drained) = {
            let mut table = self.table.lock();
            let error = table.closed.get_or_insert(error).clone();
            table.cancelled.clear();
            let drained: Vec<_> = table.pending.drain().collect();
            (error, drained)
        };
        if !drained.is_empty() {
            info!(pending = drained.len(), %error, "failing pending requests on shutdown");
        }
        for (_, tx) in drained {
            let _ = tx.send(Err(error.clone()));
        }
    }

    /// Number of requests waiting for a reply.
    pub fn pending_count(&self) -> usize {
        self.table.lock().pending.len()
    }

    /// Number of replies dropped because their id was unknown or had
    /// already been completed.
    pub fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    /// Whether `shutdown` has run.
    pub fn is_closed(&self) -> bool {
        self.table.lock().closed.is_some()
    }

    fn complete(&self, id: CallbackId, outcome: Result<Value>) -> bool {
        let sender = {
            let mut table = self.table.lock();
            match table.pending.remove(&id) {
                Some(tx) => tx,
                None => {
                    if table.cancelled.remove(&id) {
                        debug!(id, "late reply for cancelled request dropped");
                    } else if table.closed.is_some() {
                        debug!(id, "reply after shutdown dropped");
                    } else {
                        self.anomalies.fetch_add(1, Ordering::Relaxed);
                        warn!(id, "reply for unknown or already completed request dropped");
                    }
                    return false;
                }
            }
        };

        trace!(id, ok = outcome.is_ok(), "completing");
        if sender.send(outcome).is_err() {
            debug!(id, "caller went away before completion");
        }
        true
    }
}

impl Default for CallbackDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
