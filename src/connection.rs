//! Connection lifecycle: connect, disconnect and close.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::dispatcher::CallbackDispatcher;
use crate::error::{GlideError, Result, TransportError};
use crate::transport::{ReplyHandler, Transport};

/// Owns the link between a transport and the dispatcher it reports to.
pub struct ConnectionManager<T: Transport> {
    transport: Arc<T>,
    dispatcher: Arc<CallbackDispatcher>,
}

impl<T: Transport> ConnectionManager<T> {
    pub fn new(transport: Arc<T>, dispatcher: Arc<CallbackDispatcher>) -> Self {
        Self {
            transport,
            dispatcher,
        }
    }

    /// Validate `config` and hand it to the transport along with a reply
    /// handler bound to this manager's dispatcher.
    pub async fn connect(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        if self.dispatcher.is_closed() {
            return Err(GlideError::Closed);
        }

        let addr = config.primary_addr();
        info!(
            %addr,
            nodes = config.addresses.len(),
            tls = config.use_tls,
            db = config.database_id,
            "connecting"
        );
        match self.transport.connect(config, self.handler()).await {
            Ok(()) => {
                info!(%addr, "connected");
                Ok(())
            }
            Err(e) => {
                warn!(%addr, error = %e, "connect failed");
                Err(e)
            }
        }
    }

    /// A fresh handle onto this connection's reply path.
    pub fn handler(&self) -> ReplyHandler {
        ReplyHandler::new(Arc::clone(&self.dispatcher))
    }

    /// Report the link as lost: every request in flight fails with `error`.
    pub fn on_disconnect(&self, error: TransportError) {
        self.handler().on_disconnect(error);
    }

    /// Close the transport and fail whatever is still pending with
    /// [`GlideError::Closed`]. Safe to call more than once.
    pub fn close(&self) {
        if !self.dispatcher.is_closed() {
            info!(pending = self.dispatcher.pending_count(), "closing client");
        }
        // Shut down first so a disconnect raised by the closing transport
        // cannot replace `Closed` as the recorded error.
        self.dispatcher.shutdown(GlideError::Closed);
        self.transport.close();
    }

    pub fn is_closed(&self) -> bool {
        self.dispatcher.is_closed()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
