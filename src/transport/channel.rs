//! In-process transport over tokio channels.
//!
//! [`ChannelTransport`] is the client side; [`ChannelPeer`] is handed to
//! whatever produces replies (an embedded engine, a bridge task, a test).
//! The peer sees every connect, request and close as a [`PeerEvent`] and
//! answers through [`ChannelPeer::reply`] in any order it likes.

use std::sync::Arc;

use parking_lot::Mutex as SyncMutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::dispatcher::CallbackId;
use crate::error::{Result, TransportError};
use crate::transport::{ReplyHandler, Request, Transport};
use crate::value::Value;

/// What the peer observes.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    Connect(ClientConfig),
    Request(Request),
    Closed,
}

#[derive(Default)]
struct LinkState {
    handler: Option<ReplyHandler>,
    connected: bool,
    closed: bool,
}

/// Client half of an in-process link.
pub struct ChannelTransport {
    events: mpsc::UnboundedSender<PeerEvent>,
    state: Arc<SyncMutex<LinkState>>,
}

/// Peer half of an in-process link.
pub struct ChannelPeer {
    events: mpsc::UnboundedReceiver<PeerEvent>,
    state: Arc<SyncMutex<LinkState>>,
}

impl ChannelTransport {
    /// Create a linked transport/peer pair. The transport still needs
    /// [`Transport::connect`] before it accepts requests.
    pub fn pair() -> (Self, ChannelPeer) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(SyncMutex::new(LinkState::default()));
        (
            Self {
                events: tx,
                state: Arc::clone(&state),
            },
            ChannelPeer { events: rx, state },
        )
    }
}

impl Transport for ChannelTransport {
    async fn connect(&self, config: &ClientConfig, handler: ReplyHandler) -> Result<()> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Err(TransportError::Closed.into());
            }
            state.handler = Some(handler);
            state.connected = true;
        }
        self.events
            .send(PeerEvent::Connect(config.clone()))
            .map_err(|_| TransportError::ConnectionLost("peer dropped".into()))?;
        Ok(())
    }

    fn send(&self, request: Request) -> std::result::Result<(), TransportError> {
        {
            let state = self.state.lock();
            if state.closed {
                return Err(TransportError::Closed);
            }
            if !state.connected {
                return Err(TransportError::NotConnected);
            }
        }
        self.events
            .send(PeerEvent::Request(request))
            .map_err(|_| TransportError::ConnectionLost("peer dropped".into()))
    }

    fn close(&self) {
        {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            state.connected = false;
            // A peer dropped after a deliberate close is not a disconnect.
            state.handler = None;
        }
        let _ = self.events.send(PeerEvent::Closed);
    }
}

impl ChannelPeer {
    /// Next event, or `None` once the transport is dropped.
    pub async fn next_event(&mut self) -> Option<PeerEvent> {
        self.events.recv().await
    }

    /// Next request, skipping connect events. `None` once closed.
    pub async fn next_request(&mut self) -> Option<Request> {
        loop {
            match self.events.recv().await? {
                PeerEvent::Request(req) => return Some(req),
                PeerEvent::Connect(_) => continue,
                PeerEvent::Closed => return None,
            }
        }
    }

    /// Non-blocking variant of [`ChannelPeer::next_event`].
    pub fn try_next_event(&mut self) -> Option<PeerEvent> {
        self.events.try_recv().ok()
    }

    /// Deliver a reply for `id`. Returns whether a waiting caller got it.
    pub fn reply(&self, id: CallbackId, value: Value) -> bool {
        self.handler()
            .map(|h| h.on_reply(id, Ok(value)))
            .unwrap_or(false)
    }

    /// Report a transport fault for a single request.
    pub fn fail(&self, id: CallbackId, error: TransportError) -> bool {
        self.handler()
            .map(|h| h.on_reply(id, Err(error)))
            .unwrap_or(false)
    }

    /// Drop the link, failing every request still in flight.
    pub fn disconnect(&self, error: TransportError) {
        let handler = {
            let mut state = self.state.lock();
            state.connected = false;
            state.closed = true;
            state.handler.take()
        };
        if let Some(h) = handler {
            h.on_disconnect(error);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    fn handler(&self) -> Option<ReplyHandler> {
        self.state.lock().handler.clone()
    }
}

impl Drop for ChannelPeer {
    fn drop(&mut self) {
        if self.state.lock().handler.is_some() {
            debug!("channel peer dropped");
            self.disconnect(TransportError::ConnectionLost("peer dropped".into()));
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
