//! Boundary with the external transport.
//!
//! The transport owns the socket and the wire protocol. This crate hands it
//! [`Request`]s through [`Transport::send`] and receives replies through the
//! [`ReplyHandler`] given to it on connect.

pub mod channel;

pub use channel::{ChannelPeer, ChannelTransport, PeerEvent};

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tracing::warn;

use crate::command::{Command, RequestType};
use crate::config::ClientConfig;
use crate::dispatcher::{CallbackDispatcher, CallbackId};
use crate::error::{GlideError, Result, TransportError};
use crate::value::Value;

/// A command encoded for the transport, tagged with its correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub callback_id: CallbackId,
    pub request_type: RequestType,
    /// Full argument vector: verb first, unless this is a custom command.
    pub args: Vec<Bytes>,
}

impl Request {
    pub fn new(callback_id: CallbackId, command: &Command) -> Self {
        Self {
            callback_id,
            request_type: command.request_type(),
            args: command.to_argv(),
        }
    }

    /// Arguments as (lossy) UTF-8, for logs and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| String::from_utf8_lossy(a).into_owned())
            .collect()
    }
}

/// Interface every transport implements.
pub trait Transport: Send + Sync + 'static {
    /// Establish the connection. `handler` must be used for every reply and
    /// for reporting a lost connection.
    fn connect(
        &self,
        config: &ClientConfig,
        handler: ReplyHandler,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Hand one request to the transport. Must not wait on the network.
    fn send(&self, request: Request) -> std::result::Result<(), TransportError>;

    /// Stop sending; later `send` calls fail.
    fn close(&self);
}

/// Handle the transport uses to deliver replies and disconnects.
#[derive(Clone)]
pub struct ReplyHandler {
    dispatcher: Arc<CallbackDispatcher>,
}

impl ReplyHandler {
    pub fn new(dispatcher: Arc<CallbackDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Route one reply (or per-request transport fault) to its caller.
    /// Returns whether a pending request was completed.
    pub fn on_reply(
        &self,
        id: CallbackId,
        reply: std::result::Result<Value, TransportError>,
    ) -> bool {
        match reply {
            Ok(value) => self.dispatcher.resolve(id, value),
            Err(e) => self.dispatcher.fail(id, GlideError::Transport(e)),
        }
    }

    /// The connection is gone: fail everything in flight.
    pub fn on_disconnect(&self, error: TransportError) {
        warn!(%error, "transport disconnected");
        self.dispatcher.shutdown(GlideError::Transport(error));
    }
}

impl std::fmt::Debug for ReplyHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyHandler")
            .field("pending", &self.dispatcher.pending_count())
            .finish()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
