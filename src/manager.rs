//! Command manager: pairs a command with a decoder and a correlation slot.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tracing::{trace, warn};

use crate::command::Command;
use crate::decode::Decoder;
use crate::dispatcher::{CallbackDispatcher, CallbackId, Completion};
use crate::error::{GlideError, Result};
use crate::transport::{Request, Transport};
use crate::value::Value;

/// Submits commands to the transport and hands back awaitable responses.
pub struct CommandManager<T: Transport> {
    dispatcher: Arc<CallbackDispatcher>,
    transport: Arc<T>,
}

impl<T: Transport> CommandManager<T> {
    pub fn new(dispatcher: Arc<CallbackDispatcher>, transport: Arc<T>) -> Self {
        Self {
            dispatcher,
            transport,
        }
    }

    /// Register a correlation id, send the command once, and return a
    /// response that decodes the reply with `decoder`.
    ///
    /// Never waits: registration or send failures come back as an already
    /// failed [`Response`].
    pub fn submit<R>(&self, command: Command, decoder: Decoder<R>) -> Response<R> {
        let (id, completion) = match self.dispatcher.register() {
            Ok(slot) => slot,
            Err(e) => return Response::failed(e),
        };

        trace!(id, request_type = ?command.request_type(), "submitting");
        if let Err(e) = self.transport.send(Request::new(id, &command)) {
            warn!(id, error = %e, "send failed");
            self.dispatcher.fail(id, GlideError::Transport(e));
        }

        Response {
            state: State::Pending {
                id,
                completion,
                decoder,
            },
        }
    }

    /// Fail request `id` early with [`GlideError::Cancelled`].
    pub fn cancel(&self, id: CallbackId) -> bool {
        self.dispatcher.cancel(id)
    }

    pub fn dispatcher(&self) -> &Arc<CallbackDispatcher> {
        &self.dispatcher
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }
}

impl<T: Transport> Clone for CommandManager<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            transport: Arc::clone(&self.transport),
        }
    }
}

enum State<R> {
    Failed(GlideError),
    Pending {
        id: CallbackId,
        completion: Completion,
        decoder: Decoder<R>,
    },
    Done,
}

/// The eventual, decoded result of one submitted command.
///
/// Dropping a `Response` does not cancel the request: its entry stays in
/// the dispatcher until the transport answers or the client shuts down.
#[must_use = "a Response does nothing unless awaited"]
pub struct Response<R> {
    state: State<R>,
}

impl<R> Response<R> {
    /// A response that fails immediately with `error`.
    pub fn failed(error: GlideError) -> Self {
        Self {
            state: State::Failed(error),
        }
    }

    /// Correlation id, if the command reached the dispatcher.
    pub fn callback_id(&self) -> Option<CallbackId> {
        match &self.state {
            State::Pending { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl<R> Future for Response<R> {
    type Output = Result<R>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, State::Done) {
            State::Failed(e) => Poll::Ready(Err(e)),
            State::Pending {
                id,
                mut completion,
                decoder,
            } => {
                let outcome = match Pin::new(&mut completion).poll(cx) {
                    Poll::Ready(outcome) => outcome,
                    Poll::Pending => {
                        this.state = State::Pending {
                            id,
                            completion,
                            decoder,
                        };
                        return Poll::Pending;
                    }
                };
                Poll::Ready(match outcome {
                    // Sender dropped without shutdown: the dispatcher is gone.
                    Err(_) => Err(GlideError::Closed),
                    Ok(Err(e)) => Err(e),
                    Ok(Ok(Value::Error(msg))) => Err(GlideError::redis(msg)),
                    Ok(Ok(value)) => decoder(value),
                })
            }
            State::Done => panic!("Response polled after completion"),
        }
    }
}

impl<R> std::fmt::Debug for Response<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            State::Failed(e) => f.debug_tuple("Response::Failed").field(e).finish(),
            State::Pending { id, .. } => f.debug_tuple("Response::Pending").field(id).finish(),
            State::Done => f.write_str("Response::Done"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
