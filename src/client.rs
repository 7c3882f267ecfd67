//! Async Redis client over a pluggable [`Transport`].
//!
//! Commands are grouped into the traits in [`crate::commands`]; each call
//! builds a [`Command`], submits it through the [`CommandManager`] and
//! returns a [`Response`] that resolves once the transport answers.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use crate::command::{Command, RequestType};
use crate::commands::{BaseCommands, ConnectionCommands, ServerCommands, StringCommands};
use crate::config::ClientConfig;
use crate::connection::ConnectionManager;
use crate::decode;
use crate::dispatcher::CallbackDispatcher;
use crate::error::Result;
use crate::manager::{CommandManager, Response};
use crate::options::{InfoOptions, SetOptions};
use crate::transport::Transport;
use crate::value::Value;

// ── Client ─────────────────────────────────────────────────────────

/// A connected client. Cheap to share behind an `Arc`; every method takes
/// `&self` and any number of requests may be in flight at once.
pub struct Client<T: Transport> {
    connection: ConnectionManager<T>,
    commands: CommandManager<T>,
    /// Stash the address for Debug.
    addr: String,
}

impl<T: Transport> Client<T> {
    /// Connect `transport` using `config`.
    pub async fn connect(config: ClientConfig, transport: T) -> Result<Self> {
        let dispatcher = Arc::new(CallbackDispatcher::new(config.max_pending));
        let transport = Arc::new(transport);
        let connection = ConnectionManager::new(Arc::clone(&transport), Arc::clone(&dispatcher));
        connection.connect(&config).await?;

        Ok(Self {
            connection,
            commands: CommandManager::new(dispatcher, transport),
            addr: config.primary_addr(),
        })
    }

    /// Close the connection. Requests still in flight fail with
    /// [`GlideError::Closed`](crate::error::GlideError::Closed).
    pub fn close(&self) {
        self.connection.close();
    }

    pub fn is_closed(&self) -> bool {
        self.connection.is_closed()
    }

    /// The underlying command manager, for submitting prebuilt commands.
    pub fn manager(&self) -> &CommandManager<T> {
        &self.commands
    }

    fn submit<R>(&self, command: Command, decoder: decode::Decoder<R>) -> Response<R> {
        self.commands.submit(command, decoder)
    }
}

impl<T: Transport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("addr", &self.addr)
            .field("pending", &self.commands.dispatcher().pending_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

// ── Command groups ─────────────────────────────────────────────────

impl<T: Transport> BaseCommands for Client<T> {
    fn custom_command(&self, args: &[&str]) -> Response<Value> {
        let args = args.iter().map(|a| Bytes::copy_from_slice(a.as_bytes()));
        self.submit(Command::custom(args), decode::as_object)
    }
}

impl<T: Transport> ConnectionCommands for Client<T> {
    fn ping(&self) -> Response<String> {
        self.submit(Command::new(RequestType::Ping), decode::as_string)
    }

    fn ping_message(&self, message: &str) -> Response<String> {
        let cmd = Command::new(RequestType::Ping).arg(owned(message));
        self.submit(cmd, decode::as_string)
    }
}

impl<T: Transport> ServerCommands for Client<T> {
    fn info(&self) -> Response<HashMap<String, Value>> {
        self.submit(Command::new(RequestType::Info), decode::as_map)
    }

    fn info_with_options(&self, options: &InfoOptions) -> Response<HashMap<String, Value>> {
        let cmd = Command::new(RequestType::Info).args(options.to_args());
        self.submit(cmd, decode::as_map)
    }
}

impl<T: Transport> StringCommands for Client<T> {
    fn get(&self, key: &str) -> Response<Option<String>> {
        let cmd = Command::new(RequestType::GetString).arg(owned(key));
        self.submit(cmd, decode::as_optional_string)
    }

    fn set(&self, key: &str, value: &str) -> Response<()> {
        let cmd = Command::new(RequestType::SetString)
            .arg(owned(key))
            .arg(owned(value));
        self.submit(cmd, decode::as_void)
    }

    fn set_with_options(
        &self,
        key: &str,
        value: &str,
        options: &SetOptions,
    ) -> Response<Option<String>> {
        let extra = match options.to_args() {
            Ok(extra) => extra,
            Err(e) => return Response::failed(e),
        };
        let cmd = Command::new(RequestType::SetString)
            .arg(owned(key))
            .arg(owned(value))
            .args(extra);
        self.submit(cmd, decode::as_optional_string)
    }
}

#[inline]
fn owned(s: &str) -> Bytes {
    Bytes::copy_from_slice(s.as_bytes())
}

// ── Tests ──────────────────────────────────────────────────────────
