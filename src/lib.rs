//! Command construction, request correlation and typed response decoding
//! for an async Redis client.
//!
//! A [`Client`] turns typed calls into [`Command`]s, registers each one with
//! the [`CallbackDispatcher`] under a fresh correlation id and hands it to a
//! [`Transport`]. Replies come back through the transport's
//! [`ReplyHandler`] in any order and complete the matching [`Response`].

pub mod blocking;
pub mod client;
pub mod command;
pub mod commands;
pub mod config;
pub mod connection;
pub mod decode;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod manager;
pub mod options;
pub mod runtime;
pub mod transport;
pub mod value;

pub use blocking::BlockingClient;
pub use client::Client;
pub use command::{Command, RequestType};
pub use commands::{BaseCommands, ConnectionCommands, ServerCommands, StringCommands};
pub use config::{ClientConfig, Credentials, NodeAddress, ReadFrom};
pub use dispatcher::{CallbackDispatcher, CallbackId};
pub use error::{GlideError, RedisErrorKind, Result, TransportError};
pub use manager::{CommandManager, Response};
pub use transport::{ChannelPeer, ChannelTransport, PeerEvent, ReplyHandler, Request, Transport};
pub use value::Value;
