//! Synchronous facade over [`Client`], driven by the shared runtime.
//!
//! Every call blocks the current thread until the reply arrives, so none of
//! these methods may be used from inside an async context.

use std::collections::HashMap;

use crate::client::Client;
use crate::commands::{BaseCommands, ConnectionCommands, ServerCommands, StringCommands};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::manager::Response;
use crate::options::{InfoOptions, SetOptions};
use crate::runtime;
use crate::transport::Transport;
use crate::value::Value;

/// A synchronous client.
pub struct BlockingClient<T: Transport> {
    inner: Client<T>,
}

impl<T: Transport> BlockingClient<T> {
    pub fn connect(config: ClientConfig, transport: T) -> Result<Self> {
        let inner = runtime::block_on(Client::connect(config, transport))??;
        Ok(Self { inner })
    }

    pub fn custom_command(&self, args: &[&str]) -> Result<Value> {
        wait(self.inner.custom_command(args))
    }

    pub fn ping(&self) -> Result<String> {
        wait(self.inner.ping())
    }

    pub fn ping_message(&self, message: &str) -> Result<String> {
        wait(self.inner.ping_message(message))
    }

    pub fn info(&self) -> Result<HashMap<String, Value>> {
        wait(self.inner.info())
    }

    pub fn info_with_options(&self, options: &InfoOptions) -> Result<HashMap<String, Value>> {
        wait(self.inner.info_with_options(options))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        wait(self.inner.get(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        wait(self.inner.set(key, value))
    }

    pub fn set_with_options(
        &self,
        key: &str,
        value: &str,
        options: &SetOptions,
    ) -> Result<Option<String>> {
        wait(self.inner.set_with_options(key, value, options))
    }

    pub fn close(&self) {
        self.inner.close();
    }

    /// The async client underneath.
    pub fn as_async(&self) -> &Client<T> {
        &self.inner
    }
}

impl<T: Transport> std::fmt::Debug for BlockingClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BlockingClient").field(&self.inner).finish()
    }
}

#[inline]
fn wait<R>(response: Response<R>) -> Result<R> {
    runtime::block_on(response)?
}

// ── Tests ──────────────────────────────────────────────────────────
