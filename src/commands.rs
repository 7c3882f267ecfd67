//! Command groups exposed by [`Client`](crate::client::Client).

use std::collections::HashMap;

use crate::manager::Response;
use crate::options::{InfoOptions, SetOptions};
use crate::value::Value;

/// Commands with no typed wrapper.
pub trait BaseCommands {
    /// Send `args` as-is (verb included) and return the raw reply.
    ///
    /// ```ignore
    /// let reply = client.custom_command(&["CLIENT", "GETNAME"]).await?;
    /// ```
    fn custom_command(&self, args: &[&str]) -> Response<Value>;
}

pub trait ConnectionCommands {
    /// `PING`; the server answers `"PONG"`.
    fn ping(&self) -> Response<String>;

    /// `PING message`; the server echoes `message`.
    fn ping_message(&self, message: &str) -> Response<String>;
}

pub trait ServerCommands {
    /// `INFO` with the server's default sections.
    fn info(&self) -> Response<HashMap<String, Value>>;

    fn info_with_options(&self, options: &InfoOptions) -> Response<HashMap<String, Value>>;
}

pub trait StringCommands {
    /// `GET key`; `None` when the key does not exist.
    fn get(&self, key: &str) -> Response<Option<String>>;

    /// `SET key value`.
    fn set(&self, key: &str, value: &str) -> Response<()>;

    /// `SET key value [NX|XX] [GET] [EX|PX|EXAT|PXAT n|KEEPTTL]`.
    ///
    /// Yields the previous value when [`SetOptions::return_old_value`] is
    /// set, otherwise `None`. Invalid option combinations fail with
    /// [`GlideError::Encoding`](crate::error::GlideError::Encoding) and
    /// nothing is sent.
    fn set_with_options(
        &self,
        key: &str,
        value: &str,
        options: &SetOptions,
    ) -> Response<Option<String>>;
}
