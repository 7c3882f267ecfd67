//! SET options: conditional set, GET, and expiry.
//!
//! Encodes into the trailing arguments of `SET key value …`:
//! `[NX|XX] [GET] [KEEPTTL | EX n | PX n | EXAT n | PXAT n]`

use bytes::Bytes;
use itoa::Buffer;

use crate::error::{GlideError, Result};

/// Token appended when the previous value should be returned.
pub const RETURN_OLD_VALUE: &str = "GET";

/// Condition on prior key existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalSet {
    /// Only set the key if it already exists (`XX`).
    OnlyIfExists,
    /// Only set the key if it does not already exist (`NX`).
    OnlyIfDoesNotExist,
}

impl ConditionalSet {
    pub const fn token(self) -> &'static str {
        match self {
            Self::OnlyIfExists => "XX",
            Self::OnlyIfDoesNotExist => "NX",
        }
    }
}

/// Expiry policy kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeToLiveType {
    /// Retain the time to live associated with the key (`KEEPTTL`).
    KeepExisting,
    /// Relative expiry in seconds (`EX`).
    Seconds,
    /// Relative expiry in milliseconds (`PX`).
    Milliseconds,
    /// Absolute unix time in seconds (`EXAT`).
    UnixSeconds,
    /// Absolute unix time in milliseconds (`PXAT`).
    UnixMilliseconds,
}

impl TimeToLiveType {
    pub const fn token(self) -> &'static str {
        match self {
            Self::KeepExisting => "KEEPTTL",
            Self::Seconds => "EX",
            Self::Milliseconds => "PX",
            Self::UnixSeconds => "EXAT",
            Self::UnixMilliseconds => "PXAT",
        }
    }

    /// Whether this kind is followed by a numeric count.
    pub const fn requires_count(self) -> bool {
        !matches!(self, Self::KeepExisting)
    }
}

/// An expiry policy: a kind plus the count it applies to.
///
/// The count is ignored for [`TimeToLiveType::KeepExisting`] and required for
/// every other kind; a missing count is reported when the options are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToLive {
    kind: TimeToLiveType,
    count: Option<u64>,
}

impl TimeToLive {
    pub fn new(kind: TimeToLiveType) -> Self {
        Self { kind, count: None }
    }

    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn keep_existing() -> Self {
        Self::new(TimeToLiveType::KeepExisting)
    }

    pub fn seconds(count: u64) -> Self {
        Self::new(TimeToLiveType::Seconds).count(count)
    }

    pub fn milliseconds(count: u64) -> Self {
        Self::new(TimeToLiveType::Milliseconds).count(count)
    }

    pub fn unix_seconds(count: u64) -> Self {
        Self::new(TimeToLiveType::UnixSeconds).count(count)
    }

    pub fn unix_milliseconds(count: u64) -> Self {
        Self::new(TimeToLiveType::UnixMilliseconds).count(count)
    }

    pub fn kind(&self) -> TimeToLiveType {
        self.kind
    }

    fn encode_into(&self, args: &mut Vec<Bytes>) -> Result<()> {
        args.push(Bytes::from_static(self.kind.token().as_bytes()));
        if !self.kind.requires_count() {
            return Ok(());
        }
        let count = self.count.ok_or_else(|| {
            GlideError::Encoding(format!(
                "set command received expiry type {:?} but count was not set",
                self.kind
            ))
        })?;
        args.push(Bytes::copy_from_slice(Buffer::new().format(count).as_bytes()));
        Ok(())
    }
}

/// Optional arguments for `SET`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    only_if_exists: bool,
    only_if_does_not_exist: bool,
    return_old_value: bool,
    expiry: Option<TimeToLive>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existence condition. Both conditions together are rejected
    /// by [`SetOptions::to_args`].
    pub fn conditional_set(mut self, condition: ConditionalSet) -> Self {
        match condition {
            ConditionalSet::OnlyIfExists => self.only_if_exists = true,
            ConditionalSet::OnlyIfDoesNotExist => self.only_if_does_not_exist = true,
        }
        self
    }

    /// Return the previous string stored at the key (`GET`).
    pub fn return_old_value(mut self, yes: bool) -> Self {
        self.return_old_value = yes;
        self
    }

    pub fn expiry(mut self, ttl: TimeToLive) -> Self {
        self.expiry = Some(ttl);
        self
    }

    /// Encode into the argument fragment that follows `key value`.
    pub fn to_args(&self) -> Result<Vec<Bytes>> {
        let mut args = Vec::with_capacity(4);

        match (self.only_if_exists, self.only_if_does_not_exist) {
            (true, true) => {
                return Err(GlideError::Encoding(
                    "conditional set cannot be both only-if-exists and only-if-does-not-exist"
                        .into(),
                ));
            }
            (true, false) => args.push(token(ConditionalSet::OnlyIfExists.token())),
            (false, true) => args.push(token(ConditionalSet::OnlyIfDoesNotExist.token())),
            (false, false) => {}
        }

        if self.return_old_value {
            args.push(token(RETURN_OLD_VALUE));
        }

        if let Some(ttl) = &self.expiry {
            ttl.encode_into(&mut args)?;
        }

        Ok(args)
    }
}

#[inline]
fn token(t: &'static str) -> Bytes {
    Bytes::from_static(t.as_bytes())
}

// ── Tests ──────────────────────────────────────────────────────────
