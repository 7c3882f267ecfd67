//! Option encoders.
//!
//! Each option family is a plain value type whose `to_args` turns it into an
//! ordered argument fragment, appended after a command's positional
//! arguments. Encoders borrow the options and return a fresh vector.

pub mod info;
pub mod set;

pub use info::{InfoOptions, Section};
pub use set::{ConditionalSet, SetOptions, TimeToLive, TimeToLiveType};
