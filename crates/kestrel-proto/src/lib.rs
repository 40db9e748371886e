//! IRC protocol types for the Kestrel server.
//!
//! This crate holds the wire-level vocabulary the server core speaks:
//! case mapping, host-mask matching, message/command/numeric types, and
//! the channel mode change model. It performs no I/O.

pub mod casemap;
pub mod command;
pub mod message;
pub mod mode;
pub mod name;
pub mod prefix;
pub mod response;
pub mod util;

pub use casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use command::Command;
pub use message::{Message, Tag};
pub use mode::{ChannelMode, ModeChange, ModeOp};
pub use name::Name;
pub use prefix::Prefix;
pub use response::Response;
pub use util::{matches_hostmask, wildcard_match};
