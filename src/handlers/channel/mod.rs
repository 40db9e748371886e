//! Channel command handlers.

mod invite;
mod join;
mod kick;
mod messaging;
mod mode;
mod names;
mod part;
mod topic;

pub use invite::invite;
pub use join::join;
pub use kick::kick;
pub use messaging::{notice, privmsg};
pub use mode::mode;
pub use names::names;
pub use part::part;
pub use topic::{get_topic, set_topic};
