//! Event handlers for the channel actor, one module per operation family.

mod broadcast;
mod invite;
mod join;
mod kick;
mod message;
mod modes;
mod part_quit;
mod topic;
