//! Unified error handling for kestreld.
//!
//! Channel operations fail at the protocol level: every guard that trips
//! maps to a single IRC numeric for the acting client and leaves state
//! untouched.

use kestrel_proto::{Command, Message, Prefix, Response};
use thiserror::Error;

/// Channel operation errors.
///
/// Converted to RFC-compliant numeric replies by the handler layer via
/// [`ChannelError::to_irc_reply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("you're not on that channel")]
    NotOnChannel,

    #[error("you're not a channel operator")]
    ChanOpPrivsNeeded,

    #[error("cannot send to channel")]
    CannotSendToChan,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("no such nick {0}")]
    NoSuchNick(String),

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+b)")]
    BannedFromChan,

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("unknown mode character {0}")]
    UnknownMode(char),

    /// The channel actor is draining after going empty; retry against a
    /// fresh actor. Never surfaces to clients.
    #[error("channel is shutting down")]
    Tombstone,
}

impl ChannelError {
    /// Convert to an IRC error reply sourced from the server.
    ///
    /// Returns `None` for internal conditions that have no client-visible
    /// numeric.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Option<Message> {
        let (response, args) = match self {
            Self::NotOnChannel => (
                Response::ERR_NOTONCHANNEL,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "You're not on that channel".to_string(),
                ],
            ),
            Self::ChanOpPrivsNeeded => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "You're not a channel operator".to_string(),
                ],
            ),
            Self::CannotSendToChan => (
                Response::ERR_CANNOTSENDTOCHAN,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "Cannot send to channel".to_string(),
                ],
            ),
            Self::UserNotInChannel(target) => (
                Response::ERR_USERNOTINCHANNEL,
                vec![
                    nick.to_string(),
                    target.clone(),
                    channel.to_string(),
                    "They aren't on that channel".to_string(),
                ],
            ),
            Self::NoSuchNick(target) => (
                Response::ERR_NOSUCHNICK,
                vec![
                    nick.to_string(),
                    target.clone(),
                    "No such nick/channel".to_string(),
                ],
            ),
            Self::ChannelIsFull => (
                Response::ERR_CHANNELISFULL,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "Cannot join channel (+l)".to_string(),
                ],
            ),
            Self::BadChannelKey => (
                Response::ERR_BADCHANNELKEY,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "Cannot join channel (+k)".to_string(),
                ],
            ),
            Self::InviteOnlyChan => (
                Response::ERR_INVITEONLYCHAN,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "Cannot join channel (+i)".to_string(),
                ],
            ),
            Self::BannedFromChan => (
                Response::ERR_BANNEDFROMCHAN,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    "Cannot join channel (+b)".to_string(),
                ],
            ),
            Self::NeedMoreParams => (
                Response::ERR_NEEDMOREPARAMS,
                vec![
                    nick.to_string(),
                    "MODE".to_string(),
                    "Not enough parameters".to_string(),
                ],
            ),
            Self::UnknownMode(c) => (
                Response::ERR_UNKNOWNMODE,
                vec![
                    nick.to_string(),
                    c.to_string(),
                    format!("is unknown mode char to me for {}", channel),
                ],
            ),
            Self::Tombstone => return None,
        };

        Some(Message {
            tags: None,
            prefix: Some(Prefix::server(server_name)),
            command: Command::Response(response, args),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_mapping() {
        let reply = ChannelError::NotOnChannel
            .to_irc_reply("irc.example.com", "alice", "#chan")
            .unwrap();
        assert!(matches!(
            reply.command,
            Command::Response(Response::ERR_NOTONCHANNEL, _)
        ));
        assert_eq!(reply.prefix, Some(Prefix::server("irc.example.com")));
    }

    #[test]
    fn target_carried_in_args() {
        let reply = ChannelError::UserNotInChannel("bob".into())
            .to_irc_reply("s", "alice", "#chan")
            .unwrap();
        match reply.command {
            Command::Response(Response::ERR_USERNOTINCHANNEL, args) => {
                assert_eq!(args[1], "bob");
                assert_eq!(args[2], "#chan");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn tombstone_has_no_reply() {
        assert!(ChannelError::Tombstone.to_irc_reply("s", "n", "#c").is_none());
    }
}
