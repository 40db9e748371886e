//! IRC numeric response codes.
//!
//! A subset of the RFC 2812 / Modern IRC numerics covering the replies a
//! channel-centric server emits, plus their common neighbors.

#![allow(non_camel_case_types)]

use std::fmt;

/// IRC server response code.
///
/// Rendered on the wire as a zero-padded three-digit command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection registration ===
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info
    RPL_MYINFO = 4,
    /// 005 - Supported features (ISUPPORT)
    RPL_ISUPPORT = 5,

    // === Command replies ===
    /// 301 - User is away
    RPL_AWAY = 301,
    /// 305 - No longer marked away
    RPL_UNAWAY = 305,
    /// 306 - Marked as away
    RPL_NOWAWAY = 306,
    /// 324 - Channel mode is
    RPL_CHANNELMODEIS = 324,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 333 - Topic set by / at
    RPL_TOPICWHOTIME = 333,
    /// 341 - Inviting user to channel
    RPL_INVITING = 341,
    /// 346 - Invite exception list entry
    RPL_INVITELIST = 346,
    /// 347 - End of invite exception list
    RPL_ENDOFINVITELIST = 347,
    /// 348 - Ban exception list entry
    RPL_EXCEPTLIST = 348,
    /// 349 - End of ban exception list
    RPL_ENDOFEXCEPTLIST = 349,
    /// 353 - NAMES reply
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES list
    RPL_ENDOFNAMES = 366,
    /// 367 - Ban list entry
    RPL_BANLIST = 367,
    /// 368 - End of ban list
    RPL_ENDOFBANLIST = 368,

    // === Error replies ===
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 404 - Cannot send to channel
    ERR_CANNOTSENDTOCHAN = 404,
    /// 405 - Joined too many channels
    ERR_TOOMANYCHANNELS = 405,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 441 - User not in channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - Not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 443 - User already on channel
    ERR_USERONCHANNEL = 443,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode character
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite-only channel (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 474 - Banned from channel (+b)
    ERR_BANNEDFROMCHAN = 474,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 478 - Ban list is full
    ERR_BANLISTFULL = 478,
    /// 482 - Channel operator privileges needed
    ERR_CHANOPRIVSNEEDED = 482,
}

impl Response {
    /// The numeric code.
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// True for 4xx/5xx error numerics.
    pub fn is_error(&self) -> bool {
        self.code() >= 400
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(Response::RPL_WELCOME.code(), 1);
        assert_eq!(Response::RPL_NAMREPLY.code(), 353);
        assert_eq!(Response::ERR_CHANOPRIVSNEEDED.code(), 482);
    }

    #[test]
    fn zero_padded_render() {
        assert_eq!(Response::RPL_WELCOME.to_string(), "001");
        assert_eq!(Response::RPL_TOPIC.to_string(), "332");
    }

    #[test]
    fn error_classification() {
        assert!(Response::ERR_NOTONCHANNEL.is_error());
        assert!(!Response::RPL_TOPIC.is_error());
    }
}
