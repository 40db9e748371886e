//! Typed IRC commands.

use crate::mode::{format_mode_changes, ModeChange};
use crate::response::Response;

/// IRC command with its parameters.
///
/// Covers the channel-facing command set; anything else travels as `Raw`.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Command {
    /// `JOIN <channel> [key]`
    JOIN(String, Option<String>),
    /// `PART <channel> [message]`
    PART(String, Option<String>),
    /// `KICK <channel> <user> [comment]`
    KICK(String, String, Option<String>),
    /// `INVITE <nickname> <channel>`
    INVITE(String, String),
    /// `TOPIC <channel> [topic]`
    TOPIC(String, Option<String>),
    /// `PRIVMSG <target> <text>`
    PRIVMSG(String, String),
    /// `NOTICE <target> <text>`
    NOTICE(String, String),
    /// `QUIT [message]`
    QUIT(Option<String>),
    /// Channel `MODE <channel> <changes>`
    ChannelMode(String, Vec<ModeChange>),
    /// A numeric reply with its arguments.
    Response(Response, Vec<String>),
    /// Unrecognized command verb with raw arguments.
    Raw(String, Vec<String>),
}

impl Command {
    /// The wire verb for this command.
    pub fn name(&self) -> String {
        match self {
            Command::JOIN(..) => "JOIN".to_string(),
            Command::PART(..) => "PART".to_string(),
            Command::KICK(..) => "KICK".to_string(),
            Command::INVITE(..) => "INVITE".to_string(),
            Command::TOPIC(..) => "TOPIC".to_string(),
            Command::PRIVMSG(..) => "PRIVMSG".to_string(),
            Command::NOTICE(..) => "NOTICE".to_string(),
            Command::QUIT(..) => "QUIT".to_string(),
            Command::ChannelMode(..) => "MODE".to_string(),
            Command::Response(r, _) => r.to_string(),
            Command::Raw(verb, _) => verb.clone(),
        }
    }

    /// The positional arguments, in wire order.
    pub fn args(&self) -> Vec<String> {
        match self {
            Command::JOIN(chan, key) => {
                let mut a = vec![chan.clone()];
                if let Some(key) = key {
                    a.push(key.clone());
                }
                a
            }
            Command::PART(chan, msg) => {
                let mut a = vec![chan.clone()];
                if let Some(msg) = msg {
                    a.push(msg.clone());
                }
                a
            }
            Command::KICK(chan, user, comment) => {
                let mut a = vec![chan.clone(), user.clone()];
                if let Some(comment) = comment {
                    a.push(comment.clone());
                }
                a
            }
            Command::INVITE(nick, chan) => vec![nick.clone(), chan.clone()],
            Command::TOPIC(chan, topic) => {
                let mut a = vec![chan.clone()];
                if let Some(topic) = topic {
                    a.push(topic.clone());
                }
                a
            }
            Command::PRIVMSG(target, text) => vec![target.clone(), text.clone()],
            Command::NOTICE(target, text) => vec![target.clone(), text.clone()],
            Command::QUIT(msg) => msg.iter().cloned().collect(),
            Command::ChannelMode(chan, changes) => {
                let mut a = vec![chan.clone()];
                a.extend(format_mode_changes(changes));
                a
            }
            Command::Response(_, args) => args.clone(),
            Command::Raw(_, args) => args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ChannelMode;

    #[test]
    fn join_args() {
        let cmd = Command::JOIN("#chan".into(), Some("key".into()));
        assert_eq!(cmd.name(), "JOIN");
        assert_eq!(cmd.args(), vec!["#chan", "key"]);
    }

    #[test]
    fn mode_args_are_consolidated() {
        let cmd = Command::ChannelMode(
            "#chan".into(),
            vec![
                ModeChange::plus(ChannelMode::Moderated, None),
                ModeChange::plus(ChannelMode::Oper, Some("Bob")),
            ],
        );
        assert_eq!(cmd.name(), "MODE");
        assert_eq!(cmd.args(), vec!["#chan", "+mo", "Bob"]);
    }

    #[test]
    fn numeric_name_is_code() {
        let cmd = Command::Response(Response::RPL_TOPIC, vec!["nick".into()]);
        assert_eq!(cmd.name(), "332");
    }
}
