//! Owned IRC messages and wire rendering.

use std::fmt;

use crate::command::Command;
use crate::prefix::Prefix;

/// An IRCv3 message tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag(pub String, pub Option<String>);

impl Tag {
    pub fn new(key: impl Into<String>, value: Option<&str>) -> Self {
        Tag(key.into(), value.map(str::to_string))
    }
}

/// An owned IRC message: optional tags, optional source, command.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub tags: Option<Vec<Tag>>,
    pub prefix: Option<Prefix>,
    pub command: Command,
}

impl Message {
    pub fn new(prefix: Option<Prefix>, command: Command) -> Self {
        Self {
            tags: None,
            prefix,
            command,
        }
    }

    /// Render to a complete wire line, CRLF-terminated.
    pub fn to_line(&self) -> String {
        format!("{}\r\n", self)
    }
}

/// Escape a tag value per the IRCv3 message-tags spec.
fn escape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ';' => out.push_str("\\:"),
            ' ' => out.push_str("\\s"),
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tags) = &self.tags {
            if !tags.is_empty() {
                f.write_str("@")?;
                for (i, Tag(key, value)) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    f.write_str(key)?;
                    if let Some(value) = value {
                        write!(f, "={}", escape_tag_value(value))?;
                    }
                }
                f.write_str(" ")?;
            }
        }

        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command.name())?;

        let args = self.command.args();
        let last = args.len().saturating_sub(1);
        for (i, arg) in args.iter().enumerate() {
            if i == last && (arg.is_empty() || arg.contains(' ') || arg.starts_with(':')) {
                write!(f, " :{}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    #[test]
    fn renders_privmsg_with_trailing() {
        let msg = Message::new(
            Some(Prefix::user("alice", "ali", "host.example")),
            Command::PRIVMSG("#chan".into(), "hello there".into()),
        );
        assert_eq!(
            msg.to_string(),
            ":alice!ali@host.example PRIVMSG #chan :hello there"
        );
    }

    #[test]
    fn renders_numeric() {
        let msg = Message::new(
            Some(Prefix::server("irc.example.com")),
            Command::Response(
                Response::RPL_TOPIC,
                vec!["alice".into(), "#chan".into(), "the topic".into()],
            ),
        );
        assert_eq!(
            msg.to_string(),
            ":irc.example.com 332 alice #chan :the topic"
        );
    }

    #[test]
    fn empty_trailing_gets_colon() {
        let msg = Message::new(
            None,
            Command::Response(Response::RPL_NAMREPLY, vec!["a".into(), "".into()]),
        );
        assert_eq!(msg.to_string(), "353 a :");
    }

    #[test]
    fn line_is_crlf_terminated() {
        let msg = Message::new(None, Command::QUIT(None));
        assert_eq!(msg.to_line(), "QUIT\r\n");
    }
}
