//! Message source prefixes.

use std::fmt;

/// The source of an IRC message, rendered after a leading `:` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// Server name (e.g. `irc.example.com`).
    ServerName(String),
    /// User source: nickname, username, hostname.
    Nickname(String, String, String),
}

impl Prefix {
    pub fn server(name: impl Into<String>) -> Self {
        Prefix::ServerName(name.into())
    }

    pub fn user(
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Parse a `nick!user@host` or server-name source string.
    ///
    /// Anything without a `!` or `@` separator is treated as a server name
    /// when it contains a dot, a bare nickname otherwise.
    pub fn from_str_lenient(s: &str) -> Self {
        if let Some((nick, rest)) = s.split_once('!') {
            let (user, host) = rest.split_once('@').unwrap_or((rest, ""));
            return Prefix::user(nick, user, host);
        }
        if let Some((nick, host)) = s.split_once('@') {
            return Prefix::user(nick, "", host);
        }
        if s.contains('.') {
            Prefix::ServerName(s.to_string())
        } else {
            Prefix::user(s, "", "")
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_full_user() {
        let p = Prefix::user("alice", "ali", "host.example");
        assert_eq!(p.to_string(), "alice!ali@host.example");
    }

    #[test]
    fn render_server() {
        assert_eq!(Prefix::server("irc.example.com").to_string(), "irc.example.com");
    }

    #[test]
    fn parse_nickmask() {
        let p = Prefix::from_str_lenient("alice!ali@host.example");
        assert_eq!(p, Prefix::user("alice", "ali", "host.example"));
    }

    #[test]
    fn parse_server_name() {
        let p = Prefix::from_str_lenient("irc.example.com");
        assert_eq!(p, Prefix::ServerName("irc.example.com".to_string()));
    }
}
