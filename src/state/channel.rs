//! Channel-related state types.

use std::collections::HashSet;

use kestrel_proto::mode::PREFIX_LADDER;
use kestrel_proto::ChannelMode;

/// Per-member privilege modes (founder, admin, op, halfop, voice).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemberModes {
    pub founder: bool, // +q (~)
    pub admin: bool,   // +a (&)
    pub op: bool,      // +o (@)
    pub halfop: bool,  // +h (%)
    pub voice: bool,   // +v (+)
}

impl MemberModes {
    /// True if this member holds the given prefix mode.
    pub fn has(&self, mode: &ChannelMode) -> bool {
        match mode {
            ChannelMode::Founder => self.founder,
            ChannelMode::Admin => self.admin,
            ChannelMode::Oper => self.op,
            ChannelMode::Halfop => self.halfop,
            ChannelMode::Voice => self.voice,
            _ => false,
        }
    }

    /// Set or clear a prefix mode. Returns true only if the value actually
    /// changed. Non-prefix modes are ignored.
    pub fn set(&mut self, mode: &ChannelMode, on: bool) -> bool {
        let slot = match mode {
            ChannelMode::Founder => &mut self.founder,
            ChannelMode::Admin => &mut self.admin,
            ChannelMode::Oper => &mut self.op,
            ChannelMode::Halfop => &mut self.halfop,
            ChannelMode::Voice => &mut self.voice,
            _ => return false,
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }

    /// NAMES sigil string for this member.
    ///
    /// Sigils are emitted highest to lowest (`~ & @ %` then `+`). Without
    /// the multi-prefix capability only the highest sigil is kept.
    pub fn prefixes(&self, multi_prefix: bool) -> String {
        let mut sigils = String::with_capacity(5);
        for mode in &PREFIX_LADDER {
            if self.has(mode) {
                sigils.push(mode.prefix_sigil().expect("ladder modes have sigils"));
            }
        }
        if self.voice {
            sigils.push('+');
        }

        if !multi_prefix && sigils.len() > 1 {
            sigils.truncate(1);
        }

        sigils
    }
}

/// Serialize a channel flag set to its stable character form (sorted).
pub fn serialize_flags(flags: &HashSet<ChannelMode>) -> String {
    let mut chars: Vec<char> = flags.iter().map(ChannelMode::as_char).collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Parse a serialized flag string back into a flag set.
///
/// Unrecognized characters are dropped; only flags and the key/limit
/// markers belong in a channel flag set.
pub fn parse_flags(s: &str) -> HashSet<ChannelMode> {
    s.chars()
        .map(ChannelMode::from_char)
        .filter(|m| m.is_flag() || matches!(m, ChannelMode::Key | ChannelMode::Limit))
        .collect()
}
