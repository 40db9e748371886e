//! Channel mode model: mode kinds, parsed changes, and rendering.
//!
//! A MODE command body is parsed into a sequence of [`ModeChange`]s; the
//! server applies them and renders the applied subsequence back into a
//! consolidated modestring with [`format_mode_changes`].

use std::fmt;

/// Channel mode kinds.
///
/// Five disjoint families: mask lists, parameterized modes, boolean flags,
/// per-member privilege prefixes, and a catch-all for unrecognized mode
/// characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    // === Mask lists ===
    /// 'b' - Ban mask
    Ban,
    /// 'e' - Ban exception mask
    Exception,
    /// 'I' - Invite exception mask
    InviteException,

    // === Parameterized ===
    /// 'k' - Channel key required to join
    Key,
    /// 'l' - User limit
    Limit,

    // === Boolean flags ===
    /// 'i' - Invite-only
    InviteOnly,
    /// 'm' - Moderated (only voiced or op members may speak)
    Moderated,
    /// 'n' - No external messages
    NoExternal,
    /// 't' - Topic settable by operators only
    TopicLock,
    /// 'P' - Persistent channel (survives emptiness)
    Permanent,
    /// 's' - Secret channel
    Secret,

    // === Privilege prefixes (per-member) ===
    /// 'q' - Channel founder (~)
    Founder,
    /// 'a' - Channel admin (&)
    Admin,
    /// 'o' - Channel operator (@)
    Oper,
    /// 'h' - Half-operator (%)
    Halfop,
    /// 'v' - Voice (+)
    Voice,

    /// Unrecognized mode character.
    Unknown(char),
}

/// Privilege prefixes above Voice, ordered highest to lowest.
///
/// Voice sits below this ladder and never conveys authority over other
/// members' modes.
pub const PREFIX_LADDER: [ChannelMode; 4] = [
    ChannelMode::Founder,
    ChannelMode::Admin,
    ChannelMode::Oper,
    ChannelMode::Halfop,
];

impl ChannelMode {
    pub fn from_char(c: char) -> Self {
        match c {
            'b' => Self::Ban,
            'e' => Self::Exception,
            'I' => Self::InviteException,
            'k' => Self::Key,
            'l' => Self::Limit,
            'i' => Self::InviteOnly,
            'm' => Self::Moderated,
            'n' => Self::NoExternal,
            't' => Self::TopicLock,
            'P' => Self::Permanent,
            's' => Self::Secret,
            'q' => Self::Founder,
            'a' => Self::Admin,
            'o' => Self::Oper,
            'h' => Self::Halfop,
            'v' => Self::Voice,
            other => Self::Unknown(other),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Ban => 'b',
            Self::Exception => 'e',
            Self::InviteException => 'I',
            Self::Key => 'k',
            Self::Limit => 'l',
            Self::InviteOnly => 'i',
            Self::Moderated => 'm',
            Self::NoExternal => 'n',
            Self::TopicLock => 't',
            Self::Permanent => 'P',
            Self::Secret => 's',
            Self::Founder => 'q',
            Self::Admin => 'a',
            Self::Oper => 'o',
            Self::Halfop => 'h',
            Self::Voice => 'v',
            Self::Unknown(c) => *c,
        }
    }

    /// True for mask-list modes (`b`, `e`, `I`), which may be issued without
    /// an argument to query the list contents.
    pub fn is_list_mode(&self) -> bool {
        matches!(self, Self::Ban | Self::Exception | Self::InviteException)
    }

    /// True for per-member privilege prefix modes.
    pub fn is_prefix_mode(&self) -> bool {
        matches!(
            self,
            Self::Founder | Self::Admin | Self::Oper | Self::Halfop | Self::Voice
        )
    }

    /// True for channel-wide boolean flags.
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            Self::InviteOnly
                | Self::Moderated
                | Self::NoExternal
                | Self::TopicLock
                | Self::Permanent
                | Self::Secret
        )
    }

    /// The NAMES/WHO sigil for a prefix mode.
    pub fn prefix_sigil(&self) -> Option<char> {
        match self {
            Self::Founder => Some('~'),
            Self::Admin => Some('&'),
            Self::Oper => Some('@'),
            Self::Halfop => Some('%'),
            Self::Voice => Some('+'),
            _ => None,
        }
    }

    /// Whether this mode consumes a parameter for the given operation.
    fn takes_arg(&self, op: ModeOp) -> bool {
        match self {
            Self::Ban | Self::Exception | Self::InviteException => true,
            Self::Key => true,
            Self::Limit => op == ModeOp::Add,
            m if m.is_prefix_mode() => true,
            _ => false,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Direction of a mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeOp {
    Add,
    Remove,
    /// Query a mask list (list mode given with no argument).
    List,
}

/// One parsed mode change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub op: ModeOp,
    pub mode: ChannelMode,
    pub arg: Option<String>,
}

impl ModeChange {
    pub fn plus(mode: ChannelMode, arg: Option<&str>) -> Self {
        Self {
            op: ModeOp::Add,
            mode,
            arg: arg.map(str::to_string),
        }
    }

    pub fn minus(mode: ChannelMode, arg: Option<&str>) -> Self {
        Self {
            op: ModeOp::Remove,
            mode,
            arg: arg.map(str::to_string),
        }
    }

    pub fn query(mode: ChannelMode) -> Self {
        Self {
            op: ModeOp::List,
            mode,
            arg: None,
        }
    }
}

/// Parse a MODE command body (`modestring` plus positional parameters) into
/// a change sequence.
///
/// Parameters are consumed left to right by the modes that take one. A list
/// mode that finds no parameter left becomes a [`ModeOp::List`] query.
///
/// # Example
///
/// ```
/// use kestrel_proto::mode::{parse_channel_modes, ChannelMode, ModeOp};
///
/// let changes = parse_channel_modes("+mnt-s+o", &["Bob"]);
/// assert_eq!(changes.len(), 5);
/// assert_eq!(changes[4].mode, ChannelMode::Oper);
/// assert_eq!(changes[4].arg.as_deref(), Some("Bob"));
///
/// let query = parse_channel_modes("b", &[]);
/// assert_eq!(query[0].op, ModeOp::List);
/// ```
pub fn parse_channel_modes(modestring: &str, params: &[&str]) -> Vec<ModeChange> {
    let mut changes = Vec::new();
    let mut params = params.iter();
    let mut dir = ModeOp::Add;

    for c in modestring.chars() {
        match c {
            '+' => dir = ModeOp::Add,
            '-' => dir = ModeOp::Remove,
            _ => {
                let mode = ChannelMode::from_char(c);
                let arg = if mode.takes_arg(dir) {
                    params.next().map(|p| p.to_string())
                } else {
                    None
                };

                let op = if mode.is_list_mode() && arg.is_none() {
                    ModeOp::List
                } else {
                    dir
                };

                changes.push(ModeChange { op, mode, arg });
            }
        }
    }

    changes
}

/// Render applied changes into a consolidated argument vector:
/// the grouped modestring first, then the positional arguments in order.
///
/// # Example
///
/// ```
/// use kestrel_proto::mode::{format_mode_changes, ChannelMode, ModeChange};
///
/// let args = format_mode_changes(&[
///     ModeChange::plus(ChannelMode::Moderated, None),
///     ModeChange::plus(ChannelMode::NoExternal, None),
///     ModeChange::plus(ChannelMode::TopicLock, None),
///     ModeChange::minus(ChannelMode::Secret, None),
///     ModeChange::plus(ChannelMode::Oper, Some("Bob")),
/// ]);
/// assert_eq!(args, vec!["+mnt-s+o", "Bob"]);
/// ```
pub fn format_mode_changes(changes: &[ModeChange]) -> Vec<String> {
    let mut modestring = String::new();
    let mut args = Vec::new();
    let mut last_sign = None;

    for change in changes {
        let sign = match change.op {
            ModeOp::Add => '+',
            ModeOp::Remove => '-',
            ModeOp::List => continue,
        };
        if last_sign != Some(sign) {
            modestring.push(sign);
            last_sign = Some(sign);
        }
        modestring.push(change.mode.as_char());
        if let Some(arg) = &change.arg {
            args.push(arg.clone());
        }
    }

    let mut out = Vec::with_capacity(1 + args.len());
    out.push(modestring);
    out.extend(args);
    out
}
