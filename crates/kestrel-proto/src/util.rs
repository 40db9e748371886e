//! Wildcard matching for IRC masks.

use crate::casemap::irc_lower_char;

/// Match a string against a wildcard pattern with IRC case-insensitivity.
///
/// Supports:
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
///
/// Uses RFC 1459 case mapping, so `[]\~` are equivalent to `{}|^`.
///
/// # Examples
///
/// ```
/// use kestrel_proto::util::wildcard_match;
///
/// assert!(wildcard_match("*", "anything"));
/// assert!(wildcard_match("te?t", "test"));
/// assert!(wildcard_match("*.example.com", "USER.EXAMPLE.COM"));
/// assert!(!wildcard_match("user?", "user12"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    wildcard_match_impl(&pattern, &text)
}

/// Iterative matcher with single-star backtracking over char slices.
fn wildcard_match_impl(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut star_p = None;
    let mut star_t = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star_p = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(sp) = star_p {
            // Mismatch: rewind to just past the last '*' and let it eat one
            // more character of text.
            p = sp + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }

    p == pattern.len()
}

/// Match an IRC hostmask subject against a mask pattern.
///
/// Thin wrapper around [`wildcard_match`] for `nick!user@host` subjects.
///
/// # Examples
///
/// ```
/// use kestrel_proto::util::matches_hostmask;
///
/// assert!(matches_hostmask("*!*@*.example.com", "nick!user@host.example.com"));
/// assert!(matches_hostmask("bad!*@*", "bad!evil@anywhere.net"));
/// assert!(!matches_hostmask("*!admin@*", "nick!user@host"));
/// ```
#[inline]
pub fn matches_hostmask(pattern: &str, hostmask: &str) -> bool {
    wildcard_match(pattern, hostmask)
}
