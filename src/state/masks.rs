//! Ordered sets of user@host masks (ban, except, invite lists).

use std::collections::BTreeMap;

use kestrel_proto::{irc_to_lower, matches_hostmask};

/// A set of glob-style masks over `nick!user@host` subjects.
///
/// Masks keep the form the operator originally set them in; membership and
/// matching fold per IRC host-mask semantics. Iteration and serialization
/// are ordered by folded form, so the serialized form is stable and
/// round-trips through the persistence layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserMaskSet {
    // folded form -> original form
    masks: BTreeMap<String, String>,
}

impl UserMaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from its serialized form.
    pub fn parse(serialized: &str) -> Self {
        let mut set = Self::new();
        for mask in serialized.split_ascii_whitespace() {
            set.add(mask);
        }
        set
    }

    /// Insert a mask. Returns true if it was newly inserted.
    pub fn add(&mut self, mask: &str) -> bool {
        self.masks
            .insert(irc_to_lower(mask), mask.to_string())
            .is_none()
    }

    /// Remove a mask. Returns true if it was present.
    pub fn remove(&mut self, mask: &str) -> bool {
        self.masks.remove(&irc_to_lower(mask)).is_some()
    }

    /// True if any mask matches the given `nick!user@host` subject.
    pub fn matches(&self, subject: &str) -> bool {
        self.masks
            .values()
            .any(|mask| matches_hostmask(mask, subject))
    }

    /// Masks in stable (folded) order, original forms.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.masks.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Space-joined masks in stable order.
    pub fn serialize(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}
