//! First-byte classification of raw OSC contents.
//!
//! OSC contents declare their shape in their first byte: `/` opens a
//! message address pattern, `#` opens the `#bundle\0` header. Exactly one
//! holds for well-formed contents; anything else is invalid and consumers
//! must surface [`tactus_proto::OscError::InvalidContents`].

/// Classification of a raw contents span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentsKind {
    /// Contents start with `/`: a single addressed message
    Message,
    /// Contents start with `#`: a time-tagged bundle
    Bundle,
}

impl ContentsKind {
    /// Classify a contents span by its first byte.
    ///
    /// This function is **total** and never fails: an empty span or an
    /// unrecognized leading byte returns `None`, and the caller decides how
    /// to reject it. Classification reads at most one byte and has no side
    /// effects.
    #[must_use]
    pub fn classify(contents: &[u8]) -> Option<Self> {
        match contents.first() {
            Some(b'/') => Some(Self::Message),
            Some(b'#') => Some(Self::Bundle),
            _ => None,
        }
    }

    /// Whether the span classifies as a message
    #[must_use]
    pub fn is_message(contents: &[u8]) -> bool {
        matches!(Self::classify(contents), Some(Self::Message))
    }

    /// Whether the span classifies as a bundle
    #[must_use]
    pub fn is_bundle(contents: &[u8]) -> bool {
        matches!(Self::classify(contents), Some(Self::Bundle))
    }
}
