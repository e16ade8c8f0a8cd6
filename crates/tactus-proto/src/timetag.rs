//! OSC time tag representation.
//!
//! Time tags follow the NTP format: the upper 32 bits count seconds since
//! midnight on January 1, 1900, and the lower 32 bits count fractional parts
//! of a second to a precision of about 200 picoseconds. Time-tag arithmetic
//! (clock conversion, comparison against wall time) is deliberately out of
//! scope; this type only represents and transports the value.

/// 64-bit NTP-style time tag attached to an OSC bundle.
///
/// A bundle's time tag propagates to every message nested inside it, at any
/// depth, with the nearest enclosing bundle winning. A message at the top
/// level of a packet has no time tag.
///
/// Serialized as a Big Endian `u64` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeTag(u64);

impl TimeTag {
    /// Size of a serialized time tag in bytes
    pub const SIZE: usize = 8;

    /// The special "immediately" value defined by OSC 1.0: 63 zero bits
    /// followed by a one. Receivers must process the bundle's contents
    /// without delay.
    pub const IMMEDIATE: Self = Self(1);

    /// Create a time tag from its raw 64-bit representation
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw 64-bit representation
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Seconds since the NTP epoch (upper 32 bits)
    #[must_use]
    pub const fn seconds(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Fractional part of a second (lower 32 bits)
    #[must_use]
    pub const fn fraction(self) -> u32 {
        self.0 as u32
    }

    /// Whether this is the special "immediately" value
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        self.0 == Self::IMMEDIATE.0
    }

    /// Serialize to wire format (Big Endian)
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_be_bytes()
    }

    /// Parse from wire format (Big Endian)
    ///
    /// This function is **total**: all 2^64 bit patterns are valid time
    /// tags, so parsing cannot fail.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl Default for TimeTag {
    fn default() -> Self {
        Self::IMMEDIATE
    }
}
