//! Error types for the Tactus OSC codec.
//!
//! All errors are structured, testable, and returned (never panicked) by
//! every fallible operation in the codec and the packet engine.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or dispatching OSC
/// packets.
///
/// The taxonomy is closed: every failure mode of the codec maps to exactly
/// one variant, and callers can match exhaustively. Errors propagate
/// fail-fast — the first failure anywhere in a packet walk aborts the whole
/// operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OscError {
    // Packet-level errors
    /// A zero-length contents span was presented for deconstruction
    #[error("contents empty: a zero-length span cannot be deconstructed")]
    ContentsEmpty,

    /// Leading byte is neither `/` (message) nor `#` (bundle)
    #[error("invalid contents: leading byte is neither '/' nor '#'")]
    InvalidContents,

    /// Encode or byte-copy would exceed the packet size ceiling
    #[error("packet too large: {size} bytes exceeds maximum {max}")]
    PacketSizeTooLarge {
        /// Size that was requested
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// A packet was processed with no message handler attached
    #[error("callback undefined: no message handler attached to packet")]
    CallbackUndefined,

    /// Bundle nesting exceeds the maximum supported depth
    #[error("bundle nesting exceeds maximum depth {max}")]
    BundleDepthExceeded {
        /// Maximum nesting depth supported by the packet engine
        max: usize,
    },

    // Message codec errors
    /// Message contents end before a null-terminated field completes
    #[error("message truncated: expected at least {expected} bytes, got {actual}")]
    MessageTruncated {
        /// Minimum size in bytes the message would need to be well-formed
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Address pattern is empty, does not start with `/`, or is not ASCII
    #[error("invalid address pattern: must be non-empty ASCII starting with '/'")]
    InvalidAddressPattern,

    /// Type-tag string does not start with `,` or is not ASCII
    #[error("invalid type-tag string: must be ASCII starting with ','")]
    InvalidTypeTagString,

    // Bundle codec errors
    /// Bundle header is not the literal `#bundle\0`
    #[error("invalid bundle header: expected \"#bundle\\0\"")]
    InvalidBundleHeader,

    /// Bundle is shorter than its fixed header plus time tag
    #[error("bundle too short: expected at least {expected} bytes, got {actual}")]
    BundleTooShort {
        /// Expected minimum size in bytes
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// A bundle element claims more data than the bundle holds
    #[error(
        "bundle element truncated: element claims {expected} bytes, but only {actual} available"
    )]
    BundleElementTruncated {
        /// Bytes claimed by the element's size field
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// A bundle element size field is negative or not a multiple of four
    #[error("invalid bundle element size: {size}")]
    InvalidElementSize {
        /// Raw size field value from the wire
        size: i32,
    },

    /// An OSC size that must be a multiple of four is not
    #[error("size not a multiple of four: {size}")]
    SizeNotMultipleOfFour {
        /// Offending size in bytes
        size: usize,
    },
}

/// Convenient Result type alias for codec operations
pub type Result<T> = std::result::Result<T, OscError>;
