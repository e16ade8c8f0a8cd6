//! # Tactus Protocol: OSC Wire Format
//!
//! This crate implements the byte-level encoding layer for Open Sound
//! Control 1.0 packets.
//!
//! ## Protocol Design
//!
//! OSC contents come in exactly two shapes, distinguished by their first
//! byte:
//! - **Message** (`/`): a null-terminated address pattern, a `,`-led
//!   type-tag string, and an argument block, each padded to a four-byte
//!   boundary
//! - **Bundle** (`#`): the literal header `#bundle\0`, a 64-bit NTP-style
//!   time tag, and zero or more `int32`-length-prefixed elements which are
//!   themselves messages or bundles
//!
//! All multi-byte integers are Big Endian (network byte order).
//!
//! ## Implementation Notes
//!
//! - **Borrowed Decoding**: [`BundleReader`] iterates element spans borrowed
//!   from the input buffer. No element data is copied until a message is
//!   actually decoded.
//!
//! - **Size Limits**: Encoders enforce the [`MAX_PACKET_SIZE`] ceiling
//!   (1472 bytes, one UDP payload over Ethernet). Oversized contents are
//!   rejected before any bytes are written.
//!
//! - **Explicit Validation**: All parsing functions validate invariants and
//!   return `Result` types. There are no "unchecked" fast paths that skip
//!   validation, and malformed input never panics.
//!
//! - **Opaque Arguments**: The argument block travels as raw bytes alongside
//!   its type-tag string. Typed argument marshaling (int32, float32, string,
//!   blob) is a higher-level concern and not part of this crate.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bundle;
pub mod contents;
pub mod errors;
pub mod message;
pub mod timetag;

pub use bundle::{Bundle, BundleElement, BundleReader};
pub use contents::Contents;
pub use errors::{OscError, Result};
pub use message::Message;
pub use timetag::TimeTag;

/// Maximum encoded size of an OSC packet in bytes.
///
/// 1472 bytes is the largest UDP payload that fits a single Ethernet frame
/// (1500 MTU minus IP and UDP headers). The ceiling is shared by the encode
/// and decode paths: encoders reject larger output and the packet engine
/// rejects larger input.
pub const MAX_PACKET_SIZE: usize = 1472;

/// Round `len` up to the next multiple of four.
///
/// OSC strings are null-terminated and then padded with additional nulls so
/// that every field occupies a whole number of four-byte words.
pub(crate) const fn pad4(len: usize) -> usize {
    (len + 3) & !3
}
