//! OSC message type and byte codec.
//!
//! Wire layout (every field padded to a four-byte boundary):
//!
//! ```text
//! [address pattern \0 pad*] [, type tags \0 pad*] [argument bytes]
//! ```
//!
//! The argument block is carried as opaque bytes next to its type-tag
//! string; typed marshaling is a higher-level concern. Per the OSC 1.0
//! compatibility note, a decoded message may omit the type-tag string
//! entirely (ancient senders), in which case it has no arguments.

use bytes::{BufMut, Bytes};

use crate::{
    MAX_PACKET_SIZE, pad4,
    errors::{OscError, Result},
};

/// A single OSC message: address pattern, type-tag string, and an opaque
/// argument block.
///
/// # Invariants
///
/// - **Address**: non-empty ASCII, starts with `/`. Enforced by
///   [`Message::new`] and verified by [`Message::decode`].
/// - **Type tags**: stored without the leading `,`; ASCII. The comma is a
///   wire-format marker, not part of the tag list.
/// - **Alignment**: the argument block length is always a multiple of four,
///   so an encoded message is always a multiple of four bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    address: String,
    type_tags: String,
    arguments: Bytes,
}

impl Message {
    /// Create a message with the given address pattern and no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::InvalidAddressPattern`] if the address is empty,
    /// does not start with `/`, or contains non-printable or non-ASCII
    /// characters.
    pub fn new(address: &str) -> Result<Self> {
        validate_address(address)?;
        Ok(Self {
            address: address.to_owned(),
            type_tags: String::new(),
            arguments: Bytes::new(),
        })
    }

    /// Create a message with type tags and a raw argument block.
    ///
    /// `type_tags` excludes the leading comma. The argument block is opaque
    /// to this crate but must already be padded the way OSC arguments are.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::InvalidAddressPattern`] for a malformed address,
    /// [`OscError::InvalidTypeTagString`] for non-printable tag characters,
    /// and [`OscError::SizeNotMultipleOfFour`] if the argument block length
    /// is not a multiple of four.
    pub fn with_arguments(
        address: &str,
        type_tags: &str,
        arguments: impl Into<Bytes>,
    ) -> Result<Self> {
        validate_address(address)?;
        if !type_tags.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(OscError::InvalidTypeTagString);
        }
        let arguments = arguments.into();
        if arguments.len() % 4 != 0 {
            return Err(OscError::SizeNotMultipleOfFour { size: arguments.len() });
        }
        Ok(Self {
            address: address.to_owned(),
            type_tags: type_tags.to_owned(),
            arguments,
        })
    }

    /// The address pattern, including the leading `/`
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The type-tag string, without the leading `,`
    #[must_use]
    pub fn type_tags(&self) -> &str {
        &self.type_tags
    }

    /// The raw argument block
    #[must_use]
    pub fn arguments(&self) -> &Bytes {
        &self.arguments
    }

    /// Encoded size in bytes (always a multiple of four)
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        pad4(self.address.len() + 1) + pad4(1 + self.type_tags.len() + 1) + self.arguments.len()
    }

    /// Encode the message into a buffer.
    ///
    /// The type-tag string is always written, even when there are no tags,
    /// so a freshly encoded no-argument message still carries `,\0\0\0`.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::PacketSizeTooLarge`] if the encoded size would
    /// exceed [`MAX_PACKET_SIZE`]. Nothing is written in that case.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let size = self.encoded_size();
        if size > MAX_PACKET_SIZE {
            return Err(OscError::PacketSizeTooLarge { size, max: MAX_PACKET_SIZE });
        }

        dst.put_slice(self.address.as_bytes());
        put_padding(dst, self.address.len());

        dst.put_u8(b',');
        dst.put_slice(self.type_tags.as_bytes());
        put_padding(dst, 1 + self.type_tags.len());

        dst.put_slice(&self.arguments);
        Ok(())
    }

    /// Decode a message from wire bytes.
    ///
    /// Validates the address pattern and type-tag string before returning;
    /// the argument block is taken verbatim from the remaining bytes.
    ///
    /// # Errors
    ///
    /// - [`OscError::ContentsEmpty`] for a zero-length span
    /// - [`OscError::SizeNotMultipleOfFour`] if the span is misaligned
    /// - [`OscError::InvalidContents`] if the first byte is not `/`
    /// - [`OscError::MessageTruncated`] if a string field has no terminator
    /// - [`OscError::InvalidAddressPattern`] /
    ///   [`OscError::InvalidTypeTagString`] for malformed string fields
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(OscError::ContentsEmpty);
        }
        if bytes.len() % 4 != 0 {
            return Err(OscError::SizeNotMultipleOfFour { size: bytes.len() });
        }
        if bytes[0] != b'/' {
            return Err(OscError::InvalidContents);
        }

        let address_end = find_terminator(bytes, 0)?;
        let address = ascii_field(&bytes[..address_end]).ok_or(OscError::InvalidAddressPattern)?;
        validate_address(address)?;

        // A message may legally end after the address (no type-tag string).
        let tags_start = pad4(address_end + 1);
        if tags_start == bytes.len() {
            return Ok(Self {
                address: address.to_owned(),
                type_tags: String::new(),
                arguments: Bytes::new(),
            });
        }

        if bytes[tags_start] != b',' {
            return Err(OscError::InvalidTypeTagString);
        }
        let tags_end = find_terminator(bytes, tags_start)?;
        let type_tags =
            ascii_field(&bytes[tags_start + 1..tags_end]).ok_or(OscError::InvalidTypeTagString)?;

        // Whole span and both string fields are four-aligned, so the
        // argument block is too.
        let args_start = pad4(tags_end + 1);
        let arguments = Bytes::copy_from_slice(&bytes[args_start..]);

        Ok(Self {
            address: address.to_owned(),
            type_tags: type_tags.to_owned(),
            arguments,
        })
    }
}

/// Write the null terminator plus zero-fill to the next four-byte boundary
/// for a field of `field_len` content bytes.
fn put_padding(dst: &mut impl BufMut, field_len: usize) {
    for _ in field_len..pad4(field_len + 1) {
        dst.put_u8(0);
    }
}

/// Index of the null terminator for the field starting at `start`.
fn find_terminator(bytes: &[u8], start: usize) -> Result<usize> {
    bytes[start..]
        .iter()
        .position(|&b| b == 0)
        .map(|pos| start + pos)
        .ok_or(OscError::MessageTruncated {
            expected: pad4(bytes.len() + 1),
            actual: bytes.len(),
        })
}

/// Interpret a string field as printable ASCII.
fn ascii_field(bytes: &[u8]) -> Option<&str> {
    if bytes.iter().all(|&b| b.is_ascii_graphic()) {
        // Graphic ASCII is valid UTF-8 by construction.
        std::str::from_utf8(bytes).ok()
    } else {
        None
    }
}

fn validate_address(address: &str) -> Result<()> {
    if !address.starts_with('/') || !address.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(OscError::InvalidAddressPattern);
    }
    Ok(())
}
