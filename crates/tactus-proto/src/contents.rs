//! Owned OSC contents: the payload of a packet built for transmission.
//!
//! On the wire, contents are distinguished by their first byte (`/` for a
//! message, `#` for a bundle). When *constructing* a packet the two shapes
//! are an enum, which makes the "neither message nor bundle" case
//! unrepresentable on the send path; it can only arise while decoding
//! received bytes.

use bytes::BufMut;

use crate::{Bundle, Message, errors::Result};

/// Either an OSC message or an OSC bundle.
///
/// # Invariants
///
/// - **Leading Byte**: a message encodes starting with `/` and a bundle with
///   `#`, so the encoded form always classifies back to the same variant.
/// - **Alignment**: both variants encode to a multiple of four bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// A single addressed message
    Message(Message),
    /// A time-tagged bundle of nested contents
    Bundle(Bundle),
}

impl Contents {
    /// Encoded size in bytes
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        match self {
            Self::Message(message) => message.encoded_size(),
            Self::Bundle(bundle) => bundle.encoded_size(),
        }
    }

    /// Encode into a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OscError::PacketSizeTooLarge`] if the encoded size
    /// would exceed [`crate::MAX_PACKET_SIZE`].
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::Message(message) => message.encode(dst),
            Self::Bundle(bundle) => bundle.encode(dst),
        }
    }
}

impl From<Message> for Contents {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<Bundle> for Contents {
    fn from(bundle: Bundle) -> Self {
        Self::Bundle(bundle)
    }
}
