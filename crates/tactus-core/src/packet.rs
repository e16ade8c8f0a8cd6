//! Packet buffer lifecycle and recursive message dispatch.
//!
//! A [`Packet`] is the top-level container exchanged with a transport
//! layer: a bounded byte buffer holding one message or one bundle, plus an
//! optional message handler. Processing classifies the contents and walks
//! them depth-first, invoking the handler once per discovered message with
//! the time tag of its nearest enclosing bundle.
//!
//! # Lifecycle
//!
//! 1. Build a packet: [`Packet::new`] (empty), [`Packet::from_contents`]
//!    (serialize for send), or [`Packet::from_bytes`] (copy received bytes,
//!    no interpretation)
//! 2. Attach a handler with [`Packet::set_message_handler`]
//! 3. Call [`Packet::process_messages`] once; the handler runs zero or more
//!    times on the same call stack
//!
//! Processing reads the buffer but never mutates it. Any error anywhere in
//! the walk aborts the whole call — there is no partial-result mode: either
//! every message was dispatched, or the first error (depth-first,
//! left-to-right) is returned and no further dispatch occurs.

use std::fmt;

use tactus_proto::{
    BundleReader, Contents, MAX_PACKET_SIZE, Message, TimeTag,
    errors::{OscError, Result},
};

use crate::contents::ContentsKind;

/// Maximum supported bundle nesting depth.
///
/// Recursion runs on the native call stack, so depth must be bounded. The
/// packet size ceiling already bounds achievable nesting in practice, but a
/// pathological packet can nest a bundle every 20 bytes; this explicit
/// limit converts potential stack exhaustion into
/// [`OscError::BundleDepthExceeded`]. 32 levels comfortably exceed any real
/// OSC traffic.
pub const MAX_BUNDLE_DEPTH: usize = 32;

/// Handler invoked once per message discovered in a packet.
///
/// The time tag is that of the message's nearest enclosing bundle, or
/// `None` for a message at the packet's top level. The message view is
/// owned by the walk's stack frame; a handler must not let it escape the
/// invocation.
pub type MessageHandler = Box<dyn FnMut(Option<TimeTag>, &Message)>;

/// An OSC packet: a bounded contents buffer and an optional message
/// handler.
///
/// # Invariants
///
/// - **Bounded Buffer**: `len() <= MAX_PACKET_SIZE`, enforced by every
///   constructor; the length never diverges from the bytes actually
///   written.
/// - **Read-Only Processing**: [`process_messages`](Self::process_messages)
///   reads the buffer and never mutates it. The handler is moved out of the
///   packet for the duration of the walk, so it cannot mutate the packet it
///   was invoked from.
#[derive(Default)]
pub struct Packet {
    contents: Vec<u8>,
    handler: Option<MessageHandler>,
}

impl Packet {
    /// Create an empty packet with no handler attached
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a message or bundle into a fresh packet.
    ///
    /// The fresh packet has no handler attached.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::PacketSizeTooLarge`] if the encoded contents
    /// would exceed [`MAX_PACKET_SIZE`]. On error no packet exists, so no
    /// partial buffer is ever exposed.
    pub fn from_contents(contents: &Contents) -> Result<Self> {
        let mut buffer = Vec::with_capacity(contents.encoded_size());
        contents.encode(&mut buffer)?;
        Ok(Self { contents: buffer, handler: None })
    }

    /// Copy received bytes verbatim into a fresh packet.
    ///
    /// No interpretation of the bytes happens here — validity is deferred
    /// to [`process_messages`](Self::process_messages). The fresh packet
    /// has no handler attached.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::PacketSizeTooLarge`] if `source` exceeds
    /// [`MAX_PACKET_SIZE`].
    pub fn from_bytes(source: &[u8]) -> Result<Self> {
        if source.len() > MAX_PACKET_SIZE {
            return Err(OscError::PacketSizeTooLarge {
                size: source.len(),
                max: MAX_PACKET_SIZE,
            });
        }
        Ok(Self { contents: source.to_vec(), handler: None })
    }

    /// Attach the message handler invoked by
    /// [`process_messages`](Self::process_messages).
    ///
    /// Replaces any previously attached handler.
    pub fn set_message_handler(&mut self, handler: impl FnMut(Option<TimeTag>, &Message) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// The packet's contents bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    /// Contents length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the packet holds no contents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Recursively deconstruct the packet, invoking the handler once per
    /// message.
    ///
    /// Messages are visited depth-first in wire order. Each message is
    /// delivered with the time tag of its nearest enclosing bundle (`None`
    /// at the top level); a nested bundle's own tag overrides the outer
    /// one — tags are never merged.
    ///
    /// # Errors
    ///
    /// - [`OscError::CallbackUndefined`] if no handler is attached (checked
    ///   once up front, before the buffer is touched)
    /// - [`OscError::ContentsEmpty`] for a zero-length buffer or a
    ///   zero-size bundle element
    /// - [`OscError::InvalidContents`] if any contents span starts with
    ///   neither `/` nor `#`
    /// - [`OscError::BundleDepthExceeded`] past [`MAX_BUNDLE_DEPTH`]
    /// - any codec error from message or bundle decoding, propagated
    ///   unchanged
    ///
    /// On error, messages already visited have been dispatched and later
    /// siblings are never visited.
    pub fn process_messages(&mut self) -> Result<()> {
        let mut handler = self.handler.take().ok_or(OscError::CallbackUndefined)?;
        let result = deconstruct(handler.as_mut(), None, &self.contents, 0);
        self.handler = Some(handler);
        result
    }
}

// Manual PartialEq implementation (the boxed handler is not comparable)
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents
    }
}

// Manual Debug implementation (the boxed handler is not Debug)
impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("len", &self.contents.len())
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Depth-first walk over a contents span.
///
/// `time_tag` is the tag of the nearest enclosing bundle, `None` at the top
/// level. `depth` counts enclosing bundles and guards the native call
/// stack.
fn deconstruct(
    handler: &mut dyn FnMut(Option<TimeTag>, &Message),
    time_tag: Option<TimeTag>,
    contents: &[u8],
    depth: usize,
) -> Result<()> {
    if contents.is_empty() {
        return Err(OscError::ContentsEmpty);
    }

    match ContentsKind::classify(contents) {
        Some(ContentsKind::Message) => {
            let message = Message::decode(contents)?;
            handler(time_tag, &message);
            Ok(())
        }
        Some(ContentsKind::Bundle) => {
            if depth >= MAX_BUNDLE_DEPTH {
                return Err(OscError::BundleDepthExceeded { max: MAX_BUNDLE_DEPTH });
            }
            let mut reader = BundleReader::decode(contents)?;
            // This bundle's tag overrides any outer tag for everything
            // nested below.
            let bundle_tag = Some(reader.time_tag());
            while reader.has_next() {
                let element = reader.next_element()?;
                deconstruct(handler, bundle_tag, element.contents, depth + 1)?;
            }
            Ok(())
        }
        None => Err(OscError::InvalidContents),
    }
}
