//! OSC bundle builder and decode cursor.
//!
//! Wire layout:
//!
//! ```text
//! "#bundle\0"  [time tag: u64 BE]  ([size: i32 BE] [element bytes])*
//! ```
//!
//! Each element is itself well-formed OSC contents — a message or another
//! bundle. Encoding goes through the owned [`Bundle`] builder; decoding goes
//! through the borrowing [`BundleReader`] cursor, which hands out one
//! transient [`BundleElement`] view per iteration step.

use bytes::BufMut;

use crate::{
    MAX_PACKET_SIZE, TimeTag,
    contents::Contents,
    errors::{OscError, Result},
};

/// The literal eight-byte header that opens every OSC bundle
pub const BUNDLE_HEADER: &[u8; 8] = b"#bundle\0";

/// Fixed size of the bundle preamble: header plus time tag
pub const BUNDLE_PREAMBLE_SIZE: usize = BUNDLE_HEADER.len() + TimeTag::SIZE;

/// An owned OSC bundle under construction: a time tag and zero or more
/// nested contents.
///
/// A bundle with zero elements is valid and encodes to exactly
/// [`BUNDLE_PREAMBLE_SIZE`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    time_tag: TimeTag,
    elements: Vec<Contents>,
}

impl Bundle {
    /// Create an empty bundle with the given time tag
    #[must_use]
    pub fn new(time_tag: TimeTag) -> Self {
        Self { time_tag, elements: Vec::new() }
    }

    /// Append a message or nested bundle
    pub fn push(&mut self, contents: impl Into<Contents>) {
        self.elements.push(contents.into());
    }

    /// The bundle's time tag
    #[must_use]
    pub fn time_tag(&self) -> TimeTag {
        self.time_tag
    }

    /// The bundle's elements, in wire order
    #[must_use]
    pub fn elements(&self) -> &[Contents] {
        &self.elements
    }

    /// Encoded size in bytes (always a multiple of four)
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        BUNDLE_PREAMBLE_SIZE
            + self
                .elements
                .iter()
                .map(|element| 4 + element.encoded_size())
                .sum::<usize>()
    }

    /// Encode the bundle into a buffer.
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

        dst.put_slice(BUNDLE_HEADER);
        dst.put_slice(&self.time_tag.to_be_bytes());

        for element in &self.elements {
            // Element sizes fit in i32 because the whole bundle fits the
            // packet ceiling.
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            dst.put_i32(element.encoded_size() as i32);
            element.encode(dst)?;
        }
        Ok(())
    }
}

/// A transient view of one bundle element: its wire-declared size and the
/// contents span it covers.
///
/// The view borrows from the buffer being iterated and must not outlive the
/// iteration step that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleElement<'a> {
    /// Element size in bytes, as declared by the wire size field
    pub size: usize,
    /// The element's contents span (`size` bytes)
    pub contents: &'a [u8],
}

/// Decode cursor over a serialized bundle.
///
/// Created by [`BundleReader::decode`], which validates the preamble and
/// extracts the time tag. Elements are then walked with
/// [`has_next`](Self::has_next) / [`next_element`](Self::next_element);
/// element validation happens lazily, one element at a time, so a malformed
/// element is only reported when the walk reaches it.
#[derive(Debug, PartialEq, Eq)]
pub struct BundleReader<'a> {
    time_tag: TimeTag,
    elements: &'a [u8],
    read_pos: usize,
}

impl<'a> BundleReader<'a> {
    /// Parse the bundle preamble and position the cursor at the first
    /// element.
    ///
    /// # Errors
    ///
    /// - [`OscError::BundleTooShort`] if the span cannot hold the preamble
    /// - [`OscError::SizeNotMultipleOfFour`] if the span is misaligned
    /// - [`OscError::InvalidBundleHeader`] if the header is not `#bundle\0`
    pub fn decode(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < BUNDLE_PREAMBLE_SIZE {
            return Err(OscError::BundleTooShort {
                expected: BUNDLE_PREAMBLE_SIZE,
                actual: bytes.len(),
            });
        }
        if bytes.len() % 4 != 0 {
            return Err(OscError::SizeNotMultipleOfFour { size: bytes.len() });
        }
        if &bytes[..BUNDLE_HEADER.len()] != BUNDLE_HEADER {
            return Err(OscError::InvalidBundleHeader);
        }

        let mut tag_bytes = [0u8; TimeTag::SIZE];
        tag_bytes.copy_from_slice(&bytes[BUNDLE_HEADER.len()..BUNDLE_PREAMBLE_SIZE]);

        Ok(Self {
            time_tag: TimeTag::from_be_bytes(tag_bytes),
            elements: &bytes[BUNDLE_PREAMBLE_SIZE..],
            read_pos: 0,
        })
    }

    /// The bundle's time tag
    #[must_use]
    pub fn time_tag(&self) -> TimeTag {
        self.time_tag
    }

    /// Whether another element is available.
    ///
    /// `false` as soon as the cursor reaches the end of the bundle; a
    /// zero-element bundle never has a next element.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.read_pos < self.elements.len()
    }

    /// Fetch the next element and advance the cursor.
    ///
    /// A zero-size element is returned as an empty span; rejecting it is the
    /// caller's decision (the packet engine treats it as empty contents).
    ///
    /// # Errors
    ///
    /// - [`OscError::BundleElementTruncated`] if the size field or the
    ///   declared contents run past the end of the bundle
    /// - [`OscError::InvalidElementSize`] if the size field is negative or
    ///   not a multiple of four
    pub fn next_element(&mut self) -> Result<BundleElement<'a>> {
        let remaining = self.elements.len() - self.read_pos;
        if remaining < 4 {
            return Err(OscError::BundleElementTruncated { expected: 4, actual: remaining });
        }

        let mut size_bytes = [0u8; 4];
        size_bytes.copy_from_slice(&self.elements[self.read_pos..self.read_pos + 4]);
        let declared = i32::from_be_bytes(size_bytes);
        if declared < 0 || declared % 4 != 0 {
            return Err(OscError::InvalidElementSize { size: declared });
        }

        #[allow(clippy::cast_sign_loss)]
        let size = declared as usize;
        let start = self.read_pos + 4;
        if size > self.elements.len() - start {
            return Err(OscError::BundleElementTruncated {
                expected: size,
                actual: self.elements.len() - start,
            });
        }

        self.read_pos = start + size;
        Ok(BundleElement { size, contents: &self.elements[start..start + size] })
    }
}
