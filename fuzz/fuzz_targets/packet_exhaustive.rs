//! Exhaustive positive space fuzzer for packet encoding/dispatch.
//!
//! Unlike random fuzzing (packet_decode.rs), this fuzzer EXHAUSTIVELY tests
//! combinations of:
//! - Edge-case addresses and type-tag strings
//! - Edge-case time tags (zero, immediate, boundaries, max)
//! - Argument block sizes around padding boundaries
//! - Bundle nesting depths around the engine's limit
//!
//! This ensures we don't miss bugs that occur only with specific
//! shape+value combinations that random sampling might not hit.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tactus_core::{MAX_BUNDLE_DEPTH, Packet};
use tactus_proto::{Bundle, Contents, MAX_PACKET_SIZE, Message, TimeTag};

// Edge-case address patterns
const ADDRESSES: &[&str] = &["/", "/a", "/ab", "/abc", "/example", "/a/b/c/d", "/x_0/y_1"];

// Edge-case type-tag strings (excluding the leading comma)
const TYPE_TAGS: &[&str] = &["", "i", "if", "ifsb", "TFNI", "dddd"];

// Edge-case time tag raw values
const TIME_TAGS: &[u64] = &[
    0,
    1, // OSC "immediately"
    0x1000,
    u32::MAX as u64, // 32-bit boundary
    u64::MAX / 2,
    u64::MAX - 1,
    u64::MAX,
];

// Argument block sizes around padding boundaries (multiples of four)
const ARG_SIZES: &[usize] = &[0, 4, 8, 12, 64, 128, 1024];

// Bundle nesting depths around the engine's limit
const DEPTHS: &[usize] = &[1, 2, 3, MAX_BUNDLE_DEPTH - 1, MAX_BUNDLE_DEPTH];

fuzz_target!(|data: &[u8]| {
    // Use input data to select which combination to test. This allows
    // libFuzzer to guide exploration while remaining exhaustive.
    if data.len() < 4 {
        return;
    }

    let address = ADDRESSES[data[0] as usize % ADDRESSES.len()];
    let tags = TYPE_TAGS[data[1] as usize % TYPE_TAGS.len()];
    let time_tag = TimeTag::from_raw(TIME_TAGS[data[2] as usize % TIME_TAGS.len()]);
    let arg_size = ARG_SIZES[data[3] as usize % ARG_SIZES.len()];

    let args = if arg_size <= data.len() - 4 {
        data[4..4 + arg_size].to_vec()
    } else {
        vec![0u8; arg_size]
    };

    let message = Message::with_arguments(address, tags, args).expect("edge-case message is valid");

    for &depth in DEPTHS {
        // Wrap the message in `depth` nested bundles.
        let mut bundle = Bundle::new(time_tag);
        bundle.push(message.clone());
        for _ in 1..depth {
            let mut outer = Bundle::new(time_tag);
            outer.push(bundle);
            bundle = outer;
        }

        let contents = Contents::Bundle(bundle);
        if contents.encoded_size() > MAX_PACKET_SIZE {
            continue;
        }

        // INVARIANT 1: Building the packet must succeed under the ceiling
        let mut packet = Packet::from_contents(&contents).expect("under the size ceiling");

        // INVARIANT 2: Encoded size must match the declared size
        assert_eq!(packet.len(), contents.encoded_size());

        // INVARIANT 3: Dispatch must deliver exactly one message with the
        // innermost bundle's time tag and the original message intact
        let expected = message.clone();
        let mut calls = 0usize;
        packet.set_message_handler(move |tag, delivered| {
            calls += 1;
            assert_eq!(calls, 1, "exactly one message in the packet");
            assert_eq!(tag, Some(time_tag), "nearest enclosing bundle's tag");
            assert_eq!(delivered, &expected, "message round-trips intact");
        });
        packet.process_messages().expect("valid packet must process");
    }
});
