//! Negative space fuzzer for packet processing.
//!
//! Feeds arbitrary bytes straight into the packet engine. The engine must
//! either dispatch every message or return a structured error. It must
//! never panic, read out of bounds, or fail to terminate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tactus_core::Packet;

fuzz_target!(|data: &[u8]| {
    let Ok(mut packet) = Packet::from_bytes(data) else {
        // Only possible for inputs over MAX_PACKET_SIZE.
        return;
    };

    let mut calls = 0usize;
    packet.set_message_handler(move |_, _| calls += 1);

    // INVARIANT: arbitrary input yields Ok or a structured error, never a
    // panic, and the buffer is left untouched.
    let before = packet.as_bytes().to_vec();
    let _ = packet.process_messages();
    assert_eq!(packet.as_bytes(), before);
});
