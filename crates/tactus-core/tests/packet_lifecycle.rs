//! Lifecycle tests for the packet engine.
//!
//! Covers the buffer capacity boundary, handler preconditions, empty
//! contents, time-tag propagation, the fail-fast walk, and the nesting
//! depth guard.

use std::{cell::RefCell, rc::Rc};

use tactus_core::{MAX_BUNDLE_DEPTH, Packet};
use tactus_proto::{
    Bundle, Contents, MAX_PACKET_SIZE, Message, OscError, TimeTag,
};

/// Address `/example`, empty type-tag string, no arguments.
const EXAMPLE: &[u8] = b"/example\0\0\0\0,\0\0\0";

type Calls = Rc<RefCell<Vec<(Option<TimeTag>, Message)>>>;

/// Attach a handler that records every dispatched message.
fn record_messages(packet: &mut Packet) -> Calls {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    packet.set_message_handler(move |time_tag, message| {
        sink.borrow_mut().push((time_tag, message.clone()));
    });
    calls
}

fn encode(contents: &Contents) -> Vec<u8> {
    let mut wire = Vec::new();
    contents.encode(&mut wire).expect("encoding should succeed");
    wire
}

#[test]
fn no_handler_returns_callback_undefined() {
    let mut packet = Packet::from_bytes(EXAMPLE).expect("should copy");
    let before = packet.as_bytes().to_vec();

    assert_eq!(packet.process_messages(), Err(OscError::CallbackUndefined));
    assert_eq!(packet.as_bytes(), before, "buffer must be untouched");
}

#[test]
fn example_message_dispatched_once_without_time_tag() {
    let mut packet = Packet::from_bytes(EXAMPLE).expect("should copy");
    let calls = record_messages(&mut packet);

    packet.process_messages().expect("should process");

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (time_tag, message) = &calls[0];
    assert_eq!(*time_tag, None);
    assert_eq!(message.address(), "/example");
    assert_eq!(message.type_tags(), "");
    assert!(message.arguments().is_empty());
}

#[test]
fn capacity_boundary() {
    let at_limit = vec![0u8; MAX_PACKET_SIZE];
    let packet = Packet::from_bytes(&at_limit).expect("exactly MAX_PACKET_SIZE should fit");
    assert_eq!(packet.len(), MAX_PACKET_SIZE);

    let over_limit = vec![0u8; MAX_PACKET_SIZE + 1];
    assert_eq!(
        Packet::from_bytes(&over_limit),
        Err(OscError::PacketSizeTooLarge { size: MAX_PACKET_SIZE + 1, max: MAX_PACKET_SIZE })
    );
}

#[test]
fn empty_contents_rejected() {
    let mut packet = Packet::new();
    let calls = record_messages(&mut packet);

    assert_eq!(packet.process_messages(), Err(OscError::ContentsEmpty));
    assert!(calls.borrow().is_empty());
}

#[test]
fn invalid_leading_byte_rejected() {
    let mut packet = Packet::from_bytes(b"xray\0\0\0\0").expect("should copy");
    let calls = record_messages(&mut packet);

    assert_eq!(packet.process_messages(), Err(OscError::InvalidContents));
    assert!(calls.borrow().is_empty());
}

#[test]
fn zero_element_bundle_succeeds_with_zero_calls() {
    let bundle = Bundle::new(TimeTag::IMMEDIATE);
    let mut packet = Packet::from_contents(&bundle.into()).expect("should build");
    let calls = record_messages(&mut packet);

    packet.process_messages().expect("zero-element bundle is valid");
    assert!(calls.borrow().is_empty());
}

#[test]
fn empty_bundle_element_rejected() {
    // A zero-size element is structurally readable but empty contents are
    // always an error, even below the top level.
    let mut wire = encode(&Bundle::new(TimeTag::IMMEDIATE).into());
    wire.extend_from_slice(&0i32.to_be_bytes());

    let mut packet = Packet::from_bytes(&wire).expect("should copy");
    let calls = record_messages(&mut packet);

    assert_eq!(packet.process_messages(), Err(OscError::ContentsEmpty));
    assert!(calls.borrow().is_empty());
}

#[test]
fn nearest_enclosing_time_tag_wins() {
    let inner_tag = TimeTag::from_raw(0x0000_00AA_0000_0001);
    let outer_tag = TimeTag::from_raw(0x0000_00BB_0000_0002);

    let mut inner = Bundle::new(inner_tag);
    inner.push(Message::new("/deep").unwrap());
    let mut outer = Bundle::new(outer_tag);
    outer.push(inner);
    outer.push(Message::new("/shallow").unwrap());

    let mut packet = Packet::from_contents(&outer.into()).expect("should build");
    let calls = record_messages(&mut packet);

    packet.process_messages().expect("should process");

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, Some(inner_tag), "inner bundle's tag overrides the outer one");
    assert_eq!(calls[0].1.address(), "/deep");
    assert_eq!(calls[1].0, Some(outer_tag));
    assert_eq!(calls[1].1.address(), "/shallow");
}

#[test]
fn malformed_middle_element_fails_fast() {
    let mut element_one = Vec::new();
    Message::new("/one").unwrap().encode(&mut element_one).unwrap();
    let mut element_three = Vec::new();
    Message::new("/three").unwrap().encode(&mut element_three).unwrap();

    let mut wire = encode(&Bundle::new(TimeTag::IMMEDIATE).into());
    wire.extend_from_slice(&(element_one.len() as i32).to_be_bytes());
    wire.extend_from_slice(&element_one);
    // Second element: right size, garbage contents.
    wire.extend_from_slice(&8i32.to_be_bytes());
    wire.extend_from_slice(b"xxxxxxxx");
    wire.extend_from_slice(&(element_three.len() as i32).to_be_bytes());
    wire.extend_from_slice(&element_three);

    let mut packet = Packet::from_bytes(&wire).expect("should copy");
    let calls = record_messages(&mut packet);

    assert_eq!(packet.process_messages(), Err(OscError::InvalidContents));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1, "first element dispatched, third never visited");
    assert_eq!(calls[0].1.address(), "/one");
}

#[test]
fn truncated_element_aborts_walk() {
    let mut wire = encode(&Bundle::new(TimeTag::IMMEDIATE).into());
    wire.extend_from_slice(&64i32.to_be_bytes());

    let mut packet = Packet::from_bytes(&wire).expect("should copy");
    record_messages(&mut packet);

    assert_eq!(
        packet.process_messages(),
        Err(OscError::BundleElementTruncated { expected: 64, actual: 0 })
    );
}

fn nest_bundles(levels: usize) -> Bundle {
    let mut bundle = Bundle::new(TimeTag::IMMEDIATE);
    for _ in 1..levels {
        let mut outer = Bundle::new(TimeTag::IMMEDIATE);
        outer.push(bundle);
        bundle = outer;
    }
    bundle
}

#[test]
fn nesting_at_depth_limit_succeeds() {
    let bundle = nest_bundles(MAX_BUNDLE_DEPTH);
    let mut packet = Packet::from_contents(&bundle.into()).expect("should build");
    let calls = record_messages(&mut packet);

    packet.process_messages().expect("depth limit itself is allowed");
    assert!(calls.borrow().is_empty());
}

#[test]
fn nesting_past_depth_limit_rejected() {
    let bundle = nest_bundles(MAX_BUNDLE_DEPTH + 1);
    let mut packet = Packet::from_contents(&bundle.into()).expect("should build");
    record_messages(&mut packet);

    assert_eq!(
        packet.process_messages(),
        Err(OscError::BundleDepthExceeded { max: MAX_BUNDLE_DEPTH })
    );
}

#[test]
fn handler_survives_processing() {
    let mut packet = Packet::from_bytes(EXAMPLE).expect("should copy");
    let calls = record_messages(&mut packet);

    packet.process_messages().expect("first pass");
    packet.process_messages().expect("handler is reattached after the walk");

    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn from_contents_matches_wire_encoding() {
    let contents: Contents = Message::with_arguments("/mix/fader", "f", vec![0x3F, 0x80, 0, 0])
        .unwrap()
        .into();

    let packet = Packet::from_contents(&contents).expect("should build");
    assert_eq!(packet.as_bytes(), encode(&contents));
    assert_eq!(packet.len(), contents.encoded_size());
}

#[test]
fn oversized_contents_rejected() {
    let message = Message::with_arguments("/big", "b", vec![0u8; MAX_PACKET_SIZE]).unwrap();
    let result = Packet::from_contents(&message.into());
    assert!(matches!(result, Err(OscError::PacketSizeTooLarge { .. })));
}
