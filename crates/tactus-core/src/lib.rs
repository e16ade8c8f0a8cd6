//! Tactus packet engine
//!
//! This crate contains the dispatch logic for Open Sound Control packets.
//! It is completely decoupled from I/O: a [`Packet`] is built from bytes
//! that already arrived (or from contents about to be sent), and processing
//! runs synchronously to completion on the caller's stack.
//!
//! # Architecture
//!
//! ```text
//!      ┌──────────────────────────────┐
//!      │ tactus-core                  │
//!      │ - Contents classification    │
//!      │ - Packet buffer lifecycle    │
//!      │ - Recursive message dispatch │
//!      └──────────────────────────────┘
//!                    ↓
//!      ┌──────────────────────────────┐
//!      │ tactus-proto                 │
//!      │ - Message codec              │
//!      │ - Bundle codec               │
//!      │ - Time tags, errors          │
//!      └──────────────────────────────┘
//! ```
//!
//! # Key Principles
//!
//! - **No I/O in Core**: transports hand this crate finished byte buffers;
//!   sockets and framing live elsewhere
//! - **Fail Fast**: the first error anywhere in a packet walk aborts the
//!   whole walk and reaches the caller unchanged
//! - **Deterministic**: processing a packet reads the buffer, never mutates
//!   it, and terminates — recursion depth is bounded by
//!   [`packet::MAX_BUNDLE_DEPTH`]
//!
//! # Modules
//!
//! - [`contents`]: first-byte classification (message vs. bundle)
//! - [`packet`]: packet buffer lifecycle and recursive message dispatch

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod contents;
pub mod packet;

pub use contents::ContentsKind;
pub use packet::{MAX_BUNDLE_DEPTH, MessageHandler, Packet};
