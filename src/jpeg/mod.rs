// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Byte-level JPEG plumbing (zero external dependencies apart from `log`).
//!
//! Works on whole frames as delivered by a capture device and never touches
//! pixel data or entropy-coded scan bytes.
//!
//! Supports:
//! - Bounded and unbounded marker search over raw bytes
//! - Detection of frames that lack a DHT segment
//! - Insertion of the Annex K default tables before SOF0
//! - Walking marker segments and scan data to find a frame's EOI
//!
//! Does NOT support:
//! - Decoding or re-encoding image data
//! - Progressive or arithmetic-coded frames (no SOF0, passed through)

pub mod error;
pub mod marker;
pub mod tables;
pub mod detect;
pub mod inject;
