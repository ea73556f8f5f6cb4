// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # mjpeg-core
//!
//! Repairs MJPEG frames from capture hardware that leaves out the Huffman
//! table segment (DHT). Such frames are valid JPEG apart from that omission
//! and rely on the default tables from ITU-T T.81 Annex K; generic decoders
//! reject them. The fix is done in-band and per frame: detect the missing
//! segment and splice the standard one in before SOF0. Scan data is copied
//! byte for byte and nothing is re-encoded.
//!
//! The transform is a pure function of the input frame. Frames can be
//! repaired concurrently from any number of threads.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mjpeg_core::decode;
//!
//! let frame = std::fs::read("frame.jpg").unwrap();
//! let outcome = decode(&frame);
//! std::fs::write("fixed.jpg", outcome.bytes(&frame)).unwrap();
//! ```

pub mod jpeg;
pub mod stream;
pub mod transcode;

pub use jpeg::detect::{has_huffman_tables, has_huffman_tables_within, DEFAULT_DETECT_LIMIT};
pub use jpeg::error::{JpegError, Result as JpegResult};
pub use jpeg::inject::inject_default_tables;
pub use jpeg::marker::{find_marker, ScanLimit};
pub use jpeg::tables::STANDARD_DHT;
pub use stream::{repair_stream, split_frames, transcode_all, Frames};
pub use transcode::{decode, FrameTranscoder, Outcome, Passthrough, TranscoderConfig};
