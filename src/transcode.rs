// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame repair decision.
//!
//! [`FrameTranscoder::decode`] looks at one frame and either hands it back
//! untouched or returns a new buffer with the default Huffman tables added.
//! Nothing here is fatal: any failure degrades to delivering the original
//! frame, and the reason is kept in the [`Outcome`].

use std::borrow::Cow;

use log::{debug, warn};

use crate::jpeg::detect::{has_huffman_tables_within, DEFAULT_DETECT_LIMIT};
use crate::jpeg::error::{JpegError, Result};
use crate::jpeg::inject::splice_before_sof0;
use crate::jpeg::marker::ScanLimit;
use crate::jpeg::tables::{parse_dht_segment, STANDARD_DHT};

/// Transcoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscoderConfig {
    /// How far to look for a DHT marker before giving up and treating the
    /// frame as table-less. `Unbounded` scans all the way to the first SOS.
    pub detect_limit: ScanLimit,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            detect_limit: ScanLimit::Bounded(DEFAULT_DETECT_LIMIT),
        }
    }
}

/// Why a frame was delivered unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Passthrough {
    /// The frame already defines its Huffman tables.
    TablesPresent,
    /// Tables are missing but could not be added.
    Skipped(JpegError),
}

/// Result of transcoding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Use the input frame as is.
    Passthrough(Passthrough),
    /// Use this newly allocated frame instead of the input.
    Transcoded(Vec<u8>),
}

impl Outcome {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }

    /// The bytes to deliver downstream: `frame` itself on pass-through.
    pub fn bytes<'a>(&'a self, frame: &'a [u8]) -> &'a [u8] {
        match self {
            Self::Passthrough(_) => frame,
            Self::Transcoded(buf) => buf.as_slice(),
        }
    }

    /// Like [`Outcome::bytes`], but takes ownership of a transcoded buffer.
    pub fn into_cow(self, frame: &[u8]) -> Cow<'_, [u8]> {
        match self {
            Self::Passthrough(_) => Cow::Borrowed(frame),
            Self::Transcoded(buf) => Cow::Owned(buf),
        }
    }
}

/// Stateless frame repairer. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct FrameTranscoder {
    config: TranscoderConfig,
    /// DHT segment spliced into table-less frames.
    tables: &'static [u8],
}

impl Default for FrameTranscoder {
    fn default() -> Self {
        Self::new(TranscoderConfig::default())
    }
}

impl FrameTranscoder {
    pub fn new(config: TranscoderConfig) -> Self {
        Self {
            config,
            tables: &STANDARD_DHT,
        }
    }

    /// Use `segment` instead of the Annex K tables, for cameras whose
    /// implicit tables are non-standard. The segment is validated once here.
    pub fn with_tables(config: TranscoderConfig, segment: &'static [u8]) -> Result<Self> {
        parse_dht_segment(segment)?;
        Ok(Self {
            config,
            tables: segment,
        })
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Repair `frame` if it lacks Huffman tables.
    pub fn decode(&self, frame: &[u8]) -> Outcome {
        if has_huffman_tables_within(frame, self.config.detect_limit) {
            debug!("frame of {} bytes has Huffman tables", frame.len());
            return Outcome::Passthrough(Passthrough::TablesPresent);
        }
        debug!("frame of {} bytes has no Huffman tables", frame.len());

        match splice_before_sof0(frame, self.tables) {
            Ok(buf) => Outcome::Transcoded(buf),
            Err(e) => {
                match e {
                    JpegError::AllocationFailure { .. } => warn!("passing frame through: {e}"),
                    _ => debug!("passing frame through: {e}"),
                }
                Outcome::Passthrough(Passthrough::Skipped(e))
            }
        }
    }
}

/// Repair one frame with the default configuration.
pub fn decode(frame: &[u8]) -> Outcome {
    FrameTranscoder::default().decode(frame)
}
