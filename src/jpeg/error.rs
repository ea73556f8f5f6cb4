// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for marker scanning and table injection.

use std::fmt;

/// Errors that can occur while inspecting or repairing a frame.
///
/// None of these are fatal to a capture pipeline: the transcoder turns every
/// one of them into a pass-through of the original frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JpegError {
    /// The marker with this 16-bit code does not occur in the searched range.
    MarkerNotFound(u16),
    /// The output buffer could not be allocated.
    AllocationFailure {
        /// Number of bytes that were requested.
        requested: usize,
    },
    /// The buffer is too short or structurally unusable.
    MalformedBuffer(&'static str),
    /// Missing SOI (0xFFD8) at start of data.
    InvalidSoi,
    /// Input data is too short or truncated.
    UnexpectedEof,
    /// A marker segment has invalid or inconsistent length/content.
    InvalidMarkerData(&'static str),
    /// Huffman table class or ID out of range.
    InvalidHuffmanTableId(u8),
}

impl fmt::Display for JpegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerNotFound(code) => write!(f, "marker 0x{code:04X} not found"),
            Self::AllocationFailure { requested } => {
                write!(f, "failed to allocate {requested} byte output buffer")
            }
            Self::MalformedBuffer(msg) => write!(f, "malformed buffer: {msg}"),
            Self::InvalidSoi => write!(f, "missing SOI marker (not a JPEG)"),
            Self::UnexpectedEof => write!(f, "unexpected end of JPEG data"),
            Self::InvalidMarkerData(msg) => write!(f, "invalid marker data: {msg}"),
            Self::InvalidHuffmanTableId(id) => write!(f, "invalid Huffman table ID: 0x{id:02X}"),
        }
    }
}

impl std::error::Error for JpegError {}

pub type Result<T> = std::result::Result<T, JpegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_code_is_printed_in_hex() {
        assert_eq!(JpegError::MarkerNotFound(0xFFC0).to_string(), "marker 0xFFC0 not found");
    }

    #[test]
    fn allocation_failure_reports_size() {
        let e = JpegError::AllocationFailure { requested: 4096 };
        assert!(e.to_string().contains("4096"));
    }
}
