// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Default Huffman table injection.
//!
//! The table segment is spliced in immediately before SOF0. Any position
//! after the preceding marker segments and before the first scan is legal
//! for a DHT, and splicing before SOF0 means the frame header's payload
//! never has to be parsed.

use log::debug;

use super::error::{JpegError, Result};
use super::marker::{find_marker, marker_code, ScanLimit, SOF0};
use super::tables::{parse_dht_segment, STANDARD_DHT};

/// Return a copy of `data` with [`STANDARD_DHT`] inserted before the first
/// SOF0 marker.
///
/// The bytes before SOF0 and the bytes from SOF0 to the end are copied
/// unchanged, so the output is exactly `STANDARD_DHT.len()` bytes longer.
pub fn inject_default_tables(data: &[u8]) -> Result<Vec<u8>> {
    splice_before_sof0(data, &STANDARD_DHT)
}

/// Splice a caller-supplied DHT `segment` in before the first SOF0 marker.
///
/// For cameras whose implicit tables differ from Annex K. The segment is
/// validated first; a malformed one would corrupt every frame it touches.
pub fn inject_tables(data: &[u8], segment: &[u8]) -> Result<Vec<u8>> {
    parse_dht_segment(segment)?;
    splice_before_sof0(data, segment)
}

pub(crate) fn splice_before_sof0(data: &[u8], segment: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 {
        return Err(JpegError::MalformedBuffer("shorter than one marker"));
    }
    let sof = marker_code(SOF0);
    let splice = find_marker(data, 0, sof, ScanLimit::Unbounded)
        .ok_or(JpegError::MarkerNotFound(sof))?;

    let requested = data.len() + segment.len();
    let mut out = Vec::new();
    out.try_reserve_exact(requested)
        .map_err(|_| JpegError::AllocationFailure { requested })?;

    out.extend_from_slice(&data[..splice]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&data[splice..]);

    debug!(
        "inserted {} byte DHT segment at offset {splice} ({} -> {} bytes)",
        segment.len(),
        data.len(),
        out.len()
    );
    Ok(out)
}
