// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! JPEG marker scanning.
//!
//! Two ways of finding markers live here. [`find_marker`] and
//! [`find_first_of`] do a raw byte-window search that knows nothing about
//! segment structure; this is what the table detector and injector use, and
//! it is safe on arbitrary (corrupt, truncated, empty) input. [`frame_end`]
//! walks marker segments by their length fields and skips entropy-coded
//! scan data, which is what splitting a concatenated MJPEG stream needs.

use super::error::{JpegError, Result};

/// JPEG marker constants (second byte, without the 0xFF prefix).
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOF0: u8 = 0xC0;
pub const DHT: u8 = 0xC4;
pub const SOS: u8 = 0xDA;
pub const TEM: u8 = 0x01;

/// Full 16-bit big-endian code for a marker byte, e.g. `0xFFC0` for SOF0.
pub const fn marker_code(marker: u8) -> u16 {
    0xFF00 | marker as u16
}

/// Upper bound on how many 2-byte windows a scan may examine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLimit {
    /// Give up after examining this many windows.
    Bounded(usize),
    /// Scan to the end of the buffer.
    Unbounded,
}

/// Find the first window starting at or after `start` whose big-endian value
/// is one of `codes`.
///
/// Windows overlap: the scan advances one byte at a time and window `i` is
/// `(data[i] << 8) | data[i + 1]`. The scan never reads past the last full
/// window of `data`. Returns the window offset and the code that matched.
pub fn find_first_of(
    data: &[u8],
    start: usize,
    codes: &[u16],
    limit: ScanLimit,
) -> Option<(usize, u16)> {
    if data.len() < 2 || start >= data.len() - 1 {
        return None;
    }
    // One past the last window offset that may be examined.
    let mut end = data.len() - 1;
    if let ScanLimit::Bounded(max) = limit {
        end = end.min(start.saturating_add(max));
    }

    data[start..=end]
        .windows(2)
        .enumerate()
        .find_map(|(i, w)| {
            let code = u16::from_be_bytes([w[0], w[1]]);
            codes.contains(&code).then_some((start + i, code))
        })
}

/// Find the offset of the first occurrence of marker `code` at or after `start`.
pub fn find_marker(data: &[u8], start: usize, code: u16, limit: ScanLimit) -> Option<usize> {
    find_first_of(data, start, &[code], limit).map(|(offset, _)| offset)
}

/// Markers that carry no length field.
fn is_standalone(marker: u8) -> bool {
    marker == TEM || (0xD0..=0xD7).contains(&marker)
}

/// Skip past entropy-coded scan data to find the next marker.
///
/// Starting from `pos` (the first byte after an SOS header), scans forward
/// for a 0xFF byte followed by a non-zero, non-RST marker byte. Returns the
/// offset of that 0xFF byte.
pub fn skip_scan_data(data: &[u8], mut pos: usize) -> Result<usize> {
    while pos < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        if pos + 1 >= data.len() {
            return Err(JpegError::UnexpectedEof);
        }
        match data[pos + 1] {
            // Byte-stuffed 0xFF or restart marker
            0x00 | 0xD0..=0xD7 => pos += 2,
            // Fill byte
            0xFF => pos += 1,
            _ => return Ok(pos),
        }
    }
    Err(JpegError::UnexpectedEof)
}

/// Walk one frame starting with SOI at `start` and return the offset one past
/// its EOI marker.
///
/// Header segments are skipped by their length fields, so marker-like bytes
/// inside APPn payloads (e.g. an embedded EXIF thumbnail) do not end the
/// frame early. Multiple scans are handled.
pub fn frame_end(data: &[u8], start: usize) -> Result<usize> {
    if data.len() < start.saturating_add(2) || data[start] != 0xFF || data[start + 1] != SOI {
        return Err(JpegError::InvalidSoi);
    }
    let mut pos = start + 2;

    loop {
        // Find next 0xFF
        while pos < data.len() && data[pos] != 0xFF {
            pos += 1;
        }
        // Skip padding 0xFF bytes
        while pos + 1 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        if pos + 1 >= data.len() {
            return Err(JpegError::UnexpectedEof);
        }

        let marker = data[pos + 1];
        pos += 2;

        match marker {
            0x00 => continue,
            EOI => return Ok(pos),
            // The previous frame was cut short and a new one begins here.
            SOI => return Err(JpegError::InvalidMarkerData("SOI inside frame")),
            m if is_standalone(m) => continue,
            _ => {}
        }

        if pos + 2 > data.len() {
            return Err(JpegError::UnexpectedEof);
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        if length < 2 || pos + length > data.len() {
            return Err(JpegError::InvalidMarkerData("invalid segment length"));
        }
        pos += length;

        if marker == SOS {
            pos = skip_scan_data(data, pos)?;
        } else {
            // A stale length from a cut frame lands mid-stream, often past the
            // next frame's SOI.
            match data.get(pos) {
                Some(&0xFF) => {}
                Some(_) => {
                    return Err(JpegError::InvalidMarkerData("segment not followed by a marker"))
                }
                None => return Err(JpegError::UnexpectedEof),
            }
        }
    }
}
