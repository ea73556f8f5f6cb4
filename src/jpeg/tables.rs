// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! The default Huffman table segment and DHT validation.
//!
//! MJPEG streams from many UVC/V4L2 cameras leave out the DHT segment and
//! rely on the example tables from ITU-T T.81 Annex K.3. [`STANDARD_DHT`] is
//! that set of tables as one complete marker segment, ready to splice into a
//! frame. [`parse_dht_segment`] checks any other table segment before it is
//! allowed into a frame.

use super::error::{JpegError, Result};

/// Complete DHT marker segment (0xFFC4, length, four tables) holding the
/// Annex K.3 tables in the order DC luma, DC chroma, AC luma, AC chroma.
pub static STANDARD_DHT: [u8; 420] = [
    0xFF, 0xC4, 0x01, 0xA2,
    // DC luminance (class 0, id 0)
    0x00,
    0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
    // DC chrominance (class 0, id 1)
    0x01,
    0x00, 0x03, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
    // AC luminance (class 1, id 0)
    0x10,
    0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05, 0x04, 0x04, 0x00, 0x00, 0x01, 0x7D,
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12,
    0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
    0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16,
    0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39,
    0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59,
    0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79,
    0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98,
    0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7,
    0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6,
    0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5,
    0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4,
    0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
    0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA,
    0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
    // AC chrominance (class 1, id 1)
    0x11,
    0x00, 0x02, 0x01, 0x02, 0x04, 0x04, 0x03, 0x04, 0x07, 0x05, 0x04, 0x04, 0x00, 0x01, 0x02, 0x77,
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21,
    0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
    0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91,
    0xA1, 0xB1, 0xC1, 0x09, 0x23, 0x33, 0x52, 0xF0,
    0x15, 0x62, 0x72, 0xD1, 0x0A, 0x16, 0x24, 0x34,
    0xE1, 0x25, 0xF1, 0x17, 0x18, 0x19, 0x1A, 0x26,
    0x27, 0x28, 0x29, 0x2A, 0x35, 0x36, 0x37, 0x38,
    0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58,
    0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78,
    0x79, 0x7A, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
    0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96,
    0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5,
    0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4,
    0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3,
    0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2,
    0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA,
    0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9,
    0xEA, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

/// Table class from the high nibble of Tc/Th.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableClass {
    Dc,
    Ac,
}

/// One Huffman table as defined inside a DHT segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    pub class: TableClass,
    /// Destination identifier (0–3).
    pub id: u8,
    /// Number of codes of each length 1..=16.
    pub counts: [u8; 16],
    /// Symbols in order of increasing code length.
    pub symbols: Vec<u8>,
}

impl HuffmanTable {
    /// Whether the code lengths describe a prefix code that leaves the
    /// all-ones code of every length unused, as T.81 C.2 requires.
    pub fn is_valid_prefix_code(&self) -> bool {
        // Kraft sum scaled by 2^16.
        let kraft: u32 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &n)| u32::from(n) << (15 - i))
            .sum();
        kraft < 1 << 16
    }
}

/// Parse the tables packed into a DHT body (everything after the length).
pub fn parse_dht(mut body: &[u8]) -> Result<Vec<HuffmanTable>> {
    let mut tables = Vec::new();

    while let Some((&tc_th, rest)) = body.split_first() {
        let class = match tc_th >> 4 {
            0 => TableClass::Dc,
            1 => TableClass::Ac,
            _ => return Err(JpegError::InvalidHuffmanTableId(tc_th)),
        };
        let id = tc_th & 0x0F;
        if id > 3 {
            return Err(JpegError::InvalidHuffmanTableId(tc_th));
        }

        let counts: [u8; 16] = rest
            .get(..16)
            .and_then(|c| c.try_into().ok())
            .ok_or(JpegError::UnexpectedEof)?;
        let total: usize = counts.iter().map(|&n| usize::from(n)).sum();
        let symbols = rest.get(16..16 + total).ok_or(JpegError::UnexpectedEof)?;

        tables.push(HuffmanTable {
            class,
            id,
            counts,
            symbols: symbols.to_vec(),
        });
        body = &rest[16 + total..];
    }

    Ok(tables)
}

/// Parse and validate a complete DHT segment (marker, length, tables).
///
/// Rejects segments whose length field disagrees with their size, whose
/// tables are truncated, or whose code lengths cannot form a prefix code.
pub fn parse_dht_segment(segment: &[u8]) -> Result<Vec<HuffmanTable>> {
    if segment.len() < 4 || segment[0] != 0xFF || segment[1] != super::marker::DHT {
        return Err(JpegError::InvalidMarkerData("not a DHT segment"));
    }
    let length = u16::from_be_bytes([segment[2], segment[3]]) as usize;
    if length < 2 || 2 + length != segment.len() {
        return Err(JpegError::InvalidMarkerData("invalid segment length"));
    }
    let tables = parse_dht(&segment[4..])?;
    if !tables.iter().all(HuffmanTable::is_valid_prefix_code) {
        return Err(JpegError::InvalidMarkerData("overfull Huffman table"));
    }
    Ok(tables)
}

/// The four tables carried by [`STANDARD_DHT`].
pub fn standard_tables() -> Result<Vec<HuffmanTable>> {
    parse_dht_segment(&STANDARD_DHT)
}
