// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Huffman table presence detection.
//!
//! A frame that carries its own tables has a DHT segment somewhere before
//! the SOS marker that starts entropy-coded data. Frames from cameras that
//! rely on the implicit default tables have none.

use super::marker::{find_first_of, marker_code, ScanLimit, DHT, SOS};

/// Default number of 2-byte windows examined when looking for DHT.
///
/// Header segments in camera MJPEG are small, so a DHT that is present
/// almost always shows up well within this range.
pub const DEFAULT_DETECT_LIMIT: usize = 2048;

/// Whether `data` defines Huffman tables before its first scan, using the
/// default bounded scan.
pub fn has_huffman_tables(data: &[u8]) -> bool {
    has_huffman_tables_within(data, ScanLimit::Bounded(DEFAULT_DETECT_LIMIT))
}

/// Whether a DHT marker appears before the first SOS marker within `limit`.
///
/// Returns `false` if SOS comes first or neither marker is found.
pub fn has_huffman_tables_within(data: &[u8], limit: ScanLimit) -> bool {
    let codes = [marker_code(DHT), marker_code(SOS)];
    matches!(
        find_first_of(data, 0, &codes, limit),
        Some((_, code)) if code == marker_code(DHT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dht_before_sos() {
        let data = [0xFF, 0xD8, 0xFF, 0xC4, 0x00, 0x02, 0xFF, 0xDA, 0x00, 0x02];
        assert!(has_huffman_tables(&data));
    }

    #[test]
    fn sos_before_dht() {
        // A DHT-looking pair inside scan data must not count.
        let data = [0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xC4];
        assert!(!has_huffman_tables(&data));
    }

    #[test]
    fn neither_marker() {
        assert!(!has_huffman_tables(&[0xFF, 0xD8, 0xFF, 0xD9]));
        assert!(!has_huffman_tables(&[]));
        assert!(!has_huffman_tables(&[0xFF]));
    }

    #[test]
    fn dht_beyond_bound_is_missed() {
        let mut data = vec![0u8; 4000];
        data[3000] = 0xFF;
        data[3001] = 0xC4;
        assert!(!has_huffman_tables(&data));
        assert!(has_huffman_tables_within(&data, ScanLimit::Unbounded));
    }

    #[test]
    fn dht_at_last_bounded_window() {
        let mut data = vec![0u8; 4000];
        data[DEFAULT_DETECT_LIMIT - 1] = 0xFF;
        data[DEFAULT_DETECT_LIMIT] = 0xC4;
        assert!(has_huffman_tables(&data));

        let mut data = vec![0u8; 4000];
        data[DEFAULT_DETECT_LIMIT] = 0xFF;
        data[DEFAULT_DETECT_LIMIT + 1] = 0xC4;
        assert!(!has_huffman_tables(&data));
    }
}
