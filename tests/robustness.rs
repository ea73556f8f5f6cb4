// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Randomized robustness tests.
//!
//! Buffers come from a fixed-seed ChaCha20 stream, so every run sees the
//! same inputs. Nothing here may panic or read out of bounds, whatever the
//! bytes look like.

use mjpeg_core::{
    decode, find_marker, has_huffman_tables, split_frames, JpegError, Outcome, Passthrough,
    ScanLimit, STANDARD_DHT,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Random bytes that never contain 0xFF, so no marker can appear by accident.
fn marker_free(rng: &mut ChaCha20Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..0xFFu8)).collect()
}

#[test]
fn arbitrary_bytes_never_panic() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x4D4A_5045);
    for _ in 0..2000 {
        let len = rng.gen_range(0..600usize);
        let mut data = vec![0u8; len];
        rng.fill(&mut data[..]);
        // Make markers common enough to matter.
        for _ in 0..len / 8 {
            let i = rng.gen_range(0..len);
            data[i] = 0xFF;
        }

        match decode(&data) {
            Outcome::Transcoded(out) => {
                let m = find_marker(&data, 0, 0xFFC0, ScanLimit::Unbounded).unwrap();
                assert_eq!(out.len(), data.len() + STANDARD_DHT.len());
                assert_eq!(&out[..m], &data[..m]);
                assert_eq!(&out[m + STANDARD_DHT.len()..], &data[m..]);
            }
            Outcome::Passthrough(_) => {}
        }
        let _ = split_frames(&data);
    }
}

#[test]
fn tiny_buffers_pass_through() {
    let inputs: [&[u8]; 3] = [&[], &[0xFF], &[0xC0]];
    for data in inputs {
        assert!(matches!(
            decode(data),
            Outcome::Passthrough(Passthrough::Skipped(JpegError::MalformedBuffer(_)))
        ));
    }
}

#[test]
fn no_sof0_means_passthrough() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for len in 0..128 {
        let data = marker_free(&mut rng, len);
        assert!(decode(&data).is_passthrough(), "len {len}");
    }
}

#[test]
fn dht_before_sos_is_detected() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    for _ in 0..500 {
        let mut data = marker_free(&mut rng, 2100);
        let dht = rng.gen_range(0..2000usize);
        let sos = rng.gen_range(dht + 2..2098);
        data[dht..dht + 2].copy_from_slice(&[0xFF, 0xC4]);
        data[sos..sos + 2].copy_from_slice(&[0xFF, 0xDA]);
        assert!(has_huffman_tables(&data), "dht {dht} sos {sos}");
    }
}

#[test]
fn sos_without_preceding_dht_is_not_detected() {
    let mut rng = ChaCha20Rng::seed_from_u64(13);
    for _ in 0..500 {
        let mut data = marker_free(&mut rng, 2100);
        let sos = rng.gen_range(0..2000usize);
        data[sos..sos + 2].copy_from_slice(&[0xFF, 0xDA]);
        // A DHT after SOS belongs to a later scan and does not count.
        let dht = rng.gen_range(sos + 2..2098);
        data[dht..dht + 2].copy_from_slice(&[0xFF, 0xC4]);
        assert!(!has_huffman_tables(&data), "sos {sos} dht {dht}");
    }
}

#[test]
fn injected_table_is_found_again() {
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    for _ in 0..200 {
        let mut data = marker_free(&mut rng, 1500);
        let sof = rng.gen_range(2..1000usize);
        data[..2].copy_from_slice(&[0xFF, 0xD8]);
        data[sof..sof + 2].copy_from_slice(&[0xFF, 0xC0]);
        data[1200..1202].copy_from_slice(&[0xFF, 0xDA]);

        let Outcome::Transcoded(out) = decode(&data) else {
            panic!("sof0 at {sof} not transcoded");
        };
        assert!(has_huffman_tables(&out));
        assert!(decode(&out).is_passthrough());
    }
}
