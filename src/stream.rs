// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Concatenated MJPEG streams.
//!
//! A raw MJPEG dump is just JPEG frames back to back, sometimes with junk
//! between them when the capture dropped bytes. [`Frames`] cuts such a
//! stream into SOI..EOI frames and [`transcode_all`] repairs a batch of
//! frames in parallel. Frames are independent, so no state is shared
//! between rayon workers.

use log::debug;
use rayon::prelude::*;

use crate::jpeg::error::JpegError;
use crate::jpeg::marker::{find_marker, frame_end, marker_code, ScanLimit, SOI};
use crate::transcode::{FrameTranscoder, Outcome};

/// Iterator over the complete frames of a concatenated MJPEG stream.
///
/// Damaged frames are skipped and the search resumes at the next SOI. A
/// frame cut off by the end of the data is dropped.
pub struct Frames<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Frames<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        loop {
            let Some(start) = find_marker(self.data, self.pos, marker_code(SOI), ScanLimit::Unbounded)
            else {
                self.pos = self.data.len();
                return None;
            };

            match frame_end(self.data, start) {
                Ok(end) => {
                    self.pos = end;
                    return Some(&self.data[start..end]);
                }
                Err(JpegError::UnexpectedEof) => {
                    debug!("dropping truncated frame at offset {start}");
                    self.pos = self.data.len();
                    return None;
                }
                Err(e) => {
                    debug!("skipping damaged frame at offset {start}: {e}");
                    self.pos = start + 2;
                }
            }
        }
    }
}

/// Split a concatenated MJPEG stream into frames.
pub fn split_frames(data: &[u8]) -> Vec<&[u8]> {
    Frames::new(data).collect()
}

/// Transcode independent frames in parallel, preserving order.
pub fn transcode_all(frames: &[&[u8]], transcoder: &FrameTranscoder) -> Vec<Outcome> {
    frames.par_iter().map(|frame| transcoder.decode(frame)).collect()
}

/// Repair every frame of a concatenated stream and join the results.
///
/// Bytes outside complete frames are not carried over.
pub fn repair_stream(data: &[u8], transcoder: &FrameTranscoder) -> Vec<u8> {
    let frames = split_frames(data);
    let outcomes = transcode_all(&frames, transcoder);

    let mut out = Vec::with_capacity(data.len());
    for (frame, outcome) in frames.iter().zip(&outcomes) {
        out.extend_from_slice(outcome.bytes(frame));
    }
    out
}
