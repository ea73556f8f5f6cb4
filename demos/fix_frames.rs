// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Repair every frame of a JPEG file or raw MJPEG dump.
//!
//! Usage: `cargo run --example fix_frames -- <capture.mjpeg> [out-dir]`
//!
//! Writes `out000.jpg`, `out001.jpg`, ... into `out-dir` (default `.`).
//! Set `RUST_LOG=debug` to see the per-frame decision.

use std::path::PathBuf;
use std::time::Instant;

use mjpeg_core::{split_frames, transcode_all, FrameTranscoder, Outcome, Passthrough};

fn usage(args: &[String]) -> String {
    let program = args.first().map_or("fix_frames", String::as_str);
    format!("usage: {program} <capture.mjpeg> [out-dir]")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("{}", usage(&args));
        std::process::exit(2);
    };
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));

    let data = std::fs::read(input)?;
    let start = Instant::now();
    let frames = split_frames(&data);
    let outcomes = transcode_all(&frames, &FrameTranscoder::default());
    eprintln!(
        "{} frames from {} bytes [{:.1} ms]",
        frames.len(),
        data.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let (mut repaired, mut intact, mut skipped) = (0, 0, 0);
    for (i, (frame, outcome)) in frames.iter().zip(&outcomes).enumerate() {
        match outcome {
            Outcome::Transcoded(_) => repaired += 1,
            Outcome::Passthrough(Passthrough::TablesPresent) => intact += 1,
            Outcome::Passthrough(Passthrough::Skipped(e)) => {
                eprintln!("frame {i}: left as is ({e})");
                skipped += 1;
            }
        }
        std::fs::write(out_dir.join(format!("out{i:03}.jpg")), outcome.bytes(frame))?;
    }

    eprintln!("{repaired} repaired, {intact} already had tables, {skipped} skipped");
    Ok(())
}
