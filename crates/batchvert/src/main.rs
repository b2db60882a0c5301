//! A tool to convert a directory tree of audio files using ffmpeg.
//!
//! See [`batchvert`] documentation for more information.
//!
//! [`batchvert`]: https://crates.io/crates/batchvert

use anyhow::Result;
use clap::Parser;

/// Scans a directory recursively for audio files and converts them to a
/// specific output format using ffmpeg.
#[derive(Parser)]
#[command(author, version, about, max_term_width = 80)]
pub struct Opts {
    #[command(flatten)]
    inner: batchvert::cli::Batchvert,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    batchvert::cli::entry(&opts.inner)
}
