//! [<img alt="github" src="https://img.shields.io/badge/github-udoprog/mediavert-8da0cb?style=for-the-badge&logo=github" height="20">](https://github.com/udoprog/mediavert)
//! [<img alt="crates.io" src="https://img.shields.io/crates/v/batchvert.svg?style=for-the-badge&color=fc8d62&logo=rust" height="20">](https://crates.io/crates/batchvert)
//!
//! A tool to convert a directory tree of audio files using ffmpeg.
//!
//! The input directory is scanned recursively and every path ending with the
//! configured suffix (`.wav` by default) is converted to the output format
//! (`flac`, `ogg` or `mp3`). The directory structure of each file is
//! reproduced underneath the output directory.
//!
//! Conversions are performed one at a time and the first failure stops the
//! whole run. Files which were already converted are left in place.
//!
//! <br>
//!
//! ## Usage
//!
//! The `FFMPEG` environment variable must point to the directory which
//! contains the ffmpeg executable:
//!
//! ```sh
//! FFMPEG=/usr/bin batchvert --input recordings --output converted --format mp3
//! ```
//!
//! Given `recordings/a/b/track.wav` this writes
//! `converted/recordings/a/b/track.mp3`. The directory of every file is
//! joined onto the output directory with its drive designator removed and
//! `.` and `..` components resolved, so absolute input paths are mirrored
//! underneath the output directory. Without `--output`, files are written next
//! to their source.
//!
//! Every path ending with the suffix is selected, directories included, and
//! since ffmpeg cannot convert a directory such a match stops the run.
//!
//! Note that the suffix is removed from file names by trimming every trailing
//! character which is part of the suffix, so with `.wav` the file `java.wav`
//! is converted into `j.mp3`.
//!
//! Use `--debug` to see the exact ffmpeg commands and their output.

mod config;
mod converter;
mod format;
mod out;
mod scan;
mod shell;
mod task;

pub mod cli;
