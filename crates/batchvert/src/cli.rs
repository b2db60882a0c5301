use core::cell::Cell;

use std::env;
use std::ffi::OsString;
use std::fs;

use anyhow::{Result, bail};
use clap::Parser;
use termcolor::{ColorChoice, StandardStream};

use crate::config::{Config, FFMPEG_ENV};
use crate::converter::{Converter, Ffmpeg};
use crate::out::{Colors, Out, blank, error, info, warn};
use crate::scan;
use crate::shell;
use crate::task::Task;

/// Scans a directory recursively for audio files and converts each of them
/// to the given output format using ffmpeg.
///
/// The environment variable FFMPEG must be set to the directory containing the
/// ffmpeg executable.
#[derive(Parser)]
pub struct Batchvert {
    /// Input directory to scan for files to convert.
    #[arg(long)]
    pub(crate) input: Option<OsString>,
    /// Output format, one of flac, ogg or mp3.
    #[arg(long, default_value = "ogg")]
    pub(crate) format: String,
    /// Output base directory. The directory of every converted file is
    /// reproduced underneath it. If unset, relative inputs are mirrored into
    /// the current directory and absolute inputs are converted in place.
    #[arg(long)]
    pub(crate) output: Option<OsString>,
    /// Suffix that a path must end with to be converted. This is a plain string
    /// match and not a glob.
    #[arg(long, default_value = ".wav")]
    pub(crate) inwildcard: String,
    /// If set, prints the ffmpeg commands being run along with their output.
    #[arg(short = 'd', long)]
    pub(crate) debug: bool,
}

/// Entry for `batchvert`.
///
/// See [`crate`] documentation.
pub fn entry(opts: &Batchvert) -> Result<()> {
    // Current indentation level for output.
    let indent = Cell::new(0);

    let cols = Colors::new();

    let o = StandardStream::stdout(ColorChoice::Auto);
    let mut o = o.lock();
    let mut o = Out::new(opts.debug, &indent, &cols, &mut o);

    blank!(o, "batchvert {}", env!("CARGO_PKG_VERSION"));

    let ffmpeg_env = env::var_os(FFMPEG_ENV);
    let config = Config::new(opts, ffmpeg_env.as_deref())?;

    let mut ffmpeg = Ffmpeg::new(config.ffmpeg());
    run(&mut o, &config, &mut ffmpeg)
}

/// Discover every matching file and convert them one at a time, stopping at
/// the first failure.
pub(crate) fn run(o: &mut Out<'_>, config: &Config, converter: &mut dyn Converter) -> Result<()> {
    let files = scan::scan(&config.input, &config.suffix)?;
    let total = files.len();

    info!(o, "Processing {total} files");

    for (n, source) in files.into_iter().enumerate() {
        let task = Task::new(config, source);

        // A missing directory makes the conversion fail below.
        if let Err(e) = fs::create_dir_all(&task.out_dir) {
            warn!(o => v, "Failed to create directory: {e}");
            let mut o = o.indent(1);
            blank!(o => v, "path: {}", shell::escape(task.out_dir.as_os_str()));
        }

        blank!(o, "Create: {}", task.target.display());
        let mut o = o.indent(1);

        if let Some(command) = converter.describe(&task.source, &task.target) {
            blank!(o => v, "{command}");
        }

        let captured = converter.convert(&task.source, &task.target)?;

        if !captured.success {
            error!(o, "Conversion #{}/#{total} failed", n + 1);

            {
                let mut o = o.indent(1);
                o.captured(&captured.output)?;
            }

            bail!(
                "Converting {}: {}",
                task.source.display(),
                captured.status()
            );
        }

        if o.is_verbose() {
            o.captured(&captured.output)?;
        }
    }

    Ok(())
}
