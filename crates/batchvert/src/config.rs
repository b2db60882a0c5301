use std::env::consts::EXE_SUFFIX;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::cli::Batchvert;
use crate::format::Format;

/// Environment variable naming the directory which contains the ffmpeg
/// executable.
pub(crate) const FFMPEG_ENV: &str = "FFMPEG";

/// Configuration for a single run.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) input: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) format: Format,
    pub(crate) suffix: String,
    pub(crate) debug: bool,
    pub(crate) ffmpeg_dir: PathBuf,
}

impl Config {
    /// Validate options and the raw value of the [`FFMPEG_ENV`] variable into
    /// a configuration.
    pub(crate) fn new(opts: &Batchvert, ffmpeg_env: Option<&OsStr>) -> Result<Self> {
        let Some(ffmpeg_dir) = ffmpeg_env.map(strip_quotes).filter(|d| !d.is_empty()) else {
            bail!("Please set the environment variable {FFMPEG_ENV} to the ffmpeg bin directory!");
        };

        let input = match &opts.input {
            Some(input) if !input.is_empty() => PathBuf::from(input),
            _ => bail!("Please provide an input directory via --input=..."),
        };

        let format = opts.format.parse::<Format>()?;

        Ok(Config {
            input,
            output: opts.output.clone().map(PathBuf::from).unwrap_or_default(),
            format,
            suffix: opts.inwildcard.clone(),
            debug: opts.debug,
            ffmpeg_dir: PathBuf::from(ffmpeg_dir),
        })
    }

    /// Path to the ffmpeg executable.
    pub(crate) fn ffmpeg(&self) -> PathBuf {
        self.ffmpeg_dir.join(format!("ffmpeg{EXE_SUFFIX}"))
    }
}

/// Strip literal quote characters, which tend to sneak into the variable when
/// it is set from a Windows shell.
#[cfg(unix)]
fn strip_quotes(value: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = value.as_bytes().iter().copied().filter(|&b| b != b'"');
    OsString::from_vec(bytes.collect())
}

#[cfg(windows)]
fn strip_quotes(value: &OsStr) -> OsString {
    use std::os::windows::ffi::{OsStrExt, OsStringExt};

    let quote = u16::from(b'"');
    let wide = value.encode_wide().filter(|&c| c != quote).collect::<Vec<_>>();
    OsString::from_wide(&wide)
}

#[cfg(not(any(unix, windows)))]
fn strip_quotes(value: &OsStr) -> OsString {
    OsString::from(value.to_string_lossy().replace('"', ""))
}
