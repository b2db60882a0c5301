use core::fmt;

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::shell::CommandLine;

/// The outcome of running a converter to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Captured {
    /// Whether the conversion was reported as successful.
    pub(crate) success: bool,
    /// The exit code, if the converter exited normally.
    pub(crate) code: Option<i32>,
    /// Standard output and standard error, interleaved in the order they were
    /// written.
    pub(crate) output: String,
}

impl Captured {
    /// A successful outcome with the given output.
    #[cfg(test)]
    pub(crate) fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    /// A failed outcome with the given exit code and output.
    #[cfg(test)]
    pub(crate) fn failure(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }

    /// Display the exit state of the converter.
    pub(crate) fn status(&self) -> impl fmt::Display + '_ {
        struct Status<'a>(&'a Captured);

        impl fmt::Display for Status<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0.code {
                    Some(code) => write!(f, "exit status: {code}"),
                    None => write!(f, "terminated by signal"),
                }
            }
        }

        Status(self)
    }
}

/// Something which converts one file into another.
pub(crate) trait Converter {
    /// Convert `source` into `target`, blocking until done.
    ///
    /// An error is only returned if the converter could not be run at all, a
    /// converter which runs but fails is reported through [`Captured`].
    fn convert(&mut self, source: &Path, target: &Path) -> Result<Captured>;

    /// Describe how `source` would be converted, for debug output.
    fn describe(&self, source: &Path, target: &Path) -> Option<String> {
        _ = (source, target);
        None
    }
}

/// Converts files by running an ffmpeg executable.
pub(crate) struct Ffmpeg {
    bin: PathBuf,
}

impl Ffmpeg {
    pub(crate) fn new(bin: PathBuf) -> Self {
        Self { bin }
    }

    fn command(&self, source: &Path, target: &Path) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("-y");
        cmd.args([OsStr::new("-i"), source.as_os_str()]);
        cmd.arg(target);
        cmd
    }
}

impl Converter for Ffmpeg {
    fn convert(&mut self, source: &Path, target: &Path) -> Result<Captured> {
        let mut cmd = self.command(source, target);

        // Both streams share one pipe so the captured output keeps the order
        // in which ffmpeg wrote it.
        let (mut reader, writer) = io::pipe().context("Creating output pipe")?;
        cmd.stdin(Stdio::null());
        cmd.stdout(writer.try_clone().context("Cloning output pipe")?);
        cmd.stderr(writer);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Running {}", self.bin.display()))?;

        // The command holds on to our copies of the write end, which must be
        // closed for the read below to see the end of the stream.
        drop(cmd);

        let mut output = Vec::new();

        reader
            .read_to_end(&mut output)
            .with_context(|| format!("Reading output of {}", self.bin.display()))?;

        let status = child
            .wait()
            .with_context(|| format!("Waiting for {}", self.bin.display()))?;

        Ok(Captured {
            success: status.success(),
            code: status.code(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
    }

    fn describe(&self, source: &Path, target: &Path) -> Option<String> {
        Some(CommandLine(&self.command(source, target)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    #[cfg(unix)]
    use anyhow::Result;
    #[cfg(unix)]
    use tempfile::TempDir;

    use super::{Captured, Converter, Ffmpeg};

    #[test]
    fn describes_ffmpeg_invocation() {
        let ffmpeg = Ffmpeg::new("/opt/ffmpeg/bin/ffmpeg".into());

        let line = ffmpeg.describe(Path::new("in/a b.wav"), Path::new("out/a b.ogg"));

        assert_eq!(
            line.as_deref(),
            Some("/opt/ffmpeg/bin/ffmpeg -y -i in/a\\ b.wav out/a\\ b.ogg")
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(Captured::failure(1, "").status().to_string(), "exit status: 1");

        let signalled = Captured {
            success: false,
            code: None,
            output: String::new(),
        };

        assert_eq!(signalled.status().to_string(), "terminated by signal");
    }

    // NB: This is the only test which spawns processes. Scripts are written
    // before anything is spawned, since executing a file which is open for
    // writing in a forked child fails with ETXTBSY.
    #[cfg(unix)]
    #[test]
    fn runs_executable_and_captures_output() -> Result<()> {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new()?;

        let ok = dir.path().join("ok");
        let fail = dir.path().join("fail");

        fs::write(&ok, "#!/bin/sh\necho \"args: $*\"\necho warning >&2\n")?;
        fs::write(&fail, "#!/bin/sh\necho broken >&2\nexit 3\n")?;

        for path in [&ok, &fail] {
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
        }

        let captured = Ffmpeg::new(ok).convert(Path::new("in.wav"), Path::new("out.ogg"))?;
        assert!(captured.success);
        assert_eq!(captured.code, Some(0));
        assert_eq!(captured.output, "args: -y -i in.wav out.ogg\nwarning\n");

        let captured = Ffmpeg::new(fail).convert(Path::new("in.wav"), Path::new("out.ogg"))?;
        assert_eq!(captured, Captured::failure(3, "broken\n"));

        let e = Ffmpeg::new(dir.path().join("missing"))
            .convert(Path::new("in.wav"), Path::new("out.ogg"))
            .expect_err("nothing to run");

        assert!(e.to_string().starts_with("Running "), "{e}");
        Ok(())
    }
}
