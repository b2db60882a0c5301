use core::error::Error;
use core::fmt;
use core::str::FromStr;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FormatErr;

impl fmt::Display for FormatErr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--format must be one of ")?;

        for (n, format) in Format::ALL.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }

            write!(f, "{format}")?;
        }

        Ok(())
    }
}

impl Error for FormatErr {}

/// A target format that ffmpeg is asked to produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Format {
    Flac,
    Ogg,
    Mp3,
}

impl Format {
    /// Every supported output format, in the order they are listed to the
    /// user.
    pub(crate) const ALL: [Format; 3] = [Format::Flac, Format::Ogg, Format::Mp3];

    /// The extension used for output files, which is also how the format is
    /// spelled on the command line.
    pub(crate) fn ext(&self) -> &'static str {
        match self {
            Format::Flac => "flac",
            Format::Ogg => "ogg",
            Format::Mp3 => "mp3",
        }
    }

    pub(crate) fn from_ext(ext: &str) -> Option<Format> {
        Format::ALL.into_iter().find(|f| f.ext() == ext)
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ext().fmt(f)
    }
}

impl FromStr for Format {
    type Err = FormatErr;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ext(s).ok_or(FormatErr)
    }
}
