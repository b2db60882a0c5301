use std::path::{Component, Path, PathBuf};

use crate::config::Config;

/// A prepared conversion of a single discovered file.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Task {
    /// The file to convert.
    pub(crate) source: PathBuf,
    /// Directory the converted file is written to.
    pub(crate) out_dir: PathBuf,
    /// The converted file.
    pub(crate) target: PathBuf,
}

impl Task {
    pub(crate) fn new(config: &Config, source: PathBuf) -> Self {
        let parent = source.parent().unwrap_or(Path::new(""));
        let out_dir = mirror_dir(&config.output, parent);

        let stem = source
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        let stem = trim_suffix_chars(&stem, &config.suffix);
        let target = out_dir.join(format!("{stem}.{}", config.format.ext()));

        Task {
            source,
            out_dir,
            target,
        }
    }
}

/// Join `dir` onto `output` with the volume or drive designator of `dir`
/// removed, and lexically clean the result.
///
/// With an empty `output` the root of `dir` is kept, so absolute directories
/// stay where they are. Otherwise `dir` always lands underneath `output`,
/// unless `..` components walk out of it.
fn mirror_dir(output: &Path, dir: &Path) -> PathBuf {
    let keep_root = output.as_os_str().is_empty();

    let dir = dir.components().filter(|c| match c {
        Component::Prefix(..) => false,
        Component::RootDir => keep_root,
        _ => true,
    });

    clean(output.components().chain(dir))
}

/// Drop `.` components and resolve `..` against preceding components without
/// touching the filesystem. Leading `..` are kept for relative paths and
/// dropped at the root.
fn clean<'a>(components: impl IntoIterator<Item = Component<'a>>) -> PathBuf {
    let mut out = PathBuf::new();
    let mut normal = 0usize;

    for c in components {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                if normal > 0 {
                    out.pop();
                    normal -= 1;
                } else if !out.has_root() {
                    out.push(c);
                }
            }
            Component::Normal(..) => {
                out.push(c);
                normal += 1;
            }
            c => out.push(c),
        }
    }

    out
}

/// Trim every trailing character of `name` which appears anywhere in
/// `suffix`.
///
/// NB: This is not the same as stripping `suffix`. With `.wav` a name like
/// `java.wav` becomes `j`. Existing output trees depend on these names, so it
/// is kept as is.
fn trim_suffix_chars<'a>(name: &'a str, suffix: &str) -> &'a str {
    name.trim_end_matches(|c: char| suffix.contains(c))
}
