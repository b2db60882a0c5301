use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// Recursively collect every path under `root` which ends with `suffix`.
///
/// The match is performed on the raw path, so it is case sensitive and knows
/// nothing about extensions. Every kind of entry is collected, including
/// directories and `root` itself, so a directory which happens to match makes
/// the conversion of that path fail. The first error raised while walking
/// aborts the whole scan.
pub(crate) fn scan(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("Walking {}", root.display()))?;

        if has_suffix(entry.path(), suffix) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .ends_with(suffix.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use tempfile::TempDir;

    use super::{has_suffix, scan};

    fn touch(root: &Path, path: &str) -> Result<()> {
        let path = root.join(path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, b"")?;
        Ok(())
    }

    #[test]
    fn suffix_is_a_plain_string_match() {
        assert!(has_suffix(Path::new("in/TRACK.wav"), ".wav"));
        assert!(has_suffix(Path::new("in/notawav"), "wav"));
        assert!(!has_suffix(Path::new("in/TRACK.WAV"), ".wav"));
        assert!(!has_suffix(Path::new("in/track.wav.bak"), ".wav"));
        assert!(has_suffix(Path::new("in/anything"), ""));
    }

    #[test]
    fn collects_matching_files_recursively() -> Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();

        touch(root, "a/b/track.wav")?;
        touch(root, "c.wav")?;
        touch(root, ".hidden.wav")?;
        touch(root, "d.WAV")?;
        touch(root, "e.wav.txt")?;
        touch(root, "f.wav/g.mp3")?;
        fs::write(root.join(".gitignore"), "*.wav\n")?;

        let files = scan(root, ".wav")?;

        let expected: Vec<PathBuf> = [".hidden.wav", "a/b/track.wav", "c.wav", "f.wav"]
            .into_iter()
            .map(|p| root.join(p))
            .collect();

        assert_eq!(files, expected);
        Ok(())
    }

    #[test]
    fn suffix_matches_across_the_whole_path() -> Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();

        touch(root, "notawav")?;
        touch(root, "song.wav")?;
        touch(root, "song.mp3")?;

        let files = scan(root, "wav")?;
        assert_eq!(files, vec![root.join("notawav"), root.join("song.wav")]);
        Ok(())
    }

    #[test]
    fn matching_directories_are_collected() -> Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path().join("session.wav");
        fs::create_dir_all(root.join("take.wav"))?;

        let files = scan(&root, ".wav")?;
        assert_eq!(files, vec![root.clone(), root.join("take.wav")]);
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("missing");

        let e = scan(&missing, ".wav").expect_err("walk must fail");
        assert!(e.to_string().starts_with("Walking "), "{e}");
        Ok(())
    }
}
