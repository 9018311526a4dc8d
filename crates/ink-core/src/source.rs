//! Loading ink scripts from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SourceError;

/// File extension every ink script must carry.
pub const SCRIPT_EXTENSION: &str = "ink";

/// The raw bytes of a script along with where they came from.
///
/// Bytes are kept as-is. The lexer works on bytes, so a script does not
/// have to be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Source {
    /// Wrap bytes that did not come from a file.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a script from disk.
    ///
    /// The extension is checked before the file is touched.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !is_script_path(path) {
            return Err(SourceError::NotAScript(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|source| SourceError::Os {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Path the script was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The script's bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the script in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Whether `path` names an ink script.
pub fn is_script_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == SCRIPT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    // The directory is removed when the returned guard drops.
    fn create_temp_script_file(content: &[u8], filename: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join(filename);
        fs::write(&file_path, content).expect("Failed to write temp file");
        (temp_dir, file_path)
    }

    #[test]
    fn script_extension_detection() {
        assert!(is_script_path(Path::new("story.ink")));
        assert!(is_script_path(Path::new("dir/chapter.one.ink")));
        assert!(!is_script_path(Path::new("story.txt")));
        assert!(!is_script_path(Path::new("ink")));
        assert!(!is_script_path(Path::new("story.ink.bak")));
    }

    #[test]
    fn load_reads_bytes() {
        let (_dir, path) = create_temp_script_file(b"Hello {name}\n* Go\n", "load.ink");

        let source = Source::load(&path).unwrap();
        assert_eq!(source.bytes(), b"Hello {name}\n* Go\n");
        assert_eq!(source.len(), 18);
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn load_rejects_wrong_extension() {
        let err = Source::load("notes.md").unwrap_err();
        assert!(matches!(err, SourceError::NotAScript(ref p) if p == Path::new("notes.md")));
    }

    #[test]
    fn load_missing_file_is_os_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ink");
        let err = Source::load(&path).unwrap_err();
        match err {
            SourceError::Os { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_bytes_keeps_non_utf8() {
        let source = Source::from_bytes("inline.ink", vec![0xff, b'a']);
        assert_eq!(source.as_ref(), &[0xff, b'a']);
        assert!(!source.is_empty());
    }
}
