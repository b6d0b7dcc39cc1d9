use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::warn;

use crate::content::PostKey;

/// A content file read from disk, not yet split into header and body.
pub struct ContentFile {
    pub key: PostKey,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path, root_dir: &Path) -> io::Result<ContentFile> {
        let key = PostKey::from_path(file_path, root_dir);
        if !key.is_complete() {
            warn!("Post {} is not in <year>/<month>/<day>/<slug>.mdx form, key={:?}", file_path.display(), key);
        }
        Self::read(key, file_path)
    }

    /// Used when the key is already known, e.g. from an address.
    pub fn from_key(key: PostKey, file_path: &Path) -> io::Result<ContentFile> {
        Self::read(key, file_path)
    }

    fn read(key: PostKey, file_path: &Path) -> io::Result<ContentFile> {
        let bytes = fs::read(file_path).map_err(|e| {
            io::Error::new(e.kind(), format!("{} - file={}", e, file_path.display()))
        })?;
        let raw_content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Post {} is not valid UTF-8, invalid bytes replaced", file_path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(ContentFile {
            key,
            file_path: file_path.to_path_buf(),
            raw_content,
        })
    }
}

pub fn is_not_found(e: &io::Error) -> bool {
    e.kind() == ErrorKind::NotFound
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_from_file() -> io::Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("2025/04/03/hello.mdx");
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "hello")?;

        let file = ContentFile::from_file(&path, tmp.path())?;
        assert_eq!(file.key, PostKey::new("2025", "04", "03", "hello"));
        assert_eq!(file.raw_content, "hello");
        Ok(())
    }

    #[test]
    fn test_missing_file_keeps_kind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2025/04/03/missing.mdx");
        let err = ContentFile::from_key(PostKey::new("2025", "04", "03", "missing"), &path)
            .err()
            .unwrap();
        assert!(is_not_found(&err));
        assert!(err.to_string().contains("missing.mdx"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() -> io::Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("bad.mdx");
        fs::write(&path, b"hi\xff\n")?;
        let file = ContentFile::from_file(&path, tmp.path())?;
        assert_eq!(file.raw_content, "hi\u{fffd}\n");
        Ok(())
    }
}
