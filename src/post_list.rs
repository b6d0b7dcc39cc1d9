use std::{fs, io};
use std::path::{Path, PathBuf};

use spdlog::debug;

pub const POST_EXTENSION: &str = "mdx";

pub struct PostList {
    pub root_dir: PathBuf,
    pub extension: String,
}

impl PostList {
    pub fn new(root_dir: &Path) -> PostList {
        PostList {
            root_dir: root_dir.to_path_buf(),
            extension: POST_EXTENSION.to_string(),
        }
    }

    /// Every content file under the root, at any depth, in no particular order.
    /// A missing root is just an empty blog.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        if !self.root_dir.is_dir() {
            debug!("Content dir {} not found", self.root_dir.display());
            return Ok(posts);
        }

        let mut dirs = vec![self.root_dir.clone()];
        while let Some(dir) = dirs.pop() {
            let entries = fs::read_dir(&dir)?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    dirs.push(path);
                } else if self.is_post_file(&path) {
                    posts.push(path);
                }
            }
        }

        debug!("Found {} post files in {}", posts.len(), self.root_dir.display());
        Ok(posts)
    }

    fn is_post_file(&self, path: &Path) -> bool {
        path.is_file()
            && path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(&format!(".{}", self.extension)))
                .unwrap_or(false)
    }
}
