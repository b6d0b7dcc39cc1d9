use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::post_list::POST_EXTENSION;

pub mod content_file;
pub mod frontmatter;

/// Where a post lives: `<root>/<year>/<month>/<day>/<slug>.mdx`.
/// The only stable way to find a post again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PostKey {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl PostKey {
    pub fn new(year: &str, month: &str, day: &str, slug: &str) -> PostKey {
        PostKey {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            slug: slug.to_string(),
        }
    }

    /// Reads the key back from a file path. Directories missing from the
    /// expected shape leave their field empty; the slug is always the file stem.
    pub fn from_path(file_path: &Path, root_dir: &Path) -> PostKey {
        let slug = file_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .map(|name| {
                let suffix = format!(".{}", POST_EXTENSION);
                name.strip_suffix(suffix.as_str()).unwrap_or(&*name).to_string()
            })
            .unwrap_or_default();

        let dirs: Vec<String> = file_path
            .strip_prefix(root_dir)
            .ok()
            .and_then(|rel| rel.parent())
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let segment = |i: usize| dirs.get(i).cloned().unwrap_or_default();

        PostKey {
            year: segment(0),
            month: segment(1),
            day: segment(2),
            slug,
        }
    }

    pub fn is_complete(&self) -> bool {
        !(self.year.is_empty() || self.month.is_empty() || self.day.is_empty() || self.slug.is_empty())
    }

    /// The date spelled by the directories, used when the header has none.
    pub fn path_date(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }

    /// `None` when a segment could escape its directory or name nothing.
    pub fn file_path(&self, root_dir: &Path) -> Option<PathBuf> {
        let segments = [&self.year, &self.month, &self.day, &self.slug];
        if !segments.iter().all(|s| is_plain_segment(s)) {
            return None;
        }

        Some(root_dir
            .join(&self.year)
            .join(&self.month)
            .join(&self.day)
            .join(format!("{}.{}", self.slug, POST_EXTENSION)))
    }

    /// Address used by the page routing: `/post/<year>/<month>/<day>/<slug>`
    pub fn link(&self) -> String {
        format!("/post/{}/{}/{}/{}", self.year, self.month, self.day, self.slug)
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}
