use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use spdlog::debug;

use crate::content::content_file::{is_not_found, ContentFile};
use crate::content::PostKey;
use crate::post::Post;
use crate::post_list::PostList;

/// Reads posts straight from the content directory on every call.
/// Nothing is cached, two calls never share state.
pub struct PostRepository {
    pub root_dir: PathBuf,
}

impl PostRepository {
    pub fn new(root_dir: &Path) -> PostRepository {
        PostRepository {
            root_dir: root_dir.to_path_buf(),
        }
    }

    /// All posts, newest first.
    pub fn list_all(&self) -> io::Result<Vec<Post>> {
        let files = PostList::new(&self.root_dir).retrieve_files()?;

        let mut posts = Vec::with_capacity(files.len());
        for file in files.iter() {
            match Post::load(file, &self.root_dir) {
                Ok(post) => posts.push(post),
                Err(e) if is_not_found(&e) => debug!("Post {} vanished before reading, skipping", file.display()),
                Err(e) => return Err(e),
            }
        }

        sort_newest_first(&mut posts);
        debug!("Loaded {} posts from {}", posts.len(), self.root_dir.display());
        Ok(posts)
    }

    /// Loads a single post without scanning. `Ok(None)` when no such post exists.
    pub fn get_by_slug(&self, year: &str, month: &str, day: &str, slug: &str) -> io::Result<Option<Post>> {
        let key = PostKey::new(year, month, day, slug);
        let Some(file_path) = key.file_path(&self.root_dir) else {
            debug!("Post key {:?} does not name a file", key);
            return Ok(None);
        };

        if !file_path.is_file() {
            return Ok(None);
        }

        match ContentFile::from_key(key, &file_path) {
            Ok(file) => Ok(Some(Post::from_content_file(&file))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn calendar_date(post: &Post) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&post.date, "%Y-%m-%d").ok()
}

/// Descending by calendar date; posts without one go last. Same day posts
/// are ordered by slug, then by their directories.
fn newest_first(a: &Post, b: &Post) -> Ordering {
    calendar_date(b)
        .cmp(&calendar_date(a))
        .then_with(|| a.slug.cmp(&b.slug))
        .then_with(|| (&a.year, &a.month, &a.day).cmp(&(&b.year, &b.month, &b.day)))
}

pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(newest_first);
}
