use fmt::Display;
use std::fmt::Formatter;
use std::{fmt, io};
use std::path::Path;

use serde::Serialize;

use crate::content::content_file::ContentFile;
use crate::content::frontmatter::parse_frontmatter;
use crate::content::PostKey;
use crate::text_utils::{normalize_date, DateValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    /// `YYYY-MM-DD`, or the header's text verbatim when it is not a date
    pub date: String,
    pub formatted_date: String,
    /// Raw MDX body, never rendered here
    pub content: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "key={}/{}/{}/{}, date={}, tags={}\ntitle={}\ncontent:\n{}",
               self.year,
               self.month,
               self.day,
               self.slug,
               self.date,
               self.tags.join(" "),
               self.title,
               self.content
        )
    }
}

/// Example of post, stored as content/2025/04/03/gpt-5-launch.mdx
/// ---
/// title: "GPT-5 Launch"
/// date: 2025-04-03
/// tags: [ai, openai]
/// ---
///
/// # GPT-5 Launch
impl Post {
    pub fn load(file_path: &Path, root_dir: &Path) -> io::Result<Post> {
        let file = ContentFile::from_file(file_path, root_dir)?;
        Ok(Self::from_content_file(&file))
    }

    pub fn from_content_file(file: &ContentFile) -> Post {
        Self::from_string(&file.file_path, file.key.clone(), &file.raw_content)
    }

    pub fn from_string(file_name: &Path, key: PostKey, text: &str) -> Post {
        let (frontmatter, body) = parse_frontmatter(file_name, text);

        let date_value = frontmatter
            .resolve_date()
            .unwrap_or_else(|| DateValue::Text(key.path_date()));
        let date = normalize_date(&date_value);

        Post {
            title: frontmatter.resolve_title(),
            date: date.canonical,
            formatted_date: date.display,
            content: body.to_string(),
            tags: frontmatter.resolve_tags(),
            slug: key.slug,
            year: key.year,
            month: key.month,
            day: key.day,
        }
    }

    pub fn key(&self) -> PostKey {
        PostKey::new(&self.year, &self.month, &self.day, &self.slug)
    }
}
