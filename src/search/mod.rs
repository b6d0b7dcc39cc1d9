use std::cmp::Ordering;

use serde::Deserialize;

use crate::post::Post;

pub mod fuzzy;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SearchOptions {
    /// Highest score still counted as a match. 0.0 only accepts exact hits.
    pub threshold: f64,
    /// How many characters away from `location` a match may start before
    /// the position alone costs a full 1.0.
    pub distance: usize,
    pub location: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            threshold: 0.3,
            distance: 100,
            location: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedField {
    Title,
    Tag(String),
}

#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub post: &'a Post,
    pub score: f64,
    pub field: MatchedField,
}

struct IndexedPost {
    title: Vec<char>,
    tags: Vec<Vec<char>>,
}

/// Fuzzy index over post titles and tags. Built once from a post list and
/// never changed; build a new one when the list changes.
pub struct SearchIndex<'a> {
    posts: &'a [Post],
    entries: Vec<IndexedPost>,
    options: SearchOptions,
}

fn normalize(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

impl<'a> SearchIndex<'a> {
    pub fn build(posts: &'a [Post]) -> SearchIndex<'a> {
        Self::build_with_options(posts, SearchOptions::default())
    }

    pub fn build_with_options(posts: &'a [Post], options: SearchOptions) -> SearchIndex<'a> {
        let entries = posts
            .iter()
            .map(|post| IndexedPost {
                title: normalize(&post.title),
                tags: post.tags.iter().map(|tag| normalize(tag)).collect(),
            })
            .collect();

        SearchIndex {
            posts,
            entries,
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts matching `text`, best first. A blank query matches nothing.
    pub fn query(&self, text: &str) -> Vec<&'a Post> {
        self.search(text).into_iter().map(|hit| hit.post).collect()
    }

    pub fn search(&self, text: &str) -> Vec<SearchHit<'a>> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }
        let pattern = normalize(text);

        let mut hits: Vec<SearchHit<'a>> = self
            .posts
            .iter()
            .zip(self.entries.iter())
            .filter_map(|(post, entry)| self.best_field(&pattern, post, entry))
            .filter(|hit| hit.score <= self.options.threshold)
            .collect();

        // stable: equal hits keep the order of the post list
        hits.sort_by(rank);
        hits
    }

    fn best_field(&self, pattern: &[char], post: &'a Post, entry: &IndexedPost) -> Option<SearchHit<'a>> {
        let SearchOptions { location, distance, .. } = self.options;

        let mut best = fuzzy::score(pattern, &entry.title, location, distance).map(|score| SearchHit {
            post,
            score,
            field: MatchedField::Title,
        });

        for (tag, indexed) in post.tags.iter().zip(entry.tags.iter()) {
            let Some(score) = fuzzy::score(pattern, indexed, location, distance) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| score < b.score) {
                best = Some(SearchHit {
                    post,
                    score,
                    field: MatchedField::Tag(tag.clone()),
                });
            }
        }

        best
    }
}

fn rank(a: &SearchHit, b: &SearchHit) -> Ordering {
    let field_order = |hit: &SearchHit| match hit.field {
        MatchedField::Title => 0,
        MatchedField::Tag(_) => 1,
    };
    a.score
        .total_cmp(&b.score)
        .then_with(|| field_order(a).cmp(&field_order(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, tags: &[&str], slug: &str) -> Post {
        Post {
            title: title.to_string(),
            date: "2025-04-03".to_string(),
            formatted_date: "April 3, 2025".to_string(),
            content: String::new(),
            slug: slug.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            year: "2025".to_string(),
            month: "04".to_string(),
            day: "03".to_string(),
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("GPT-5 Launch", &["ai", "openai"], "gpt-5-launch"),
            post("Robotics Update", &["hardware"], "robotics-update"),
        ]
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_typo_matches_title() {
        let posts = sample();
        let index = SearchIndex::build(&posts);
        assert_eq!(slugs(index.query("gpt5 lanch")), ["gpt-5-launch"]);
        assert_eq!(slugs(index.query("ROBOTICS")), ["robotics-update"]);
    }

    #[test]
    fn test_no_match() {
        let posts = sample();
        let index = SearchIndex::build(&posts);
        assert!(index.query("zzz-nomatch-zzz").is_empty());
    }

    #[test]
    fn test_blank_query() {
        let posts = sample();
        let index = SearchIndex::build(&posts);
        assert!(index.query("").is_empty());
        assert!(index.query("   \t\n").is_empty());
    }

    #[test]
    fn test_tag_match() {
        let posts = sample();
        let index = SearchIndex::build(&posts);
        let hits = index.search("opnai");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post.slug, "gpt-5-launch");
        assert_eq!(hits[0].field, MatchedField::Tag("openai".to_string()));
        assert!((hits[0].score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_ranking() {
        let posts = vec![
            post("Trusting Rust", &[], "trusting-rust"),
            post("Rust Async", &[], "rust-async"),
            post("Cooking", &["rust"], "cooking"),
        ];
        let index = SearchIndex::build(&posts);
        let hits = index.search("rust");
        let order: Vec<&str> = hits.iter().map(|h| h.post.slug.as_str()).collect();
        assert_eq!(order, ["rust-async", "cooking", "trusting-rust"]);
        assert_eq!(hits[0].field, MatchedField::Title);
        assert_eq!(hits[1].field, MatchedField::Tag("rust".to_string()));
    }

    #[test]
    fn test_late_match_needs_wider_distance() {
        let title = format!("{} launch", "x".repeat(49));
        let posts = vec![post(&title, &[], "late")];

        let index = SearchIndex::build(&posts);
        assert!(index.query("launch").is_empty());

        let options = SearchOptions { distance: 1000, ..SearchOptions::default() };
        let index = SearchIndex::build_with_options(&posts, options);
        assert_eq!(slugs(index.query("launch")), ["late"]);
    }

    #[test]
    fn test_threshold_zero_is_exact() {
        let posts = sample();
        let options = SearchOptions { threshold: 0.0, ..SearchOptions::default() };
        let index = SearchIndex::build_with_options(&posts, options);
        assert!(index.query("gpt5 lanch").is_empty());
        assert_eq!(slugs(index.query("gpt-5")), ["gpt-5-launch"]);
    }

    #[test]
    fn test_empty_index() {
        let posts: Vec<Post> = vec![];
        let index = SearchIndex::build(&posts);
        assert!(index.is_empty());
        assert!(index.query("anything").is_empty());
    }
}
