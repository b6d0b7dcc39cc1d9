pub mod config;
pub mod logger;
pub mod content;
pub mod text_utils;
pub mod post;
pub mod post_list;
pub mod post_repository;
pub mod search;
mod test_data;
