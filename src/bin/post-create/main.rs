use std::fmt::Write;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use mdx_blog::content::PostKey;
use mdx_blog::text_utils::slugify;

/// Creates a new post at <content-dir>/<YYYY>/<MM>/<DD>/<slug>.mdx for today
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Title of the post
    title: String,

    /// Root of the content tree
    #[arg(short, long, default_value = "content")]
    content_dir: PathBuf,

    /// Tag of the post. Repeat it for more tags
    #[arg(short, long = "tag", default_value = "ai")]
    tags: Vec<String>,

    /// Writes the new post to the stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_header(title: &str, date: &NaiveDate, tags: &[String]) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quote(title));
    let _ = writeln!(&mut buf, "date: {}", date.format("%Y-%m-%d"));
    let tags: Vec<String> = tags.iter().map(|tag| quote(tag)).collect();
    let _ = writeln!(&mut buf, "tags: [{}]", tags.join(", "));
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

fn render_body(title: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Write your content here...");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Section One");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "- Point one");
    let _ = writeln!(&mut buf, "- Point two");
    let _ = writeln!(&mut buf, "- Point three");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Section Two");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "More content here...");

    buf
}

fn post_key(title: &str, date: &NaiveDate) -> Result<PostKey> {
    let slug = slugify(title);
    if slug.is_empty() {
        bail!("Title \"{}\" has no characters usable in a file name", title);
    }

    Ok(PostKey::new(
        &date.format("%Y").to_string(),
        &date.format("%m").to_string(),
        &date.format("%d").to_string(),
        &slug,
    ))
}

fn write_post(file_path: &Path, contents: &str) -> Result<()> {
    use std::io::Write;

    if let Some(dir) = file_path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Error creating directory {}", dir.display()))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(file_path)
        .with_context(|| format!("Error creating post {}", file_path.display()))?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let title = args.title.trim();
    if title.is_empty() {
        bail!("Post title is required");
    }

    let date = Local::now().date_naive();
    let key = post_key(title, &date)?;
    let contents = format!("{}{}", render_header(title, &date, &args.tags), render_body(title));

    if args.stdout {
        print!("{}", contents);
        return Ok(());
    }

    let Some(file_path) = key.file_path(&args.content_dir) else {
        bail!("Could not build a post path for {:?}", key);
    };
    write_post(&file_path, &contents)?;

    println!("Created new post: {}", file_path.display());
    println!("You can now edit this file to add your content.");
    Ok(())
}
