//! Directory listing module
//!
//! Generates the HTML index page for directories without an index file.

use std::cmp::Ordering;
use std::io;
use std::path::Path;
use tokio::fs;

use crate::http::escape_html;

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Directory, or symlink pointing at one
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Relative link target, percent-encoded
    pub fn href(&self) -> String {
        let mut href = urlencoding::encode(&self.name).into_owned();
        if self.is_dir {
            href.push('/');
        }
        href
    }

    /// Text shown for the link: `/` marks directories, `@` symlinks
    pub fn label(&self) -> String {
        let suffix = if self.is_symlink {
            "@"
        } else if self.is_dir {
            "/"
        } else {
            ""
        };
        format!("{}{suffix}", self.name)
    }
}

/// Read the immediate entries of `dir`, sorted case-insensitively
///
/// Ties (names equal ignoring case) fall back to byte order so the page is
/// identical from one run to the next.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|file_type| file_type.is_symlink());
        // fs::metadata follows symlinks
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|meta| meta.is_dir());

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by(compare_names);
    Ok(entries)
}

fn compare_names(a: &ListingEntry, b: &ListingEntry) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Render the listing page
///
/// # Arguments
/// * `display_path` - Decoded request path shown in the title and heading
/// * `entries` - Directory entries, already sorted
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.href(),
            escape_html(&entry.label())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_href_and_label() {
        let file = entry("my file.txt", false, false);
        assert_eq!(file.href(), "my%20file.txt");
        assert_eq!(file.label(), "my file.txt");

        let dir = entry("assets", true, false);
        assert_eq!(dir.href(), "assets/");
        assert_eq!(dir.label(), "assets/");

        let linked_dir = entry("shared", true, true);
        assert_eq!(linked_dir.href(), "shared/");
        assert_eq!(linked_dir.label(), "shared@");
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_listing("/a&b/", &[entry("<script>.js", false, false)]);
        assert!(html.contains("<title>Directory listing for /a&amp;b/</title>"));
        assert!(html.contains(
            "<li><a href=\"%3Cscript%3E.js\">&lt;script&gt;.js</a></li>"
        ));
    }

    #[test]
    fn test_render_empty_directory() {
        let html = render_listing("/empty/", &[]);
        assert!(html.contains("<h1>Directory listing for /empty/</h1>"));
        assert!(html.contains("<ul>\n</ul>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("A.txt"), b"a").unwrap();
        std::fs::write(dir.path().join(".hidden"), b"h").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let labels: Vec<_> = entries.iter().map(ListingEntry::label).collect();
        assert_eq!(labels, vec![".hidden", "A.txt", "b.txt", "c/"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_entries_marks_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(
            entries,
            vec![entry("link", true, true), entry("real", true, false)]
        );
    }

    #[tokio::test]
    async fn test_read_entries_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("missing")).await.is_err());
    }
}
