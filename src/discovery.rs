//! Page discovery: find markdown pages under a docs root and read their front matter.

use crate::error::{DocscoreError, Result};
use crate::types::{Collection, FileEntry, ScoreConfig, SkippedFile, TestStatus, page_slug};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&field_pattern("title")).unwrap());
static OWNER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&field_pattern("owner")).unwrap());
static TEST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&field_pattern("test")).unwrap());

/// `<field>:` at a word boundary, then the rest of that line.
fn field_pattern(field: &str) -> String {
    format!(r"\b{}:[ \t]*[\w|/]*.*", regex::escape(field))
}

fn extract(re: &Regex, field: &str, body: &str) -> String {
    let Some(m) = re.find(body) else {
        return String::new();
    };
    let value = &m.as_str()[field.len() + 1..];
    let value = value.strip_prefix(' ').unwrap_or(value);
    value.strip_suffix('\r').unwrap_or(value).to_string()
}

/// Extract the value of the first `<field>: value` line in `body`.
///
/// The `<field>:` prefix and one leading space are stripped. Returns an empty
/// string when the field does not appear.
pub fn get_and_trim_field(field: &str, body: &str) -> String {
    match Regex::new(&field_pattern(field)) {
        Ok(re) => extract(&re, field, body),
        Err(_) => String::new(),
    }
}

/// Read the `test:` field as a test status.
pub fn test_status(body: &str) -> TestStatus {
    TestStatus::from_field(&extract(&TEST_RE, "test", body))
}

/// Fields read from a page's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub owner: String,
    pub test_status: TestStatus,
}

impl FrontMatter {
    pub fn parse(body: &str) -> Self {
        Self {
            title: extract(&TITLE_RE, "title", body),
            owner: extract(&OWNER_RE, "owner", body),
            test_status: test_status(body),
        }
    }
}

/// Public URL for a page, built from its slug.
pub fn page_url(relative: &str, config: &ScoreConfig) -> String {
    format!("{}{}", config.base_url, page_slug(relative))
}

/// Check if a relative path falls under an excluded section.
pub fn is_excluded(relative: &str, config: &ScoreConfig) -> bool {
    config
        .exclude_dirs
        .iter()
        .any(|prefix| relative.starts_with(prefix.as_str()))
}

/// `/`-separated form of `path` relative to `root`.
fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Discover and read every scorable markdown page under `root`.
///
/// Directory symlinks are not followed. Files that cannot be read are
/// recorded in [`Collection::skipped`] and the walk continues. Only a root
/// that cannot be searched at all is an error.
pub fn collect_files(root: &Path, config: &ScoreConfig) -> Result<Collection> {
    if !root.is_dir() {
        return Err(DocscoreError::Walk {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut collection = Collection::default();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), "skipping unreadable path: {}", e);
                collection.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_dir() || !is_markdown(path) || !path.is_file() {
            continue;
        }

        let relative = relative_path(path, root);
        if is_excluded(&relative, config) {
            debug!(%relative, "excluded");
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), "unable to read page: {}", e);
                collection.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let front = FrontMatter::parse(&content);
        collection.entries.push(FileEntry {
            url: page_url(&relative, config),
            test_status: front.test_status,
            title: front.title,
            owner: front.owner,
            notes: vec![format!("Relative path:{}", relative)],
            score: 0,
            full_path: path.to_path_buf(),
            relative,
        });
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_page(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    // --- get_and_trim_field ---

    #[test]
    fn field_basic() {
        let body = "---\ntitle: Traffic Management\nowner: istio/wg-networking-maintainers\ntest: yes\n---\n";
        assert_eq!(get_and_trim_field("title", body), "Traffic Management");
        assert_eq!(
            get_and_trim_field("owner", body),
            "istio/wg-networking-maintainers"
        );
        assert_eq!(get_and_trim_field("test", body), "yes");
    }

    #[test]
    fn front_matter_parse() {
        let front = FrontMatter::parse("---\ntitle: A\nowner: bob\ntest: yes\n---\n");
        assert_eq!(
            front,
            FrontMatter {
                title: "A".to_string(),
                owner: "bob".to_string(),
                test_status: TestStatus::Yes,
            }
        );
    }

    #[test]
    fn field_missing() {
        assert_eq!(get_and_trim_field("owner", "title: A\n"), "");
        assert_eq!(test_status("title: A\n"), TestStatus::Unknown);
    }

    #[test]
    fn field_first_match_wins() {
        let body = "test: no\ntest: yes\n";
        assert_eq!(get_and_trim_field("test", body), "no");
    }

    #[test]
    fn field_strips_one_space_only() {
        assert_eq!(get_and_trim_field("title", "title:A"), "A");
        assert_eq!(get_and_trim_field("title", "title:  A"), " A");
    }

    #[test]
    fn field_does_not_cross_lines() {
        assert_eq!(get_and_trim_field("title", "title:\nowner: bob\n"), "");
    }

    #[test]
    fn field_ignores_longer_keys() {
        let body = "linktitle: Short\ntitle: Full Title\n";
        assert_eq!(get_and_trim_field("title", body), "Full Title");
    }

    #[test]
    fn field_crlf() {
        assert_eq!(get_and_trim_field("test", "test: n/a\r\n"), "n/a");
        assert_eq!(test_status("test: n/a\r\n"), TestStatus::NotApplicable);
    }

    // --- page_url / is_excluded ---

    #[test]
    fn page_url_uses_parent_dir() {
        let config = ScoreConfig::istio();
        assert_eq!(
            page_url("en/docs/tasks/traffic/index.md", &config),
            "https://preliminary.istio.io/latest/docs/tasks/traffic"
        );
        assert_eq!(
            page_url("zh/docs/setup/index.md", &config),
            "https://preliminary.istio.io/latest/zh/docs/setup"
        );
    }

    #[test]
    fn excluded_sections() {
        let config = ScoreConfig::istio();
        assert!(is_excluded("en/blog/foo.md", &config));
        assert!(is_excluded("zh/news/2020/index.md", &config));
        assert!(is_excluded("en/docs/reference/glossary/envoy.md", &config));
        assert!(!is_excluded("en/docs/tasks/foo.md", &config));
        assert!(!is_excluded("en/docs/reference/config/index.md", &config));
    }

    // --- collect_files ---

    #[test]
    fn collect_files_reads_front_matter() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(
            root,
            "en/docs/tasks/foo/index.md",
            "---\ntitle: Foo\nowner: alice\ntest: no\n---\nBody\n",
        );

        let config = ScoreConfig::istio();
        let collection = collect_files(root, &config).unwrap();
        assert_eq!(collection.entries.len(), 1);
        let e = &collection.entries[0];
        assert_eq!(e.relative, "en/docs/tasks/foo/index.md");
        assert_eq!(e.title, "Foo");
        assert_eq!(e.owner, "alice");
        assert_eq!(e.test_status, TestStatus::No);
        assert_eq!(e.url, "https://preliminary.istio.io/latest/docs/tasks/foo");
        assert_eq!(e.score, 0);
        assert_eq!(e.notes, vec!["Relative path:en/docs/tasks/foo/index.md"]);
        assert!(e.full_path.ends_with("en/docs/tasks/foo/index.md"));
    }

    #[test]
    fn collect_files_filters_extension_and_exclusions() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "en/docs/tasks/foo.md", "title: Foo\n");
        write_page(root, "en/blog/foo.md", "title: Blog\n");
        write_page(root, "en/docs/tasks/foo.html", "title: Html\n");
        write_page(root, "en/docs/tasks/notes.txt", "title: Txt\n");

        let config = ScoreConfig::istio();
        let collection = collect_files(root, &config).unwrap();
        let rels: Vec<_> = collection.entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(rels, vec!["en/docs/tasks/foo.md"]);
        assert!(collection.skipped.is_empty());
    }

    #[test]
    fn collect_files_extra_exclusions() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "en/docs/ops/a.md", "title: A\n");
        write_page(root, "en/docs/setup/b.md", "title: B\n");

        let mut config = ScoreConfig::istio();
        config.exclude_dirs.push("en/docs/ops".to_string());
        let collection = collect_files(root, &config).unwrap();
        assert_eq!(collection.entries.len(), 1);
        assert_eq!(collection.entries[0].relative, "en/docs/setup/b.md");
    }

    #[test]
    fn collect_files_skips_unreadable_and_continues() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "en/docs/a.md", "title: A\n");
        // Invalid UTF-8 cannot be read as a string.
        fs::write(root.join("en/docs/b.md"), [0xff, 0xfe, 0xfd]).unwrap();
        write_page(root, "en/docs/c.md", "title: C\n");

        let config = ScoreConfig::istio();
        let collection = collect_files(root, &config).unwrap();
        assert_eq!(collection.entries.len(), 2);
        assert_eq!(collection.skipped.len(), 1);
        assert!(collection.skipped[0].path.ends_with("b.md"));
    }

    #[test]
    fn collect_files_ignores_md_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("en/docs/weird.md")).unwrap();

        let config = ScoreConfig::istio();
        let collection = collect_files(root, &config).unwrap();
        assert!(collection.entries.is_empty());
    }

    #[test]
    fn collect_files_root_spellings() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_page(&site, "en/docs/a/index.md", "title: A\n");
        write_page(&site, "en/blog/post/index.md", "title: Post\n");

        let config = ScoreConfig::istio();
        let roots = [
            site.clone(),
            tmp.path().join(".").join("site"),
            site.join("."),
            PathBuf::from(format!("{}/", site.display())),
            site.join("en").join(".."),
        ];
        for root in &roots {
            let collection = collect_files(root, &config).unwrap();
            let rels: Vec<_> = collection.entries.iter().map(|e| e.relative.as_str()).collect();
            assert_eq!(rels, vec!["en/docs/a/index.md"], "root {}", root.display());
            assert_eq!(
                collection.entries[0].url,
                "https://preliminary.istio.io/latest/docs/a"
            );
        }
    }

    #[test]
    fn collect_files_relative_to_nested_root() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_page(&site, "en/docs/a/index.md", "title: A\n");

        let config = ScoreConfig::istio();
        let collection = collect_files(&site.join(".").join("en"), &config).unwrap();
        assert_eq!(collection.entries[0].relative, "docs/a/index.md");
        let collection = collect_files(&site.join("en/docs/"), &config).unwrap();
        assert_eq!(collection.entries[0].relative, "a/index.md");
    }

    #[cfg(unix)]
    #[test]
    fn collect_files_does_not_follow_symlink_cycles() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "en/docs/a/index.md", "title: A\n");
        std::os::unix::fs::symlink(root.join("en"), root.join("en/docs/loop")).unwrap();

        let config = ScoreConfig::istio();
        let collection = collect_files(root, &config).unwrap();
        let rels: Vec<_> = collection.entries.iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(rels, vec!["en/docs/a/index.md"]);
        assert!(collection.skipped.is_empty());
    }

    #[test]
    fn collect_files_missing_root() {
        let tmp = TempDir::new().unwrap();
        let config = ScoreConfig::istio();
        let err = collect_files(&tmp.path().join("nope"), &config).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn collect_files_empty() {
        let tmp = TempDir::new().unwrap();
        let config = ScoreConfig::istio();
        let collection = collect_files(tmp.path(), &config).unwrap();
        assert!(collection.entries.is_empty());
        assert!(collection.skipped.is_empty());
    }
}
