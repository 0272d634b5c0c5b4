//! Page discovery by filesystem walking.
//!
//! Every `.md` file under the source directory is a page. Its URL path has a
//! leading slash, no extension, and `index.md` maps to its directory
//! (`2.0/resources/index.md` → `/2.0/resources/`).

use std::fs;
use std::path::{Path, PathBuf};

/// Directories never scanned for pages.
const SKIPPED_DIRS: &[&str] = &["node_modules", "public"];

/// Discovers pages under a source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub(crate) fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source tree and return sorted URL paths.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub(crate) fn scan(&self) -> Vec<String> {
        let mut pages = Vec::new();
        if self.source_dir.is_dir() {
            scan_directory(&self.source_dir, "", &mut pages);
        }
        pages.sort();
        pages
    }
}

fn scan_directory(dir: &Path, url_prefix: &str, pages: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

        if is_dir {
            if SKIPPED_DIRS.contains(&name.as_str()) {
                continue;
            }
            let child_prefix = format!("{url_prefix}{name}/");
            scan_directory(&path, &child_prefix, pages);
        } else if path.extension().is_some_and(|e| e == "md") {
            pages.push(file_url(url_prefix, &name));
        }
    }
}

/// URL path for a markdown file `name` inside the directory at `url_prefix`.
fn file_url(url_prefix: &str, name: &str) -> String {
    let stem = name.strip_suffix(".md").unwrap_or(name);
    if stem.eq_ignore_ascii_case("index") {
        format!("/{url_prefix}")
    } else {
        format!("/{url_prefix}{stem}")
    }
}
