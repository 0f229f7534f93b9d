//! Content document discovery.
//!
//! Walks the docs source directory and collects the stable id of every
//! content document. Ids mirror the authoring convention: the relative
//! path with the extension stripped, so `docs/api/quickstart.md` is
//! `api/quickstart` and `docs/api/index.md` is `api/index`. No content is
//! read; only discovery happens here.

use std::fs;
use std::path::Path;

use navkit_tree::DocumentIds;

/// Content file extensions that form documents.
const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Scan `source_dir` for content documents and return their ids.
///
/// Hidden entries (`.name`) and partials (`_name`) are skipped at every
/// level. A missing directory yields an empty set; validation downstream
/// reports the dangling references, which is a more useful failure than an
/// I/O error here.
#[must_use]
pub fn scan_document_ids(source_dir: &Path) -> DocumentIds {
    let mut ids = DocumentIds::new();
    if source_dir.is_dir() {
        scan_directory(source_dir, "", &mut ids);
    } else {
        tracing::warn!(path = %source_dir.display(), "docs source directory not found");
    }
    ids
}

fn scan_directory(dir: &Path, prefix: &str, ids: &mut DocumentIds) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(path = %dir.display(), "cannot read directory, skipping");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_prefix = join_id(prefix, &name);
            scan_directory(&path, &child_prefix, ids);
        } else if let Some(stem) = content_stem(&name) {
            ids.insert(join_id(prefix, stem));
        }
    }
}

/// File stem if the name carries a content extension.
fn content_stem(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    CONTENT_EXTENSIONS
        .contains(&ext.to_ascii_lowercase().as_str())
        .then_some(stem)
}

fn join_id(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_scan_flat_files() {
        let dir = create_test_dir();
        fs::write(dir.path().join("intro.md"), "# Intro").unwrap();
        fs::write(dir.path().join("whitepaper.mdx"), "# Whitepaper").unwrap();

        let ids = scan_document_ids(dir.path());

        assert_eq!(ids.len(), 2);
        assert!(ids.contains("intro"));
        assert!(ids.contains("whitepaper"));
    }

    #[test]
    fn test_scan_nested_ids_keep_index() {
        let dir = create_test_dir();
        let api = dir.path().join("api");
        fs::create_dir_all(api.join("endpoints")).unwrap();
        fs::write(api.join("index.md"), "# API").unwrap();
        fs::write(api.join("quickstart.md"), "# Quickstart").unwrap();
        fs::write(api.join("endpoints").join("health.md"), "# Health").unwrap();

        let ids = scan_document_ids(dir.path());

        assert!(ids.contains("api/index"));
        assert!(ids.contains("api/quickstart"));
        assert!(ids.contains("api/endpoints/health"));
    }

    #[test]
    fn test_scan_skips_hidden_and_partials() {
        let dir = create_test_dir();
        fs::write(dir.path().join(".draft.md"), "# Draft").unwrap();
        fs::write(dir.path().join("_partial.md"), "# Partial").unwrap();
        fs::write(dir.path().join("visible.md"), "# Visible").unwrap();
        let hidden_dir = dir.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("page.md"), "# Not a doc").unwrap();

        let ids = scan_document_ids(dir.path());

        assert_eq!(ids.len(), 1);
        assert!(ids.contains("visible"));
    }

    #[test]
    fn test_scan_ignores_non_content_files() {
        let dir = create_test_dir();
        fs::write(dir.path().join("intro.md"), "# Intro").unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();

        let ids = scan_document_ids(dir.path());

        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = create_test_dir();
        let ids = scan_document_ids(&dir.path().join("nonexistent"));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_scan_uppercase_extension() {
        let dir = create_test_dir();
        fs::write(dir.path().join("README.MD"), "# Readme").unwrap();

        let ids = scan_document_ids(dir.path());
        assert!(ids.contains("README"));
    }
}
