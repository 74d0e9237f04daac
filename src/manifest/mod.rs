//! Project-root discovery via manifest files
//!
//! A scan is anchored at the nearest ancestor directory holding a
//! `manifest.json`. The manifest also tells packaged apps and ordinary
//! extensions apart: only the former declares an `app.background` entry.
//! Anything that fails to parse, or parses but has no `name`, is simply not
//! a project - discovery never errors.

use std::fs;
use std::path::{Path, PathBuf};

/// File name that marks a project root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// What a manifest file says the surrounding project is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// A packaged app (`app.background` present)
    PackagedApp,
    /// A browser extension
    Extension,
}

impl ManifestKind {
    /// Display label, as shown in a status line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PackagedApp => "Packaged App",
            Self::Extension => "Extension",
        }
    }
}

/// Walk parent directories upward from `start` until one contains a
/// `manifest.json`.
///
/// `start` may be a file or a directory; discovery begins at the containing
/// directory for files. Returns `None` once the filesystem root is passed
/// without a hit.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() { start } else { start.parent()? };

    loop {
        if dir.join(MANIFEST_FILE).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Classify the manifest at `path`.
///
/// `None` means "does not look like a project": unreadable, unparseable, or
/// missing the mandatory `name` key. Failures are logged at debug level and
/// never propagate.
pub fn inspect_manifest(path: &Path) -> Option<ManifestKind> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Could not read manifest {}: {}", path.display(), e);
            return None;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Could not parse manifest {}: {}", path.display(), e);
            return None;
        }
    };

    value.get("name")?;

    if value.get("app").and_then(|app| app.get("background")).is_some() {
        Some(ManifestKind::PackagedApp)
    } else {
        Some(ManifestKind::Extension)
    }
}

/// Classify the project rooted at `root`, if its manifest qualifies.
pub fn project_kind(root: &Path) -> Option<ManifestKind> {
    inspect_manifest(&root.join(MANIFEST_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_root_found_from_nested_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/views")).unwrap();
        fs::write(root.join(MANIFEST_FILE), r#"{"name": "app"}"#).unwrap();
        fs::write(root.join("src/views/popup.js"), "").unwrap();

        let found = find_project_root(&root.join("src/views/popup.js")).unwrap();
        assert_eq!(found, root);
    }

    #[test]
    fn test_nearest_manifest_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("inner")).unwrap();
        fs::write(root.join(MANIFEST_FILE), r#"{"name": "outer"}"#).unwrap();
        fs::write(root.join("inner").join(MANIFEST_FILE), r#"{"name": "inner"}"#).unwrap();

        let found = find_project_root(&root.join("inner")).unwrap();
        assert_eq!(found, root.join("inner"));
    }

    #[test]
    fn test_no_manifest_anywhere() {
        let temp_dir = TempDir::new().unwrap();
        let start = temp_dir.path().join("a/b");
        fs::create_dir_all(&start).unwrap();

        // The walk passes temp_dir and keeps going; whether it terminates at
        // "/" depends only on nothing above holding a manifest, which is not
        // something a unit test can promise. Scope the assertion to the
        // fixture: nothing at or below temp_dir is returned.
        if let Some(found) = find_project_root(&start) {
            assert!(!found.starts_with(temp_dir.path()));
        }
    }

    #[test]
    fn test_manifest_classification() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let app = root.join("app.json");
        fs::write(&app, r#"{"name": "x", "app": {"background": {"scripts": ["bg.js"]}}}"#)
            .unwrap();
        assert_eq!(inspect_manifest(&app), Some(ManifestKind::PackagedApp));

        let ext = root.join("ext.json");
        fs::write(&ext, r#"{"name": "x", "permissions": []}"#).unwrap();
        assert_eq!(inspect_manifest(&ext), Some(ManifestKind::Extension));
    }

    #[test]
    fn test_manifest_without_name_is_not_a_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("m.json");
        fs::write(&path, r#"{"version": "1.0"}"#).unwrap();

        assert_eq!(inspect_manifest(&path), None);
    }

    #[test]
    fn test_broken_manifest_is_not_a_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("m.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(inspect_manifest(&path), None);
        assert_eq!(inspect_manifest(&temp_dir.path().join("absent.json")), None);
    }

    #[test]
    fn test_project_kind_reads_root_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(MANIFEST_FILE), r#"{"name": "x"}"#).unwrap();

        assert_eq!(project_kind(root), Some(ManifestKind::Extension));
        assert_eq!(ManifestKind::Extension.as_str(), "Extension");
    }
}
