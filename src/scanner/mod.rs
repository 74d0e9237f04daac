//! Directory traversal and candidate-file selection
//!
//! Files are selected purely by extension; anything else is skipped without
//! error. Traversal order is whatever the filesystem enumerates - callers
//! must not rely on a stable cross-platform order. Symbolic links are never
//! followed, which also means link cycles cannot make traversal diverge;
//! projects that rely on symlinked source directories are out of scope.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions scanned by default: scripts plus HTML pages.
const DEFAULT_EXTENSIONS: [&str; 3] = ["js", "htm", "html"];

/// Walks a directory tree and yields the files worth validating
#[derive(Debug, Clone)]
pub struct FileScanner {
    extensions: Vec<String>,
}

impl FileScanner {
    /// Scanner accepting `.js`, `.htm` and `.html` files.
    pub fn new() -> Self {
        Self { extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect() }
    }

    /// Scanner accepting a custom extension set (leading dots not included).
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Whether a path passes the extension predicate, case-insensitively.
    pub fn is_candidate(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)),
            None => false,
        }
    }

    /// Recursively collect every candidate file under `root`.
    ///
    /// Entries that cannot be visited (permission errors on directories,
    /// entries vanishing mid-walk) are logged and skipped; the walk itself
    /// always completes.
    pub fn find_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_candidate(entry.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
