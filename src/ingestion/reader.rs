//! Document discovery for ingestion

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Extensions accepted for ingestion
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "text"];

/// Whether the file looks like an ingestible text document
pub fn is_text_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect all ingestible files under `dir`, sorted for deterministic
/// processing order.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && is_text_document(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Source name recorded for a file: its path relative to the ingest root
pub fn source_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn accepts_text_and_markdown_only() {
        assert!(is_text_document(Path::new("notes.txt")));
        assert!(is_text_document(Path::new("README.md")));
        assert!(is_text_document(Path::new("GUIDE.Markdown")));
        assert!(!is_text_document(Path::new("report.pdf")));
        assert!(!is_text_document(Path::new("Makefile")));
    }

    #[test]
    fn collects_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
        fs::write(dir.path().join("skip.bin"), [0u8]).unwrap();

        let files = collect_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| source_name(dir.path(), p))
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt", "sub/c.txt"]);
    }
}
