use crate::error::{Result, ValidationError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Async file discovery engine for walking the corpus content directories.
///
/// Only markdown files are collected; symlinks are not followed.
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery;

impl FileDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Discover markdown files asynchronously in the given path (file or
    /// directory).
    pub async fn discover_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(path).await.map_err(ValidationError::from)?;

        if metadata.is_file() {
            if self.should_process(path) {
                return Ok(vec![path.to_path_buf()]);
            } else {
                return Ok(Vec::new());
            }
        }

        let mut files = Vec::new();
        let mut read_dir = fs::read_dir(path).await.map_err(ValidationError::from)?;

        while let Some(entry) = read_dir.next_entry().await.map_err(ValidationError::from)? {
            let entry_path = entry.path();

            if entry_path.is_symlink() {
                continue;
            }

            // A single unreadable entry never aborts the walk.
            if let Err(e) = self.discover_files_recursive(&entry_path, &mut files).await {
                eprintln!("Warning: Error processing {}: {}", entry_path.display(), e);
            }
        }

        Ok(files)
    }

    /// Recursive helper for discovering files
    fn discover_files_recursive<'a>(
        &'a self,
        path: &'a Path,
        files: &'a mut Vec<PathBuf>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + 'a>> {
        Box::pin(async move {
            let metadata = fs::metadata(path).await.map_err(ValidationError::from)?;

            if metadata.is_file() {
                if self.should_process(path) {
                    files.push(path.to_path_buf());
                }
            } else if metadata.is_dir() {
                let mut read_dir = fs::read_dir(path).await.map_err(ValidationError::from)?;

                while let Some(entry) =
                    read_dir.next_entry().await.map_err(ValidationError::from)?
                {
                    let entry_path = entry.path();

                    if entry_path.is_symlink() {
                        continue;
                    }

                    if let Err(e) = self
                        .discover_files_recursive(&entry_path, files)
                        .await
                    {
                        eprintln!("Warning: Error processing {}: {}", entry_path.display(), e);
                    }
                }
            }

            Ok(())
        })
    }

    /// Check if a file should be processed based on its extension.
    pub fn should_process(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_corpus() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("patterns")).await.unwrap();
        fs::create_dir_all(root.join("vendors/archived"))
            .await
            .unwrap();

        fs::write(root.join("patterns/pattern-a.md"), "# A")
            .await
            .unwrap();
        fs::write(root.join("patterns/README.md"), "# Readme")
            .await
            .unwrap();
        fs::write(root.join("patterns/diagram.png"), "binary")
            .await
            .unwrap();
        fs::write(root.join("vendors/acme.md"), "# Acme")
            .await
            .unwrap();
        fs::write(root.join("vendors/archived/old.md"), "# Old")
            .await
            .unwrap();

        temp_dir
    }

    #[tokio::test]
    async fn test_discover_markdown_files() {
        let temp_dir = create_test_corpus().await;
        let discovery = FileDiscovery::new();

        let files = discovery.discover_files(temp_dir.path()).await.unwrap();
        assert_eq!(files.len(), 4);

        let file_names: HashSet<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert!(file_names.contains("pattern-a.md"));
        assert!(file_names.contains("README.md"));
        assert!(file_names.contains("old.md"));
        assert!(!file_names.contains("diagram.png"));
    }

    #[tokio::test]
    async fn test_single_file_input() {
        let temp_dir = create_test_corpus().await;
        let discovery = FileDiscovery::new();

        let target = temp_dir.path().join("patterns/pattern-a.md");
        let files = discovery.discover_files(&target).await.unwrap();
        assert_eq!(files, vec![target]);

        let png = temp_dir.path().join("patterns/diagram.png");
        let files = discovery.discover_files(&png).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_should_process() {
        let discovery = FileDiscovery::new();

        assert!(discovery.should_process(Path::new("pattern-a.md")));
        assert!(discovery.should_process(Path::new("UPPER.MD")));
        assert!(!discovery.should_process(Path::new("notes.txt")));
        assert!(!discovery.should_process(Path::new("no_extension")));
    }

    #[tokio::test]
    async fn test_nonexistent_directory() {
        let discovery = FileDiscovery::new();
        let result = discovery
            .discover_files(Path::new("/nonexistent/path"))
            .await;

        assert!(result.is_err());
        match result.unwrap_err() {
            ValidationError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }
    }
}
