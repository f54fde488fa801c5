use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn list_files(&self, suffix: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks, so a linked track counts like a regular file.
            if !tokio::fs::metadata(entry.path()).await?.is_file() {
                continue;
            }
            // Non UTF-8 names cannot match a literal suffix.
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(suffix) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn create_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn location(&self) -> String {
        self.base_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("out"));

        storage.write_file("trip1.json", b"{}").await.unwrap();

        assert_eq!(storage.read_file("trip1.json").await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_list_files_filters_by_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        for name in ["b.csv", "a.csv", "notes.txt", "c.CSV", "d.csv.bak"] {
            storage.write_file(name, b"x").await.unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("dir.csv")).unwrap();

        let names = storage.list_files(".csv").await.unwrap();

        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_files_includes_symlinked_files() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        storage.write_file("plain.csv", b"x").await.unwrap();
        std::fs::write(elsewhere.path().join("real_trip.csv"), "lat,lng").unwrap();
        std::os::unix::fs::symlink(
            elsewhere.path().join("real_trip.csv"),
            temp_dir.path().join("trip.csv"),
        )
        .unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), temp_dir.path().join("linked_dir.csv"))
            .unwrap();

        let names = storage.list_files(".csv").await.unwrap();

        assert_eq!(names, vec!["plain.csv", "trip.csv"]);
        assert_eq!(storage.read_file("trip.csv").await.unwrap(), b"lat,lng");
    }

    #[tokio::test]
    async fn test_list_files_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("absent"));

        assert!(storage.list_files(".json").await.is_err());
    }
}
