//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── course_ids.json       # Course references from the listing pass
//! ├── course_details.json   # Scraped courses with details
//! └── course_details.csv    # Fixed-column export of the details
//! ```
//!
//! Every write replaces the previous file atomically.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ScrapedCourse;
use crate::storage::csv::to_csv_bytes;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Root directory of this storage.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    pub async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Write pretty-printed JSON (2-space indent).
    pub async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    pub async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Write the fixed-column CSV export.
    pub async fn write_csv(&self, key: &str, courses: &[ScrapedCourse]) -> Result<PathBuf> {
        let bytes = to_csv_bytes(courses)?;
        self.write_bytes(key, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDetail, CourseRef};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!storage.path("test.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let data = storage.read_bytes("nope.txt").await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("out/nested"));

        let path = storage.write_json("course_ids.json", &Vec::<CourseRef>::new()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_json_two_space_indent_and_overwrite() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage
            .write_json("course_ids.json", &vec![CourseRef::new("1", "1"), CourseRef::new("1", "2")])
            .await
            .unwrap();
        storage
            .write_json("course_ids.json", &vec![CourseRef::new("12", "99")])
            .await
            .unwrap();

        let text = std::fs::read_to_string(storage.path("course_ids.json")).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"catoid\": \"12\",\n    \"coid\": \"99\"\n  }\n]"
        );
    }

    #[tokio::test]
    async fn test_scraped_courses_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let mut detail = CourseDetail {
            url: "https://catalogue.usc.edu/ajax/preview_course.php?catoid=12&coid=99&show"
                .to_string(),
            title: "WRIT 150".to_string(),
            ..CourseDetail::default()
        };
        detail.fields.insert("Units".to_string(), "4".to_string());
        detail.fields.insert("GE satisfied".to_string(), String::new());
        let courses = vec![ScrapedCourse::new(CourseRef::new("12", "99"), detail)];

        storage.write_json("course_details.json", &courses).await.unwrap();
        let loaded: Vec<ScrapedCourse> = storage
            .read_json("course_details.json")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, courses);
    }

    #[tokio::test]
    async fn test_write_csv() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let path = storage.write_csv("course_details.csv", &[]).await.unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("url,title,Units,"));
    }
}
