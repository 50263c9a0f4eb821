//! Local file storage for uploaded images and generated logos.
//!
//! Files live under `{upload_dir}/universities/{id}/` and are served back
//! at `{base_url}/uploads/...` by the static file route.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::config::{Config, UPLOADS_PATH};
use crate::errors::{AppError, AppResult};

const LOGO_FILE_NAME: &str = "logo.svg";
const LOGO_MAX_CHARS: usize = 4;

#[derive(Debug, Clone)]
pub struct FileStorage {
    upload_dir: PathBuf,
    base_url: String,
}

impl FileStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upload_dir, &config.base_url)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn university_dir(&self, university_id: i64) -> PathBuf {
        self.upload_dir
            .join("universities")
            .join(university_id.to_string())
    }

    fn uploads_prefix(&self) -> String {
        format!("{}{}/", self.base_url, UPLOADS_PATH)
    }

    fn university_url(&self, university_id: i64, file_name: &str) -> String {
        format!(
            "{}universities/{}/{}",
            self.uploads_prefix(),
            university_id,
            file_name
        )
    }

    /// Save an uploaded image under a fresh UUID name, keeping the original
    /// extension, and return its public URL.
    pub async fn store_university_image(
        &self,
        university_id: i64,
        original_name: Option<&str>,
        data: &[u8],
    ) -> AppResult<String> {
        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let dir = self.university_dir(university_id);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to store image for university {}: {}",
                university_id, e
            ))
        })?;
        fs::write(dir.join(&file_name), data).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to store image for university {}: {}",
                university_id, e
            ))
        })?;

        tracing::info!(university_id, file = %file_name, "Stored university image");
        Ok(self.university_url(university_id, &file_name))
    }

    /// Delete a previously stored file given its public URL. External URLs
    /// are left alone and I/O failures are only logged.
    pub async fn delete_by_url(&self, url: &str) {
        let Some(path) = self.local_path(url) else {
            return;
        };
        match fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Deleted stored file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Could not delete stored file"),
        }
    }

    /// Drop every stored university file; used when the catalog is wiped
    pub async fn clear_universities(&self) -> AppResult<()> {
        let root = self.upload_dir.join("universities");
        match fs::remove_dir_all(&root).await {
            Ok(()) => {
                tracing::info!(path = %root.display(), "Cleared university uploads");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!(
                "Failed to clear {}: {}",
                root.display(),
                e
            ))),
        }
    }

    /// Map a public URL back to a path inside the upload directory
    fn local_path(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(&self.uploads_prefix())?;
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.upload_dir.join(relative))
    }

    /// Write the placeholder logo for a university. Returns `None` when the
    /// file cannot be written.
    pub async fn write_logo_svg(
        &self,
        university_id: i64,
        abbreviation: &str,
        color: &str,
    ) -> Option<String> {
        let svg = logo_svg(abbreviation, color);
        let dir = self.university_dir(university_id);

        let result = async {
            fs::create_dir_all(&dir).await?;
            fs::write(dir.join(LOGO_FILE_NAME), svg).await
        }
        .await;

        match result {
            Ok(()) => Some(self.university_url(university_id, LOGO_FILE_NAME)),
            Err(e) => {
                tracing::warn!(university_id, error = %e, "Could not generate SVG logo");
                None
            }
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Font size for a logo label of `len` characters
pub fn logo_font_size(len: usize) -> u32 {
    match len {
        0..=2 => 76,
        3 => 56,
        _ => 44,
    }
}

pub fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Rounded square with the abbreviation centred in bold white text
pub fn logo_svg(abbreviation: &str, color: &str) -> String {
    let label: String = abbreviation.chars().take(LOGO_MAX_CHARS).collect();
    let font_size = logo_font_size(label.chars().count());

    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200' viewBox='0 0 200 200'>\
         <rect width='200' height='200' rx='28' fill='{}'/>\
         <text x='100' y='108' font-size='{}' font-family='Arial,Helvetica,sans-serif' \
         font-weight='bold' fill='white' text-anchor='middle' dominant-baseline='middle' \
         letter-spacing='-1'>{}</text></svg>",
        color,
        font_size,
        xml_escape(&label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &Path) -> FileStorage {
        FileStorage::new(dir, "http://localhost:8080/")
    }

    #[test]
    fn test_logo_font_size_by_length() {
        assert_eq!(logo_font_size(1), 76);
        assert_eq!(logo_font_size(2), 76);
        assert_eq!(logo_font_size(3), 56);
        assert_eq!(logo_font_size(4), 44);
    }

    #[test]
    fn test_logo_truncates_and_escapes() {
        let svg = logo_svg("ENSIAS", "#1565C0");
        assert!(svg.contains(">ENSI</text>"));
        assert!(svg.contains("font-size='44'"));
        assert!(svg.contains("fill='#1565C0'"));

        let svg = logo_svg("A&M", "#000");
        assert!(svg.contains(">A&amp;M</text>"));
        assert!(svg.contains("font-size='56'"));

        let svg = logo_svg("<b>", "#000");
        assert!(svg.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_extension_is_sanitised() {
        assert_eq!(extension_of("campus.PNG"), Some("png".to_string()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("evil.p/hp"), None);
    }

    #[tokio::test]
    async fn test_write_logo_svg() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let url = storage.write_logo_svg(7, "EMI", "#0D47A1").await;

        assert_eq!(
            url.as_deref(),
            Some("http://localhost:8080/uploads/universities/7/logo.svg")
        );
        let written = std::fs::read_to_string(dir.path().join("universities/7/logo.svg")).unwrap();
        assert!(written.contains(">EMI</text>"));
    }

    #[tokio::test]
    async fn test_write_logo_svg_io_failure_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the directory tree should go
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"x").unwrap();

        let storage = storage(&blocker);
        assert_eq!(storage.write_logo_svg(1, "X", "#fff").await, None);
    }

    #[tokio::test]
    async fn test_store_and_delete_image() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let url = storage
            .store_university_image(3, Some("photo.jpg"), b"jpeg-bytes")
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/uploads/universities/3/"));
        assert!(url.ends_with(".jpg"));

        let path = storage.local_path(&url).unwrap();
        assert!(path.exists());

        storage.delete_by_url(&url).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_clear_universities_keeps_other_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());
        storage.write_logo_svg(1, "EMI", "#0D47A1").await.unwrap();
        storage.write_logo_svg(2, "ENSA", "#B71C1C").await.unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();

        storage.clear_universities().await.unwrap();

        assert!(!dir.path().join("universities").exists());
        assert!(dir.path().join("keep.txt").exists());
        // Nothing left to clear is not an error
        storage.clear_universities().await.unwrap();
    }

    #[test]
    fn test_external_and_traversal_urls_are_not_local() {
        let storage = storage(Path::new("/srv/uploads"));
        assert!(storage.local_path("https://cdn.example.com/a.png").is_none());
        assert!(storage
            .local_path("http://localhost:8080/uploads/../etc/passwd")
            .is_none());
    }
}
