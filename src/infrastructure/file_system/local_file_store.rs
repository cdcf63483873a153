use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{
    FileStore, FileStoreError, StoredFile, StoredFileInfo, UploadedFile,
};
use crate::domain::value_objects::StorageProvider;

/// Default store: files on local disk, served back under `/arquivos/{id}`.
pub struct LocalFileStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(base_path: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))
    }

    pub fn public_url(&self, file_id: &str) -> String {
        format!("{}/arquivos/{}", self.public_base_url, file_id)
    }

    /// The file id behind one of this store's public URLs.
    pub fn file_id_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.public_base_url.as_str())?
            .strip_prefix("/arquivos/")
            .filter(|id| !id.is_empty())
    }

    pub async fn read(&self, file_id: &str) -> Result<Vec<u8>, FileStoreError> {
        let file_path = self.get_file_path(file_id)?;

        if !file_path.exists() {
            return Err(FileStoreError::FileNotFound(file_id.to_string()));
        }

        fs::read(&file_path)
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))
    }

    fn get_file_path(&self, file_id: &str) -> Result<PathBuf, FileStoreError> {
        let valid = !file_id.is_empty()
            && !file_id.starts_with('.')
            && file_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(FileStoreError::InvalidPath(file_id.to_string()));
        }
        Ok(self.base_path.join(file_id))
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "arquivo.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Ids are `<uuid>-<sanitized name>`; the part after the uuid is the name.
fn display_name(file_id: &str) -> &str {
    match file_id.split_at_checked(37) {
        Some((prefix, rest))
            if prefix.ends_with('-')
                && prefix.get(..36).is_some_and(|id| Uuid::parse_str(id).is_ok()) =>
        {
            rest
        }
        _ => file_id,
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload_file(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError> {
        self.ensure_directory_exists().await?;

        let file_id = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&file.name));
        let file_path = self.get_file_path(&file_id)?;

        fs::write(&file_path, &file.bytes)
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))?;

        tracing::info!("Arquivo salvo localmente: {}", file_path.display());
        Ok(StoredFile {
            file_url: self.public_url(&file_id),
            file_id,
            provider: StorageProvider::Base44,
            used_fallback: false,
        })
    }

    async fn list_files(&self, page_size: u32) -> Result<Vec<StoredFileInfo>, FileStoreError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| FileStoreError::IoError(e.to_string()))?;
            if !metadata.is_file() {
                continue;
            }

            let id = entry.file_name().to_string_lossy().to_string();
            files.push(StoredFileInfo {
                name: display_name(&id).to_string(),
                created_time: metadata.modified().ok().map(DateTime::<Utc>::from),
                size: Some(metadata.len()),
                web_view_link: Some(self.public_url(&id)),
                id,
            });
        }

        files.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        files.truncate(page_size as usize);
        Ok(files)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), FileStoreError> {
        let file_path = self.get_file_path(file_id)?;

        if !file_path.exists() {
            return Err(FileStoreError::FileNotFound(file_id.to_string()));
        }

        fs::remove_file(&file_path)
            .await
            .map_err(|e| FileStoreError::IoError(e.to_string()))
    }

    fn provider(&self) -> StorageProvider {
        StorageProvider::Base44
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalFileStore {
        LocalFileStore::new(dir.path().join("uploads"), "http://localhost:3000/")
    }

    #[tokio::test]
    async fn test_upload_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let file = UploadedFile::new("Nota Técnica 12.pdf", b"%PDF-1.4".to_vec(), "application/pdf");

        let stored = store.upload_file(&file).await.unwrap();

        assert!(stored.file_id.ends_with("-Nota_T_cnica_12.pdf"));
        assert_eq!(
            stored.file_url,
            format!("http://localhost:3000/arquivos/{}", stored.file_id)
        );
        assert_eq!(store.file_id_from_url(&stored.file_url), Some(stored.file_id.as_str()));
        assert_eq!(store.read(&stored.file_id).await.unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(
            store.read("../segredo").await,
            Err(FileStoreError::InvalidPath(_))
        ));
        assert!(matches!(
            store.delete_file("..").await,
            Err(FileStoreError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.list_files(10).await.unwrap().is_empty());

        let stored = store
            .upload_file(&UploadedFile::new("a.pdf", b"1".to_vec(), "application/pdf"))
            .await
            .unwrap();

        let files = store.list_files(10).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.pdf");
        assert_eq!(files[0].size, Some(1));

        store.delete_file(&stored.file_id).await.unwrap();
        assert!(matches!(
            store.delete_file(&stored.file_id).await,
            Err(FileStoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_foreign_urls_are_not_local() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.file_id_from_url("https://drive.google.com/file/d/1/view"), None);
        assert_eq!(store.file_id_from_url("http://localhost:3000/arquivos/"), None);
    }

    #[test]
    fn test_display_name_strips_uuid_prefix() {
        let id = format!("{}-nota.pdf", Uuid::new_v4());
        assert_eq!(display_name(&id), "nota.pdf");
        assert_eq!(display_name("curto.pdf"), "curto.pdf");

        // Multibyte char across bytes 35..37 must not split inside it.
        let odd = format!("{}é-nota.pdf", "a".repeat(35));
        assert_eq!(display_name(&odd), odd);
    }
}
