use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::application::ports::{
    FileStore, FileStoreError, StoredFile, StoredFileInfo, UploadedFile,
};
use crate::domain::value_objects::StorageProvider;

use super::service_account::TokenProvider;

pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com";
const LIST_FIELDS: &str = "files(id,name,createdTime,size,webViewLink)";

pub fn drive_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

/// Direct-download form of a Drive link (`/file/d/{id}/...` or `open?id=`),
/// if `url` is one.
pub fn drive_download_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if parsed.host_str() != Some("drive.google.com") {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    let file_id = match (segments.next(), segments.next()) {
        (Some("file"), Some("d")) => segments.next().map(str::to_string),
        (Some("open"), _) | (Some("uc"), _) => parsed
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned()),
        _ => None,
    }
    .filter(|id| !id.is_empty())?;

    let mut download = Url::parse("https://drive.google.com/uc").ok()?;
    download
        .query_pairs_mut()
        .append_pair("export", "download")
        .append_pair("id", &file_id);
    Some(download.into())
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "createdTime")]
    created_time: Option<DateTime<Utc>>,
    size: Option<String>,
    #[serde(rename = "webViewLink")]
    web_view_link: Option<String>,
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Uploads into one Drive folder with a service account.
pub struct GoogleDriveStore {
    client: Client,
    tokens: Arc<dyn TokenProvider>,
    api_base: String,
    folder_id: String,
}

impl GoogleDriveStore {
    pub fn new(
        client: Client,
        tokens: Arc<dyn TokenProvider>,
        api_base: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            folder_id: folder_id.into(),
        }
    }

    fn multipart_body(&self, file: &UploadedFile, boundary: &str) -> Vec<u8> {
        let metadata = json!({
            "name": file.name,
            "parents": [self.folder_id],
            "mimeType": file.mime_type,
        });

        let mut body = Vec::with_capacity(file.bytes.len() + 512);
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{m}\r\n--{b}\r\nContent-Type: {t}\r\n\r\n",
                b = boundary,
                m = metadata,
                t = file.mime_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    async fn share_publicly(&self, token: &str, file_id: &str) -> Result<(), FileStoreError> {
        let response = self
            .client
            .post(format!(
                "{}/drive/v3/files/{}/permissions",
                self.api_base, file_id
            ))
            .bearer_auth(token)
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await
            .map_err(|e| FileStoreError::NetworkError(e.to_string()))?;

        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, FileStoreError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap_or_default();
    let message = body["error"]["message"]
        .as_str()
        .unwrap_or("Unknown error")
        .to_string();
    Err(FileStoreError::ApiError { status, message })
}

#[async_trait]
impl FileStore for GoogleDriveStore {
    async fn upload_file(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError> {
        let token = self.tokens.access_token().await?;
        let boundary = format!("natjus-{}", Uuid::new_v4().simple());

        let response = self
            .client
            .post(format!(
                "{}/upload/drive/v3/files?uploadType=multipart&fields=id,name,webViewLink",
                self.api_base
            ))
            .bearer_auth(&token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(self.multipart_body(file, &boundary))
            .send()
            .await
            .map_err(|e| FileStoreError::NetworkError(e.to_string()))?;

        let created: DriveFile = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| FileStoreError::ApiError {
                status: 200,
                message: format!("resposta inesperada do Drive: {}", e),
            })?;

        // The upload stands even if the file cannot be made public.
        if let Err(e) = self.share_publicly(&token, &created.id).await {
            tracing::warn!(
                "Não foi possível tornar {} público no Drive: {}",
                created.id,
                e
            );
        }

        tracing::info!("Upload para Google Drive concluído: {}", created.id);
        Ok(StoredFile {
            file_url: drive_view_url(&created.id),
            file_id: created.id,
            provider: StorageProvider::GoogleDrive,
            used_fallback: false,
        })
    }

    async fn list_files(&self, page_size: u32) -> Result<Vec<StoredFileInfo>, FileStoreError> {
        let token = self.tokens.access_token().await?;
        let query = format!("'{}' in parents and trashed=false", self.folder_id);
        let page_size = page_size.to_string();

        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.api_base))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("pageSize", page_size.as_str()),
                ("fields", LIST_FIELDS),
                ("orderBy", "createdTime desc"),
            ])
            .send()
            .await
            .map_err(|e| FileStoreError::NetworkError(e.to_string()))?;

        let list: DriveFileList = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| FileStoreError::ApiError {
                status: 200,
                message: format!("resposta inesperada do Drive: {}", e),
            })?;

        Ok(list
            .files
            .into_iter()
            .map(|f| StoredFileInfo {
                size: f.size.and_then(|s| s.parse().ok()),
                id: f.id,
                name: f.name,
                created_time: f.created_time,
                web_view_link: f.web_view_link,
            })
            .collect())
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), FileStoreError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .delete(format!("{}/drive/v3/files/{}", self.api_base, file_id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| FileStoreError::NetworkError(e.to_string()))?;

        match ensure_success(response).await {
            Ok(_) => Ok(()),
            Err(FileStoreError::ApiError { status: 404, .. }) => {
                Err(FileStoreError::FileNotFound(file_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn provider(&self) -> StorageProvider {
        StorageProvider::GoogleDrive
    }
}
