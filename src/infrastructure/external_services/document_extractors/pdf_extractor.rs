use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use reqwest::Client;
use serde_json::{Value, json};

use crate::application::ports::{ContentExtractionError, ContentExtractor, ExtractionResult};
use crate::infrastructure::external_services::google_drive::drive_download_url;
use crate::infrastructure::file_system::LocalFileStore;

/// Default extractor: fetches the stored PDF and pulls its text with lopdf.
pub struct PdfExtractor {
    client: Client,
    local_store: Arc<LocalFileStore>,
}

impl PdfExtractor {
    pub fn new(client: Client, local_store: Arc<LocalFileStore>) -> Self {
        Self {
            client,
            local_store,
        }
    }

    async fn fetch(&self, file_url: &str) -> Result<Vec<u8>, ContentExtractionError> {
        if let Some(file_id) = self.local_store.file_id_from_url(file_url) {
            return self
                .local_store
                .read(file_id)
                .await
                .map_err(|e| ContentExtractionError::FetchFailed(e.to_string()));
        }

        let url = drive_download_url(file_url).unwrap_or_else(|| file_url.to_string());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ContentExtractionError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentExtractionError::FetchFailed(format!(
                "{} respondeu {}",
                url,
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ContentExtractionError::FetchFailed(e.to_string()))
    }
}

/// Text of each page, in page order. Pages that fail are skipped.
fn extract_pages(doc: &Document) -> BTreeMap<u32, String> {
    let pages: Vec<u32> = doc.get_pages().into_keys().collect();

    pages
        .into_par_iter()
        .filter_map(|page_num| match doc.extract_text(&[page_num]) {
            Ok(text) => {
                let lines: Vec<&str> = text
                    .split('\n')
                    .map(str::trim_end)
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                Some((page_num, lines.join("\n")))
            }
            Err(e) => {
                tracing::warn!("Falha ao extrair texto da página {}: {}", page_num, e);
                None
            }
        })
        .collect()
}

fn extract_from_bytes(bytes: &[u8]) -> ExtractionResult {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => return ExtractionResult::error(format!("PDF inválido: {}", e)),
    };

    let page_count = doc.get_pages().len();
    let pages = extract_pages(&doc);
    let texto = pages
        .values()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n");

    if texto.trim().is_empty() {
        return ExtractionResult::error(
            "Nenhum texto encontrado no PDF. Pode ser um documento digitalizado que requer OCR.",
        );
    }

    ExtractionResult::success(json!({
        "texto": texto,
        "paginas": page_count,
    }))
}

#[async_trait]
impl ContentExtractor for PdfExtractor {
    async fn extract(
        &self,
        file_url: &str,
        _schema: &Value,
    ) -> Result<ExtractionResult, ContentExtractionError> {
        let bytes = self.fetch(file_url).await?;

        tokio::task::spawn_blocking(move || extract_from_bytes(&bytes))
            .await
            .map_err(|e| ContentExtractionError::FetchFailed(e.to_string()))
    }
}
