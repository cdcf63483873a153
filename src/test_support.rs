//! In-memory fakes shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::application::ports::{
    ContentExtractionError, ContentExtractor, ExtractionResult, FileStore, FileStoreError,
    GeneratedContent, GenerationOptions, StoredFile, StoredFileInfo, TextGenerationError,
    TextGenerator, UploadedFile,
};
use crate::application::services::{CredentialStatus, ProviderFactory};
use crate::domain::entities::{Configuracao, NotaDraft, NotaSort, NotaTecnica, distinct_tags};
use crate::domain::repositories::{
    ConfiguracaoRepository, ConfiguracaoRepositoryError, NotaRepository, NotaRepositoryError,
};
use crate::domain::value_objects::{NotaTipo, StorageProvider};

pub fn sample_nota(numero: &str, tags: Vec<String>) -> NotaTecnica {
    let slug = numero.replace('/', "-");
    NotaTecnica::create(NotaDraft {
        numero: numero.to_string(),
        tipo: NotaTipo::Processual,
        titulo: format!("Fornecimento de insulina {}", numero),
        data_emissao: None,
        demanda: Some("Insulina glargina".to_string()),
        procedimento: Some("Ação de obrigação de fazer".to_string()),
        representante_comarca: None,
        resumo: "Parecer sobre fornecimento de insulina análoga pelo SUS.".to_string(),
        tags,
        conteudo_extraido: "Paciente com diabetes tipo 1 solicita insulina.".to_string(),
        arquivo_url: format!("https://natjus.test/arquivos/nota-{}.pdf", slug),
        nome_arquivo: format!("nota-{}.pdf", slug),
        storage_provider: StorageProvider::Base44,
        drive_file_id: None,
    })
    .expect("valid sample nota")
}

pub fn analysis_json(numero: &str) -> Value {
    json!({
        "numero": numero,
        "tipo": "processual",
        "titulo": "Fornecimento de medicamento",
        "data_emissao": "2024-03-15",
        "demanda": "Insulina",
        "procedimento": "Ação ordinária",
        "representante_comarca": "Comarca de Cuiabá",
        "resumo": "Resumo da nota.",
        "tags": ["diabetes", "insulina"]
    })
}

pub fn pdf(name: &str) -> UploadedFile {
    UploadedFile::new(name, b"%PDF-1.4 fake".to_vec(), "application/pdf")
}

pub struct FakeNotaRepository {
    notas: Mutex<Vec<NotaTecnica>>,
    failing_file: Mutex<Option<String>>,
}

impl FakeNotaRepository {
    pub fn new() -> Self {
        Self {
            notas: Mutex::new(Vec::new()),
            failing_file: Mutex::new(None),
        }
    }

    pub fn insert(&self, nota: NotaTecnica) {
        self.notas.lock().unwrap().push(nota);
    }

    /// Insertion order.
    pub fn all(&self) -> Vec<NotaTecnica> {
        self.notas.lock().unwrap().clone()
    }

    pub fn count_now(&self) -> usize {
        self.notas.lock().unwrap().len()
    }

    pub fn fail_saves_for(&self, nome_arquivo: &str) {
        *self.failing_file.lock().unwrap() = Some(nome_arquivo.to_string());
    }
}

#[async_trait]
impl NotaRepository for FakeNotaRepository {
    async fn save(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError> {
        if self.failing_file.lock().unwrap().as_deref() == Some(nota.nome_arquivo()) {
            return Err(NotaRepositoryError::DatabaseError(
                "connection reset".to_string(),
            ));
        }
        self.insert(nota.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NotaTecnica>, NotaRepositoryError> {
        Ok(self.all().into_iter().find(|n| n.id() == id))
    }

    async fn find_all(
        &self,
        sort: NotaSort,
        limit: i64,
    ) -> Result<Vec<NotaTecnica>, NotaRepositoryError> {
        let mut notas = self.all();
        notas.sort_by(|a, b| sort.compare(a, b));
        notas.truncate(limit.max(0) as usize);
        Ok(notas)
    }

    async fn update(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError> {
        let mut notas = self.notas.lock().unwrap();
        match notas.iter_mut().find(|n| n.id() == nota.id()) {
            Some(existing) => {
                *existing = nota.clone();
                Ok(())
            }
            None => Err(NotaRepositoryError::NotFound(nota.id())),
        }
    }

    async fn count(&self) -> Result<i64, NotaRepositoryError> {
        Ok(self.count_now() as i64)
    }

    async fn count_by_tipo(&self, tipo: NotaTipo) -> Result<i64, NotaRepositoryError> {
        Ok(self.all().iter().filter(|n| n.tipo() == tipo).count() as i64)
    }

    async fn count_emitted_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<i64, NotaRepositoryError> {
        Ok(self
            .all()
            .iter()
            .filter_map(|n| n.data_emissao())
            .filter(|d| *d >= from && *d < until)
            .count() as i64)
    }

    async fn find_tags(&self) -> Result<Vec<String>, NotaRepositoryError> {
        Ok(distinct_tags(&self.all()))
    }
}

pub struct FakeConfiguracaoRepository {
    current: Mutex<Option<Configuracao>>,
    saves: Mutex<usize>,
}

impl FakeConfiguracaoRepository {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            saves: Mutex::new(0),
        }
    }

    pub fn with(config: Configuracao) -> Self {
        let repo = Self::new();
        *repo.current.lock().unwrap() = Some(config);
        repo
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn current(&self) -> Option<Configuracao> {
        self.current.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfiguracaoRepository for FakeConfiguracaoRepository {
    async fn find_first(&self) -> Result<Option<Configuracao>, ConfiguracaoRepositoryError> {
        Ok(self.current())
    }

    async fn save(&self, config: &Configuracao) -> Result<(), ConfiguracaoRepositoryError> {
        *self.saves.lock().unwrap() += 1;
        *self.current.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}

pub struct FakeStore {
    provider: StorageProvider,
    failing: bool,
    failing_file: Option<String>,
    files: Mutex<Vec<StoredFileInfo>>,
}

impl FakeStore {
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            failing: false,
            failing_file: None,
            files: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(provider: StorageProvider) -> Self {
        Self {
            failing: true,
            ..Self::new(provider)
        }
    }

    /// Rejects only uploads of `name`.
    pub fn failing_for(provider: StorageProvider, name: &str) -> Self {
        Self {
            failing_file: Some(name.to_string()),
            ..Self::new(provider)
        }
    }

    /// Names of the files accepted so far, in upload order.
    pub fn uploads(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    fn unavailable(&self) -> FileStoreError {
        FileStoreError::ApiError {
            status: 500,
            message: format!("{} indisponível", self.provider.display_name()),
        }
    }
}

#[async_trait]
impl FileStore for FakeStore {
    async fn upload_file(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError> {
        if self.failing || self.failing_file.as_deref() == Some(file.name.as_str()) {
            return Err(self.unavailable());
        }

        let mut files = self.files.lock().unwrap();
        let file_id = format!("{}-{}", files.len(), file.name);
        let file_url = format!("{}://files/{}", self.provider.as_str(), file.name);
        files.push(StoredFileInfo {
            id: file_id.clone(),
            name: file.name.clone(),
            created_time: Some(Utc::now()),
            size: Some(file.bytes.len() as u64),
            web_view_link: Some(file_url.clone()),
        });

        Ok(StoredFile {
            file_id,
            file_url,
            provider: self.provider,
            used_fallback: false,
        })
    }

    async fn list_files(&self, page_size: u32) -> Result<Vec<StoredFileInfo>, FileStoreError> {
        if self.failing {
            return Err(self.unavailable());
        }
        let mut files = self.files.lock().unwrap().clone();
        files.truncate(page_size as usize);
        Ok(files)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), FileStoreError> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.id != file_id);
        if files.len() == before {
            return Err(FileStoreError::FileNotFound(file_id.to_string()));
        }
        Ok(())
    }

    fn provider(&self) -> StorageProvider {
        self.provider
    }
}

pub struct FakeGenerator {
    name: String,
    response: Mutex<Result<GeneratedContent, TextGenerationError>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn with_response(
        name: &str,
        response: Result<GeneratedContent, TextGenerationError>,
    ) -> Self {
        Self {
            name: name.to_string(),
            response: Mutex::new(response),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn json(name: &str, value: Value) -> Self {
        Self::with_response(name, Ok(GeneratedContent::Json(value)))
    }

    pub fn text(name: &str, text: &str) -> Self {
        Self::with_response(name, Ok(GeneratedContent::Text(text.to_string())))
    }

    pub fn failing(name: &str, error: TextGenerationError) -> Self {
        Self::with_response(name, Err(error))
    }

    pub fn set_response(&self, value: Value) {
        *self.response.lock().unwrap() = Ok(GeneratedContent::Json(value));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_content(
        &self,
        prompt: &str,
        _options: GenerationOptions,
    ) -> Result<GeneratedContent, TextGenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.lock().unwrap().clone()
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

pub struct FakeExtractor {
    failing_marker: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self {
            failing_marker: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reports an extraction error for every URL containing `marker`.
    pub fn failing_for(marker: &str) -> Self {
        Self {
            failing_marker: Some(marker.to_string()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentExtractor for FakeExtractor {
    async fn extract(
        &self,
        file_url: &str,
        _schema: &Value,
    ) -> Result<ExtractionResult, ContentExtractionError> {
        self.calls.lock().unwrap().push(file_url.to_string());

        let fails = self
            .failing_marker
            .as_deref()
            .is_some_and(|marker| file_url.contains(marker));
        if fails {
            return Ok(ExtractionResult::error("PDF ilegível"));
        }

        Ok(ExtractionResult::success(json!({
            "texto": format!("texto extraído de {}", file_url),
            "paginas": 1
        })))
    }
}

pub struct FakeProviderFactory {
    drive_available: bool,
    drive: Arc<FakeStore>,
    gemini: Arc<FakeGenerator>,
}

impl FakeProviderFactory {
    pub fn new(drive_available: bool) -> Self {
        Self {
            drive_available,
            drive: Arc::new(FakeStore::new(StorageProvider::GoogleDrive)),
            gemini: Arc::new(FakeGenerator::text("Gemini", "OK")),
        }
    }

    pub fn with_drive(mut self, drive: FakeStore) -> Self {
        self.drive = Arc::new(drive);
        self
    }

    pub fn with_gemini(mut self, gemini: FakeGenerator) -> Self {
        self.gemini = Arc::new(gemini);
        self
    }

    pub fn drive_store(&self) -> Arc<FakeStore> {
        self.drive.clone()
    }
}

impl ProviderFactory for FakeProviderFactory {
    fn gemini(&self, _api_key: &str, _model: &str) -> Arc<dyn TextGenerator> {
        self.gemini.clone()
    }

    fn drive(&self, _folder_id: &str) -> Option<Arc<dyn FileStore>> {
        if self.drive_available {
            Some(self.drive.clone())
        } else {
            None
        }
    }

    fn drive_credentials(&self) -> CredentialStatus {
        if self.drive_available {
            CredentialStatus::Valid
        } else {
            CredentialStatus::Missing
        }
    }
}
