use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{NotaTipo, StorageProvider};

/// Fields of a note before it has an identity. Built by the upload pipeline
/// from the AI output plus the stored file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaDraft {
    pub numero: String,
    pub tipo: NotaTipo,
    pub titulo: String,
    pub data_emissao: Option<NaiveDate>,
    pub demanda: Option<String>,
    pub procedimento: Option<String>,
    pub representante_comarca: Option<String>,
    pub resumo: String,
    pub tags: Vec<String>,
    pub conteudo_extraido: String,
    pub arquivo_url: String,
    pub nome_arquivo: String,
    pub storage_provider: StorageProvider,
    pub drive_file_id: Option<String>,
}

/// Partial edit applied from the review screen or the library.
/// `Some("")` clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NotaUpdate {
    pub numero: Option<String>,
    pub tipo: Option<NotaTipo>,
    pub titulo: Option<String>,
    pub data_emissao: Option<String>,
    pub demanda: Option<String>,
    pub procedimento: Option<String>,
    pub representante_comarca: Option<String>,
    pub resumo: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaTecnica {
    id: Uuid,
    numero: String,
    tipo: NotaTipo,
    titulo: String,
    data_emissao: Option<NaiveDate>,
    demanda: Option<String>,
    procedimento: Option<String>,
    representante_comarca: Option<String>,
    resumo: String,
    tags: Vec<String>,
    conteudo_extraido: String,
    arquivo_url: String,
    nome_arquivo: String,
    storage_provider: StorageProvider,
    drive_file_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NotaTecnica {
    pub fn create(draft: NotaDraft) -> Result<Self, String> {
        let now = Utc::now();
        Self::restore(Uuid::new_v4(), draft, now, now)
    }

    /// Rebuilds a persisted note. Applies the same invariants as `create`.
    pub fn restore(
        id: Uuid,
        draft: NotaDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        if draft.arquivo_url.trim().is_empty() {
            return Err("Nota sem arquivo_url".to_string());
        }
        if draft.nome_arquivo.trim().is_empty() {
            return Err("Nota sem nome_arquivo".to_string());
        }

        // Only Drive uploads carry an external id.
        let drive_file_id = match draft.storage_provider {
            StorageProvider::GoogleDrive => draft.drive_file_id,
            _ => None,
        };

        Ok(Self {
            id,
            numero: draft.numero,
            tipo: draft.tipo,
            titulo: draft.titulo,
            data_emissao: draft.data_emissao,
            demanda: non_blank(draft.demanda),
            procedimento: non_blank(draft.procedimento),
            representante_comarca: non_blank(draft.representante_comarca),
            resumo: draft.resumo,
            tags: draft.tags,
            conteudo_extraido: draft.conteudo_extraido,
            arquivo_url: draft.arquivo_url,
            nome_arquivo: draft.nome_arquivo,
            storage_provider: draft.storage_provider,
            drive_file_id,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn numero(&self) -> &str {
        &self.numero
    }

    pub fn tipo(&self) -> NotaTipo {
        self.tipo
    }

    pub fn titulo(&self) -> &str {
        &self.titulo
    }

    pub fn data_emissao(&self) -> Option<NaiveDate> {
        self.data_emissao
    }

    pub fn demanda(&self) -> Option<&str> {
        self.demanda.as_deref()
    }

    pub fn procedimento(&self) -> Option<&str> {
        self.procedimento.as_deref()
    }

    pub fn representante_comarca(&self) -> Option<&str> {
        self.representante_comarca.as_deref()
    }

    pub fn resumo(&self) -> &str {
        &self.resumo
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn conteudo_extraido(&self) -> &str {
        &self.conteudo_extraido
    }

    pub fn arquivo_url(&self) -> &str {
        &self.arquivo_url
    }

    pub fn nome_arquivo(&self) -> &str {
        &self.nome_arquivo
    }

    pub fn storage_provider(&self) -> StorageProvider {
        self.storage_provider
    }

    pub fn drive_file_id(&self) -> Option<&str> {
        self.drive_file_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Adds a trimmed tag unless it is empty or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    pub fn apply_update(&mut self, update: NotaUpdate) -> Result<(), String> {
        if let Some(numero) = update.numero {
            if numero.trim().is_empty() {
                return Err("Número não pode ser vazio".to_string());
            }
            self.numero = numero.trim().to_string();
        }
        if let Some(titulo) = update.titulo {
            if titulo.trim().is_empty() {
                return Err("Título não pode ser vazio".to_string());
            }
            self.titulo = titulo.trim().to_string();
        }
        if let Some(tipo) = update.tipo {
            self.tipo = tipo;
        }
        if let Some(data) = update.data_emissao {
            self.data_emissao = parse_data_emissao(&data);
            if self.data_emissao.is_none() && !data.trim().is_empty() {
                return Err(format!("Data de emissão inválida: {}", data));
            }
        }
        if let Some(demanda) = update.demanda {
            self.demanda = non_blank(Some(demanda));
        }
        if let Some(procedimento) = update.procedimento {
            self.procedimento = non_blank(Some(procedimento));
        }
        if let Some(representante) = update.representante_comarca {
            self.representante_comarca = non_blank(Some(representante));
        }
        if let Some(resumo) = update.resumo {
            self.resumo = resumo;
        }
        if let Some(tags) = update.tags {
            self.tags.clear();
            for tag in tags {
                self.add_tag(&tag);
            }
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// All text the search view looks into.
    pub fn matches_full_text(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.matches_catalog_text(&term)
            || self.conteudo_extraido.to_lowercase().contains(&term)
            || self.resumo.to_lowercase().contains(&term)
    }

    /// Text the library view looks into: title, number and procedure.
    pub fn matches_catalog_text(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.titulo.to_lowercase().contains(&term)
            || self.numero.to_lowercase().contains(&term)
            || self
                .procedimento
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&term))
    }
}

/// Parses the YYYY-MM-DD form the models are asked for.
pub fn parse_data_emissao(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NotaDraft {
        NotaDraft {
            numero: "1234/2024".to_string(),
            tipo: NotaTipo::Processual,
            titulo: "Canabidiol para epilepsia refratária".to_string(),
            data_emissao: parse_data_emissao("2024-03-15"),
            demanda: Some("Vara Cível".to_string()),
            procedimento: Some("Fornecimento de medicamento".to_string()),
            representante_comarca: Some("".to_string()),
            resumo: "Paciente com epilepsia refratária.".to_string(),
            tags: vec!["epilepsia".to_string(), "saude".to_string()],
            conteudo_extraido: "{\"texto\":\"CANABIDIOL\"}".to_string(),
            arquivo_url: "http://localhost:3000/arquivos/abc".to_string(),
            nome_arquivo: "nota.pdf".to_string(),
            storage_provider: StorageProvider::Base44,
            drive_file_id: Some("ignored".to_string()),
        }
    }

    #[test]
    fn test_create_keeps_fields() {
        let nota = NotaTecnica::create(draft()).unwrap();

        assert_eq!(nota.numero(), "1234/2024");
        assert_eq!(nota.tags(), &["epilepsia", "saude"]);
        assert_eq!(nota.data_emissao(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(nota.representante_comarca(), None);
        // Not a Drive upload, so no Drive id.
        assert_eq!(nota.drive_file_id(), None);
    }

    #[test]
    fn test_create_requires_backing_file() {
        let mut missing_url = draft();
        missing_url.arquivo_url = "  ".to_string();
        assert!(NotaTecnica::create(missing_url).is_err());

        let mut missing_name = draft();
        missing_name.nome_arquivo = String::new();
        assert!(NotaTecnica::create(missing_name).is_err());
    }

    #[test]
    fn test_drive_id_kept_for_drive_uploads() {
        let mut d = draft();
        d.storage_provider = StorageProvider::GoogleDrive;
        d.drive_file_id = Some("1AbC".to_string());

        let nota = NotaTecnica::create(d).unwrap();
        assert_eq!(nota.drive_file_id(), Some("1AbC"));
    }

    #[test]
    fn test_add_tag_deduplicates() {
        let mut nota = NotaTecnica::create(draft()).unwrap();

        assert!(!nota.add_tag("saude"));
        assert!(!nota.add_tag("   "));
        assert!(nota.add_tag(" oncologia "));
        assert_eq!(nota.tags(), &["epilepsia", "saude", "oncologia"]);

        assert!(nota.remove_tag("epilepsia"));
        assert!(!nota.remove_tag("epilepsia"));
        assert_eq!(nota.tags(), &["saude", "oncologia"]);
    }

    #[test]
    fn test_apply_update() {
        let mut nota = NotaTecnica::create(draft()).unwrap();

        let update = NotaUpdate {
            titulo: Some("Novo título".to_string()),
            tipo: Some(NotaTipo::PreProcessual),
            demanda: Some(String::new()),
            data_emissao: Some("2023-12-01".to_string()),
            tags: Some(vec![
                "a".to_string(),
                "b".to_string(),
                "a".to_string(),
                " ".to_string(),
            ]),
            ..Default::default()
        };
        nota.apply_update(update).unwrap();

        assert_eq!(nota.titulo(), "Novo título");
        assert_eq!(nota.tipo(), NotaTipo::PreProcessual);
        assert_eq!(nota.demanda(), None);
        assert_eq!(nota.data_emissao(), NaiveDate::from_ymd_opt(2023, 12, 1));
        assert_eq!(nota.tags(), &["a", "b"]);
    }

    #[test]
    fn test_apply_update_rejects_blank_title_and_bad_date() {
        let mut nota = NotaTecnica::create(draft()).unwrap();

        let blank = NotaUpdate {
            titulo: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(nota.apply_update(blank).is_err());

        let bad_date = NotaUpdate {
            data_emissao: Some("ontem".to_string()),
            ..Default::default()
        };
        assert!(nota.apply_update(bad_date).is_err());
    }

    #[test]
    fn test_text_matching() {
        let nota = NotaTecnica::create(draft()).unwrap();

        assert!(nota.matches_catalog_text("CANABIDIOL"));
        assert!(nota.matches_catalog_text("1234"));
        assert!(nota.matches_catalog_text("medicamento"));
        assert!(!nota.matches_catalog_text("refratária."));

        assert!(nota.matches_full_text("refratária."));
        assert!(nota.matches_full_text("\"texto\""));
        assert!(!nota.matches_full_text("oncologia"));
    }

    #[test]
    fn test_parse_data_emissao() {
        assert_eq!(
            parse_data_emissao("15/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_data_emissao(""), None);
        assert_eq!(parse_data_emissao("março de 2024"), None);
    }
}
