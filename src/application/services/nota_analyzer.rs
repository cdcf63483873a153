use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{GeneratedContent, GenerationOptions, TextGenerator};
use crate::application::services::{LlmSelection, prompts};
use crate::domain::entities::parse_data_emissao;
use crate::domain::value_objects::NotaTipo;

/// Metadata the LLM produced for one note.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedFields {
    pub numero: String,
    pub tipo: NotaTipo,
    pub titulo: String,
    pub data_emissao: Option<NaiveDate>,
    pub demanda: Option<String>,
    pub procedimento: Option<String>,
    pub representante_comarca: Option<String>,
    pub resumo: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    numero: Option<Value>,
    tipo: Option<String>,
    titulo: Option<String>,
    data_emissao: Option<String>,
    demanda: Option<String>,
    procedimento: Option<String>,
    representante_comarca: Option<String>,
    resumo: Option<String>,
    tags: Option<Vec<String>>,
}

impl AnalyzedFields {
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let raw: RawAnalysis = serde_json::from_value(value.clone())
            .map_err(|e| format!("Resposta da IA em formato inesperado: {}", e))?;

        // Models sometimes answer the number as a bare integer.
        let numero = match raw.numero {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if numero.is_empty() {
            return Err("Resposta da IA sem número da nota".to_string());
        }

        let titulo = raw.titulo.unwrap_or_default().trim().to_string();
        if titulo.is_empty() {
            return Err("Resposta da IA sem título".to_string());
        }

        let tipo = NotaTipo::from_string(raw.tipo.as_deref().unwrap_or_default())?;

        let resumo = raw.resumo.unwrap_or_default().trim().to_string();
        if resumo.is_empty() {
            return Err("Resposta da IA sem resumo".to_string());
        }

        let data_emissao = match raw.data_emissao.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(data) => {
                let parsed = parse_data_emissao(data);
                if parsed.is_none() {
                    tracing::warn!("Data de emissão inválida ignorada: {}", data);
                }
                parsed
            }
        };

        Ok(Self {
            numero,
            tipo,
            titulo,
            data_emissao,
            demanda: raw.demanda,
            procedimento: raw.procedimento,
            representante_comarca: raw.representante_comarca,
            resumo,
            tags: raw.tags.unwrap_or_default(),
        })
    }

    /// Accepts JSON, or text that holds JSON.
    fn from_content(content: GeneratedContent) -> Result<Self, String> {
        match content {
            GeneratedContent::Json(Value::String(text)) | GeneratedContent::Text(text) => {
                let value: Value = serde_json::from_str(strip_code_fence(&text))
                    .map_err(|_| "Resposta da IA não é um JSON válido".to_string())?;
                Self::from_value(&value)
            }
            GeneratedContent::Json(value) => Self::from_value(&value),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub fields: AnalyzedFields,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisError {
    pub message: String,
    pub used_fallback: bool,
}

/// Structures extracted PDF content with the selected LLM.
pub struct NotaAnalyzer;

impl NotaAnalyzer {
    pub async fn analyze(
        selection: &LlmSelection,
        extracted: &Value,
    ) -> Result<Analysis, AnalysisError> {
        match selection {
            LlmSelection::Misconfigured(message) => Err(AnalysisError {
                message: message.clone(),
                used_fallback: false,
            }),
            LlmSelection::Direct(generator) => Self::analyze_with_default(generator.as_ref(), extracted)
                .await
                .map(|fields| Analysis {
                    fields,
                    used_fallback: false,
                })
                .map_err(|message| AnalysisError {
                    message,
                    used_fallback: false,
                }),
            LlmSelection::Gemini { primary, fallback } => {
                let primary_error = match primary.analyze_nota_tecnica(extracted).await {
                    Ok(GeneratedContent::Json(value)) => match AnalyzedFields::from_value(&value) {
                        Ok(fields) => {
                            return Ok(Analysis {
                                fields,
                                used_fallback: false,
                            });
                        }
                        Err(e) => e,
                    },
                    Ok(GeneratedContent::Text(_)) => {
                        "Resposta do Gemini não é um JSON válido".to_string()
                    }
                    Err(e) => e.to_string(),
                };

                tracing::warn!(
                    "Erro no {}, usando fallback: {}",
                    primary.provider_name(),
                    primary_error
                );

                Self::analyze_with_default(fallback.as_ref(), extracted)
                    .await
                    .map(|fields| Analysis {
                        fields,
                        used_fallback: true,
                    })
                    .map_err(|message| AnalysisError {
                        message,
                        used_fallback: true,
                    })
            }
        }
    }

    async fn analyze_with_default(
        generator: &dyn TextGenerator,
        extracted: &Value,
    ) -> Result<AnalyzedFields, String> {
        let options =
            GenerationOptions::default().with_schema(prompts::fallback_analysis_schema());
        let content = generator
            .generate_content(&prompts::fallback_analysis_prompt(extracted), options)
            .await
            .map_err(|e| e.to_string())?;
        AnalyzedFields::from_content(content)
    }
}
