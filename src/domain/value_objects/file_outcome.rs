use serde::Serialize;
use uuid::Uuid;

/// How a single queued file settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    StoreFailed {
        file_name: String,
        message: String,
    },
    ExtractFailed {
        file_name: String,
        message: String,
    },
    StructureFailed {
        file_name: String,
        message: String,
        used_fallback: bool,
    },
    PersistFailed {
        file_name: String,
        message: String,
    },
    Persisted {
        file_name: String,
        nota_id: Uuid,
        used_storage_fallback: bool,
        used_llm_fallback: bool,
    },
}

impl FileOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            FileOutcome::StoreFailed { file_name, .. }
            | FileOutcome::ExtractFailed { file_name, .. }
            | FileOutcome::StructureFailed { file_name, .. }
            | FileOutcome::PersistFailed { file_name, .. }
            | FileOutcome::Persisted { file_name, .. } => file_name,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, FileOutcome::Persisted { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FileOutcome::StoreFailed { message, .. }
            | FileOutcome::ExtractFailed { message, .. }
            | FileOutcome::StructureFailed { message, .. }
            | FileOutcome::PersistFailed { message, .. } => Some(message),
            FileOutcome::Persisted { .. } => None,
        }
    }

    /// User-facing line for a skipped file.
    pub fn user_message(&self) -> Option<String> {
        self.error_message().map(|message| {
            format!(
                "Erro ao processar {}: {}. Pulando para o próximo.",
                self.file_name(),
                message
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_names_file() {
        let outcome = FileOutcome::ExtractFailed {
            file_name: "nota.pdf".to_string(),
            message: "Erro ao extrair conteúdo do PDF: nota.pdf".to_string(),
        };

        assert!(!outcome.is_persisted());
        assert_eq!(
            outcome.user_message().unwrap(),
            "Erro ao processar nota.pdf: Erro ao extrair conteúdo do PDF: nota.pdf. Pulando para o próximo."
        );
    }

    #[test]
    fn test_persisted_has_no_error() {
        let outcome = FileOutcome::Persisted {
            file_name: "nota.pdf".to_string(),
            nota_id: Uuid::new_v4(),
            used_storage_fallback: false,
            used_llm_fallback: true,
        };

        assert!(outcome.is_persisted());
        assert_eq!(outcome.error_message(), None);
        assert_eq!(outcome.user_message(), None);
        assert_eq!(outcome.file_name(), "nota.pdf");
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let outcome = FileOutcome::StructureFailed {
            file_name: "a.pdf".to_string(),
            message: "boom".to_string(),
            used_fallback: true,
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "structure_failed");
        assert_eq!(value["used_fallback"], true);
    }
}
