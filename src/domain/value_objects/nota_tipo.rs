use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotaTipo {
    #[serde(rename = "processual")]
    Processual,
    #[serde(rename = "pre-processual")]
    PreProcessual,
}

impl NotaTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotaTipo::Processual => "processual",
            NotaTipo::PreProcessual => "pre-processual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotaTipo::Processual => "Processual",
            NotaTipo::PreProcessual => "Pré-Processual",
        }
    }

    /// Accepts the canonical values plus the spellings models tend to produce
    /// ("Pré-processual", "pre processual", "preprocessual").
    pub fn from_string(s: &str) -> Result<Self, String> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace('é', "e")
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match normalized.as_str() {
            "processual" => Ok(NotaTipo::Processual),
            "preprocessual" => Ok(NotaTipo::PreProcessual),
            _ => Err(format!("Tipo de nota inválido: {}", s)),
        }
    }
}

impl std::fmt::Display for NotaTipo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_values() {
        assert_eq!(
            NotaTipo::from_string("processual").unwrap(),
            NotaTipo::Processual
        );
        assert_eq!(
            NotaTipo::from_string("pre-processual").unwrap(),
            NotaTipo::PreProcessual
        );
    }

    #[test]
    fn test_lenient_spellings() {
        assert_eq!(
            NotaTipo::from_string("Pré-Processual").unwrap(),
            NotaTipo::PreProcessual
        );
        assert_eq!(
            NotaTipo::from_string(" pre processual ").unwrap(),
            NotaTipo::PreProcessual
        );
        assert_eq!(
            NotaTipo::from_string("PROCESSUAL").unwrap(),
            NotaTipo::Processual
        );
    }

    #[test]
    fn test_invalid_tipo() {
        assert!(NotaTipo::from_string("administrativa").is_err());
        assert!(NotaTipo::from_string("").is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&NotaTipo::PreProcessual).unwrap();
        assert_eq!(json, "\"pre-processual\"");
    }
}
