use serde::{Deserialize, Serialize};

/// Backend that holds the original PDF of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageProvider {
    #[default]
    #[serde(rename = "base44")]
    Base44,
    #[serde(rename = "google_drive")]
    GoogleDrive,
    #[serde(rename = "aws_s3")]
    AwsS3,
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::Base44 => "base44",
            StorageProvider::GoogleDrive => "google_drive",
            StorageProvider::AwsS3 => "aws_s3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StorageProvider::Base44 => "Base44",
            StorageProvider::GoogleDrive => "Google Drive",
            StorageProvider::AwsS3 => "Amazon S3",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "base44" => Ok(StorageProvider::Base44),
            "google_drive" => Ok(StorageProvider::GoogleDrive),
            "aws_s3" => Ok(StorageProvider::AwsS3),
            _ => Err(format!("Invalid storage provider: {}", s)),
        }
    }
}

impl std::fmt::Display for StorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backend that answers structuring and chat prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LlmProvider {
    #[default]
    #[serde(rename = "base44")]
    Base44,
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Base44 => "base44",
            LlmProvider::Google => "google",
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Base44 => "Base44",
            LlmProvider::Google => "Gemini",
            LlmProvider::OpenAi => "ChatGPT",
            LlmProvider::Anthropic => "Claude",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, LlmProvider::Base44)
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "base44" => Ok(LlmProvider::Base44),
            "google" => Ok(LlmProvider::Google),
            "openai" => Ok(LlmProvider::OpenAi),
            "anthropic" => Ok(LlmProvider::Anthropic),
            _ => Err(format!("Invalid LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
