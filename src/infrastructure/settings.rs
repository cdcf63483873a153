use std::path::PathBuf;

use thiserror::Error;

use crate::application::services::ProviderSecrets;
use crate::infrastructure::external_services::{DEFAULT_DRIVE_API_BASE, DEFAULT_GEMINI_BASE_URL};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub llm_gateway_url: String,
    pub llm_gateway_api_key: Option<String>,
    pub http_timeout_secs: u64,
    pub gemini_base_url: String,
    pub drive_api_base: String,
    /// Service-account key JSON. Never logged.
    pub drive_credentials_json: Option<String>,
    pub secrets: ProviderSecrets,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(SettingsError::Missing("DATABASE_URL"))?;
        let llm_gateway_url =
            get("LLM_GATEWAY_URL").ok_or(SettingsError::Missing("LLM_GATEWAY_URL"))?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| SettingsError::Invalid {
                name: "PORT",
                message: e.to_string(),
            })?,
            None => 3000,
        };
        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| SettingsError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                message: e.to_string(),
            })?,
            None => 120,
        };

        let drive_credentials_json = match (
            get("GOOGLE_DRIVE_CREDENTIALS"),
            get("GOOGLE_DRIVE_CREDENTIALS_FILE"),
        ) {
            (Some(inline), _) => Some(inline),
            (None, Some(path)) => Some(std::fs::read_to_string(&path).map_err(|e| {
                SettingsError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?),
            (None, None) => None,
        };

        Ok(Self {
            database_url,
            port,
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string())),
            public_base_url: get("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            llm_gateway_url,
            llm_gateway_api_key: get("LLM_GATEWAY_API_KEY"),
            http_timeout_secs,
            gemini_base_url: get("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            drive_api_base: get("GOOGLE_DRIVE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DRIVE_API_BASE.to_string()),
            drive_credentials_json,
            secrets: ProviderSecrets {
                google_api_key: get("GOOGLE_API_KEY"),
                openai_api_key: get("OPENAI_API_KEY"),
                anthropic_api_key: get("ANTHROPIC_API_KEY"),
                default_drive_folder_id: get("GOOGLE_DRIVE_FOLDER_ID"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/natjus"),
        ("LLM_GATEWAY_URL", "http://gateway/invoke"),
    ];

    #[test]
    fn test_defaults() {
        let settings = AppSettings::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.public_base_url, "http://localhost:3000");
        assert_eq!(settings.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(settings.http_timeout_secs, 120);
        assert_eq!(settings.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(settings.drive_credentials_json.is_none());
        assert!(settings.secrets.google_api_key.is_none());
    }

    #[test]
    fn test_required_and_invalid_values() {
        assert!(matches!(
            AppSettings::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])),
            Err(SettingsError::Missing("LLM_GATEWAY_URL"))
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "muitos"));
        assert!(matches!(
            AppSettings::from_lookup(lookup(&vars)),
            Err(SettingsError::Invalid { name: "PORT", .. })
        ));
    }

    #[test]
    fn test_secrets_and_public_url_follow_port() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PORT", "8080"),
            ("GOOGLE_API_KEY", "g-key"),
            ("OPENAI_API_KEY", "  "),
            ("GOOGLE_DRIVE_FOLDER_ID", "pasta"),
        ]);
        let settings = AppSettings::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(settings.public_base_url, "http://localhost:8080");
        assert_eq!(settings.secrets.google_api_key.as_deref(), Some("g-key"));
        assert_eq!(settings.secrets.openai_api_key, None);
        assert_eq!(settings.secrets.default_drive_folder_id.as_deref(), Some("pasta"));
    }

    #[test]
    fn test_drive_credentials_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"client_email":"a@b.com","private_key":"k"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut vars = REQUIRED.to_vec();
        vars.push(("GOOGLE_DRIVE_CREDENTIALS_FILE", path.as_str()));
        let settings = AppSettings::from_lookup(lookup(&vars)).unwrap();

        assert!(settings.drive_credentials_json.unwrap().contains("a@b.com"));

        let mut missing = REQUIRED.to_vec();
        missing.push(("GOOGLE_DRIVE_CREDENTIALS_FILE", "/nao/existe.json"));
        assert!(matches!(
            AppSettings::from_lookup(lookup(&missing)),
            Err(SettingsError::Io { .. })
        ));
    }
}
