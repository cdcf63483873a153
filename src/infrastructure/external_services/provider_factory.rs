use std::sync::Arc;

use reqwest::Client;

use crate::application::ports::{FileStore, TextGenerator};
use crate::application::services::{CredentialStatus, ProviderFactory};

use super::gemini_client::{GeminiClient, GeminiClientConfig};
use super::google_drive::{GoogleDriveStore, ServiceAccountCredentials, ServiceAccountTokenProvider};

/// Builds the real HTTP-backed Gemini and Drive clients.
pub struct HttpProviderFactory {
    client: Client,
    gemini_base_url: String,
    drive_api_base: String,
    drive_tokens: Result<Arc<ServiceAccountTokenProvider>, CredentialStatus>,
}

impl HttpProviderFactory {
    pub fn new(
        client: Client,
        gemini_base_url: impl Into<String>,
        drive_api_base: impl Into<String>,
        drive_credentials_json: Option<&str>,
    ) -> Self {
        let drive_tokens = match drive_credentials_json {
            None => Err(CredentialStatus::Missing),
            Some(json) => ServiceAccountCredentials::from_json(json)
                .and_then(|credentials| ServiceAccountTokenProvider::new(client.clone(), credentials))
                .map(Arc::new)
                .map_err(|message| {
                    tracing::warn!("Google Drive desativado: {}", message);
                    CredentialStatus::Invalid(message)
                }),
        };

        Self {
            client,
            gemini_base_url: gemini_base_url.into(),
            drive_api_base: drive_api_base.into(),
            drive_tokens,
        }
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn gemini(&self, api_key: &str, model: &str) -> Arc<dyn TextGenerator> {
        Arc::new(GeminiClient::new(
            self.client.clone(),
            GeminiClientConfig {
                api_key: api_key.to_string(),
                model: model.to_string(),
                base_url: self.gemini_base_url.clone(),
            },
        ))
    }

    fn drive(&self, folder_id: &str) -> Option<Arc<dyn FileStore>> {
        let tokens = self.drive_tokens.as_ref().ok()?;
        Some(Arc::new(GoogleDriveStore::new(
            self.client.clone(),
            tokens.clone(),
            self.drive_api_base.clone(),
            folder_id,
        )))
    }

    fn drive_credentials(&self) -> CredentialStatus {
        match &self.drive_tokens {
            Ok(_) => CredentialStatus::Valid,
            Err(status) => status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::StorageProvider;
    use crate::infrastructure::external_services::google_drive::service_account::tests::TEST_KEY;

    fn factory(credentials: Option<&str>) -> HttpProviderFactory {
        HttpProviderFactory::new(
            Client::new(),
            "http://gemini.invalid",
            "http://drive.invalid",
            credentials,
        )
    }

    #[test]
    fn test_without_credentials_drive_is_missing() {
        let factory = factory(None);
        assert_eq!(factory.drive_credentials(), CredentialStatus::Missing);
        assert!(factory.drive("pasta").is_none());
    }

    #[test]
    fn test_unusable_credentials_are_invalid() {
        let factory = factory(Some(r#"{"client_email":"a@b.com","private_key":"bogus"}"#));
        assert!(matches!(factory.drive_credentials(), CredentialStatus::Invalid(_)));
        assert!(factory.drive("pasta").is_none());
    }

    #[test]
    fn test_valid_credentials_build_drive_store() {
        let json = serde_json::json!({
            "client_email": "natjus@projeto.iam.gserviceaccount.com",
            "private_key": TEST_KEY,
        })
        .to_string();
        let factory = factory(Some(&json));

        assert_eq!(factory.drive_credentials(), CredentialStatus::Valid);
        let drive = factory.drive("pasta").unwrap();
        assert_eq!(drive.provider(), StorageProvider::GoogleDrive);
        assert_eq!(factory.gemini("k", "gemini-1.5-pro").provider_name(), "Gemini");
    }
}
