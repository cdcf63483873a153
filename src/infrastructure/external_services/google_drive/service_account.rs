use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use reqwest::Client;
use ring::rand::SystemRandom;
use ring::signature::{RSA_PKCS1_SHA256, RsaKeyPair};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::ports::FileStoreError;

pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: u64 = 3600;
// Refresh slightly before Google's expiry.
const EXPIRY_MARGIN_SECS: u64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Fields of a Google service-account key file that signing needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let credentials: Self = serde_json::from_str(json)
            .map_err(|e| format!("Credenciais do Google Drive inválidas: {}", e))?;

        if credentials.client_email.trim().is_empty() {
            return Err("Credenciais do Google Drive sem client_email".to_string());
        }
        if credentials.private_key.trim().is_empty() {
            return Err("Credenciais do Google Drive sem private_key".to_string());
        }
        Ok(credentials)
    }

    /// DER bytes of the PKCS#8 key. Accepts keys whose newlines arrived escaped.
    fn private_key_der(&self) -> Result<Vec<u8>, String> {
        let pem = self.private_key.replace("\\n", "\n");
        let body: String = pem
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("-----"))
            .collect();
        STANDARD
            .decode(body)
            .map_err(|e| format!("private_key não é um PEM válido: {}", e))
    }

    pub fn key_pair(&self) -> Result<RsaKeyPair, String> {
        let der = self.private_key_der()?;
        RsaKeyPair::from_pkcs8(&der).map_err(|e| format!("private_key rejeitada: {}", e))
    }
}

#[derive(Serialize)]
struct JwtHeader<'a> {
    alg: &'a str,
    typ: &'a str,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
}

/// Signs an RS256 assertion for the JWT bearer grant.
pub fn sign_assertion(
    credentials: &ServiceAccountCredentials,
    key_pair: &RsaKeyPair,
    issued_at: u64,
) -> Result<String, String> {
    let header = JwtHeader {
        alg: "RS256",
        typ: "JWT",
    };
    let claims = JwtClaims {
        iss: credentials.client_email.clone(),
        scope: DRIVE_SCOPE.to_string(),
        aud: credentials.token_uri.clone(),
        exp: issued_at + TOKEN_LIFETIME_SECS,
        iat: issued_at,
    };

    let signing_input = format!(
        "{}.{}",
        encode_segment(&header)?,
        encode_segment(&claims)?
    );

    let mut signature = vec![0; key_pair.public().modulus_len()];
    key_pair
        .sign(
            &RSA_PKCS1_SHA256,
            &SystemRandom::new(),
            signing_input.as_bytes(),
            &mut signature,
        )
        .map_err(|_| "Falha ao assinar JWT".to_string())?;

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_vec(value)
        .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
        .map_err(|e| e.to_string())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, FileStoreError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    value: String,
    expires_at: u64,
}

/// OAuth2 tokens for a service account, cached until shortly before expiry.
pub struct ServiceAccountTokenProvider {
    client: Client,
    credentials: ServiceAccountCredentials,
    key_pair: RsaKeyPair,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(client: Client, credentials: ServiceAccountCredentials) -> Result<Self, String> {
        let key_pair = credentials.key_pair()?;
        Ok(Self {
            client,
            credentials,
            key_pair,
            cached: Mutex::new(None),
        })
    }

    async fn fetch_token(&self) -> Result<CachedToken, FileStoreError> {
        let issued_at = now_secs();
        let assertion = sign_assertion(&self.credentials, &self.key_pair, issued_at)
            .map_err(FileStoreError::AuthenticationFailed)?;

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| FileStoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FileStoreError::AuthenticationFailed(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| FileStoreError::AuthenticationFailed(e.to_string()))?;

        let lifetime = token.expires_in.unwrap_or(TOKEN_LIFETIME_SECS);
        Ok(CachedToken {
            value: token.access_token,
            expires_at: issued_at + lifetime.saturating_sub(EXPIRY_MARGIN_SECS),
        })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, FileStoreError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > now_secs() {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!(
            "Solicitando token OAuth2 para {}",
            self.credentials.client_email
        );
        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
