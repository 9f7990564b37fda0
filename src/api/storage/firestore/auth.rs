//! Service-account OAuth for the Firestore REST API.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::storage::config::Credentials;
use crate::storage::{StorageError, StorageResult};

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;
/// Bearer accepted by the Firestore emulator.
const EMULATOR_TOKEN: &str = "owner";

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Supplies bearer tokens for Firestore requests.
pub(crate) enum TokenSource {
    ServiceAccount(ServiceAccount),
    Emulator,
}

pub(crate) struct ServiceAccount {
    client: Client,
    client_email: String,
    key: EncodingKey,
    token_url: String,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    /// Validate the RSA key up front; no network traffic happens here.
    pub(crate) fn service_account(
        client: Client,
        credentials: &Credentials,
        token_url: &str,
    ) -> StorageResult<Self> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes()).map_err(|e| {
            StorageError::ConnectionError(format!("Invalid service account private key: {e}"))
        })?;
        Ok(Self::ServiceAccount(ServiceAccount {
            client,
            client_email: credentials.client_email.clone(),
            key,
            token_url: token_url.to_string(),
            cached: Mutex::new(None),
        }))
    }

    pub(crate) async fn bearer(&self) -> StorageResult<String> {
        match self {
            Self::ServiceAccount(account) => account.bearer().await,
            Self::Emulator => Ok(EMULATOR_TOKEN.to_string()),
        }
    }
}

impl ServiceAccount {
    async fn bearer(&self) -> StorageResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch(&self) -> StorageResult<AccessToken> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| StorageError::ConnectionError(format!("Failed to sign assertion: {e}")))?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::ConnectionError(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Invalid token response: {e}")))?;
        debug!(expires_in = token.expires_in, "Obtained Firestore access token");

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
