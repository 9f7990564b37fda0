//! Cloud Firestore backend over the v1 REST API.
//!
//! Charettes map onto Firestore's native layout: a root `charettes`
//! collection whose documents own the `messages`, `participants`, `analysis`
//! and `reports` sub-collections.

mod auth;
mod value;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

use self::auth::{GOOGLE_TOKEN_URL, TokenSource};
use self::value::{decode_document, encode_fields, encode_value, field_path};
use super::config::{Credentials, StoreConfig};
use super::traits::{
    CollectionPath, Connector, Direction, Document, DocumentPath, DocumentStore, Query,
};
use super::{StorageError, StorageResult};
use crate::models::Fields;

pub const FIRESTORE_API_URL: &str = "https://firestore.googleapis.com/v1";

/// Document store talking to one Firestore database.
pub struct FirestoreStore {
    client: Client,
    base_url: String,
    /// `projects/{project}/databases/(default)/documents`
    documents_root: String,
    tokens: TokenSource,
}

impl FirestoreStore {
    fn new(client: Client, base_url: &str, project_id: &str, tokens: TokenSource) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            documents_root: format!(
                "projects/{}/databases/(default)/documents",
                urlencoding::encode(project_id)
            ),
            tokens,
        }
    }

    fn documents_url(&self, segments: &[String]) -> String {
        let mut url = format!("{}/{}", self.base_url, self.documents_root);
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }
}

/// Pass successful responses through, turn the rest into `StorageError::Backend`.
async fn check(response: Response) -> StorageResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StorageError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> StorageResult<T> {
    response
        .json()
        .await
        .map_err(|e| StorageError::InvalidData(format!("Failed to decode Firestore response: {e}")))
}

/// Build the `runQuery` body for a query on `collection`.
pub(crate) fn structured_query(collection: &CollectionPath, query: &Query) -> StorageResult<Value> {
    let mut structured = json!({ "from": [{ "collectionId": collection.name() }] });

    let mut filters: Vec<Value> = query
        .filters()
        .iter()
        .map(|filter| {
            Ok(json!({ "fieldFilter": {
                "field": { "fieldPath": field_path(&filter.field) },
                "op": "EQUAL",
                "value": encode_value(&filter.value)?,
            } }))
        })
        .collect::<StorageResult<_>>()?;
    if filters.len() == 1 {
        structured["where"] = filters.remove(0);
    } else if !filters.is_empty() {
        structured["where"] = json!({ "compositeFilter": { "op": "AND", "filters": filters } });
    }

    if let Some(order) = query.ordering() {
        let direction = match order.direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        structured["orderBy"] = json!([{
            "field": { "fieldPath": field_path(&order.field) },
            "direction": direction,
        }]);
    }
    if let Some(limit) = query.max_results() {
        structured["limit"] = json!(limit);
    }

    Ok(json!({ "structuredQuery": structured }))
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, path: &DocumentPath) -> StorageResult<Option<Document>> {
        let response = self
            .client
            .get(self.documents_url(path.segments()))
            .bearer_auth(self.tokens.bearer().await?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: Value = read_json(check(response).await?).await?;
        decode_document(&body).map(Some)
    }

    async fn add(&self, collection: &CollectionPath, fields: Fields) -> StorageResult<String> {
        let response = self
            .client
            .post(self.documents_url(collection.segments()))
            .bearer_auth(self.tokens.bearer().await?)
            .json(&json!({ "fields": encode_fields(&fields)? }))
            .send()
            .await?;
        let created: Value = read_json(check(response).await?).await?;
        let document = decode_document(&created)?;
        debug!(collection = %collection, id = %document.id, "Firestore document created");
        Ok(document.id)
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StorageResult<()> {
        // An empty update mask would replace the whole document.
        if fields.is_empty() {
            return Ok(());
        }

        let mut params: Vec<(&str, String)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", field_path(key)))
            .collect();
        params.push(("currentDocument.exists", "true".to_string()));

        let response = self
            .client
            .patch(self.documents_url(path.segments()))
            .query(&params)
            .bearer_auth(self.tokens.bearer().await?)
            .json(&json!({ "fields": encode_fields(&fields)? }))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound {
                entity_type: "document".to_string(),
                entity_id: path.to_string(),
            });
        }
        check(response).await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> StorageResult<Vec<Document>> {
        let parent = match collection.parent() {
            Some(document) => self.documents_url(document.segments()),
            None => self.documents_url(&[]),
        };
        let response = self
            .client
            .post(format!("{parent}:runQuery"))
            .bearer_auth(self.tokens.bearer().await?)
            .json(&structured_query(collection, query)?)
            .send()
            .await?;

        // One row per match; an empty result is a single row with only `readTime`.
        let rows: Vec<Value> = read_json(check(response).await?).await?;
        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(decode_document)
            .collect()
    }
}

/// Opens [`FirestoreStore`]s from a credential triple.
#[derive(Clone, Debug)]
pub struct FirestoreConnector {
    base_url: String,
    token_url: String,
    emulator: bool,
}

impl Default for FirestoreConnector {
    fn default() -> Self {
        Self {
            base_url: FIRESTORE_API_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            emulator: false,
        }
    }
}

impl FirestoreConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Talk plain HTTP to a local emulator at `host:port`, without OAuth.
    pub fn emulator(host: &str) -> Self {
        Self {
            base_url: format!("http://{}/v1", host.trim_end_matches('/')),
            emulator: true,
            ..Self::default()
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        match &config.emulator_host {
            Some(host) => Self::emulator(host),
            None => Self::new(),
        }
    }

    /// Override the REST root, e.g. for a regional endpoint or a local fake.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}

#[async_trait]
impl Connector for FirestoreConnector {
    async fn connect(&self, credentials: &Credentials) -> StorageResult<Arc<dyn DocumentStore>> {
        let client = Client::builder()
            .build()
            .map_err(|e| StorageError::ConnectionError(format!("HTTP client: {e}")))?;

        let tokens = if self.emulator {
            TokenSource::Emulator
        } else {
            TokenSource::service_account(client.clone(), credentials, &self.token_url)?
        };
        // Credential problems surface here rather than on the first write.
        tokens.bearer().await?;

        info!(
            project_id = %credentials.project_id,
            base_url = %self.base_url,
            emulator = self.emulator,
            "Connected to Firestore"
        );
        Ok(Arc::new(FirestoreStore::new(
            client,
            &self.base_url,
            &credentials.project_id,
            tokens,
        )))
    }
}
