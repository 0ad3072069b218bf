//! Minimal Directus admin client used by the slug enforcement job.

use crate::{
    config::{ConfigError, DirectusAuth, DirectusConfig},
    services::slug::MemberSlugRow,
    services::slug_enforcement::SlugStore,
    telemetry::redact_sensitive_data,
    utils::json::{message_field, scalar_string},
};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use std::{future::Future, time::Duration};
use tracing::{debug, info};
use url::Url;

const MEMBERS_COLLECTION_PATH: &str = "/items/members";
const SLUG_FIELD_PATH: &str = "/fields/members/slug";
const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, thiserror::Error)]
pub enum DirectusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid url {0}")]
    InvalidUrl(String),

    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned status {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("login response did not contain an access token")]
    MissingToken,

    #[error("unexpected response from {path}: {detail}")]
    Decode { path: String, detail: String },
}

pub struct DirectusClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DirectusClient {
    /// Build a client and resolve a bearer token, logging in with the
    /// configured credentials when no static token is set.
    pub async fn connect(config: &DirectusConfig) -> Result<Self, DirectusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| DirectusError::Request {
                path: config.base_url.clone(),
                source,
            })?;

        let mut this = Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: String::new(),
        };

        this.token = match &config.auth {
            DirectusAuth::Token(token) => token.clone(),
            DirectusAuth::Credentials { email, password } => this.login(email, password).await?,
        };

        Ok(this)
    }

    fn url(&self, path: &str) -> Result<Url, DirectusError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| DirectusError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, DirectusError> {
        let url = self.url(LOGIN_PATH)?;
        let body = json!({ "email": email, "password": password });
        let payload = self.exchange(self.client.post(url).json(&body), LOGIN_PATH).await?;

        let token = payload
            .pointer("/data/access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(DirectusError::MissingToken)?;

        info!("Authenticated against Directus with credentials");
        Ok(token.to_string())
    }

    async fn send(&self, method: Method, url: Url, path: &str, body: Option<Value>) -> Result<Value, DirectusError> {
        let mut builder = self.client.request(method, url).bearer_auth(&self.token);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.exchange(builder, path).await
    }

    async fn exchange(&self, builder: reqwest::RequestBuilder, path: &str) -> Result<Value, DirectusError> {
        let request_error = |source| DirectusError::Request {
            path: path.to_string(),
            source,
        };

        let response = builder.send().await.map_err(request_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(request_error)?;
        // PATCH answers may be 204 with no body.
        let payload: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = payload
                .pointer("/errors/0/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| message_field(&payload))
                .unwrap_or_else(|| redact_sensitive_data(&String::from_utf8_lossy(&bytes)));
            return Err(DirectusError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        debug!(path, status = status.as_u16(), "Directus request completed");
        Ok(payload)
    }

    pub async fn list_member_slugs(&self) -> Result<Vec<MemberSlugRow>, DirectusError> {
        let mut url = self.url(MEMBERS_COLLECTION_PATH)?;
        url.query_pairs_mut()
            .append_pair("fields", "id,slug,name")
            .append_pair("limit", "-1");

        let payload = self.send(Method::GET, url, MEMBERS_COLLECTION_PATH, None).await?;
        let rows = payload
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| DirectusError::Decode {
                path: MEMBERS_COLLECTION_PATH.to_string(),
                detail: "missing data array".to_string(),
            })?;

        rows.iter()
            .map(|row| {
                row_from_json(row).ok_or_else(|| DirectusError::Decode {
                    path: MEMBERS_COLLECTION_PATH.to_string(),
                    detail: format!("member row without id: {row}"),
                })
            })
            .collect()
    }

    /// `/items/members/{id}` with `id` percent-encoded as a single segment.
    fn member_url(&self, id: &str) -> Result<Url, DirectusError> {
        let mut url = self.url(MEMBERS_COLLECTION_PATH)?;
        url.path_segments_mut()
            .map_err(|_| DirectusError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .push(id);
        Ok(url)
    }

    pub async fn patch_member_slug(&self, id: &str, slug: &str) -> Result<(), DirectusError> {
        let url = self.member_url(id)?;
        let path = url.path().to_string();
        self.send(Method::PATCH, url, &path, Some(json!({ "slug": slug })))
            .await
            .map(drop)
    }

    /// Mark the slug field required, unique and non-nullable.
    pub async fn enforce_slug_constraints(&self) -> Result<(), DirectusError> {
        let url = self.url(SLUG_FIELD_PATH)?;
        let body = json!({
            "meta": { "required": true },
            "schema": { "is_unique": true, "is_nullable": false }
        });
        self.send(Method::PATCH, url, SLUG_FIELD_PATH, Some(body))
            .await
            .map(drop)
    }
}

impl SlugStore for DirectusClient {
    fn list_members(&self) -> impl Future<Output = Result<Vec<MemberSlugRow>, DirectusError>> + Send {
        self.list_member_slugs()
    }

    fn update_slug(&self, id: &str, slug: &str) -> impl Future<Output = Result<(), DirectusError>> + Send {
        let (id, slug) = (id.to_string(), slug.to_string());
        async move { self.patch_member_slug(&id, &slug).await }
    }

    fn enforce_unique_slugs(&self) -> impl Future<Output = Result<(), DirectusError>> + Send {
        self.enforce_slug_constraints()
    }
}

/// Keeps the raw slug so rows with untrimmed values are rewritten.
fn row_from_json(value: &Value) -> Option<MemberSlugRow> {
    let obj = value.as_object()?;
    let raw_string = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    Some(MemberSlugRow {
        id: obj.get("id").and_then(scalar_string)?,
        slug: raw_string("slug"),
        name: raw_string("name"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_json() {
        let row = row_from_json(&json!({ "id": 7, "slug": " Kim ", "name": null })).unwrap();
        assert_eq!(
            row,
            MemberSlugRow {
                id: "7".to_string(),
                slug: Some(" Kim ".to_string()),
                name: None,
            }
        );

        assert!(row_from_json(&json!({ "slug": "x" })).is_none());
        assert!(row_from_json(&json!("x")).is_none());
    }

    #[test]
    fn test_member_url_encodes_id() {
        let client = DirectusClient {
            client: Client::new(),
            base_url: "https://cms.example.com/admin".to_string(),
            token: String::new(),
        };

        assert_eq!(
            client.member_url("42").unwrap().as_str(),
            "https://cms.example.com/admin/items/members/42"
        );
        assert_eq!(
            client.member_url("a/b?c#d").unwrap().path(),
            "/admin/items/members/a%2Fb%3Fc%23d"
        );
    }
}
