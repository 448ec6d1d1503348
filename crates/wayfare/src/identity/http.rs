//! HTTP adapter for the identity service.

use async_trait::async_trait;
use reqwest::StatusCode;

use wayfare_core::identity::{IdentityError, IdentityRecord, IdentityService, UserId};

/// Identity service reached over HTTP.
///
/// `GET {base_url}/users/{id}` answers `200` with `{"username", "full_name"}`
/// or `404` for an unknown id.
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityService {
    /// Create a new adapter for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an adapter that shares an existing client's connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, id: &UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn lookup(&self, id: &UserId) -> Result<IdentityRecord, IdentityError> {
        let response = self
            .client
            .get(self.url(id))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| IdentityError::Unavailable(format!("invalid identity payload: {e}"))),
            StatusCode::NOT_FOUND => Err(IdentityError::NotFound(id.clone())),
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                tracing::warn!(user_id = %id, status = status.as_u16(), "Identity lookup failed");
                Err(IdentityError::Unavailable(format!(
                    "identity service returned {status}: {message}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;

    async fn user(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AxumStatus> {
        match id.as_str() {
            "u1" => Ok(Json(json!({"username": "ana", "full_name": "Ana Lima"}))),
            "broken" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    /// Serves a fake identity service on an ephemeral port.
    async fn spawn_server() -> String {
        let app = Router::new().route("/users/{id}", get(user));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let service = HttpIdentityService::new(spawn_server().await);

        let record = service.lookup(&UserId::from("u1")).await.unwrap();

        assert_eq!(
            record,
            IdentityRecord {
                username: "ana".to_string(),
                full_name: "Ana Lima".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let service = HttpIdentityService::new(spawn_server().await);

        let result = service.lookup(&UserId::from("ghost")).await;

        assert_eq!(result, Err(IdentityError::NotFound(UserId::from("ghost"))));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let service = HttpIdentityService::new(spawn_server().await);

        let result = service.lookup(&UserId::from("broken")).await;

        assert!(matches!(result, Err(IdentityError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let service = HttpIdentityService::new(format!("http://{addr}"));

        let result = service.lookup(&UserId::from("u1")).await;

        assert!(matches!(result, Err(IdentityError::Unavailable(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let service = HttpIdentityService::new("http://identity:50050/");
        assert_eq!(service.base_url(), "http://identity:50050");
        assert_eq!(
            service.url(&UserId::from("u1")),
            "http://identity:50050/users/u1"
        );
    }
}
