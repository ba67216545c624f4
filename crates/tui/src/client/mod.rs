use std::sync::Arc;

use api_types::{
    auth::{Credentials, PasswordResetAck, PasswordResetRequest, TokenPair, UserNew, UserView},
    error::ErrorBody,
    transaction::{TransactionPage, TransactionQuery},
};
use reqwest::{Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    local_state::{ACCESS_TOKEN_KEY, KeyValueStore},
};

/// Failures of one API call.
///
/// Status-mapped variants keep the whole error body, so each screen can pick
/// the server message it shows.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized(ErrorBody),
    #[error("forbidden")]
    Forbidden(ErrorBody),
    #[error("not found")]
    NotFound(ErrorBody),
    #[error("rejected by server ({})", .0.message().unwrap_or("no detail"))]
    Validation(ErrorBody),
    #[error("server error {status} ({})", .body.message().unwrap_or("no detail"))]
    Server { status: u16, body: ErrorBody },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("cannot persist token: {0}")]
    Storage(String),
}

impl ClientError {
    fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Unauthorized(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::Validation(body)
            | Self::Server { body, .. } => Some(body),
            Self::Transport(_) | Self::Decode(_) | Self::Storage(_) => None,
        }
    }

    /// The server's `detail` string only.
    pub fn detail(&self) -> Option<&str> {
        self.body().and_then(ErrorBody::detail)
    }

    /// `detail`, falling back to the first field error.
    pub fn message(&self) -> Option<&str> {
        self.body().and_then(ErrorBody::message)
    }
}

/// HTTP client for the finance API.
///
/// Requests to protected endpoints carry the persisted bearer token. A `401`
/// on one of them removes the token; the caller is expected to go back to the
/// login screen.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
}

impl Client {
    pub fn new(base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        // `Url::join` drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::Setting(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            store,
        })
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Decode(format!("invalid endpoint {path}: {err}")))
    }

    pub async fn register(&self, user: &UserNew) -> std::result::Result<UserView, ClientError> {
        self.post_public("users/", user).await
    }

    /// Exchanges credentials for a token pair and persists the access token.
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<TokenPair, ClientError> {
        let pair: TokenPair = self.post_public("token/", credentials).await?;
        if let Some(access) = pair.access.as_deref() {
            self.store
                .set(ACCESS_TOKEN_KEY, access)
                .map_err(|err| ClientError::Storage(err.to_string()))?;
            tracing::info!("access token stored");
        }
        Ok(pair)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(ACCESS_TOKEN_KEY)
    }

    pub async fn request_password_reset(
        &self,
        email: &str,
    ) -> std::result::Result<PasswordResetAck, ClientError> {
        let payload = PasswordResetRequest {
            email: email.to_string(),
        };
        self.post_public("password-reset/", &payload).await
    }

    pub async fn transactions_list(
        &self,
        query: &TransactionQuery,
    ) -> std::result::Result<TransactionPage, ClientError> {
        self.get_authorized("transactions/", query).await
    }

    async fn post_public<TReq: Serialize + ?Sized, TResp: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> std::result::Result<TResp, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "POST");
        let res = self.http.post(endpoint).json(body).send().await?;
        if res.status().is_success() {
            return decode(res).await;
        }
        Err(error_for(res).await)
    }

    async fn get_authorized<TQuery: Serialize + ?Sized, TResp: DeserializeOwned>(
        &self,
        path: &str,
        query: &TQuery,
    ) -> std::result::Result<TResp, ClientError> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!(%endpoint, "GET");
        let mut req = self.http.get(endpoint).query(query);
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        if res.status().is_success() {
            return decode(res).await;
        }

        let err = error_for(res).await;
        if matches!(err, ClientError::Unauthorized(_)) {
            tracing::warn!("session rejected, clearing access token");
            if let Err(store_err) = self.store.remove(ACCESS_TOKEN_KEY) {
                tracing::error!("failed to clear access token: {store_err}");
            }
        }
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    let bytes = res.bytes().await?;
    // Some endpoints answer 2xx with an empty body.
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &bytes[..]
    };
    serde_json::from_slice(body).map_err(|err| ClientError::Decode(err.to_string()))
}

async fn error_for(res: Response) -> ClientError {
    let status = res.status();
    // Non-JSON error pages carry no message.
    let body = res.json::<ErrorBody>().await.unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
        StatusCode::FORBIDDEN => ClientError::Forbidden(body),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(body)
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::{local_state::MemoryStore, test_support::spawn_stub};

    fn client_with(base_url: &str, token: Option<&str>) -> (Client, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        if let Some(token) = token {
            store.set(ACCESS_TOKEN_KEY, token).unwrap();
        }
        let client = Client::new(base_url, store.clone()).unwrap();
        (client, store)
    }

    #[tokio::test]
    async fn list_sends_bearer_and_limit() {
        let router = Router::new().route(
            "/transactions/",
            get(
                |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({
                        "count": 1,
                        "results": [{
                            "id": 1,
                            "title": auth,
                            "amount": query.get("limit").cloned().unwrap_or_else(|| "0".into()),
                            "type": "income",
                            "category": {"name": "Job"},
                            "date": "2026-10-01"
                        }]
                    }))
                },
            ),
        );
        let base = spawn_stub(router).await;
        let (client, _) = client_with(&base, Some("tok123"));

        let page = client
            .transactions_list(&TransactionQuery { limit: Some(5) })
            .await
            .unwrap();
        assert_eq!(page.results[0].title, "Bearer tok123");
        assert_eq!(page.results[0].amount.as_str(), "5");
    }

    #[tokio::test]
    async fn base_url_without_trailing_slash_keeps_its_path() {
        let router = Router::new().route(
            "/api/transactions/",
            get(|| async { Json(json!({"results": []})) }),
        );
        let base = spawn_stub(router).await;
        let (client, _) = client_with(&format!("{base}api"), Some("t"));

        let page = client
            .transactions_list(&TransactionQuery::default())
            .await
            .unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_clears_token() {
        let router = Router::new().route(
            "/transactions/",
            get(|| async {
                (
                    AxumStatus::UNAUTHORIZED,
                    Json(json!({"detail": "Given token not valid for any token type"})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let (client, store) = client_with(&base, Some("expired"));

        let err = client
            .transactions_list(&TransactionQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert_eq!(err.detail(), Some("Given token not valid for any token type"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn server_error_keeps_token() {
        let router = Router::new().route(
            "/transactions/",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_stub(router).await;
        let (client, store) = client_with(&base, Some("valid"));

        let err = client
            .transactions_list(&TransactionQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, .. }));
        assert_eq!(err.message(), None);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("valid"));
    }

    #[tokio::test]
    async fn login_persists_access_token() {
        let router = Router::new().route(
            "/token/",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["email"], "ada@example.com");
                Json(json!({"access": "acc", "refresh": "ref"}))
            }),
        );
        let base = spawn_stub(router).await;
        let (client, store) = client_with(&base, None);

        let pair = client
            .login(&Credentials {
                email: "ada@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(pair.refresh.as_deref(), Some("ref"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("acc"));
        assert!(client.is_authenticated());

        client.logout().unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_login_does_not_touch_store() {
        let router = Router::new().route(
            "/token/",
            post(|| async {
                (
                    AxumStatus::UNAUTHORIZED,
                    Json(json!({"detail": "No active account found with the given credentials"})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let (client, store) = client_with(&base, Some("previous"));

        let err = client
            .login(&Credentials {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.detail(),
            Some("No active account found with the given credentials")
        );
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn register_surfaces_first_field_error() {
        let router = Router::new().route(
            "/users/",
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({"email": ["user with this email already exists."]})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let (client, _) = client_with(&base, None);

        let err = client
            .register(&UserNew {
                email: "ada@example.com".to_string(),
                phone: "0123456789".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(err.message(), Some("user with this email already exists."));
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn detail_wins_over_field_errors() {
        let router = Router::new().route(
            "/password-reset/",
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({"email": ["Enter a valid email address."], "detail": "Throttled."})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let (client, _) = client_with(&base, None);

        let err = client
            .request_password_reset("ada@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.detail(), Some("Throttled."));
        assert_eq!(err.message(), Some("Throttled."));
        assert_eq!(err.to_string(), "rejected by server (Throttled.)");
    }

    #[tokio::test]
    async fn password_reset_accepts_empty_body() {
        let router = Router::new().route("/password-reset/", post(|| async { AxumStatus::OK }));
        let base = spawn_stub(router).await;
        let (client, _) = client_with(&base, None);

        let ack = client
            .request_password_reset("ada@example.com")
            .await
            .unwrap();
        assert_eq!(ack.detail, None);
    }
}
