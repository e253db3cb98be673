// src/api/client.rs

use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::{config::Config, error::AppError, models::Pagination};

/// The `{ success, data, message }` envelope every backend endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Some error paths use `error` instead of `message`.
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    fn empty_success() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            error: None,
            pagination: None,
        }
    }

    fn failure_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_default()
    }
}

/// One page of a server-side paginated collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// Acknowledgement of a mutation (POST/PUT/DELETE).
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub status: u16,
    pub message: Option<String>,
}

/// Thin typed wrapper over `reqwest` for the platform's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.api_base_url.clone(),
            token: config.api_token.clone(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves an API path (leading slash optional) against the base URL.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, AppError> {
        let mut url = self.base.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET returning the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let request = self.request(Method::GET, path, query)?;
        let (status, envelope) = self.dispatch::<T>(request).await?;
        envelope.data.ok_or_else(|| AppError::Decode {
            status: Some(status),
            message: format!("response for {path} carried no data"),
        })
    }

    /// GET for a paginated collection; `data` must be a list.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, AppError> {
        let request = self.request(Method::GET, path, query)?;
        let (_, envelope) = self.dispatch::<Vec<T>>(request).await?;
        Ok(Page {
            items: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// GET returning the raw body, used for server-rendered CSV downloads.
    pub async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, AppError> {
        let response = self.request(Method::GET, path, query)?.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }
        Ok(body)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Ack, AppError> {
        let request = self.request(Method::POST, path, &[])?.json(body);
        self.acknowledge(request).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Ack, AppError> {
        let request = self.request(Method::PUT, path, &[])?.json(body);
        self.acknowledge(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Ack, AppError> {
        let request = self.request(Method::DELETE, path, &[])?;
        self.acknowledge(request).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, AppError> {
        let url = self.url(path, query)?;
        tracing::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(request)
    }

    async fn acknowledge(&self, request: RequestBuilder) -> Result<Ack, AppError> {
        let (status, envelope) = self.dispatch::<serde_json::Value>(request).await?;
        Ok(Ack {
            status,
            message: envelope.message,
        })
    }

    /// Sends a request and unwraps the envelope.
    ///
    /// `success: false` and non-2xx statuses both become `AppError::Api`.
    /// An empty 2xx body (e.g. 204) counts as success without data.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(u16, ApiResponse<T>), AppError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request failed to send: {:?}", e);
            AppError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = error_from_body(status, &body);
            tracing::warn!("Backend rejected request: {}", err);
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok((status.as_u16(), ApiResponse::empty_success()));
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| AppError::Decode {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })?;

        if !envelope.success {
            return Err(AppError::Api {
                status: Some(status.as_u16()),
                message: envelope.failure_message(),
            });
        }

        Ok((status.as_u16(), envelope))
    }
}

/// Sets, replaces or (with `None`) removes a query parameter. Returns whether anything changed.
pub fn upsert_param(
    params: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<String>,
) -> bool {
    let current = params.iter().position(|(k, _)| *k == key);
    match (current, value) {
        (Some(idx), Some(v)) if params[idx].1 == v => false,
        (Some(idx), Some(v)) => {
            params[idx].1 = v;
            true
        }
        (Some(idx), None) => {
            params.remove(idx);
            true
        }
        (None, Some(v)) => {
            params.push((key, v));
            true
        }
        (None, None) => false,
    }
}

/// Extracts `message` (or `error`) from an error body; non-JSON bodies yield an empty message.
fn error_from_body(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_default();
    AppError::Api {
        status: Some(status.as_u16()),
        message,
    }
}
