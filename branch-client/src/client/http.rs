// branch-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ErrorBody;

use crate::{ClientError, ClientResult};

/// HTTP 客户端 trait
///
/// `path` 以 `/` 开头 (如 `/api/branches?page=1`)
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Map a non-success response to [`ClientError`]
///
/// 优先解析服务端错误体 `{code, message}`，否则按状态码降级。
pub(crate) fn error_from_body(status: u16, text: String) -> ClientError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        return ClientError::Api {
            code: body.code,
            message: body.message,
        };
    }
    match StatusCode::from_u16(status) {
        Ok(StatusCode::NOT_FOUND) => ClientError::NotFound(text),
        Ok(StatusCode::BAD_REQUEST) | Ok(StatusCode::UNPROCESSABLE_ENTITY) => {
            ClientError::Validation(text)
        }
        _ => ClientError::Internal(text),
    }
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(error_from_body(status.as_u16(), text));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.delete(self.url(path)).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/api/branches?page=1"),
            "http://localhost:5000/api/branches?page=1"
        );
    }

    #[test]
    fn test_error_from_body() {
        let err = error_from_body(400, r#"{"code":1001,"message":"dup"}"#.to_string());
        assert!(matches!(err, ClientError::Api { code: 1001, ref message } if message == "dup"));

        let err = error_from_body(404, "nope".to_string());
        assert!(matches!(err, ClientError::NotFound(_)));

        let err = error_from_body(502, "bad gateway".to_string());
        assert!(matches!(err, ClientError::Internal(_)));
    }
}
