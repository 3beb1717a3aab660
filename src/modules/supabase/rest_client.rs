use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use super::client::{DataClient, DataResult, Session, SessionUser};
use super::error::DataError;
use super::query::{Filter, Query};
use crate::core::config::SupabaseConfig;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Client for a Supabase project: PostgREST under `/rest/v1`, GoTrue under `/auth/v1`
#[derive(Clone)]
pub struct SupabaseClient {
    http_client: reqwest::Client,
    base_url: String,
    anon_key: String,
    /// Signed-in user's token; requests fall back to the anon key without it
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> DataResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.url,
            anon_key: config.anon_key,
            access_token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn rest(&self, method: Method, table: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    fn auth(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/auth/v1/{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> DataResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Supabase {} request failed: {}", context, e);
            DataError::transport(format!("Failed to reach backend: {}", e))
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let err = DataError::from_response(status, &body);
        if err.is_no_rows() {
            tracing::debug!("Supabase {}: no matching row", context);
        } else {
            tracing::error!("Supabase {} error: HTTP {} - {}", context, status, body);
        }
        Err(err)
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response, context: &str) -> DataResult<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse Supabase {} response: {}", context, e);
            DataError::transport(format!("Failed to parse backend response: {}", e))
        })
    }
}

/// Total from a `Content-Range` header such as `0-24/57` or `*/0`
fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl DataClient for SupabaseClient {
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        let request = self.rest(Method::GET, table).query(&query.to_params());
        let response = self.send(request, "select").await?;
        Self::json(response, "select").await
    }

    async fn select_single(&self, table: &str, query: &Query) -> DataResult<Value> {
        let request = self
            .rest(Method::GET, table)
            .query(&query.to_params())
            .header(header::ACCEPT, SINGLE_OBJECT);
        let response = self.send(request, "select_single").await?;
        Self::json(response, "select_single").await
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> DataResult<i64> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(filters.iter().map(Filter::to_param));

        let request = self
            .rest(Method::HEAD, table)
            .query(&params)
            .header("Prefer", "count=exact");
        let response = self.send(request, "count").await?;

        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| DataError::transport("Backend response is missing a row count"))
    }

    async fn insert(&self, table: &str, record: Value, returning: &Query) -> DataResult<Value> {
        let request = self
            .rest(Method::POST, table)
            .query(&[("select", returning.select_param())])
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(&record);
        let response = self.send(request, "insert").await?;
        Self::json(response, "insert").await
    }

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: Value,
        returning: &Query,
    ) -> DataResult<Value> {
        let request = self
            .rest(Method::PATCH, table)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("select", returning.select_param()),
            ])
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(&patch);
        let response = self.send(request, "update").await?;
        Self::json(response, "update").await
    }

    async fn delete(&self, table: &str, id: Uuid) -> DataResult<()> {
        let request = self
            .rest(Method::DELETE, table)
            .query(&[("id", format!("eq.{}", id))]);
        self.send(request, "delete").await?;
        Ok(())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DataResult<Session> {
        let request = self
            .auth(Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }));
        let response = self.send(request, "sign_in").await?;
        Self::json(response, "sign_in").await
    }

    async fn get_session(&self, access_token: &str) -> DataResult<Option<SessionUser>> {
        let response = self
            .auth(Method::GET, "user")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Supabase session lookup failed: {}", e);
                DataError::transport(format!("Failed to reach backend: {}", e))
            })?;

        match response.status() {
            status if status.is_success() => Self::json(response, "get_session").await.map(Some),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Access token rejected by backend");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Supabase session lookup error: HTTP {} - {}", status, body);
                Err(DataError::from_response(status.as_u16(), &body))
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> DataResult<()> {
        let request = self.auth(Method::POST, "logout").bearer_auth(access_token);
        self.send(request, "sign_out").await?;
        Ok(())
    }

    fn scoped(&self, access_token: &str) -> Arc<dyn DataClient> {
        Arc::new(Self {
            access_token: Some(access_token.to_string()),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            url: "https://demo.supabase.co".to_string(),
            anon_key: "anon-key".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/57"), Some(57));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let client = SupabaseClient::new(config()).unwrap();
        assert_eq!(client.bearer(), "anon-key");
        assert_eq!(client.base_url(), "https://demo.supabase.co");
    }

    #[test]
    fn test_rest_request_targets_table_url() {
        let client = SupabaseClient::new(config()).unwrap();
        let request = client
            .rest(Method::GET, "vehicles")
            .query(&Query::new().select_all().is_null("asn_id").to_params())
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://demo.supabase.co/rest/v1/vehicles?select=*&asn_id=is.null"
        );
        assert_eq!(request.headers().get("apikey").unwrap(), "anon-key");
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer anon-key"
        );
    }
}
