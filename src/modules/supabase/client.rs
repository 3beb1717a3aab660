use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::DataError;
use super::query::{Filter, Query};

pub type DataResult<T> = std::result::Result<T, DataError>;

/// User behind an active backend session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by a password sign-in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub user: SessionUser,
}

/// Everything the application asks of the managed backend.
///
/// Reads and writes run as whoever the client is scoped to: the anonymous
/// key by default, or a signed-in user after [`DataClient::scoped`].
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Filtered, ordered, optionally joined read
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>>;

    /// Read expecting exactly one row. Zero rows fail with the
    /// `PGRST116` "no matching row" code.
    async fn select_single(&self, table: &str, query: &Query) -> DataResult<Value>;

    async fn count(&self, table: &str, filters: &[Filter]) -> DataResult<i64>;

    /// Insert one record and return it shaped by the columns of `returning`
    async fn insert(&self, table: &str, record: Value, returning: &Query) -> DataResult<Value>;

    /// Patch the record with `id` and return it shaped by the columns of
    /// `returning`. A missing record fails with `PGRST116`.
    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: Value,
        returning: &Query,
    ) -> DataResult<Value>;

    async fn delete(&self, table: &str, id: Uuid) -> DataResult<()>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DataResult<Session>;

    /// Resolve an access token to its user, `None` if the session is not valid
    async fn get_session(&self, access_token: &str) -> DataResult<Option<SessionUser>>;

    async fn sign_out(&self, access_token: &str) -> DataResult<()>;

    /// Client that acts on behalf of the session owning `access_token`
    fn scoped(&self, access_token: &str) -> Arc<dyn DataClient>;
}

pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> DataResult<Vec<T>> {
    rows.into_iter().map(decode_row).collect()
}

pub fn decode_row<T: DeserializeOwned>(row: Value) -> DataResult<T> {
    serde_json::from_value(row)
        .map_err(|e| DataError::transport(format!("Failed to decode row: {}", e)))
}
