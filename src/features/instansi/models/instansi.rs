use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Row of the `instansi` table
#[derive(Debug, Clone, Deserialize)]
pub struct Instansi {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `instansi(id,name)` as used by dropdowns
#[derive(Debug, Clone, Deserialize)]
pub struct InstansiOption {
    pub id: Uuid,
    pub name: String,
}
