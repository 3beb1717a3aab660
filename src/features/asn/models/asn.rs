use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::shared::types::EmbeddedName;

/// Row of the `asn` table joined with `instansi:instansi_id(name)`
#[derive(Debug, Clone, Deserialize)]
pub struct Asn {
    pub id: Uuid,
    pub nip: String,
    pub name: String,
    pub position: String,
    pub instansi_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub instansi: Option<EmbeddedName>,
}

/// `asn(id,name)` as used by dropdowns
#[derive(Debug, Clone, Deserialize)]
pub struct AsnOption {
    pub id: Uuid,
    pub name: String,
}
