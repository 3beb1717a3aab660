use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::asn::models::{Asn, AsnOption};

/// Create/edit form for a personnel record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AsnFormDto {
    #[validate(length(min = 1, message = "NIP is required"))]
    pub nip: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,

    #[validate(required(message = "Instansi is required"))]
    #[serde(default)]
    pub instansi_id: Option<Uuid>,
}

/// Response DTO for a personnel record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AsnResponseDto {
    pub id: Uuid,
    pub nip: String,
    pub name: String,
    pub position: String,
    pub instansi_id: Uuid,
    /// Name of the joined institution
    pub instansi_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Asn> for AsnResponseDto {
    fn from(a: Asn) -> Self {
        Self {
            id: a.id,
            nip: a.nip,
            name: a.name,
            position: a.position,
            instansi_id: a.instansi_id,
            instansi_name: a.instansi.map(|i| i.name),
            created_at: a.created_at,
        }
    }
}

/// Personnel choice for the vehicle form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AsnOptionDto {
    pub id: Uuid,
    pub name: String,
}

impl From<AsnOption> for AsnOptionDto {
    fn from(o: AsnOption) -> Self {
        Self {
            id: o.id,
            name: o.name,
        }
    }
}
