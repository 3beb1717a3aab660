use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::instansi::models::{Instansi, InstansiOption};

/// Create/edit form for an institution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct InstansiFormDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Response DTO for an institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InstansiResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Instansi> for InstansiResponseDto {
    fn from(i: Instansi) -> Self {
        Self {
            id: i.id,
            name: i.name,
            description: i.description,
            created_at: i.created_at,
        }
    }
}

/// Institution choice for the ASN form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstansiOptionDto {
    pub id: Uuid,
    pub name: String,
}

impl From<InstansiOption> for InstansiOptionDto {
    fn from(o: InstansiOption) -> Self {
        Self {
            id: o.id,
            name: o.name,
        }
    }
}
