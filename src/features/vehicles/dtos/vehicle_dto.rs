use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::vehicles::models::{Vehicle, VehicleType};

pub const MIN_YEAR: i32 = 1900;

fn validate_year(year: i32) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    if (MIN_YEAR..=current).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message(
            format!("Year must be between {} and {}", MIN_YEAR, current).into(),
        ))
    }
}

/// Create/edit form for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct VehicleFormDto {
    #[validate(length(min = 1, message = "Nopol is required"))]
    pub nopol: String,

    #[validate(range(min = 2, max = 4, message = "Wheel count must be between 2 and 4"))]
    pub wheel_count: i32,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    #[validate(custom(function = "validate_year"))]
    pub year: i32,

    /// Caretaker (penanggung jawab); each ASN holds at most one vehicle
    #[serde(default)]
    pub asn_id: Option<Uuid>,
}

impl Default for VehicleFormDto {
    fn default() -> Self {
        Self {
            nopol: String::new(),
            wheel_count: 2,
            brand: String::new(),
            vehicle_type: VehicleType::Sedan,
            year: Utc::now().year(),
            asn_id: None,
        }
    }
}

/// Response DTO for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponseDto {
    pub id: Uuid,
    pub nopol: String,
    pub wheel_count: i32,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub year: i32,
    pub asn_id: Option<Uuid>,
    /// Name of the caretaker, if any
    pub asn_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponseDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            nopol: v.nopol,
            wheel_count: v.wheel_count,
            brand: v.brand,
            vehicle_type: v.vehicle_type,
            year: v.year,
            asn_id: v.asn_id,
            asn_name: v.asn.map(|a| a.name),
            created_at: v.created_at,
        }
    }
}
