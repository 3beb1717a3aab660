use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::types::EmbeddedName;

/// Vehicle body type, stored with the backend's display labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VehicleType {
    #[default]
    #[serde(rename = "Sedan")]
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    #[serde(rename = "Sepeda Motor")]
    Motorcycle,
}

/// Row of the `vehicles` table joined with `asn:asn_id(name)`
#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub nopol: String,
    pub wheel_count: i32,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub year: i32,
    pub asn_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub asn: Option<EmbeddedName>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_type_uses_backend_labels() {
        assert_eq!(json!(VehicleType::Suv), json!("SUV"));
        assert_eq!(
            serde_json::from_value::<VehicleType>(json!("Sepeda Motor")).unwrap(),
            VehicleType::Motorcycle
        );
        assert!(serde_json::from_value::<VehicleType>(json!("Truck")).is_err());
    }
}
