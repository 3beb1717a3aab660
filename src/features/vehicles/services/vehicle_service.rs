use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::vehicles::dtos::{VehicleFormDto, VehicleResponseDto};
use crate::features::vehicles::models::Vehicle;
use crate::modules::supabase::{decode_row, decode_rows, DataClient, Embed, Query};
use crate::shared::constants::{TABLE_ASN, TABLE_VEHICLES};
use crate::shared::editor::EditorResource;

pub const ASN_ALREADY_ASSIGNED: &str = "This ASN already has a vehicle assigned";

/// Service for vehicle records
pub struct VehicleService {
    client: Arc<dyn DataClient>,
}

impl VehicleService {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// `*, asn:asn_id(name)`
    fn with_asn_name() -> Query {
        Query::new()
            .select_all()
            .embed(Embed::to_one("asn", TABLE_ASN, "asn_id").field("name"))
    }

    /// All vehicles with their caretaker name, newest first
    pub async fn list(&self) -> Result<Vec<VehicleResponseDto>> {
        let query = Self::with_asn_name().order_desc("created_at");
        let rows = self.client.select(TABLE_VEHICLES, &query).await?;
        let vehicles: Vec<Vehicle> = decode_rows(rows)?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    /// Fails with a conflict if another vehicle already has `asn_id` as its
    /// caretaker. `editing` is left out of the lookup so a vehicle can keep
    /// its own caretaker.
    ///
    /// This is a read before the write, so two concurrent submissions for the
    /// same ASN can both pass. A backend unique constraint on `asn_id` closes
    /// the gap; its violation surfaces as a 409 as well.
    async fn ensure_caretaker_free(&self, asn_id: Uuid, editing: Option<Uuid>) -> Result<()> {
        let mut query = Query::new()
            .field("id")
            .eq("asn_id", asn_id.to_string());
        if let Some(id) = editing {
            query = query.neq("id", id.to_string());
        }

        match self
            .client
            .select_single(TABLE_VEHICLES, &query.limit(1))
            .await
        {
            Ok(existing) => {
                tracing::info!(
                    "ASN {} is already caretaker of vehicle {}",
                    asn_id,
                    existing["id"]
                );
                Err(AppError::Conflict(ASN_ALREADY_ASSIGNED.to_string()))
            }
            Err(e) if e.is_no_rows() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create(&self, form: VehicleFormDto) -> Result<VehicleResponseDto> {
        form.validate()?;
        if let Some(asn_id) = form.asn_id {
            self.ensure_caretaker_free(asn_id, None).await?;
        }

        let row = self
            .client
            .insert(TABLE_VEHICLES, Self::record(&form), &Self::with_asn_name())
            .await?;
        let vehicle: Vehicle = decode_row(row)?;

        tracing::info!("Created vehicle {} ({})", vehicle.id, vehicle.nopol);
        Ok(vehicle.into())
    }

    pub async fn update(&self, id: Uuid, form: VehicleFormDto) -> Result<VehicleResponseDto> {
        form.validate()?;
        if let Some(asn_id) = form.asn_id {
            self.ensure_caretaker_free(asn_id, Some(id)).await?;
        }

        let row = self
            .client
            .update(TABLE_VEHICLES, id, Self::record(&form), &Self::with_asn_name())
            .await?;
        let vehicle: Vehicle = decode_row(row)?;

        tracing::info!("Updated vehicle {}", id);
        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(TABLE_VEHICLES, id).await?;
        tracing::info!("Deleted vehicle {}", id);
        Ok(())
    }

    fn record(form: &VehicleFormDto) -> serde_json::Value {
        json!({
            "nopol": form.nopol,
            "wheel_count": form.wheel_count,
            "brand": form.brand,
            "type": form.vehicle_type,
            "year": form.year,
            "asn_id": form.asn_id,
        })
    }
}

#[async_trait]
impl EditorResource for VehicleService {
    type Row = VehicleResponseDto;
    type Form = VehicleFormDto;

    fn row_id(row: &VehicleResponseDto) -> Uuid {
        row.id
    }

    fn form_from_row(row: &VehicleResponseDto) -> VehicleFormDto {
        VehicleFormDto {
            nopol: row.nopol.clone(),
            wheel_count: row.wheel_count,
            brand: row.brand.clone(),
            vehicle_type: row.vehicle_type,
            year: row.year,
            asn_id: row.asn_id,
        }
    }

    async fn list(&self) -> Result<Vec<VehicleResponseDto>> {
        VehicleService::list(self).await
    }

    async fn create(&self, form: VehicleFormDto) -> Result<VehicleResponseDto> {
        VehicleService::create(self, form).await
    }

    async fn update(&self, id: Uuid, form: VehicleFormDto) -> Result<VehicleResponseDto> {
        VehicleService::update(self, id, form).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        VehicleService::delete(self, id).await
    }
}
