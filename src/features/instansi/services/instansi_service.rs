use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::instansi::dtos::{InstansiFormDto, InstansiOptionDto, InstansiResponseDto};
use crate::features::instansi::models::{Instansi, InstansiOption};
use crate::modules::supabase::{decode_row, decode_rows, DataClient, Query};
use crate::shared::constants::TABLE_INSTANSI;
use crate::shared::editor::EditorResource;

/// Service for institution records
pub struct InstansiService {
    client: Arc<dyn DataClient>,
}

impl InstansiService {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// All institutions, ordered by name
    pub async fn list(&self) -> Result<Vec<InstansiResponseDto>> {
        let query = Query::new().select_all().order_asc("name");
        let rows = self.client.select(TABLE_INSTANSI, &query).await?;
        let instansi: Vec<Instansi> = decode_rows(rows)?;
        Ok(instansi.into_iter().map(Into::into).collect())
    }

    /// `id, name` pairs for the ASN form, ordered by name
    pub async fn options(&self) -> Result<Vec<InstansiOptionDto>> {
        let query = Query::new().fields(&["id", "name"]).order_asc("name");
        let rows = self.client.select(TABLE_INSTANSI, &query).await?;
        let options: Vec<InstansiOption> = decode_rows(rows)?;
        Ok(options.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, form: InstansiFormDto) -> Result<InstansiResponseDto> {
        form.validate()?;

        let row = self
            .client
            .insert(TABLE_INSTANSI, Self::record(&form), &Query::new().select_all())
            .await?;
        let instansi: Instansi = decode_row(row)?;

        tracing::info!("Created instansi {}", instansi.id);
        Ok(instansi.into())
    }

    pub async fn update(&self, id: Uuid, form: InstansiFormDto) -> Result<InstansiResponseDto> {
        form.validate()?;

        let row = self
            .client
            .update(
                TABLE_INSTANSI,
                id,
                Self::record(&form),
                &Query::new().select_all(),
            )
            .await?;
        let instansi: Instansi = decode_row(row)?;

        tracing::info!("Updated instansi {}", id);
        Ok(instansi.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(TABLE_INSTANSI, id).await?;
        tracing::info!("Deleted instansi {}", id);
        Ok(())
    }

    fn record(form: &InstansiFormDto) -> serde_json::Value {
        json!({
            "name": form.name,
            "description": form.description,
        })
    }
}

#[async_trait]
impl EditorResource for InstansiService {
    type Row = InstansiResponseDto;
    type Form = InstansiFormDto;

    fn row_id(row: &InstansiResponseDto) -> Uuid {
        row.id
    }

    fn form_from_row(row: &InstansiResponseDto) -> InstansiFormDto {
        InstansiFormDto {
            name: row.name.clone(),
            description: row.description.clone().unwrap_or_default(),
        }
    }

    async fn list(&self) -> Result<Vec<InstansiResponseDto>> {
        InstansiService::list(self).await
    }

    async fn create(&self, form: InstansiFormDto) -> Result<InstansiResponseDto> {
        InstansiService::create(self, form).await
    }

    async fn update(&self, id: Uuid, form: InstansiFormDto) -> Result<InstansiResponseDto> {
        InstansiService::update(self, id, form).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        InstansiService::delete(self, id).await
    }
}
