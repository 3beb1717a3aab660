use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::asn::dtos::{AsnFormDto, AsnOptionDto, AsnResponseDto};
use crate::features::asn::models::{Asn, AsnOption};
use crate::modules::supabase::{decode_row, decode_rows, DataClient, Embed, Query};
use crate::shared::constants::{TABLE_ASN, TABLE_INSTANSI};
use crate::shared::editor::EditorResource;

/// Service for personnel (ASN) records
pub struct AsnService {
    client: Arc<dyn DataClient>,
}

impl AsnService {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// `*, instansi:instansi_id(name)`
    fn with_instansi_name() -> Query {
        Query::new()
            .select_all()
            .embed(Embed::to_one("instansi", TABLE_INSTANSI, "instansi_id").field("name"))
    }

    /// All personnel with their institution name, newest first
    pub async fn list(&self) -> Result<Vec<AsnResponseDto>> {
        let query = Self::with_instansi_name().order_desc("created_at");
        let rows = self.client.select(TABLE_ASN, &query).await?;
        let asn: Vec<Asn> = decode_rows(rows)?;
        Ok(asn.into_iter().map(Into::into).collect())
    }

    /// `id, name` pairs for the vehicle form, ordered by name
    pub async fn options(&self) -> Result<Vec<AsnOptionDto>> {
        let query = Query::new().fields(&["id", "name"]).order_asc("name");
        let rows = self.client.select(TABLE_ASN, &query).await?;
        let options: Vec<AsnOption> = decode_rows(rows)?;
        Ok(options.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, form: AsnFormDto) -> Result<AsnResponseDto> {
        form.validate()?;

        let row = self
            .client
            .insert(TABLE_ASN, Self::record(&form), &Self::with_instansi_name())
            .await?;
        let asn: Asn = decode_row(row)?;

        tracing::info!("Created ASN {} in instansi {}", asn.id, asn.instansi_id);
        Ok(asn.into())
    }

    pub async fn update(&self, id: Uuid, form: AsnFormDto) -> Result<AsnResponseDto> {
        form.validate()?;

        let row = self
            .client
            .update(TABLE_ASN, id, Self::record(&form), &Self::with_instansi_name())
            .await?;
        let asn: Asn = decode_row(row)?;

        tracing::info!("Updated ASN {}", id);
        Ok(asn.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.client.delete(TABLE_ASN, id).await?;
        tracing::info!("Deleted ASN {}", id);
        Ok(())
    }

    fn record(form: &AsnFormDto) -> serde_json::Value {
        json!({
            "nip": form.nip,
            "name": form.name,
            "position": form.position,
            "instansi_id": form.instansi_id,
        })
    }
}

#[async_trait]
impl EditorResource for AsnService {
    type Row = AsnResponseDto;
    type Form = AsnFormDto;

    fn row_id(row: &AsnResponseDto) -> Uuid {
        row.id
    }

    fn form_from_row(row: &AsnResponseDto) -> AsnFormDto {
        AsnFormDto {
            nip: row.nip.clone(),
            name: row.name.clone(),
            position: row.position.clone(),
            instansi_id: Some(row.instansi_id),
        }
    }

    async fn list(&self) -> Result<Vec<AsnResponseDto>> {
        AsnService::list(self).await
    }

    async fn create(&self, form: AsnFormDto) -> Result<AsnResponseDto> {
        AsnService::create(self, form).await
    }

    async fn update(&self, id: Uuid, form: AsnFormDto) -> Result<AsnResponseDto> {
        AsnService::update(self, id, form).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        AsnService::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::modules::supabase::InMemoryDataClient;
    use crate::shared::editor::RecordEditor;
    use crate::shared::test_helpers::{seed_instansi, seed_named_asn, seed_vehicle};

    fn form(name: &str, instansi_id: Option<Uuid>) -> AsnFormDto {
        AsnFormDto {
            nip: "198001012005011001".to_string(),
            name: name.to_string(),
            position: "Kepala Seksi".to_string(),
            instansi_id,
        }
    }

    #[tokio::test]
    async fn test_list_joins_instansi_newest_first() {
        let client = InMemoryDataClient::with_schema();
        let instansi = seed_instansi(&client, "Dinas A");
        seed_named_asn(&client, instansi, "Older");
        seed_named_asn(&client, instansi, "Newer");
        let service = AsnService::new(Arc::new(client));

        let rows = service.list().await.unwrap();

        assert_eq!(rows[0].name, "Newer");
        assert_eq!(rows[1].name, "Older");
        assert!(rows
            .iter()
            .all(|r| r.instansi_name.as_deref() == Some("Dinas A")));
    }

    #[tokio::test]
    async fn test_begin_create_starts_without_instansi() {
        let client = InMemoryDataClient::with_schema();
        let mut editor = RecordEditor::new(AsnService::new(Arc::new(client.clone())));
        editor.begin_create();
        assert_eq!(editor.state().form.instansi_id, None);

        let err = editor.submit(form("Budi", None)).await.unwrap_err();

        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages, vec!["instansi_id: Instansi is required"])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(client.writes().is_empty());
    }

    #[tokio::test]
    async fn test_created_asn_is_listed_with_instansi_name() {
        let client = InMemoryDataClient::with_schema();
        let instansi = seed_instansi(&client, "Dinas A");
        let mut editor = RecordEditor::new(AsnService::new(Arc::new(client)));

        editor.begin_create();
        editor.submit(form("Budi", Some(instansi))).await.unwrap();

        let state = editor.state();
        assert!(!state.dialog_open);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].instansi_name.as_deref(), Some("Dinas A"));
    }

    #[tokio::test]
    async fn test_unknown_instansi_is_rejected_by_backend() {
        let client = InMemoryDataClient::with_schema();
        let service = AsnService::new(Arc::new(client.clone()));

        let err = service
            .create(form("Budi", Some(Uuid::new_v4())))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Remote(ref e) if e.is_constraint_violation()));
        assert!(client.rows(TABLE_ASN).is_empty());
    }

    #[tokio::test]
    async fn test_deleting_asn_with_vehicle_keeps_items() {
        let client = InMemoryDataClient::with_schema();
        let instansi = seed_instansi(&client, "Dinas A");
        let asn = seed_named_asn(&client, instansi, "Budi");
        seed_vehicle(&client, 4, Some(asn));
        let mut editor = RecordEditor::new(AsnService::new(Arc::new(client)));
        editor.list().await.unwrap();

        assert!(editor.remove(asn).await.is_err());

        assert_eq!(editor.state().items.len(), 1);
        assert!(editor.state().error_message.is_some());
    }
}
