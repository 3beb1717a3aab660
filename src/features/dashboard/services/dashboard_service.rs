use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{
    ChartPointDto, DashboardSnapshotDto, DashboardSummaryDto, RecapRowDto, VehicleAssignmentDto,
};
use crate::features::dashboard::services::recap::{
    build_chart_series, build_recap, project_assignments, AssignmentVehicleRow, ChartInstansiRow,
    RecapInput, RecapVehicleRow,
};
use crate::modules::supabase::{decode_rows, DataClient, Embed, Filter, Query};
use crate::shared::constants::{TABLE_ASN, TABLE_INSTANSI, TABLE_VEHICLES};

#[derive(serde::Deserialize)]
struct VehicleAsnId {
    asn_id: Uuid,
}

/// Service for the aggregate dashboard reads
pub struct DashboardService {
    client: Arc<dyn DataClient>,
}

impl DashboardService {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    // ========================================================================
    // Summary
    // ========================================================================

    /// Vehicle, unassigned vehicle, ASN and instansi counts
    pub async fn summary(&self) -> Result<DashboardSummaryDto> {
        let unassigned = [Filter::IsNull("asn_id".to_string())];
        let (total_vehicles, unassigned_vehicles, total_asn, total_instansi) = futures::try_join!(
            self.client.count(TABLE_VEHICLES, &[]),
            self.client.count(TABLE_VEHICLES, &unassigned),
            self.client.count(TABLE_ASN, &[]),
            self.client.count(TABLE_INSTANSI, &[]),
        )?;

        Ok(DashboardSummaryDto {
            total_vehicles,
            unassigned_vehicles,
            total_asn,
            total_instansi,
        })
    }

    // ========================================================================
    // Tables
    // ========================================================================

    pub async fn recap(&self) -> Result<Vec<RecapRowDto>> {
        let query = Query::new().field("wheel_count").embed(
            Embed::to_one("asn", TABLE_ASN, "asn_id").embed(
                Embed::to_one("instansi", TABLE_INSTANSI, "instansi_id")
                    .field("id")
                    .field("name"),
            ),
        );
        let rows: Vec<RecapVehicleRow> =
            decode_rows(self.client.select(TABLE_VEHICLES, &query).await?)?;

        let inputs: Vec<RecapInput> = rows.into_iter().map(Into::into).collect();
        Ok(build_recap(&inputs))
    }

    pub async fn assignments(&self) -> Result<Vec<VehicleAssignmentDto>> {
        let query = Query::new()
            .fields(&["nopol", "wheel_count", "brand", "type"])
            .embed(Embed::to_one("asn", TABLE_ASN, "asn_id").field("name"));
        let rows: Vec<AssignmentVehicleRow> =
            decode_rows(self.client.select(TABLE_VEHICLES, &query).await?)?;

        Ok(project_assignments(rows))
    }

    // ========================================================================
    // Chart
    // ========================================================================

    /// Vehicles and caretakers per institution, ordered by institution name.
    ///
    /// Two reads replace one count per institution; vehicles are matched to
    /// institutions in memory.
    pub async fn chart(&self) -> Result<Vec<ChartPointDto>> {
        let institutions_query = Query::new()
            .fields(&["id", "name"])
            .embed(Embed::to_many(TABLE_ASN, "instansi_id").field("id"))
            .order_asc("name");
        let vehicles_query = Query::new().field("asn_id").not_null("asn_id");

        let (institutions, vehicles) = futures::try_join!(
            self.client.select(TABLE_INSTANSI, &institutions_query),
            self.client.select(TABLE_VEHICLES, &vehicles_query),
        )?;

        let institutions: Vec<ChartInstansiRow> = decode_rows(institutions)?;
        let vehicle_asn_ids: Vec<Uuid> = decode_rows::<VehicleAsnId>(vehicles)?
            .into_iter()
            .map(|v| v.asn_id)
            .collect();

        Ok(build_chart_series(&institutions, &vehicle_asn_ids))
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// All dashboard reads, issued concurrently. Any failure fails the whole
    /// snapshot.
    pub async fn snapshot(&self) -> Result<DashboardSnapshotDto> {
        let (summary, recap, assignments, chart) = futures::try_join!(
            self.summary(),
            self.recap(),
            self.assignments(),
            self.chart(),
        )?;

        Ok(DashboardSnapshotDto {
            summary,
            recap,
            assignments,
            chart,
        })
    }
}
