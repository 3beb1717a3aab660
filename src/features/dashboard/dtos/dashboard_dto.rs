use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::vehicles::models::VehicleType;

// ============================================================================
// Summary
// ============================================================================

/// Scalar counts shown in the dashboard header cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_vehicles: i64,
    /// Vehicles with no caretaker
    pub unassigned_vehicles: i64,
    pub total_asn: i64,
    pub total_instansi: i64,
}

// ============================================================================
// Tables
// ============================================================================

/// One (institution, wheel count) bucket of the recap table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct RecapRowDto {
    /// Institution name, or "Unassigned"
    pub instansi: String,
    pub wheel_count: i32,
    /// Vehicles in the bucket
    pub total: i64,
    /// Vehicles in the bucket whose caretaker resolved to an institution
    pub asn_count: i64,
}

/// One vehicle and the name of its caretaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleAssignmentDto {
    pub nopol: String,
    pub wheel_count: i32,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    /// Caretaker name, or "Unassigned"
    pub asn_name: String,
}

// ============================================================================
// Chart
// ============================================================================

/// Bar chart point: vehicles and caretakers per institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPointDto {
    pub instansi: String,
    pub vehicle_count: i64,
    pub asn_count: i64,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything the dashboard page shows, read in one go
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSnapshotDto {
    pub summary: DashboardSummaryDto,
    pub recap: Vec<RecapRowDto>,
    pub assignments: Vec<VehicleAssignmentDto>,
    pub chart: Vec<ChartPointDto>,
}
