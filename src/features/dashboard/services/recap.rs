//! Pure grouping behind the dashboard tables and chart.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use uuid::Uuid;

use crate::features::dashboard::dtos::{ChartPointDto, RecapRowDto, VehicleAssignmentDto};
use crate::features::vehicles::models::VehicleType;
use crate::shared::constants::UNASSIGNED_LABEL;
use crate::shared::types::EmbeddedName;

// ============================================================================
// Backend rows
// ============================================================================

/// `vehicles(wheel_count, asn:asn_id(instansi:instansi_id(id,name)))`
#[derive(Debug, Clone, Deserialize)]
pub struct RecapVehicleRow {
    pub wheel_count: i32,
    #[serde(default)]
    pub asn: Option<RecapAsnRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecapAsnRow {
    #[serde(default)]
    pub instansi: Option<InstansiRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstansiRef {
    pub name: String,
}

/// `vehicles(nopol, wheel_count, brand, type, asn:asn_id(name))`
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentVehicleRow {
    pub nopol: String,
    pub wheel_count: i32,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub asn: Option<EmbeddedName>,
}

/// `instansi(id, name, asn(id))`
#[derive(Debug, Clone, Deserialize)]
pub struct ChartInstansiRow {
    pub name: String,
    #[serde(default)]
    pub asn: Vec<IdRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: Uuid,
}

// ============================================================================
// Recap
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RecapInput {
    pub wheel_count: i32,
    /// Institution reached through the caretaker, if both exist
    pub institution_name: Option<String>,
}

impl From<RecapVehicleRow> for RecapInput {
    fn from(row: RecapVehicleRow) -> Self {
        Self {
            wheel_count: row.wheel_count,
            institution_name: row.asn.and_then(|a| a.instansi).map(|i| i.name),
        }
    }
}

/// Group vehicles by (institution, wheel count).
///
/// Vehicles without a caretaker, or whose caretaker has no institution, land
/// in the "Unassigned" bucket and never count towards `asn_count`. Rows come
/// out in order of first occurrence.
pub fn build_recap(vehicles: &[RecapInput]) -> Vec<RecapRowDto> {
    let mut rows: Vec<RecapRowDto> = Vec::new();
    let mut index: HashMap<(String, i32), usize> = HashMap::new();

    for vehicle in vehicles {
        let label = vehicle
            .institution_name
            .clone()
            .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());

        let slot = *index
            .entry((label.clone(), vehicle.wheel_count))
            .or_insert_with(|| {
                rows.push(RecapRowDto {
                    instansi: label,
                    wheel_count: vehicle.wheel_count,
                    total: 0,
                    asn_count: 0,
                });
                rows.len() - 1
            });

        let row = &mut rows[slot];
        row.total += 1;
        if vehicle.institution_name.is_some() {
            row.asn_count += 1;
        }
    }

    rows
}

// ============================================================================
// Assignments
// ============================================================================

pub fn project_assignments(rows: Vec<AssignmentVehicleRow>) -> Vec<VehicleAssignmentDto> {
    rows.into_iter()
        .map(|row| VehicleAssignmentDto {
            nopol: row.nopol,
            wheel_count: row.wheel_count,
            brand: row.brand,
            vehicle_type: row.vehicle_type,
            asn_name: row
                .asn
                .map(|a| a.name)
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string()),
        })
        .collect()
}

// ============================================================================
// Chart
// ============================================================================

/// One point per institution, in the order given. `vehicle_asn_ids` holds
/// the caretaker of every assigned vehicle.
pub fn build_chart_series(
    institutions: &[ChartInstansiRow],
    vehicle_asn_ids: &[Uuid],
) -> Vec<ChartPointDto> {
    institutions
        .iter()
        .map(|inst| {
            let members: HashSet<Uuid> = inst.asn.iter().map(|a| a.id).collect();
            let vehicle_count = vehicle_asn_ids
                .iter()
                .filter(|id| members.contains(id))
                .count();

            ChartPointDto {
                instansi: inst.name.clone(),
                vehicle_count: vehicle_count as i64,
                asn_count: inst.asn.len() as i64,
            }
        })
        .collect()
}
