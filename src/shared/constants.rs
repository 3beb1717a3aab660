// =============================================================================
// BACKEND TABLES
// =============================================================================

pub const TABLE_INSTANSI: &str = "instansi";

pub const TABLE_ASN: &str = "asn";

pub const TABLE_VEHICLES: &str = "vehicles";

// =============================================================================
// DISPLAY
// =============================================================================

/// Label for vehicles with no caretaker, or a caretaker with no institution
pub const UNASSIGNED_LABEL: &str = "Unassigned";

// =============================================================================
// ROUTES
// =============================================================================

pub const LOGIN_PATH: &str = "/login";

pub const DASHBOARD_PATH: &str = "/dashboard";
