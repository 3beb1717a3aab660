pub mod dashboard_service;
pub mod recap;

pub use dashboard_service::DashboardService;
