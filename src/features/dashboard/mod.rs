pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod view;

pub use routes::routes;
pub use services::DashboardService;
