pub mod instansi_service;

pub use instansi_service::InstansiService;
