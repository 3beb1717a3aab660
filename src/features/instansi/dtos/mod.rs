pub mod instansi_dto;

pub use instansi_dto::*;
