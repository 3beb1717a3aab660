pub mod asn;
pub mod auth;
pub mod dashboard;
pub mod instansi;
pub mod vehicles;
