pub mod asn_dto;

pub use asn_dto::*;
