pub mod asn_service;

pub use asn_service::AsnService;
