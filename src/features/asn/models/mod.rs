pub mod asn;

pub use asn::{Asn, AsnOption};
