pub mod instansi;

pub use instansi::{Instansi, InstansiOption};
