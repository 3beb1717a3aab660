//! Supabase data module
//!
//! Provides the `DataClient` capability (filtered/joined reads, counts, writes
//! and session operations) and its PostgREST/GoTrue implementation.

mod client;
mod error;
#[cfg(test)]
mod memory;
mod query;
mod rest_client;

pub use client::{decode_row, decode_rows, DataClient, DataResult, Session, SessionUser};
pub use error::DataError;
#[cfg(test)]
pub use memory::{InMemoryDataClient, Operation, WriteCall};
pub use query::{Embed, Filter, Query};
pub use rest_client::SupabaseClient;
