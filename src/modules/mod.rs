//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the managed Supabase backend that owns all
//! persistence and authentication.

pub mod supabase;
