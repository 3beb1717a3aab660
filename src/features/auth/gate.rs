//! Per-navigation route guard.
//!
//! The session is looked up on every check; nothing is cached between
//! navigations.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::modules::supabase::DataClient;
use crate::shared::constants::{DASHBOARD_PATH, LOGIN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Root,
    Dashboard,
    Asn,
    Instansi,
    Vehicles,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/login" => Some(Self::Login),
            "/" => Some(Self::Root),
            "/dashboard" => Some(Self::Dashboard),
            "/asn" => Some(Self::Asn),
            "/instansi" => Some(Self::Instansi),
            "/vehicles" => Some(Self::Vehicles),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Root => "/",
            Self::Dashboard => DASHBOARD_PATH,
            Self::Asn => "/asn",
            Self::Instansi => "/instansi",
            Self::Vehicles => "/vehicles",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Proceed,
    Redirect { to: String },
}

pub fn decide(route: Route, has_session: bool) -> GateDecision {
    if route.requires_session() && !has_session {
        GateDecision::Redirect {
            to: LOGIN_PATH.to_string(),
        }
    } else if route == Route::Login && has_session {
        GateDecision::Redirect {
            to: DASHBOARD_PATH.to_string(),
        }
    } else {
        GateDecision::Proceed
    }
}

pub struct SessionGate {
    client: Arc<dyn DataClient>,
}

impl SessionGate {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Decide whether navigation to `path` may proceed for the holder of
    /// `access_token`
    pub async fn check(&self, path: &str, access_token: Option<&str>) -> Result<GateDecision> {
        let route = Route::parse(path)
            .ok_or_else(|| AppError::NotFound(format!("Unknown route '{}'", path)))?;

        let has_session = match access_token {
            Some(token) => self.client.get_session(token).await?.is_some(),
            None => false,
        };
        tracing::debug!(
            "Gate check for {}: has_session={}",
            route.path(),
            has_session
        );

        Ok(decide(route, has_session))
    }
}
