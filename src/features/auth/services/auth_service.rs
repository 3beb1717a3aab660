use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, MeResponseDto};
use crate::features::auth::gate::{GateDecision, SessionGate};
use crate::features::auth::model::AuthenticatedUser;
use crate::modules::supabase::DataClient;

/// Service for session operations (login, logout, navigation checks)
pub struct AuthService {
    client: Arc<dyn DataClient>,
}

impl AuthService {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Sign in with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .client
            .sign_in_with_password(&dto.email, &dto.password)
            .await
            .map_err(|e| {
                if e.is_unauthorized() || matches!(e.status, Some(400)) {
                    tracing::info!("Login rejected for {}", dto.email);
                    AppError::Unauthorized(e.message)
                } else {
                    AppError::Remote(e)
                }
            })?;

        tracing::info!("User {} signed in", session.user.id);
        Ok(session.into())
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<()> {
        self.client.sign_out(&user.access_token).await?;
        tracing::info!("User {} signed out", user.user_id);
        Ok(())
    }

    pub fn current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }

    pub async fn navigation(&self, path: &str, access_token: Option<&str>) -> Result<GateDecision> {
        SessionGate::new(Arc::clone(&self.client))
            .check(path, access_token)
            .await
    }
}
