use uuid::Uuid;

/// Caller resolved from a live backend session by the session middleware
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Token the session was resolved from; backend calls are made with it
    pub access_token: String,
}
