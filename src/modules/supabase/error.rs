use serde_json::Value;
use thiserror::Error;

/// PostgREST code for "JSON object requested, multiple (or no) rows returned"
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Structured failure reported by the backend (or by the transport to it)
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct DataError {
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
    pub status: Option<u16>,
}

impl DataError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            details: None,
            hint: None,
            status: None,
        }
    }

    /// Failure before any response arrived (connect, timeout, decode)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
            hint: None,
            status: None,
        }
    }

    pub fn no_rows() -> Self {
        Self::new(
            NO_ROWS_CODE,
            "JSON object requested, multiple (or no) rows returned",
        )
        .with_status(406)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(NO_ROWS_CODE)
    }

    /// Postgres integrity constraint violation (class 23: unique, foreign key, ...)
    pub fn is_constraint_violation(&self) -> bool {
        self.code.as_deref().is_some_and(|c| c.starts_with("23"))
    }

    /// Row-level security or grant rejection
    pub fn is_permission_denied(&self) -> bool {
        self.code.as_deref() == Some("42501")
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401))
    }

    /// Parse an error body from PostgREST (`code`/`message`/`details`/`hint`)
    /// or GoTrue (`error_code`/`msg` or `error`/`error_description`)
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let field = |name: &str| -> Option<String> {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .map(String::from)
        };

        let code = field("code")
            .or_else(|| field("error_code"))
            .or_else(|| field("error"));

        let message = field("message")
            .or_else(|| field("msg"))
            .or_else(|| field("error_description"))
            .or_else(|| field("error"))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("Backend returned HTTP {}", status)
                } else {
                    body.to_string()
                }
            });

        Self {
            code,
            message,
            details: field("details"),
            hint: field("hint"),
            status: Some(status),
        }
    }
}
