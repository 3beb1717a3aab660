//! List + create/edit dialog controller shared by the instansi, ASN and
//! vehicle screens.
//!
//! A `RecordEditor` owns its view state outright and is built fresh for each
//! view. Every write is followed by a full re-fetch of the list; nothing is
//! applied optimistically, so a failed call never leaves partial state behind.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::shared::lifetime::ViewLifetime;
use crate::shared::types::{ApiResponse, Meta};

/// One backend collection as seen by an editor screen
#[async_trait]
pub trait EditorResource: Send + Sync {
    /// Row as listed (including joined display columns)
    type Row: Clone + Send + Sync;
    /// Form values; `Default` gives the blank create form
    type Form: Clone + Default + Send + Sync;

    fn row_id(row: &Self::Row) -> Uuid;

    fn form_from_row(row: &Self::Row) -> Self::Form;

    async fn list(&self) -> Result<Vec<Self::Row>>;

    /// Validate and insert
    async fn create(&self, form: Self::Form) -> Result<Self::Row>;

    /// Validate and update the record with `id`
    async fn update(&self, id: Uuid, form: Self::Form) -> Result<Self::Row>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// How a write that reached the backend left the editor's list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// `items` were re-fetched after the write
    Refreshed,
    /// The write went through but `items` could not be re-fetched
    Stale { reason: String },
}

/// Envelope for a completed write: the refreshed list, or no list and the
/// re-fetch error when `items` are stale
pub fn write_response<T: Clone>(
    items: &[T],
    outcome: &WriteOutcome,
    message: &str,
) -> ApiResponse<Vec<T>> {
    match outcome {
        WriteOutcome::Refreshed => ApiResponse::success(
            Some(items.to_vec()),
            Some(message.to_string()),
            Some(Meta {
                total: items.len() as i64,
            }),
        ),
        WriteOutcome::Stale { reason } => ApiResponse {
            errors: Some(vec![reason.clone()]),
            ..ApiResponse::success(
                None,
                Some(format!("{}, but the list could not be refreshed", message)),
                None,
            )
        },
    }
}

#[derive(Debug, Clone)]
pub struct EditorState<R, F> {
    pub items: Vec<R>,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub editing_item: Option<R>,
    pub dialog_open: bool,
    pub form: F,
}

impl<R, F: Default> Default for EditorState<R, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_submitting: false,
            error_message: None,
            editing_item: None,
            dialog_open: false,
            form: F::default(),
        }
    }
}

pub struct RecordEditor<S: EditorResource> {
    resource: S,
    state: EditorState<S::Row, S::Form>,
    lifetime: ViewLifetime,
}

impl<S: EditorResource> RecordEditor<S> {
    pub fn new(resource: S) -> Self {
        Self {
            resource,
            state: EditorState::default(),
            lifetime: ViewLifetime::new(),
        }
    }

    pub fn state(&self) -> &EditorState<S::Row, S::Form> {
        &self.state
    }

    /// Handle for tearing the view down from outside
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    /// Replace `items` with a fresh fetch. On failure the previous items stay.
    pub async fn list(&mut self) -> Result<()> {
        let result = self.resource.list().await;
        if !self.lifetime.is_alive() {
            tracing::debug!("Dropping list result for a torn-down view");
            return Ok(());
        }

        match result {
            Ok(items) => {
                self.state.items = items;
                Ok(())
            }
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn begin_create(&mut self) {
        self.state.editing_item = None;
        self.state.form = S::Form::default();
        self.state.error_message = None;
        self.state.dialog_open = true;
    }

    pub fn begin_edit(&mut self, row: S::Row) {
        self.state.form = S::form_from_row(&row);
        self.state.editing_item = Some(row);
        self.state.error_message = None;
        self.state.dialog_open = true;
    }

    /// Insert (no row being edited) or update, then re-list and close the
    /// dialog. Any failure before the write completes keeps the dialog open
    /// with the submitted values; a failed re-list after it is `Stale`.
    pub async fn submit(&mut self, form: S::Form) -> Result<WriteOutcome> {
        self.state.form = form.clone();
        self.state.is_submitting = true;
        self.state.error_message = None;

        let written = match self.state.editing_item.as_ref().map(S::row_id) {
            Some(id) => self.resource.update(id, form).await,
            None => self.resource.create(form).await,
        };

        if !self.lifetime.is_alive() {
            tracing::debug!("Dropping submit result for a torn-down view");
            return Ok(Self::torn_down());
        }
        self.state.is_submitting = false;

        if let Err(e) = written {
            self.state.error_message = Some(e.to_string());
            return Err(e);
        }

        let outcome = self.refresh_after_write().await;
        if self.lifetime.is_alive() {
            self.close_dialog();
        }
        Ok(outcome)
    }

    /// Delete then re-list. On failure `items` are left as they were.
    pub async fn remove(&mut self, id: Uuid) -> Result<WriteOutcome> {
        let result = self.resource.delete(id).await;
        if !self.lifetime.is_alive() {
            return Ok(Self::torn_down());
        }

        match result {
            Ok(()) => Ok(self.refresh_after_write().await),
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn refresh_after_write(&mut self) -> WriteOutcome {
        match self.list().await {
            Ok(()) if self.lifetime.is_alive() => WriteOutcome::Refreshed,
            Ok(()) => Self::torn_down(),
            Err(e) => {
                tracing::warn!("Write succeeded but re-fetching the list failed: {}", e);
                WriteOutcome::Stale {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn torn_down() -> WriteOutcome {
        WriteOutcome::Stale {
            reason: "View was closed before the list was refreshed".to_string(),
        }
    }

    pub fn close_dialog(&mut self) {
        self.state.dialog_open = false;
        self.state.editing_item = None;
        self.state.form = S::Form::default();
    }
}
