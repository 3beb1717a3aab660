use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardSnapshotDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::lifetime::ViewLifetime;

/// Dashboard page state: the last complete snapshot and the last error.
///
/// A refresh either replaces the whole snapshot or leaves it untouched;
/// partial results are never shown.
pub struct DashboardView {
    service: DashboardService,
    snapshot: DashboardSnapshotDto,
    error_message: Option<String>,
    lifetime: ViewLifetime,
}

impl DashboardView {
    pub fn new(service: DashboardService) -> Self {
        Self {
            service,
            snapshot: DashboardSnapshotDto::default(),
            error_message: None,
            lifetime: ViewLifetime::new(),
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshotDto {
        &self.snapshot
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.service.snapshot().await;
        if !self.lifetime.is_alive() {
            tracing::debug!("Dropping dashboard refresh for a torn-down view");
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.error_message = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Dashboard refresh failed: {}", e);
                self.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn into_snapshot(self) -> DashboardSnapshotDto {
        self.snapshot
    }
}
