//! ExportDispatcher use case: selected results -> one export sink.
//!
//! Reads the selection and the last search parameters, never writes them.
//! Each dispatch is independent; several may run at once.

use crate::domain::{
    DomainError, ExportArtifact, ExportJob, ExportSink, ExportStatus, Notification, csv_filename,
};
use crate::ports::{ExportSinkPort, FileSaverPort, UrlOpenerPort};
use crate::usecases::{SharedState, bounded};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Body of a Sheets export response. Only the link matters.
#[derive(Debug, Deserialize)]
struct SheetsResponse {
    #[serde(default)]
    url: Option<String>,
}

pub struct ExportDispatcher {
    sinks: Arc<dyn ExportSinkPort>,
    opener: Arc<dyn UrlOpenerPort>,
    saver: Arc<dyn FileSaverPort>,
    state: SharedState,
    timeout: Duration,
}

impl ExportDispatcher {
    pub fn new(
        sinks: Arc<dyn ExportSinkPort>,
        opener: Arc<dyn UrlOpenerPort>,
        saver: Arc<dyn FileSaverPort>,
        state: SharedState,
        timeout: Duration,
    ) -> Self {
        Self {
            sinks,
            opener,
            saver,
            state,
            timeout,
        }
    }

    /// Send the selected records of the last search to `sink`.
    ///
    /// Returns `Err` only when the preconditions fail (no search yet, empty
    /// selection); nothing is sent in that case. Sink failures come back as
    /// `ExportStatus::Failed` and a notification.
    pub async fn dispatch(&self, sink: ExportSink) -> Result<ExportStatus, DomainError> {
        let job = {
            let mut state = self.state.write().await;
            let parameters = state.session().last_parameters().cloned().ok_or_else(|| {
                DomainError::Validation("run a search before exporting".to_string())
            })?;
            if state.selection().is_empty() {
                return Err(DomainError::Validation(
                    "select at least one result to export".to_string(),
                ));
            }
            let job = ExportJob::new(sink, parameters, state.records(), state.selection());
            state.export_started();
            job
        };

        info!(%sink, records = job.records.len(), "export dispatched");
        let status = match self.run(&job).await {
            Ok(artifact) => {
                info!(%sink, artifact = ?artifact, "export succeeded");
                ExportStatus::Succeeded(artifact)
            }
            Err(e) => {
                warn!(%sink, error = %e, "export failed");
                ExportStatus::Failed(match e {
                    DomainError::Export { reason, .. } => reason,
                    other => other.user_message(),
                })
            }
        };

        let mut state = self.state.write().await;
        state.export_finished();
        state.notify(match &status {
            ExportStatus::Succeeded(_) => Notification::success(format!("Export to {} succeeded", sink)),
            ExportStatus::Failed(reason) => {
                Notification::error(format!("Export to {} failed: {}", sink, reason))
            }
        });
        Ok(status)
    }

    async fn run(&self, job: &ExportJob) -> Result<Option<ExportArtifact>, DomainError> {
        let payload = job.payload();
        let body = bounded("export", self.timeout, self.sinks.export(job.sink, &payload)).await?;

        match job.sink {
            ExportSink::Sheets => {
                let url = match serde_json::from_slice::<SheetsResponse>(&body) {
                    Ok(response) => response.url.filter(|u| !u.trim().is_empty()),
                    Err(e) => {
                        warn!(error = %e, "sheets response is not JSON; nothing to open");
                        None
                    }
                };
                let Some(url) = url else {
                    warn!("sheets export returned no url");
                    return Ok(None);
                };
                self.opener.open(&url).await?;
                Ok(Some(ExportArtifact::Link(url)))
            }
            ExportSink::Csv => {
                let filename = csv_filename(
                    &job.parameters.keyword,
                    &job.parameters.city_label,
                    Utc::now().date_naive(),
                );
                let path = self.saver.save(&filename, &body).await?;
                Ok(Some(ExportArtifact::File(path)))
            }
            ExportSink::Notion => Ok(None),
        }
    }
}
