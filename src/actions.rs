// Action handlers.
// Each control runs the same protocol: acquire busy, validate, one request, render, release.

use std::path::Path;

use crate::api::endpoints;
use crate::api::{ComparisonReportRequest, QualityReportRequest, ReviewDraft, Transport};
use crate::error::{ConsoleError, Result};
use crate::state::{
    ControlId, FieldId, Forms, Fragment, HealthStatus, RegionId, RenderKind, SharedState,
    StatusMessage, Tab, lock,
};
use crate::storage;
use crate::templates::{self, Templates};

pub const MAX_BATCH: i64 = 100;

/// Raw field values captured when a control is triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionInput {
    GenerateSingle { force_bad: bool },
    GenerateBatch { count: String },
    CheckQuality {
        rating: String,
        title: String,
        text: String,
        keywords: String,
    },
    QualityReport {
        csv_path: String,
        synthetic_path: String,
        real_path: String,
        include_charts: bool,
    },
    ComparisonReport {
        synthetic_path: String,
        real_path: String,
        include_charts: bool,
    },
    ListFiles,
    ShowConfig,
}

impl ActionInput {
    /// Snapshot the inputs a control reads.
    pub fn snapshot(control: ControlId, forms: &Forms) -> Self {
        match control {
            ControlId::GenerateSingle => ActionInput::GenerateSingle { force_bad: false },
            ControlId::GenerateBad => ActionInput::GenerateSingle { force_bad: true },
            ControlId::GenerateBatch => ActionInput::GenerateBatch {
                count: forms.text(FieldId::ReviewCount).to_string(),
            },
            ControlId::CheckQuality => ActionInput::CheckQuality {
                rating: forms.text(FieldId::Rating).to_string(),
                title: forms.text(FieldId::Title).to_string(),
                text: forms.text(FieldId::ReviewText).to_string(),
                keywords: forms.text(FieldId::Keywords).to_string(),
            },
            ControlId::QualityReport => ActionInput::QualityReport {
                csv_path: forms.text(FieldId::CsvPath).to_string(),
                synthetic_path: forms.text(FieldId::SyntheticPath).to_string(),
                real_path: forms.text(FieldId::RealPath).to_string(),
                include_charts: forms.checked(FieldId::IncludeCharts),
            },
            ControlId::ComparisonReport => ActionInput::ComparisonReport {
                synthetic_path: forms.text(FieldId::SyntheticPath).to_string(),
                real_path: forms.text(FieldId::RealPath).to_string(),
                include_charts: forms.checked(FieldId::IncludeCharts),
            },
            ControlId::ListFiles => ActionInput::ListFiles,
            ControlId::ShowConfig => ActionInput::ShowConfig,
        }
    }

    /// Region the action renders into.
    pub fn region(&self) -> RegionId {
        match self {
            ActionInput::GenerateSingle { .. } => RegionId::Single,
            ActionInput::GenerateBatch { .. } => RegionId::Batch,
            ActionInput::CheckQuality { .. } => RegionId::Quality,
            ActionInput::QualityReport { .. } | ActionInput::ComparisonReport { .. } => {
                RegionId::Report
            }
            ActionInput::ListFiles | ActionInput::ShowConfig => RegionId::Server,
        }
    }

    /// Check inputs and build the request. No I/O happens here.
    pub fn validate(self) -> Result<ValidRequest> {
        match self {
            ActionInput::GenerateSingle { force_bad } => Ok(ValidRequest::GenerateSingle { force_bad }),
            ActionInput::GenerateBatch { count } => {
                parse_count(&count).map(|count| ValidRequest::GenerateBatch { count })
            }
            ActionInput::CheckQuality {
                rating,
                title,
                text,
                keywords,
            } => {
                if title.trim().is_empty() || text.trim().is_empty() {
                    return Err(ConsoleError::Validation(
                        "Please fill in title and review text".to_string(),
                    ));
                }
                let rating = rating
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| ConsoleError::Validation("Rating must be a number".to_string()))?;
                Ok(ValidRequest::CheckQuality(ReviewDraft {
                    rating,
                    review_text: format!("{}. {}", title, text),
                    title,
                    persona_keywords: parse_keywords(&keywords),
                }))
            }
            ActionInput::QualityReport {
                csv_path,
                synthetic_path,
                real_path,
                include_charts,
            } => {
                if csv_path.trim().is_empty() {
                    return Err(ConsoleError::Validation("CSV path is required".to_string()));
                }
                Ok(ValidRequest::QualityReport(QualityReportRequest {
                    csv_path,
                    synthetic_path: non_empty(synthetic_path),
                    real_path: non_empty(real_path),
                    include_charts,
                }))
            }
            ActionInput::ComparisonReport {
                synthetic_path,
                real_path,
                include_charts,
            } => {
                if synthetic_path.trim().is_empty() || real_path.trim().is_empty() {
                    return Err(ConsoleError::Validation(
                        "Both synthetic and real paths are required".to_string(),
                    ));
                }
                Ok(ValidRequest::ComparisonReport(ComparisonReportRequest {
                    real_path,
                    synthetic_path,
                    include_charts,
                }))
            }
            ActionInput::ListFiles => Ok(ValidRequest::ListFiles),
            ActionInput::ShowConfig => Ok(ValidRequest::ShowConfig),
        }
    }
}

/// A request whose inputs passed validation.
#[derive(Debug, Clone)]
pub enum ValidRequest {
    GenerateSingle { force_bad: bool },
    GenerateBatch { count: u32 },
    CheckQuality(ReviewDraft),
    QualityReport(QualityReportRequest),
    ComparisonReport(ComparisonReportRequest),
    ListFiles,
    ShowConfig,
}

impl ValidRequest {
    /// Issue the request and render the success template.
    pub async fn execute(
        self,
        transport: &dyn Transport,
        templates: &Templates<'_>,
    ) -> Result<(Fragment, RenderKind)> {
        match self {
            ValidRequest::GenerateSingle { force_bad } => {
                let review = endpoints::generate_single(transport, force_bad).await?;
                Ok(templates.single_review(&review))
            }
            ValidRequest::GenerateBatch { count } => {
                let result = endpoints::generate_batch(transport, count).await?;
                Ok(templates.batch(&result))
            }
            ValidRequest::CheckQuality(review) => {
                let verdict = endpoints::check_quality(transport, review).await?;
                Ok(templates.quality(&verdict))
            }
            ValidRequest::QualityReport(request) => {
                let report = endpoints::quality_report(transport, &request).await?;
                Ok(templates.report("Quality Report Generated!", &report))
            }
            ValidRequest::ComparisonReport(request) => {
                let report = endpoints::comparison_report(transport, &request).await?;
                Ok(templates.report("Comparison Report Generated!", &report))
            }
            ValidRequest::ListFiles => {
                let listing = endpoints::list_files(transport).await?;
                Ok(templates.file_listing(&listing))
            }
            ValidRequest::ShowConfig => {
                let config = endpoints::server_config(transport).await?;
                Ok(templates.server_config(&config))
            }
        }
    }
}

/// Split a comma-separated keyword list, trimming and dropping empty entries.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a batch size, accepting only integers in `1..=MAX_BATCH`.
pub fn parse_count(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|count| (1..=MAX_BATCH).contains(count))
        .and_then(|count| u32::try_from(count).ok())
        .ok_or_else(|| {
            ConsoleError::Validation(format!("Please enter a number between 1 and {}", MAX_BATCH))
        })
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Holds a control busy; releases it when dropped, on every exit path.
pub struct BusyGuard {
    state: SharedState,
    control: ControlId,
}

impl BusyGuard {
    /// Mark `control` busy. Returns `None` if it is already busy.
    pub fn acquire(state: &SharedState, control: ControlId) -> Option<Self> {
        if !lock(state).controls.try_acquire(control) {
            return None;
        }
        Some(Self {
            state: state.clone(),
            control,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.state).controls.set_busy(self.control, false);
    }
}

/// Run the action bound to `control`.
///
/// The triggering control is passed in explicitly. A control that is already
/// busy is not re-entered.
pub async fn run_action(state: &SharedState, transport: &dyn Transport, control: ControlId) {
    let Some(_guard) = BusyGuard::acquire(state, control) else {
        tracing::debug!(?control, "ignored trigger on busy control");
        return;
    };

    let (input, sanitize) = {
        let view = lock(state);
        (
            ActionInput::snapshot(control, &view.forms),
            view.sanitize_server_text,
        )
    };
    let region = input.region();
    let templates = Templates::new(transport, sanitize);

    let outcome = match input.validate() {
        Ok(request) => request.execute(transport, &templates).await,
        Err(e) => Err(e),
    };

    let (content, kind) = match outcome {
        Ok(rendered) => {
            tracing::info!(?control, tab = control.tab().id(), region = region.id(), "action succeeded");
            rendered
        }
        Err(e) if e.is_validation() => {
            tracing::info!(?control, error = %e, "validation failed");
            templates.error(&e.to_string())
        }
        Err(e) => {
            tracing::warn!(?control, error = %e, "action failed");
            templates.error(&format!("Error: {}", e))
        }
    };

    lock(state).regions.render(region, content, kind);
}

/// One-shot liveness probe; never retried.
pub async fn probe_health(state: &SharedState, transport: &dyn Transport) -> HealthStatus {
    let result = endpoints::health(transport).await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, "health check failed");
    }
    let status = HealthStatus::from_probe(&result);
    tracing::info!(status = status.display(), "health probe finished");
    lock(state).health = status;
    status
}

/// Download every artifact linked from the tab's regions into `dir`.
///
/// Returns the number of files written.
pub async fn download_links(
    state: &SharedState,
    transport: &dyn Transport,
    tab: Tab,
    dir: &Path,
) -> usize {
    let (paths, sanitize): (Vec<String>, bool) = {
        let view = lock(state);
        let paths = view
            .regions
            .for_tab(tab)
            .flat_map(|(_, region)| region.content.link_paths())
            .map(str::to_string)
            .collect();
        (paths, view.sanitize_server_text)
    };
    let clean = |text: &str| {
        if sanitize {
            templates::sanitize(text).into_owned()
        } else {
            text.to_string()
        }
    };

    if paths.is_empty() {
        lock(state).status = Some(StatusMessage::info("No files to download on this tab"));
        return 0;
    }

    let mut written = 0;
    let mut failures = Vec::new();
    for path in &paths {
        match download_one(transport, path, dir).await {
            Ok(target) => {
                tracing::info!(remote = %clean(path), local = %target.display(), "downloaded");
                written += 1;
            }
            Err(e) => {
                let (path, error) = (clean(path), clean(&e.to_string()));
                tracing::warn!(remote = %path, %error, "download failed");
                failures.push(format!("{}: {}", path, error));
            }
        }
    }

    let message = if failures.is_empty() {
        StatusMessage::info(format!("Downloaded {} file(s) to {}", written, dir.display()))
    } else {
        StatusMessage::error(format!(
            "Downloaded {}/{}; {}",
            written,
            paths.len(),
            failures.join("; ")
        ))
    };
    lock(state).status = Some(message);
    written
}

async fn download_one(
    transport: &dyn Transport,
    path: &str,
    dir: &Path,
) -> Result<std::path::PathBuf> {
    let bytes = endpoints::download(transport, path).await?;
    let target = dir.join(storage::download_file_name(path));
    storage::write_bytes(&target, &bytes)?;
    Ok(target)
}
