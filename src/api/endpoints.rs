// Review generator API endpoint functions.
// One typed call per endpoint; each decodes the `success` envelope.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConsoleError, Result};

use super::client::Transport;
use super::types::{
    BatchResult, ComparisonReportRequest, ConfigResponse, FileListResponse, FileListing,
    GenerateBatchRequest, GenerateBatchResponse, GenerateSingleRequest, GenerateSingleResponse,
    GeneratedReview, HealthResponse, QualityCheckRequest, QualityCheckResponse,
    QualityReportRequest, QualityVerdict, ReportResponse, ReviewDraft, decode_envelope,
};

pub const GENERATE_SINGLE: &str = "generate/single";
pub const GENERATE_BATCH: &str = "generate/batch";
pub const QUALITY_CHECK: &str = "quality-check";
pub const QUALITY_REPORT: &str = "reports/quality";
pub const COMPARISON_REPORT: &str = "reports/comparison";
pub const FILES_LIST: &str = "files/list";
pub const SERVER_CONFIG: &str = "config";
pub const HEALTH: &str = "/health";

fn to_body<T: Serialize>(request: &T) -> Result<Value> {
    serde_json::to_value(request).map_err(ConsoleError::Json)
}

/// Path of a server artifact under the file-serving endpoint, kept verbatim.
pub fn file_path(path: &str) -> String {
    format!("files/{}", path)
}

/// Generate one review, optionally with a deliberately low-quality prompt.
pub async fn generate_single(transport: &dyn Transport, force_bad: bool) -> Result<GeneratedReview> {
    let body = to_body(&GenerateSingleRequest { force_bad })?;
    let value = transport.post_json(GENERATE_SINGLE, body).await?;
    let response: GenerateSingleResponse = decode_envelope(value)?;
    Ok(response.review)
}

/// Generate a batch of quality-checked reviews.
pub async fn generate_batch(transport: &dyn Transport, count: u32) -> Result<BatchResult> {
    let body = to_body(&GenerateBatchRequest { count })?;
    let value = transport.post_json(GENERATE_BATCH, body).await?;
    let response: GenerateBatchResponse = decode_envelope(value)?;
    Ok(response.result)
}

/// Run the server-side quality checker on a draft review.
pub async fn check_quality(transport: &dyn Transport, review: ReviewDraft) -> Result<QualityVerdict> {
    let body = to_body(&QualityCheckRequest { review })?;
    let value = transport.post_json(QUALITY_CHECK, body).await?;
    let response: QualityCheckResponse = decode_envelope(value)?;
    Ok(response.quality_check)
}

/// Build a quality report from a generation log.
pub async fn quality_report(
    transport: &dyn Transport,
    request: &QualityReportRequest,
) -> Result<ReportResponse> {
    let value = transport.post_json(QUALITY_REPORT, to_body(request)?).await?;
    decode_envelope(value)
}

/// Build a real-vs-synthetic comparison report.
pub async fn comparison_report(
    transport: &dyn Transport,
    request: &ComparisonReportRequest,
) -> Result<ReportResponse> {
    let value = transport.post_json(COMPARISON_REPORT, to_body(request)?).await?;
    decode_envelope(value)
}

/// List generated artifacts on the server.
pub async fn list_files(transport: &dyn Transport) -> Result<FileListing> {
    let value = transport.get_json(FILES_LIST).await?;
    let response: FileListResponse = decode_envelope(value)?;
    Ok(response.files)
}

/// Fetch the server's generation config.
pub async fn server_config(transport: &dyn Transport) -> Result<Value> {
    let value = transport.get_json(SERVER_CONFIG).await?;
    let response: ConfigResponse = decode_envelope(value)?;
    Ok(response.config)
}

/// Liveness probe.
pub async fn health(transport: &dyn Transport) -> Result<HealthResponse> {
    let value = transport.get_json(HEALTH).await?;
    serde_json::from_value(value).map_err(|e| ConsoleError::Decode(e.to_string()))
}

/// Download a server artifact.
pub async fn download(transport: &dyn Transport, relative: &str) -> Result<Vec<u8>> {
    transport.get_bytes(&file_path(relative)).await
}
