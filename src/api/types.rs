// Review generator API request and response types.
// Every endpoint answers with a `success` envelope; payloads are decoded per endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConsoleError, Result};

/// Common response envelope: `{success, error?, ...payload}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    payload: serde_json::Map<String, Value>,
}

/// Split a raw response into its payload or the server-reported error.
///
/// A body that is not an envelope at all, or whose payload does not fit `T`,
/// is a decode error rather than an application error.
pub fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<T> {
    let envelope: Envelope =
        serde_json::from_value(value).map_err(|e| ConsoleError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ConsoleError::Application(
            envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    serde_json::from_value(Value::Object(envelope.payload))
        .map_err(|e| ConsoleError::Decode(e.to_string()))
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSingleRequest {
    pub force_bad: bool,
}

/// A single raw generated review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReview {
    pub title: String,
    pub rating: f64,
    pub pros: String,
    pub cons: String,
    pub model: String,
    pub persona: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateSingleResponse {
    pub review: GeneratedReview,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateBatchRequest {
    pub count: u32,
}

/// Outcome of a batch generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub success_count: u64,
    pub skipped_count: u64,
    pub clean_path: String,
    pub with_models_path: String,
    pub csv_log: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBatchResponse {
    pub result: BatchResult,
}

/// Review submitted for a quality check.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewDraft {
    pub rating: f64,
    pub title: String,
    pub review_text: String,
    pub persona_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityCheckRequest {
    pub review: ReviewDraft,
}

/// Per-metric scores for a review that passed every check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScores {
    pub length: f64,
    pub diversity: f64,
    #[serde(default)]
    pub semantic: Option<f64>,
    pub bias: f64,
    pub realism: f64,
    pub persona: f64,
}

/// Wire shape of `quality_check`; only some field combinations are valid.
#[derive(Debug, Deserialize)]
struct RawQualityCheck {
    passed: bool,
    #[serde(default)]
    scores: Option<QualityScores>,
    #[serde(default)]
    failed_metric: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// Quality checker verdict.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawQualityCheck")]
pub enum QualityVerdict {
    Passed(QualityScores),
    Failed { metric: String, score: f64 },
}

impl TryFrom<RawQualityCheck> for QualityVerdict {
    type Error = ConsoleError;

    fn try_from(raw: RawQualityCheck) -> Result<Self> {
        match raw {
            RawQualityCheck {
                passed: true,
                scores: Some(scores),
                ..
            } => Ok(QualityVerdict::Passed(scores)),
            RawQualityCheck {
                passed: false,
                failed_metric: Some(metric),
                score: Some(score),
                ..
            } => Ok(QualityVerdict::Failed { metric, score }),
            RawQualityCheck { passed: true, .. } => {
                Err(ConsoleError::Decode("passed check without scores".to_string()))
            }
            RawQualityCheck { passed: false, .. } => Err(ConsoleError::Decode(
                "failed check without metric and score".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QualityCheckResponse {
    pub quality_check: QualityVerdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReportRequest {
    pub csv_path: String,
    pub synthetic_path: Option<String>,
    pub real_path: Option<String>,
    pub include_charts: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReportRequest {
    pub real_path: String,
    pub synthetic_path: String,
    pub include_charts: bool,
}

/// Generated report, shared by the quality and comparison endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    pub report_path: String,
    pub report_text: String,
    #[serde(default)]
    pub csv_used: Option<String>,
    #[serde(default)]
    pub synthetic_used: Option<String>,
    #[serde(default)]
    pub real_used: Option<String>,
}

/// A generated artifact on the server.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
    pub size: u64,
    /// Seconds since the epoch.
    pub modified: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub csv_logs: Vec<FileEntry>,
    #[serde(default)]
    pub synthetic_reviews: Vec<FileEntry>,
    #[serde(default)]
    pub synthetic_with_models: Vec<FileEntry>,
    #[serde(default)]
    pub reports: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    pub files: FileListing,
}

#[derive(Debug, Deserialize)]
pub struct ConfigResponse {
    pub config: Value,
}

/// `/health` is not enveloped.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_success_payload() {
        let value = json!({
            "success": true,
            "review": {
                "title": "T", "rating": 4, "pros": "P", "cons": "C",
                "model": "M", "persona": "X"
            }
        });
        let response: GenerateSingleResponse = decode_envelope(value).unwrap();
        assert_eq!(response.review.title, "T");
        assert_eq!(response.review.rating, 4.0);
    }

    #[test]
    fn test_decode_application_error() {
        let value = json!({"success": false, "error": "Maximum 100 reviews per batch request"});
        let err = decode_envelope::<GenerateBatchResponse>(value).unwrap_err();
        assert!(matches!(err, ConsoleError::Application(ref m) if m.contains("Maximum 100")));
    }

    #[test]
    fn test_decode_application_error_without_message() {
        let err = decode_envelope::<ConfigResponse>(json!({"success": false})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = decode_envelope::<GenerateSingleResponse>(json!({"success": true}))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Decode(_)));

        let err = decode_envelope::<GenerateSingleResponse>(json!(["not", "an", "envelope"]))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Decode(_)));
    }

    #[test]
    fn test_quality_verdicts() {
        let passed: QualityCheckResponse = decode_envelope(json!({
            "success": true,
            "quality_check": {
                "passed": true,
                "scores": {"length": 87, "diversity": 0.8123, "bias": 0.1, "realism": 3, "persona": 2}
            }
        }))
        .unwrap();
        assert!(matches!(passed.quality_check, QualityVerdict::Passed(ref s) if s.semantic.is_none()));

        let failed: QualityCheckResponse = decode_envelope(json!({
            "success": true,
            "quality_check": {"passed": false, "failed_metric": "length", "score": 7}
        }))
        .unwrap();
        assert!(matches!(
            failed.quality_check,
            QualityVerdict::Failed { ref metric, score } if metric == "length" && score == 7.0
        ));

        let err = decode_envelope::<QualityCheckResponse>(json!({
            "success": true,
            "quality_check": {"passed": false}
        }))
        .unwrap_err();
        assert!(matches!(err, ConsoleError::Decode(_)));
    }

    #[test]
    fn test_optional_report_paths_serialize_as_null() {
        let request = QualityReportRequest {
            csv_path: "logs/a.csv".to_string(),
            synthetic_path: None,
            real_path: Some("real.json".to_string()),
            include_charts: true,
        };
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["synthetic_path"], Value::Null);
        assert_eq!(value["real_path"], "real.json");
    }
}
