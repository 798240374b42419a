// Result templates.
// Map decoded API responses onto region fragments, with server text sanitised for the terminal.

use std::borrow::Cow;

use chrono::{DateTime, Local};

use crate::api::endpoints::file_path;
use crate::api::{
    BatchResult, FileEntry, FileListing, GeneratedReview, QualityScores, QualityVerdict,
    ReportResponse, Transport,
};
use crate::state::{Block, Fragment, RenderKind, ScoreCard};

/// Strip control characters that could drive the terminal, keeping newlines and tabs.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        Cow::Owned(
            text.chars()
                .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Display a count-like number: integral values without decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Display a ratio/score to two decimals.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Human-readable file size.
fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn format_modified(epoch_secs: f64) -> String {
    DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn card(label: &str, value: String, passed: Option<bool>) -> ScoreCard {
    ScoreCard {
        label: label.to_string(),
        value,
        passed,
    }
}

/// Builds fragments for one transport (for link URLs).
pub struct Templates<'a> {
    transport: &'a dyn Transport,
    sanitize: bool,
}

impl<'a> Templates<'a> {
    pub fn new(transport: &'a dyn Transport, sanitize: bool) -> Self {
        Self {
            transport,
            sanitize,
        }
    }

    fn text(&self, text: &str) -> String {
        if self.sanitize {
            sanitize(text).into_owned()
        } else {
            text.to_string()
        }
    }

    fn link(&self, label: &str, path: &str) -> Block {
        Block::Link {
            label: label.to_string(),
            path: path.to_string(),
            url: self.text(&self.transport.url(&file_path(path))),
        }
    }

    /// Error block shared by validation, application, and transport failures.
    pub fn error(&self, message: &str) -> (Fragment, RenderKind) {
        (
            Fragment::new().push(Block::Text(format!("❌ {}", self.text(message)))),
            RenderKind::Error,
        )
    }

    pub fn single_review(&self, review: &GeneratedReview) -> (Fragment, RenderKind) {
        let fragment = Fragment::new()
            .push(Block::Heading(self.text(&review.title)))
            .push(Block::Field {
                label: "Rating".to_string(),
                value: format!("{}/5 ⭐", format_number(review.rating)),
            })
            .push(Block::Field {
                label: "Pros".to_string(),
                value: self.text(&review.pros),
            })
            .push(Block::Field {
                label: "Cons".to_string(),
                value: self.text(&review.cons),
            })
            .push(Block::Meta(format!(
                "Model: {} | Persona: {}",
                self.text(&review.model),
                self.text(&review.persona)
            )));
        (fragment, RenderKind::Success)
    }

    pub fn batch(&self, result: &BatchResult) -> (Fragment, RenderKind) {
        let fragment = Fragment::new()
            .push(Block::Heading("✅ Generation Complete!".to_string()))
            .push(Block::Scores(vec![
                card("Success", result.success_count.to_string(), Some(true)),
                card(
                    "Skipped",
                    result.skipped_count.to_string(),
                    (result.skipped_count > 0).then_some(false),
                ),
            ]))
            .push(Block::Heading("Generated Files:".to_string()))
            .push(self.link("📄 Clean Reviews", &result.clean_path))
            .push(self.link("📄 Reviews with Models", &result.with_models_path))
            .push(self.link("📊 CSV Log", &result.csv_log))
            .push(Block::Meta(format!(
                "Timestamp: {}",
                self.text(&result.timestamp)
            )));
        (fragment, RenderKind::Success)
    }

    pub fn quality(&self, verdict: &QualityVerdict) -> (Fragment, RenderKind) {
        match verdict {
            QualityVerdict::Passed(scores) => (
                Fragment::new()
                    .push(Block::Heading("✅ Quality Check Passed!".to_string()))
                    .push(Block::Scores(score_cards(scores))),
                RenderKind::Success,
            ),
            QualityVerdict::Failed { metric, score } => (
                Fragment::new()
                    .push(Block::Heading("❌ Quality Check Failed".to_string()))
                    .push(Block::Field {
                        label: "Failed Metric".to_string(),
                        value: self.text(metric),
                    })
                    .push(Block::Field {
                        label: "Score".to_string(),
                        value: format_number(*score),
                    }),
                RenderKind::Error,
            ),
        }
    }

    pub fn report(&self, heading: &str, report: &ReportResponse) -> (Fragment, RenderKind) {
        let mut fragment = Fragment::new()
            .push(Block::Heading(format!("✅ {}", heading)))
            .push(self.link("📄 Download Report", &report.report_path));

        let used = [
            ("CSV used", &report.csv_used),
            ("Synthetic used", &report.synthetic_used),
            ("Real used", &report.real_used),
        ];
        for (label, value) in used {
            if let Some(value) = value {
                fragment = fragment.push(Block::Field {
                    label: label.to_string(),
                    value: self.text(value),
                });
            }
        }

        let fragment = fragment.push(Block::Preformatted(self.text(&report.report_text)));
        (fragment, RenderKind::Success)
    }

    pub fn file_listing(&self, listing: &FileListing) -> (Fragment, RenderKind) {
        let sections: [(&str, &[FileEntry]); 4] = [
            ("CSV Logs", &listing.csv_logs),
            ("Synthetic Reviews", &listing.synthetic_reviews),
            ("Reviews with Models", &listing.synthetic_with_models),
            ("Reports", &listing.reports),
        ];

        let mut fragment = Fragment::new().push(Block::Heading("📁 Generated Files".to_string()));
        for (title, entries) in sections {
            fragment = fragment.push(Block::Field {
                label: title.to_string(),
                value: entries.len().to_string(),
            });
            if entries.is_empty() {
                fragment = fragment.push(Block::Meta("  (none)".to_string()));
            }
            for entry in entries {
                let label = format!(
                    "{} ({}, {})",
                    self.text(&entry.name),
                    format_size(entry.size),
                    format_modified(entry.modified)
                );
                fragment = fragment.push(self.link(&label, &entry.path));
            }
        }
        (fragment, RenderKind::Info)
    }

    pub fn server_config(&self, config: &serde_json::Value) -> (Fragment, RenderKind) {
        let pretty = serde_json::to_string_pretty(config).unwrap_or_else(|_| config.to_string());
        (
            Fragment::new()
                .push(Block::Heading("⚙️ Server Configuration".to_string()))
                .push(Block::Preformatted(self.text(&pretty))),
            RenderKind::Info,
        )
    }
}

fn score_cards(scores: &QualityScores) -> Vec<ScoreCard> {
    let mut cards = vec![
        card("Length", format_number(scores.length), Some(true)),
        card("Diversity", format_ratio(scores.diversity), Some(true)),
    ];
    if let Some(semantic) = scores.semantic {
        cards.push(card("Semantic", format_ratio(semantic), Some(true)));
    }
    cards.extend([
        card("Bias", format_ratio(scores.bias), Some(true)),
        card("Realism", format_number(scores.realism), Some(true)),
        card("Persona", format_number(scores.persona), Some(true)),
    ]);
    cards
}
