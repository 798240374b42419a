// Busy-state tracking for actionable controls.
// A busy control is disabled and shows a processing label; its own label is restored afterwards.

use std::collections::BTreeMap;

use super::tabs::Tab;

pub const PROCESSING_LABEL: &str = "⏳ Processing...";
pub const DEFAULT_LABEL: &str = "Submit";

/// Every control that triggers a network action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlId {
    GenerateSingle,
    GenerateBad,
    GenerateBatch,
    CheckQuality,
    QualityReport,
    ComparisonReport,
    ListFiles,
    ShowConfig,
}

impl ControlId {
    pub const ALL: [ControlId; 8] = [
        ControlId::GenerateSingle,
        ControlId::GenerateBad,
        ControlId::GenerateBatch,
        ControlId::CheckQuality,
        ControlId::QualityReport,
        ControlId::ComparisonReport,
        ControlId::ListFiles,
        ControlId::ShowConfig,
    ];

    /// Label shown while idle.
    pub fn label(&self) -> &'static str {
        match self {
            ControlId::GenerateSingle => "✨ Generate One",
            ControlId::GenerateBad => "💥 Generate Bad One",
            ControlId::GenerateBatch => "🚀 Generate Batch",
            ControlId::CheckQuality => "🔍 Check Quality",
            ControlId::QualityReport => "📊 Quality Report",
            ControlId::ComparisonReport => "⚖️ Comparison Report",
            ControlId::ListFiles => "📁 List Files",
            ControlId::ShowConfig => "⚙️ Show Config",
        }
    }

    /// Tab the control lives on.
    pub fn tab(&self) -> Tab {
        match self {
            ControlId::GenerateSingle | ControlId::GenerateBad | ControlId::GenerateBatch => {
                Tab::Generate
            }
            ControlId::CheckQuality => Tab::Quality,
            ControlId::QualityReport | ControlId::ComparisonReport => Tab::Reports,
            ControlId::ListFiles | ControlId::ShowConfig => Tab::Server,
        }
    }
}

/// Display state of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub disabled: bool,
    saved_label: Option<String>,
}

impl ControlState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            saved_label: None,
        }
    }

    /// Enter or leave the busy state.
    ///
    /// Entering twice keeps the label captured the first time, so the
    /// processing text never overwrites it.
    #[must_use]
    pub fn set_busy(self, busy: bool) -> Self {
        if busy {
            let saved_label = self.saved_label.or(Some(self.label));
            Self {
                label: PROCESSING_LABEL.to_string(),
                disabled: true,
                saved_label,
            }
        } else {
            Self {
                label: self
                    .saved_label
                    .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
                disabled: false,
                saved_label: None,
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.disabled
    }
}

/// All controls, keyed by id.
#[derive(Debug, Clone)]
pub struct Controls {
    controls: BTreeMap<ControlId, ControlState>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            controls: ControlId::ALL
                .into_iter()
                .map(|id| (id, ControlState::new(id.label())))
                .collect(),
        }
    }
}

impl Controls {
    pub fn get(&self, id: ControlId) -> Option<&ControlState> {
        self.controls.get(&id)
    }

    pub fn is_busy(&self, id: ControlId) -> bool {
        self.controls.get(&id).is_some_and(ControlState::is_busy)
    }

    pub fn set_busy(&mut self, id: ControlId, busy: bool) {
        if let Some(state) = self.controls.remove(&id) {
            self.controls.insert(id, state.set_busy(busy));
        }
    }

    /// Mark a control busy unless it already is. Returns false if it was busy.
    pub fn try_acquire(&mut self, id: ControlId) -> bool {
        if self.is_busy(id) {
            return false;
        }
        self.set_busy(id, true);
        true
    }
}
