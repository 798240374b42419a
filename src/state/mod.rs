// View state module.
// Tabs, control busy flags, result regions, forms, and the health indicator.

pub mod busy;
pub mod forms;
pub mod health;
pub mod regions;
pub mod tabs;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

pub use busy::{ControlId, Controls};
pub use forms::{FieldId, Focusable, Forms};
pub use health::HealthStatus;
pub use regions::{Block, Fragment, Region, RegionId, Regions, RenderKind, ScoreCard};
pub use tabs::{Tab, TabBar};

/// Status line message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Most recent status line message.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Everything the UI draws.
#[derive(Debug, Default)]
pub struct ViewState {
    pub tabs: TabBar,
    pub controls: Controls,
    pub regions: Regions,
    pub forms: Forms,
    pub health: HealthStatus,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    /// Strip control characters from server text before display.
    pub sanitize_server_text: bool,
}

impl ViewState {
    pub fn new(initial_tab: Tab, sanitize_server_text: bool) -> Self {
        Self {
            tabs: TabBar::new(initial_tab),
            sanitize_server_text,
            ..Self::default()
        }
    }
}

/// View state shared between the draw loop and action tasks.
pub type SharedState = Arc<Mutex<ViewState>>;

pub fn shared(state: ViewState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Lock the view state, recovering from a poisoned lock.
///
/// A task that panicked mid-update leaves at worst a stale region, which is
/// still safe to draw.
pub fn lock(state: &SharedState) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
