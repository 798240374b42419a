// Server health indicator.

use crate::api::HealthResponse;
use crate::error::Result;

pub const HEALTHY_STATUS: &str = "healthy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Checking,
    Ready,
    Error,
}

impl HealthStatus {
    /// Map a probe result to an indicator state.
    pub fn from_probe(result: &Result<HealthResponse>) -> Self {
        match result {
            Ok(response) if response.status == HEALTHY_STATUS => HealthStatus::Ready,
            _ => HealthStatus::Error,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            HealthStatus::Checking => "Checking...",
            HealthStatus::Ready => "Ready",
            HealthStatus::Error => "Error",
        }
    }
}
