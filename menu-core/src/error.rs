//! Stage-tagged errors for a single pipeline run.

use std::fmt;

use thiserror::Error;

/// The pipeline step an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Config,
    Weather,
    Recommend,
    Publish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Weather => "weather",
            Stage::Recommend => "recommend",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Missing configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Failed to fetch weather page: {0}")]
    Network(String),

    #[error("Could not extract {field} from weather page (selector matched no text)")]
    Extraction { field: &'static str },

    #[error("Menu generation failed: {0}")]
    Generation(String),

    /// `status` is `None` when the request never got a response.
    #[error("GitHub issue creation failed{}: {message}", status_suffix(.status))]
    Publish { status: Option<u16>, message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::MissingConfig(_) => Stage::Config,
            Self::Network(_) | Self::Extraction { .. } => Stage::Weather,
            Self::Generation(_) => Stage::Recommend,
            Self::Publish { .. } => Stage::Publish,
        }
    }
}
