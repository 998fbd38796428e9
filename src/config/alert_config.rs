use serde::Deserialize;

use crate::alerts::{AlertQueue, IgnoreMarkers};
use crate::errors::ConfigError;

/// Configuration for the alert channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertConfig {
    /// Channel name attached to delivered alerts
    pub channel: Option<String>,
    pub ignore_start: Option<String>,
    pub ignore_end: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PartialAlertConfig {
    pub channel: Option<String>,
    pub ignore_start: Option<String>,
    pub ignore_end: Option<String>,
}

impl AlertConfig {
    pub fn from_partial(partial: Option<PartialAlertConfig>) -> Self {
        let partial = partial.unwrap_or_default();
        Self {
            channel: partial.channel,
            ignore_start: partial.ignore_start,
            ignore_end: partial.ignore_end,
        }
    }

    /// Markers are either both set or both absent; validated beforehand.
    pub fn markers(&self) -> Option<IgnoreMarkers> {
        match (&self.ignore_start, &self.ignore_end) {
            (Some(start), Some(end)) => Some(IgnoreMarkers {
                start: start.clone(),
                end: end.clone(),
            }),
            _ => None,
        }
    }

    pub fn queue(&self) -> AlertQueue {
        match self.markers() {
            Some(markers) => AlertQueue::with_markers(markers),
            None => AlertQueue::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.ignore_start, &self.ignore_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if start.is_empty() || end.is_empty() {
                    Err(ConfigError::InvalidMarkers("markers must not be empty".to_string()))
                } else if start == end {
                    Err(ConfigError::InvalidMarkers(
                        "start and end markers must differ".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Err(ConfigError::InvalidMarkers(
                "ignore_start and ignore_end must be set together".to_string(),
            )),
        }
    }
}
