use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Tree search used by the iterative-deepening driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    AlphaBeta,
    Minimax,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub algorithm: Algorithm,
    /// Share of the time budget spent searching.
    pub deadline_fraction: f64,
    /// Multiplier applied to the blocked-threat count.
    pub threat_weight: i32,
    /// Stop deepening after this many plies even if time remains.
    pub max_depth: Option<u32>,
    pub quiescence: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            deadline_fraction: 0.85,
            threat_weight: 100,
            max_depth: None,
            quiescence: true,
        }
    }
}

impl SearchParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: SearchParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.deadline_fraction > 0.0 && self.deadline_fraction <= 1.0) {
            return Err(Error::InvalidParams(format!(
                "deadline_fraction must be in (0, 1], got {}",
                self.deadline_fraction
            )));
        }
        if self.threat_weight < 0 {
            return Err(Error::InvalidParams(format!("threat_weight must be >= 0, got {}", self.threat_weight)));
        }
        if self.max_depth == Some(0) {
            return Err(Error::InvalidParams("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
