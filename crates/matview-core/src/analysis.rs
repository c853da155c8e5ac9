//! Analysis result storage — sidecar JSON files per video asset.
//!
//! Persists the pose samples and movement phases produced by the external
//! analyzer as JSON files in a `.matview/analysis/` directory:
//!
//! ```text
//! project/
//!   .matview/
//!     analysis/
//!       {asset-id}.json    # samples, phases, source metadata
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{MatViewError, Result};
use crate::phase::MovementPhase;
use crate::pose::PoseSample;
use crate::time::FrameRate;

/// Complete pose analysis for a single video asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoAnalysis {
    /// Asset identifier (stable across re-analysis).
    pub asset_id: String,
    /// Source filename.
    pub filename: String,
    /// Source duration in milliseconds.
    pub duration_ms: i64,
    /// Source frame rate, used for frame-step and phase conversion.
    pub frame_rate: FrameRate,
    /// Natural video width in pixels.
    pub width: u32,
    /// Natural video height in pixels.
    pub height: u32,
    /// Timestamped pose samples, in analyzer output order.
    pub samples: Vec<PoseSample>,
    /// Movement phases labelled over the source frames.
    pub phases: Vec<MovementPhase>,
}

impl VideoAnalysis {
    /// Parse an analysis from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| {
            MatViewError::Serialization(format!("failed to deserialize analysis: {e}"))
        })
    }

    /// Load an analysis directly from a JSON file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_json(&data)
    }
}

/// Manages analysis sidecar storage for a project directory.
pub struct AnalysisStore {
    analysis_dir: PathBuf,
}

impl AnalysisStore {
    /// Create a new analysis store for the given project directory.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            analysis_dir: project_dir.join(".matview").join("analysis"),
        }
    }

    /// Ensure the analysis directory exists.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.analysis_dir)?;
        Ok(())
    }

    /// Save analysis results for an asset.
    pub fn save(&self, analysis: &VideoAnalysis) -> Result<()> {
        self.ensure_dir()?;

        let json_path = self.json_path(&analysis.asset_id);
        let json = serde_json::to_string_pretty(analysis).map_err(|e| {
            MatViewError::Serialization(format!("failed to serialize analysis: {e}"))
        })?;
        std::fs::write(&json_path, json)?;

        info!(
            asset = %analysis.asset_id,
            samples = analysis.samples.len(),
            phases = analysis.phases.len(),
            "Saved analysis sidecar"
        );
        Ok(())
    }

    /// Load analysis results for an asset.
    pub fn load(&self, asset_id: &str) -> Result<VideoAnalysis> {
        let json_path = self.json_path(asset_id);
        if !json_path.exists() {
            return Err(MatViewError::InvalidParameter(format!(
                "no analysis for asset: {asset_id}"
            )));
        }

        let data = std::fs::read(&json_path)?;
        VideoAnalysis::from_json(&data)
    }

    /// Check if analysis exists for an asset.
    pub fn has_analysis(&self, asset_id: &str) -> bool {
        self.json_path(asset_id).exists()
    }

    /// Delete analysis for an asset.
    pub fn delete(&self, asset_id: &str) -> Result<()> {
        let json_path = self.json_path(asset_id);
        if json_path.exists() {
            std::fs::remove_file(&json_path)?;
        }
        Ok(())
    }

    /// Path to the JSON sidecar for an asset.
    pub fn json_path(&self, asset_id: &str) -> PathBuf {
        self.analysis_dir.join(format!("{asset_id}.json"))
    }
}
