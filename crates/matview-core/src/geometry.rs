//! Video and container geometry.
//!
//! Geometry changes only on video load or container resize; everything here
//! is plain value math with no external state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{MatViewError, Result};

/// Pixel dimensions of the video and of the container it renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Geometry {
    pub video_width: u32,
    pub video_height: u32,
    pub container_width: u32,
    pub container_height: u32,
}

impl Geometry {
    /// Create a new geometry.
    #[inline]
    pub const fn new(
        video_width: u32,
        video_height: u32,
        container_width: u32,
        container_height: u32,
    ) -> Self {
        Self {
            video_width,
            video_height,
            container_width,
            container_height,
        }
    }

    /// Reject zero-sized dimensions before they reach the transform path.
    pub fn validate(&self) -> Result<()> {
        if self.video_width == 0
            || self.video_height == 0
            || self.container_width == 0
            || self.container_height == 0
        {
            return Err(MatViewError::InvalidGeometry(format!(
                "{}x{} video in {}x{} container",
                self.video_width, self.video_height, self.container_width, self.container_height
            )));
        }
        Ok(())
    }

    /// Contain-fit of the video inside the container: uniform scale plus a
    /// centering offset (letterbox or pillarbox).
    ///
    /// The geometry must be valid; a zero dimension produces a degenerate
    /// transform, so call [`validate`](Self::validate) first.
    pub fn fit(&self) -> FitTransform {
        let vw = self.video_width as f32;
        let vh = self.video_height as f32;
        let cw = self.container_width as f32;
        let ch = self.container_height as f32;

        let scale = (cw / vw).min(ch / vh);
        let offset = Vec2::new((cw - vw * scale) * 0.5, (ch - vh * scale) * 0.5);
        FitTransform {
            scale: Vec2::splat(scale),
            offset,
        }
    }
}

/// Scale and offset mapping video pixel space into the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Per-axis scale applied to video-space pixels.
    pub scale: Vec2,
    /// Container-space offset added after scaling.
    pub offset: Vec2,
}

impl FitTransform {
    /// Identity mapping (video space == container space).
    pub const IDENTITY: Self = Self {
        scale: Vec2::ONE,
        offset: Vec2::ZERO,
    };
}

impl Default for FitTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(Geometry::new(0, 480, 375, 211).validate().is_err());
        assert!(Geometry::new(640, 480, 375, 0).validate().is_err());
        assert!(Geometry::new(640, 480, 375, 211).validate().is_ok());
    }

    #[test]
    fn fit_letterboxes_wide_video() {
        // 1920x1080 video in a 400x400 container: width-limited,
        // scale = 400/1920, vertical bars top and bottom.
        let fit = Geometry::new(1920, 1080, 400, 400).fit();
        assert!((fit.scale.x - 400.0 / 1920.0).abs() < 1e-6);
        assert!((fit.offset.x - 0.0).abs() < 1e-6);
        let scaled_height = 1080.0 * fit.scale.y;
        assert!((fit.offset.y - (400.0 - scaled_height) * 0.5).abs() < 1e-4);
    }

    #[test]
    fn fit_pillarboxes_tall_video() {
        // Portrait phone footage in a landscape container.
        let fit = Geometry::new(1080, 1920, 800, 450).fit();
        assert!((fit.scale.y - 450.0 / 1920.0).abs() < 1e-6);
        assert!((fit.offset.y - 0.0).abs() < 1e-6);
        assert!(fit.offset.x > 0.0);
    }

    #[test]
    fn exact_fit_is_identity_offset() {
        let fit = Geometry::new(640, 480, 640, 480).fit();
        assert_eq!(fit.scale, Vec2::ONE);
        assert_eq!(fit.offset, Vec2::ZERO);
    }
}
