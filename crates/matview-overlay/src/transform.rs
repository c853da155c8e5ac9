//! Normalized→screen coordinate projection.
//!
//! Projection itself is a pure function; [`CoordinateTransformer`] wraps it
//! in a short-TTL memo cache so repeated calls with identical landmarks and
//! geometry within one consumer tick reuse the cached array. Cache keys are
//! a bit-exact serialization of every argument — any change is a miss.

use glam::Vec2;
use matview_core::{FitTransform, Geometry, Landmark};
use matview_rt::{CacheStats, TtlCache};
use std::sync::Arc;
use std::time::Duration;

/// Memoized projections live for one consumer tick at ~30 Hz.
const TRANSFORM_TTL: Duration = Duration::from_millis(33);

/// Distinct (landmarks, geometry, fit) combinations kept warm at once.
const CACHE_CAPACITY: usize = 32;

/// A landmark projected into container (screen) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLandmark {
    /// Pixel position within the rendering container.
    pub screen: Vec2,
    /// Depth carried through from the source landmark.
    pub z: f32,
    /// Detector confidence carried through from the source landmark.
    pub confidence: f32,
}

/// Project normalized landmarks into screen space.
///
/// `screen.x = x * video_width * scale.x + offset.x`, and likewise for `y`
/// against `video_height`.
pub fn project(
    landmarks: &[Landmark],
    geometry: &Geometry,
    fit: &FitTransform,
) -> Vec<ScreenLandmark> {
    let video = Vec2::new(geometry.video_width as f32, geometry.video_height as f32);
    landmarks
        .iter()
        .map(|lm| ScreenLandmark {
            screen: Vec2::new(lm.x, lm.y) * video * fit.scale + fit.offset,
            z: lm.z,
            confidence: lm.confidence,
        })
        .collect()
}

/// Cache key: bit patterns of every projection argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TransformKey {
    landmarks: Vec<[u32; 4]>,
    geometry: Geometry,
    fit: [u32; 4],
}

impl TransformKey {
    fn new(landmarks: &[Landmark], geometry: &Geometry, fit: &FitTransform) -> Self {
        Self {
            landmarks: landmarks
                .iter()
                .map(|lm| {
                    [
                        lm.x.to_bits(),
                        lm.y.to_bits(),
                        lm.z.to_bits(),
                        lm.confidence.to_bits(),
                    ]
                })
                .collect(),
            geometry: *geometry,
            fit: [
                fit.scale.x.to_bits(),
                fit.scale.y.to_bits(),
                fit.offset.x.to_bits(),
                fit.offset.y.to_bits(),
            ],
        }
    }
}

/// Memoizing wrapper around [`project`].
pub struct CoordinateTransformer {
    cache: TtlCache<TransformKey, Arc<Vec<ScreenLandmark>>>,
    ttl: Duration,
}

impl CoordinateTransformer {
    /// Create a transformer with the default TTL and capacity.
    pub fn new() -> Self {
        Self::with_ttl(TRANSFORM_TTL, CACHE_CAPACITY)
    }

    /// Create a transformer with an explicit TTL and capacity.
    pub fn with_ttl(ttl: Duration, capacity: usize) -> Self {
        Self {
            cache: TtlCache::new(capacity),
            ttl,
        }
    }

    /// Project `landmarks` into screen space, reusing a cached result when
    /// every argument matches a recent call.
    ///
    /// Empty input returns an empty array without touching the cache.
    pub fn transform(
        &mut self,
        now: Duration,
        landmarks: &[Landmark],
        geometry: &Geometry,
        fit: &FitTransform,
    ) -> Arc<Vec<ScreenLandmark>> {
        if landmarks.is_empty() {
            return Arc::new(Vec::new());
        }

        let key = TransformKey::new(landmarks, geometry, fit);
        if let Some(hit) = self.cache.get(&key, now) {
            return hit;
        }

        let projected = Arc::new(project(landmarks, geometry, fit));
        self.cache.insert(key, projected.clone(), self.ttl, now);
        projected
    }

    /// Remove expired projections. Returns the number removed.
    pub fn sweep(&mut self, now: Duration) -> usize {
        self.cache.sweep(now)
    }

    /// Drop all cached projections.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Cache occupancy for the diagnostics surface.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for CoordinateTransformer {
    fn default() -> Self {
        Self::new()
    }
}
