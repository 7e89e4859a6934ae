//! Terrain sampling boundary for obstacle detection.

/// Host-provided terrain height sampling.
///
/// The grid core never touches engine geometry directly; the host
/// implements this trait (typically as a downward ray cast against the
/// landscape) and the obstacle fill drives it corner by corner.
pub trait TerrainProbe {
    /// Terrain height at world-space `(x, y)`, or `None` when nothing was
    /// hit within the probe range (a hole in the landscape, or the edge of
    /// the map).
    fn height_at(&self, x: f64, y: f64) -> Option<f64>;
}

impl<F> TerrainProbe for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn height_at(&self, x: f64, y: f64) -> Option<f64> {
        self(x, y)
    }
}

/// Tuning for terrain-derived obstacle detection.
#[derive(Clone, Copy, Debug)]
pub struct ObstacleConfig {
    /// A cell becomes an obstacle when the mean of its four corner heights
    /// exceeds any single corner by more than this, in world units.
    pub height_deviation_threshold: f64,
    /// Half-length of the height probe. A missed probe reports the
    /// sentinel height `-probe_half_length`, far below any real terrain,
    /// which makes the deviation test flag every cell touching the miss.
    pub probe_half_length: f64,
}

impl ObstacleConfig {
    /// The sentinel height substituted for a missed probe.
    pub fn miss_height(&self) -> f64 {
        -self.probe_half_length
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            height_deviation_threshold: 30.0,
            probe_half_length: 90_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_implement_probe() {
        let probe = |x: f64, _y: f64| if x < 0.0 { None } else { Some(x) };
        assert_eq!(probe.height_at(5.0, 0.0), Some(5.0));
        assert_eq!(probe.height_at(-1.0, 0.0), None);
    }

    #[test]
    fn miss_height_is_far_below_threshold() {
        let config = ObstacleConfig::default();
        assert!(config.miss_height() < -config.height_deviation_threshold * 100.0);
    }
}
