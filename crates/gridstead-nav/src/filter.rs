//! Search tuning parameters.

use gridstead_core::CellPoint;

/// Weight put on the preferred leading axis of an interactive preview.
///
/// Barely above one: enough to order otherwise equal-length L-shaped
/// routes, far too small to make the search skip a genuinely shorter
/// detour.
const LEADING_AXIS_WEIGHT: f64 = 1.00001;

/// Parameters shaping one A* invocation.
#[derive(Clone, Copy, Debug)]
pub struct NavFilter {
    /// Global multiplier applied to the heuristic.
    pub heuristic_scale: f64,
    /// Per-axis multipliers on the Manhattan heuristic terms `(x, y)`.
    ///
    /// Weighting one axis slightly above the other makes the search clear
    /// that axis first, which pins down which of the many equal-length
    /// staircase routes gets returned. Values above one make the
    /// heuristic inadmissible by the same sliver; that trade is
    /// deliberate, determinism matters more here than a one-in-100k cost
    /// ratio.
    pub axiswise_scale: (f64, f64),
    /// Hard cap on distinct cells the search may touch before giving up.
    pub max_search_nodes: u32,
}

impl NavFilter {
    /// A filter that lays the first leg of an L-shaped route along the X
    /// axis when `along_x`, along Y otherwise.
    pub fn prefer_leading_axis(along_x: bool) -> Self {
        let axiswise_scale = if along_x {
            (LEADING_AXIS_WEIGHT, 1.0)
        } else {
            (1.0, LEADING_AXIS_WEIGHT)
        };
        Self {
            heuristic_scale: LEADING_AXIS_WEIGHT,
            axiswise_scale,
            ..Self::default()
        }
    }

    /// The axis-weighted Manhattan estimate between two cells, before the
    /// global scale.
    pub fn heuristic(&self, from: CellPoint, to: CellPoint) -> f64 {
        let x_part = f64::from(from.x.abs_diff(to.x)) * self.axiswise_scale.0;
        let y_part = f64::from(from.y.abs_diff(to.y)) * self.axiswise_scale.1;
        x_part + y_part
    }
}

impl Default for NavFilter {
    fn default() -> Self {
        Self {
            heuristic_scale: 1.0,
            axiswise_scale: (1.0, 1.0),
            max_search_nodes: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_heuristic_is_plain_manhattan() {
        let filter = NavFilter::default();
        let h = filter.heuristic(CellPoint::new(-2, 3), CellPoint::new(1, -1));
        assert_eq!(h, 7.0);
    }

    #[test]
    fn leading_axis_weight_is_barely_inadmissible() {
        let filter = NavFilter::prefer_leading_axis(true);
        let h = filter.heuristic(CellPoint::new(0, 0), CellPoint::new(10, 10));
        assert!(h > 20.0);
        assert!(h < 20.01);
    }
}
