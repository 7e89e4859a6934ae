//! Spatial index geometry and its validation.

use std::error::Error;
use std::fmt;

/// Validated geometry of a [`SpatialIndex`](crate::SpatialIndex).
///
/// Three nested extents, all in index-local cells with origin `(0, 0)`:
/// the index itself, the query buckets, and the lock cells striping the
/// buckets. Each lock cell must cover a whole number of buckets and the
/// index a whole number of lock cells, so every bucket belongs to exactly
/// one lock cell and guarding a rectangle's lock cells guards all of its
/// buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexConfig {
    width: u32,
    height: u32,
    bucket_width: u32,
    bucket_height: u32,
    lock_width: u32,
    lock_height: u32,
}

impl IndexConfig {
    /// Validate an index geometry.
    ///
    /// `size`, `bucket` and `lock_cell` are `(width, height)` extents in
    /// cells. All extents must be non-zero, each lock cell extent must be
    /// a multiple of the bucket extent on the same axis, and the index
    /// extent a multiple of the lock cell extent.
    pub fn new(
        size: (u32, u32),
        bucket: (u32, u32),
        lock_cell: (u32, u32),
    ) -> Result<Self, IndexConfigError> {
        for (name, (w, h)) in [("index", size), ("bucket", bucket), ("lock cell", lock_cell)] {
            if w == 0 || h == 0 {
                return Err(IndexConfigError::ZeroExtent {
                    what: name,
                    extent: (w, h),
                });
            }
        }
        if lock_cell.0 % bucket.0 != 0 || lock_cell.1 % bucket.1 != 0 {
            return Err(IndexConfigError::Misaligned {
                outer: "lock cell",
                outer_extent: lock_cell,
                inner: "bucket",
                inner_extent: bucket,
            });
        }
        if size.0 % lock_cell.0 != 0 || size.1 % lock_cell.1 != 0 {
            return Err(IndexConfigError::Misaligned {
                outer: "index",
                outer_extent: size,
                inner: "lock cell",
                inner_extent: lock_cell,
            });
        }
        Ok(Self {
            width: size.0,
            height: size.1,
            bucket_width: bucket.0,
            bucket_height: bucket.1,
            lock_width: lock_cell.0,
            lock_height: lock_cell.1,
        })
    }

    /// Index width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Index height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bucket extent in cells.
    pub fn bucket(&self) -> (u32, u32) {
        (self.bucket_width, self.bucket_height)
    }

    /// Lock cell extent in cells.
    pub fn lock_cell(&self) -> (u32, u32) {
        (self.lock_width, self.lock_height)
    }

    /// Lock cell grid extent, in lock cells.
    pub(crate) fn lock_grid(&self) -> (u32, u32) {
        (self.width / self.lock_width, self.height / self.lock_height)
    }

    /// Buckets per lock cell, per axis.
    pub(crate) fn buckets_per_lock(&self) -> (u32, u32) {
        (
            self.lock_width / self.bucket_width,
            self.lock_height / self.bucket_height,
        )
    }
}

/// Why an index geometry was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexConfigError {
    /// An extent was zero on at least one axis.
    ZeroExtent {
        /// Which extent.
        what: &'static str,
        /// The offending `(width, height)`.
        extent: (u32, u32),
    },
    /// An outer extent is not a whole multiple of the inner extent.
    Misaligned {
        /// The containing unit.
        outer: &'static str,
        /// Its `(width, height)`.
        outer_extent: (u32, u32),
        /// The contained unit.
        inner: &'static str,
        /// Its `(width, height)`.
        inner_extent: (u32, u32),
    },
}

impl fmt::Display for IndexConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexConfigError::ZeroExtent { what, extent } => {
                write!(f, "{what} extent {}x{} must be non-zero", extent.0, extent.1)
            }
            IndexConfigError::Misaligned {
                outer,
                outer_extent,
                inner,
                inner_extent,
            } => write!(
                f,
                "{outer} extent {}x{} must be a whole multiple of {inner} extent {}x{}",
                outer_extent.0, outer_extent.1, inner_extent.0, inner_extent.1
            ),
        }
    }
}

impl Error for IndexConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_geometry_validates() {
        let config = IndexConfig::new((1024, 1024), (16, 16), (64, 64)).unwrap();
        assert_eq!(config.lock_grid(), (16, 16));
        assert_eq!(config.buckets_per_lock(), (4, 4));
    }

    #[test]
    fn zero_extents_are_rejected() {
        let err = IndexConfig::new((0, 64), (16, 16), (64, 64)).unwrap_err();
        assert!(matches!(err, IndexConfigError::ZeroExtent { what: "index", .. }));
    }

    #[test]
    fn lock_cell_must_cover_whole_buckets() {
        let err = IndexConfig::new((1024, 1024), (16, 16), (40, 64)).unwrap_err();
        assert!(matches!(
            err,
            IndexConfigError::Misaligned {
                outer: "lock cell",
                ..
            }
        ));
    }

    #[test]
    fn index_must_cover_whole_lock_cells() {
        let err = IndexConfig::new((1000, 1024), (16, 16), (64, 64)).unwrap_err();
        assert!(matches!(err, IndexConfigError::Misaligned { outer: "index", .. }));
    }

    #[test]
    fn anisotropic_extents_are_allowed() {
        let config = IndexConfig::new((128, 256), (8, 16), (32, 64)).unwrap();
        assert_eq!(config.bucket(), (8, 16));
        assert_eq!(config.lock_cell(), (32, 64));
    }
}
