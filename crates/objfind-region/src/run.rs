//! Horizontal runs
//!
//! A run is a maximal horizontal segment of equal-valued pixels on one row.
//! Rows are scanned left to right; the runs of a row tile it exactly.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Bit set of run markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunFlags(u8);

impl RunFlags {
    /// No flags set
    pub const NONE: Self = Self(0);
    /// The run has no same-colored overlapping run on the row above
    pub const TOP: Self = Self(1);
    /// The run is the last run of its object in raster order
    pub const BOTTOM: Self = Self(2);
    /// The run has been assigned a group
    pub const GROUPED: Self = Self(4);

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every flag of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no flag is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RunFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RunFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for RunFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for RunFlags {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Debug for RunFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::TOP) {
            names.push("TOP");
        }
        if self.contains(Self::BOTTOM) {
            names.push("BOTTOM");
        }
        if self.contains(Self::GROUPED) {
            names.push("GROUPED");
        }
        write!(f, "RunFlags({})", names.join(" | "))
    }
}

/// A horizontal run `[start, end)` on `row`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Row index
    pub row: i32,
    /// First column
    pub start: i32,
    /// One past the last column
    pub end: i32,
    /// Markers
    pub flags: RunFlags,
}

impl Run {
    /// Create a run without flags.
    pub const fn new(row: i32, start: i32, end: i32) -> Self {
        Self {
            row,
            start,
            end,
            flags: RunFlags::NONE,
        }
    }

    /// Number of pixels covered; 0 when `end <= start`.
    #[inline]
    pub fn len(&self) -> u64 {
        if self.end > self.start {
            (self.end as i64 - self.start as i64) as u64
        } else {
            0
        }
    }

    /// Check whether the run covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether two runs share at least one column.
    ///
    /// Touching runs (`a.end == b.start`) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Run) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

/// Split one row of pixel values into maximal same-value runs.
///
/// The runs are returned left to right with their value and tile the row:
/// the first starts at 0, each starts where the previous ended, and the last
/// ends at `row_pixels.len()`. An empty row yields no runs.
///
/// ```
/// use objfind_region::extract_row_runs;
///
/// let runs = extract_row_runs(&[3, 3, 0, 0, 0, 3], 7);
/// let spans: Vec<_> = runs.iter().map(|(r, c)| (r.start, r.end, *c)).collect();
/// assert_eq!(spans, vec![(0, 2, 3), (2, 5, 0), (5, 6, 3)]);
/// assert!(runs.iter().all(|(r, _)| r.row == 7));
/// ```
pub fn extract_row_runs(row_pixels: &[u8], row: i32) -> Vec<(Run, u8)> {
    let mut runs = Vec::new();
    let Some(&first) = row_pixels.first() else {
        return runs;
    };

    let mut start = 0usize;
    let mut color = first;
    for (x, &v) in row_pixels.iter().enumerate().skip(1) {
        if v != color {
            runs.push((Run::new(row, start as i32, x as i32), color));
            start = x;
            color = v;
        }
    }
    runs.push((Run::new(row, start as i32, row_pixels.len() as i32), color));
    runs
}
