//! Box - Rectangle regions
//!
//! A `Box` is the bounding rectangle of an extracted object.

/// A rectangle region
///
/// `x`/`y` are the top-left corner, `w`/`h` the extent; the right and
/// bottom edges are exclusive. Extent fields may be negative while an
/// object's bound is still being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a box from its corner and extent
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_edges() {
        let b = Box::new_unchecked(10, 20, 30, 40);
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert_eq!(b.area(), 1200);
    }

    #[test]
    fn test_accumulator_sentinel_edges() {
        // The sentinel used while building object bounds has both
        // exclusive edges at zero.
        let b = Box::new_unchecked(i32::MAX, i32::MAX, -i32::MAX, -i32::MAX);
        assert_eq!((b.right(), b.bottom()), (0, 0));
    }
}
