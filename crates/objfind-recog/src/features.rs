//! Geometric features
//!
//! A [`Feature`] maps one object of a sorted object list to a number. Some
//! features look only at the object itself, others compare it against every
//! other object of the list.

use objfind_region::Object;

/// A scalar description of one object within its object list
pub trait Feature {
    /// Short column name
    fn name(&self) -> &'static str;

    /// Value for `objs[subject]`.
    ///
    /// # Panics
    ///
    /// Panics if `subject >= objs.len()`.
    fn describe(&self, objs: &[Object], subject: usize) -> f64;
}

/// Bound height over bound width
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectRatio;

impl Feature for AspectRatio {
    fn name(&self) -> &'static str {
        "AspectRatio"
    }

    fn describe(&self, objs: &[Object], subject: usize) -> f64 {
        let b = objs[subject].bound;
        b.h as f64 / b.w as f64
    }
}

/// How well the top edge lines up with similarly sized objects
#[derive(Debug, Clone, Copy, Default)]
pub struct TopPosition;

impl Feature for TopPosition {
    fn name(&self) -> &'static str {
        "TopPosition"
    }

    fn describe(&self, objs: &[Object], subject: usize) -> f64 {
        score_position(objs, subject, Edge::Top)
    }
}

/// How well the bottom edge lines up with similarly sized objects
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomPosition;

impl Feature for BottomPosition {
    fn name(&self) -> &'static str {
        "BottomPosition"
    }

    fn describe(&self, objs: &[Object], subject: usize) -> f64 {
        score_position(objs, subject, Edge::Bottom)
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Top,
    Bottom,
}

/// Sum over the other objects of `exp(-size_diff * pos_diff)`, divided by
/// the number of objects (subject included).
///
/// `size_diff = |dw * dh / (w * h)|` and `pos_diff = |d_edge| / h`, with
/// `w`, `h` the subject's bound size and `dw`, `dh`, `d_edge` the
/// differences to the other object's bound.
fn score_position(objs: &[Object], subject: usize, edge: Edge) -> f64 {
    let b = objs[subject].bound;
    let scale = b.w as f64 * b.h as f64;
    let edge_of = |bx: &objfind_core::Box| match edge {
        Edge::Top => bx.y as f64,
        Edge::Bottom => bx.bottom() as f64,
    };

    let tally: f64 = objs
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != subject)
        .map(|(_, other)| {
            let o = other.bound;
            let wd = (b.w - o.w) as f64;
            let hd = (b.h - o.h) as f64;
            let size_diff = (wd * hd / scale).abs();
            let pos_diff = (edge_of(&b) - edge_of(&o)).abs() / b.h as f64;
            (-size_diff * pos_diff).exp()
        })
        .sum();
    tally / objs.len() as f64
}

/// The features emitted for every object by default.
pub fn default_features() -> Vec<Box<dyn Feature>> {
    vec![
        Box::new(AspectRatio),
        Box::new(TopPosition),
        Box::new(BottomPosition),
    ]
}

/// Evaluate `features` for every object; one row per object.
pub fn describe_objects(
    features: &[Box<dyn Feature>],
    objs: &[Object],
) -> Vec<Vec<f64>> {
    (0..objs.len())
        .map(|i| features.iter().map(|f| f.describe(objs, i)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use objfind_core::Box;

    fn object(x: i32, y: i32, w: i32, h: i32) -> Object {
        let mut obj = Object::new(1);
        for row in y..y + h {
            obj.push_run(objfind_region::Run::new(row, x, x + w));
        }
        obj
    }

    #[test]
    fn test_aspect_ratio() {
        let objs = vec![object(0, 0, 2, 6)];
        assert_eq!(objs[0].bound, Box::new_unchecked(0, 0, 2, 6));
        assert!((AspectRatio.describe(&objs, 0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_object_scores_zero() {
        let objs = vec![object(0, 0, 3, 3)];
        assert_eq!(TopPosition.describe(&objs, 0), 0.0);
        assert_eq!(BottomPosition.describe(&objs, 0), 0.0);
    }

    #[test]
    fn test_aligned_tops() {
        // Same top, different sizes and bottoms.
        let objs = vec![object(0, 2, 4, 4), object(10, 2, 2, 8)];
        // Tops coincide, so each other object contributes exp(0) = 1.
        assert!((TopPosition.describe(&objs, 0) - 0.5).abs() < 1e-12);
        // Bottoms differ by 4.
        let size_diff = ((4.0 - 2.0) * (4.0 - 8.0) / 16.0f64).abs();
        let pos_diff = 4.0 / 4.0;
        let expected = (-size_diff * pos_diff).exp() / 2.0;
        assert!((BottomPosition.describe(&objs, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_same_size_always_aligned() {
        // Equal sizes make size_diff zero regardless of position.
        let objs = vec![object(0, 0, 3, 3), object(5, 9, 3, 3), object(9, 1, 3, 3)];
        let expected = 2.0 / 3.0;
        assert!((TopPosition.describe(&objs, 1) - expected).abs() < 1e-12);
        assert!((BottomPosition.describe(&objs, 2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_describe_objects_shape() {
        let objs = vec![object(0, 0, 1, 2), object(3, 0, 2, 2)];
        let features = default_features();
        let names: Vec<_> = features.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["AspectRatio", "TopPosition", "BottomPosition"]);
        let rows = describe_objects(&features, &objs);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert!((rows[0][0] - 2.0).abs() < 1e-12);
        assert!((rows[1][0] - 1.0).abs() < 1e-12);
    }
}
