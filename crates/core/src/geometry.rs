//! Axis-aligned rectangle operations.
//!
//! Provides:
//! - `Rect` corner tuples and the `HasBBox` trait
//! - Intersection and enclosing-envelope areas
//! - The similarity score used to pair bounding boxes across contributors
//!
//! The similarity score is intersection over the *enclosing envelope* of both
//! rectangles, not intersection over the true union area. Acceptance
//! thresholds downstream are tuned against this exact formula.

/// A rectangle defined by its corners (x0, y0, x1, y1) with x0 <= x1, y0 <= y1.
pub type Rect = (f64, f64, f64, f64);

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}

/// Calculate area of a bounding box
pub fn bbox_area(bbox: Rect) -> f64 {
    let w = bbox.2 - bbox.0;
    let h = bbox.3 - bbox.1;
    w * h
}

/// Calculate the enclosing envelope of two bounding boxes
pub const fn bbox_union(a: Rect, b: Rect) -> Rect {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}

/// Area of the overlap of two rectangles, `0` if they are disjoint or only touch.
pub fn intersection_area<A: HasBBox + ?Sized, B: HasBBox + ?Sized>(a: &A, b: &B) -> f64 {
    let w = (a.x1().min(b.x1()) - a.x0().max(b.x0())).max(0.0);
    let h = (a.y1().min(b.y1()) - a.y0().max(b.y0())).max(0.0);
    w * h
}

/// Area of the smallest axis-aligned rectangle containing both `a` and `b`.
///
/// This is the envelope area, which exceeds the true union area whenever the
/// two rectangles are not aligned.
pub fn enclosing_area<A: HasBBox + ?Sized, B: HasBBox + ?Sized>(a: &A, b: &B) -> f64 {
    bbox_area(bbox_union(a.bbox(), b.bbox()))
}

/// Intersection over enclosing envelope, in `[0, 1]`.
///
/// Returns `0` when the envelope has zero area (both rectangles degenerate)
/// and whenever an intermediate overflows, so neither `NaN` nor infinity
/// ever leaves this function.
pub fn similarity<A: HasBBox + ?Sized, B: HasBBox + ?Sized>(a: &A, b: &B) -> f64 {
    let enclosing = enclosing_area(a, b);
    if !(enclosing.is_finite() && enclosing > 0.0) {
        return 0.0;
    }
    let score = intersection_area(a, b) / enclosing;
    if score.is_finite() { score } else { 0.0 }
}

impl HasBBox for Rect {
    fn x0(&self) -> f64 {
        self.0
    }

    fn y0(&self) -> f64 {
        self.1
    }

    fn x1(&self) -> f64 {
        self.2
    }

    fn y1(&self) -> f64 {
        self.3
    }
}
