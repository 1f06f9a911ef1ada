use super::Point;

/// Bounding box of a control in logical pixels (top-left origin).
///
/// Field names follow what a layout pass reports for an element's client
/// rectangle: `left`/`top` position and `width`/`height` extent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (left, width) = if self.width < 0.0 {
            (self.left + self.width, -self.width)
        } else {
            (self.left, self.width)
        };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Rect::new(left, top, width, height)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.left && p.y >= r.top && p.x < r.right() && p.y < r.bottom()
    }

    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(left: f64, top: f64, w: f64, h: f64) -> Rect { Rect::new(left, top, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 232.0, 32.0).contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 232.0, 32.0).contains(Point::new(232.0, 32.0)));
    }

    #[test]
    fn contains_outside() {
        let rect = r(10.0, 10.0, 20.0, 20.0);
        assert!(!rect.contains(Point::new(5.0, 15.0)));
        assert!(!rect.contains(Point::new(15.0, 31.0)));
    }

    #[test]
    fn center_and_edges() {
        let rect = r(10.0, 20.0, 200.0, 32.0);
        assert_eq!(rect.right(), 210.0);
        assert_eq!(rect.bottom(), 52.0);
        assert_eq!(rect.center(), Point::new(110.0, 36.0));
    }

    #[test]
    fn empty_when_any_extent_is_zero() {
        assert!(r(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
