use serde_derive::{Deserialize, Serialize};

/// Left-top-right-bottom box in integer pixel coordinates.
///
/// Nothing forces `left < right` or `top < bottom`: inverted and zero-area
/// boxes are representable and simply never overlap anything.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct BBox([i32; 4]);

impl From<BBox> for [i32; 4] {
    fn from(bbox: BBox) -> Self {
        bbox.0
    }
}

impl From<[i32; 4]> for BBox {
    fn from(v: [i32; 4]) -> Self {
        BBox(v)
    }
}

impl From<(i32, i32, i32, i32)> for BBox {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        BBox([x1, y1, x2, y2])
    }
}

impl BBox {
    #[inline]
    pub fn ltrb(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        BBox([x1, y1, x2, y2])
    }

    /// Builds a box from its left-top corner and width-height, the shape contour
    /// heuristics report their bounding rectangles in.
    #[inline]
    pub fn ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        BBox([left, top, left + width, top + height])
    }

    #[inline]
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.0[0], self.0[1], self.0[2], self.0[3])
    }

    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn width(&self) -> i64 {
        self.right() as i64 - self.left() as i64
    }

    #[inline(always)]
    pub fn height(&self) -> i64 {
        self.bottom() as i64 - self.top() as i64
    }

    /// Signed area; inverted boxes may report a non-positive value.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn intersection(&self, other: &BBox) -> i64 {
        let l = self.left().max(other.left()) as i64;
        let t = self.top().max(other.top()) as i64;
        let r = self.right().min(other.right()) as i64;
        let b = self.bottom().min(other.bottom()) as i64;

        (r - l).max(0) * (b - t).max(0)
    }

    /// Intersection over union. Returns `0.0` whenever the union is not
    /// positive, so degenerate boxes never divide by zero.
    pub fn iou(&self, other: &BBox) -> f64 {
        let inter = self.intersection(other);
        let union = self.area() + other.area() - inter;

        if union > 0 {
            inter as f64 / union as f64
        } else {
            0.0
        }
    }

    /// Clamps the box into a `width` x `height` frame.
    pub fn clip(&self, width: u32, height: u32) -> BBox {
        let (w, h) = (width.min(i32::MAX as u32) as i32, height.min(i32::MAX as u32) as i32);

        BBox([
            self.left().clamp(0, w),
            self.top().clamp(0, h),
            self.right().clamp(0, w),
            self.bottom().clamp(0, h),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn iou_identical() {
        let a = BBox::ltrb(0, 0, 10, 10);
        assert_approx_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn iou_partial_overlap() {
        let a = BBox::ltrb(0, 0, 10, 10);
        let b = BBox::ltrb(5, 0, 15, 10);

        // 50 / (100 + 100 - 50)
        assert_approx_eq!(a.iou(&b), 1.0 / 3.0);
        assert_approx_eq!(b.iou(&a), 1.0 / 3.0);
    }

    #[test]
    fn iou_disjoint_and_touching() {
        let a = BBox::ltrb(0, 0, 10, 10);
        assert_eq!(a.iou(&BBox::ltrb(20, 20, 30, 30)), 0.0);
        assert_eq!(a.iou(&BBox::ltrb(10, 0, 20, 10)), 0.0);
    }

    #[test]
    fn iou_degenerate() {
        let zero = BBox::ltrb(5, 5, 5, 5);
        let inverted = BBox::ltrb(10, 10, 0, 0);
        let a = BBox::ltrb(0, 0, 10, 10);

        assert_eq!(zero.iou(&zero), 0.0);
        assert_eq!(zero.iou(&a), 0.0);
        assert_eq!(inverted.iou(&inverted), 0.0);
        assert_eq!(inverted.iou(&a), 0.0);
        assert!(inverted.is_empty());
    }

    #[test]
    fn iou_keeps_precision_on_large_boxes() {
        let a = BBox::ltrb(0, 0, 100_000_000, 1);
        let b = BBox::ltrb(0, 0, 50_000_001, 1);

        assert!(a.iou(&b) > 0.5);
        assert_eq!(a.iou(&BBox::ltrb(0, 0, 50_000_000, 1)), 0.5);
    }

    #[test]
    fn ltwh_and_clip() {
        let b = BBox::ltwh(-5, 10, 20, 30);
        assert_eq!(b, BBox::ltrb(-5, 10, 15, 40));
        assert_eq!(b.clip(12, 100), BBox::ltrb(0, 10, 12, 40));
        assert_eq!(b.area(), 600);
    }
}
