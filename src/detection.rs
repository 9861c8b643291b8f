use serde_derive::{Deserialize, Serialize};

use crate::bbox::BBox;

/// One candidate region reported by a detector for a single frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BBox,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new(bbox: BBox, confidence: f32, class: i32) -> Self {
        Self {
            bbox,
            confidence,
            class,
        }
    }

    #[inline]
    pub fn iou(&self, other: &Detection) -> f64 {
        self.bbox.iou(&other.bbox)
    }
}

/// `(x1, y1, x2, y2, confidence, class_id)`, the shape detectors hand over.
impl From<(i32, i32, i32, i32, f32, i32)> for Detection {
    fn from((x1, y1, x2, y2, confidence, class): (i32, i32, i32, i32, f32, i32)) -> Self {
        Self::new(BBox::ltrb(x1, y1, x2, y2), confidence, class)
    }
}

/// Greedy duplicate removal used by the contour heuristics: walks detections by
/// descending confidence and drops any whose IOU with an already kept one
/// exceeds `iou_limit`. Equal confidences keep their input order.
pub fn suppress_overlapping(mut dets: Vec<Detection>, iou_limit: f32) -> Vec<Detection> {
    dets.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let iou_limit = f64::from(iou_limit);
    let mut keep: Vec<Detection> = Vec::with_capacity(dets.len());
    for det in dets {
        if keep.iter().all(|k| k.iou(&det) <= iou_limit) {
            keep.push(det);
        }
    }

    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tuple() {
        let det: Detection = (1, 2, 3, 4, 0.5, 7).into();
        assert_eq!(det.bbox, BBox::ltrb(1, 2, 3, 4));
        assert_eq!(det.confidence, 0.5);
        assert_eq!(det.class, 7);
    }

    #[test]
    fn suppression_keeps_highest_confidence() {
        let dets = vec![
            Detection::from((0, 0, 10, 10, 0.4, 0)),
            Detection::from((1, 0, 11, 10, 0.9, 0)),
            Detection::from((50, 50, 60, 60, 0.2, 1)),
        ];

        let kept = suppress_overlapping(dets, 0.5);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.9);
        assert_eq!(kept[1].bbox, BBox::ltrb(50, 50, 60, 60));
    }

    #[test]
    fn suppression_limit_is_exclusive() {
        // 100 / 200
        let dets = vec![
            Detection::from((0, 0, 20, 10, 0.9, 0)),
            Detection::from((0, 0, 10, 10, 0.8, 0)),
        ];
        assert_eq!(dets[0].iou(&dets[1]), 0.5);
        assert_eq!(suppress_overlapping(dets, 0.5).len(), 2);
    }
}
