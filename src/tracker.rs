use std::collections::{BTreeMap, BTreeSet};

use crate::config::TrackerConfig;
use crate::error::Error;
use crate::track::{Track, TrackedRegion};
use crate::{Detection, Tracking};

/// Greedy IOU tracker with bounded aging and windowed score smoothing.
///
/// Tracks live in a table keyed by identity. Identities grow monotonically, so
/// table iteration order is creation order and every output is deterministic
/// for a given sequence of inputs.
#[derive(Debug, Clone)]
pub struct RegionTracker {
    config: TrackerConfig,
    tracks: BTreeMap<u64, Track>,
    next_id: u64,
}

impl RegionTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            tracks: BTreeMap::new(),
            next_id: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live tracks in table order, including those below the score threshold.
    #[inline]
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    #[inline]
    pub fn get(&self, track_id: u64) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Identity the next created track will receive.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Best still-unmatched track for `det`: strictly highest IOU above the
    /// threshold, first in table order on ties.
    fn best_match(&self, det: &Detection, unmatched: &BTreeSet<u64>) -> Option<u64> {
        let threshold = f64::from(self.config.iou_threshold);
        let mut best: Option<(u64, f64)> = None;

        for id in unmatched {
            let iou = self.tracks[id].bbox.iou(&det.bbox);

            if iou > threshold && best.map_or(true, |(_, b)| iou > b) {
                best = Some((*id, iou));
            }
        }

        best.map(|(id, _)| id)
    }

    fn spawn(&mut self, det: &Detection) {
        let id = self.next_id;
        self.next_id += 1;

        log::debug!(
            "track {} created at {:?} (confidence {:.3})",
            id,
            det.bbox.as_tuple(),
            det.confidence
        );

        self.tracks
            .insert(id, Track::new(id, det, self.config.history_size));
    }

    fn age_unmatched(&mut self, unmatched: &BTreeSet<u64>) {
        for id in unmatched {
            if let Some(track) = self.tracks.get_mut(id) {
                track.mark_missed();
            }
        }

        let max_age = self.config.max_age;
        self.tracks.retain(|id, t| {
            if t.age >= max_age {
                log::debug!("track {} removed after {} missed frames", id, t.age);
                return false;
            }
            true
        });
    }

    pub fn update(&mut self, detections: &[Detection]) -> Vec<TrackedRegion> {
        let mut unmatched: BTreeSet<u64> = self.tracks.keys().copied().collect();

        for det in detections {
            match self.best_match(det, &unmatched) {
                Some(id) => {
                    unmatched.remove(&id);
                    if let Some(track) = self.tracks.get_mut(&id) {
                        track.update(det);
                    }
                }
                None => self.spawn(det),
            }
        }

        self.age_unmatched(&unmatched);

        self.tracks
            .values()
            .map(TrackedRegion::from)
            .filter(|r| r.score >= self.config.score_threshold)
            .collect()
    }
}

impl Tracking for RegionTracker {
    #[inline]
    fn update(&mut self, detections: &[Detection]) -> Vec<TrackedRegion> {
        RegionTracker::update(self, detections)
    }

    #[inline]
    fn is_live(&self, track_id: u64) -> bool {
        self.tracks.contains_key(&track_id)
    }
}
