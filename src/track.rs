use serde_derive::Serialize;

use crate::bbox::BBox;
use crate::detection::Detection;
use crate::rolling_avg::RollingAvg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Matched in the most recent update.
    Active,
    /// Unmatched for this many consecutive updates, still in the table.
    Aging(u32),
}

#[derive(Debug, Clone)]
pub struct Track {
    pub track_id: u64,
    /// Last matched box; kept unchanged while aging.
    pub bbox: BBox,
    pub class: i32,
    /// Consecutive updates since the last match.
    pub age: u32,
    history: RollingAvg<f32>,
}

impl Track {
    pub(crate) fn new(track_id: u64, det: &Detection, history_size: usize) -> Self {
        Self {
            track_id,
            bbox: det.bbox,
            class: det.class,
            age: 0,
            history: RollingAvg::with_first(history_size, det.confidence),
        }
    }

    pub(crate) fn update(&mut self, det: &Detection) {
        self.history.push(det.confidence);
        self.bbox = det.bbox;
        self.class = det.class;
        self.age = 0;
    }

    #[inline]
    pub(crate) fn mark_missed(&mut self) {
        self.age += 1;
    }

    pub fn state(&self) -> TrackState {
        match self.age {
            0 => TrackState::Active,
            k => TrackState::Aging(k),
        }
    }

    /// Mean of the confidence window. Never empty: a track is born with one sample.
    #[inline]
    pub fn smoothed_score(&self) -> f32 {
        self.history.mean().unwrap_or(0.0)
    }

    #[inline]
    pub fn scores(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// What the tracker reports per frame for every qualifying live track.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TrackedRegion {
    pub track_id: u64,
    pub bbox: BBox,
    pub score: f32,
}

impl From<&Track> for TrackedRegion {
    fn from(t: &Track) -> Self {
        Self {
            track_id: t.track_id,
            bbox: t.bbox,
            score: t.smoothed_score(),
        }
    }
}
