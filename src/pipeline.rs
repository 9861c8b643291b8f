use std::collections::HashSet;
use std::path::PathBuf;

use crate::alert::AlertHandler;
use crate::bbox::BBox;
use crate::config::PipelineConfig;
use crate::detector::{Detector, Guarded};
use crate::error::Error;
use crate::frame::Frame;
use crate::rolling_avg::RollingAvg;
use crate::tracker::RegionTracker;
use crate::Tracking;

pub const SAVE_COLOR: [u8; 3] = [0, 255, 0];
pub const DISPLAY_COLOR: [u8; 3] = [255, 0, 0];

const FPS_WINDOW: usize = 30;

/// Drawing instruction for one tracked region; the caller owns the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub track_id: u64,
    pub bbox: BBox,
    pub score: f32,
    pub label: String,
    /// RGB
    pub color: [u8; 3],
    /// Crop written for this region during this frame.
    pub saved: Option<PathBuf>,
}

/// Detector, tracker and alert persistence wired into a per-frame call.
pub struct Pipeline<D, T = RegionTracker> {
    detector: Guarded<D>,
    tracker: T,
    alerts: AlertHandler,
    alerted: HashSet<u64>,
    config: PipelineConfig,
}

impl<D: Detector> Pipeline<D, RegionTracker> {
    pub fn new(detector: D, config: PipelineConfig) -> Result<Self, Error> {
        let tracker = RegionTracker::new(config.tracker)?;
        Self::with_tracker(detector, tracker, config)
    }
}

impl<D: Detector, T: Tracking> Pipeline<D, T> {
    pub fn with_tracker(detector: D, tracker: T, config: PipelineConfig) -> Result<Self, Error> {
        config.validate()?;
        let alerts = AlertHandler::new(&config.output_dir)?;

        Ok(Self {
            detector: Guarded::new(detector),
            tracker,
            alerts,
            alerted: HashSet::new(),
            config,
        })
    }

    #[inline]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    #[inline]
    pub fn alerts(&self) -> &AlertHandler {
        &self.alerts
    }

    /// Live track ids that already produced an alert.
    #[inline]
    pub fn alerted_count(&self) -> usize {
        self.alerted.len()
    }

    #[inline]
    pub fn detector_enabled(&self) -> bool {
        self.detector.is_enabled()
    }

    /// Runs one frame through detection, tracking and alerting. Each track id
    /// is persisted at most once; a failed save is logged and retried on a
    /// later frame.
    pub fn process(&mut self, frame: &Frame) -> Vec<Annotation> {
        let detections = self.detector.detect(frame);
        let regions = self.tracker.update(&detections);

        // evicted ids never come back
        self.alerted.retain(|id| self.tracker.is_live(*id));

        let mut annotations = Vec::with_capacity(regions.len());
        for region in regions {
            if region.score < self.config.min_score {
                continue;
            }

            let will_save = region.score >= self.config.save_threshold;
            let mut saved = None;

            if will_save && !self.alerted.contains(&region.track_id) {
                match self
                    .alerts
                    .save_alert(frame, region.bbox, region.score, region.track_id)
                {
                    Ok(path) => {
                        self.alerted.insert(region.track_id);
                        saved = Some(path);
                    }
                    Err(err) => {
                        log::warn!("failed to save alert for track {}: {}", region.track_id, err)
                    }
                }
            }

            annotations.push(Annotation {
                track_id: region.track_id,
                bbox: region.bbox,
                score: region.score,
                label: format!("AI:{:.2}", region.score),
                color: if will_save { SAVE_COLOR } else { DISPLAY_COLOR },
                saved,
            });
        }

        annotations
    }
}

/// Frame rate smoothed over the last few frame intervals.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    last: Option<f64>,
    intervals: RollingAvg<f64>,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

impl FpsMeter {
    pub fn new(window: usize) -> Self {
        Self {
            last: None,
            intervals: RollingAvg::new(window),
        }
    }

    /// Records a frame captured at `timestamp` seconds; `None` until two frames
    /// with distinct timestamps have been seen.
    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        if let Some(last) = self.last.replace(timestamp) {
            let dt = timestamp - last;
            if dt > 0.0 {
                self.intervals.push(dt);
            }
        }

        self.fps()
    }

    pub fn fps(&self) -> Option<f64> {
        let dt = self.intervals.mean()?;
        if dt.abs() < 1e-7 {
            return None;
        }
        Some(1.0 / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn fps_is_smoothed() {
        let mut fps = FpsMeter::new(2);
        assert_eq!(fps.tick(0.0), None);
        assert_approx_eq!(fps.tick(0.5).unwrap(), 2.0);
        assert_approx_eq!(fps.tick(0.75).unwrap(), 1.0 / 0.375);
        assert_approx_eq!(fps.tick(1.0).unwrap(), 4.0);
        // duplicate timestamp is ignored
        assert_approx_eq!(fps.tick(1.0).unwrap(), 4.0);
    }
}
