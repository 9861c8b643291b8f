pub mod alert;
pub mod bbox;
pub mod config;
pub mod detection;
pub mod detector;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod rolling_avg;
pub mod tracker;

mod circular_queue;
mod track;

pub use bbox::BBox;
pub use config::{PipelineConfig, TrackerConfig};
pub use detection::Detection;
pub use error::Error;
pub use frame::Frame;
pub use pipeline::{Annotation, FpsMeter, Pipeline};
pub use track::{Track, TrackState, TrackedRegion};
pub use tracker::RegionTracker;

/// Per-frame association of detections to persistent identities.
pub trait Tracking {
    fn update(&mut self, detections: &[Detection]) -> Vec<TrackedRegion>;

    /// Whether `track_id` is still in the table, reported or not.
    fn is_live(&self, track_id: u64) -> bool;
}
