use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Parameters fixed for the lifetime of a [`RegionTracker`](crate::tracker::RegionTracker).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum IOU (exclusive) for a detection to claim an existing track.
    pub iou_threshold: f32,
    /// Capacity of each track's confidence window.
    pub history_size: usize,
    /// Minimum smoothed score (inclusive) for a track to be reported.
    pub score_threshold: f32,
    /// Consecutive unmatched frames after which a track is dropped.
    pub max_age: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.3,
            history_size: 5,
            score_threshold: 0.6,
            max_age: 5,
        }
    }
}

impl TrackerConfig {
    /// Drops every track the first frame it goes unmatched.
    pub fn immediate_eviction() -> Self {
        Self {
            max_age: 1,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_unit("iou_threshold", self.iou_threshold)?;
        check_unit("score_threshold", self.score_threshold)?;

        if self.history_size == 0 {
            return Err(Error::InvalidConfig(
                "history_size must be at least 1".into(),
            ));
        }

        if self.max_age == 0 {
            return Err(Error::InvalidConfig("max_age must be at least 1".into()));
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Tracked regions below this score are not annotated.
    pub min_score: f32,
    /// Tracked regions at or above this score are persisted, once per track.
    pub save_threshold: f32,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            min_score: 0.0,
            save_threshold: 0.9,
            output_dir: PathBuf::from("ai_content_alerts"),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tracker.validate()?;
        check_unit("min_score", self.min_score)?;
        check_unit("save_threshold", self.save_threshold)
    }
}

fn check_unit(name: &str, value: f32) -> Result<(), Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
        assert!(PipelineConfig::default().validate().is_ok());
        assert_eq!(TrackerConfig::immediate_eviction().max_age, 1);
    }

    #[test]
    fn rejects_out_of_range() {
        let bad = [
            TrackerConfig {
                iou_threshold: 1.5,
                ..Default::default()
            },
            TrackerConfig {
                score_threshold: -0.1,
                ..Default::default()
            },
            TrackerConfig {
                iou_threshold: f32::NAN,
                ..Default::default()
            },
            TrackerConfig {
                history_size: 0,
                ..Default::default()
            },
            TrackerConfig {
                max_age: 0,
                ..Default::default()
            },
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{:?} accepted",
                config
            );
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "save_threshold": 0.75, "tracker": {{ "max_age": 2 }} }}"#
        )
        .unwrap();

        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.save_threshold, 0.75);
        assert_eq!(config.tracker.max_age, 2);
        assert_eq!(config.tracker.history_size, 5);
        assert_eq!(config.output_dir, PathBuf::from("ai_content_alerts"));
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_score": 2.0 }}"#).unwrap();

        assert!(matches!(
            PipelineConfig::from_json_file(file.path()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
