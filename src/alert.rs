use chrono::{Local, SecondsFormat};
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bbox::BBox;
use crate::error::Error;
use crate::frame::Frame;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBoxRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl From<BBox> for BBoxRecord {
    fn from(b: BBox) -> Self {
        Self {
            x1: b.left(),
            y1: b.top(),
            x2: b.right(),
            y2: b.bottom(),
        }
    }
}

/// JSON sidecar written next to every saved crop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub timestamp: String,
    pub track_id: u64,
    pub confidence_score: f32,
    pub bbox: BBoxRecord,
    pub image_path: String,
}

/// Persists crops of flagged regions together with their metadata.
pub struct AlertHandler {
    output_dir: PathBuf,
    alert_count: usize,
}

impl AlertHandler {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, Error> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            alert_count: 0,
        })
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[inline]
    pub fn alert_count(&self) -> usize {
        self.alert_count
    }

    /// Writes `alert_<timestamp>_<track_id>.jpg` plus a `.json` sidecar and
    /// returns the image path. Stems carry microseconds, so they do not
    /// collide within a run.
    pub fn save_alert(
        &mut self,
        frame: &Frame,
        bbox: BBox,
        score: f32,
        track_id: u64,
    ) -> Result<PathBuf, Error> {
        let crop = frame.crop(&bbox).ok_or(Error::EmptyCrop)?;
        let (h, w, _) = crop.dim();
        let pixels: Vec<u8> = crop.iter().copied().collect();
        let img = image::RgbImage::from_raw(w as u32, h as u32, pixels).ok_or(Error::EmptyCrop)?;

        let now = Local::now();
        let stem = format!("alert_{}_{}", now.format("%Y%m%d_%H%M%S_%6f"), track_id);

        let img_path = self.output_dir.join(format!("{}.jpg", stem));
        img.save(&img_path)?;

        let record = AlertRecord {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            track_id,
            confidence_score: score,
            bbox: bbox.into(),
            image_path: img_path.to_string_lossy().into_owned(),
        };

        let meta_path = self.output_dir.join(format!("{}.json", stem));
        fs::write(&meta_path, serde_json::to_string_pretty(&record)?)?;

        self.alert_count += 1;
        log::info!(
            "alert: track {} score {:.2} saved to {}",
            track_id,
            score,
            img_path.display()
        );

        Ok(img_path)
    }
}
