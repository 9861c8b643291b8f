use ndarray::{s, Array3, ArrayView3, ArrayViewMut3};

use crate::bbox::BBox;
use crate::error::Error;

pub const CHANNELS: usize = 3;

/// An owned RGB frame, laid out height x width x channel.
pub struct Frame {
    data: Array3<u8>,
    pub timestamp: f64, // in seconds
}

impl Frame {
    /// Fails unless `data` carries exactly three channels; BGRA or gray
    /// captures must be converted by the caller first.
    pub fn new(data: Array3<u8>, timestamp: f64) -> Result<Self, Error> {
        let (_, _, c) = data.dim();
        if c != CHANNELS {
            return Err(Error::ChannelCount(c));
        }

        Ok(Self { data, timestamp })
    }

    /// A black frame, handy for detectors that ignore pixels.
    pub fn blank(width: u32, height: u32, timestamp: f64) -> Self {
        Self {
            data: Array3::zeros((height as usize, width as usize, CHANNELS)),
            timestamp,
        }
    }

    #[inline]
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Mutable pixels; the shape stays fixed.
    #[inline]
    pub fn pixels_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    /// (width, height)
    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        let (h, w, _) = self.data.dim();
        (w as u32, h as u32)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dims().0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dims().1
    }

    /// The pixels under `bbox` after clipping it to the frame; `None` when
    /// nothing remains.
    pub fn crop(&self, bbox: &BBox) -> Option<ArrayView3<'_, u8>> {
        let (w, h) = self.dims();
        let b = bbox.clip(w, h);

        if b.is_empty() {
            return None;
        }

        Some(self.data.slice(s![
            b.top() as usize..b.bottom() as usize,
            b.left() as usize..b.right() as usize,
            ..
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_is_clipped() {
        let mut frame = Frame::blank(20, 10, 0.0);
        frame.pixels_mut()[[5, 15, 0]] = 255;

        let crop = frame.crop(&BBox::ltrb(10, 2, 40, 8)).unwrap();
        assert_eq!(crop.dim(), (6, 10, 3));
        assert_eq!(crop[[3, 5, 0]], 255);

        assert!(frame.crop(&BBox::ltrb(30, 0, 40, 5)).is_none());
        assert_eq!(frame.dims(), (20, 10));
    }

    #[test]
    fn only_rgb_frames_are_accepted() {
        let bgra = Frame::new(Array3::zeros((10, 10, 4)), 0.0);
        assert!(matches!(bgra, Err(Error::ChannelCount(4))));

        let gray = Frame::new(Array3::zeros((10, 10, 1)), 0.0);
        assert!(matches!(gray, Err(Error::ChannelCount(1))));

        let rgb = Frame::new(Array3::zeros((10, 12, 3)), 1.5).unwrap();
        assert_eq!(rgb.dims(), (12, 10));
        assert_eq!(rgb.pixels().dim(), (10, 12, 3));
    }
}
