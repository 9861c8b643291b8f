use crate::detection::Detection;
use crate::error::Error;
use crate::frame::Frame;

/// Source of per-frame candidate regions: a neural model, a contour
/// heuristic, anything that turns pixels into boxes.
pub trait Detector {
    fn name(&self) -> &str;

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Error>;
}

/// Adapts a closure into a [`Detector`].
pub struct FnDetector<F> {
    name: String,
    func: F,
}

impl<F> FnDetector<F>
where
    F: FnMut(&Frame) -> Result<Vec<Detection>, Error>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Detector for FnDetector<F>
where
    F: FnMut(&Frame) -> Result<Vec<Detection>, Error>,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Error> {
        (self.func)(frame)
    }
}

/// Wraps a detector that may fail. The first error disables it for good and
/// every later frame yields no detections, so downstream tracks age out.
pub struct Guarded<D> {
    inner: D,
    enabled: bool,
}

impl<D: Detector> Guarded<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            enabled: true,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn detect(&mut self, frame: &Frame) -> Vec<Detection> {
        if !self.enabled {
            return Vec::new();
        }

        match self.inner.detect(frame) {
            Ok(dets) => dets,
            Err(err) => {
                log::warn!("detector `{}` disabled: {}", self.inner.name(), err);
                self.enabled = false;
                Vec::new()
            }
        }
    }
}
