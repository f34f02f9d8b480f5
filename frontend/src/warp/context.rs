use std::cell::Cell;

/// Resting camera distance of the nebula background.
pub const CAMERA_FAR: f64 = 70.0;
/// Camera distance while a transition dives into the nebula.
pub const CAMERA_NEAR: f64 = 4.0;

/// State shared between the transition sequencer (writer) and the
/// background renderer (reader, once per frame).
#[derive(Debug, PartialEq)]
pub struct WarpContext {
    camera_target: Cell<f64>,
}

impl Default for WarpContext {
    fn default() -> Self {
        Self {
            camera_target: Cell::new(CAMERA_FAR),
        }
    }
}

impl WarpContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_target(&self) -> f64 {
        self.camera_target.get()
    }

    pub(crate) fn dive(&self) {
        self.camera_target.set(CAMERA_NEAR);
    }

    pub(crate) fn settle(&self) {
        self.camera_target.set(CAMERA_FAR);
    }
}
