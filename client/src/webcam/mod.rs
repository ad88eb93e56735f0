//! Camera acquisition and release.
//!
//! DESIGN
//! ======
//! The camera sits behind two traits: [`MediaDevices`] hands out a
//! [`MediaStream`] for a set of constraints, and the stream yields encoded
//! frames until it is stopped. [`Webcam`] owns at most one live stream and
//! guarantees it is stopped on [`Webcam::stop`] and on drop. Detection holds a
//! shared handle to the same stream; once stopped, the stream stops
//! producing frames, so detection ticks become no-ops.

#[cfg(test)]
#[path = "webcam_test.rs"]
mod webcam_test;

pub mod still;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

/// Text shown when the camera cannot be acquired.
pub const WEBCAM_ERROR_MESSAGE: &str = "Failed to access webcam. Please grant permission.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NoDevice,
    #[error("frame encode failed: {0}")]
    Encode(String),
}

/// Requested stream shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub width: u32,
    pub height: u32,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self { width: 640, height: 480 }
    }
}

/// One captured frame, already JPEG-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoFrame {
    jpeg: Vec<u8>,
}

impl VideoFrame {
    #[must_use]
    pub fn from_jpeg(jpeg: Vec<u8>) -> Self {
        Self { jpeg }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// `data:image/jpeg;base64,...` form expected by the detection endpoint.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&self.jpeg))
    }
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("bytes", &self.jpeg.len())
            .finish()
    }
}

/// Source of camera streams.
#[async_trait::async_trait]
pub trait MediaDevices: Send + Sync {
    /// Open a stream matching `constraints`.
    async fn get_user_media(&self, constraints: VideoConstraints) -> Result<Arc<dyn MediaStream>, CameraError>;
}

/// A live camera stream.
pub trait MediaStream: Send + Sync {
    /// Latest frame. `Ok(None)` until the device has produced one, and after
    /// the stream is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::Encode`] if the frame cannot be encoded.
    fn capture_frame(&self) -> Result<Option<VideoFrame>, CameraError>;

    /// Stop every track of the stream. Idempotent.
    fn stop(&self);

    fn is_live(&self) -> bool;
}

/// Owner of the one active camera stream.
pub struct Webcam {
    devices: Arc<dyn MediaDevices>,
    constraints: VideoConstraints,
    stream: Option<Arc<dyn MediaStream>>,
    error: Option<String>,
}

impl Webcam {
    #[must_use]
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self { devices, constraints: VideoConstraints::default(), stream: None, error: None }
    }

    /// Acquire the camera. Already-active cameras are left as they are.
    ///
    /// # Errors
    ///
    /// Returns the device error; [`Webcam::error`] then holds the
    /// user-facing message and the webcam stays inactive.
    pub async fn start(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            return Ok(());
        }
        match self.devices.get_user_media(self.constraints).await {
            Ok(stream) => {
                info!(width = self.constraints.width, height = self.constraints.height, "webcam started");
                self.stream = Some(stream);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "webcam acquisition failed");
                self.error = Some(WEBCAM_ERROR_MESSAGE.to_owned());
                Err(e)
            }
        }
    }

    /// Release the camera. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop();
            info!("webcam stopped");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// User-facing error from the last failed start.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shared handle to the live stream for frame capture.
    #[must_use]
    pub fn source(&self) -> Option<Arc<dyn MediaStream>> {
        self.stream.clone()
    }
}

impl Drop for Webcam {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Webcam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webcam")
            .field("active", &self.is_active())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
