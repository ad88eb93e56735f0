//! Camera backed by JPEG files on disk.
//!
//! Terminal front-ends have no browser camera. This device serves a single
//! JPEG, or cycles through the `.jpg`/`.jpeg` files of a directory in name
//! order, one file per captured frame. Every file is read when the stream is
//! opened; capturing never touches the disk.

#[cfg(test)]
#[path = "still_test.rs"]
mod still_test;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{CameraError, MediaDevices, MediaStream, VideoConstraints, VideoFrame};

#[derive(Debug, Clone)]
pub struct StillImageDevices {
    path: PathBuf,
}

impl StillImageDevices {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl MediaDevices for StillImageDevices {
    async fn get_user_media(&self, _constraints: VideoConstraints) -> Result<Arc<dyn MediaStream>, CameraError> {
        let mut frames = Vec::new();
        for file in list_frames(&self.path).await? {
            frames.push(tokio::fs::read(&file).await.map_err(|e| map_io(&e))?);
        }
        Ok(Arc::new(StillImageStream { frames, next: AtomicUsize::new(0), live: AtomicBool::new(true) }))
    }
}

async fn list_frames(path: &Path) -> Result<Vec<PathBuf>, CameraError> {
    let meta = tokio::fs::metadata(path).await.map_err(|e| map_io(&e))?;
    if meta.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut entries = tokio::fs::read_dir(path).await.map_err(|e| map_io(&e))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| map_io(&e))? {
        let p = entry.path();
        let is_jpeg = p
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
        if is_jpeg {
            files.push(p);
        }
    }
    if files.is_empty() {
        return Err(CameraError::NoDevice);
    }
    files.sort();
    Ok(files)
}

fn map_io(err: &std::io::Error) -> CameraError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => CameraError::PermissionDenied,
        _ => CameraError::NoDevice,
    }
}

struct StillImageStream {
    frames: Vec<Vec<u8>>,
    next: AtomicUsize,
    live: AtomicBool,
}

impl MediaStream for StillImageStream {
    fn capture_frame(&self) -> Result<Option<VideoFrame>, CameraError> {
        if !self.is_live() || self.frames.is_empty() {
            return Ok(None);
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.frames.len();
        Ok(Some(VideoFrame::from_jpeg(self.frames[index].clone())))
    }

    fn stop(&self) {
        self.live.store(false, Ordering::Relaxed);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }
}
