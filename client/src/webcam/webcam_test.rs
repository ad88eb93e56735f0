use super::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
struct MockStream {
    stops: AtomicUsize,
    live: AtomicBool,
}

impl MediaStream for MockStream {
    fn capture_frame(&self) -> Result<Option<VideoFrame>, CameraError> {
        Ok(self.is_live().then(|| VideoFrame::from_jpeg(vec![0xFF, 0xD8, 0xFF])))
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

struct MockDevices {
    result: Result<(), CameraError>,
    opened: Mutex<Vec<Arc<MockStream>>>,
    constraints: Mutex<Option<VideoConstraints>>,
}

impl MockDevices {
    fn granting() -> Arc<Self> {
        Arc::new(Self { result: Ok(()), opened: Mutex::new(Vec::new()), constraints: Mutex::new(None) })
    }

    fn denying() -> Arc<Self> {
        Arc::new(Self {
            result: Err(CameraError::PermissionDenied),
            opened: Mutex::new(Vec::new()),
            constraints: Mutex::new(None),
        })
    }

    fn last_stream(&self) -> Arc<MockStream> {
        self.opened.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl MediaDevices for MockDevices {
    async fn get_user_media(&self, constraints: VideoConstraints) -> Result<Arc<dyn MediaStream>, CameraError> {
        *self.constraints.lock().unwrap() = Some(constraints);
        self.result.clone()?;
        let stream = Arc::new(MockStream { live: AtomicBool::new(true), ..MockStream::default() });
        self.opened.lock().unwrap().push(stream.clone());
        Ok(stream)
    }
}

#[tokio::test]
async fn start_requests_640_by_480() {
    let devices = MockDevices::granting();
    let mut cam = Webcam::new(devices.clone());
    cam.start().await.unwrap();
    assert!(cam.is_active());
    assert_eq!(*devices.constraints.lock().unwrap(), Some(VideoConstraints { width: 640, height: 480 }));
    assert!(cam.error().is_none());
}

#[tokio::test]
async fn denial_sets_message_and_stays_inactive() {
    let mut cam = Webcam::new(MockDevices::denying());
    let err = cam.start().await.unwrap_err();
    assert_eq!(err, CameraError::PermissionDenied);
    assert!(!cam.is_active());
    assert!(cam.source().is_none());
    assert_eq!(cam.error(), Some(WEBCAM_ERROR_MESSAGE));
}

#[tokio::test]
async fn stop_twice_releases_once_and_clears_source() {
    let devices = MockDevices::granting();
    let mut cam = Webcam::new(devices.clone());
    cam.start().await.unwrap();
    let stream = devices.last_stream();

    cam.stop();
    cam.stop();

    assert!(!cam.is_active());
    assert!(cam.source().is_none());
    assert!(!stream.is_live());
    assert_eq!(stream.stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn drop_releases_the_stream() {
    let devices = MockDevices::granting();
    {
        let mut cam = Webcam::new(devices.clone());
        cam.start().await.unwrap();
    }
    assert!(!devices.last_stream().is_live());
}

#[tokio::test]
async fn second_start_keeps_existing_stream() {
    let devices = MockDevices::granting();
    let mut cam = Webcam::new(devices.clone());
    cam.start().await.unwrap();
    cam.start().await.unwrap();
    assert_eq!(devices.opened.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn stopped_source_yields_no_frames() {
    let devices = MockDevices::granting();
    let mut cam = Webcam::new(devices);
    cam.start().await.unwrap();
    let source = cam.source().unwrap();
    assert!(source.capture_frame().unwrap().is_some());
    cam.stop();
    assert!(source.capture_frame().unwrap().is_none());
}

#[test]
fn frame_data_url_is_base64_jpeg() {
    let frame = VideoFrame::from_jpeg(vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(frame.to_data_url(), "data:image/jpeg;base64,/9j/");
    assert_eq!(format!("{frame:?}"), "VideoFrame { bytes: 3 }");
}

// --- still image device ---

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("coderunner-still-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn still_device_cycles_directory_in_name_order() {
    let dir = temp_dir("cycle");
    std::fs::write(dir.join("b.jpg"), [2u8]).unwrap();
    std::fs::write(dir.join("a.jpeg"), [1u8]).unwrap();
    std::fs::write(dir.join("notes.txt"), [9u8]).unwrap();

    let stream = still::StillImageDevices::new(&dir)
        .get_user_media(VideoConstraints::default())
        .await
        .unwrap();
    let frames: Vec<u8> = (0..3)
        .map(|_| stream.capture_frame().unwrap().unwrap().as_bytes()[0])
        .collect();
    assert_eq!(frames, vec![1, 2, 1]);

    stream.stop();
    assert!(stream.capture_frame().unwrap().is_none());
    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn still_device_missing_path_is_no_device() {
    let result = still::StillImageDevices::new("/definitely/not/here.jpg")
        .get_user_media(VideoConstraints::default())
        .await;
    assert!(matches!(result, Err(CameraError::NoDevice)));
}

#[tokio::test]
async fn still_device_empty_directory_is_no_device() {
    let dir = temp_dir("empty");
    let result = still::StillImageDevices::new(&dir)
        .get_user_media(VideoConstraints::default())
        .await;
    assert!(matches!(result, Err(CameraError::NoDevice)));
    std::fs::remove_dir_all(dir).unwrap();
}
