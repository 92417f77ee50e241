use crate::{Camera, CameraError, CameraInfo, DeviceCameraConfig};
use cali_image::{convert_color, ColorMode, Frame};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<Frame, CameraError>;

fn device_error(err: std::io::Error) -> CameraError {
    CameraError::Device(err.to_string())
}

/// Live V4L2 camera delivering MJPEG frames decoded to RGB.
///
/// `connect` opens the device and starts a capture thread feeding a bounded
/// queue; reads take the next queued frame.
pub struct V4l2Camera {
    config: DeviceCameraConfig,
    receiver: Option<Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl V4l2Camera {
    /// Create a disconnected camera. The device is opened by `connect`.
    pub fn new(config: DeviceCameraConfig) -> Self {
        Self {
            config,
            receiver: None,
            thread_handle: None,
        }
    }

    pub fn config(&self) -> &DeviceCameraConfig {
        &self.config
    }

    fn open_device(&self) -> Result<Device, CameraError> {
        let device = Device::with_path(self.config.device()).map_err(device_error)?;

        let format = Format::new(
            self.config.width(),
            self.config.height(),
            FourCC::new(b"MJPG"),
        );
        let format = Capture::set_format(&device, &format).map_err(device_error)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(format!(
                "{} does not support MJPEG",
                self.config.device()
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(self.config.fps());
        Capture::set_params(&device, &params).map_err(device_error)?;
        Ok(device)
    }

    /// Reads frames, decodes them and queues them until the receiver is dropped.
    fn capture_loop(device: Device, tx: SyncSender<FrameResult>, buffer_count: u32) {
        let mut stream = match MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)
        {
            Ok(stream) => stream,
            Err(e) => {
                let _ = tx.send(Err(device_error(e)));
                return;
            }
        };

        loop {
            let result = match CaptureStream::next(&mut stream) {
                // the buffer is only valid until the next call
                Ok((data, _meta)) => cali_image::decode_color_frame(data).map_err(CameraError::Decode),
                Err(e) => Err(device_error(e)),
            };
            let fatal = result.is_err();
            if tx.send(result).is_err() || fatal {
                break;
            }
        }
    }

    /// The capture thread exits after sending an error, so any error other
    /// than a timeout leaves the camera disconnected.
    fn next_frame(&mut self, timeout: Option<Duration>) -> Result<Frame, CameraError> {
        let receiver = self.receiver.as_ref().ok_or(CameraError::NotConnected)?;
        let stopped = || CameraError::Channel("capture thread stopped".to_string());
        let received = match timeout {
            Some(timeout) => receiver.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => CameraError::Timeout,
                RecvTimeoutError::Disconnected => stopped(),
            }),
            None => receiver.recv().map_err(|_| stopped()),
        };

        let frame = match received {
            Ok(Ok(frame)) => frame,
            Err(CameraError::Timeout) => return Err(CameraError::Timeout),
            Ok(Err(e)) | Err(e) => {
                log::warn!("{} capture ended: {e}", self.config.device());
                self.disconnect();
                return Err(e);
            }
        };

        match self.config.color_mode() {
            Some(mode) => Ok(convert_color(&frame, mode)?.into_owned()),
            None => Ok(frame),
        }
    }
}

impl Camera for V4l2Camera {
    fn connect(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self.open_device()?;
        let buffer_count = self.config.buffer_count().max(1);
        let (tx, rx) = mpsc::sync_channel(buffer_count as usize);
        let handle = thread::spawn(move || Self::capture_loop(device, tx, buffer_count));

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);
        log::info!(
            "{} streaming {}x{} @ {} fps",
            self.config.device(),
            self.config.width(),
            self.config.height(),
            self.config.fps()
        );
        Ok(())
    }

    fn disconnect(&mut self) {
        // dropping the receiver makes the next send fail, ending the thread
        drop(self.receiver.take());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::warn!("{} capture thread panicked", self.config.device());
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.receiver.is_some()
    }

    fn read(&mut self, color_mode: Option<ColorMode>) -> Result<Frame, CameraError> {
        let frame = self.next_frame(None)?;
        match color_mode {
            Some(mode) => Ok(convert_color(&frame, mode)?.into_owned()),
            None => Ok(frame),
        }
    }

    fn async_read(&mut self, timeout: Duration) -> Result<Frame, CameraError> {
        self.next_frame(Some(timeout))
    }

    /// Lists `/dev/video*` nodes.
    fn find_cameras() -> Vec<CameraInfo> {
        let Ok(entries) = std::fs::read_dir("/dev") else {
            return Vec::new();
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("video"))
            })
            .collect();
        paths.sort();

        paths
            .into_iter()
            .map(|path| CameraInfo {
                id: path.display().to_string(),
                kind: "v4l2",
                path: Some(path),
            })
            .collect()
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.disconnect();
    }
}
