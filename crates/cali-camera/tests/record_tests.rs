use cali_camera::{
    record_episode, Camera, CameraError, CameraSession, ColorMode, Frame, FrameSink, ImageSource,
    RecordConfig, StaticCamera, StaticCameraConfig, StopSignal,
};
use std::time::Duration;

#[derive(Default)]
struct MemorySink {
    begun: Vec<usize>,
    frames: Vec<(String, usize, Frame)>,
    ended: Vec<(usize, usize)>,
    fail_after: Option<usize>,
    stop_after: Option<(usize, StopSignal)>,
}

impl FrameSink for MemorySink {
    fn begin_episode(&mut self, episode: usize) -> Result<(), CameraError> {
        self.begun.push(episode);
        Ok(())
    }

    fn write_frame(&mut self, camera: &str, index: usize, frame: &Frame) -> Result<(), CameraError> {
        if self.fail_after == Some(self.frames.len()) {
            return Err(CameraError::Sink("disk full".to_string()));
        }
        self.frames.push((camera.to_string(), index, frame.clone()));
        if let Some((limit, stop)) = &self.stop_after {
            if self.frames.len() >= *limit {
                stop.stop();
            }
        }
        Ok(())
    }

    fn end_episode(&mut self, episode: usize, frames: usize) -> Result<(), CameraError> {
        self.ended.push((episode, frames));
        Ok(())
    }
}

fn static_camera(value: u8) -> StaticCamera {
    let frame = Frame::from_raw(2, 1, ColorMode::Rgb, vec![value; 6]).unwrap();
    StaticCamera::new(StaticCameraConfig::default().with_source(ImageSource::Frame(frame))).unwrap()
}

fn fast_config() -> RecordConfig {
    RecordConfig::default()
        .with_fps(50)
        .with_duration(Duration::from_millis(100))
}

#[test]
fn test_record_config_frame_count() {
    assert_eq!(RecordConfig::default().frame_count(), 450);
    assert_eq!(fast_config().frame_count(), 5);
    assert_eq!(fast_config().period(), Duration::from_millis(20));
}

#[test]
fn test_record_episode_writes_every_camera_each_tick() {
    let mut front = static_camera(1);
    let mut target = static_camera(2);
    let mut front = CameraSession::open(&mut front).unwrap();
    let mut target = CameraSession::open(&mut target).unwrap();
    let mut sink = MemorySink::default();

    let ticks = {
        let mut cameras: [(&str, &mut dyn Camera); 2] =
            [("front", &mut *front), ("target", &mut *target)];
        record_episode(3, &mut cameras, &mut sink, &fast_config(), &StopSignal::new()).unwrap()
    };

    assert_eq!(ticks, 5);
    assert_eq!(sink.begun, vec![3]);
    assert_eq!(sink.ended, vec![(3, 5)]);
    assert_eq!(sink.frames.len(), 10);
    assert_eq!(sink.frames[0].0, "front");
    assert_eq!(sink.frames[1].0, "target");
    assert_eq!(sink.frames[9].1, 4);
    assert_eq!(sink.frames[1].2.data()[0], 2);
}

#[test]
fn test_record_episode_applies_color_mode() {
    let mut camera = static_camera(9);
    camera.connect().unwrap();
    let mut sink = MemorySink::default();
    let config = fast_config().with_color_mode(ColorMode::Grayscale);

    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut camera)];
    record_episode(0, &mut cameras, &mut sink, &config, &StopSignal::new()).unwrap();

    assert!(sink.frames.iter().all(|(_, _, f)| f.channels() == 1));
}

#[test]
fn test_record_episode_stops_early() {
    let stop = StopSignal::new();
    let mut camera = static_camera(1);
    camera.connect().unwrap();
    let mut sink = MemorySink {
        stop_after: Some((2, stop.clone())),
        ..Default::default()
    };

    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut camera)];
    let ticks = record_episode(1, &mut cameras, &mut sink, &fast_config(), &stop).unwrap();

    assert_eq!(ticks, 2);
    assert_eq!(sink.ended, vec![(1, 2)]);
    assert!(stop.is_stopped());
    stop.reset();
    assert!(!stop.is_stopped());
}

#[test]
fn test_record_episode_disconnected_camera_fails_and_ends_episode() {
    let mut camera = static_camera(1);
    let mut sink = MemorySink::default();

    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut camera)];
    let result = record_episode(7, &mut cameras, &mut sink, &fast_config(), &StopSignal::new());

    assert!(matches!(result, Err(CameraError::NotConnected)));
    assert_eq!(sink.ended, vec![(7, 0)]);
}

#[test]
fn test_record_episode_sink_error_propagates() {
    let mut camera = static_camera(1);
    camera.connect().unwrap();
    let mut sink = MemorySink {
        fail_after: Some(3),
        ..Default::default()
    };

    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut camera)];
    let result = record_episode(0, &mut cameras, &mut sink, &fast_config(), &StopSignal::new());

    assert!(matches!(result, Err(CameraError::Sink(_))));
    assert_eq!(sink.frames.len(), 3);
    assert_eq!(sink.ended, vec![(0, 3)]);
}

#[test]
fn test_record_episode_rejects_zero_fps() {
    let mut camera = static_camera(1);
    let mut sink = MemorySink::default();
    let config = RecordConfig::default().with_fps(0);

    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut camera)];
    let result = record_episode(0, &mut cameras, &mut sink, &config, &StopSignal::new());
    assert!(matches!(result, Err(CameraError::InvalidConfig(_))));
    assert!(sink.begun.is_empty());
}
