use cali_camera::{
    Camera, CameraError, CameraSession, ColorMode, Frame, FrameSink, ImageSource, RecordConfig,
    StaticCamera, StaticCameraConfig, StopSignal, record_episode,
};
use episode_runner::{
    DirectorySink, EpisodeAction, ShapeOutcome, ShapeTargets, parse_action, plan_shapes,
    record_shape, record_target, wait_for_action,
};
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("episode-runner-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_parse_action() {
    assert_eq!(parse_action("\n"), Some(EpisodeAction::Next));
    assert_eq!(parse_action(" \n"), Some(EpisodeAction::Next));
    assert_eq!(parse_action("n"), Some(EpisodeAction::Next));
    assert_eq!(parse_action("Q\n"), Some(EpisodeAction::Quit));
    assert_eq!(parse_action("quit"), Some(EpisodeAction::Quit));
    assert_eq!(parse_action("x"), None);
}

#[test]
fn test_wait_for_action_skips_invalid_lines() {
    let mut input = Cursor::new("what\n\n");
    assert_eq!(wait_for_action(&mut input).unwrap(), EpisodeAction::Next);

    let mut input = Cursor::new("nope\nq\n");
    assert_eq!(wait_for_action(&mut input).unwrap(), EpisodeAction::Quit);
}

#[test]
fn test_wait_for_action_quits_on_eof() {
    let mut input = Cursor::new("");
    assert_eq!(wait_for_action(&mut input).unwrap(), EpisodeAction::Quit);
}

fn write_png(path: &Path, value: u8) {
    crates_image::RgbImage::from_raw(4, 2, vec![value; 4 * 2 * 3])
        .unwrap()
        .save_with_format(path, crates_image::ImageFormat::Png)
        .unwrap();
}

fn shape_tree(name: &str) -> PathBuf {
    let root = test_dir(name);
    fs::create_dir_all(root.join("circle")).unwrap();
    fs::create_dir_all(root.join("square")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    write_png(&root.join("circle").join("b.png"), 20);
    write_png(&root.join("circle").join("a.png"), 10);
    write_png(&root.join("square").join("c.PNG"), 30);
    fs::write(root.join("circle").join("notes.txt"), b"").unwrap();
    fs::write(root.join("loose.png"), b"").unwrap();
    root
}

fn target_camera() -> StaticCamera {
    StaticCamera::new(StaticCameraConfig::default()).unwrap()
}

fn fast_config() -> RecordConfig {
    RecordConfig::default()
        .with_fps(100)
        .with_duration(Duration::from_millis(20))
}

#[test]
fn test_plan_shapes_groups_by_directory() {
    let root = shape_tree("plan");

    let shapes = plan_shapes(&root).unwrap();
    let names: Vec<&str> = shapes.iter().map(|s| s.shape.as_str()).collect();
    assert_eq!(names, ["circle", "empty", "square"]);
    assert_eq!(
        shapes[0].images,
        vec![root.join("circle").join("a.png"), root.join("circle").join("b.png")]
    );
    assert!(shapes[1].images.is_empty());
    assert_eq!(shapes[2].images, vec![root.join("square").join("c.PNG")]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_shape_numbers_episodes_per_shape() {
    let root = shape_tree("numbering");
    let out = root.join("out");
    let shapes = plan_shapes(&root).unwrap();
    let mut camera = target_camera();
    let stop = StopSignal::new();
    let mut asked = Vec::new();
    let mut gate = |image: &Path| -> io::Result<EpisodeAction> {
        asked.push(image.to_path_buf());
        Ok(EpisodeAction::Next)
    };

    for shape in shapes.iter().filter(|s| !s.images.is_empty()) {
        let outcome = record_shape(
            shape,
            &out,
            &mut camera,
            None,
            &fast_config(),
            &stop,
            &mut gate,
        )
        .unwrap();
        assert_eq!(outcome.episodes, shape.images.len());
        assert!(!outcome.quit);
    }

    assert_eq!(asked.len(), 3);
    assert!(out.join("circle/episode_000/target/frame_000000.png").exists());
    assert!(out.join("circle/episode_001/target/frame_000001.png").exists());
    assert!(out.join("square/episode_000/target/frame_000000.png").exists());
    assert!(!out.join("square/episode_001").exists());
    assert!(!camera.is_connected());

    let first = crates_image::open(out.join("circle/episode_000/target/frame_000000.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(first.get_pixel(0, 0).0, [10, 10, 10]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_shape_quit_before_first_episode() {
    let root = shape_tree("quit");
    let out = root.join("out");
    let shapes = plan_shapes(&root).unwrap();
    let mut camera = target_camera();
    let mut gate = |_: &Path| -> io::Result<EpisodeAction> { Ok(EpisodeAction::Quit) };

    let outcome = record_shape(
        &shapes[0],
        &out,
        &mut camera,
        None,
        &fast_config(),
        &StopSignal::new(),
        &mut gate,
    )
    .unwrap();
    assert_eq!(outcome, ShapeOutcome { episodes: 0, quit: true });
    assert!(!out.join("circle/episode_000").exists());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_shape_stop_while_waiting_quits() {
    let root = shape_tree("stop-gate");
    let out = root.join("out");
    let shapes = plan_shapes(&root).unwrap();
    let mut camera = target_camera();
    let stop = StopSignal::new();
    let mut gate = |_: &Path| -> io::Result<EpisodeAction> {
        stop.stop();
        Ok(EpisodeAction::Next)
    };

    let outcome = record_shape(
        &shapes[0],
        &out,
        &mut camera,
        None,
        &fast_config(),
        &stop,
        &mut gate,
    )
    .unwrap();
    assert!(outcome.quit);
    assert_eq!(outcome.episodes, 0);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_shape_skips_missing_images() {
    let root = shape_tree("missing");
    let out = root.join("out");
    let shape = ShapeTargets {
        shape: "circle".to_string(),
        images: vec![root.join("circle").join("gone.png"), root.join("circle").join("a.png")],
    };
    let mut camera = target_camera();
    let mut gate = |_: &Path| -> io::Result<EpisodeAction> { Ok(EpisodeAction::Next) };

    let outcome = record_shape(
        &shape,
        &out,
        &mut camera,
        None,
        &fast_config(),
        &StopSignal::new(),
        &mut gate,
    )
    .unwrap();
    assert_eq!(outcome.episodes, 1);
    assert!(out.join("circle/episode_000/target").is_dir());
    assert!(!out.join("circle/episode_001").exists());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_target_stops_early_from_another_thread() {
    let root = shape_tree("stop-episode");
    let mut sink = DirectorySink::new(root.join("out")).unwrap();
    let mut camera = target_camera();
    let config = RecordConfig::default()
        .with_fps(50)
        .with_duration(Duration::from_secs(10));

    let stop = StopSignal::new();
    let stopper = {
        let stop = stop.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            stop.stop();
        })
    };

    let ticks = record_target(
        &mut camera,
        None,
        &root.join("circle").join("a.png"),
        0,
        &mut sink,
        &config,
        &stop,
    )
    .unwrap();
    stopper.join().unwrap();

    assert!(ticks < config.frame_count());
    assert_eq!(sink.written(), ticks);
    assert!(!camera.is_connected());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_record_target_reads_front_camera() {
    let root = shape_tree("front");
    let mut sink = DirectorySink::new(root.join("out")).unwrap();
    let mut camera = target_camera();
    let mut front = StaticCamera::new(StaticCameraConfig::default().with_source(
        ImageSource::Frame(Frame::from_raw(1, 1, ColorMode::Rgb, vec![1, 2, 3]).unwrap()),
    ))
    .unwrap();

    let ticks = record_target(
        &mut camera,
        Some(&mut front),
        &root.join("square").join("c.PNG"),
        4,
        &mut sink,
        &fast_config(),
        &StopSignal::new(),
    )
    .unwrap();

    assert_eq!(ticks, 2);
    assert_eq!(sink.written(), 4);
    assert!(root.join("out/episode_004/front/frame_000001.png").exists());
    assert!(!front.is_connected());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_directory_sink_layout() {
    let dir = test_dir("sink");
    let mut sink = DirectorySink::new(&dir).unwrap();

    let mut camera = StaticCamera::new(
        StaticCameraConfig::default().with_source(ImageSource::Frame(
            Frame::from_raw(2, 2, ColorMode::Rgb, vec![200, 10, 10].repeat(4)).unwrap(),
        )),
    )
    .unwrap();
    let mut session = CameraSession::open(&mut camera).unwrap();
    let mut cameras: [(&str, &mut dyn Camera); 1] = [("target", &mut *session)];

    let config = RecordConfig::default()
        .with_fps(100)
        .with_duration(Duration::from_millis(30));
    let ticks = record_episode(7, &mut cameras, &mut sink, &config, &StopSignal::new()).unwrap();
    assert_eq!(ticks, 3);
    assert_eq!(sink.written(), 3);

    let camera_dir = dir.join("episode_007").join("target");
    for i in 0..3 {
        let path = camera_dir.join(format!("frame_{i:06}.png"));
        let img = crates_image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1).0, [200, 10, 10]);
    }
    assert!(!camera_dir.join("frame_000003.png").exists());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_directory_sink_rejects_frame_outside_episode() {
    let dir = test_dir("no-episode");
    let mut sink = DirectorySink::new(&dir).unwrap();
    let frame = Frame::from_raw(1, 1, ColorMode::Rgb, vec![0, 0, 0]).unwrap();

    let err = sink.write_frame("target", 0, &frame).unwrap_err();
    assert!(matches!(err, CameraError::Sink(_)));

    sink.begin_episode(0).unwrap();
    sink.write_frame("target", 0, &frame).unwrap();
    sink.end_episode(0, 1).unwrap();
    assert!(sink.write_frame("target", 1, &frame).is_err());

    fs::remove_dir_all(&dir).ok();
}
