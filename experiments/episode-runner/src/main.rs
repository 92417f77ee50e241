use cali_base::log;
use cali_camera::{Camera, RecordConfig, StaticCamera, StaticCameraConfig, StopSignal};
use episode_runner::{plan_shapes, record_shape, spawn_interrupt_watcher, wait_for_action};
use std::path::Path;
use std::time::Duration;

const FPS: u32 = 30;
const EPISODE_SECS: u64 = 15;
const WIDTH: usize = 640;
const HEIGHT: usize = 480;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cali_base::init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    let out_root = Path::new(args.get(1).map(String::as_str).unwrap_or("local_datasets"));
    let png_root = Path::new(args.get(2).map(String::as_str).unwrap_or("png"));

    let shapes = plan_shapes(png_root)?;
    if shapes.is_empty() {
        cali_base::log_fatal!("no shape directories under {}", png_root.display());
    }
    log::info!("{} shape(s) under {}", shapes.len(), png_root.display());

    let record = RecordConfig::default()
        .with_fps(FPS)
        .with_duration(Duration::from_secs(EPISODE_SECS));
    let stop = StopSignal::new();
    spawn_interrupt_watcher(stop.clone())?;

    let mut target = StaticCamera::new(
        StaticCameraConfig::default()
            .with_width(WIDTH)
            .with_height(HEIGHT)
            .with_fps(FPS),
    )?;

    #[cfg(feature = "v4l2")]
    let mut front_camera = cali_camera::V4l2Camera::new(
        cali_camera::DeviceCameraConfig::default()
            .with_device("/dev/video0")
            .with_fps(FPS),
    );
    #[cfg(feature = "v4l2")]
    let mut front: Option<&mut dyn Camera> = Some(&mut front_camera);
    #[cfg(not(feature = "v4l2"))]
    let mut front: Option<&mut dyn Camera> = None;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut gate = |image: &Path| {
        println!("\nNext target: {}", image.display());
        wait_for_action(&mut input)
    };

    for shape in &shapes {
        if shape.images.is_empty() {
            log::warn!("no target images for '{}', skipping", shape.shape);
            continue;
        }

        let outcome = record_shape(
            shape,
            out_root,
            &mut target,
            front.as_deref_mut(),
            &record,
            &stop,
            &mut gate,
        )?;
        log::info!("dataset '{}': {} episode(s)", shape.shape, outcome.episodes);
        if outcome.quit {
            break;
        }
    }

    log::info!("done");
    Ok(())
}
