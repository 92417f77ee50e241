use cali_base::log;
use cali_image::ClipSpec;
use gen_clips::{plan_clips, run_job};
use std::path::PathBuf;

const DEFAULT_PNG_ROOT: &str = "png";
const DEFAULT_OUTPUT_ROOT: &str = "videos";
const WIDTH: usize = 640;
const HEIGHT: usize = 480;
const FPS: u32 = 30;
const DURATION_S: u32 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cali_base::init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    let png_root = PathBuf::from(args.get(1).map(|s| s.as_str()).unwrap_or(DEFAULT_PNG_ROOT));
    let out_root = PathBuf::from(args.get(2).map(|s| s.as_str()).unwrap_or(DEFAULT_OUTPUT_ROOT));

    let spec = ClipSpec::default()
        .with_width(WIDTH)
        .with_height(HEIGHT)
        .with_fps(FPS)
        .with_duration_secs(DURATION_S);

    let jobs = plan_clips(&png_root, &out_root)?;
    log::info!("{} clips to write from {}", jobs.len(), png_root.display());

    let mut failed = 0;
    for job in &jobs {
        match run_job(job, &spec) {
            Ok(_) => log::info!("clip created: {}", job.output.display()),
            Err(e) => {
                failed += 1;
                log::warn!("skipping {}: {}", job.source.display(), e);
            }
        }
    }

    log::info!("done, {} written, {} skipped", jobs.len() - failed, failed);
    Ok(())
}
