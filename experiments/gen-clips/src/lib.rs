//! Turns `<png_root>/<shape>/<name>.png` stills into
//! `<out_root>/<shape>/<name>.gif` clips of the still repeated.

use cali_image::{ClipSpec, ImageError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_png(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// One job per PNG found one level below each shape directory of `png_root`.
/// Loose files directly in `png_root` are ignored.
pub fn plan_clips(png_root: &Path, out_root: &Path) -> io::Result<Vec<ClipJob>> {
    let mut jobs = Vec::new();

    for shape_dir in sorted_entries(png_root)? {
        if !shape_dir.is_dir() {
            continue;
        }
        let Some(shape) = shape_dir.file_name() else {
            continue;
        };

        for png in sorted_entries(&shape_dir)? {
            if !is_png(&png) {
                continue;
            }
            let Some(stem) = png.file_stem() else {
                continue;
            };
            let output = out_root
                .join(shape)
                .join(format!("{}.gif", stem.to_string_lossy()));
            jobs.push(ClipJob {
                source: png,
                output,
            });
        }
    }

    Ok(jobs)
}

/// Decode the job's still and write its clip, creating the output directory.
pub fn run_job(job: &ClipJob, spec: &ClipSpec) -> Result<usize, ImageError> {
    if let Some(parent) = job.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = fs::read(&job.source)?;
    let frame = cali_image::decode_frame(&bytes)?;
    cali_image::clip::write_static_clip_file(&frame, spec, &job.output)
}
