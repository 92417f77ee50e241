use cali_base::log;
use cali_camera::{Camera, CameraSession, StaticCamera, StaticCameraConfig};
use minifb::{Key, Window, WindowOptions};
use static_view::frame_to_argb;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cali_base::init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image> [width height]", args[0]);
        std::process::exit(1);
    }

    let mut config = StaticCameraConfig::default().with_path(&args[1]);
    if let (Some(w), Some(h)) = (args.get(2), args.get(3)) {
        config = config.with_width(w.parse()?).with_height(h.parse()?);
    }

    let mut camera = StaticCamera::new(config)?;
    let mut session = CameraSession::open(&mut camera)?;
    let (width, height) = (
        session.width().unwrap_or_default(),
        session.height().unwrap_or_default(),
    );
    log::info!("Static view {}x{} - ESC to exit", width, height);

    let mut window = Window::new(
        "Static View - ESC to exit",
        width,
        height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(session.fps() as usize);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame = session.read(None)?;
        window.update_with_buffer(&frame_to_argb(&frame), frame.width(), frame.height())?;
    }

    log::info!("Exiting...");
    Ok(())
}
