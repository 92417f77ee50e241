use cali_arm::{run_calibration, ArmClient, CALIBRATION_POSES};
use cali_base::{log, log_fatal};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://192.168.0.37";
const DEFAULT_ROBOT_ID: u32 = 0;
const SETTLE: Duration = Duration::from_secs(2);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cali_base::init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    let base_url = args.get(1).map(|s| s.as_str()).unwrap_or(DEFAULT_BASE_URL);
    let robot_id = match args.get(2) {
        Some(id) => id.parse()?,
        None => DEFAULT_ROBOT_ID,
    };

    log::info!("Calibrating arm {} at {}", robot_id, base_url);
    let client = ArmClient::new(base_url)?;

    if let Err(e) = run_calibration(&client, robot_id, &CALIBRATION_POSES, SETTLE).await {
        log_fatal!("calibration failed: {}", e);
    }

    log::info!("Calibration done");
    Ok(())
}
