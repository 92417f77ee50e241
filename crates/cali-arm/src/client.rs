use crate::{ArmError, CalibrationPose, JointPose};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use std::time::Duration;

/// HTTP client for the arm controller's REST endpoints.
#[derive(Clone, Debug)]
pub struct ArmClient {
    client: Client,
    base_url: String,
}

impl ArmClient {
    /// Create a client for the controller at `base_url` (e.g. `http://192.168.0.37`).
    ///
    /// # Errors
    ///
    /// Returns `ArmError::Url` if `base_url` is not an http or https URL.
    pub fn new(base_url: &str) -> Result<Self, ArmError> {
        let url = Url::parse(base_url).map_err(|e| ArmError::Url(format!("{base_url}: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ArmError::Url(format!("{base_url}: scheme must be http or https")));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<String, ArmError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ArmError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Move the arm to its init pose. Returns the response body.
    pub async fn init(&self) -> Result<String, ArmError> {
        let response = self.client.post(self.endpoint("/move/init")).send().await?;
        Self::check(response).await
    }

    /// Command all joints of `robot_id` to `pose`. Returns the response body.
    pub async fn write_joints(&self, robot_id: u32, pose: &JointPose) -> Result<String, ArmError> {
        let response = self
            .client
            .post(self.endpoint("/joints/write"))
            .query(&[("robot_id", robot_id)])
            .header(ACCEPT, "application/json")
            .json(pose)
            .send()
            .await?;
        Self::check(response).await
    }
}

/// Send the arm to init, then through `poses`, waiting `settle` after each move.
///
/// Stops at the first failed request; the poses already reached stay reached.
pub async fn run_calibration(
    client: &ArmClient,
    robot_id: u32,
    poses: &[CalibrationPose],
    settle: Duration,
) -> Result<(), ArmError> {
    let body = client.init().await?;
    log::info!("init: {body}");
    tokio::time::sleep(settle).await;

    for step in poses {
        let body = client.write_joints(robot_id, &step.pose).await?;
        log::info!("{}: {body}", step.name);
        tokio::time::sleep(settle).await;
    }

    Ok(())
}
