use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::error::ApiError;
use crate::api::payload::ProjectPayload;
use crate::config::ApiConfig;

pub const SURVEYS_PATH: &str = "/api/projects/surveys/";

/// Server acknowledgement of a created project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAck {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ProjectAck {
    pub fn id(&self) -> Option<&serde_json::Value> {
        self.body.get("id")
    }
}

/// Backend that accepts a finished survey.
pub trait ProjectApi {
    fn create_project(&self, payload: &ProjectPayload) -> Result<ProjectAck, ApiError>;
}

/// Blocking HTTP client posting JSON to `{base_url}/api/projects/surveys/`.
pub struct HttpProjectApi {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpProjectApi {
    pub fn new(config: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SURVEYS_PATH)
    }
}

impl ProjectApi for HttpProjectApi {
    fn create_project(&self, payload: &ProjectPayload) -> Result<ProjectAck, ApiError> {
        let body = serde_json::to_string(payload)?;
        let url = self.endpoint();
        debug!(%url, questions = payload.questions.len(), "posting survey");

        let mut request = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        match request.send_string(&body) {
            Ok(response) => {
                let status = response.status();
                let text = response
                    .into_string()
                    .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
                let body = if text.trim().is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_str(&text)
                        .map_err(|err| ApiError::InvalidResponse(err.to_string()))?
                };
                info!(status, "survey created");
                Ok(ProjectAck { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                warn!(status, "survey rejected by server");
                Err(ApiError::rejected(status, text))
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(error = %transport, "survey request failed");
                Err(ApiError::Network(transport.to_string()))
            }
        }
    }
}
