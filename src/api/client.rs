use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use crate::config::StudioSettings;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("backend request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
}

/// One movement inside a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub rest: String,
}

/// One training day inside a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A program as returned by the backend. Timestamps stay raw ISO 8601
/// strings; the format module owns turning them into display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shared_by: String,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Creation payload for POST /api/v1/programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDraft {
    pub name: String,
    pub shared_by: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    settings: StudioSettings,
}

impl ApiClient {
    pub fn new(settings: StudioSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            settings,
        }
    }

    /// Fetches the full program collection. Backend order is preserved
    /// untouched as display order.
    pub async fn list_programs(&self) -> Result<Vec<Program>, ApiClientError> {
        let url = self.endpoint_url("");
        debug!(url = %url, "listing programs");

        let response = self.bounded(self.http_client.get(&url).send()).await?;
        let response = ensure_success(response).await?;
        Ok(self.bounded(response.json::<Vec<Program>>()).await?)
    }

    pub async fn get_program(&self, id: &str) -> Result<Program, ApiClientError> {
        let url = self.endpoint_url(&format!("/{id}"));
        debug!(url = %url, "fetching program");

        let response = self.bounded(self.http_client.get(&url).send()).await?;
        let response = ensure_success(response).await?;
        Ok(self.bounded(response.json::<Program>()).await?)
    }

    pub async fn create_program(&self, draft: &ProgramDraft) -> Result<Program, ApiClientError> {
        let url = self.endpoint_url("");
        debug!(url = %url, name = %draft.name, "creating program");

        let response = self
            .bounded(self.http_client.post(&url).json(draft).send())
            .await?;
        let response = ensure_success(response).await?;
        Ok(self.bounded(response.json::<Program>()).await?)
    }

    fn endpoint_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/programs{suffix}",
            self.settings.api_base_url.trim_end_matches('/')
        )
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, ApiClientError>
    where
        F: Future<Output = Result<T, reqwest::Error>>,
    {
        let timeout_duration = Duration::from_millis(self.settings.request_timeout_ms);
        match timeout(timeout_duration, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ApiClientError::Timeout {
                timeout_ms: self.settings.request_timeout_ms,
            }),
        }
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error response body>".to_owned());
    Err(ApiClientError::HttpStatus { status, body })
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, Day, Exercise, Program, ProgramDraft};
    use crate::config::StudioSettings;

    fn client_with_base_url(base_url: &str) -> ApiClient {
        ApiClient::new(StudioSettings {
            api_base_url: base_url.to_owned(),
            request_timeout_ms: 1_000,
        })
    }

    #[test]
    fn endpoint_url_joins_without_duplicate_slash() {
        let client = client_with_base_url("http://localhost:8080/");
        assert_eq!(
            client.endpoint_url(""),
            "http://localhost:8080/api/v1/programs"
        );
        assert_eq!(
            client.endpoint_url("/p-1"),
            "http://localhost:8080/api/v1/programs/p-1"
        );
    }

    #[test]
    fn program_deserializes_backend_field_names() {
        let payload = r#"{
            "id": "p-1",
            "name": "Push Pull Legs",
            "shared_by": "coach",
            "days": [
                {
                    "id": "d-1",
                    "program_id": "p-1",
                    "name": "Push",
                    "exercises": [
                        {"id": "e-1", "day_id": "d-1", "name": "Bench", "sets": 3, "reps": "8-10", "rest": "120s"}
                    ]
                }
            ],
            "created_at": "2023-01-15T10:00:00Z",
            "updated_at": "2023-01-15T10:00:00Z"
        }"#;

        let program: Program = serde_json::from_str(payload).expect("payload should deserialize");
        assert_eq!(program.id, "p-1");
        assert_eq!(program.shared_by, "coach");
        assert_eq!(program.created_at, "2023-01-15T10:00:00Z");
        assert_eq!(program.days.len(), 1);
        assert_eq!(program.days[0].exercises[0].reps, "8-10");
    }

    #[test]
    fn program_tolerates_missing_optional_fields() {
        let program: Program = serde_json::from_str(r#"{"id": "p-2", "name": "Cardio"}"#)
            .expect("minimal payload should deserialize");
        assert_eq!(program.name, "Cardio");
        assert!(program.days.is_empty());
        assert_eq!(program.created_at, "");
    }

    #[test]
    fn draft_serializes_backend_field_names() {
        let draft = ProgramDraft {
            name: "5x5".to_owned(),
            shared_by: "me".to_owned(),
            days: vec![Day {
                id: String::new(),
                name: "A".to_owned(),
                exercises: vec![Exercise {
                    name: "Squat".to_owned(),
                    sets: 5,
                    reps: "5".to_owned(),
                    ..Exercise::default()
                }],
            }],
        };

        let value = serde_json::to_value(&draft).expect("draft should serialize");
        assert_eq!(value["shared_by"], "me");
        assert_eq!(value["days"][0]["exercises"][0]["sets"], 5);
    }
}
