use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const SCREENING_KEY_HEADER: &str = "x-screening-key";

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("screening service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("screening service unavailable after {retries} attempts")]
    Exhausted { retries: u32 },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRequest<'a> {
    pub email: &'a str,
    pub candidate_id: Uuid,
}

/// Client for the screening service's `/candidate_screening` endpoint.
#[derive(Clone)]
pub struct ScreeningClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ScreeningClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ScreeningError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: screening_endpoint(base_url),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the service to screen a candidate. Retries 429 and 5xx responses
    /// and transport errors with exponential backoff.
    pub async fn request_screening(
        &self,
        email: &str,
        candidate_id: Uuid,
    ) -> Result<(), ScreeningError> {
        let body = ScreeningRequest {
            email,
            candidate_id,
        };
        let mut last_error: Option<ScreeningError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff(attempt);
                warn!(
                    "Screening request attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&body);
            if let Some(key) = &self.api_key {
                request = request.header(SCREENING_KEY_HEADER, key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ScreeningError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Screening service returned {}: {}", status, message);
                last_error = Some(ScreeningError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                return Err(ScreeningError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            debug!("Screening requested for candidate {candidate_id}");
            return Ok(());
        }

        Err(last_error.unwrap_or(ScreeningError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}

fn screening_endpoint(base_url: &str) -> String {
    format!("{}/candidate_screening", base_url.trim_end_matches('/'))
}

/// 1s, 2s, 4s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << (attempt.saturating_sub(1))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            screening_endpoint("http://screener:5000/"),
            "http://screener:5000/candidate_screening"
        );
        let client = ScreeningClient::new("http://screener:5000", None).unwrap();
        assert_eq!(client.endpoint(), "http://screener:5000/candidate_screening");
    }

    #[test]
    fn test_payload_shape() {
        let id = Uuid::nil();
        let body = serde_json::to_value(ScreeningRequest {
            email: "asha@example.com",
            candidate_id: id,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "email": "asha@example.com",
                "candidateId": "00000000-0000-0000-0000-000000000000"
            })
        );
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(2), Duration::from_secs(2));
        assert_eq!(backoff(3), Duration::from_secs(4));
    }
}
