//! Hosted talking-head provider client (job-based, D-ID-shaped API)
//!
//! Flow: POST a talk job with a source image and a text script, then poll
//! the job status once per second with a fixed attempt bound. Terminal
//! outcomes: done (result video URL), provider error, or attempt
//! exhaustion. No backoff, no jitter.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::errors::{CompanionError, Result};

/// Default provider API base URL
pub const DEFAULT_TALK_API_URL: &str = "https://api.d-id.com";

/// Default voice when none is configured
pub const DEFAULT_VOICE_ID: &str = "en-US-JennyNeural";

/// Polling interval between status checks
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Maximum status checks before giving up (~60 seconds)
const MAX_POLL_ATTEMPTS: u32 = 60;

/// Job status as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalkStatus {
    Created,
    Started,
    Done,
    Error,
}

#[derive(Debug, Deserialize)]
struct CreateTalkResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TalkStatusResponse {
    status: TalkStatus,
    result_url: Option<String>,
    error: Option<TalkError>,
}

#[derive(Debug, Deserialize)]
struct TalkError {
    message: Option<String>,
}

/// Hosted talking-head client
#[derive(Debug, Clone)]
pub struct TalkClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TalkClient {
    /// Create a client with the default provider endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_TALK_API_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(CompanionError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a talk job and return its id
    pub async fn create_talk(
        &self,
        image_url: &str,
        text: &str,
        voice_id: &str,
    ) -> Result<String> {
        let url = format!("{}/talks", self.base_url);

        let body = json!({
            "source_url": image_url,
            "script": {
                "type": "text",
                "input": text,
                "provider": {
                    "type": "microsoft",
                    "voice_id": voice_id,
                },
            },
            "config": {
                "fluent": true,
                "pad_audio": 0,
                "stitch": true,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Basic {}", self.api_key))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        match response.status().as_u16() {
            401 => {
                return Err(CompanionError::Video(
                    "Invalid API key for the video provider".to_string(),
                ))
            }
            402 => {
                return Err(CompanionError::Video(
                    "Insufficient credits on the video provider account".to_string(),
                ))
            }
            _ if !response.status().is_success() => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(CompanionError::Video(format!(
                    "Failed to create talk: HTTP {} {}",
                    status, text
                )));
            }
            _ => {}
        }

        let created: CreateTalkResponse = response
            .json()
            .await
            .map_err(|e| CompanionError::MalformedResponse(e.to_string()))?;
        Ok(created.id)
    }

    /// Poll a talk job until it finishes and return the result video URL.
    ///
    /// Fixed 1-second interval, bounded attempts; returns a `Timeout`
    /// error when the bound is exhausted without a terminal status.
    pub async fn wait_for_video(&self, talk_id: &str) -> Result<String> {
        let url = format!("{}/talks/{}", self.base_url, talk_id);

        for _ in 0..MAX_POLL_ATTEMPTS {
            tokio::time::sleep(POLL_INTERVAL).await;

            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Basic {}", self.api_key))
                .header("Accept", "application/json")
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(CompanionError::Video(
                    "Failed to check video status".to_string(),
                ));
            }

            let status: TalkStatusResponse = response
                .json()
                .await
                .map_err(|e| CompanionError::MalformedResponse(e.to_string()))?;

            match status.status {
                TalkStatus::Done => {
                    return status.result_url.ok_or_else(|| {
                        CompanionError::MalformedResponse(
                            "done status without result_url".to_string(),
                        )
                    })
                }
                TalkStatus::Error => {
                    let message = status
                        .error
                        .and_then(|e| e.message)
                        .unwrap_or_else(|| "Video generation failed".to_string());
                    return Err(CompanionError::Video(message));
                }
                TalkStatus::Created | TalkStatus::Started => {}
            }
        }

        Err(CompanionError::Timeout {
            attempts: MAX_POLL_ATTEMPTS,
        })
    }

    /// Create a talk and wait for the rendered video URL
    pub async fn generate(&self, image_url: &str, text: &str, voice_id: &str) -> Result<String> {
        let talk_id = self.create_talk(image_url, text, voice_id).await?;
        self.wait_for_video(&talk_id).await
    }

    /// Validate the API key against the credits endpoint
    pub async fn validate_key(&self) -> Result<bool> {
        let url = format!("{}/credits", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Basic {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// A selectable provider voice
#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
}

/// Microsoft neural voices offered per companion gender
pub struct VoiceCatalog;

impl VoiceCatalog {
    pub fn female() -> &'static [Voice] {
        &[
            Voice { id: "en-US-JennyNeural", name: "Jenny (US Female)" },
            Voice { id: "en-US-AriaNeural", name: "Aria (US Female)" },
            Voice { id: "en-US-SaraNeural", name: "Sara (US Female)" },
            Voice { id: "en-GB-SoniaNeural", name: "Sonia (UK Female)" },
            Voice { id: "en-AU-NatashaNeural", name: "Natasha (AU Female)" },
        ]
    }

    pub fn male() -> &'static [Voice] {
        &[
            Voice { id: "en-US-GuyNeural", name: "Guy (US Male)" },
            Voice { id: "en-US-DavisNeural", name: "Davis (US Male)" },
            Voice { id: "en-US-TonyNeural", name: "Tony (US Male)" },
            Voice { id: "en-GB-RyanNeural", name: "Ryan (UK Male)" },
            Voice { id: "en-AU-WilliamNeural", name: "William (AU Male)" },
        ]
    }
}
