//! Self-hosted talker server client (SadTalker-style)
//!
//! The server either accepts a recorded audio clip (`POST /talk`,
//! multipart) or synthesizes speech itself from text (`POST /speak`,
//! JSON); both return the rendered MP4 directly as the response body.

use reqwest::multipart;
use reqwest::Client;
use serde_json::json;

use crate::errors::{CompanionError, Result};

/// Client for a self-hosted talking-head server
#[derive(Debug, Clone)]
pub struct LocalTalkerClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LocalTalkerClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().build().map_err(CompanionError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Send a recorded audio clip to `/talk`, returning the MP4 bytes
    pub async fn send_audio(&self, audio: Vec<u8>, file_name: &str) -> Result<Vec<u8>> {
        let url = format!("{}/talk", self.base_url);

        let part = multipart::Part::bytes(audio).file_name(file_name.to_string());
        let form = multipart::Form::new().part("audio", part);

        let mut request = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CompanionError::Video(format!(
                "Talker server error: {} {}",
                status, text
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Ask the server to synthesize `text` (optionally with a named voice)
    /// and render the talking head, returning the MP4 bytes
    pub async fn speak(&self, text: &str, voice: Option<&str>) -> Result<Vec<u8>> {
        let url = format!("{}/speak", self.base_url);

        let mut request = self
            .client
            .post(&url)
            .json(&json!({ "text": text, "voice": voice }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CompanionError::Video(format!(
                "Talker speak error: {} {}",
                status, text
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
