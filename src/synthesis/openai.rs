//! OpenAI speech endpoint client

use super::Synthesizer;
use crate::{
    config::{SynthesisConfig, Voice},
    Error, Result,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// Synthesizer backed by `POST {api_base}/audio/speech`
pub struct OpenAiSynthesizer {
    client: Client,
    config: SynthesisConfig,
    api_key: String,
}

impl OpenAiSynthesizer {
    /// Create a client, reading the API key from `config.api_key_env`
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            Error::Config(format!(
                "{} environment variable not set",
                config.api_key_env
            ))
        })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(config: SynthesisConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    /// Check that the API key is accepted by listing models
    pub async fn verify(&self) -> Result<()> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Collaborator(format!(
                "API key rejected (status: {})",
                status.as_u16()
            )));
        }

        log::debug!("API key accepted by {}", self.config.api_base);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Synthesizer for OpenAiSynthesizer {
    async fn synthesize(&self, text: &str, voice: &Voice) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput("empty text chunk".into()));
        }

        let request = SpeechRequest {
            model: &self.config.model,
            input: text,
            voice: voice.as_str(),
            response_format: &self.config.response_format,
        };

        let response = self
            .client
            .post(self.endpoint("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("Speech endpoint response: {}", body);
            return Err(Error::Collaborator(format!(
                "TTS request failed (status {}): {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(Error::Collaborator("generated audio is empty".into()));
        }

        Ok(audio.to_vec())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;

    fn synthesizer() -> OpenAiSynthesizer {
        let config = SynthesisConfig {
            api_base: "http://127.0.0.1:9/v1/".into(),
            ..Default::default()
        };
        OpenAiSynthesizer::with_api_key(config, "test-key").unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let synth = synthesizer();
        assert_eq!(synth.endpoint("audio/speech"), "http://127.0.0.1:9/v1/audio/speech");
        assert_eq!(synth.endpoint("models"), "http://127.0.0.1:9/v1/models");
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = OpenAiSynthesizer::with_api_key(SynthesisConfig::default(), "  ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_key_variable() {
        let config = SynthesisConfig {
            api_key_env: "STORYVOICE_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        let err = OpenAiSynthesizer::new(config).err().unwrap();
        assert!(err.to_string().contains("STORYVOICE_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_request_payload() {
        let request = SpeechRequest {
            model: "tts-1-hd",
            input: "Hello.",
            voice: "nova",
            response_format: "mp3",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "tts-1-hd",
                "input": "Hello.",
                "voice": "nova",
                "response_format": "mp3"
            })
        );
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_request() {
        let synth = synthesizer();
        let voice = Catalog::builtin().voice("alloy").unwrap();
        let err = synth.synthesize(" \n\t", &voice).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EmptyInput);
    }
}
