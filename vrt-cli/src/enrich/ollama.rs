//! Ollama generate-endpoint client.

use reqwest::Client;
use serde_json::{json, Value};

use super::{EnrichError, SuggestionProvider};
use crate::config::EnrichSettings;

/// Client for `POST <base_url>/api/generate` with streaming disabled.
pub struct OllamaClient {
    http_client: Client,
    endpoint: String,
    model: String,
    temperature: Option<f64>,
}

impl OllamaClient {
    pub fn new(settings: &EnrichSettings) -> Result<Self, EnrichError> {
        let http_client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: generate_endpoint(&settings.base_url),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });
        if let Some(temperature) = self.temperature {
            body["options"] = json!({ "temperature": temperature });
        }
        body
    }
}

fn generate_endpoint(base_url: &str) -> String {
    format!("{}/api/generate", base_url.trim_end_matches('/'))
}

fn parse_response(body: &Value) -> Result<String, EnrichError> {
    body.get("response")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(EnrichError::MalformedResponse { field: "response" })
}

impl SuggestionProvider for OllamaClient {
    async fn suggest(&self, prompt: &str) -> Result<String, EnrichError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Status { status, body });
        }

        let body: Value = response.json().await?;
        parse_response(&body)
    }
}
