//! Rule assistant backed by the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::services::rule_assistant::{AssistantError, RuleAssistant, NO_GAME_CONTEXT};

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f64 = 0.3;

const RULES: &str = "\
Je bent een expert in het kaartspel 'Wiezen' (Belgische variant), scheidsrechter en strategie-adviseur.
Antwoord kort, bondig en in het Nederlands.

Puntenverdeling (per persoon, de winnaar krijgt dit van de verliezer):
- Alleen gaan (5 slagen): 2p + 1 per overslag.
- Vragen en meegaan (8 slagen): 2p + 1 per overslag, 13 slagen telt dubbel.
- Troel (8 slagen): 4p + 2 per overslag, 13 slagen = 20p.
- Abondance: 9 slagen = 4p, 10 = 7p, 11 = 8p, 12 = 9p.
- Miserie (0 slagen): 7p. Open miserie (0 slagen): 14p.
- Piccolo (1 slag): 5p.
- Solo (13 slagen): 25p. Solo slim (13 slagen): 30p.
- Na een ronde waarin iedereen past telt de volgende ronde dubbel.

Gebruik bij scoreberekening strikt bovenstaande tabel.";

pub struct GeminiAssistant {
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl GeminiAssistant {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at another models base URL, e.g. a proxy.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl RuleAssistant for GeminiAssistant {
    fn ask(&self, question: &str, context: Option<&str>) -> Result<String, AssistantError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(request_error)?;

        debug!(model = %self.model, "asking rule assistant");
        let response = client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(question, context))
            .send()
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(AssistantError::Request(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let reply: GenerateResponse = response.json().map_err(request_error)?;
        Ok(reply.text())
    }
}

fn request_error(e: reqwest::Error) -> AssistantError {
    if e.is_timeout() {
        AssistantError::Timeout
    } else {
        AssistantError::Request(e.to_string())
    }
}

fn system_instruction(context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_GAME_CONTEXT);
    format!("{RULES}\n\nHuidige spel context: {context}")
}

fn request_body(question: &str, context: Option<&str>) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": system_instruction(context) }] },
        "contents": [{ "role": "user", "parts": [{ "text": question }] }],
        "generationConfig": { "temperature": TEMPERATURE },
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate; empty when the model returned nothing.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
