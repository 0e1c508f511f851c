use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Response;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, ClassificationDecision, Entry};

use super::client::TransportError;

static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*(.*?)\s*```$").expect("valid code fence regex")
});

pub fn build_prompt(entry: &Entry) -> String {
    format!(
        r#"You sort password-manager logins into folders.
Pick exactly one category from this list:
{categories}

Reply with a single JSON object and nothing else, for example:
{{"category": "Finance", "confidence": 0.85}}
"confidence" is a number between 0.0 and 1.0.

URL: {login_uri}
Name: {name}

Response:"#,
        categories = Category::format_for_prompt(),
        login_uri = entry.login_uri(),
        name = entry.name(),
    )
}

pub fn build_generate_request<'a>(model: &'a str, prompt: &'a str) -> GenerateRequest<'a> {
    GenerateRequest {
        model,
        prompt,
        stream: false,
        format: Some("json"),
        options: GenerateOptions { temperature: 0.0 },
    }
}

pub async fn parse_generate_response(response: Response) -> Result<String, TransportError> {
    let completion: GenerateResponse = response
        .json()
        .await
        .map_err(|err| TransportError::Decode(err.to_string()))?;
    Ok(completion.response)
}

/// Parses the model text as a decision. Tolerates surrounding whitespace and a
/// single Markdown code fence around the JSON object.
pub fn parse_decision(raw: &str) -> Result<ClassificationDecision, serde_json::Error> {
    let trimmed = raw.trim();
    let body = CODE_FENCE_REGEX
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);
    serde_json::from_str(body)
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a str>,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
pub struct TagModel {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct PullResponse {
    #[serde(default)]
    pub status: String,
}
