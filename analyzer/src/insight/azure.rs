//! # Azure OpenAI Insight Strategy
//!
//! Default implementation of the [`Insight`] trait: sends the submitted code,
//! the projected requirements, and the computed score to an Azure OpenAI chat
//! completions deployment and returns the model's critique.
//!
//! Behavior contract:
//! - A perfect score short-circuits to a fixed success message with no network call.
//! - When the analysis focus requests a line count, the response is truncated or
//!   padded to exactly that many lines.
//! - Any transport or decode failure degrades to the fixed retry message; the
//!   analysis run itself never aborts because the model was unavailable.
//!
//! Credentials and the deployment name come from [`util::config::AppConfig`]
//! (`AZURE_OPENAI_API_KEY`, `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_VERSION`,
//! `AZURE_OPENAI_MODEL`).

use crate::error::AnalyzerError;
use crate::insight::{
    ALL_PASSED_MESSAGE, GENERATION_FAILED_MESSAGE, Insight, InsightRequest, clamp_to_line_count,
    requested_line_count,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use util::config::AppConfig;

/// Azure OpenAI chat-completions insight strategy.
pub struct AzureInsight;

/// Request body for the chat completions endpoint.
#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response from the chat completions endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl AzureInsight {
    fn build_prompt(request: &InsightRequest<'_>, line_count: Option<usize>) -> String {
        let closing = match line_count {
            Some(n) => format!("Limit your response to exactly {n} lines."),
            None => "Present your analysis as clear bullet points.".to_string(),
        };

        format!(
            r#"You are an expert code reviewer and evaluator with a focus on clarity and precision.
Review the following student submission.

Requirements:
{}

Student's Code:
{}

Test case score: {:.0}%

Your analysis must:
- Clearly evaluate the code correctness, pointing out any syntax or logical errors.
- Examine the code structure, including class definitions, method implementations, and adherence to coding standards.
- Identify specific missing elements if any.
- Provide actionable, precise recommendations for improvement.
- Explain how the code deviates from the requirements.

{}
"#,
            request.requirements.question_text, request.code, request.score, closing
        )
    }

    async fn request_completion(&self, prompt: String) -> Result<String, AnalyzerError> {
        let (endpoint, api_key, api_version, model) = {
            let cfg = AppConfig::global();
            (
                cfg.azure_openai_endpoint.clone(),
                cfg.azure_openai_api_key.clone(),
                cfg.azure_openai_api_version.clone(),
                cfg.azure_openai_model.clone(),
            )
        };

        if endpoint.is_empty() || api_key.is_empty() || model.is_empty() {
            return Err(AnalyzerError::Insight(
                "Azure OpenAI credentials are not configured".to_string(),
            ));
        }

        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a precise and concise code reviewer. Provide clear, step-by-step analysis."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 900,
        };

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            model,
            api_version
        );

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .header("api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzerError::Insight(e.to_string()))?;

        let response_text = response
            .text()
            .await
            .map_err(|e| AnalyzerError::Insight(e.to_string()))?;
        let response = serde_json::from_str::<ChatResponse>(&response_text).map_err(|e| {
            AnalyzerError::Insight(format!(
                "error decoding response body: {}. Full response: {}",
                e, response_text
            ))
        })?;

        response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| AnalyzerError::Insight("response contained no choices".to_string()))
    }
}

#[async_trait]
impl Insight for AzureInsight {
    async fn generate(&self, request: &InsightRequest<'_>) -> Result<String, AnalyzerError> {
        dotenvy::dotenv().ok();

        if request.score == 100.0 {
            return Ok(ALL_PASSED_MESSAGE.to_string());
        }

        let line_count = requested_line_count(request.focus_prompt);
        let prompt = Self::build_prompt(request, line_count);

        match self.request_completion(prompt).await {
            Ok(analysis) => Ok(match line_count {
                Some(count) => clamp_to_line_count(&analysis, count),
                None => analysis,
            }),
            Err(err) => {
                log::warn!("Azure OpenAI request failed: {err}");
                Ok(GENERATION_FAILED_MESSAGE.to_string())
            }
        }
    }
}
