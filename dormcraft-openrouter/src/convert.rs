use serde_json::{json, Value};

use crate::error::OpenRouterError;
use crate::types::{Completion, OpenRouterRequest, TokenUsage};

/// Builds the JSON request body for the OpenRouter API.
pub fn build_request_body(request: &OpenRouterRequest) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system {
        messages.push(json!({
            "role": "system",
            "content": system
        }));
    }
    messages.push(json!({
        "role": "user",
        "content": request.prompt
    }));

    let mut body = json!({
        "model": request.model,
        "messages": messages
    });

    if let Some(params) = &request.params {
        if let Some(temp) = params.temperature {
            body["temperature"] = json!(temp);
        }
        if let Some(max) = params.max_tokens {
            body["max_tokens"] = json!(max);
        }
    }

    body
}

/// Extracts text from a message `content`, which is either a plain string or
/// an array of typed parts.
fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter(|p| p.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.join(""))
            }
        }
        _ => None,
    }
}

/// Parses an OpenRouter chat-completions response into a [`Completion`].
pub fn parse_response(response: &Value) -> Result<Completion, OpenRouterError> {
    let choice = response
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| OpenRouterError::Api {
            status: 0,
            message: "No choices in response".to_string(),
        })?;

    let message = choice.get("message").ok_or_else(|| OpenRouterError::Api {
        status: 0,
        message: "No message in choice".to_string(),
    })?;

    let text = message
        .get("content")
        .and_then(content_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(OpenRouterError::EmptyResponse)?;

    let model = response
        .get("model")
        .and_then(|m| m.as_str())
        .map(String::from);

    let stop_reason = choice
        .get("finish_reason")
        .and_then(|r| r.as_str())
        .map(String::from);

    let usage = response.get("usage").map(|u| TokenUsage {
        input_tokens: u.get("prompt_tokens").and_then(|t| t.as_u64()),
        output_tokens: u.get("completion_tokens").and_then(|t| t.as_u64()),
    });

    Ok(Completion {
        text,
        model,
        stop_reason,
        usage,
    })
}
