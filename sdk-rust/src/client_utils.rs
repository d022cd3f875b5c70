use crate::{ApiEnvelope, ClientError, ClientResult};
use reqwest::RequestBuilder;
use serde_json::Value;

/// Send a JSON request, parse the `{status, message, data}` envelope.
/// Returns an error on non-success status codes, carrying the `message`
/// field of the error body when there is one.
pub async fn send_json(request: RequestBuilder) -> ClientResult<ApiEnvelope> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::StatusCode(status, error_message(&body)));
    }

    Ok(response.json::<ApiEnvelope>().await?)
}

/// Extract the human-readable `message` of an error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

/// Read a JSON value as an identifier. The service sends ids either as
/// strings or as numbers.
pub fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Read a JSON value as an integer. Numbers, floats (truncated) and numeric
/// strings are accepted, anything else is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn value_to_i64(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number as i64))
        .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
        .unwrap_or(0)
}
