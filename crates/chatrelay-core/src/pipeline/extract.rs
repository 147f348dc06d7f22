//! Completion text extraction from the backend response envelope.

use serde_json::Value;

use crate::domain::ExtractedCompletion;
use crate::error::RelayError;

/// Pull the first choice's text, the model and usage out of `body`.
///
/// `default_model` is reported when the backend does not name one. Usage is
/// passed through as-is and its absence is not an error.
pub fn extract_completion(
    body: &Value,
    default_model: &str,
) -> Result<ExtractedCompletion, RelayError> {
    let first = first_choice(body).ok_or(RelayError::NoChoicesReturned)?;

    let text = first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(RelayError::EmptyCompletion)?;

    let model = body
        .get("model")
        .and_then(Value::as_str)
        .filter(|model| !model.is_empty())
        .unwrap_or(default_model);

    let usage = body.get("usage").filter(|usage| !usage.is_null()).cloned();

    Ok(ExtractedCompletion {
        text: text.to_string(),
        model: model.to_string(),
        usage,
    })
}

/// Content of the first choice, used by the connectivity probe.
///
/// A `choices` array is required; an empty array or a first choice without
/// text yields `None` rather than an error.
pub fn probe_content(body: &Value) -> Result<Option<String>, RelayError> {
    let choices = body
        .get("choices")
        .and_then(Value::as_array)
        .ok_or(RelayError::NoChoicesReturned)?;

    Ok(choices
        .first()
        .and_then(|choice| choice.pointer("/message/content"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string))
}

fn first_choice(body: &Value) -> Option<&Value> {
    body.get("choices")?.as_array()?.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_trimmed_text_model_and_usage() {
        let body = json!({
            "choices": [{ "message": { "content": " Hi there! " } }],
            "model": "mistral-7b",
            "usage": { "total_tokens": 12 }
        });

        let extracted = extract_completion(&body, "mistral").unwrap();
        assert_eq!(extracted.text, "Hi there!");
        assert_eq!(extracted.model, "mistral-7b");
        assert_eq!(extracted.usage, Some(json!({ "total_tokens": 12 })));
    }

    #[test]
    fn test_missing_model_and_usage_fall_back() {
        let body = json!({ "choices": [{ "message": { "content": "ok" } }] });
        let extracted = extract_completion(&body, "mistral").unwrap();
        assert_eq!(extracted.model, "mistral");
        assert_eq!(extracted.usage, None);

        let body = json!({ "choices": [{ "message": { "content": "ok" } }], "usage": null });
        assert_eq!(extract_completion(&body, "mistral").unwrap().usage, None);
    }

    #[test]
    fn test_no_choices() {
        for body in [
            json!({}),
            json!(null),
            json!({ "choices": [] }),
            json!({ "choices": "nope" }),
        ] {
            assert_eq!(
                extract_completion(&body, "mistral"),
                Err(RelayError::NoChoicesReturned),
                "expected NoChoicesReturned for {body}"
            );
        }
    }

    #[test]
    fn test_empty_completion() {
        for body in [
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": {} }] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "choices": [{ "message": { "content": "  \n " } }] }),
            json!({ "choices": [{ "message": { "content": 3 } }] }),
        ] {
            assert_eq!(
                extract_completion(&body, "mistral"),
                Err(RelayError::EmptyCompletion),
                "expected EmptyCompletion for {body}"
            );
        }
    }

    #[test]
    fn test_only_first_choice_counts() {
        let body = json!({
            "choices": [
                { "message": { "content": "" } },
                { "message": { "content": "second" } }
            ]
        });
        assert_eq!(
            extract_completion(&body, "mistral"),
            Err(RelayError::EmptyCompletion)
        );
    }

    #[test]
    fn test_probe_content() {
        let body = json!({ "choices": [{ "message": { "content": "pong" } }] });
        assert_eq!(probe_content(&body), Ok(Some("pong".to_string())));
        assert_eq!(probe_content(&json!({ "choices": [] })), Ok(None));
        assert_eq!(probe_content(&json!({ "choices": [{}] })), Ok(None));
    }

    #[test]
    fn test_probe_content_requires_choices_array() {
        for body in [json!({}), json!(null), json!({ "choices": "nope" })] {
            assert_eq!(
                probe_content(&body),
                Err(RelayError::NoChoicesReturned),
                "expected NoChoicesReturned for {body}"
            );
        }
    }
}
