//! Caller-supplied history sanitizing and truncation.

use serde_json::Value;

use crate::domain::{ChatMessage, MessageRole};

/// Turn untrusted caller history into at most `limit` well-formed messages.
///
/// Turns without a usable role and non-blank string content are dropped,
/// then only the last `limit` survivors are kept in their original order.
/// Anything that is not a JSON array yields an empty window.
pub fn window_history(history: Option<&Value>, limit: usize) -> Vec<ChatMessage> {
    let Some(Value::Array(turns)) = history else {
        return Vec::new();
    };

    let usable: Vec<ChatMessage> = turns.iter().filter_map(sanitize_turn).collect();
    let skip = usable.len().saturating_sub(limit);

    usable.into_iter().skip(skip).collect()
}

fn sanitize_turn(turn: &Value) -> Option<ChatMessage> {
    let role = turn.get("role").filter(|role| is_present(role))?;
    let content = turn.get("content")?.as_str()?.trim();
    if content.is_empty() {
        return None;
    }

    Some(ChatMessage {
        role: MessageRole::normalize(role),
        content: content.to_string(),
    })
}

/// JSON truthiness as the chat client sends it: `null`, `false`, `0` and
/// `""` count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered_turns(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|i| {
                    let role = if i % 2 == 0 { "user" } else { "assistant" };
                    json!({ "role": role, "content": format!("turn {i}") })
                })
                .collect(),
        )
    }

    #[test]
    fn test_absent_or_non_array_is_empty() {
        assert!(window_history(None, 10).is_empty());
        assert!(window_history(Some(&json!(null)), 10).is_empty());
        assert!(window_history(Some(&json!("history")), 10).is_empty());
        assert!(window_history(Some(&json!({ "role": "user" })), 10).is_empty());
        assert!(window_history(Some(&json!([])), 10).is_empty());
    }

    #[test]
    fn test_drops_malformed_turns() {
        let history = json!([
            { "role": "user" },
            { "content": "orphan" },
            { "role": "", "content": "no role" },
            { "role": null, "content": "null role" },
            { "role": "user", "content": "   " },
            { "role": "user", "content": 17 },
            "just a string",
            42,
            { "role": "assistant", "content": " kept " },
        ]);

        let window = window_history(Some(&history), 10);
        assert_eq!(window, vec![ChatMessage::assistant("kept")]);
    }

    #[test]
    fn test_normalizes_roles() {
        let history = json!([
            { "role": "system", "content": "a" },
            { "role": "assistant", "content": "b" },
            { "role": 7, "content": "c" },
            { "role": "ASSISTANT", "content": "d" },
        ]);

        let roles: Vec<MessageRole> = window_history(Some(&history), 10)
            .into_iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::User
            ]
        );
    }

    #[test]
    fn test_keeps_most_recent_in_order() {
        let window = window_history(Some(&numbered_turns(25)), 10);
        assert_eq!(window.len(), 10);

        let contents: Vec<&str> = window.iter().map(|m| m.content.as_str()).collect();
        let expected: Vec<String> = (15..25).map(|i| format!("turn {i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_filters_before_truncating() {
        let mut turns: Vec<Value> = (0..10)
            .map(|i| json!({ "role": "user", "content": format!("real {i}") }))
            .collect();
        turns.push(json!({ "role": "user", "content": "" }));
        turns.push(json!({ "role": "user" }));

        let window = window_history(Some(&Value::Array(turns)), 10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "real 0");
        assert_eq!(window[9].content, "real 9");
    }

    #[test]
    fn test_windowing_is_idempotent() {
        let once = window_history(Some(&numbered_turns(14)), 10);
        let as_json = serde_json::to_value(&once).unwrap();
        let twice = window_history(Some(&as_json), 10);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_limit_yields_empty_window() {
        assert!(window_history(Some(&numbered_turns(3)), 0).is_empty());
    }
}
