use serde::{ Serialize, Deserialize };
use serde_json::Value;
use std::fmt;

use crate::llm::gemini::{ GeminiContent, GeminiPart };

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    System,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Other(role) => role,
        }
    }

    /// Role name on the Gemini side. Only `assistant` is renamed.
    pub fn provider_role(&self) -> &str {
        match self {
            Role::Assistant => "model",
            other => other.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One OpenAI-style chat entry. Both fields are optional so that malformed
/// input survives parsing and can be dropped during conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl ChatMessage {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: Some(Value::String(content.into())),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Content coerced to a single text fragment. Strings are used as-is,
    /// any other JSON value is rendered as compact JSON.
    pub fn content_text(&self) -> Option<String> {
        match self.content.as_ref()? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn to_provider_content(&self) -> Option<GeminiContent> {
        let role = self.role.as_ref()?;
        let text = self.content_text()?;
        Some(GeminiContent {
            role: Some(role.provider_role().to_string()),
            parts: vec![GeminiPart { text: Some(text) }],
        })
    }
}

/// Parses a JSON array of chat entries. Entries that do not fit the
/// `{role, content}` shape become empty messages and are dropped later.
pub fn parse_transcript(json: &str) -> Result<Vec<ChatMessage>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value::<ChatMessage>(value).unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_becomes_model() {
        let content = ChatMessage::assistant("sure").to_provider_content().unwrap();
        assert_eq!(content.role.as_deref(), Some("model"));
        assert_eq!(content.parts.len(), 1);
        assert_eq!(content.parts[0].text.as_deref(), Some("sure"));
    }

    #[test]
    fn other_roles_pass_through() {
        for role in ["user", "system", "tool", "narrator"] {
            let content = ChatMessage::new(role, "x").to_provider_content().unwrap();
            assert_eq!(content.role.as_deref(), Some(role));
        }
    }

    #[test]
    fn missing_role_or_content_is_dropped() {
        let no_role = ChatMessage { role: None, content: Some(json!("hi")) };
        let no_content = ChatMessage { role: Some(Role::User), content: None };
        let null_content = ChatMessage { role: Some(Role::User), content: Some(Value::Null) };
        assert!(no_role.to_provider_content().is_none());
        assert!(no_content.to_provider_content().is_none());
        assert!(null_content.to_provider_content().is_none());
    }

    #[test]
    fn non_string_content_is_rendered_as_json() {
        let msg = ChatMessage { role: Some(Role::User), content: Some(json!({"a": 1})) };
        assert_eq!(msg.content_text().as_deref(), Some(r#"{"a":1}"#));

        let msg = ChatMessage { role: Some(Role::User), content: Some(json!(42)) };
        assert_eq!(msg.content_text().as_deref(), Some("42"));
    }

    #[test]
    fn parse_transcript_keeps_order_and_tolerates_junk() {
        let raw = r#"[
            {"role": "system", "content": "be brief"},
            {"role": 7, "content": "bad role type"},
            "not an object",
            {"content": "orphan"},
            {"role": "assistant", "content": "ok"}
        ]"#;
        let transcript = parse_transcript(raw).unwrap();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[0], ChatMessage::system("be brief"));
        assert_eq!(transcript[1], ChatMessage::default());
        assert_eq!(transcript[2], ChatMessage::default());
        assert!(transcript[3].role.is_none());
        assert_eq!(transcript[4], ChatMessage::assistant("ok"));
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let value = serde_json::to_value(ChatMessage::assistant("x")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "x"}));
    }
}
