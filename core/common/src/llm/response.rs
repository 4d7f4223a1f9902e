//! 生成結果の型
//!
//! completion 形式と chat 形式は別の型として扱い、片方のフィールドをもう片方から探すことはしない。
//! ワイヤ上のその他のフィールドは読まない。

use serde::Deserialize;

/// completion の候補 1 件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletionChoice {
    /// 欠けている・null の場合は None
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// completion エンドポイントの応答（choices のみ）
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// chat の返却メッセージ 1 件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// chat エンドポイントの応答（返却メッセージを順に並べたもの）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

/// chat のワイヤ形式: `{"choices": [{"message": {...}}]}`
#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    #[serde(default)]
    choices: Vec<ChatChoiceRaw>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceRaw {
    message: ChatMessage,
}

impl<'de> Deserialize<'de> for ChatResponse {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = ChatResponseRaw::deserialize(deserializer)?;
        Ok(ChatResponse {
            messages: raw.choices.into_iter().map(|c| c.message).collect(),
        })
    }
}

/// 生成結果（応答の形ごとに別バリアント）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Completion(CompletionResponse),
    Chat(ChatResponse),
}

impl Generation {
    /// completion 1 件だけの Generation（echo / テスト用）
    pub fn single_completion(text: impl Into<String>) -> Self {
        Self::Completion(CompletionResponse {
            choices: vec![CompletionChoice {
                text: Some(text.into()),
                finish_reason: Some("stop".to_string()),
            }],
        })
    }

    /// 出力するテキスト
    ///
    /// completion は先頭の候補、chat は最後のメッセージ。
    /// 一覧が空、または選んだ候補・メッセージにテキストが無い（欠落・null・空文字）なら None。
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Self::Completion(r) => r.choices.first().and_then(|c| c.text.as_deref()),
            Self::Chat(r) => r.messages.last().and_then(|m| m.content.as_deref()),
        };
        text.filter(|t| !t.is_empty())
    }

    /// 応答が空だったときの表示文言
    pub fn empty_notice(&self) -> &'static str {
        match self {
            Self::Completion(_) => "No choices returned in the response.",
            Self::Chat(_) => "No messages returned in the response.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_first_choice() {
        let json = r#"{
            "id": "cmpl-1",
            "object": "text_completion",
            "choices": [
                {"text": "Scenario: first", "index": 0, "finish_reason": "length"},
                {"text": "Scenario: second", "index": 1, "finish_reason": "stop"}
            ],
            "usage": {"total_tokens": 10}
        }"#;
        let r: CompletionResponse = serde_json::from_str(json).unwrap();
        let g = Generation::Completion(r);
        assert_eq!(g.text(), Some("Scenario: first"));
    }

    #[test]
    fn test_completion_empty_choices() {
        let r: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let g = Generation::Completion(r);
        assert_eq!(g.text(), None);
        assert_eq!(g.empty_notice(), "No choices returned in the response.");
    }

    #[test]
    fn test_completion_missing_choices_is_empty() {
        let r: CompletionResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(r.choices.is_empty());
    }

    #[test]
    fn test_chat_last_message() {
        let json = r#"{
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Feature: a"}},
                {"index": 1, "message": {"role": "assistant", "content": "Feature: b"}}
            ]
        }"#;
        let r: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.messages.len(), 2);
        let g = Generation::Chat(r);
        assert_eq!(g.text(), Some("Feature: b"));
    }

    #[test]
    fn test_completion_choice_without_text() {
        let json = r#"{"choices": [{"index": 0, "finish_reason": "length"}]}"#;
        let r: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.choices.len(), 1);
        assert_eq!(r.choices[0].text, None);
        assert_eq!(Generation::Completion(r).text(), None);
    }

    #[test]
    fn test_completion_choice_with_null_or_empty_text() {
        for json in [
            r#"{"choices": [{"text": null}]}"#,
            r#"{"choices": [{"text": ""}]}"#,
        ] {
            let r: CompletionResponse = serde_json::from_str(json).unwrap();
            assert_eq!(Generation::Completion(r).text(), None, "{}", json);
        }
    }

    #[test]
    fn test_chat_null_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let r: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.messages[0].content, None);
        assert_eq!(Generation::Chat(r).text(), None);
    }

    #[test]
    fn test_chat_message_without_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let r: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.messages.len(), 1);
        assert_eq!(Generation::Chat(r).text(), None);
    }

    #[test]
    fn test_chat_empty_messages() {
        let r: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let g = Generation::Chat(r);
        assert_eq!(g.text(), None);
        assert_eq!(g.empty_notice(), "No messages returned in the response.");
    }

    #[test]
    fn test_chat_shape_does_not_read_completion_text() {
        // completion 形式の JSON を chat として読んでも text は拾わない
        let json = r#"{"choices": [{"text": "Scenario: x"}]}"#;
        assert!(serde_json::from_str::<ChatResponse>(json).is_err());
    }

    #[test]
    fn test_single_completion() {
        let g = Generation::single_completion("Scenario: ...");
        assert_eq!(g.text(), Some("Scenario: ..."));
    }
}
