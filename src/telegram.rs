//! Minimal message shapes handed over by the host bot framework.
//!
//! Only the fields the adapter inspects are modeled: the message body,
//! its entity spans, and the optional reply target.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityKind,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityKind {
    Url,
    TextLink,
    Mention,
    Hashtag,
    BotCommand,
    #[serde(other)]
    Other,
}

impl Message {
    /// The text the entity offsets index into: `text`, falling back to
    /// `caption` for media messages.
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Extracts the substring spanned by a URL-typed entity, if any.
    /// Offsets and lengths are character counts.
    pub fn url_entity_text(&self) -> Option<String> {
        let body = self.body()?;
        for entity in &self.entities {
            if entity.kind == MessageEntityKind::Url {
                let span: String = body
                    .chars()
                    .skip(entity.offset)
                    .take(entity.length)
                    .collect();
                if !span.is_empty() {
                    return Some(span);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_entity(offset: usize, length: usize) -> MessageEntity {
        MessageEntity {
            kind: MessageEntityKind::Url,
            offset,
            length,
        }
    }

    #[test]
    fn extracts_url_span_from_text() {
        let message = Message {
            text: Some("play https://example.com/song now".to_string()),
            entities: vec![url_entity(5, 24)],
            ..Message::default()
        };
        assert_eq!(
            message.url_entity_text().as_deref(),
            Some("https://example.com/song")
        );
    }

    #[test]
    fn falls_back_to_caption() {
        let message = Message {
            caption: Some("https://example.com/a".to_string()),
            entities: vec![url_entity(0, 21)],
            ..Message::default()
        };
        assert_eq!(
            message.url_entity_text().as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn ignores_non_url_entities() {
        let message = Message {
            text: Some("#tag @user /cmd".to_string()),
            entities: vec![
                MessageEntity {
                    kind: MessageEntityKind::Hashtag,
                    offset: 0,
                    length: 4,
                },
                MessageEntity {
                    kind: MessageEntityKind::Mention,
                    offset: 5,
                    length: 5,
                },
            ],
            ..Message::default()
        };
        assert!(message.url_entity_text().is_none());
    }

    #[test]
    fn offsets_are_character_counts() {
        // Two-codepoint prefix before the URL
        let message = Message {
            text: Some("héé https://x.co".to_string()),
            entities: vec![url_entity(4, 12)],
            ..Message::default()
        };
        assert_eq!(message.url_entity_text().as_deref(), Some("https://x.co"));
    }

    #[test]
    fn entity_kind_parses_from_wire_name() {
        let entity: MessageEntity =
            serde_json::from_str(r#"{"type": "url", "offset": 0, "length": 5}"#).unwrap();
        assert_eq!(entity.kind, MessageEntityKind::Url);

        let entity: MessageEntity =
            serde_json::from_str(r#"{"type": "spoiler", "offset": 0, "length": 5}"#).unwrap();
        assert_eq!(entity.kind, MessageEntityKind::Other);
    }
}
