//! Broadcast content: the payload waiting to be sent, classified from an incoming message.

use groupcast_core::{Attachment, AttachmentKind, HandlerError, Message};
use serde::Serialize;

const SUMMARY_PREVIEW_CHARS: usize = 40;

/// What will be sent to every target group. Media is referenced by transport file id, never downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BroadcastContent {
    Text {
        text: String,
    },
    Photo {
        file_id: String,
        caption: Option<String>,
    },
    Video {
        file_id: String,
        caption: Option<String>,
    },
    Document {
        file_id: String,
        caption: Option<String>,
    },
    /// Telegram stickers carry no caption.
    Sticker {
        file_id: String,
    },
    Animation {
        file_id: String,
        caption: Option<String>,
    },
}

impl BroadcastContent {
    /// Classifies a message, testing text first and then photo, video, document, sticker, animation.
    ///
    /// Anything else is [`HandlerError::UnsupportedContent`] carrying the received kind.
    pub fn classify(message: &Message) -> Result<Self, HandlerError> {
        if !message.content.is_empty() {
            return Ok(BroadcastContent::Text {
                text: message.content.clone(),
            });
        }

        let Some(Attachment { kind, file_id }) = message.attachment.clone() else {
            return Err(HandlerError::UnsupportedContent(
                message.message_type.clone(),
            ));
        };
        let caption = message
            .caption
            .clone()
            .filter(|c| !c.trim().is_empty());

        Ok(match kind {
            AttachmentKind::Photo => BroadcastContent::Photo { file_id, caption },
            AttachmentKind::Video => BroadcastContent::Video { file_id, caption },
            AttachmentKind::Document => BroadcastContent::Document { file_id, caption },
            AttachmentKind::Sticker => BroadcastContent::Sticker { file_id },
            AttachmentKind::Animation => BroadcastContent::Animation { file_id, caption },
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BroadcastContent::Text { .. } => "text",
            BroadcastContent::Photo { .. } => "photo",
            BroadcastContent::Video { .. } => "video",
            BroadcastContent::Document { .. } => "document",
            BroadcastContent::Sticker { .. } => "sticker",
            BroadcastContent::Animation { .. } => "animation",
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            BroadcastContent::Photo { caption, .. }
            | BroadcastContent::Video { caption, .. }
            | BroadcastContent::Document { caption, .. }
            | BroadcastContent::Animation { caption, .. } => caption.as_deref(),
            BroadcastContent::Text { .. } | BroadcastContent::Sticker { .. } => None,
        }
    }

    /// How the content goes out: literal text, or a media reference plus caption.
    pub fn outbound(&self) -> Outbound<'_> {
        let (kind, file_id) = match self {
            BroadcastContent::Text { text } => return Outbound::Text(text),
            BroadcastContent::Photo { file_id, .. } => (AttachmentKind::Photo, file_id),
            BroadcastContent::Video { file_id, .. } => (AttachmentKind::Video, file_id),
            BroadcastContent::Document { file_id, .. } => (AttachmentKind::Document, file_id),
            BroadcastContent::Sticker { file_id } => (AttachmentKind::Sticker, file_id),
            BroadcastContent::Animation { file_id, .. } => (AttachmentKind::Animation, file_id),
        };
        Outbound::Media {
            attachment: Attachment {
                kind,
                file_id: file_id.clone(),
            },
            caption: self.caption(),
        }
    }

    /// Media reference for non-text content.
    pub fn attachment(&self) -> Option<Attachment> {
        match self.outbound() {
            Outbound::Text(_) => None,
            Outbound::Media { attachment, .. } => Some(attachment),
        }
    }

    /// Short human-readable description for the selection panel.
    pub fn summary(&self) -> String {
        let preview = match self {
            BroadcastContent::Text { text } => Some(text.as_str()),
            _ => self.caption(),
        };
        match preview {
            Some(p) => format!("{} \"{}\"", self.kind(), truncate(p, SUMMARY_PREVIEW_CHARS)),
            None => self.kind().to_string(),
        }
    }
}

/// Send operation for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound<'a> {
    Text(&'a str),
    Media {
        attachment: Attachment,
        caption: Option<&'a str>,
    },
}

fn truncate(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use groupcast_core::{Chat, User};

    fn message(
        content: &str,
        message_type: &str,
        attachment: Option<Attachment>,
        caption: Option<&str>,
    ) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: 1,
                chat_type: "private".to_string(),
            },
            content: content.to_string(),
            message_type: message_type.to_string(),
            attachment,
            caption: caption.map(|c| c.to_string()),
            command: false,
            created_at: Utc::now(),
        }
    }

    fn attachment(kind: AttachmentKind) -> Option<Attachment> {
        Some(Attachment {
            kind,
            file_id: "file-1".to_string(),
        })
    }

    #[test]
    fn test_classify_text() {
        let content = BroadcastContent::classify(&message("hello", "text", None, None)).unwrap();
        assert_eq!(
            content,
            BroadcastContent::Text {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_classify_photo_with_caption() {
        let content = BroadcastContent::classify(&message(
            "",
            "photo",
            attachment(AttachmentKind::Photo),
            Some("look"),
        ))
        .unwrap();
        assert_eq!(content.kind(), "photo");
        assert_eq!(content.caption(), Some("look"));
        assert_eq!(content.attachment().unwrap().file_id, "file-1");
    }

    /// **Test: each supported media kind maps to its own variant with the file id.**
    #[test]
    fn test_classify_each_media_kind() {
        for (kind, label) in [
            (AttachmentKind::Video, "video"),
            (AttachmentKind::Document, "document"),
            (AttachmentKind::Sticker, "sticker"),
            (AttachmentKind::Animation, "animation"),
        ] {
            let content =
                BroadcastContent::classify(&message("", label, attachment(kind), None)).unwrap();
            assert_eq!(content.kind(), label);
            assert_eq!(content.attachment().unwrap().kind, kind);
        }
    }

    /// **Test: stickers carry no caption and blank captions become None.**
    #[test]
    fn test_sticker_drops_caption_and_blank_caption_is_none() {
        let sticker = BroadcastContent::classify(&message(
            "",
            "sticker",
            attachment(AttachmentKind::Sticker),
            Some("ignored"),
        ))
        .unwrap();
        assert_eq!(sticker.caption(), None);

        let video = BroadcastContent::classify(&message(
            "",
            "video",
            attachment(AttachmentKind::Video),
            Some("   "),
        ))
        .unwrap();
        assert_eq!(video.caption(), None);
    }

    /// **Test: unsupported messages are rejected with the received kind.**
    #[test]
    fn test_classify_unsupported_names_kind() {
        let err = BroadcastContent::classify(&message("", "voice", None, None)).unwrap_err();
        assert_eq!(err, HandlerError::UnsupportedContent("voice".to_string()));
    }

    #[test]
    fn test_summary_truncates_long_text() {
        let content = BroadcastContent::Text {
            text: "x".repeat(100),
        };
        let summary = content.summary();
        assert!(summary.starts_with("text \""));
        assert!(summary.contains('…'));
        assert_eq!(
            BroadcastContent::Sticker {
                file_id: "s".to_string()
            }
            .summary(),
            "sticker"
        );
    }
}
