//! Formatted text: a string plus rich-text entity spans.
//!
//! Entity offsets and lengths are measured in UTF-16 code units, the unit
//! used by the messaging protocol that produces them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    Url,
    TextUrl { url: String },
    Mention,
    Hashtag,
    EmailAddress,
    CustomEmoji { custom_emoji_id: i64 },
}

impl EntityKind {
    pub fn is_link(&self) -> bool {
        matches!(self, EntityKind::Url | EntityKind::TextUrl { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEntity {
    pub offset: usize,
    pub length: usize,
    pub kind: EntityKind,
}

impl TextEntity {
    pub fn new(offset: usize, length: usize, kind: EntityKind) -> Self {
        Self {
            offset,
            length,
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattedText {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<TextEntity>,
}

impl FormattedText {
    pub fn new(text: impl Into<String>, entities: Vec<TextEntity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the text in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        utf16_len(&self.text)
    }

    /// The text covered by `entity`, or `None` when the span is out of range.
    pub fn entity_text(&self, entity: &TextEntity) -> Option<String> {
        substring_utf16(&self.text, entity.offset, entity.length)
    }

    /// Prepends `prefix`, shifting every entity right by its UTF-16 length.
    pub fn with_prefix(&self, prefix: &str) -> FormattedText {
        let shift = utf16_len(prefix);
        let entities = self
            .entities
            .iter()
            .map(|entity| TextEntity {
                offset: entity.offset + shift,
                length: entity.length,
                kind: entity.kind.clone(),
            })
            .collect();
        FormattedText {
            text: format!("{prefix}{}", self.text),
            entities,
        }
    }
}

impl From<&str> for FormattedText {
    fn from(text: &str) -> Self {
        FormattedText::plain(text)
    }
}

impl From<String> for FormattedText {
    fn from(text: String) -> Self {
        FormattedText::plain(text)
    }
}

pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn substring_utf16(text: &str, offset: usize, length: usize) -> Option<String> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let end = offset.checked_add(length)?;
    if end > units.len() {
        return None;
    }
    Some(String::from_utf16_lossy(&units[offset..end]))
}

/// True when the string has no visible characters.
pub fn is_empty_or_invisible(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || is_invisible(c))
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{034F}'
            | '\u{115F}'
            | '\u{1160}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{3164}'
            | '\u{FE0F}'
            | '\u{FEFF}'
            | '\u{FFA0}'
    )
}
