use std::time::Duration;

use preview_core::{
    Album, ChatId, ChatKind, FormattedText, Message, MessageId, MessageSender, UserId, DICE_EMOJIS,
};

/// Read-only access to messages, albums, chats and users.
///
/// Synchronous methods must only consult local state. The async methods may
/// go to the network and report absence with `None` rather than an error.
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    /// Local cache lookup, waiting at most `timeout` for it to complete.
    fn message_locally(&self, chat_id: ChatId, message_id: MessageId, timeout: Duration) -> Option<Message>;

    async fn message(&self, chat_id: ChatId, message_id: MessageId) -> Option<Message>;

    /// Loads the media group `representative` belongs to.
    ///
    /// `known` is the album the caller already has, so implementations can
    /// skip work when nothing new arrived.
    async fn album(&self, representative: &Message, local_only: bool, known: Option<&Album>) -> Album;

    fn chat_restriction_reason(&self, chat_id: ChatId) -> Option<String>;

    fn chat_kind(&self, chat_id: ChatId) -> ChatKind;

    fn chat_title(&self, chat_id: ChatId) -> String;

    fn is_self_user(&self, user_id: UserId) -> bool;

    fn is_self_sender(&self, sender: &MessageSender) -> bool {
        matches!(sender, MessageSender::User(user_id) if self.is_self_user(*user_id))
    }

    fn sender_name(&self, sender: &MessageSender) -> String;

    fn user_name(&self, user_id: UserId) -> String;

    fn user_first_name(&self, user_id: UserId) -> String;

    /// Text of a locally pending edit of an outgoing message.
    fn pending_text(&self, _chat_id: ChatId, _message_id: MessageId) -> Option<FormattedText> {
        None
    }

    /// Caption or body the user sees for `message`.
    fn formatted_text(&self, message: &Message) -> Option<FormattedText> {
        message.content.text_or_caption().cloned()
    }

    /// Whether `emoji` is rendered as an animated dice-like game.
    fn is_dice_emoji(&self, emoji: &str) -> bool {
        DICE_EMOJIS.contains(&emoji)
    }
}
