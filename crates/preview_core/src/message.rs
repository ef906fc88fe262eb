//! Messages and the closed set of message content variants.

use serde::{Deserialize, Serialize};

use crate::text::FormattedText;

pub type ChatId = i64;
pub type MessageId = i64;
pub type UserId = i64;

/// Glyph of the "dice" animated emoji.
pub const DICE_EMOJI: &str = "\u{1F3B2}";
/// Glyph of the "dart" animated emoji.
pub const DART_EMOJI: &str = "\u{1F3AF}";
/// Emoji sent as animated games with a random value.
pub const DICE_EMOJIS: &[&str] = &[
    DICE_EMOJI,
    DART_EMOJI,
    "\u{1F3C0}",
    "\u{26BD}",
    "\u{1F3B0}",
    "\u{1F3B3}",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageSender {
    User(UserId),
    Chat(ChatId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Secret,
    BasicGroup,
    Supergroup,
    Channel,
}

impl ChatKind {
    /// One-to-one chats, including secret chats.
    pub fn is_user_chat(self) -> bool {
        matches!(self, ChatKind::Private | ChatKind::Secret)
    }

    pub fn is_multi_chat(self) -> bool {
        !self.is_user_chat()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub chat_id: ChatId,
    pub id: MessageId,
    pub sender: MessageSender,
    pub is_outgoing: bool,
    pub is_channel_post: bool,
    /// Non-zero when the message belongs to a media group.
    pub media_album_id: i64,
    /// Non-empty when the message is restricted in the current region.
    pub restriction_reason: String,
    pub content: MessageContent,
}

impl Message {
    pub fn new(chat_id: ChatId, id: MessageId, sender: MessageSender, content: MessageContent) -> Self {
        Self {
            chat_id,
            id,
            sender,
            is_outgoing: false,
            is_channel_post: false,
            media_album_id: 0,
            restriction_reason: String::new(),
            content,
        }
    }

    pub fn sender_user_id(&self) -> Option<UserId> {
        match self.sender {
            MessageSender::User(user_id) => Some(user_id),
            MessageSender::Chat(_) => None,
        }
    }

    /// Album grouping applies only to contents that can share a media group.
    pub fn combine_mode(&self) -> CombineMode {
        self.content.combine_mode()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    None,
    Media,
    Files,
    Audio,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInfo {
    pub title: String,
    pub performer: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollKind {
    Regular,
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallDiscardReason {
    Empty,
    Missed,
    Declined,
    Disconnected,
    HungUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotWriteAccessReason {
    ConnectedWebsite { domain_name: String },
    AddedToAttachmentMenu,
    LaunchedWebApp { web_app_title: String },
    AcceptedRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageContent {
    Text { text: FormattedText },
    AnimatedEmoji { emoji: String },
    Photo { caption: FormattedText, is_secret: bool },
    Video { caption: FormattedText, is_secret: bool },
    Animation { caption: FormattedText },
    Document { file_name: String, caption: FormattedText },
    Audio { audio: AudioInfo, caption: FormattedText },
    VoiceNote { duration: i32, caption: FormattedText },
    VideoNote { duration: i32 },
    Contact { first_name: String, last_name: String },
    Poll { question: String, kind: PollKind },
    Dice { emoji: String, value: i32 },
    Call { discard_reason: CallDiscardReason, duration: i32, is_video: bool },
    Location { live_period: i32, expires_in: i32 },
    Venue { title: String },
    Game { title: String },
    GameScore { game_message_id: MessageId, score: i32 },
    Sticker { emoji: String, is_animated: bool },
    Invoice { currency: String, total_amount: i64, title: String },
    Story { via_mention: bool },
    PinMessage { message_id: MessageId },
    ProximityAlertTriggered { traveler: MessageSender, watcher: MessageSender, distance: i32 },
    VideoChatStarted,
    VideoChatEnded { duration: i32 },
    VideoChatScheduled { start_date: i64 },
    InviteVideoChatParticipants { user_ids: Vec<UserId> },
    ChatAddMembers { member_user_ids: Vec<UserId> },
    ChatDeleteMember { user_id: UserId },
    ChatChangeTitle { title: String },
    ChatChangePhoto,
    ChatDeletePhoto,
    ChatSetMessageAutoDeleteTime { seconds: i32 },
    ChatSetTheme { theme_name: String },
    ChatSetBackground { is_same: bool },
    ChatUpgradeTo,
    ChatUpgradeFrom,
    BasicGroupChatCreate,
    SupergroupChatCreate,
    ChatJoinByLink,
    ChatJoinByRequest,
    GiftedPremium { currency: String, amount: i64, month_count: i32 },
    PremiumGiftCode { creator: Option<MessageSender>, month_count: i32 },
    PremiumGiveawayCreated,
    PremiumGiveaway { winner_count: i32, winners_selection_date: i64 },
    PremiumGiveawayWinners { winner_count: i32, actual_winners_selection_date: i64 },
    PremiumGiveawayCompleted { winner_count: i32, unclaimed_prize_count: i32 },
    CustomServiceAction { text: String },
    BotWriteAccessAllowed { reason: BotWriteAccessReason },
    WebAppDataSent { button_text: String },
    PaymentSuccessful { currency: String, total_amount: i64 },
    ScreenshotTaken,
    ExpiredPhoto,
    ExpiredVideo,
    ContactRegistered,
    UsersShared,
    ChatShared,
    SuggestProfilePhoto,
    ForumTopicCreated,
    ForumTopicEdited,
    ForumTopicIsClosedToggled,
    ForumTopicIsHiddenToggled,
    PassportDataSent,
    /// Content the client does not understand yet.
    Unsupported,
}

impl MessageContent {
    /// Body text or media caption, when the variant carries one.
    pub fn text_or_caption(&self) -> Option<&FormattedText> {
        match self {
            MessageContent::Text { text } => Some(text),
            MessageContent::Photo { caption, .. }
            | MessageContent::Video { caption, .. }
            | MessageContent::Animation { caption }
            | MessageContent::Document { caption, .. }
            | MessageContent::Audio { caption, .. }
            | MessageContent::VoiceNote { caption, .. } => Some(caption),
            _ => None,
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            MessageContent::Photo { is_secret: true, .. } | MessageContent::Video { is_secret: true, .. }
        )
    }

    pub fn combine_mode(&self) -> CombineMode {
        if self.is_secret() {
            return CombineMode::None;
        }
        match self {
            MessageContent::Photo { .. }
            | MessageContent::Video { .. }
            | MessageContent::Animation { .. } => CombineMode::Media,
            MessageContent::Document { .. } => CombineMode::Files,
            MessageContent::Audio { .. } => CombineMode::Audio,
            _ => CombineMode::None,
        }
    }
}

impl AudioInfo {
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// A performer, or a file name that differs from the title.
    pub fn has_subtitle(&self) -> bool {
        !self.performer.is_empty() || (!self.file_name.is_empty() && self.file_name != self.title)
    }

    pub fn subtitle(&self) -> Option<&str> {
        if !self.performer.is_empty() {
            Some(&self.performer)
        } else if self.has_subtitle() {
            Some(&self.file_name)
        } else {
            None
        }
    }
}

/// "First Last", or whichever half is present.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    match (first_name.is_empty(), last_name.is_empty()) {
        (true, _) => last_name.to_string(),
        (false, true) => first_name.to_string(),
        (false, false) => format!("{first_name} {last_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_media_never_combines() {
        let photo = MessageContent::Photo {
            caption: FormattedText::default(),
            is_secret: true,
        };
        assert_eq!(photo.combine_mode(), CombineMode::None);
        let document = MessageContent::Document {
            file_name: "a.pdf".into(),
            caption: FormattedText::default(),
        };
        assert_eq!(document.combine_mode(), CombineMode::Files);
    }

    #[test]
    fn audio_subtitle_falls_back_to_distinct_file_name() {
        let audio = AudioInfo {
            title: "Song".into(),
            performer: String::new(),
            file_name: "Song".into(),
        };
        assert!(!audio.has_subtitle());
        let audio = AudioInfo {
            file_name: "song.mp3".into(),
            ..audio
        };
        assert_eq!(audio.subtitle(), Some("song.mp3"));
    }

    #[test]
    fn full_name_joins_present_parts() {
        assert_eq!(full_name("Ada", "Lovelace"), "Ada Lovelace");
        assert_eq!(full_name("", "Lovelace"), "Lovelace");
        assert_eq!(full_name("Ada", ""), "Ada");
    }
}
