//! Push-notification payloads.
//!
//! Push contents carry pre-digested fields (caption, title, price) rather than
//! full message content, since the message itself may not be loaded yet.

use serde::{Deserialize, Serialize};

use crate::message::{AudioInfo, MessageSender};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub sender: Option<MessageSender>,
    /// Display name shipped with the push; preferred over a store lookup.
    pub sender_name: String,
    pub content: PushContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PushContent {
    Hidden { is_pinned: bool },
    Text { text: String, is_pinned: bool },
    MessageForwards { total_count: i32 },
    Photo { caption: String, is_secret: bool, is_pinned: bool },
    Video { caption: String, is_secret: bool, is_pinned: bool },
    Animation { caption: String, is_pinned: bool },
    Document { file_name: Option<String>, is_pinned: bool },
    Sticker { emoji: String, is_animated: bool, is_pinned: bool },
    Location { is_live: bool, is_pinned: bool },
    Poll { question: String, is_regular: bool, is_pinned: bool },
    Audio { audio: Option<AudioInfo>, is_pinned: bool },
    VideoNote { duration: Option<i32>, is_pinned: bool },
    VoiceNote { duration: Option<i32>, is_pinned: bool },
    Story { is_pinned: bool },
    Game { title: String, is_pinned: bool },
    Contact { name: String, is_pinned: bool },
    Invoice { price: String, is_pinned: bool },
    ScreenshotTaken,
    GameScore { title: String, score: i32, is_pinned: bool },
    ContactRegistered,
    MediaAlbum {
        total_count: i32,
        has_photos: bool,
        has_videos: bool,
        has_audios: bool,
        has_documents: bool,
    },
    BasicGroupChatCreate,
    ChatAddMembers { member_name: String, is_current_user: bool, is_returned: bool },
    ChatDeleteMember { member_name: String, is_current_user: bool, is_left: bool },
    ChatJoinByLink,
    ChatJoinByRequest,
    RecurringPayment { amount: String },
    ChatChangePhoto,
    ChatChangeTitle { title: String },
    ChatSetTheme { theme_name: String },
    ChatSetBackground { is_same: bool },
    SuggestProfilePhoto,
    PremiumGiftCode { month_count: i32 },
    PremiumGiveaway { winner_count: i32, month_count: i32, is_pinned: bool },
}
