//! Template identifiers and the localization seam.
//!
//! The core only ever chooses a [`TemplateId`] and its arguments; turning that
//! into a locale-correct phrase is the job of a [`Localizer`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::FormattedText;

/// Every phrase the previewer can select.
///
/// Variants whose English text has a `{n}` slot are plural families and are
/// resolved through [`Localizer::plural`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateId {
    DeletedMessage,
    YouHaveNewMessage,
    UnsupportedMessage,
    UnsupportedMessageType,

    // Media placeholders.
    ChatContentPhoto,
    ChatContentVideo,
    ChatContentFile,
    ChatContentVoice,
    ChatContentRoundVideo,
    ChatContentAnimation,
    ChatContentVoiceDuration,
    ChatContentSong,
    UnknownTrack,
    AudioUnknownArtist,
    AttachContact,
    Poll,
    Quiz,
    AttachLiveLocation,
    Location,
    Sticker,
    AnimatedSticker,
    SelfDestructPhoto,
    SelfDestructVideo,
    AttachPhotoExpired,
    AttachVideoExpired,
    ChatContentPinned,

    // Screenshots, games, payments.
    YouTookAScreenshot,
    ChatContentScreenshot,
    XTookAScreenshot,
    NotificationGame,
    NotificationGameOutgoing,
    NotificationGameGroup,
    NotificationGameGroupOutgoing,
    GameActionScored,
    GameActionYouScored,
    GameActionScoredInGame,
    GameActionYouScoredInGame,
    Invoice,
    InvoiceFor,
    RecurringPayment,
    PaidX,
    PaymentSuccessfullyPaidNoItem,
    NotificationContactJoined,

    // Chat lifecycle.
    ActionCreateChannel,
    GroupCreate,
    GroupCreateOutgoing,
    GroupJoin,
    GroupJoinOutgoing,
    GroupAccept,
    GroupAcceptOutgoing,
    ActionChannelChangedPhoto,
    GroupPhoto,
    GroupPhotoOutgoing,
    ActionChannelRemovedPhoto,
    GroupPhotoRemove,
    GroupPhotoRemoveOutgoing,
    ActionChannelChangedTitleTo,
    GroupName,
    GroupNameOutgoing,
    ThemeDisabled,
    ThemeDisabledOutgoing,
    ThemeSet,
    ThemeSetOutgoing,
    GroupUpgraded,

    // Membership.
    GroupJoinPublic,
    GroupJoinPublicOutgoing,
    GroupReturn,
    GroupReturnOutgoing,
    GroupAddYou,
    GroupAdd,
    GroupAddOutgoing,
    GroupAddMembers,
    GroupAddMembersOutgoing,
    GroupLeft,
    GroupLeftOutgoing,
    GroupKickYou,
    GroupKick,
    GroupKickOutgoing,

    // Auto-delete timer, one family per chat kind.
    TtlSeconds,
    TtlMinutes,
    TtlHours,
    TtlDays,
    TtlWeeks,
    TtlMonths,
    TtlOff,
    ChannelTtlSeconds,
    ChannelTtlMinutes,
    ChannelTtlHours,
    ChannelTtlDays,
    ChannelTtlWeeks,
    ChannelTtlMonths,
    ChannelTtlOff,
    GroupTtlSeconds,
    GroupTtlMinutes,
    GroupTtlHours,
    GroupTtlDays,
    GroupTtlWeeks,
    GroupTtlMonths,
    GroupTtlOff,

    // Dice and darts.
    ChatContentDice,
    ChatContentDiceRolled,
    ChatContentDart,
    ChatContentDart1,
    ChatContentDart2,
    ChatContentDart3,
    ChatContentDart4,
    ChatContentDart5,
    ChatContentDart6,

    // Calls and video chats.
    OutgoingCall,
    IncomingCall,
    CallMessageIncomingDeclined,
    CallMessageOutgoingMissed,
    MissedCall,
    ChatContentCallWithDuration,
    LiveStreamStarted,
    LiveStreamStartedOutgoing,
    VoiceChatStarted,
    VoiceChatStartedOutgoing,
    LiveStreamFinished,
    LiveStreamFinishedOutgoing,
    VoiceChatFinished,
    VoiceChatFinishedOutgoing,
    LiveStreamScheduledOn,
    VideoChatScheduledFor,
    LiveStreamInviteYou,
    LiveStreamInvite,
    LiveStreamInviteOutgoing,
    LiveStreamInviteMulti,
    LiveStreamInviteMultiOutgoing,
    VoiceChatInviteYou,
    VoiceChatInvite,
    VoiceChatInviteOutgoing,
    VoiceChatInviteMulti,
    VoiceChatInviteMultiOutgoing,

    // Proximity alerts.
    ProximityYouKm,
    ProximityYouM,
    ProximityFromYouKm,
    ProximityFromYouM,
    ProximityKm,
    ProximityM,

    // Premium and giveaways.
    YouGiftedPremium,
    GiftedPremium,
    YouGiftedPremiumCode,
    GiftedPremiumCode,
    Giveaway,
    FormatGiveawayInfo,
    XFutureWinners,
    XFutureWinnersOn,
    XPastWinnersOn,
    BoostingGiveawayJustStarted,
    BoostingGiveawayServiceWinnersSelected,

    // Bots.
    BotWebappAllowed,
    BotAttachAllowed,
    BotAppAllowed,
    BotDataSent,

    // Counts.
    XNewMessages,
    XForwards,
    XPhotos,
    XVideos,
    XFiles,
    XAudios,
    XMedia,

    // Duration units.
    XSec,
    XMin,
    XSeconds,
    XMinutes,
    FormatMinutesAndSeconds,

    // Pinned notifications.
    ActionPinnedText,
    ActionPinnedNoText,
    ActionPinnedPhoto,
    ActionPinnedVideo,
    ActionPinnedGif,
    ActionPinnedFile,
    ActionPinnedSticker,
    ActionPinnedGeoLive,
    ActionPinnedGeo,
    ActionPinnedPoll,
    ActionPinnedQuiz,
    ActionPinnedMusic,
    ActionPinnedRound,
    ActionPinnedStory,
    ActionPinnedVoice,
    ActionPinnedGame,
    ActionPinnedGameNoName,
    ActionPinnedContact,
    ActionPinnedGiveaway,
}

/// Positional argument substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    /// Substituted text that should carry a bold entity span.
    Bold(String),
    Count(i64),
}

impl Arg {
    pub fn text(value: impl Into<String>) -> Self {
        Arg::Text(value.into())
    }

    pub fn bold(value: impl Into<String>) -> Self {
        Arg::Bold(value.into())
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Arg::Text(value) | Arg::Bold(value) => std::borrow::Cow::Borrowed(value),
            Arg::Count(value) => std::borrow::Cow::Owned(value.to_string()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("template {template:?} references argument {index} but only {provided} were given")]
    MissingArgument {
        template: TemplateId,
        index: usize,
        provided: usize,
    },
    #[error("template {template:?} has a malformed placeholder at byte {position}")]
    MalformedPlaceholder { template: TemplateId, position: usize },
    #[error("template {template:?} uses a count but was formatted without one")]
    MissingCount { template: TemplateId },
}

/// Locale service consumed by the previewer.
pub trait Localizer: Send + Sync {
    /// The raw phrase for `id`, without substitution.
    fn string(&self, id: TemplateId) -> String;

    fn format(&self, id: TemplateId, args: &[Arg]) -> Result<FormattedText, FormatError>;

    /// Selects the plural form of `id` for `count`, then substitutes `args`.
    fn plural(&self, id: TemplateId, count: i64, args: &[Arg]) -> Result<FormattedText, FormatError>;

    /// Calendar date for a unix timestamp in seconds.
    fn date(&self, unix_seconds: i64) -> String;

    /// Date and time of day for a unix timestamp in seconds.
    fn timestamp(&self, unix_seconds: i64) -> String;
}
