//! Pattern-based [`Localizer`] with a built-in English catalog.
//!
//! Patterns use `{0}`, `{1}`, ... for positional arguments and `{n}` for the
//! plural count. Plural entries carry a `one` and an `other` form.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::template::{Arg, FormatError, Localizer, TemplateId};
use crate::text::{utf16_len, EntityKind, FormattedText, TextEntity};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown template id `{0}`")]
    UnknownTemplate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Simple(Cow<'static, str>),
    Plural {
        one: Cow<'static, str>,
        other: Cow<'static, str>,
    },
}

impl Pattern {
    fn select(&self, count: Option<i64>) -> &str {
        match self {
            Pattern::Simple(text) => text,
            Pattern::Plural { one, other } => match count {
                Some(1) => one,
                _ => other,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternSource {
    Simple(String),
    Plural { one: String, other: String },
}

impl From<PatternSource> for Pattern {
    fn from(source: PatternSource) -> Self {
        match source {
            PatternSource::Simple(text) => Pattern::Simple(Cow::Owned(text)),
            PatternSource::Plural { one, other } => Pattern::Plural {
                one: Cow::Owned(one),
                other: Cow::Owned(other),
            },
        }
    }
}

/// English phrases with optional per-template overrides.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    overrides: HashMap<TemplateId, Pattern>,
}

impl TemplateCatalog {
    pub fn english() -> Self {
        Self::default()
    }

    /// Parses a JSON object keyed by template id and layers it over English.
    ///
    /// Values are either a string or `{"one": ..., "other": ...}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, PatternSource> = serde_json::from_str(json)?;
        let mut overrides = HashMap::with_capacity(raw.len());
        for (key, source) in raw {
            let id: TemplateId = serde_json::from_value(serde_json::Value::String(key.clone()))
                .map_err(|_| CatalogError::UnknownTemplate(key))?;
            overrides.insert(id, Pattern::from(source));
        }
        Ok(Self { overrides })
    }

    pub fn with_override(mut self, id: TemplateId, pattern: Pattern) -> Self {
        self.overrides.insert(id, pattern);
        self
    }

    pub fn pattern(&self, id: TemplateId) -> Pattern {
        self.overrides.get(&id).cloned().unwrap_or_else(|| english(id))
    }

    fn render(&self, id: TemplateId, count: Option<i64>, args: &[Arg]) -> Result<FormattedText, FormatError> {
        let pattern = self.pattern(id);
        substitute(id, pattern.select(count), count, args)
    }
}

impl Localizer for TemplateCatalog {
    fn string(&self, id: TemplateId) -> String {
        self.pattern(id).select(None).to_string()
    }

    fn format(&self, id: TemplateId, args: &[Arg]) -> Result<FormattedText, FormatError> {
        self.render(id, None, args)
    }

    fn plural(&self, id: TemplateId, count: i64, args: &[Arg]) -> Result<FormattedText, FormatError> {
        self.render(id, Some(count), args)
    }

    fn date(&self, unix_seconds: i64) -> String {
        match DateTime::<Utc>::from_timestamp(unix_seconds, 0) {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => unix_seconds.to_string(),
        }
    }

    fn timestamp(&self, unix_seconds: i64) -> String {
        match DateTime::<Utc>::from_timestamp(unix_seconds, 0) {
            Some(date) => date.format("%b %-d, %Y at %H:%M").to_string(),
            None => unix_seconds.to_string(),
        }
    }
}

fn substitute(
    template: TemplateId,
    pattern: &str,
    count: Option<i64>,
    args: &[Arg],
) -> Result<FormattedText, FormatError> {
    let mut text = String::with_capacity(pattern.len() + 16);
    let mut entities = Vec::new();
    let mut rest = pattern;
    let mut consumed = 0;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or(FormatError::MalformedPlaceholder {
            template,
            position: consumed + open,
        })?;
        let key = &after[..close];
        if key == "n" {
            let count = count.ok_or(FormatError::MissingCount { template })?;
            text.push_str(&count.to_string());
        } else {
            let index: usize = key.parse().map_err(|_| FormatError::MalformedPlaceholder {
                template,
                position: consumed + open,
            })?;
            let arg = args.get(index).ok_or(FormatError::MissingArgument {
                template,
                index,
                provided: args.len(),
            })?;
            let value = arg.as_str();
            if matches!(arg, Arg::Bold(_)) && !value.is_empty() {
                entities.push(TextEntity::new(utf16_len(&text), utf16_len(&value), EntityKind::Bold));
            }
            text.push_str(&value);
        }
        let advance = open + 1 + close + 1;
        consumed += advance;
        rest = &rest[advance..];
    }
    text.push_str(rest);

    Ok(FormattedText::new(text, entities))
}

fn simple(text: &'static str) -> Pattern {
    Pattern::Simple(Cow::Borrowed(text))
}

fn plural(one: &'static str, other: &'static str) -> Pattern {
    Pattern::Plural {
        one: Cow::Borrowed(one),
        other: Cow::Borrowed(other),
    }
}

fn english(id: TemplateId) -> Pattern {
    use TemplateId::*;
    match id {
        DeletedMessage => simple("Deleted message"),
        YouHaveNewMessage => simple("Message"),
        UnsupportedMessage => simple("Unsupported message"),
        UnsupportedMessageType => simple("This message is not supported by your version of the app"),

        ChatContentPhoto => simple("Photo"),
        ChatContentVideo => simple("Video"),
        ChatContentFile => simple("File"),
        ChatContentVoice => simple("Voice message"),
        ChatContentRoundVideo => simple("Video message"),
        ChatContentAnimation => simple("GIF"),
        ChatContentVoiceDuration => simple("{0} ({1})"),
        ChatContentSong => simple("{0} \u{2013} {1}"),
        UnknownTrack => simple("Unknown track"),
        AudioUnknownArtist => simple("Unknown artist"),
        AttachContact => simple("Contact"),
        Poll => simple("Poll"),
        Quiz => simple("Quiz"),
        AttachLiveLocation => simple("Live location"),
        Location => simple("Location"),
        Sticker => simple("Sticker"),
        AnimatedSticker => simple("Animated sticker"),
        SelfDestructPhoto => simple("Self-destructing photo"),
        SelfDestructVideo => simple("Self-destructing video"),
        AttachPhotoExpired => simple("Photo has expired"),
        AttachVideoExpired => simple("Video has expired"),
        ChatContentPinned => simple("Pinned message"),

        YouTookAScreenshot => simple("You took a screenshot"),
        ChatContentScreenshot => simple("Screenshot"),
        XTookAScreenshot => simple("{0} took a screenshot"),
        NotificationGame => simple("invited you to play {0}"),
        NotificationGameOutgoing => simple("You invited to play {0}"),
        NotificationGameGroup => simple("invited the group to play {0}"),
        NotificationGameGroupOutgoing => simple("You invited the group to play {0}"),
        GameActionScored => plural("scored {n} point", "scored {n} points"),
        GameActionYouScored => plural("You scored {n} point", "You scored {n} points"),
        GameActionScoredInGame => plural("scored {n} point in {0}", "scored {n} points in {0}"),
        GameActionYouScoredInGame => plural("You scored {n} point in {0}", "You scored {n} points in {0}"),
        Invoice => simple("Invoice"),
        InvoiceFor => simple("Invoice for {0}"),
        RecurringPayment => simple("Recurring payment"),
        PaidX => simple("Paid {0}"),
        PaymentSuccessfullyPaidNoItem => simple("You successfully transferred {0} to {1}"),
        NotificationContactJoined => simple("{0} joined"),

        ActionCreateChannel => simple("Channel created"),
        GroupCreate => simple("created the group"),
        GroupCreateOutgoing => simple("You created the group"),
        GroupJoin => simple("joined the group via invite link"),
        GroupJoinOutgoing => simple("You joined the group via invite link"),
        GroupAccept => simple("was accepted to the group"),
        GroupAcceptOutgoing => simple("You were accepted to the group"),
        ActionChannelChangedPhoto => simple("Channel photo updated"),
        GroupPhoto => simple("changed the group photo"),
        GroupPhotoOutgoing => simple("You changed the group photo"),
        ActionChannelRemovedPhoto => simple("Channel photo removed"),
        GroupPhotoRemove => simple("removed the group photo"),
        GroupPhotoRemoveOutgoing => simple("You removed the group photo"),
        ActionChannelChangedTitleTo => simple("Channel renamed to \"{0}\""),
        GroupName => simple("changed the group name to \"{0}\""),
        GroupNameOutgoing => simple("You changed the group name to \"{0}\""),
        ThemeDisabled => simple("disabled the chat theme"),
        ThemeDisabledOutgoing => simple("You disabled the chat theme"),
        ThemeSet => simple("changed the chat theme to {0}"),
        ThemeSetOutgoing => simple("You changed the chat theme to {0}"),
        GroupUpgraded => simple("Group upgraded to supergroup"),

        GroupJoinPublic => simple("joined the group"),
        GroupJoinPublicOutgoing => simple("You joined the group"),
        GroupReturn => simple("returned to the group"),
        GroupReturnOutgoing => simple("You returned to the group"),
        GroupAddYou => simple("added you"),
        GroupAdd => simple("added {0}"),
        GroupAddOutgoing => simple("You added {0}"),
        GroupAddMembers => plural("added {n} member", "added {n} members"),
        GroupAddMembersOutgoing => plural("You added {n} member", "You added {n} members"),
        GroupLeft => simple("left the group"),
        GroupLeftOutgoing => simple("You left the group"),
        GroupKickYou => simple("removed you"),
        GroupKick => simple("removed {0}"),
        GroupKickOutgoing => simple("You removed {0}"),

        TtlSeconds => plural("set messages to auto-delete in {0} second", "set messages to auto-delete in {0} seconds"),
        TtlMinutes => plural("set messages to auto-delete in {0} minute", "set messages to auto-delete in {0} minutes"),
        TtlHours => plural("set messages to auto-delete in {0} hour", "set messages to auto-delete in {0} hours"),
        TtlDays => plural("set messages to auto-delete in {0} day", "set messages to auto-delete in {0} days"),
        TtlWeeks => plural("set messages to auto-delete in {0} week", "set messages to auto-delete in {0} weeks"),
        TtlMonths => plural("set messages to auto-delete in {0} month", "set messages to auto-delete in {0} months"),
        TtlOff => simple("disabled the auto-delete timer"),
        ChannelTtlSeconds => plural("New posts will auto-delete in {0} second", "New posts will auto-delete in {0} seconds"),
        ChannelTtlMinutes => plural("New posts will auto-delete in {0} minute", "New posts will auto-delete in {0} minutes"),
        ChannelTtlHours => plural("New posts will auto-delete in {0} hour", "New posts will auto-delete in {0} hours"),
        ChannelTtlDays => plural("New posts will auto-delete in {0} day", "New posts will auto-delete in {0} days"),
        ChannelTtlWeeks => plural("New posts will auto-delete in {0} week", "New posts will auto-delete in {0} weeks"),
        ChannelTtlMonths => plural("New posts will auto-delete in {0} month", "New posts will auto-delete in {0} months"),
        ChannelTtlOff => simple("Auto-delete for new posts disabled"),
        GroupTtlSeconds => plural("New messages will auto-delete in {0} second", "New messages will auto-delete in {0} seconds"),
        GroupTtlMinutes => plural("New messages will auto-delete in {0} minute", "New messages will auto-delete in {0} minutes"),
        GroupTtlHours => plural("New messages will auto-delete in {0} hour", "New messages will auto-delete in {0} hours"),
        GroupTtlDays => plural("New messages will auto-delete in {0} day", "New messages will auto-delete in {0} days"),
        GroupTtlWeeks => plural("New messages will auto-delete in {0} week", "New messages will auto-delete in {0} weeks"),
        GroupTtlMonths => plural("New messages will auto-delete in {0} month", "New messages will auto-delete in {0} months"),
        GroupTtlOff => simple("Auto-delete for new messages disabled"),

        ChatContentDice => simple("Dice"),
        ChatContentDiceRolled => plural("rolled {n}", "rolled {n}"),
        ChatContentDart => simple("Dart"),
        ChatContentDart1 => simple("Missed the target"),
        ChatContentDart2 => simple("Hit the outer ring"),
        ChatContentDart3 => simple("Hit the second ring"),
        ChatContentDart4 => simple("Hit the third ring"),
        ChatContentDart5 => simple("Almost a bullseye"),
        ChatContentDart6 => simple("Bullseye!"),

        OutgoingCall => simple("Outgoing call"),
        IncomingCall => simple("Incoming call"),
        CallMessageIncomingDeclined => simple("Declined call"),
        CallMessageOutgoingMissed => simple("Cancelled call"),
        MissedCall => simple("Missed call"),
        ChatContentCallWithDuration => simple("{0} ({1})"),
        LiveStreamStarted => simple("started a live stream"),
        LiveStreamStartedOutgoing => simple("You started a live stream"),
        VoiceChatStarted => simple("started a voice chat"),
        VoiceChatStartedOutgoing => simple("You started a voice chat"),
        LiveStreamFinished => simple("Live stream finished ({0})"),
        LiveStreamFinishedOutgoing => simple("You ended the live stream ({0})"),
        VoiceChatFinished => simple("Voice chat finished ({0})"),
        VoiceChatFinishedOutgoing => simple("You ended the voice chat ({0})"),
        LiveStreamScheduledOn => simple("Live stream scheduled for {0}"),
        VideoChatScheduledFor => simple("Voice chat scheduled for {0}"),
        LiveStreamInviteYou => simple("invited you to the live stream"),
        LiveStreamInvite => simple("invited {0} to the live stream"),
        LiveStreamInviteOutgoing => simple("You invited {0} to the live stream"),
        LiveStreamInviteMulti => plural("invited {n} member to the live stream", "invited {n} members to the live stream"),
        LiveStreamInviteMultiOutgoing => plural(
            "You invited {n} member to the live stream",
            "You invited {n} members to the live stream",
        ),
        VoiceChatInviteYou => simple("invited you to the voice chat"),
        VoiceChatInvite => simple("invited {0} to the voice chat"),
        VoiceChatInviteOutgoing => simple("You invited {0} to the voice chat"),
        VoiceChatInviteMulti => plural("invited {n} member to the voice chat", "invited {n} members to the voice chat"),
        VoiceChatInviteMultiOutgoing => plural(
            "You invited {n} member to the voice chat",
            "You invited {n} members to the voice chat",
        ),

        ProximityYouKm => plural("You are now within {n} km from {0}", "You are now within {n} km from {0}"),
        ProximityYouM => plural("You are now within {n} m from {0}", "You are now within {n} m from {0}"),
        ProximityFromYouKm => plural("{0} is now within {n} km from you", "{0} is now within {n} km from you"),
        ProximityFromYouM => plural("{0} is now within {n} m from you", "{0} is now within {n} m from you"),
        ProximityKm => plural("{0} is now within {n} km from {1}", "{0} is now within {n} km from {1}"),
        ProximityM => plural("{0} is now within {n} m from {1}", "{0} is now within {n} m from {1}"),

        YouGiftedPremium => plural(
            "You gifted {n} month of Premium for {0}",
            "You gifted {n} months of Premium for {0}",
        ),
        GiftedPremium => plural("{0} gifted {n} month of Premium for {1}", "{0} gifted {n} months of Premium for {1}"),
        YouGiftedPremiumCode => plural("You gifted a {n}-month Premium code", "You gifted a {n}-month Premium code"),
        GiftedPremiumCode => plural("{0} gifted you a {n}-month Premium code", "{0} gifted you a {n}-month Premium code"),
        Giveaway => simple("Giveaway"),
        FormatGiveawayInfo => simple("{0}: {1}"),
        XFutureWinners => plural("{n} winner will be selected", "{n} winners will be selected"),
        XFutureWinnersOn => plural("{n} winner will be selected on {0}", "{n} winners will be selected on {0}"),
        XPastWinnersOn => plural("{n} winner was selected on {0}", "{n} winners were selected on {0}"),
        BoostingGiveawayJustStarted => simple("Giveaway started"),
        BoostingGiveawayServiceWinnersSelected => plural(
            "{n} winner of the giveaway was selected",
            "{n} winners of the giveaway were selected",
        ),

        BotWebappAllowed => simple("You allowed this bot to message you when you logged in on {0}"),
        BotAttachAllowed => simple("You allowed this bot to message you when you added it to the attachment menu"),
        BotAppAllowed => simple("You allowed this bot to message you"),
        BotDataSent => simple("Data from the \"{0}\" button was transferred to the bot"),

        XNewMessages => plural("{n} new message", "{n} new messages"),
        XForwards => plural("{n} forwarded message", "{n} forwarded messages"),
        XPhotos => plural("{n} photo", "{n} photos"),
        XVideos => plural("{n} video", "{n} videos"),
        XFiles => plural("{n} file", "{n} files"),
        XAudios => plural("{n} audio", "{n} audios"),
        XMedia => plural("{n} media", "{n} media"),

        XSec => plural("{n} sec", "{n} sec"),
        XMin => plural("{n} min", "{n} min"),
        XSeconds => plural("{n} second", "{n} seconds"),
        XMinutes => plural("{n} minute", "{n} minutes"),
        FormatMinutesAndSeconds => simple("{0} {1}"),

        ActionPinnedText => simple("{0} pinned \"{1}\""),
        ActionPinnedNoText => simple("{0} pinned a message"),
        ActionPinnedPhoto => simple("{0} pinned a photo"),
        ActionPinnedVideo => simple("{0} pinned a video"),
        ActionPinnedGif => simple("{0} pinned a GIF"),
        ActionPinnedFile => simple("{0} pinned a file"),
        ActionPinnedSticker => simple("{0} pinned a sticker"),
        ActionPinnedGeoLive => simple("{0} pinned a live location"),
        ActionPinnedGeo => simple("{0} pinned a map"),
        ActionPinnedPoll => simple("{0} pinned a poll"),
        ActionPinnedQuiz => simple("{0} pinned a quiz"),
        ActionPinnedMusic => simple("{0} pinned a music file"),
        ActionPinnedRound => simple("{0} pinned a video message"),
        ActionPinnedStory => simple("{0} pinned a story"),
        ActionPinnedVoice => simple("{0} pinned a voice message"),
        ActionPinnedGame => simple("{0} pinned a game"),
        ActionPinnedGameNoName => simple("{0} pinned a game"),
        ActionPinnedContact => simple("{0} pinned a contact"),
        ActionPinnedGiveaway => simple("{0} pinned a giveaway"),
    }
}
