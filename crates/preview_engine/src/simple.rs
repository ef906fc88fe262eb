//! Generic sub-dispatch shared by message and push previews.
//!
//! Each [`SimpleKind`] maps to an icon, a placeholder and a rule for using
//! the literal argument. Kinds that need the full message or other messages
//! are handled before reaching this table.

use preview_core::{
    format_or_bare, full_duration, icon, largest_unit, plural_or_bare, Arg, ChatId, DurationUnit,
    FormattedText, Icon, MessageSender, PollKind, PreviewDescriptor, TemplateId, DART_EMOJI,
    DICE_EMOJI,
};

use crate::previewer::Previewer;

/// Prefix on a sticker argument marking the sticker as animated.
pub(crate) const ANIMATED_MARKER: &str = "animated";
/// Location argument marking an active live location.
pub(crate) const LIVE_MARKER: &str = "live";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallOutcome {
    Declined,
    Missed,
    /// Zero when the call never connected.
    Ended { duration: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SimpleKind {
    Text { has_link: bool },
    AnimatedEmoji,
    Photo,
    Video,
    Document,
    Audio,
    Contact,
    Poll(PollKind),
    VoiceNote,
    VideoNote,
    Animation,
    Location,
    Venue,
    Sticker,
    ScreenshotTaken,
    Game,
    Invoice { recurring: bool },
    ContactRegistered,
    SupergroupChatCreate,
    BasicGroupChatCreate,
    ChatJoinByLink,
    ChatJoinByRequest,
    ChatChangePhoto,
    ChatDeletePhoto,
    ChatChangeTitle,
    ChatSetTheme,
    AutoDeleteTime { seconds: i32 },
    Dice { value: i32 },
    ExpiredPhoto,
    ExpiredVideo,
    Call(CallOutcome),
    ChatUpgrade,
    GiveawayCreated,
    GiveawayCompleted { winner_count: i32 },
    Giveaway { winner_count: i32 },
    /// Known content without a dedicated preview yet.
    Unsupported,
    /// Content this client does not know at all.
    UnsupportedType,
}

pub(crate) struct SimpleContext<'a> {
    pub chat_id: ChatId,
    pub sender: Option<MessageSender>,
    /// Name shipped with a push; takes precedence over a store lookup.
    pub sender_name: Option<&'a str>,
    pub is_outgoing: bool,
    pub is_chat_list: bool,
}

/// Literal text accompanying a preview: a caption, a title, a marker.
#[derive(Debug, Clone, Default)]
pub(crate) struct Argument {
    pub text: Option<FormattedText>,
    pub translatable: bool,
}

impl Argument {
    pub fn none() -> Self {
        Self::default()
    }

    /// User content, never retranslated.
    pub fn verbatim(text: FormattedText) -> Self {
        Self {
            text: Some(text),
            translatable: false,
        }
    }

    pub fn plain(text: impl Into<String>, translatable: bool) -> Self {
        let text = text.into();
        Self {
            text: (!text.is_empty()).then(|| FormattedText::plain(text)),
            translatable,
        }
    }

    fn as_str(&self) -> &str {
        self.text.as_ref().map(|text| text.text.as_str()).unwrap_or("")
    }
}

impl Previewer {
    pub(crate) fn simple_preview(
        &self,
        kind: SimpleKind,
        context: &SimpleContext<'_>,
        argument: Argument,
    ) -> PreviewDescriptor {
        let lang = self.lang();
        let outgoing = |incoming: TemplateId, outgoing: TemplateId| {
            if context.is_outgoing {
                outgoing
            } else {
                incoming
            }
        };
        let with_argument = |icon: Icon, placeholder: TemplateId, argument: Argument| {
            PreviewDescriptor::new(Some(icon), Some(placeholder), argument.text, argument.translatable)
        };

        match kind {
            SimpleKind::Text { has_link } => PreviewDescriptor::new(
                has_link.then_some(icon::LINK),
                Some(TemplateId::YouHaveNewMessage),
                argument.text,
                argument.translatable,
            ),
            SimpleKind::AnimatedEmoji => PreviewDescriptor::new(
                None,
                Some(TemplateId::YouHaveNewMessage),
                argument.text,
                argument.translatable,
            ),
            SimpleKind::Photo => with_argument(icon::PHOTO, TemplateId::ChatContentPhoto, argument),
            SimpleKind::Video => with_argument(icon::VIDEO, TemplateId::ChatContentVideo, argument),
            SimpleKind::Document => with_argument(icon::FILE, TemplateId::ChatContentFile, argument),
            SimpleKind::Audio => {
                PreviewDescriptor::new(Some(icon::AUDIO), None, argument.text, argument.translatable)
            }
            SimpleKind::Contact => with_argument(icon::CONTACT, TemplateId::AttachContact, argument),
            SimpleKind::Poll(PollKind::Quiz) => with_argument(icon::QUIZ, TemplateId::Quiz, argument),
            SimpleKind::Poll(PollKind::Regular) => with_argument(icon::POLL, TemplateId::Poll, argument),
            SimpleKind::VoiceNote => with_argument(icon::VOICE, TemplateId::ChatContentVoice, argument),
            SimpleKind::VideoNote => with_argument(icon::ROUND_VIDEO, TemplateId::ChatContentRoundVideo, argument),
            SimpleKind::Animation => with_argument(icon::GIF, TemplateId::ChatContentAnimation, argument),
            SimpleKind::Location => {
                let placeholder = if argument.as_str() == LIVE_MARKER {
                    TemplateId::AttachLiveLocation
                } else {
                    TemplateId::Location
                };
                PreviewDescriptor::placeholder(Some(icon::LOCATION), placeholder)
            }
            SimpleKind::Venue => PreviewDescriptor::placeholder(Some(icon::LOCATION), TemplateId::Location),
            SimpleKind::Sticker => {
                let (emoji, is_animated) = match argument.as_str().strip_prefix(ANIMATED_MARKER) {
                    Some(emoji) => (emoji, true),
                    None => (argument.as_str(), false),
                };
                let placeholder = if is_animated && !context.is_chat_list {
                    TemplateId::AnimatedSticker
                } else {
                    TemplateId::Sticker
                };
                let icon = (!emoji.is_empty()).then(|| Icon::emoji(emoji));
                PreviewDescriptor::placeholder(icon, placeholder)
            }
            SimpleKind::ScreenshotTaken => {
                if context.is_outgoing {
                    PreviewDescriptor::placeholder(Some(icon::SCREENSHOT), TemplateId::YouTookAScreenshot)
                } else if context.is_chat_list {
                    PreviewDescriptor::placeholder(Some(icon::SCREENSHOT), TemplateId::ChatContentScreenshot)
                } else {
                    let sender = self.sender_display_name(context.sender.as_ref(), context.sender_name);
                    PreviewDescriptor::text(
                        Some(icon::SCREENSHOT),
                        format_or_bare(lang, TemplateId::XTookAScreenshot, &[Arg::Text(sender)]),
                        true,
                    )
                }
            }
            SimpleKind::Game => {
                let template = if self.store.chat_kind(context.chat_id).is_multi_chat() {
                    outgoing(TemplateId::NotificationGameGroup, TemplateId::NotificationGameGroupOutgoing)
                } else {
                    outgoing(TemplateId::NotificationGame, TemplateId::NotificationGameOutgoing)
                };
                PreviewDescriptor::text(
                    Some(icon::GAME),
                    format_or_bare(lang, template, &[Arg::text(argument.as_str())]),
                    true,
                )
            }
            SimpleKind::Invoice { recurring } => {
                let (placeholder, phrase) = if recurring {
                    (TemplateId::RecurringPayment, TemplateId::PaidX)
                } else {
                    (TemplateId::Invoice, TemplateId::InvoiceFor)
                };
                let text = (!argument.as_str().is_empty())
                    .then(|| format_or_bare(lang, phrase, &[Arg::text(argument.as_str())]));
                PreviewDescriptor::new(Some(icon::INVOICE), Some(placeholder), text, true)
            }
            SimpleKind::ContactRegistered => {
                let sender = self.sender_display_name(context.sender.as_ref(), context.sender_name);
                PreviewDescriptor::text(
                    Some(icon::USER_JOINED),
                    format_or_bare(lang, TemplateId::NotificationContactJoined, &[Arg::Text(sender)]),
                    true,
                )
            }
            SimpleKind::SupergroupChatCreate if self.is_channel(context.chat_id) => {
                PreviewDescriptor::placeholder(Some(icon::CHANNEL), TemplateId::ActionCreateChannel)
            }
            SimpleKind::SupergroupChatCreate | SimpleKind::BasicGroupChatCreate => PreviewDescriptor::placeholder(
                Some(icon::GROUP),
                outgoing(TemplateId::GroupCreate, TemplateId::GroupCreateOutgoing),
            ),
            SimpleKind::ChatJoinByLink => PreviewDescriptor::placeholder(
                Some(icon::GROUP),
                outgoing(TemplateId::GroupJoin, TemplateId::GroupJoinOutgoing),
            ),
            SimpleKind::ChatJoinByRequest => PreviewDescriptor::placeholder(
                Some(icon::GROUP),
                outgoing(TemplateId::GroupAccept, TemplateId::GroupAcceptOutgoing),
            ),
            SimpleKind::ChatChangePhoto => {
                let placeholder = if self.is_channel(context.chat_id) {
                    TemplateId::ActionChannelChangedPhoto
                } else {
                    outgoing(TemplateId::GroupPhoto, TemplateId::GroupPhotoOutgoing)
                };
                PreviewDescriptor::placeholder(Some(icon::PHOTO), placeholder)
            }
            SimpleKind::ChatDeletePhoto => {
                if self.is_channel(context.chat_id) {
                    PreviewDescriptor::placeholder(Some(icon::CHANNEL), TemplateId::ActionChannelRemovedPhoto)
                } else {
                    PreviewDescriptor::placeholder(
                        Some(icon::GROUP),
                        outgoing(TemplateId::GroupPhotoRemove, TemplateId::GroupPhotoRemoveOutgoing),
                    )
                }
            }
            SimpleKind::ChatChangeTitle => {
                let title = [Arg::text(argument.as_str())];
                if self.is_channel(context.chat_id) {
                    PreviewDescriptor::text(
                        Some(icon::CHANNEL),
                        format_or_bare(lang, TemplateId::ActionChannelChangedTitleTo, &title),
                        true,
                    )
                } else {
                    PreviewDescriptor::text(
                        Some(icon::GROUP),
                        format_or_bare(lang, outgoing(TemplateId::GroupName, TemplateId::GroupNameOutgoing), &title),
                        true,
                    )
                }
            }
            SimpleKind::ChatSetTheme => {
                if argument.as_str().is_empty() {
                    PreviewDescriptor::placeholder(
                        Some(icon::THEME),
                        outgoing(TemplateId::ThemeDisabled, TemplateId::ThemeDisabledOutgoing),
                    )
                } else {
                    PreviewDescriptor::text(
                        Some(icon::THEME),
                        format_or_bare(
                            lang,
                            outgoing(TemplateId::ThemeSet, TemplateId::ThemeSetOutgoing),
                            &[Arg::bold(argument.as_str())],
                        ),
                        true,
                    )
                }
            }
            SimpleKind::AutoDeleteTime { seconds } => self.auto_delete_preview(context.chat_id, seconds),
            SimpleKind::Dice { value } => self.dice_preview(argument.as_str(), value),
            SimpleKind::ExpiredPhoto => {
                PreviewDescriptor::placeholder(Some(icon::SECRET_PHOTO), TemplateId::AttachPhotoExpired)
            }
            SimpleKind::ExpiredVideo => {
                PreviewDescriptor::placeholder(Some(icon::SECRET_VIDEO), TemplateId::AttachVideoExpired)
            }
            SimpleKind::Call(CallOutcome::Declined) => PreviewDescriptor::placeholder(
                Some(icon::CALL_DECLINED),
                outgoing(TemplateId::CallMessageIncomingDeclined, TemplateId::OutgoingCall),
            ),
            SimpleKind::Call(CallOutcome::Missed) => PreviewDescriptor::placeholder(
                Some(icon::CALL_MISSED),
                outgoing(TemplateId::MissedCall, TemplateId::CallMessageOutgoingMissed),
            ),
            SimpleKind::Call(CallOutcome::Ended { duration }) => {
                let direction = outgoing(TemplateId::IncomingCall, TemplateId::OutgoingCall);
                if duration > 0 {
                    PreviewDescriptor::text(
                        Some(icon::CALL),
                        format_or_bare(
                            lang,
                            TemplateId::ChatContentCallWithDuration,
                            &[Arg::Text(lang.string(direction)), Arg::Text(full_duration(lang, duration))],
                        ),
                        true,
                    )
                } else {
                    PreviewDescriptor::placeholder(Some(icon::CALL), direction)
                }
            }
            SimpleKind::ChatUpgrade => PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupUpgraded),
            SimpleKind::GiveawayCreated => {
                PreviewDescriptor::placeholder(Some(icon::GIFT), TemplateId::BoostingGiveawayJustStarted)
            }
            SimpleKind::GiveawayCompleted { winner_count } => PreviewDescriptor::text(
                Some(icon::GIFT),
                plural_or_bare(
                    lang,
                    TemplateId::BoostingGiveawayServiceWinnersSelected,
                    i64::from(winner_count),
                    &[],
                ),
                true,
            ),
            SimpleKind::Giveaway { winner_count } => self.giveaway_summary(winner_count),
            SimpleKind::Unsupported => PreviewDescriptor::placeholder(Some(icon::QUIZ), TemplateId::UnsupportedMessage),
            SimpleKind::UnsupportedType => {
                PreviewDescriptor::placeholder(Some(icon::QUIZ), TemplateId::UnsupportedMessageType)
            }
        }
    }

    fn auto_delete_preview(&self, chat_id: ChatId, seconds: i32) -> PreviewDescriptor {
        let chat_kind = self.store.chat_kind(chat_id);
        let family = if chat_kind.is_user_chat() {
            TtlFamily::User
        } else if self.is_channel(chat_id) {
            TtlFamily::Channel
        } else {
            TtlFamily::Group
        };
        if seconds <= 0 {
            return PreviewDescriptor::placeholder(Some(icon::TIMER_OFF), family.disabled());
        }
        let (unit, count) = largest_unit(i64::from(seconds));
        let duration = [Arg::bold(count.to_string())];
        PreviewDescriptor::text(
            Some(icon::TIMER),
            plural_or_bare(self.lang(), family.template(unit), count, &duration),
            true,
        )
    }

    /// Dice and darts are recognized by their exact emoji.
    fn dice_preview(&self, emoji: &str, value: i32) -> PreviewDescriptor {
        let emoji = if !emoji.is_empty() && self.store.is_dice_emoji(emoji) {
            emoji
        } else {
            DICE_EMOJI
        };
        if emoji == DART_EMOJI {
            return PreviewDescriptor::placeholder(Some(icon::DART), dart_template(value));
        }
        if emoji == DICE_EMOJI {
            return match icon::dice_face(value) {
                Some(face) => PreviewDescriptor::text(
                    Some(face),
                    plural_or_bare(self.lang(), TemplateId::ChatContentDiceRolled, i64::from(value), &[]),
                    true,
                ),
                None => PreviewDescriptor::placeholder(Some(icon::DICE), TemplateId::ChatContentDice),
            };
        }
        PreviewDescriptor::new(Some(Icon::emoji(emoji)), None, None, false)
    }

    fn giveaway_summary(&self, winner_count: i32) -> PreviewDescriptor {
        let lang = self.lang();
        let text = if winner_count > 0 {
            let winners = plural_or_bare(lang, TemplateId::XFutureWinners, i64::from(winner_count), &[]);
            format_or_bare(
                lang,
                TemplateId::FormatGiveawayInfo,
                &[Arg::Text(lang.string(TemplateId::Giveaway)), Arg::Text(winners.text)],
            )
        } else {
            FormattedText::plain(lang.string(TemplateId::Giveaway))
        };
        PreviewDescriptor::text(Some(icon::GIFT), text, true)
    }
}

fn dart_template(value: i32) -> TemplateId {
    match value {
        0 => TemplateId::ChatContentDart,
        1 => TemplateId::ChatContentDart1,
        2 => TemplateId::ChatContentDart2,
        3 => TemplateId::ChatContentDart3,
        4 => TemplateId::ChatContentDart4,
        6 => TemplateId::ChatContentDart6,
        _ => TemplateId::ChatContentDart5,
    }
}

#[derive(Debug, Clone, Copy)]
enum TtlFamily {
    User,
    Channel,
    Group,
}

impl TtlFamily {
    fn template(self, unit: DurationUnit) -> TemplateId {
        use DurationUnit::*;
        match (self, unit) {
            (TtlFamily::User, Seconds) => TemplateId::TtlSeconds,
            (TtlFamily::User, Minutes) => TemplateId::TtlMinutes,
            (TtlFamily::User, Hours) => TemplateId::TtlHours,
            (TtlFamily::User, Days) => TemplateId::TtlDays,
            (TtlFamily::User, Weeks) => TemplateId::TtlWeeks,
            (TtlFamily::User, Months) => TemplateId::TtlMonths,
            (TtlFamily::Channel, Seconds) => TemplateId::ChannelTtlSeconds,
            (TtlFamily::Channel, Minutes) => TemplateId::ChannelTtlMinutes,
            (TtlFamily::Channel, Hours) => TemplateId::ChannelTtlHours,
            (TtlFamily::Channel, Days) => TemplateId::ChannelTtlDays,
            (TtlFamily::Channel, Weeks) => TemplateId::ChannelTtlWeeks,
            (TtlFamily::Channel, Months) => TemplateId::ChannelTtlMonths,
            (TtlFamily::Group, Seconds) => TemplateId::GroupTtlSeconds,
            (TtlFamily::Group, Minutes) => TemplateId::GroupTtlMinutes,
            (TtlFamily::Group, Hours) => TemplateId::GroupTtlHours,
            (TtlFamily::Group, Days) => TemplateId::GroupTtlDays,
            (TtlFamily::Group, Weeks) => TemplateId::GroupTtlWeeks,
            (TtlFamily::Group, Months) => TemplateId::GroupTtlMonths,
        }
    }

    fn disabled(self) -> TemplateId {
        match self {
            TtlFamily::User => TemplateId::TtlOff,
            TtlFamily::Channel => TemplateId::ChannelTtlOff,
            TtlFamily::Group => TemplateId::GroupTtlOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dart_value_five_is_also_the_fallback() {
        assert_eq!(dart_template(0), TemplateId::ChatContentDart);
        assert_eq!(dart_template(6), TemplateId::ChatContentDart6);
        assert_eq!(dart_template(5), TemplateId::ChatContentDart5);
        assert_eq!(dart_template(42), TemplateId::ChatContentDart5);
    }

    #[test]
    fn empty_argument_text_is_dropped() {
        assert!(Argument::plain("", true).text.is_none());
        assert_eq!(Argument::plain("Quiz night", false).as_str(), "Quiz night");
    }
}
