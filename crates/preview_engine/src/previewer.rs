use std::sync::Arc;

use preview_core::{
    format_duration, format_or_bare, full_name, icon, is_empty_or_invisible, substring_utf16,
    utf16_len, Arg, AudioInfo, CallDiscardReason, ChatId, ChatKind, EntityKind, FormattedText,
    Localizer, Message, MessageContent, MessageSender, PreviewDescriptor, TemplateId,
};
use preview_logging::preview_trace;

use crate::config::{LookupMode, PreviewConfig};
use crate::simple::{Argument, CallOutcome, SimpleContext, SimpleKind, ANIMATED_MARKER, LIVE_MARKER};
use crate::store::MessageStore;

/// Per-call switches of the content dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Use captions and message text; otherwise only placeholders.
    pub allow_content: bool,
    /// Rendering a chat-list row rather than a notification or reply.
    pub is_chat_list: bool,
    /// Also consult the chat's own restriction reason.
    pub check_chat_restrictions: bool,
    pub mode: LookupMode,
}

impl PreviewOptions {
    pub fn chat_list(check_chat_restrictions: bool, mode: LookupMode) -> Self {
        Self {
            allow_content: true,
            is_chat_list: true,
            check_chat_restrictions,
            mode,
        }
    }

    pub fn notification(allow_content: bool, mode: LookupMode) -> Self {
        Self {
            allow_content,
            is_chat_list: false,
            check_chat_restrictions: true,
            mode,
        }
    }
}

/// Entry point of preview resolution.
///
/// Cheap to clone; refreshers hold their own clone so they can recurse into
/// dispatch once the data they wait for arrives.
#[derive(Clone)]
pub struct Previewer {
    pub(crate) store: Arc<dyn MessageStore>,
    pub(crate) lang: Arc<dyn Localizer>,
    pub(crate) config: Arc<PreviewConfig>,
}

enum Dispatch {
    Done(PreviewDescriptor),
    Simple {
        kind: SimpleKind,
        alternative: Option<String>,
        alternative_translatable: bool,
    },
}

impl Dispatch {
    fn simple(kind: SimpleKind) -> Self {
        Dispatch::Simple {
            kind,
            alternative: None,
            alternative_translatable: false,
        }
    }

    fn with_alternative(kind: SimpleKind, alternative: impl Into<String>) -> Self {
        let alternative = alternative.into();
        Dispatch::Simple {
            kind,
            alternative: (!alternative.is_empty()).then_some(alternative),
            alternative_translatable: false,
        }
    }
}

impl Previewer {
    pub fn new(store: Arc<dyn MessageStore>, lang: Arc<dyn Localizer>, config: PreviewConfig) -> Self {
        Self {
            store,
            lang,
            config: Arc::new(config),
        }
    }

    pub fn lang(&self) -> &dyn Localizer {
        self.lang.as_ref()
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn chat_list_preview(
        &self,
        chat_id: ChatId,
        message: Option<&Message>,
        check_chat_restrictions: bool,
        mode: LookupMode,
    ) -> PreviewDescriptor {
        self.content_preview(chat_id, message, PreviewOptions::chat_list(check_chat_restrictions, mode))
    }

    pub fn notification_preview(
        &self,
        chat_id: ChatId,
        message: Option<&Message>,
        allow_content: bool,
        mode: LookupMode,
    ) -> PreviewDescriptor {
        self.content_preview(chat_id, message, PreviewOptions::notification(allow_content, mode))
    }

    /// Resolves the preview of one message.
    ///
    /// A missing message renders as deleted. Restriction reasons and secret
    /// media are decided before looking at the content itself.
    pub fn content_preview(
        &self,
        chat_id: ChatId,
        message: Option<&Message>,
        options: PreviewOptions,
    ) -> PreviewDescriptor {
        let Some(message) = message else {
            return PreviewDescriptor::new(Some(icon::ERROR), Some(TemplateId::DeletedMessage), None, false);
        };

        if self.config.restrict_content {
            if !message.restriction_reason.is_empty() {
                preview_trace!("Message {} in chat {} is restricted", message.id, message.chat_id);
                return restricted(message.restriction_reason.clone());
            }
            if options.check_chat_restrictions && chat_id != 0 {
                if let Some(reason) = self.store.chat_restriction_reason(chat_id) {
                    preview_trace!("Chat {chat_id} is restricted");
                    return restricted(reason);
                }
            }
        }

        let formatted_text = if options.allow_content {
            let pending = if message.is_outgoing {
                self.store.pending_text(message.chat_id, message.id)
            } else {
                None
            };
            pending.or_else(|| message.content.text_or_caption().cloned())
        } else {
            None
        };

        let (kind, alternative, alternative_translatable) =
            match self.dispatch(chat_id, message, formatted_text.as_ref(), options) {
                Dispatch::Done(descriptor) => return descriptor,
                Dispatch::Simple {
                    kind,
                    alternative,
                    alternative_translatable,
                } => (kind, alternative, alternative_translatable),
            };

        let argument = match formatted_text.filter(|text| !text.is_empty()) {
            Some(text) => Argument::verbatim(text),
            None => Argument {
                text: alternative.map(FormattedText::plain),
                translatable: alternative_translatable,
            },
        };
        let context = SimpleContext {
            chat_id,
            sender: Some(message.sender),
            sender_name: None,
            is_outgoing: !message.is_channel_post && message.is_outgoing,
            is_chat_list: options.is_chat_list,
        };
        let descriptor = self.simple_preview(kind, &context, argument);

        if message.media_album_id != 0 && message.combine_mode() != preview_core::CombineMode::None {
            descriptor.with_refresher(self.single_message_album_refresher(message, options), true)
        } else {
            descriptor
        }
    }

    fn dispatch(
        &self,
        chat_id: ChatId,
        message: &Message,
        formatted_text: Option<&FormattedText>,
        options: PreviewOptions,
    ) -> Dispatch {
        let lang = self.lang();
        match &message.content {
            MessageContent::Text { text } => Dispatch::simple(SimpleKind::Text {
                has_link: starts_with_link(text),
            }),
            MessageContent::AnimatedEmoji { emoji } => Dispatch::with_alternative(SimpleKind::AnimatedEmoji, emoji),
            MessageContent::Photo { is_secret: true, .. } => Dispatch::Done(PreviewDescriptor::new(
                Some(icon::SECRET_PHOTO),
                Some(TemplateId::SelfDestructPhoto),
                formatted_text.cloned(),
                false,
            )),
            MessageContent::Video { is_secret: true, .. } => Dispatch::Done(PreviewDescriptor::new(
                Some(icon::SECRET_VIDEO),
                Some(TemplateId::SelfDestructVideo),
                formatted_text.cloned(),
                false,
            )),
            MessageContent::Photo { .. } => Dispatch::simple(SimpleKind::Photo),
            MessageContent::Video { .. } => Dispatch::simple(SimpleKind::Video),
            MessageContent::Animation { .. } => Dispatch::simple(SimpleKind::Animation),
            MessageContent::Document { file_name, .. } => Dispatch::with_alternative(SimpleKind::Document, file_name),
            MessageContent::Audio { audio, .. } => {
                let (song, translatable) = self.song_argument(audio);
                Dispatch::Simple {
                    kind: SimpleKind::Audio,
                    alternative: Some(song),
                    alternative_translatable: translatable,
                }
            }
            MessageContent::VoiceNote { duration, .. } => Dispatch::Simple {
                kind: SimpleKind::VoiceNote,
                alternative: (*duration > 0).then(|| self.media_duration(TemplateId::ChatContentVoice, *duration)),
                alternative_translatable: *duration > 0,
            },
            MessageContent::VideoNote { duration } => Dispatch::Simple {
                kind: SimpleKind::VideoNote,
                alternative: (*duration > 0).then(|| self.media_duration(TemplateId::ChatContentRoundVideo, *duration)),
                alternative_translatable: *duration > 0,
            },
            MessageContent::Contact { first_name, last_name } => {
                Dispatch::with_alternative(SimpleKind::Contact, full_name(first_name, last_name))
            }
            MessageContent::Poll { question, kind } => Dispatch::with_alternative(SimpleKind::Poll(*kind), question),
            MessageContent::Dice { emoji, value } => {
                Dispatch::with_alternative(SimpleKind::Dice { value: *value }, emoji)
            }
            MessageContent::Call {
                discard_reason, duration, ..
            } => {
                let outcome = match discard_reason {
                    CallDiscardReason::Declined => CallOutcome::Declined,
                    CallDiscardReason::Missed => CallOutcome::Missed,
                    CallDiscardReason::Empty | CallDiscardReason::Disconnected | CallDiscardReason::HungUp => {
                        CallOutcome::Ended { duration: *duration }
                    }
                };
                Dispatch::simple(SimpleKind::Call(outcome))
            }
            MessageContent::Location { live_period, expires_in } => {
                let live = *live_period != 0 && *expires_in != 0;
                Dispatch::with_alternative(SimpleKind::Location, if live { LIVE_MARKER } else { "" })
            }
            MessageContent::Venue { .. } => Dispatch::simple(SimpleKind::Venue),
            MessageContent::Game { title } => Dispatch::with_alternative(SimpleKind::Game, title),
            MessageContent::GameScore { game_message_id, score } => {
                Dispatch::Done(self.game_score_preview(message, *game_message_id, *score, options.mode))
            }
            MessageContent::Sticker { emoji, is_animated } => {
                let argument = if *is_animated {
                    format!("{ANIMATED_MARKER}{emoji}")
                } else {
                    emoji.clone()
                };
                Dispatch::with_alternative(SimpleKind::Sticker, argument)
            }
            MessageContent::Invoice {
                currency, total_amount, ..
            } => Dispatch::with_alternative(
                SimpleKind::Invoice { recurring: false },
                preview_core::format_amount(currency, *total_amount),
            ),
            MessageContent::Story { .. } => Dispatch::simple(SimpleKind::Unsupported),
            MessageContent::PinMessage { message_id } => {
                Dispatch::Done(self.pinned_message_preview(chat_id, message, *message_id, options))
            }
            MessageContent::ProximityAlertTriggered {
                traveler,
                watcher,
                distance,
            } => Dispatch::Done(self.proximity_alert_preview(traveler, watcher, *distance)),
            MessageContent::VideoChatStarted => Dispatch::Done(self.video_chat_started_preview(message)),
            MessageContent::VideoChatEnded { duration } => {
                Dispatch::Done(self.video_chat_ended_preview(message, *duration))
            }
            MessageContent::VideoChatScheduled { start_date } => {
                Dispatch::Done(self.video_chat_scheduled_preview(message, *start_date))
            }
            MessageContent::InviteVideoChatParticipants { user_ids } => {
                Dispatch::Done(self.invite_participants_preview(message, user_ids))
            }
            MessageContent::ChatAddMembers { member_user_ids } => {
                Dispatch::Done(self.add_members_preview(message, member_user_ids))
            }
            MessageContent::ChatDeleteMember { user_id } => {
                Dispatch::Done(self.delete_member_preview(message, *user_id))
            }
            MessageContent::ChatChangeTitle { title } => Dispatch::with_alternative(SimpleKind::ChatChangeTitle, title),
            MessageContent::ChatChangePhoto => Dispatch::simple(SimpleKind::ChatChangePhoto),
            MessageContent::ChatDeletePhoto => Dispatch::simple(SimpleKind::ChatDeletePhoto),
            MessageContent::ChatSetMessageAutoDeleteTime { seconds } => {
                Dispatch::simple(SimpleKind::AutoDeleteTime { seconds: *seconds })
            }
            MessageContent::ChatSetTheme { theme_name } => Dispatch::with_alternative(SimpleKind::ChatSetTheme, theme_name),
            MessageContent::ChatSetBackground { .. } => Dispatch::simple(SimpleKind::Unsupported),
            MessageContent::ChatUpgradeTo | MessageContent::ChatUpgradeFrom => Dispatch::simple(SimpleKind::ChatUpgrade),
            MessageContent::BasicGroupChatCreate => Dispatch::simple(SimpleKind::BasicGroupChatCreate),
            MessageContent::SupergroupChatCreate => Dispatch::simple(SimpleKind::SupergroupChatCreate),
            MessageContent::ChatJoinByLink => Dispatch::simple(SimpleKind::ChatJoinByLink),
            MessageContent::ChatJoinByRequest => Dispatch::simple(SimpleKind::ChatJoinByRequest),
            MessageContent::GiftedPremium {
                currency,
                amount,
                month_count,
            } => Dispatch::Done(self.gifted_premium_preview(message, currency, *amount, *month_count)),
            MessageContent::PremiumGiftCode { creator, month_count } => {
                Dispatch::Done(self.premium_gift_code_preview(message, creator.as_ref(), *month_count))
            }
            MessageContent::PremiumGiveawayCreated => Dispatch::simple(SimpleKind::GiveawayCreated),
            MessageContent::PremiumGiveaway {
                winner_count,
                winners_selection_date,
            } => Dispatch::Done(self.giveaway_preview(
                *winner_count,
                *winners_selection_date,
                TemplateId::XFutureWinnersOn,
            )),
            MessageContent::PremiumGiveawayWinners {
                winner_count,
                actual_winners_selection_date,
            } => Dispatch::Done(self.giveaway_preview(
                *winner_count,
                *actual_winners_selection_date,
                TemplateId::XPastWinnersOn,
            )),
            MessageContent::PremiumGiveawayCompleted { winner_count, .. } => {
                Dispatch::simple(SimpleKind::GiveawayCompleted {
                    winner_count: *winner_count,
                })
            }
            MessageContent::CustomServiceAction { text } => Dispatch::Done(PreviewDescriptor::new(
                Some(icon::INFO),
                None,
                Some(FormattedText::plain(text.clone())),
                false,
            )),
            MessageContent::BotWriteAccessAllowed { reason } => Dispatch::Done(self.bot_write_access_preview(reason)),
            MessageContent::WebAppDataSent { button_text } => Dispatch::Done(PreviewDescriptor::text(
                Some(icon::INFO),
                format_or_bare(lang, TemplateId::BotDataSent, &[Arg::text(button_text.clone())]),
                true,
            )),
            MessageContent::PaymentSuccessful {
                currency,
                total_amount,
            } => Dispatch::Done(self.payment_successful_preview(message, currency, *total_amount)),
            MessageContent::ScreenshotTaken => Dispatch::simple(SimpleKind::ScreenshotTaken),
            MessageContent::ExpiredPhoto => Dispatch::simple(SimpleKind::ExpiredPhoto),
            MessageContent::ExpiredVideo => Dispatch::simple(SimpleKind::ExpiredVideo),
            MessageContent::ContactRegistered => Dispatch::simple(SimpleKind::ContactRegistered),
            MessageContent::UsersShared
            | MessageContent::ChatShared
            | MessageContent::SuggestProfilePhoto
            | MessageContent::ForumTopicCreated
            | MessageContent::ForumTopicEdited
            | MessageContent::ForumTopicIsClosedToggled
            | MessageContent::ForumTopicIsHiddenToggled
            | MessageContent::PassportDataSent => Dispatch::simple(SimpleKind::Unsupported),
            MessageContent::Unsupported => Dispatch::simple(SimpleKind::UnsupportedType),
        }
    }

    /// "Voice message (1:05)" style argument for timed media.
    pub(crate) fn media_duration(&self, media: TemplateId, duration: i32) -> String {
        let lang = self.lang();
        format_or_bare(
            lang,
            TemplateId::ChatContentVoiceDuration,
            &[Arg::Text(lang.string(media)), Arg::Text(format_duration(duration))],
        )
        .text
    }

    /// "Title – Performer", translatable when either half is a fallback.
    pub(crate) fn song_argument(&self, audio: &AudioInfo) -> (String, bool) {
        let lang = self.lang();
        let title = if audio.has_title() {
            audio.title.clone()
        } else {
            lang.string(TemplateId::UnknownTrack)
        };
        let subtitle = match audio.subtitle() {
            Some(subtitle) => subtitle.to_string(),
            None => lang.string(TemplateId::AudioUnknownArtist),
        };
        let song = format_or_bare(lang, TemplateId::ChatContentSong, &[Arg::Text(title), Arg::Text(subtitle)]);
        (song.text, !audio.has_title() || !audio.has_subtitle())
    }

    pub(crate) fn sender_display_name(&self, sender: Option<&MessageSender>, sender_name: Option<&str>) -> String {
        match sender_name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => sender.map(|sender| self.store.sender_name(sender)).unwrap_or_default(),
        }
    }

    pub(crate) fn is_channel(&self, chat_id: ChatId) -> bool {
        self.store.chat_kind(chat_id) == ChatKind::Channel
    }
}

fn restricted(reason: String) -> PreviewDescriptor {
    PreviewDescriptor::new(Some(icon::ERROR), None, Some(FormattedText::plain(reason)), false)
}

/// A link entity at the very start of the text that is actually visible.
fn starts_with_link(text: &FormattedText) -> bool {
    if text.is_empty() {
        return false;
    }
    let text_len = utf16_len(&text.text);
    text.entities.iter().any(|entity| {
        if !entity.kind.is_link() || entity.offset != 0 {
            return false;
        }
        let is_text_url = matches!(entity.kind, EntityKind::TextUrl { .. });
        entity.length == text_len
            || !is_text_url
            || substring_utf16(&text.text, entity.offset, entity.length)
                .is_some_and(|visible| !is_empty_or_invisible(&visible))
    })
}
