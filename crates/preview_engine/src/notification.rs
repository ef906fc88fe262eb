//! Previews of push-notification payloads.
//!
//! Push contents are mapped onto the same generic table as messages, with
//! the argument rebuilt from the payload's own fields. Pinned pushes are
//! phrased as "<sender> pinned <preview>".

use preview_core::{
    format_or_bare, icon, plural_or_bare, Arg, ChatId, PollKind, PreviewDescriptor, PushContent,
    PushMessage, TemplateId,
};
use preview_logging::preview_trace;

use crate::previewer::Previewer;
use crate::simple::{Argument, SimpleContext, SimpleKind, ANIMATED_MARKER, LIVE_MARKER};

/// Where a push content goes: the generic table, or a pinned phrase.
enum PushRoute {
    Done(PreviewDescriptor),
    Simple(SimpleKind, Argument),
    Pinned {
        /// Phrase used when there is no argument, taking only the sender.
        sender_only: TemplateId,
        kind: SimpleKind,
        argument: Argument,
    },
}

impl PushRoute {
    fn pinned_or_simple(is_pinned: bool, sender_only: TemplateId, kind: SimpleKind, argument: Argument) -> Self {
        if is_pinned {
            PushRoute::Pinned {
                sender_only,
                kind,
                argument,
            }
        } else {
            PushRoute::Simple(kind, argument)
        }
    }

    fn pinned_without_argument(sender_only: TemplateId, kind: SimpleKind) -> Self {
        PushRoute::Pinned {
            sender_only,
            kind,
            argument: Argument::none(),
        }
    }
}

fn plain(text: &str) -> Argument {
    Argument::plain(text, false)
}

impl Previewer {
    /// Resolves the preview of a push notification for `chat_id`.
    ///
    /// Push previews never carry a refresher: everything they show is in
    /// the payload.
    pub fn push_preview(&self, chat_id: ChatId, push: &PushMessage) -> PreviewDescriptor {
        let context = SimpleContext {
            chat_id,
            sender: push.sender,
            sender_name: Some(push.sender_name.as_str()),
            is_outgoing: push
                .sender
                .as_ref()
                .is_some_and(|sender| self.store.is_self_sender(sender)),
            is_chat_list: false,
        };
        match self.route_push(&push.content) {
            PushRoute::Done(descriptor) => descriptor,
            PushRoute::Simple(kind, argument) => self.simple_preview(kind, &context, argument),
            PushRoute::Pinned {
                sender_only,
                kind,
                argument,
            } => self.pinned_push_preview(&context, sender_only, kind, argument),
        }
    }

    fn route_push(&self, content: &PushContent) -> PushRoute {
        let lang = self.lang();
        match content {
            PushContent::Hidden { is_pinned: true } => {
                PushRoute::pinned_without_argument(TemplateId::ActionPinnedNoText, SimpleKind::Text { has_link: false })
            }
            PushContent::Hidden { is_pinned: false } => PushRoute::Done(PreviewDescriptor::text(
                None,
                plural_or_bare(lang, TemplateId::XNewMessages, 1, &[]),
                true,
            )),
            PushContent::Text { text, is_pinned } => PushRoute::pinned_or_simple(
                *is_pinned,
                TemplateId::ActionPinnedNoText,
                SimpleKind::Text { has_link: false },
                plain(text),
            ),
            PushContent::MessageForwards { total_count } => PushRoute::Done(PreviewDescriptor::text(
                None,
                plural_or_bare(lang, TemplateId::XForwards, i64::from(*total_count), &[]),
                true,
            )),
            PushContent::Photo {
                caption,
                is_secret,
                is_pinned,
            } => {
                if !*is_pinned && *is_secret {
                    PushRoute::Done(PreviewDescriptor::new(
                        Some(icon::SECRET_PHOTO),
                        Some(TemplateId::SelfDestructPhoto),
                        plain(caption).text,
                        false,
                    ))
                } else {
                    PushRoute::pinned_or_simple(*is_pinned, TemplateId::ActionPinnedPhoto, SimpleKind::Photo, plain(caption))
                }
            }
            PushContent::Video {
                caption,
                is_secret,
                is_pinned,
            } => {
                if !*is_pinned && *is_secret {
                    PushRoute::Done(PreviewDescriptor::new(
                        Some(icon::SECRET_VIDEO),
                        Some(TemplateId::SelfDestructVideo),
                        plain(caption).text,
                        false,
                    ))
                } else {
                    PushRoute::pinned_or_simple(*is_pinned, TemplateId::ActionPinnedVideo, SimpleKind::Video, plain(caption))
                }
            }
            PushContent::Animation { caption, is_pinned } => {
                PushRoute::pinned_or_simple(*is_pinned, TemplateId::ActionPinnedGif, SimpleKind::Animation, plain(caption))
            }
            PushContent::Document { file_name, is_pinned } => PushRoute::pinned_or_simple(
                *is_pinned,
                TemplateId::ActionPinnedFile,
                SimpleKind::Document,
                plain(file_name.as_deref().unwrap_or_default()),
            ),
            PushContent::Sticker {
                emoji,
                is_animated,
                is_pinned,
            } => {
                if *is_pinned {
                    PushRoute::pinned_or_simple(true, TemplateId::ActionPinnedSticker, SimpleKind::Sticker, plain(emoji))
                } else if *is_animated {
                    PushRoute::Simple(SimpleKind::Sticker, plain(&format!("{ANIMATED_MARKER}{emoji}")))
                } else {
                    PushRoute::Simple(SimpleKind::Sticker, plain(emoji))
                }
            }
            PushContent::Location { is_live, is_pinned } => match (*is_pinned, *is_live) {
                (true, true) => PushRoute::pinned_without_argument(TemplateId::ActionPinnedGeoLive, SimpleKind::Location),
                (true, false) => PushRoute::pinned_without_argument(TemplateId::ActionPinnedGeo, SimpleKind::Location),
                (false, true) => PushRoute::Simple(SimpleKind::Location, plain(LIVE_MARKER)),
                (false, false) => PushRoute::Simple(SimpleKind::Location, Argument::none()),
            },
            PushContent::Poll {
                question,
                is_regular,
                is_pinned,
            } => {
                let (kind, sender_only) = if *is_regular {
                    (PollKind::Regular, TemplateId::ActionPinnedPoll)
                } else {
                    (PollKind::Quiz, TemplateId::ActionPinnedQuiz)
                };
                PushRoute::pinned_or_simple(*is_pinned, sender_only, SimpleKind::Poll(kind), plain(question))
            }
            PushContent::Audio { audio, is_pinned } => {
                let argument = match audio {
                    Some(audio) => {
                        let (song, translatable) = self.song_argument(audio);
                        Argument::plain(song, translatable)
                    }
                    None => Argument::none(),
                };
                PushRoute::pinned_or_simple(*is_pinned, TemplateId::ActionPinnedMusic, SimpleKind::Audio, argument)
            }
            PushContent::VideoNote { duration, is_pinned } => PushRoute::pinned_or_simple(
                *is_pinned,
                TemplateId::ActionPinnedRound,
                SimpleKind::VideoNote,
                self.duration_argument(TemplateId::ChatContentRoundVideo, *duration),
            ),
            PushContent::VoiceNote { duration, is_pinned } => PushRoute::pinned_or_simple(
                *is_pinned,
                TemplateId::ActionPinnedVoice,
                SimpleKind::VoiceNote,
                self.duration_argument(TemplateId::ChatContentVoice, *duration),
            ),
            PushContent::Story { is_pinned: true } => {
                PushRoute::pinned_without_argument(TemplateId::ActionPinnedStory, SimpleKind::Unsupported)
            }
            PushContent::Story { is_pinned: false } => PushRoute::Simple(SimpleKind::Unsupported, Argument::none()),
            PushContent::Game { title, is_pinned: true } => {
                if title.is_empty() {
                    PushRoute::pinned_without_argument(TemplateId::ActionPinnedGameNoName, SimpleKind::Game)
                } else {
                    PushRoute::pinned_or_simple(true, TemplateId::ActionPinnedGame, SimpleKind::Game, plain(title))
                }
            }
            PushContent::Game { title, is_pinned: false } => PushRoute::Simple(SimpleKind::Game, plain(title)),
            PushContent::Contact { name, is_pinned } => {
                PushRoute::pinned_or_simple(*is_pinned, TemplateId::ActionPinnedContact, SimpleKind::Contact, plain(name))
            }
            PushContent::Invoice { is_pinned: true, .. } => PushRoute::pinned_without_argument(
                TemplateId::ActionPinnedNoText,
                SimpleKind::Invoice { recurring: false },
            ),
            PushContent::Invoice { price, is_pinned: false } => {
                PushRoute::Simple(SimpleKind::Invoice { recurring: false }, plain(price))
            }
            PushContent::ScreenshotTaken => PushRoute::Simple(SimpleKind::ScreenshotTaken, Argument::none()),
            PushContent::GameScore { is_pinned: true, .. } => {
                PushRoute::pinned_without_argument(TemplateId::ActionPinnedNoText, SimpleKind::Game)
            }
            PushContent::GameScore {
                title,
                score,
                is_pinned: false,
            } => {
                let text = if title.is_empty() {
                    plural_or_bare(lang, TemplateId::GameActionScored, i64::from(*score), &[])
                } else {
                    plural_or_bare(
                        lang,
                        TemplateId::GameActionScoredInGame,
                        i64::from(*score),
                        &[Arg::text(title.clone())],
                    )
                };
                PushRoute::Done(PreviewDescriptor::text(Some(icon::GAME), text, true))
            }
            PushContent::ContactRegistered => PushRoute::Simple(SimpleKind::ContactRegistered, Argument::none()),
            PushContent::MediaAlbum {
                total_count,
                has_photos,
                has_videos,
                has_audios,
                has_documents,
            } => {
                let kinds = [*has_photos, *has_videos, *has_audios, *has_documents]
                    .into_iter()
                    .filter(|has| *has)
                    .count();
                let (icon, counter) = if kinds != 1 {
                    (icon::ALBUM_MEDIA, TemplateId::XMedia)
                } else if *has_documents {
                    (icon::ALBUM_FILES, TemplateId::XFiles)
                } else if *has_audios {
                    (icon::ALBUM_AUDIO, TemplateId::XAudios)
                } else if *has_videos {
                    (icon::ALBUM_VIDEOS, TemplateId::XVideos)
                } else {
                    (icon::ALBUM_PHOTOS, TemplateId::XPhotos)
                };
                PushRoute::Done(PreviewDescriptor::text(
                    Some(icon),
                    plural_or_bare(lang, counter, i64::from(*total_count), &[]),
                    true,
                ))
            }
            PushContent::BasicGroupChatCreate => PushRoute::Simple(SimpleKind::BasicGroupChatCreate, Argument::none()),
            PushContent::ChatAddMembers {
                member_name,
                is_current_user,
                is_returned,
            } => PushRoute::Done(if *is_returned {
                PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupReturn)
            } else if *is_current_user {
                PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupAddYou)
            } else {
                PreviewDescriptor::text(
                    Some(icon::GROUP),
                    format_or_bare(lang, TemplateId::GroupAdd, &[Arg::text(member_name.clone())]),
                    true,
                )
            }),
            PushContent::ChatDeleteMember {
                member_name,
                is_current_user,
                is_left,
            } => PushRoute::Done(if *is_left {
                PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupLeft)
            } else if *is_current_user {
                PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupKickYou)
            } else {
                PreviewDescriptor::text(
                    Some(icon::GROUP),
                    format_or_bare(lang, TemplateId::GroupKick, &[Arg::text(member_name.clone())]),
                    true,
                )
            }),
            PushContent::ChatJoinByLink => PushRoute::Simple(SimpleKind::ChatJoinByLink, Argument::none()),
            PushContent::ChatJoinByRequest => PushRoute::Simple(SimpleKind::ChatJoinByRequest, Argument::none()),
            PushContent::RecurringPayment { amount } => {
                PushRoute::Simple(SimpleKind::Invoice { recurring: true }, plain(amount))
            }
            PushContent::ChatChangePhoto => PushRoute::Simple(SimpleKind::ChatChangePhoto, Argument::none()),
            PushContent::ChatChangeTitle { title } => PushRoute::Simple(SimpleKind::ChatChangeTitle, plain(title)),
            PushContent::ChatSetTheme { theme_name } => PushRoute::Simple(SimpleKind::ChatSetTheme, plain(theme_name)),
            PushContent::ChatSetBackground { .. }
            | PushContent::SuggestProfilePhoto
            | PushContent::PremiumGiftCode { .. } => PushRoute::Simple(SimpleKind::Unsupported, Argument::none()),
            PushContent::PremiumGiveaway { is_pinned: true, .. } => PushRoute::pinned_without_argument(
                TemplateId::ActionPinnedGiveaway,
                SimpleKind::Giveaway { winner_count: 0 },
            ),
            PushContent::PremiumGiveaway {
                winner_count,
                is_pinned: false,
                ..
            } => PushRoute::Simple(
                SimpleKind::Giveaway {
                    winner_count: *winner_count,
                },
                Argument::none(),
            ),
        }
    }

    fn duration_argument(&self, media: TemplateId, duration: Option<i32>) -> Argument {
        match duration.filter(|duration| *duration > 0) {
            Some(duration) => Argument::plain(self.media_duration(media, duration), true),
            None => Argument::none(),
        }
    }

    /// "<sender> pinned <preview>", or the sender-only phrase without an argument.
    fn pinned_push_preview(
        &self,
        context: &SimpleContext<'_>,
        sender_only: TemplateId,
        kind: SimpleKind,
        argument: Argument,
    ) -> PreviewDescriptor {
        let lang = self.lang();
        let sender = self.sender_display_name(context.sender.as_ref(), context.sender_name);
        let text = match argument.text.as_ref().map(|text| text.text.clone()) {
            None => format_or_bare(lang, sender_only, &[Arg::Text(sender)]),
            Some(raw) => {
                let inner = self.simple_preview(kind, context, argument).to_plain_string(lang);
                let shown = if inner.is_empty() {
                    preview_trace!("Pinned push preview rendered empty; using the raw argument");
                    raw
                } else {
                    inner
                };
                format_or_bare(lang, TemplateId::ActionPinnedText, &[Arg::Text(sender), Arg::Text(shown)])
            }
        };
        PreviewDescriptor::text(None, text, true)
            .with_hide_author(true)
            .with_parent_icon(icon::PIN)
    }
}
