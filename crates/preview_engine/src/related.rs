//! Previews that depend on another message: pinned messages and game scores.
//!
//! Both try a local lookup first (skipped in [`LookupMode::Interactive`]),
//! then fall back to a provisional descriptor whose refresher fetches the
//! target once. A resolved descriptor remembers the target and a rebuild
//! closure so later edits of that message are applied without a refetch.

use std::sync::Arc;

use preview_core::{
    icon, plural_or_bare, Arg, ChatId, Message, MessageContent, MessageId, PreviewDescriptor, RebuildFn,
    Refresh, Refresher, TemplateId,
};
use preview_logging::{preview_debug, preview_trace};

use crate::config::LookupMode;
use crate::previewer::{PreviewOptions, Previewer};

impl Previewer {
    fn local_target(&self, chat_id: ChatId, message_id: MessageId, mode: LookupMode) -> Option<Message> {
        match mode {
            LookupMode::Interactive => None,
            LookupMode::Background => {
                let found = self
                    .store
                    .message_locally(chat_id, message_id, self.config.local_lookup_timeout());
                preview_trace!(
                    "Local lookup of message {message_id} in chat {chat_id}: {}",
                    if found.is_some() { "hit" } else { "miss" }
                );
                found
            }
        }
    }

    /// Fetches `target_id` once and rebuilds through `rebuild`.
    fn related_refresher(&self, chat_id: ChatId, target_id: MessageId, rebuild: RebuildFn) -> Refresher {
        let previewer = self.clone();
        Refresher::new(move |old| async move {
            let Some(target) = previewer.store.message(chat_id, target_id).await else {
                preview_debug!("Message {target_id} in chat {chat_id} could not be fetched");
                return Refresh::Unchanged(old);
            };
            match rebuild(&target) {
                Some(new) => {
                    preview_debug!("Resolved related message {target_id} in chat {chat_id}");
                    Refresh::Changed {
                        new: new.with_related(target, rebuild),
                        old,
                    }
                }
                None => {
                    preview_debug!("Related message {target_id} in chat {chat_id} does not change the preview");
                    Refresh::Unchanged(old)
                }
            }
        })
    }

    fn pinned_rebuild(&self, chat_id: ChatId, options: PreviewOptions) -> RebuildFn {
        let previewer = self.clone();
        Arc::new(move |pinned: &Message| {
            Some(PreviewDescriptor::wrapped(
                icon::PIN,
                previewer.content_preview(chat_id, Some(pinned), options),
            ))
        })
    }

    pub(crate) fn pinned_message_preview(
        &self,
        chat_id: ChatId,
        message: &Message,
        pinned_id: MessageId,
        options: PreviewOptions,
    ) -> PreviewDescriptor {
        let rebuild = self.pinned_rebuild(chat_id, options);
        if let Some(pinned) = self.local_target(message.chat_id, pinned_id, options.mode) {
            if let Some(descriptor) = rebuild(&pinned) {
                return descriptor.with_related(pinned, rebuild);
            }
        }
        PreviewDescriptor::placeholder(Some(icon::PIN), TemplateId::ChatContentPinned)
            .with_refresher(self.related_refresher(message.chat_id, pinned_id, rebuild), false)
    }

    fn game_score_templates(is_outgoing: bool) -> (TemplateId, TemplateId) {
        if is_outgoing {
            (TemplateId::GameActionYouScoredInGame, TemplateId::GameActionYouScored)
        } else {
            (TemplateId::GameActionScoredInGame, TemplateId::GameActionScored)
        }
    }

    fn game_score_rebuild(&self, is_outgoing: bool, score: i32) -> RebuildFn {
        let previewer = self.clone();
        let (in_game, _) = Self::game_score_templates(is_outgoing);
        Arc::new(move |game: &Message| match &game.content {
            MessageContent::Game { title } if !title.is_empty() => Some(PreviewDescriptor::text(
                Some(icon::GAME),
                plural_or_bare(previewer.lang(), in_game, i64::from(score), &[Arg::text(title.clone())]),
                true,
            )),
            _ => None,
        })
    }

    /// "Scored N in <game>", falling back to a title-less phrase until the
    /// game message is known.
    pub(crate) fn game_score_preview(
        &self,
        message: &Message,
        game_message_id: MessageId,
        score: i32,
        mode: LookupMode,
    ) -> PreviewDescriptor {
        let (_, title_less) = Self::game_score_templates(message.is_outgoing);
        let rebuild = self.game_score_rebuild(message.is_outgoing, score);
        let local = self.local_target(message.chat_id, game_message_id, mode);
        if let Some(game) = &local {
            if let Some(descriptor) = rebuild(game) {
                return descriptor.with_related(game.clone(), rebuild);
            }
        }
        let descriptor = PreviewDescriptor::text(
            Some(icon::GAME),
            plural_or_bare(self.lang(), title_less, i64::from(score), &[]),
            true,
        );
        if local.is_some() {
            // The game is known and simply has no title; nothing to wait for.
            descriptor
        } else {
            descriptor.with_refresher(self.related_refresher(message.chat_id, game_message_id, rebuild), false)
        }
    }
}
