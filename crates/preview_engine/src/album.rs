//! Media group aggregation.

use std::collections::HashSet;

use preview_core::{
    icon, plural_or_bare, Album, Icon, Message, MessageContent, PreviewDescriptor, Refresh,
    Refresher, TemplateId,
};
use preview_logging::{preview_debug, preview_trace};

use crate::previewer::{PreviewOptions, Previewer};

/// Histogram bucket of one album item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AlbumItem {
    Photo,
    Video,
    Document,
    Audio,
    Other,
}

impl AlbumItem {
    fn of(message: &Message) -> Self {
        match message.content {
            MessageContent::Photo { .. } => AlbumItem::Photo,
            MessageContent::Video { .. } => AlbumItem::Video,
            MessageContent::Document { .. } => AlbumItem::Document,
            MessageContent::Audio { .. } => AlbumItem::Audio,
            _ => AlbumItem::Other,
        }
    }
}

fn album_phrase(album: &Album) -> (Icon, TemplateId) {
    let kinds: HashSet<AlbumItem> = album.messages.iter().map(AlbumItem::of).collect();
    let only = if kinds.len() == 1 {
        kinds.into_iter().next()
    } else {
        None
    };
    match only {
        Some(AlbumItem::Photo) => (icon::ALBUM_PHOTOS, TemplateId::XPhotos),
        Some(AlbumItem::Video) => (icon::ALBUM_VIDEOS, TemplateId::XVideos),
        Some(AlbumItem::Document) => (icon::ALBUM_FILES, TemplateId::XFiles),
        Some(AlbumItem::Audio) => (icon::ALBUM_AUDIO, TemplateId::XAudios),
        Some(AlbumItem::Other) | None => (icon::ALBUM_MEDIA, TemplateId::XMedia),
    }
}

impl Previewer {
    /// Consolidated preview of a media group.
    ///
    /// A caption is shown only when exactly one item has one; otherwise the
    /// preview counts the items. When the album may still grow, the result
    /// carries a refresher that loads the complete group.
    pub fn album_preview(&self, representative: &Message, album: Album, options: PreviewOptions) -> PreviewDescriptor {
        let (icon, counter) = album_phrase(&album);

        let caption = if options.allow_content {
            let mut captions = album
                .messages
                .iter()
                .filter_map(|message| self.store.formatted_text(message))
                .filter(|text| !text.is_empty());
            match (captions.next(), captions.next()) {
                (Some(caption), None) => Some(caption),
                (Some(_), Some(_)) => {
                    preview_trace!("Album of message {} has several captions", representative.id);
                    None
                }
                _ => None,
            }
        } else {
            None
        };

        let descriptor = match caption {
            Some(caption) => PreviewDescriptor::new(Some(icon), None, Some(caption), false),
            None => PreviewDescriptor::text(
                Some(icon),
                plural_or_bare(self.lang(), counter, album.len() as i64, &[]),
                true,
            ),
        };

        if album.may_have_more {
            let refresher = self.album_growth_refresher(representative, &album, options);
            descriptor.with_album(album).with_refresher(refresher, true)
        } else {
            descriptor.with_album(album)
        }
    }

    fn album_growth_refresher(&self, representative: &Message, known: &Album, options: PreviewOptions) -> Refresher {
        let previewer = self.clone();
        let representative = representative.clone();
        let known = known.clone();
        Refresher::new(move |old| async move {
            let remote = previewer.store.album(&representative, false, Some(&known)).await;
            if remote.len() == 1 && !remote.may_have_more {
                preview_debug!("Album of message {} collapsed to a single message", representative.id);
                let Some(single) = remote.messages.into_iter().next() else {
                    return Refresh::Unchanged(old);
                };
                let new = previewer.content_preview(single.chat_id, Some(&single), options);
                return Refresh::Changed { new, old };
            }
            if remote.len() > known.len() {
                preview_debug!(
                    "Album of message {} grew from {} to {} items",
                    representative.id,
                    known.len(),
                    remote.len()
                );
                Refresh::Changed {
                    new: previewer.album_preview(&representative, remote, options),
                    old,
                }
            } else {
                Refresh::Unchanged(old)
            }
        })
    }

    /// Refresher for a single message that belongs to a media group.
    pub(crate) fn single_message_album_refresher(&self, message: &Message, options: PreviewOptions) -> Refresher {
        let previewer = self.clone();
        let message = message.clone();
        Refresher::new(move |old| async move {
            let album = previewer.store.album(&message, true, None).await;
            if album.is_empty() {
                return Refresh::Unchanged(old);
            }
            if album.len() == 1 {
                if !album.may_have_more {
                    return Refresh::Unchanged(old);
                }
                let aggregate = previewer.album_preview(&message, album, options);
                return if aggregate.has_refresher() {
                    aggregate.refresh().await.with_old(old)
                } else {
                    Refresh::Unchanged(old)
                };
            }
            preview_debug!("Message {} is part of a local album of {}", message.id, album.len());
            Refresh::Changed {
                new: previewer.album_preview(&message, album, options),
                old,
            }
        })
    }
}
