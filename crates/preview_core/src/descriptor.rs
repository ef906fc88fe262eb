//! The preview descriptor and its one-shot refresh protocol.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::icon::Icon;
use crate::message::{ChatId, Message, MessageContent, MessageId};
use crate::template::TemplateId;
use crate::text::FormattedText;

pub type RefreshFuture = Pin<Box<dyn Future<Output = Refresh> + Send>>;

/// Recomputes a descriptor from an updated copy of the message it depends on.
///
/// Returning `None` means the update is immaterial to the preview.
pub type RebuildFn = Arc<dyn Fn(&Message) -> Option<PreviewDescriptor> + Send + Sync>;

/// Messages posted together as one media group.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub messages: Vec<Message>,
    /// The local view may be a prefix of a group that is still arriving.
    pub may_have_more: bool,
}

impl Album {
    pub fn new(messages: Vec<Message>, may_have_more: bool) -> Self {
        Self {
            messages,
            may_have_more,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Outcome of a refresher. Exactly one is produced per refresh.
#[derive(Debug)]
pub enum Refresh {
    Changed {
        new: PreviewDescriptor,
        old: PreviewDescriptor,
    },
    Unchanged(PreviewDescriptor),
}

impl Refresh {
    pub fn is_changed(&self) -> bool {
        matches!(self, Refresh::Changed { .. })
    }

    /// The descriptor that should be displayed after this refresh.
    pub fn into_current(self) -> PreviewDescriptor {
        match self {
            Refresh::Changed { new, .. } => new,
            Refresh::Unchanged(old) => old,
        }
    }

    /// Swaps the reported `old` descriptor, keeping the outcome.
    pub fn with_old(self, old: PreviewDescriptor) -> Refresh {
        match self {
            Refresh::Changed { new, .. } => Refresh::Changed { new, old },
            Refresh::Unchanged(_) => Refresh::Unchanged(old),
        }
    }
}

/// Single-use asynchronous resolution attached to a provisional descriptor.
pub struct Refresher(Box<dyn FnOnce(PreviewDescriptor) -> RefreshFuture + Send>);

impl Refresher {
    pub fn new<F, Fut>(resolve: F) -> Self
    where
        F: FnOnce(PreviewDescriptor) -> Fut + Send + 'static,
        Fut: Future<Output = Refresh> + Send + 'static,
    {
        Self(Box::new(move |old| Box::pin(resolve(old))))
    }

    fn run(self, old: PreviewDescriptor) -> RefreshFuture {
        (self.0)(old)
    }
}

impl fmt::Debug for Refresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Refresher")
    }
}

#[derive(Clone)]
struct RelatedMessage {
    message: Message,
    rebuild: RebuildFn,
}

/// Result of [`PreviewDescriptor::update_related_message`].
#[derive(Debug)]
pub enum RelatedUpdate {
    /// The descriptor does not depend on the updated message.
    Unrelated,
    Changed(PreviewDescriptor),
    Unchanged,
}

impl RelatedUpdate {
    pub fn matched(&self) -> bool {
        !matches!(self, RelatedUpdate::Unrelated)
    }
}

/// What a preview says: icon, placeholder, literal text and rendering hints.
pub struct PreviewDescriptor {
    pub icon: Option<Icon>,
    /// Icon of an outer wrapper, such as the pin of a pinned-message preview.
    pub parent_icon: Option<Icon>,
    pub placeholder: Option<TemplateId>,
    pub text: Option<FormattedText>,
    /// Whether `text` is a built phrase rather than verbatim user content.
    pub translatable: bool,
    pub hide_author: bool,
    related: Option<RelatedMessage>,
    refresher: Option<Refresher>,
    is_media_group: bool,
    album: Option<Album>,
}

impl PreviewDescriptor {
    /// Empty texts are stored as `None` so the placeholder takes over.
    pub fn new(
        icon: Option<Icon>,
        placeholder: Option<TemplateId>,
        text: Option<FormattedText>,
        translatable: bool,
    ) -> Self {
        Self {
            icon,
            parent_icon: None,
            placeholder,
            text: text.filter(|text| !text.is_empty()),
            translatable,
            hide_author: false,
            related: None,
            refresher: None,
            is_media_group: false,
            album: None,
        }
    }

    pub fn placeholder(icon: Option<Icon>, placeholder: TemplateId) -> Self {
        Self::new(icon, Some(placeholder), None, false)
    }

    pub fn text(icon: Option<Icon>, text: impl Into<FormattedText>, translatable: bool) -> Self {
        Self::new(icon, None, Some(text.into()), translatable)
    }

    /// Wraps `inner` under `parent`, keeping its visible fields only.
    pub fn wrapped(parent: Icon, inner: PreviewDescriptor) -> Self {
        Self {
            icon: inner.icon,
            parent_icon: Some(parent),
            placeholder: inner.placeholder,
            text: inner.text,
            translatable: inner.translatable,
            hide_author: inner.hide_author,
            related: None,
            refresher: None,
            is_media_group: false,
            album: None,
        }
    }

    pub fn with_parent_icon(mut self, parent: Icon) -> Self {
        self.parent_icon = Some(parent);
        self
    }

    pub fn with_hide_author(mut self, hide_author: bool) -> Self {
        self.hide_author = hide_author;
        self
    }

    pub fn with_refresher(mut self, refresher: Refresher, is_media_group: bool) -> Self {
        self.refresher = Some(refresher);
        self.is_media_group = is_media_group;
        self
    }

    pub fn with_album(mut self, album: Album) -> Self {
        self.album = Some(album);
        self
    }

    /// Records the message this preview was built from, and how to rebuild it.
    pub fn with_related(mut self, message: Message, rebuild: RebuildFn) -> Self {
        self.related = Some(RelatedMessage { message, rebuild });
        self
    }

    /// Same descriptor showing `text` instead, e.g. after a local edit.
    pub fn with_edited_text(mut self, text: FormattedText) -> Self {
        if !text.is_empty() {
            self.text = Some(text);
        }
        self
    }

    pub fn has_refresher(&self) -> bool {
        self.refresher.is_some()
    }

    /// Whether the attached refresher resolves a media group.
    pub fn is_media_group(&self) -> bool {
        self.is_media_group
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn related_message(&self) -> Option<&Message> {
        self.related.as_ref().map(|related| &related.message)
    }

    /// Nothing to show at all.
    pub fn is_blank(&self) -> bool {
        self.icon.is_none() && self.placeholder.is_none() && self.text.is_none()
    }

    pub fn belongs_to_related_message(&self, chat_id: ChatId, message_ids: &[MessageId]) -> bool {
        self.related
            .as_ref()
            .is_some_and(|related| related.message.chat_id == chat_id && message_ids.contains(&related.message.id))
    }

    /// Runs the refresher, if any. Without one the descriptor comes back unchanged.
    pub fn refresh(mut self) -> RefreshFuture {
        match self.refresher.take() {
            Some(refresher) => refresher.run(self),
            None => Box::pin(std::future::ready(Refresh::Unchanged(self))),
        }
    }

    /// Applies new content of the related message and rebuilds from it.
    ///
    /// The stored copy is updated in place so later rebuilds see the latest
    /// content; a rebuilt descriptor keeps the same rebuild closure.
    pub fn update_related_message(
        &mut self,
        chat_id: ChatId,
        message_id: MessageId,
        content: MessageContent,
    ) -> RelatedUpdate {
        let Some(related) = self.related.as_mut() else {
            return RelatedUpdate::Unrelated;
        };
        if related.message.chat_id != chat_id || related.message.id != message_id {
            return RelatedUpdate::Unrelated;
        }
        related.message.content = content;
        match (related.rebuild)(&related.message) {
            Some(rebuilt) => {
                let rebuilt = if rebuilt.related.is_some() {
                    rebuilt
                } else {
                    rebuilt.with_related(related.message.clone(), Arc::clone(&related.rebuild))
                };
                RelatedUpdate::Changed(rebuilt)
            }
            None => RelatedUpdate::Unchanged,
        }
    }
}

impl fmt::Debug for PreviewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewDescriptor")
            .field("icon", &self.icon)
            .field("parent_icon", &self.parent_icon)
            .field("placeholder", &self.placeholder)
            .field("text", &self.text)
            .field("translatable", &self.translatable)
            .field("hide_author", &self.hide_author)
            .field("related", &self.related.as_ref().map(|related| (related.message.chat_id, related.message.id)))
            .field("has_refresher", &self.refresher.is_some())
            .field("is_media_group", &self.is_media_group)
            .field("album_len", &self.album.as_ref().map(Album::len))
            .finish()
    }
}
