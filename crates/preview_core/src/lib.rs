//! Preview core: content model, descriptors, localization seam and rendering.
mod catalog;
mod descriptor;
mod format;
pub mod icon;
mod message;
mod push;
mod render;
mod template;
mod text;

pub use catalog::{CatalogError, Pattern, TemplateCatalog};
pub use descriptor::{
    Album, PreviewDescriptor, RebuildFn, Refresh, RefreshFuture, Refresher, RelatedUpdate,
};
pub use format::{
    call_duration, format_amount, format_duration, format_or_bare, full_duration, largest_unit,
    plural_or_bare, DurationUnit,
};
pub use icon::Icon;
pub use message::{
    full_name, AudioInfo, BotWriteAccessReason, CallDiscardReason, ChatId, ChatKind, CombineMode,
    Message, MessageContent, MessageId, MessageSender, PollKind, UserId, DART_EMOJI, DICE_EMOJI,
    DICE_EMOJIS,
};
pub use push::{PushContent, PushMessage};
pub use template::{Arg, FormatError, Localizer, TemplateId};
pub use text::{
    is_empty_or_invisible, substring_utf16, utf16_len, EntityKind, FormattedText, TextEntity,
};
