//! Turns a descriptor into displayable text.
//!
//! `allow_icon` tells whether the caller draws image icons itself. When it
//! does, an icon with an image is left out of the text; emoji-only icons are
//! always spelled out as their glyph.

use crate::descriptor::PreviewDescriptor;
use crate::template::Localizer;
use crate::text::FormattedText;

impl PreviewDescriptor {
    fn placeholder_string(&self, lang: &dyn Localizer) -> Option<String> {
        self.placeholder.map(|id| lang.string(id))
    }

    pub fn render_plain_text(&self, lang: &dyn Localizer, allow_icon: bool) -> String {
        let text = self.text.as_ref().filter(|text| !text.is_empty());
        let icon = match &self.icon {
            Some(icon) if !(allow_icon && icon.has_image()) => icon,
            _ => {
                return match text {
                    Some(text) => text.text.clone(),
                    None => self.placeholder_string(lang).unwrap_or_default(),
                }
            }
        };
        let glyph = icon.glyph();
        match text {
            None => match self.placeholder_string(lang) {
                Some(placeholder) => format!("{glyph} {placeholder}"),
                None => glyph.to_string(),
            },
            Some(text) if text.text.starts_with(glyph) => text.text.clone(),
            Some(text) => format!("{glyph} {}", text.text),
        }
    }

    /// Like [`render_plain_text`](Self::render_plain_text), shifting entities
    /// past any inserted glyph.
    pub fn render_formatted_text(&self, lang: &dyn Localizer, allow_icon: bool) -> FormattedText {
        let text = self.text.as_ref().filter(|text| !text.is_empty());
        let icon = match &self.icon {
            Some(icon) if !(allow_icon && icon.has_image()) => icon,
            _ => {
                return match text {
                    Some(text) => text.clone(),
                    None => FormattedText::plain(self.placeholder_string(lang).unwrap_or_default()),
                }
            }
        };
        let glyph = icon.glyph();
        match text {
            None => match self.placeholder_string(lang) {
                Some(placeholder) => FormattedText::plain(format!("{glyph} {placeholder}")),
                None => FormattedText::plain(glyph),
            },
            Some(text) if text.text.starts_with(glyph) => text.clone(),
            Some(text) => text.with_prefix(&format!("{glyph} ")),
        }
    }

    /// Plain rendering with every glyph spelled out.
    pub fn to_plain_string(&self, lang: &dyn Localizer) -> String {
        self.render_plain_text(lang, false)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::TemplateCatalog;
    use crate::descriptor::PreviewDescriptor;
    use crate::icon::{self, Icon};
    use crate::template::TemplateId;

    #[test]
    fn image_icons_are_dropped_when_the_caller_draws_them() {
        let lang = TemplateCatalog::english();
        let descriptor = PreviewDescriptor::placeholder(Some(icon::PHOTO), TemplateId::ChatContentPhoto);
        assert_eq!(descriptor.render_plain_text(&lang, true), "Photo");
        assert_eq!(descriptor.render_plain_text(&lang, false), "\u{1F5BC} Photo");
    }

    #[test]
    fn emoji_icons_are_always_spelled_out() {
        let lang = TemplateCatalog::english();
        let descriptor = PreviewDescriptor::placeholder(Some(Icon::emoji("\u{1F600}")), TemplateId::Sticker);
        assert_eq!(descriptor.render_plain_text(&lang, true), "\u{1F600} Sticker");
    }
}
