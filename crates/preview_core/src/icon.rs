//! Icon registry: symbolic icons with a display glyph and an optional image.

use std::borrow::Cow;
use std::fmt;

/// Glyph shown before preview text, optionally backed by a drawable image.
///
/// Equality compares both the glyph and the image so that two icons sharing a
/// glyph (every dice face uses the same die) stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    glyph: Cow<'static, str>,
    image: Option<&'static str>,
}

impl Icon {
    pub const fn builtin(glyph: &'static str, image: &'static str) -> Self {
        Self {
            glyph: Cow::Borrowed(glyph),
            image: Some(image),
        }
    }

    /// Icon made from arbitrary emoji text, with no image representation.
    pub fn emoji(glyph: impl Into<String>) -> Self {
        Self {
            glyph: Cow::Owned(glyph.into()),
            image: None,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn image(&self) -> Option<&'static str> {
        self.image
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyph)
    }
}

pub const PHOTO: Icon = Icon::builtin("\u{1F5BC}", "camera_alt");
pub const VIDEO: Icon = Icon::builtin("\u{1F3A5}", "videocam");
pub const ROUND_VIDEO: Icon = Icon::builtin("\u{1F4F9}", "msg_video");
pub const SECRET_PHOTO: Icon = Icon::builtin("\u{1F525}", "whatshot");
pub const SECRET_VIDEO: Icon = Icon::builtin("\u{1F525}", "whatshot");
pub const LINK: Icon = Icon::builtin("\u{1F517}", "link");
pub const GAME: Icon = Icon::builtin("\u{1F3AE}", "videogame_asset");
pub const GROUP: Icon = Icon::builtin("\u{1F465}", "group");
pub const GIFT: Icon = Icon::builtin("\u{1F381}", "redeem");
pub const THEME: Icon = Icon::builtin("\u{1F3A8}", "palette");
pub const GROUP_INVITE: Icon = Icon::builtin("\u{1F465}", "group_add");
pub const CHANNEL: Icon = Icon::builtin("\u{1F4E2}", "bullhorn");
pub const FILE: Icon = Icon::builtin("\u{1F4CE}", "insert_drive_file");
pub const AUDIO: Icon = Icon::builtin("\u{1F3B5}", "music_note");
pub const CONTACT: Icon = Icon::builtin("\u{1F464}", "person");
pub const POLL: Icon = Icon::builtin("\u{1F4CA}", "poll");
pub const QUIZ: Icon = Icon::builtin("\u{2753}", "help");
pub const VOICE: Icon = Icon::builtin("\u{1F3A4}", "mic");
pub const GIF: Icon = Icon::builtin("\u{1F47E}", "gif_filled");
pub const LOCATION: Icon = Icon::builtin("\u{1F4CC}", "gps_fixed");
pub const INVOICE: Icon = Icon::builtin("\u{1F4B8}", "receipt");
pub const USER_JOINED: Icon = Icon::builtin("\u{1F389}", "party_popper");
pub const SCREENSHOT: Icon = Icon::builtin("\u{1F4F8}", "warning");
pub const PIN: Icon = Icon::builtin("\u{1F4CC}", "pin");
pub const ALBUM_MEDIA: Icon = Icon::builtin("\u{1F5BC}", "collections");
pub const ALBUM_PHOTOS: Icon = Icon::builtin("\u{1F5BC}", "photo_library");
pub const ALBUM_AUDIO: Icon = Icon::builtin("\u{1F3B5}", "audio_collections");
pub const ALBUM_FILES: Icon = Icon::builtin("\u{1F4CE}", "file_collections");
pub const ALBUM_VIDEOS: Icon = Icon::builtin("\u{1F3A5}", "video_collections");
pub const DART: Icon = Icon::builtin("\u{1F3AF}", "gps_fixed");
pub const DICE: Icon = Icon::builtin("\u{1F3B2}", "casino");
pub const DICE_1: Icon = Icon::builtin("\u{1F3B2}", "dice_1");
pub const DICE_2: Icon = Icon::builtin("\u{1F3B2}", "dice_2");
pub const DICE_3: Icon = Icon::builtin("\u{1F3B2}", "dice_3");
pub const DICE_4: Icon = Icon::builtin("\u{1F3B2}", "dice_4");
pub const DICE_5: Icon = Icon::builtin("\u{1F3B2}", "dice_5");
pub const DICE_6: Icon = Icon::builtin("\u{1F3B2}", "dice_6");
pub const CALL: Icon = Icon::builtin("\u{1F4DE}", "call");
pub const TIMER: Icon = Icon::builtin("\u{23F2}", "timer");
pub const TIMER_OFF: Icon = Icon::builtin("\u{23F2}", "timer_off");
pub const CALL_END: Icon = Icon::builtin("\u{1F4DE}", "call_end");
pub const CALL_MISSED: Icon = Icon::builtin("\u{260E}", "call_missed");
pub const CALL_DECLINED: Icon = Icon::builtin("\u{260E}", "call_received");
pub const INFO: Icon = Icon::builtin("\u{2139}", "info");
pub const ERROR: Icon = Icon::builtin("\u{2139}", "error");

/// Face-specific die for values 1 through 6.
pub fn dice_face(value: i32) -> Option<Icon> {
    let icon = match value {
        1 => DICE_1,
        2 => DICE_2,
        3 => DICE_3,
        4 => DICE_4,
        5 => DICE_5,
        6 => DICE_6,
        _ => return None,
    };
    Some(icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_faces_share_glyph_but_differ() {
        let four = dice_face(4).unwrap();
        assert_eq!(four.glyph(), DICE.glyph());
        assert_ne!(four, DICE);
        assert!(dice_face(0).is_none());
        assert!(dice_face(7).is_none());
    }

    #[test]
    fn emoji_icons_have_no_image() {
        let icon = Icon::emoji("\u{1F600}");
        assert!(!icon.has_image());
        assert_eq!(icon.to_string(), "\u{1F600}");
    }
}
