mod support;

use pretty_assertions::assert_eq;
use preview_core::{icon, Album, FormattedText, Message, MessageContent, PreviewDescriptor, Refresh, TemplateId};
use preview_engine::{LookupMode, PreviewOptions};

use support::{in_album, message, photo, previewer, FakeStore, ALICE, CHAT};

const ALBUM: i64 = 7;

fn album_photo(id: i64, caption: &str) -> Message {
    in_album(photo(id, caption), ALBUM)
}

fn photos(ids: std::ops::RangeInclusive<i64>) -> Vec<Message> {
    ids.map(|id| album_photo(id, "")).collect()
}

fn list_options() -> PreviewOptions {
    PreviewOptions::chat_list(true, LookupMode::Background)
}

fn text_of(descriptor: &PreviewDescriptor) -> Option<&str> {
    descriptor.text.as_ref().map(|text| text.text.as_str())
}

#[tokio::test]
async fn single_photo_refreshes_into_local_album() {
    let store = FakeStore::new().with_local_album(ALBUM, Album::new(photos(1..=5), false));
    let (previewer, store) = previewer(store);
    let first = album_photo(1, "");

    let provisional = previewer.content_preview(CHAT, Some(&first), list_options());
    assert_eq!(provisional.icon, Some(icon::PHOTO));
    assert!(provisional.has_refresher());
    assert!(provisional.is_media_group());

    match provisional.refresh().await {
        Refresh::Changed { new, old } => {
            assert_eq!(new.icon, Some(icon::ALBUM_PHOTOS));
            assert_eq!(text_of(&new), Some("5 photos"));
            assert!(new.translatable);
            assert_eq!(new.album().map(Album::len), Some(5));
            assert!(!new.has_refresher());
            assert_eq!(old.icon, Some(icon::PHOTO));
        }
        other => panic!("expected an album preview, got {other:?}"),
    }
    assert_eq!(store.album_fetches(), 1);
}

#[tokio::test]
async fn lone_album_member_stays_unchanged() {
    let (previewer, _) = previewer(FakeStore::new());
    let provisional = previewer.content_preview(CHAT, Some(&album_photo(1, "solo")), list_options());

    let outcome = provisional.refresh().await;

    assert!(!outcome.is_changed());
    assert_eq!(text_of(&outcome.into_current()), Some("solo"));
}

#[tokio::test]
async fn partial_local_album_continues_with_remote_fetch() {
    let store = FakeStore::new()
        .with_local_album(ALBUM, Album::new(photos(1..=1), true))
        .with_remote_album(ALBUM, Album::new(photos(1..=3), false));
    let (previewer, store) = previewer(store);

    let provisional = previewer.content_preview(CHAT, Some(&album_photo(1, "")), list_options());
    match provisional.refresh().await {
        Refresh::Changed { new, old } => {
            assert_eq!(text_of(&new), Some("3 photos"));
            assert_eq!(old.icon, Some(icon::PHOTO));
        }
        other => panic!("expected growth, got {other:?}"),
    }
    assert_eq!(store.album_fetches(), 2);
}

#[test]
fn several_captions_fall_back_to_counter() {
    let (previewer, _) = previewer(FakeStore::new());
    let album = Album::new(
        vec![album_photo(1, "one"), album_photo(2, ""), album_photo(3, "three")],
        false,
    );

    let descriptor = previewer.album_preview(&album.messages[0], album.clone(), list_options());

    assert_eq!(text_of(&descriptor), Some("3 photos"));
    assert!(descriptor.translatable);
}

#[test]
fn single_caption_is_shown_verbatim() {
    let (previewer, _) = previewer(FakeStore::new());
    let album = Album::new(vec![album_photo(1, ""), album_photo(2, "the beach")], false);

    let descriptor = previewer.album_preview(&album.messages[0], album.clone(), list_options());

    assert_eq!(descriptor.icon, Some(icon::ALBUM_PHOTOS));
    assert_eq!(text_of(&descriptor), Some("the beach"));
    assert!(!descriptor.translatable);

    let hidden = previewer.album_preview(
        &album.messages[0],
        album.clone(),
        PreviewOptions::notification(false, LookupMode::Background),
    );
    assert_eq!(text_of(&hidden), Some("2 photos"));
}

#[test]
fn mixed_album_counts_media() {
    let (previewer, _) = previewer(FakeStore::new());
    let video = in_album(
        message(
            2,
            ALICE,
            MessageContent::Video {
                caption: FormattedText::default(),
                is_secret: false,
            },
        ),
        ALBUM,
    );
    let album = Album::new(vec![album_photo(1, ""), video], false);

    let descriptor = previewer.album_preview(&album.messages[0], album.clone(), list_options());

    assert_eq!(descriptor.icon, Some(icon::ALBUM_MEDIA));
    assert_eq!(text_of(&descriptor), Some("2 media"));
}

#[tokio::test]
async fn growing_album_reports_new_size() {
    let store = FakeStore::new().with_remote_album(ALBUM, Album::new(photos(1..=4), false));
    let (previewer, _) = previewer(store);
    let partial = Album::new(photos(1..=2), true);

    let descriptor = previewer.album_preview(&partial.messages[0], partial.clone(), list_options());
    assert_eq!(text_of(&descriptor), Some("2 photos"));
    assert!(descriptor.has_refresher());
    assert!(descriptor.is_media_group());

    let grown = descriptor.refresh().await;
    assert!(grown.is_changed());
    let current = grown.into_current();
    assert_eq!(text_of(&current), Some("4 photos"));
    assert!(!current.has_refresher());
}

#[tokio::test]
async fn album_without_new_items_is_unchanged() {
    let store = FakeStore::new().with_remote_album(ALBUM, Album::new(photos(1..=2), false));
    let (previewer, _) = previewer(store);
    let partial = Album::new(photos(1..=2), true);

    let descriptor = previewer.album_preview(&partial.messages[0], partial.clone(), list_options());

    assert!(!descriptor.refresh().await.is_changed());
}

#[tokio::test]
async fn album_collapsing_to_one_message_becomes_single_preview() {
    let store = FakeStore::new().with_remote_album(ALBUM, Album::new(vec![album_photo(2, "survivor")], false));
    let (previewer, _) = previewer(store);
    let partial = Album::new(photos(1..=2), true);

    let descriptor = previewer.album_preview(&partial.messages[0], partial.clone(), list_options());
    let current = descriptor.refresh().await.into_current();

    assert_eq!(current.icon, Some(icon::PHOTO));
    assert_eq!(current.placeholder, Some(TemplateId::ChatContentPhoto));
    assert_eq!(text_of(&current), Some("survivor"));
}
