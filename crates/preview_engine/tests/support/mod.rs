#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use preview_core::{
    full_name, Album, ChatId, ChatKind, FormattedText, Message, MessageContent, MessageId,
    MessageSender, TemplateCatalog, UserId,
};
use preview_engine::{MessageStore, PreviewConfig, Previewer};

pub const CHAT: ChatId = 100;
pub const ME: UserId = 1;
pub const ALICE: UserId = 2;
pub const BOB: UserId = 3;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(preview_logging::initialize_for_tests);
}

/// In-memory store. Local and remote views are kept apart so tests can
/// decide what is already cached and what needs a fetch.
#[derive(Default)]
pub struct FakeStore {
    local: HashMap<(ChatId, MessageId), Message>,
    remote: HashMap<(ChatId, MessageId), Message>,
    local_albums: HashMap<i64, Album>,
    remote_albums: HashMap<i64, Album>,
    chats: HashMap<ChatId, (ChatKind, String)>,
    restrictions: HashMap<ChatId, String>,
    users: HashMap<UserId, (String, String)>,
    pending: HashMap<(ChatId, MessageId), FormattedText>,
    self_user: UserId,
    pub local_lookups: AtomicUsize,
    pub remote_fetches: AtomicUsize,
    pub album_fetches: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            self_user: ME,
            ..Self::default()
        }
        .with_user(ME, "Me", "")
        .with_user(ALICE, "Alice", "Liddell")
        .with_user(BOB, "Bob", "")
        .with_chat(CHAT, ChatKind::BasicGroup, "Tea Party")
    }

    pub fn with_user(mut self, user_id: UserId, first_name: &str, last_name: &str) -> Self {
        self.users
            .insert(user_id, (first_name.to_string(), last_name.to_string()));
        self
    }

    pub fn with_chat(mut self, chat_id: ChatId, kind: ChatKind, title: &str) -> Self {
        self.chats.insert(chat_id, (kind, title.to_string()));
        self
    }

    pub fn with_restriction(mut self, chat_id: ChatId, reason: &str) -> Self {
        self.restrictions.insert(chat_id, reason.to_string());
        self
    }

    /// Cached locally, and therefore also available remotely.
    pub fn with_local(mut self, message: Message) -> Self {
        self.remote
            .insert((message.chat_id, message.id), message.clone());
        self.local.insert((message.chat_id, message.id), message);
        self
    }

    pub fn with_remote(mut self, message: Message) -> Self {
        self.remote.insert((message.chat_id, message.id), message);
        self
    }

    pub fn with_local_album(mut self, album_id: i64, album: Album) -> Self {
        self.local_albums.insert(album_id, album);
        self
    }

    pub fn with_remote_album(mut self, album_id: i64, album: Album) -> Self {
        self.remote_albums.insert(album_id, album);
        self
    }

    pub fn with_pending_text(mut self, chat_id: ChatId, message_id: MessageId, text: &str) -> Self {
        self.pending
            .insert((chat_id, message_id), FormattedText::plain(text));
        self
    }

    pub fn remote_fetches(&self) -> usize {
        self.remote_fetches.load(Ordering::SeqCst)
    }

    pub fn album_fetches(&self) -> usize {
        self.album_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MessageStore for FakeStore {
    fn message_locally(&self, chat_id: ChatId, message_id: MessageId, _timeout: Duration) -> Option<Message> {
        self.local_lookups.fetch_add(1, Ordering::SeqCst);
        self.local.get(&(chat_id, message_id)).cloned()
    }

    async fn message(&self, chat_id: ChatId, message_id: MessageId) -> Option<Message> {
        self.remote_fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.remote.get(&(chat_id, message_id)).cloned()
    }

    async fn album(&self, representative: &Message, local_only: bool, _known: Option<&Album>) -> Album {
        self.album_fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let albums = if local_only {
            &self.local_albums
        } else {
            &self.remote_albums
        };
        albums
            .get(&representative.media_album_id)
            .cloned()
            .unwrap_or_else(|| Album::new(vec![representative.clone()], false))
    }

    fn chat_restriction_reason(&self, chat_id: ChatId) -> Option<String> {
        self.restrictions.get(&chat_id).cloned()
    }

    fn chat_kind(&self, chat_id: ChatId) -> ChatKind {
        self.chats
            .get(&chat_id)
            .map(|(kind, _)| *kind)
            .unwrap_or(ChatKind::Private)
    }

    fn chat_title(&self, chat_id: ChatId) -> String {
        self.chats
            .get(&chat_id)
            .map(|(_, title)| title.clone())
            .unwrap_or_default()
    }

    fn is_self_user(&self, user_id: UserId) -> bool {
        user_id == self.self_user
    }

    fn sender_name(&self, sender: &MessageSender) -> String {
        match sender {
            MessageSender::User(user_id) => self.user_name(*user_id),
            MessageSender::Chat(chat_id) => self.chat_title(*chat_id),
        }
    }

    fn user_name(&self, user_id: UserId) -> String {
        self.users
            .get(&user_id)
            .map(|(first, last)| full_name(first, last))
            .unwrap_or_else(|| format!("User {user_id}"))
    }

    fn user_first_name(&self, user_id: UserId) -> String {
        self.users
            .get(&user_id)
            .map(|(first, _)| first.clone())
            .unwrap_or_default()
    }

    fn pending_text(&self, chat_id: ChatId, message_id: MessageId) -> Option<FormattedText> {
        self.pending.get(&(chat_id, message_id)).cloned()
    }
}

pub fn previewer(store: FakeStore) -> (Previewer, Arc<FakeStore>) {
    previewer_with_config(store, PreviewConfig::default())
}

pub fn previewer_with_config(store: FakeStore, config: PreviewConfig) -> (Previewer, Arc<FakeStore>) {
    init_logging();
    let store = Arc::new(store);
    let previewer = Previewer::new(store.clone(), Arc::new(TemplateCatalog::english()), config);
    (previewer, store)
}

pub fn message(id: MessageId, sender: UserId, content: MessageContent) -> Message {
    Message::new(CHAT, id, MessageSender::User(sender), content)
}

pub fn text(id: MessageId, body: &str) -> Message {
    message(
        id,
        ALICE,
        MessageContent::Text {
            text: FormattedText::plain(body),
        },
    )
}

pub fn photo(id: MessageId, caption: &str) -> Message {
    message(
        id,
        ALICE,
        MessageContent::Photo {
            caption: FormattedText::plain(caption),
            is_secret: false,
        },
    )
}

pub fn in_album(mut message: Message, album_id: i64) -> Message {
    message.media_album_id = album_id;
    message
}
