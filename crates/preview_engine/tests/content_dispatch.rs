mod support;

use pretty_assertions::assert_eq;
use preview_core::{
    icon, Arg, AudioInfo, BotWriteAccessReason, CallDiscardReason, ChatKind, EntityKind, FormatError,
    FormattedText, Icon, Localizer, Message, MessageContent, MessageSender, PollKind, PreviewDescriptor,
    TemplateId, TextEntity, DART_EMOJI, DICE_EMOJI,
};
use preview_engine::{LookupMode, PreviewConfig, PreviewOptions, Previewer};
use std::sync::Arc;

use support::{message, photo, previewer, previewer_with_config, text, FakeStore, ALICE, BOB, CHAT, ME};

fn list_options() -> PreviewOptions {
    PreviewOptions::chat_list(true, LookupMode::Background)
}

fn preview(previewer: &Previewer, message: &Message) -> PreviewDescriptor {
    previewer.content_preview(message.chat_id, Some(message), list_options())
}

fn text_of(descriptor: &PreviewDescriptor) -> Option<&str> {
    descriptor.text.as_ref().map(|text| text.text.as_str())
}

#[test]
fn missing_message_renders_as_deleted() {
    let (previewer, _) = previewer(FakeStore::new());
    let descriptor = previewer.content_preview(CHAT, None, list_options());
    assert_eq!(descriptor.icon, Some(icon::ERROR));
    assert_eq!(descriptor.placeholder, Some(TemplateId::DeletedMessage));
    assert!(!descriptor.translatable);
}

#[test]
fn text_starting_with_visible_link_gets_link_icon() {
    let (previewer, _) = previewer(FakeStore::new());
    let body = FormattedText::new(
        "check https://x.test",
        vec![TextEntity::new(
            0,
            5,
            EntityKind::TextUrl {
                url: "https://x.test".into(),
            },
        )],
    );
    let message = message(1, ALICE, MessageContent::Text { text: body.clone() });

    let descriptor = preview(&previewer, &message);

    assert_eq!(descriptor.icon, Some(icon::LINK));
    assert_eq!(descriptor.text, Some(body));
    assert!(!descriptor.translatable);
}

#[test]
fn plain_text_has_no_icon() {
    let (previewer, _) = previewer(FakeStore::new());
    let descriptor = preview(&previewer, &text(1, "hello there"));
    assert_eq!(descriptor.icon, None);
    assert_eq!(text_of(&descriptor), Some("hello there"));
}

#[test]
fn dice_four_uses_face_icon_and_rolled_phrase() {
    let (previewer, _) = previewer(FakeStore::new());
    let message = message(
        1,
        ALICE,
        MessageContent::Dice {
            emoji: DICE_EMOJI.into(),
            value: 4,
        },
    );

    let descriptor = preview(&previewer, &message);

    assert_eq!(descriptor.icon, icon::dice_face(4));
    assert_eq!(text_of(&descriptor), Some("rolled 4"));
    assert!(descriptor.translatable);
}

#[test]
fn dice_without_value_falls_back_to_generic_phrase() {
    let (previewer, _) = previewer(FakeStore::new());
    let message = message(
        1,
        ALICE,
        MessageContent::Dice {
            emoji: DICE_EMOJI.into(),
            value: 0,
        },
    );
    let descriptor = preview(&previewer, &message);
    assert_eq!(descriptor.icon, Some(icon::DICE));
    assert_eq!(descriptor.placeholder, Some(TemplateId::ChatContentDice));
}

#[test]
fn dart_values_select_fixed_phrases() {
    let (previewer, _) = previewer(FakeStore::new());
    let dart = |value| {
        message(
            1,
            ALICE,
            MessageContent::Dice {
                emoji: DART_EMOJI.into(),
                value,
            },
        )
    };
    let bullseye = preview(&previewer, &dart(6));
    assert_eq!(bullseye.icon, Some(icon::DART));
    assert_eq!(bullseye.placeholder, Some(TemplateId::ChatContentDart6));
    assert_eq!(
        preview(&previewer, &dart(9)).placeholder,
        Some(TemplateId::ChatContentDart5)
    );
}

#[test]
fn other_game_emoji_show_only_the_emoji() {
    let (previewer, _) = previewer(FakeStore::new());
    let basketball = message(
        1,
        ALICE,
        MessageContent::Dice {
            emoji: "\u{1F3C0}".into(),
            value: 3,
        },
    );

    let descriptor = preview(&previewer, &basketball);

    assert_eq!(descriptor.icon, Some(Icon::emoji("\u{1F3C0}")));
    assert_eq!(descriptor.placeholder, None);
    assert_eq!(text_of(&descriptor), None);

    let unknown = message(
        2,
        ALICE,
        MessageContent::Dice {
            emoji: "x".into(),
            value: 3,
        },
    );
    let fallback = preview(&previewer, &unknown);
    assert_eq!(fallback.icon, icon::dice_face(3));
    assert_eq!(text_of(&fallback), Some("rolled 3"));
}

#[test]
fn secret_photo_keeps_caption_under_secret_icon() {
    let (previewer, _) = previewer(FakeStore::new());
    let message = message(
        1,
        ALICE,
        MessageContent::Photo {
            caption: FormattedText::plain("for your eyes only"),
            is_secret: true,
        },
    );

    let descriptor = preview(&previewer, &message);

    assert_eq!(descriptor.icon, Some(icon::SECRET_PHOTO));
    assert_eq!(descriptor.placeholder, Some(TemplateId::SelfDestructPhoto));
    assert_eq!(text_of(&descriptor), Some("for your eyes only"));
    assert!(!descriptor.has_refresher());
}

#[test]
fn message_restriction_wins_over_content() {
    let config = PreviewConfig {
        restrict_content: true,
        ..PreviewConfig::default()
    };
    let (previewer, _) = previewer_with_config(FakeStore::new(), config);
    let mut restricted = photo(1, "a caption");
    restricted.restriction_reason = "Unavailable in your region".into();

    let descriptor = preview(&previewer, &restricted);

    assert_eq!(descriptor.icon, Some(icon::ERROR));
    assert_eq!(text_of(&descriptor), Some("Unavailable in your region"));
    assert_eq!(descriptor.placeholder, None);
    assert!(!descriptor.translatable);
}

#[test]
fn chat_restriction_applies_only_when_requested() {
    let config = PreviewConfig {
        restrict_content: true,
        ..PreviewConfig::default()
    };
    let store = FakeStore::new().with_restriction(CHAT, "Chat is blocked");
    let (previewer, _) = previewer_with_config(store, config);
    let message = text(1, "hi");

    let checked = previewer.chat_list_preview(CHAT, Some(&message), true, LookupMode::Interactive);
    assert_eq!(text_of(&checked), Some("Chat is blocked"));

    let unchecked = previewer.chat_list_preview(CHAT, Some(&message), false, LookupMode::Interactive);
    assert_eq!(text_of(&unchecked), Some("hi"));
}

#[test]
fn restrictions_are_ignored_when_policy_is_off() {
    let (previewer, _) = previewer(FakeStore::new().with_restriction(CHAT, "Chat is blocked"));
    let mut message = text(1, "hi");
    message.restriction_reason = "nope".into();
    assert_eq!(text_of(&preview(&previewer, &message)), Some("hi"));
}

#[test]
fn placeholders_only_without_content() {
    let (previewer, _) = previewer(FakeStore::new());
    let message = photo(1, "sunset");
    let descriptor = previewer.notification_preview(CHAT, Some(&message), false, LookupMode::Background);
    assert_eq!(descriptor.icon, Some(icon::PHOTO));
    assert_eq!(descriptor.placeholder, Some(TemplateId::ChatContentPhoto));
    assert_eq!(descriptor.text, None);
}

#[test]
fn pending_edit_replaces_outgoing_text() {
    let store = FakeStore::new().with_pending_text(CHAT, 7, "edited locally");
    let (previewer, _) = previewer(store);
    let mut message = text(7, "original");
    message.is_outgoing = true;
    assert_eq!(text_of(&preview(&previewer, &message)), Some("edited locally"));
}

#[test]
fn auto_delete_phrase_depends_on_chat_kind() {
    let store = FakeStore::new()
        .with_chat(200, ChatKind::Private, "Alice")
        .with_chat(300, ChatKind::Channel, "News");
    let (previewer, _) = previewer(store);
    let timer = |chat_id, seconds| {
        Message::new(
            chat_id,
            1,
            MessageSender::User(ALICE),
            MessageContent::ChatSetMessageAutoDeleteTime { seconds },
        )
    };

    let group = preview(&previewer, &timer(CHAT, 14 * 86_400));
    assert_eq!(group.icon, Some(icon::TIMER));
    assert_eq!(text_of(&group), Some("New messages will auto-delete in 2 weeks"));
    assert_eq!(
        group.text.as_ref().map(|text| text.entities.clone()),
        Some(vec![TextEntity::new(33, 1, EntityKind::Bold)])
    );

    let private = preview(&previewer, &timer(200, 3600));
    assert_eq!(text_of(&private), Some("set messages to auto-delete in 1 hour"));

    let channel_off = preview(&previewer, &timer(300, 0));
    assert_eq!(channel_off.icon, Some(icon::TIMER_OFF));
    assert_eq!(channel_off.placeholder, Some(TemplateId::ChannelTtlOff));
}

#[test]
fn call_outcomes_pick_distinct_phrases() {
    let (previewer, _) = previewer(FakeStore::new());
    let call = |discard_reason, duration, is_outgoing| {
        let mut message = message(
            1,
            ALICE,
            MessageContent::Call {
                discard_reason,
                duration,
                is_video: false,
            },
        );
        message.is_outgoing = is_outgoing;
        message
    };

    let declined = preview(&previewer, &call(CallDiscardReason::Declined, 0, false));
    assert_eq!(declined.icon, Some(icon::CALL_DECLINED));
    assert_eq!(declined.placeholder, Some(TemplateId::CallMessageIncomingDeclined));

    let missed = preview(&previewer, &call(CallDiscardReason::Missed, 0, true));
    assert_eq!(missed.placeholder, Some(TemplateId::CallMessageOutgoingMissed));

    let unanswered = preview(&previewer, &call(CallDiscardReason::HungUp, 0, true));
    assert_eq!(unanswered.placeholder, Some(TemplateId::OutgoingCall));
    assert_eq!(unanswered.text, None);

    let talked = preview(&previewer, &call(CallDiscardReason::HungUp, 300, false));
    assert_eq!(text_of(&talked), Some("Incoming call (5 minutes)"));
}

#[test]
fn quiz_and_poll_use_their_own_icons() {
    let (previewer, _) = previewer(FakeStore::new());
    let poll = |kind| {
        message(
            1,
            ALICE,
            MessageContent::Poll {
                question: "Tea or coffee?".into(),
                kind,
            },
        )
    };
    let quiz = preview(&previewer, &poll(PollKind::Quiz));
    assert_eq!(quiz.icon, Some(icon::QUIZ));
    assert_eq!(quiz.placeholder, Some(TemplateId::Quiz));
    assert_eq!(text_of(&quiz), Some("Tea or coffee?"));

    let regular = preview(&previewer, &poll(PollKind::Regular));
    assert_eq!(regular.icon, Some(icon::POLL));
    assert_eq!(regular.placeholder, Some(TemplateId::Poll));
}

#[test]
fn animated_sticker_wording_outside_chat_list() {
    let (previewer, _) = previewer(FakeStore::new());
    let sticker = message(
        1,
        ALICE,
        MessageContent::Sticker {
            emoji: "\u{1F600}".into(),
            is_animated: true,
        },
    );

    let in_list = preview(&previewer, &sticker);
    assert_eq!(in_list.icon, Some(Icon::emoji("\u{1F600}")));
    assert_eq!(in_list.placeholder, Some(TemplateId::Sticker));

    let notification = previewer.notification_preview(CHAT, Some(&sticker), true, LookupMode::Background);
    assert_eq!(notification.placeholder, Some(TemplateId::AnimatedSticker));
}

#[test]
fn audio_without_metadata_uses_translatable_fallbacks() {
    let (previewer, _) = previewer(FakeStore::new());
    let audio = message(
        1,
        ALICE,
        MessageContent::Audio {
            audio: AudioInfo::default(),
            caption: FormattedText::default(),
        },
    );
    let descriptor = preview(&previewer, &audio);
    assert_eq!(descriptor.icon, Some(icon::AUDIO));
    assert_eq!(text_of(&descriptor), Some("Unknown track \u{2013} Unknown artist"));
    assert!(descriptor.translatable);
}

#[test]
fn voice_note_duration_becomes_argument() {
    let (previewer, _) = previewer(FakeStore::new());
    let voice = message(
        1,
        ALICE,
        MessageContent::VoiceNote {
            duration: 65,
            caption: FormattedText::default(),
        },
    );
    let descriptor = preview(&previewer, &voice);
    assert_eq!(descriptor.placeholder, Some(TemplateId::ChatContentVoice));
    assert_eq!(text_of(&descriptor), Some("Voice message (1:05)"));
    assert!(descriptor.translatable);
}

#[test]
fn theme_name_is_bold_in_phrase() {
    let (previewer, _) = previewer(FakeStore::new());
    let theme = message(
        1,
        ALICE,
        MessageContent::ChatSetTheme {
            theme_name: "Desert".into(),
        },
    );
    let descriptor = preview(&previewer, &theme);
    let text = descriptor.text.expect("theme phrase");
    assert_eq!(text.text, "changed the chat theme to Desert");
    assert_eq!(text.entities, vec![TextEntity::new(26, 6, EntityKind::Bold)]);
}

#[test]
fn membership_phrases_name_the_right_people() {
    let store = FakeStore::new().with_chat(400, ChatKind::Supergroup, "Public");
    let (previewer, _) = previewer(store);

    let returned = message(1, BOB, MessageContent::ChatAddMembers { member_user_ids: vec![BOB] });
    assert_eq!(preview(&previewer, &returned).placeholder, Some(TemplateId::GroupReturn));

    let joined = Message::new(
        400,
        2,
        MessageSender::User(BOB),
        MessageContent::ChatAddMembers { member_user_ids: vec![BOB] },
    );
    assert_eq!(preview(&previewer, &joined).placeholder, Some(TemplateId::GroupJoinPublic));

    let added_me = message(3, ALICE, MessageContent::ChatAddMembers { member_user_ids: vec![ME] });
    assert_eq!(preview(&previewer, &added_me).placeholder, Some(TemplateId::GroupAddYou));

    let added_many = message(
        4,
        ALICE,
        MessageContent::ChatAddMembers {
            member_user_ids: vec![BOB, ME],
        },
    );
    assert_eq!(text_of(&preview(&previewer, &added_many)), Some("added 2 members"));

    let kicked = message(5, ALICE, MessageContent::ChatDeleteMember { user_id: BOB });
    assert_eq!(text_of(&preview(&previewer, &kicked)), Some("removed Bob"));
}

#[test]
fn proximity_alert_switches_to_kilometres() {
    let (previewer, _) = previewer(FakeStore::new());
    let alert = |traveler, watcher, distance| {
        message(
            1,
            ALICE,
            MessageContent::ProximityAlertTriggered {
                traveler: MessageSender::User(traveler),
                watcher: MessageSender::User(watcher),
                distance,
            },
        )
    };
    assert_eq!(
        text_of(&preview(&previewer, &alert(ME, ALICE, 1500))),
        Some("You are now within 1 km from Alice Liddell")
    );
    assert_eq!(
        text_of(&preview(&previewer, &alert(BOB, ME, 250))),
        Some("Bob is now within 250 m from you")
    );
}

#[test]
fn payment_names_the_chat() {
    let (previewer, _) = previewer(FakeStore::new());
    let payment = message(
        1,
        ME,
        MessageContent::PaymentSuccessful {
            currency: "USD".into(),
            total_amount: 1250,
        },
    );
    let descriptor = preview(&previewer, &payment);
    assert_eq!(descriptor.icon, Some(icon::INVOICE));
    assert_eq!(
        text_of(&descriptor),
        Some("You successfully transferred $12.50 to Tea Party")
    );
}

#[test]
fn giveaway_winners_include_the_date() {
    let (previewer, _) = previewer(FakeStore::new());
    let winners = message(
        1,
        ALICE,
        MessageContent::PremiumGiveawayWinners {
            winner_count: 3,
            actual_winners_selection_date: 1_700_000_000,
        },
    );
    assert_eq!(
        text_of(&preview(&previewer, &winners)),
        Some("Giveaway: 3 winners were selected on Nov 14, 2023")
    );
}

#[test]
fn every_content_variant_produces_a_preview() {
    let (previewer, _) = previewer(FakeStore::new());
    let caption = FormattedText::default;
    let contents = vec![
        MessageContent::Text { text: FormattedText::plain("x") },
        MessageContent::AnimatedEmoji { emoji: "\u{2764}".into() },
        MessageContent::Photo { caption: caption(), is_secret: false },
        MessageContent::Video { caption: caption(), is_secret: true },
        MessageContent::Animation { caption: caption() },
        MessageContent::Document { file_name: "a.pdf".into(), caption: caption() },
        MessageContent::Audio { audio: AudioInfo::default(), caption: caption() },
        MessageContent::VoiceNote { duration: 0, caption: caption() },
        MessageContent::VideoNote { duration: 12 },
        MessageContent::Contact { first_name: "Ada".into(), last_name: String::new() },
        MessageContent::Poll { question: "?".into(), kind: PollKind::Regular },
        MessageContent::Dice { emoji: DICE_EMOJI.into(), value: 2 },
        MessageContent::Call { discard_reason: CallDiscardReason::Empty, duration: 0, is_video: true },
        MessageContent::Location { live_period: 60, expires_in: 30 },
        MessageContent::Venue { title: "Cafe".into() },
        MessageContent::Game { title: "Chess".into() },
        MessageContent::GameScore { game_message_id: 99, score: 10 },
        MessageContent::Sticker { emoji: String::new(), is_animated: false },
        MessageContent::Invoice { currency: "EUR".into(), total_amount: 500, title: "Book".into() },
        MessageContent::Story { via_mention: false },
        MessageContent::PinMessage { message_id: 98 },
        MessageContent::ProximityAlertTriggered {
            traveler: MessageSender::User(ALICE),
            watcher: MessageSender::User(BOB),
            distance: 10,
        },
        MessageContent::VideoChatStarted,
        MessageContent::VideoChatEnded { duration: 125 },
        MessageContent::VideoChatScheduled { start_date: 1_700_000_000 },
        MessageContent::InviteVideoChatParticipants { user_ids: vec![ME] },
        MessageContent::ChatAddMembers { member_user_ids: vec![BOB] },
        MessageContent::ChatDeleteMember { user_id: ALICE },
        MessageContent::ChatChangeTitle { title: "New".into() },
        MessageContent::ChatChangePhoto,
        MessageContent::ChatDeletePhoto,
        MessageContent::ChatSetMessageAutoDeleteTime { seconds: 86_400 },
        MessageContent::ChatSetTheme { theme_name: String::new() },
        MessageContent::ChatSetBackground { is_same: false },
        MessageContent::ChatUpgradeTo,
        MessageContent::ChatUpgradeFrom,
        MessageContent::BasicGroupChatCreate,
        MessageContent::SupergroupChatCreate,
        MessageContent::ChatJoinByLink,
        MessageContent::ChatJoinByRequest,
        MessageContent::GiftedPremium { currency: "USD".into(), amount: 399, month_count: 3 },
        MessageContent::PremiumGiftCode { creator: Some(MessageSender::Chat(CHAT)), month_count: 6 },
        MessageContent::PremiumGiveawayCreated,
        MessageContent::PremiumGiveaway { winner_count: 5, winners_selection_date: 1_700_000_000 },
        MessageContent::PremiumGiveawayWinners { winner_count: 0, actual_winners_selection_date: 0 },
        MessageContent::PremiumGiveawayCompleted { winner_count: 2, unclaimed_prize_count: 0 },
        MessageContent::CustomServiceAction { text: "custom".into() },
        MessageContent::BotWriteAccessAllowed { reason: BotWriteAccessReason::AcceptedRequest },
        MessageContent::WebAppDataSent { button_text: "Go".into() },
        MessageContent::PaymentSuccessful { currency: "GBP".into(), total_amount: 100 },
        MessageContent::ScreenshotTaken,
        MessageContent::ExpiredPhoto,
        MessageContent::ExpiredVideo,
        MessageContent::ContactRegistered,
        MessageContent::UsersShared,
        MessageContent::ChatShared,
        MessageContent::SuggestProfilePhoto,
        MessageContent::ForumTopicCreated,
        MessageContent::ForumTopicEdited,
        MessageContent::ForumTopicIsClosedToggled,
        MessageContent::ForumTopicIsHiddenToggled,
        MessageContent::PassportDataSent,
        MessageContent::Unsupported,
    ];

    for (id, content) in contents.into_iter().enumerate() {
        let message = message(id as i64 + 1, ALICE, content);
        for mode in [LookupMode::Interactive, LookupMode::Background] {
            let descriptor = previewer.content_preview(CHAT, Some(&message), PreviewOptions::chat_list(true, mode));
            assert!(!descriptor.is_blank(), "blank preview for {:?}", message.content);
            assert!(
                !descriptor.to_plain_string(previewer.lang()).is_empty(),
                "empty rendering for {:?}",
                message.content
            );
        }
    }
}

#[test]
fn unsupported_variants_use_designated_placeholders() {
    let (previewer, _) = previewer(FakeStore::new());
    let known = preview(&previewer, &message(1, ALICE, MessageContent::ForumTopicCreated));
    assert_eq!(known.placeholder, Some(TemplateId::UnsupportedMessage));
    let unknown = preview(&previewer, &message(2, ALICE, MessageContent::Unsupported));
    assert_eq!(unknown.placeholder, Some(TemplateId::UnsupportedMessageType));
}

/// Localizer whose substitution always fails.
struct BrokenLocalizer;

impl Localizer for BrokenLocalizer {
    fn string(&self, id: TemplateId) -> String {
        format!("{id:?}")
    }

    fn format(&self, id: TemplateId, _args: &[Arg]) -> Result<FormattedText, FormatError> {
        Err(FormatError::MalformedPlaceholder { template: id, position: 0 })
    }

    fn plural(&self, id: TemplateId, _count: i64, _args: &[Arg]) -> Result<FormattedText, FormatError> {
        Err(FormatError::MissingCount { template: id })
    }

    fn date(&self, unix_seconds: i64) -> String {
        unix_seconds.to_string()
    }

    fn timestamp(&self, unix_seconds: i64) -> String {
        unix_seconds.to_string()
    }
}

#[test]
fn format_failures_fall_back_to_bare_template() {
    support::init_logging();
    let previewer = Previewer::new(
        Arc::new(FakeStore::new()),
        Arc::new(BrokenLocalizer),
        PreviewConfig::default(),
    );

    let data_sent = message(1, ME, MessageContent::WebAppDataSent { button_text: "Go".into() });
    assert_eq!(text_of(&preview(&previewer, &data_sent)), Some("BotDataSent"));

    let dice = message(
        2,
        ALICE,
        MessageContent::Dice {
            emoji: DICE_EMOJI.into(),
            value: 3,
        },
    );
    assert_eq!(text_of(&preview(&previewer, &dice)), Some("ChatContentDiceRolled"));
}
