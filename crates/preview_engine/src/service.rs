//! Service messages whose phrasing depends on who did what to whom.

use preview_core::{
    call_duration, format_amount, format_or_bare, icon, plural_or_bare, Arg, BotWriteAccessReason,
    ChatKind, FormattedText, Message, MessageSender, PreviewDescriptor, TemplateId, UserId,
};

use crate::previewer::Previewer;

fn pick(is_outgoing: bool, incoming: TemplateId, outgoing: TemplateId) -> TemplateId {
    if is_outgoing {
        outgoing
    } else {
        incoming
    }
}

impl Previewer {
    /// Distances from a kilometre up are reported in whole kilometres.
    pub(crate) fn proximity_alert_preview(
        &self,
        traveler: &MessageSender,
        watcher: &MessageSender,
        distance: i32,
    ) -> PreviewDescriptor {
        let in_km = distance >= 1000;
        let count = i64::from(if in_km { distance / 1000 } else { distance });
        let unit = |km: TemplateId, m: TemplateId| if in_km { km } else { m };
        let (template, args) = if self.store.is_self_sender(traveler) {
            (
                unit(TemplateId::ProximityYouKm, TemplateId::ProximityYouM),
                vec![Arg::Text(self.store.sender_name(watcher))],
            )
        } else if self.store.is_self_sender(watcher) {
            (
                unit(TemplateId::ProximityFromYouKm, TemplateId::ProximityFromYouM),
                vec![Arg::Text(self.store.sender_name(traveler))],
            )
        } else {
            (
                unit(TemplateId::ProximityKm, TemplateId::ProximityM),
                vec![
                    Arg::Text(self.store.sender_name(traveler)),
                    Arg::Text(self.store.sender_name(watcher)),
                ],
            )
        };
        PreviewDescriptor::text(
            Some(icon::LOCATION),
            plural_or_bare(self.lang(), template, count, &args),
            true,
        )
    }

    pub(crate) fn video_chat_started_preview(&self, message: &Message) -> PreviewDescriptor {
        let template = if message.is_channel_post {
            pick(message.is_outgoing, TemplateId::LiveStreamStarted, TemplateId::LiveStreamStartedOutgoing)
        } else {
            pick(message.is_outgoing, TemplateId::VoiceChatStarted, TemplateId::VoiceChatStartedOutgoing)
        };
        PreviewDescriptor::placeholder(Some(icon::CALL), template)
    }

    pub(crate) fn video_chat_ended_preview(&self, message: &Message, duration: i32) -> PreviewDescriptor {
        let template = if message.is_channel_post {
            pick(message.is_outgoing, TemplateId::LiveStreamFinished, TemplateId::LiveStreamFinishedOutgoing)
        } else {
            pick(message.is_outgoing, TemplateId::VoiceChatFinished, TemplateId::VoiceChatFinishedOutgoing)
        };
        let lang = self.lang();
        PreviewDescriptor::text(
            Some(icon::CALL_END),
            format_or_bare(lang, template, &[Arg::Text(call_duration(lang, duration))]),
            true,
        )
    }

    pub(crate) fn video_chat_scheduled_preview(&self, message: &Message, start_date: i64) -> PreviewDescriptor {
        let template = if message.is_channel_post {
            TemplateId::LiveStreamScheduledOn
        } else {
            TemplateId::VideoChatScheduledFor
        };
        let lang = self.lang();
        PreviewDescriptor::text(
            Some(icon::CALL),
            format_or_bare(lang, template, &[Arg::Text(lang.timestamp(start_date))]),
            true,
        )
    }

    pub(crate) fn invite_participants_preview(&self, message: &Message, user_ids: &[UserId]) -> PreviewDescriptor {
        let outgoing = message.is_outgoing;
        let (invite_you, invite, invite_multi) = if message.is_channel_post {
            (
                TemplateId::LiveStreamInviteYou,
                pick(outgoing, TemplateId::LiveStreamInvite, TemplateId::LiveStreamInviteOutgoing),
                pick(outgoing, TemplateId::LiveStreamInviteMulti, TemplateId::LiveStreamInviteMultiOutgoing),
            )
        } else {
            (
                TemplateId::VoiceChatInviteYou,
                pick(outgoing, TemplateId::VoiceChatInvite, TemplateId::VoiceChatInviteOutgoing),
                pick(outgoing, TemplateId::VoiceChatInviteMulti, TemplateId::VoiceChatInviteMultiOutgoing),
            )
        };
        let lang = self.lang();
        match user_ids {
            [user_id] if self.store.is_self_user(*user_id) => {
                PreviewDescriptor::placeholder(Some(icon::GROUP_INVITE), invite_you)
            }
            [user_id] => PreviewDescriptor::text(
                Some(icon::GROUP_INVITE),
                format_or_bare(lang, invite, &[Arg::Text(self.store.user_name(*user_id))]),
                true,
            ),
            _ => PreviewDescriptor::text(
                Some(icon::GROUP_INVITE),
                plural_or_bare(lang, invite_multi, user_ids.len() as i64, &[]),
                true,
            ),
        }
    }

    pub(crate) fn add_members_preview(&self, message: &Message, member_user_ids: &[UserId]) -> PreviewDescriptor {
        let outgoing = message.is_outgoing;
        let lang = self.lang();
        match member_user_ids {
            [user_id] if Some(*user_id) == message.sender_user_id() => {
                let joined_public = matches!(
                    self.store.chat_kind(message.chat_id),
                    ChatKind::Supergroup | ChatKind::Channel
                );
                let template = if joined_public {
                    pick(outgoing, TemplateId::GroupJoinPublic, TemplateId::GroupJoinPublicOutgoing)
                } else {
                    pick(outgoing, TemplateId::GroupReturn, TemplateId::GroupReturnOutgoing)
                };
                PreviewDescriptor::placeholder(Some(icon::GROUP), template)
            }
            [user_id] if self.store.is_self_user(*user_id) => {
                PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupAddYou)
            }
            [user_id] => PreviewDescriptor::text(
                Some(icon::GROUP),
                format_or_bare(
                    lang,
                    pick(outgoing, TemplateId::GroupAdd, TemplateId::GroupAddOutgoing),
                    &[Arg::Text(self.store.user_name(*user_id))],
                ),
                true,
            ),
            _ => PreviewDescriptor::text(
                Some(icon::GROUP),
                plural_or_bare(
                    lang,
                    pick(outgoing, TemplateId::GroupAddMembers, TemplateId::GroupAddMembersOutgoing),
                    member_user_ids.len() as i64,
                    &[],
                ),
                true,
            ),
        }
    }

    pub(crate) fn delete_member_preview(&self, message: &Message, user_id: UserId) -> PreviewDescriptor {
        let outgoing = message.is_outgoing;
        if Some(user_id) == message.sender_user_id() {
            PreviewDescriptor::placeholder(
                Some(icon::GROUP),
                pick(outgoing, TemplateId::GroupLeft, TemplateId::GroupLeftOutgoing),
            )
        } else if self.store.is_self_user(user_id) {
            PreviewDescriptor::placeholder(Some(icon::GROUP), TemplateId::GroupKickYou)
        } else {
            PreviewDescriptor::text(
                Some(icon::GROUP),
                format_or_bare(
                    self.lang(),
                    pick(outgoing, TemplateId::GroupKick, TemplateId::GroupKickOutgoing),
                    &[Arg::Text(self.store.user_first_name(user_id))],
                ),
                true,
            )
        }
    }

    pub(crate) fn gifted_premium_preview(
        &self,
        message: &Message,
        currency: &str,
        amount: i64,
        month_count: i32,
    ) -> PreviewDescriptor {
        let price = Arg::bold(format_amount(currency, amount));
        let text = if message.is_outgoing {
            plural_or_bare(self.lang(), TemplateId::YouGiftedPremium, i64::from(month_count), &[price])
        } else {
            let sender = Arg::bold(self.store.sender_name(&message.sender));
            plural_or_bare(self.lang(), TemplateId::GiftedPremium, i64::from(month_count), &[sender, price])
        };
        PreviewDescriptor::text(Some(icon::GIFT), text, true)
    }

    pub(crate) fn premium_gift_code_preview(
        &self,
        message: &Message,
        creator: Option<&MessageSender>,
        month_count: i32,
    ) -> PreviewDescriptor {
        let text = if message.is_outgoing {
            plural_or_bare(self.lang(), TemplateId::YouGiftedPremiumCode, i64::from(month_count), &[])
        } else {
            let creator = creator.map(|creator| self.store.sender_name(creator)).unwrap_or_default();
            plural_or_bare(
                self.lang(),
                TemplateId::GiftedPremiumCode,
                i64::from(month_count),
                &[Arg::bold(creator)],
            )
        };
        PreviewDescriptor::text(Some(icon::GIFT), text, true)
    }

    /// Giveaway summary with the winner selection date.
    pub(crate) fn giveaway_preview(&self, winner_count: i32, date: i64, winners: TemplateId) -> PreviewDescriptor {
        let lang = self.lang();
        let text = if winner_count > 0 {
            let winners = plural_or_bare(lang, winners, i64::from(winner_count), &[Arg::Text(lang.date(date))]);
            format_or_bare(
                lang,
                TemplateId::FormatGiveawayInfo,
                &[Arg::Text(lang.string(TemplateId::Giveaway)), Arg::Text(winners.text)],
            )
        } else {
            FormattedText::plain(lang.string(TemplateId::Giveaway))
        };
        PreviewDescriptor::text(Some(icon::GIFT), text, true)
    }

    pub(crate) fn bot_write_access_preview(&self, reason: &BotWriteAccessReason) -> PreviewDescriptor {
        let lang = self.lang();
        let text = match reason {
            BotWriteAccessReason::ConnectedWebsite { domain_name } => {
                format_or_bare(lang, TemplateId::BotWebappAllowed, &[Arg::bold(domain_name.clone())])
            }
            BotWriteAccessReason::AddedToAttachmentMenu => FormattedText::plain(lang.string(TemplateId::BotAttachAllowed)),
            BotWriteAccessReason::LaunchedWebApp { web_app_title } => {
                format_or_bare(lang, TemplateId::BotWebappAllowed, &[Arg::bold(web_app_title.clone())])
            }
            BotWriteAccessReason::AcceptedRequest => FormattedText::plain(lang.string(TemplateId::BotAppAllowed)),
        };
        PreviewDescriptor::text(Some(icon::INFO), text, true)
    }

    pub(crate) fn payment_successful_preview(
        &self,
        message: &Message,
        currency: &str,
        total_amount: i64,
    ) -> PreviewDescriptor {
        PreviewDescriptor::text(
            Some(icon::INVOICE),
            format_or_bare(
                self.lang(),
                TemplateId::PaymentSuccessfullyPaidNoItem,
                &[
                    Arg::Text(format_amount(currency, total_amount)),
                    Arg::Text(self.store.chat_title(message.chat_id)),
                ],
            ),
            true,
        )
    }
}
